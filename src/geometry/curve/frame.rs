use nalgebra::Rotation3;
use tracing::debug;

use crate::error::Result;
use crate::geometry::surface::unit;
use crate::math::{perpendicular_dir, Point3, Vector3};

use super::Curve;

/// An orthonormal frame attached to a point on a curve.
///
/// `tangent` follows the curve; `normal` and `binormal` span the
/// cross-section plane, with `binormal = tangent x normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub origin: Point3,
    pub tangent: Vector3,
    pub normal: Vector3,
    pub binormal: Vector3,
}

impl Frame {
    /// Builds a frame from a tangent, picking an arbitrary perpendicular.
    ///
    /// # Errors
    ///
    /// Returns an error if the tangent is zero-length.
    pub fn from_tangent(origin: Point3, tangent: Vector3) -> Result<Self> {
        let tangent = unit(tangent)?;
        let normal = perpendicular_dir(&tangent);
        let binormal = tangent.cross(&normal);
        Ok(Self {
            origin,
            tangent,
            normal,
            binormal,
        })
    }

    /// Carries this frame to a new origin and tangent with minimal rotation.
    ///
    /// `new_tangent` must be a unit vector.
    #[must_use]
    pub fn transported(&self, origin: Point3, new_tangent: Vector3) -> Self {
        let normal = match Rotation3::rotation_between(&self.tangent, &new_tangent) {
            Some(rotation) => rotation * self.normal,
            // Antiparallel tangents: reflect through the cross-section plane.
            None => -self.normal,
        };
        // Re-orthogonalize against drift.
        let normal = (normal - new_tangent * normal.dot(&new_tangent))
            .try_normalize(f64::EPSILON)
            .unwrap_or_else(|| perpendicular_dir(&new_tangent));
        Self {
            origin,
            tangent: new_tangent,
            normal,
            binormal: new_tangent.cross(&normal),
        }
    }

    /// Maps local cross-section coordinates `(x, y)` to world space.
    #[must_use]
    pub fn point(&self, x: f64, y: f64) -> Point3 {
        self.origin + self.normal * x + self.binormal * y
    }
}

/// Samples `stations` evenly spaced frames along a curve.
///
/// Each frame is the previous one parallel-transported onto the new tangent,
/// so cross-sections do not twist. Stations whose frame cannot be evaluated
/// are dropped; the result may therefore hold fewer than `stations` frames.
#[must_use]
pub fn transport_frames(curve: &dyn Curve, stations: usize) -> Vec<Frame> {
    let domain = curve.domain();
    if !domain.is_bounded() || stations < 2 {
        return Vec::new();
    }
    let last = stations - 1;
    let mut frames: Vec<Frame> = Vec::with_capacity(stations);
    for i in 0..stations {
        let t = domain.param_at(i, last);
        match curve.frame_at(t) {
            Ok(frame) => {
                let next = match frames.last() {
                    Some(prev) => prev.transported(frame.origin, frame.tangent),
                    None => frame,
                };
                frames.push(next);
            }
            Err(err) => debug!("dropping station {i} at t={t:.6}: {err}"),
        }
    }
    frames
}
