use std::f64::consts::{PI, TAU};

use crate::error::{GeometryError, Result};
use crate::geometry::surface::{Surface, SurfaceDomain};
use crate::math::Point3;
use crate::tessellation::{wire_samples, TessellationParams};
use crate::topology::{FaceId, TopologyStore};

/// Computes the parametric domain covered by a face.
///
/// Faces created with an exact trim box report it directly. Otherwise the
/// boundary is sampled and mapped through the surface inverse; on periodic
/// surfaces the angular parameter is unwrapped along the boundary so
/// patches crossing the seam get a continuous range.
pub struct FaceDomain {
    face: FaceId,
}

impl FaceDomain {
    /// Creates a new `FaceDomain` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the face is missing or its boundary is empty.
    pub fn execute(&self, store: &TopologyStore) -> Result<SurfaceDomain> {
        let face = store.face(self.face)?;
        if let Some(bounds) = face.uv_bounds {
            return Ok(bounds);
        }

        let samples = wire_samples(store, face.outer_wire, &TessellationParams::default())?;
        if samples.is_empty() {
            return Err(GeometryError::Degenerate("face boundary has no points".into()).into());
        }
        let inverse = |p: &Point3| face.surface.inverse(p);

        let (mut u_min, mut u_max, v_min, v_max) = uv_bounds(&samples, inverse);
        if face.surface.is_u_periodic() {
            (u_min, u_max) = unwrapped_u_bounds(&samples, inverse);
            if u_max - u_min > TAU {
                u_max = u_min + TAU;
            }
        }
        Ok(SurfaceDomain::new(u_min, u_max, v_min, v_max))
    }
}

/// Component-wise parameter bounds of a set of points.
fn uv_bounds(points: &[Point3], inverse: impl Fn(&Point3) -> (f64, f64)) -> (f64, f64, f64, f64) {
    points.iter().map(inverse).fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(u0, u1, v0, v1), (u, v)| (u0.min(u), u1.max(u), v0.min(v), v1.max(v)),
    )
}

/// U-bounds with `atan2` jumps at the seam removed.
///
/// Consecutive samples are assumed to be less than half a turn apart.
fn unwrapped_u_bounds(points: &[Point3], inverse: impl Fn(&Point3) -> (f64, f64)) -> (f64, f64) {
    let Some(first) = points.first() else {
        return (0.0, 0.0);
    };
    let (first_u, _) = inverse(first);
    let (mut u_min, mut u_max) = (first_u, first_u);
    let mut prev_raw = first_u;
    let mut running = first_u;

    for p in &points[1..] {
        let (raw_u, _) = inverse(p);
        let mut delta = raw_u - prev_raw;
        if delta > PI {
            delta -= TAU;
        } else if delta < -PI {
            delta += TAU;
        }
        running += delta;
        u_min = u_min.min(running);
        u_max = u_max.max(running);
        prev_raw = raw_u;
    }

    (u_min, u_max)
}
