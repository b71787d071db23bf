use std::f64::consts::TAU;

use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::curve::{transport_frames, Curve, Frame};
use crate::math::{Point3, TOLERANCE};
use crate::topology::{SolidId, TopologyStore};

use super::Loft;

/// Cross-section swept along a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepProfile {
    /// A regular polygon approximating a circle.
    Circle { radius: f64, segments: usize },
    /// A rectangle, `width` along the frame normal and `height` along the binormal.
    Rectangle { width: f64, height: f64 },
}

impl SweepProfile {
    fn validate(&self) -> Result<()> {
        let ok = match *self {
            Self::Circle { radius, segments } => radius > TOLERANCE && radius.is_finite() && segments >= 3,
            Self::Rectangle { width, height } => {
                width > TOLERANCE && height > TOLERANCE && width.is_finite() && height.is_finite()
            }
        };
        if ok {
            Ok(())
        } else {
            Err(OperationError::InvalidInput(format!("invalid sweep profile {self:?}")).into())
        }
    }

    /// The profile placed in `frame`, counter-clockwise about its tangent.
    #[must_use]
    pub fn section(&self, frame: &Frame) -> Vec<Point3> {
        match *self {
            Self::Circle { radius, segments } => (0..segments)
                .map(|k| {
                    #[allow(clippy::cast_precision_loss)]
                    let angle = TAU * k as f64 / segments as f64;
                    let (s, c) = angle.sin_cos();
                    frame.point(radius * c, radius * s)
                })
                .collect(),
            Self::Rectangle { width, height } => {
                let (hw, hh) = (width * 0.5, height * 0.5);
                vec![
                    frame.point(-hw, -hh),
                    frame.point(hw, -hh),
                    frame.point(hw, hh),
                    frame.point(-hw, hh),
                ]
            }
        }
    }
}

/// Sweeps a profile along a curve into a capped solid.
///
/// Stations are evenly spaced in the curve's parameter; frames are carried
/// from station to station by parallel transport so the profile does not
/// twist. The placed sections are then lofted.
pub struct Sweep<'a> {
    path: &'a dyn Curve,
    profile: SweepProfile,
    stations: usize,
}

impl<'a> Sweep<'a> {
    /// Default number of stations along the path.
    pub const DEFAULT_STATIONS: usize = 16;

    /// Creates a new `Sweep` operation.
    #[must_use]
    pub fn new(path: &'a dyn Curve, profile: SweepProfile) -> Self {
        Self {
            path,
            profile,
            stations: Self::DEFAULT_STATIONS,
        }
    }

    /// Sets the number of stations sampled along the path.
    #[must_use]
    pub fn with_stations(mut self, stations: usize) -> Self {
        self.stations = stations;
        self
    }

    /// Executes the sweep, creating the solid in the topology store.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for a degenerate profile and
    /// [`OperationError::Failed`] when fewer than two stations yield a frame.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        self.profile.validate()?;

        let frames = transport_frames(self.path, self.stations);
        if frames.len() < 2 {
            return Err(OperationError::Failed(format!(
                "sweep needs 2 valid stations, got {} of {}",
                frames.len(),
                self.stations
            ))
            .into());
        }
        if frames.len() < self.stations {
            debug!(
                kept = frames.len(),
                requested = self.stations,
                "sweep dropped stations without a frame"
            );
        }

        let sections = frames.iter().map(|f| self.profile.section(f)).collect();
        Loft::new(sections, true).execute(store)
    }
}
