mod arc;
mod frame;
mod iso;
mod line;
mod segment;

pub use arc::Arc;
pub use frame::{transport_frames, Frame};
pub use iso::{IsoCurve, IsoDirection};
pub use line::Line;
pub use segment::Segment;

use crate::error::Result;
use crate::geometry::surface::even_step;
use crate::math::{Point3, Vector3};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Returns `true` when both ends are finite.
    #[must_use]
    pub fn is_bounded(&self) -> bool {
        self.t_min.is_finite() && self.t_max.is_finite()
    }

    /// The `i`-th of `n + 1` evenly spaced parameters, endpoints included.
    #[must_use]
    pub fn param_at(&self, i: usize, n: usize) -> f64 {
        even_step(self.t_min, self.t_max, i, n)
    }
}

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or evaluation fails.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the unit tangent vector at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range or the tangent is degenerate.
    fn tangent(&self, t: f64) -> Result<Vector3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Returns whether the curve is closed.
    fn is_closed(&self) -> bool;

    /// Returns whether the curve is a straight segment.
    fn is_straight(&self) -> bool {
        false
    }

    /// Evaluates an orthonormal frame at `t`, tangent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the point or tangent cannot be evaluated.
    fn frame_at(&self, t: f64) -> Result<Frame> {
        Frame::from_tangent(self.evaluate(t)?, self.tangent(t)?)
    }
}
