pub mod curve;
pub mod surface;

pub use curve::{Arc, Curve, CurveDomain, Frame, IsoCurve, IsoDirection, Line, Segment};
pub use surface::{Cylinder, Plane, Sphere, Surface, SurfaceDomain};
