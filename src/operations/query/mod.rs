mod bounding_box;
mod face_area;
mod face_domain;
mod point_on_surface;

pub use bounding_box::{Aabb, BoundingBox};
pub use face_area::FaceArea;
pub use face_domain::FaceDomain;
pub use point_on_surface::PointOnSurface;
