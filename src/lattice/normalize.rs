use crate::host::GeometryResolver;
use crate::topology::{FaceId, Geometry, SolidId, WireId};

/// How many wrapper or reference layers are followed before giving up.
pub const MAX_UNWRAP_DEPTH: usize = 8;

/// A value as handed over by the host, before it is known to be geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostGeometry {
    /// A solid already in the store.
    Solid(SolidId),
    /// A face already in the store.
    Surface(FaceId),
    /// A wire already in the store.
    Curve(WireId),
    /// A host object exposing the geometry it carries.
    Wrapped(Box<HostGeometry>),
    /// An opaque document reference that needs a resolver.
    Reference(String),
}

impl From<Geometry> for HostGeometry {
    fn from(geometry: Geometry) -> Self {
        match geometry {
            Geometry::Solid(id) => Self::Solid(id),
            Geometry::Surface(id) => Self::Surface(id),
            Geometry::Curve(id) => Self::Curve(id),
        }
    }
}

/// Result of [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The value resolved to geometry.
    Geometry(Geometry),
    /// Nothing usable was found; carries the original value.
    Unrecognized(HostGeometry),
}

/// Converts a host value into geometry without failing.
///
/// Wrappers are peeled recursively and references go through `resolver`,
/// whose answer is normalized again, at most [`MAX_UNWRAP_DEPTH`] levels deep.
#[must_use]
pub fn normalize(value: &HostGeometry, resolver: &dyn GeometryResolver) -> Normalized {
    match resolve(value, resolver, 0) {
        Some(geometry) => Normalized::Geometry(geometry),
        None => Normalized::Unrecognized(value.clone()),
    }
}

fn resolve(value: &HostGeometry, resolver: &dyn GeometryResolver, depth: usize) -> Option<Geometry> {
    match value {
        HostGeometry::Solid(id) => Some(Geometry::Solid(*id)),
        HostGeometry::Surface(id) => Some(Geometry::Surface(*id)),
        HostGeometry::Curve(id) => Some(Geometry::Curve(*id)),
        _ if depth >= MAX_UNWRAP_DEPTH => None,
        HostGeometry::Wrapped(inner) => resolve(inner, resolver, depth + 1),
        HostGeometry::Reference(name) => {
            let resolved = resolver.resolve(name)?;
            resolve(&resolved, resolver, depth + 1)
        }
    }
}
