use std::f64::consts::{FRAC_PI_2, TAU};

use crate::error::{OperationError, Result};
use crate::geometry::curve::{Arc, Line};
use crate::geometry::surface::{Surface, SurfaceDomain};
use crate::math::{Point3, TOLERANCE};
use crate::topology::{
    EdgeCurve, EdgeData, FaceData, FaceSurface, OrientedEdge, ShellData, SolidId, TopologyStore,
    VertexData, VertexId, WireData,
};

use super::MakeSolid;

/// Creates a single-face sheet solid covering a rectangle of a surface's
/// parameter space.
///
/// The boundary follows the four isoparametric sides. Sides that collapse
/// to a point, such as a sphere patch reaching a pole, are omitted.
pub struct MakePatch {
    surface: FaceSurface,
    domain: SurfaceDomain,
}

/// One side of the patch boundary, before it is inserted.
struct Side {
    curve: EdgeCurve,
    t_start: f64,
    t_end: f64,
    start_corner: usize,
    end_corner: usize,
    forward: bool,
}

impl MakePatch {
    /// Creates a new `MakePatch` operation.
    #[must_use]
    pub fn new(surface: FaceSurface, domain: SurfaceDomain) -> Self {
        Self { surface, domain }
    }

    /// Executes the operation, returning an open-shell solid with one face.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] if the domain is unbounded,
    /// empty, or outside the surface's natural range.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<SolidId> {
        self.validate()?;
        let d = self.domain;

        // p00, p10, p11, p01
        let params = [
            (d.u_min, d.v_min),
            (d.u_max, d.v_min),
            (d.u_max, d.v_max),
            (d.u_min, d.v_max),
        ];
        let mut corners = [Point3::origin(); 4];
        for (corner, &(u, v)) in corners.iter_mut().zip(&params) {
            *corner = self.surface.evaluate(u, v)?;
        }

        let sides = self.sides(&corners)?;

        let mut vertex_ids: Vec<VertexId> = Vec::with_capacity(4);
        for (i, corner) in corners.iter().enumerate() {
            let shared = corners[..i]
                .iter()
                .position(|earlier| (earlier - corner).norm() < TOLERANCE);
            let id = match shared {
                Some(j) => vertex_ids[j],
                None => store.add_vertex(VertexData::new(*corner)),
            };
            vertex_ids.push(id);
        }

        let edges = sides
            .into_iter()
            .map(|side| {
                let edge = store.add_edge(EdgeData {
                    start: vertex_ids[side.start_corner],
                    end: vertex_ids[side.end_corner],
                    curve: side.curve,
                    t_start: side.t_start,
                    t_end: side.t_end,
                });
                OrientedEdge::new(edge, side.forward)
            })
            .collect();
        let wire = store.add_wire(WireData {
            edges,
            is_closed: true,
        });

        let face = store.add_face(FaceData::bounded_by(self.surface.clone(), wire).with_uv_bounds(d));
        let shell = store.add_shell(ShellData::open(vec![face]));
        MakeSolid::new(shell, vec![]).execute(store)
    }

    fn validate(&self) -> Result<()> {
        let d = &self.domain;
        let invalid = |msg: &str| -> Result<()> { Err(OperationError::InvalidInput(msg.into()).into()) };
        if !d.is_bounded() {
            return invalid("patch domain must be bounded");
        }
        if d.u_max - d.u_min < TOLERANCE || d.v_max - d.v_min < TOLERANCE {
            return invalid("patch domain must have positive extent");
        }
        if self.surface.is_u_periodic() && d.u_max - d.u_min > TAU + TOLERANCE {
            return invalid("patch wraps more than one full turn");
        }
        if let FaceSurface::Sphere(_) = self.surface {
            if d.v_min < -FRAC_PI_2 - TOLERANCE || d.v_max > FRAC_PI_2 + TOLERANCE {
                return invalid("sphere latitude must lie within [-pi/2, pi/2]");
            }
        }
        Ok(())
    }

    /// Boundary sides in traversal order: bottom, right, top, left.
    ///
    /// Bottom and right run forward; top and left are traversed reversed.
    fn sides(&self, corners: &[Point3; 4]) -> Result<Vec<Side>> {
        let d = self.domain;
        let bottom = self.along_u(d.v_min, &corners[0], &corners[1])?;
        let right = self.along_v(d.u_max, &corners[1], &corners[2])?;
        let top = self.along_u(d.v_max, &corners[3], &corners[2])?;
        let left = self.along_v(d.u_min, &corners[0], &corners[3])?;

        let layout = [
            (bottom, 0, 1, true),
            (right, 1, 2, true),
            (top, 3, 2, false),
            (left, 0, 3, false),
        ];
        Ok(layout
            .into_iter()
            .filter_map(|(side, start_corner, end_corner, forward)| {
                side.map(|(curve, t_start, t_end)| Side {
                    curve,
                    t_start,
                    t_end,
                    start_corner,
                    end_corner,
                    forward,
                })
            })
            .collect())
    }

    /// The iso-side at fixed `v`, running from `u_min` to `u_max`.
    fn along_u(&self, v: f64, a: &Point3, b: &Point3) -> Result<Option<(EdgeCurve, f64, f64)>> {
        let d = self.domain;
        match &self.surface {
            FaceSurface::Plane(_) => line_between(a, b),
            FaceSurface::Cylinder(cyl) => {
                let center = cyl.center() + cyl.axis() * v;
                let arc = Arc::new(center, cyl.radius(), *cyl.axis(), *cyl.ref_dir(), d.u_min, d.u_max)?;
                Ok(Some((EdgeCurve::Arc(arc), d.u_min, d.u_max)))
            }
            FaceSurface::Sphere(sph) => {
                let radius = sph.radius() * v.cos();
                if radius < TOLERANCE {
                    return Ok(None);
                }
                let center = sph.center() + sph.axis() * (sph.radius() * v.sin());
                let arc = Arc::new(center, radius, *sph.axis(), *sph.ref_dir(), d.u_min, d.u_max)?;
                Ok(Some((EdgeCurve::Arc(arc), d.u_min, d.u_max)))
            }
        }
    }

    /// The iso-side at fixed `u`, running from `v_min` to `v_max`.
    fn along_v(&self, u: f64, a: &Point3, b: &Point3) -> Result<Option<(EdgeCurve, f64, f64)>> {
        let d = self.domain;
        match &self.surface {
            FaceSurface::Plane(_) | FaceSurface::Cylinder(_) => line_between(a, b),
            FaceSurface::Sphere(sph) => {
                let (su, cu) = u.sin_cos();
                let binormal = sph.axis().cross(sph.ref_dir());
                let radial = sph.ref_dir() * cu + binormal * su;
                let meridian_normal = radial.cross(sph.axis());
                let arc = Arc::new(*sph.center(), sph.radius(), meridian_normal, radial, d.v_min, d.v_max)?;
                Ok(Some((EdgeCurve::Arc(arc), d.v_min, d.v_max)))
            }
        }
    }
}

fn line_between(a: &Point3, b: &Point3) -> Result<Option<(EdgeCurve, f64, f64)>> {
    let length = (b - a).norm();
    if length < TOLERANCE {
        return Ok(None);
    }
    Ok(Some((EdgeCurve::Line(Line::new(*a, b - a)?), 0.0, length)))
}
