use std::ops::Index;

use crate::config::{MAX_DIVISIONS, MIN_DIVISIONS};
use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::curve::{CurveDomain, IsoCurve, IsoDirection};
use crate::geometry::surface::Surface;
use crate::math::Point3;
use crate::operations::query::FaceDomain;
use crate::topology::{FaceId, FaceSurface, TopologyStore};

/// A rectangular array of surface points, indexed `[i][j]` with `i` along u.
#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    u_count: usize,
    v_count: usize,
    points: Vec<Point3>,
}

impl Lattice {
    /// Builds a lattice from columns of equal length, one column per `u`.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] for empty or ragged columns.
    pub fn from_columns(columns: Vec<Vec<Point3>>) -> Result<Self> {
        let u_count = columns.len();
        let v_count = columns.first().map_or(0, Vec::len);
        if u_count == 0 || v_count == 0 {
            return Err(OperationError::InvalidInput("lattice needs at least one point".into()).into());
        }
        if let Some(i) = columns.iter().position(|c| c.len() != v_count) {
            return Err(OperationError::InvalidInput(format!(
                "lattice column {i} has {} points, expected {v_count}",
                columns[i].len()
            ))
            .into());
        }
        Ok(Self {
            u_count,
            v_count,
            points: columns.into_iter().flatten().collect(),
        })
    }

    /// Number of points along u (divisions + 1).
    #[must_use]
    pub fn u_count(&self) -> usize {
        self.u_count
    }

    /// Number of points along v (divisions + 1).
    #[must_use]
    pub fn v_count(&self) -> usize {
        self.v_count
    }

    /// The point at `[i][j]`, if in range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<&Point3> {
        if i < self.u_count && j < self.v_count {
            self.points.get(i * self.v_count + j)
        } else {
            None
        }
    }

    /// The four corners of cell `(i, j)`: `p00, p10, p11, p01`.
    ///
    /// Returns `None` if the cell is outside the lattice.
    #[must_use]
    pub fn cell(&self, i: usize, j: usize) -> Option<[Point3; 4]> {
        Some([
            *self.get(i, j)?,
            *self.get(i + 1, j)?,
            *self.get(i + 1, j + 1)?,
            *self.get(i, j + 1)?,
        ])
    }
}

impl Index<(usize, usize)> for Lattice {
    type Output = Point3;

    fn index(&self, (i, j): (usize, usize)) -> &Point3 {
        assert!(j < self.v_count, "lattice index ({i}, {j}) out of range");
        &self.points[i * self.v_count + j]
    }
}

/// A face sampled on an even parameter grid.
#[derive(Debug, Clone)]
pub struct SurfaceGrid {
    /// Surface points at every grid parameter pair.
    pub lattice: Lattice,
    /// One curve per `v_j`, spanning the whole u range.
    pub rows: Vec<IsoCurve<FaceSurface>>,
    /// One curve per `u_i`, spanning the whole v range.
    pub columns: Vec<IsoCurve<FaceSurface>>,
}

impl SurfaceGrid {
    /// Samples `face` with `u_divisions` by `v_divisions` cells.
    ///
    /// # Errors
    ///
    /// Returns [`OperationError::InvalidInput`] unless both division counts
    /// lie in `MIN_DIVISIONS..=MAX_DIVISIONS`, and propagates domain or
    /// evaluation failures.
    pub fn sample(store: &TopologyStore, face: FaceId, u_divisions: usize, v_divisions: usize) -> Result<Self> {
        let allowed = MIN_DIVISIONS..=MAX_DIVISIONS;
        if !allowed.contains(&u_divisions) || !allowed.contains(&v_divisions) {
            return Err(OperationError::InvalidInput(format!(
                "grid divisions must be {MIN_DIVISIONS}..={MAX_DIVISIONS} each way, got {u_divisions} x {v_divisions}"
            ))
            .into());
        }
        let domain = FaceDomain::new(face).execute(store)?;
        if !domain.is_bounded() {
            return Err(GeometryError::UnboundedDomain.into());
        }
        let surface = &store.face(face)?.surface;

        let mut columns = Vec::with_capacity(u_divisions + 1);
        for i in 0..=u_divisions {
            let u = domain.u_at(i, u_divisions);
            let column = (0..=v_divisions)
                .map(|j| surface.evaluate(u, domain.v_at(j, v_divisions)))
                .collect::<Result<Vec<_>>>()?;
            columns.push(column);
        }

        let rows = (0..=v_divisions)
            .map(|j| {
                IsoCurve::new(
                    surface.clone(),
                    IsoDirection::AlongU,
                    domain.v_at(j, v_divisions),
                    CurveDomain::new(domain.u_min, domain.u_max),
                )
            })
            .collect();
        let iso_columns = (0..=u_divisions)
            .map(|i| {
                IsoCurve::new(
                    surface.clone(),
                    IsoDirection::AlongV,
                    domain.u_at(i, u_divisions),
                    CurveDomain::new(domain.v_min, domain.v_max),
                )
            })
            .collect();

        Ok(Self {
            lattice: Lattice::from_columns(columns)?,
            rows,
            columns: iso_columns,
        })
    }

    /// Number of cells along u.
    #[must_use]
    pub fn u_divisions(&self) -> usize {
        self.lattice.u_count() - 1
    }

    /// Number of cells along v.
    #[must_use]
    pub fn v_divisions(&self) -> usize {
        self.lattice.v_count() - 1
    }
}
