use tracing::{debug, info};

use crate::config::{BarProfileKind, LatticeConfig, MIN_RECT_STATIONS};
use crate::error::Result;
use crate::geometry::curve::{Curve, IsoCurve, Segment};
use crate::math::TOLERANCE;
use crate::operations::shaping::{Sweep, SweepProfile};
use crate::topology::{FaceSurface, Geometry, TopologyStore};

use super::grid::SurfaceGrid;

/// Cross-section of a bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarProfile {
    /// Circular tube.
    Round { diameter: f64 },
    /// Rectangle centered on the member, width along the frame normal.
    Rect { width: f64, height: f64 },
}

/// The centerline of one bar.
#[derive(Debug, Clone)]
pub enum MemberCurve {
    /// A grid row or column on the face.
    Iso(IsoCurve<FaceSurface>),
    /// A straight cell diagonal.
    Diagonal(Segment),
}

impl MemberCurve {
    /// The member as a curve.
    #[must_use]
    pub fn as_curve(&self) -> &dyn Curve {
        match self {
            Self::Iso(iso) => iso,
            Self::Diagonal(segment) => segment,
        }
    }

    /// Whether the member has no curvature, probed at interior samples.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        let curve = self.as_curve();
        if curve.is_straight() {
            return true;
        }
        let domain = curve.domain();
        let (Ok(a), Ok(b)) = (curve.evaluate(domain.t_min), curve.evaluate(domain.t_max)) else {
            return false;
        };
        let chord = b - a;
        let length = chord.norm();
        if length < TOLERANCE {
            return false;
        }
        let axis = chord / length;
        [1, 2, 3].iter().all(|&k| {
            curve.evaluate(domain.param_at(k, 4)).is_ok_and(|p| {
                let offset = p - a;
                (offset - axis * offset.dot(&axis)).norm() < TOLERANCE * length.max(1.0)
            })
        })
    }
}

/// Sweeps bars along the curves of a sampled grid.
#[derive(Debug, Clone)]
pub struct BarBuilder {
    diagonal: bool,
    profile: BarProfile,
    round_stations: usize,
    rect_stations: usize,
    radial_segments: usize,
}

impl BarBuilder {
    /// Default sweep stations along a curved round member.
    pub const DEFAULT_ROUND_STATIONS: usize = 16;
    /// Default polygon sides of a round profile.
    pub const DEFAULT_RADIAL_SEGMENTS: usize = 12;

    /// Creates a builder for the given profile.
    #[must_use]
    pub fn new(profile: BarProfile, diagonal: bool) -> Self {
        Self {
            diagonal,
            profile,
            round_stations: Self::DEFAULT_ROUND_STATIONS,
            rect_stations: MIN_RECT_STATIONS,
            radial_segments: Self::DEFAULT_RADIAL_SEGMENTS,
        }
    }

    /// Creates a builder from the run configuration.
    #[must_use]
    pub fn from_config(config: &LatticeConfig) -> Self {
        let profile = match config.bar_profile {
            BarProfileKind::Round => BarProfile::Round {
                diameter: config.thickness,
            },
            BarProfileKind::Rect => BarProfile::Rect {
                width: config.bar_width,
                height: config.bar_height,
            },
        };
        Self::new(profile, config.diagonal)
            .with_stations(config.round_stations, config.rect_stations)
            .with_radial_segments(config.radial_segments)
    }

    /// Sets the sweep stations for curved round members and rect members.
    ///
    /// Rect members always use at least twelve.
    #[must_use]
    pub fn with_stations(mut self, round: usize, rect: usize) -> Self {
        self.round_stations = round;
        self.rect_stations = rect.max(MIN_RECT_STATIONS);
        self
    }

    /// Sets the number of polygon sides approximating a round profile.
    #[must_use]
    pub fn with_radial_segments(mut self, segments: usize) -> Self {
        self.radial_segments = segments;
        self
    }

    /// The member curves in output order.
    ///
    /// Without diagonals: every row, then every column. With diagonals: per
    /// cell in row-major order, `(i, j) -> (i+1, j+1)` then `(i+1, j) -> (i, j+1)`.
    #[must_use]
    pub fn members(&self, grid: &SurfaceGrid) -> Vec<MemberCurve> {
        if !self.diagonal {
            return grid
                .rows
                .iter()
                .chain(&grid.columns)
                .cloned()
                .map(MemberCurve::Iso)
                .collect();
        }
        let lattice = &grid.lattice;
        let mut members = Vec::with_capacity(2 * grid.u_divisions() * grid.v_divisions());
        for i in 0..grid.u_divisions() {
            for j in 0..grid.v_divisions() {
                if let Some([p00, p10, p11, p01]) = lattice.cell(i, j) {
                    members.push(MemberCurve::Diagonal(Segment::new(p00, p11)));
                    members.push(MemberCurve::Diagonal(Segment::new(p10, p01)));
                }
            }
        }
        members
    }

    /// Sweeps every member, skipping those that fail.
    pub fn build(&self, store: &mut TopologyStore, grid: &SurfaceGrid) -> Vec<Geometry> {
        let members = self.members(grid);
        let mut bars = Vec::with_capacity(members.len());
        for (index, member) in members.iter().enumerate() {
            match self.sweep(store, member) {
                Ok(bar) => bars.push(bar),
                Err(err) => debug!(index, %err, "bar member skipped"),
            }
        }
        info!(
            built = bars.len(),
            skipped = members.len() - bars.len(),
            "bars swept"
        );
        bars
    }

    fn sweep(&self, store: &mut TopologyStore, member: &MemberCurve) -> Result<Geometry> {
        let (profile, stations) = match self.profile {
            BarProfile::Round { diameter } => {
                let stations = if member.is_straight() { 2 } else { self.round_stations };
                let circle = SweepProfile::Circle {
                    radius: diameter * 0.5,
                    segments: self.radial_segments,
                };
                (circle, stations)
            }
            BarProfile::Rect { width, height } => {
                (SweepProfile::Rectangle { width, height }, self.rect_stations)
            }
        };
        let solid = Sweep::new(member.as_curve(), profile)
            .with_stations(stations)
            .execute(store)?;
        Ok(Geometry::Solid(solid))
    }
}
