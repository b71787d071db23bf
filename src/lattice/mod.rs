//! The lattice generation pipeline.
//!
//! Stages run strictly forward: [`normalize`] host values, scale the batch
//! with [`scale_about_centroid`], pick a face with [`largest_face`], sample it
//! into a [`SurfaceGrid`], build bars ([`BarBuilder`]) or panels
//! ([`PanelBuilder`]), and collect a [`LatticeOutput`]. [`LatticePipeline`]
//! wires them together.

mod assemble;
mod bars;
mod face_select;
mod grid;
mod normalize;
mod panels;
mod pipeline;
mod scale;

pub use assemble::{LatticeOutput, OutputAssembler};
pub use bars::{BarBuilder, BarProfile, MemberCurve};
pub use face_select::largest_face;
pub use grid::{Lattice, SurfaceGrid};
pub use normalize::{normalize, HostGeometry, Normalized, MAX_UNWRAP_DEPTH};
pub use panels::{PanelBuilder, SplitDiagonal};
pub use pipeline::LatticePipeline;
pub use scale::scale_about_centroid;

pub use crate::topology::Geometry;
