//! Fabrication lattices from solids.
//!
//! A small boundary-representation kernel ([`topology`], [`geometry`],
//! [`operations`], [`tessellation`]) carries the [`lattice`] pipeline, which
//! turns each input's largest face into swept bars or planar panels.

pub mod config;
pub mod error;
pub mod geometry;
pub mod host;
pub mod lattice;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod topology;

pub use config::LatticeConfig;
pub use error::{LatticeError, Result};
pub use lattice::{LatticeOutput, LatticePipeline};
