//! Tree-shaped structures stamped into a voxel grid.
//!
//! Placement is a two-phase protocol: a read-only feasibility scan over
//! the full footprint, then trunk and canopy writes buffered into a
//! `WriteBatch` and flushed in one pass. All randomness flows through a
//! caller-supplied `WorldRng` in a fixed draw order (species selector,
//! then trunk, then canopy row-major), so a seed reproduces a structure
//! exactly.
#![forbid(unsafe_code)]

mod shape;
mod species;

pub use shape::{Tree, TreeError};
pub use species::{TreeSpecies, grow_tree};
