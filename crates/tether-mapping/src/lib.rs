//! Mapping trait and declarative interpolation mappings for Tether.
//!
//! A mapping transfers data between a mesh and a participant's local copy
//! of it. Participant configuration never runs the interpolation; it only
//! needs to know what each mapping demands of its meshes and to wire the
//! input and output meshes once the direction is known.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod configured;
pub mod interpolation;
pub mod mapping;

pub use configured::ConfiguredMapping;
pub use interpolation::{Constraint, InterpolationMapping, Method, RbfKernel};
pub use mapping::{Mapping, MeshPair};
