//! Test fixtures and mock mappings for Tether development.
//!
//! Provides a [`FixedMapping`] with configurable requirements and a
//! standard set of [`References`](tether_mesh::References) to resolve
//! participant declarations against.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{configured_mapping, surface_references, FixedMapping};
