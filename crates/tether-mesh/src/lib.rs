//! Mesh, data, geometry, and spacetree handles for Tether.
//!
//! Everything in this crate is shared: a [`Mesh`] declared once in the
//! configuration may be used by several participants, so registries hand
//! out `Arc` handles. Construction of the actual geometry and spatial
//! index is left to the simulation runtime; these types carry only what
//! participant configuration needs to resolve names and copy schemas.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod registry;

pub use error::MeshError;
pub use geometry::{Geometry, GeometryKind, Spacetree, SpacetreeKind};
pub use mesh::{Data, Mesh};
pub use registry::{MeshRegistry, Named, References, Registry};
