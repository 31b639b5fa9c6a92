//! Core types for Tether participant configuration.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: identifiers,
//! coordinate vectors, dimensionality, mapping direction and timing,
//! mesh requirement levels, and the drainable fragment buffers that
//! collect declarations between participant finalizations.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod dimensions;
pub mod error;
pub mod id;
pub mod requirement;

pub use buffer::{FragmentBuffer, FragmentSource};
pub use dimensions::Dimensions;
pub use error::DimensionError;
pub use id::{DataId, MeshId, Vector};
pub use requirement::{Direction, MeshRequirement, Timing};
