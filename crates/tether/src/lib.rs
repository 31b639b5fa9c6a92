//! Tether: participant configuration for coupled multi-physics simulations.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Tether sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use tether::prelude::*;
//!
//! let mut references = References::new();
//! let mut surface = Mesh::new("Surface", Dimensions::TWO, false);
//! surface.create_data("Forces", 2).unwrap();
//! let surface = references.meshes.add(surface).unwrap();
//!
//! let mut config = ParticipantConfiguration::new(Dimensions::TWO, &references);
//! config
//!     .apply([
//!         ElementEvent::Start(Element::Participant { name: "Solid".into() }),
//!         ElementEvent::Start(Element::UseMesh(UseMesh::new("Surface"))),
//!         ElementEvent::Start(Element::ReadData(DataDecl::new("Forces", "Surface"))),
//!     ])
//!     .unwrap();
//! config
//!     .declare_mapping(ConfiguredMapping::new(
//!         surface,
//!         Direction::Read,
//!         Timing::Initial,
//!         Box::new(InterpolationMapping::new(Method::NearestNeighbor, Constraint::Consistent)),
//!     ))
//!     .unwrap();
//! config.end(ElementKind::Participant).unwrap();
//!
//! let participants = config.finish().unwrap();
//! let forces = &participants[0].read_data_contexts()[0];
//! assert_eq!(forces.local_data().unwrap().name(), "Forces");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tether-core` | IDs, dimensions, requirements, fragment buffers |
//! | [`mesh`] | `tether-mesh` | Meshes, data, geometries, spacetrees, registries |
//! | [`mapping`] | `tether-mapping` | Mapping trait and interpolation mappings |
//! | [`config`] | `tether-config` | Elements, contexts, participants, finalization |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`tether-core`).
pub use tether_core as types;

/// Meshes and the registries participants resolve against (`tether-mesh`).
pub use tether_mesh as mesh;

/// The [`mapping::Mapping`] trait and built-in interpolations
/// (`tether-mapping`).
pub use tether_mapping as mapping;

/// Participant configuration (`tether-config`).
///
/// [`config::ParticipantConfiguration`] drives a pass;
/// [`config::Participant`] is what it produces.
pub use tether_config as config;

/// Common imports for typical Tether usage.
pub mod prelude {
    // Core types
    pub use tether_core::{Dimensions, Direction, MeshId, MeshRequirement, Timing, Vector};

    // Meshes and registries
    pub use tether_mesh::{Data, Mesh, References};

    // Mappings
    pub use tether_mapping::{ConfiguredMapping, Constraint, InterpolationMapping, Mapping, Method};

    // Configuration
    pub use tether_config::{
        ConfigError, DataContext, DataDecl, Element, ElementEvent, ElementKind, MeshContext,
        Participant, ParticipantConfiguration, Tag, UseMesh,
    };
}
