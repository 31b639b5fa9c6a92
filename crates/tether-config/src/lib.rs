//! Participant configuration resolution for Tether.
//!
//! A coupling configuration declares its participants as a stream of
//! elements: `participant`, then nested `use-mesh`, `write-data`,
//! `read-data`, `watch-point`, and server elements, interleaved with
//! mapping, action, and export declarations produced by their own
//! sub-configurations. [`ParticipantConfiguration`] consumes that stream
//! and produces one fully resolved [`Participant`] per declaration.
//!
//! # Pipeline
//!
//! ```text
//! ElementEvent::Start ─┬─ Participant ─► BuilderContext::begin_participant
//!                      ├─ UseMesh ─────► bind_mesh
//!                      ├─ Write/ReadData ► bind_data
//!                      ├─ WatchPoint ──► watch point buffer
//!                      └─ Server ──────► server channel
//! declare_mapping / declare_action / declare_export ─► fragment buffers
//! ElementEvent::End(Participant) ─► finalize_participant
//!     A. merge mappings  B. resolve local data  C. actions
//!     D. exports         E. watch points        (buffers drained)
//! ```
//!
//! Any error poisons the pass: later calls return
//! [`ConfigError::Aborted`] and no participant is ever handed out.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod binding;
pub mod builder;
pub mod context;
pub mod element;
pub mod error;
pub mod export;
pub mod finalize;
pub mod participant;
pub mod server;
pub mod watchpoint;

pub use action::{Action, ActionKind, ActionTiming};
pub use builder::{BuilderContext, ParticipantConfiguration};
pub use context::{DataContext, LocalBinding, MappingContext, MeshContext};
pub use element::{DataDecl, Element, ElementEvent, ElementKind, Tag, UseMesh};
pub use error::{ConfigError, ConsistencyError, ElementError, ReferenceError, UsageError};
pub use export::{ExportContext, ExportFormat, ExportInterval};
pub use binding::{bind_data, bind_mesh};
pub use finalize::{finalize_participant, fold_requirements, Fragments};
pub use participant::Participant;
pub use server::{ServerBackend, ServerChannel};
pub use watchpoint::{WatchPoint, WatchPointConfig};
