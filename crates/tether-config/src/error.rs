//! Participant configuration errors.
//!
//! Three families cover cross-reference validity: a name that does not
//! resolve ([`ReferenceError`]), a binding to a mesh the participant never
//! declared as used ([`UsageError`]), and a configuration that contradicts
//! itself ([`ConsistencyError`]). [`ConfigError`] wraps them together with
//! dimensionality, element conversion, and builder-state failures. All of
//! them abort the configuration pass.

use std::error::Error;
use std::fmt;

use tether_core::{DimensionError, Direction};

use crate::element::ElementKind;

// ── ReferenceError ─────────────────────────────────────────────────

/// A name does not resolve in a registry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReferenceError {
    /// `use-mesh` names a mesh that is not defined.
    UndefinedMesh {
        /// Participant declaring the usage.
        participant: String,
        /// The unresolved mesh name.
        mesh: String,
    },
    /// `read-data`/`write-data` names data the mesh does not carry.
    UndefinedData {
        /// Participant declaring the data.
        participant: String,
        /// Mesh that was searched.
        mesh: String,
        /// The unresolved data name.
        data: String,
    },
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedMesh { participant, mesh } => {
                write!(
                    f,
                    "participant \"{participant}\" uses mesh \"{mesh}\" which is not defined"
                )
            }
            Self::UndefinedData {
                participant,
                mesh,
                data,
            } => {
                write!(
                    f,
                    "participant \"{participant}\" assigns data \"{data}\" to mesh \"{mesh}\", \
                     which does not carry it"
                )
            }
        }
    }
}

impl Error for ReferenceError {}

// ── UsageError ─────────────────────────────────────────────────────

/// A binding targets a mesh the participant does not use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UsageError {
    /// Data declared on a mesh without a preceding `use-mesh`.
    DataOnUnusedMesh {
        /// Participant declaring the data.
        participant: String,
        /// The unused mesh.
        mesh: String,
        /// Data name.
        data: String,
        /// Whether the data is read or written.
        direction: Direction,
    },
    /// A mapping to or from a mesh the participant does not use.
    MappingOnUnusedMesh {
        /// Participant owning the mapping.
        participant: String,
        /// The unused mesh.
        mesh: String,
        /// Mapping direction.
        direction: Direction,
    },
    /// An action operating on a mesh the participant does not use.
    ActionOnUnusedMesh {
        /// Participant owning the action.
        participant: String,
        /// The unused mesh.
        mesh: String,
    },
    /// A watch point on a mesh the participant does not use.
    WatchPointOnUnusedMesh {
        /// Participant owning the watch point.
        participant: String,
        /// Watch point name.
        watch_point: String,
        /// The unused mesh.
        mesh: String,
    },
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataOnUnusedMesh {
                participant,
                mesh,
                data,
                direction,
            } => {
                let verb = match direction {
                    Direction::Write => "write data \"",
                    Direction::Read => "read data \"",
                };
                write!(
                    f,
                    "participant \"{participant}\" has to use mesh \"{mesh}\" in order to \
                     {verb}{data}\" on it"
                )
            }
            Self::MappingOnUnusedMesh {
                participant,
                mesh,
                direction,
            } => {
                write!(
                    f,
                    "participant \"{participant}\" has a {direction} mapping on mesh \"{mesh}\" \
                     which it does not use"
                )
            }
            Self::ActionOnUnusedMesh { participant, mesh } => {
                write!(
                    f,
                    "data action of participant \"{participant}\" uses mesh \"{mesh}\" \
                     which is not used by the participant"
                )
            }
            Self::WatchPointOnUnusedMesh {
                participant,
                watch_point,
                mesh,
            } => {
                write!(
                    f,
                    "participant \"{participant}\" defines watch point \"{watch_point}\" \
                     for mesh \"{mesh}\" which it does not use"
                )
            }
        }
    }
}

impl Error for UsageError {}

// ── ConsistencyError ───────────────────────────────────────────────

/// The configuration contradicts itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConsistencyError {
    /// Two participants share a name.
    DuplicateParticipant {
        /// The contested name.
        participant: String,
    },
    /// A participant uses the same mesh twice.
    DuplicateMeshUsage {
        /// Participant.
        participant: String,
        /// Mesh used twice.
        mesh: String,
    },
    /// Two mappings in the same direction on one mesh.
    DuplicateMapping {
        /// Participant.
        participant: String,
        /// Mesh with the conflicting mappings.
        mesh: String,
        /// Direction used twice.
        direction: Direction,
    },
    /// Data could not be found on the local mesh copy. The copy mirrors
    /// the mesh schema, so this indicates an internal defect.
    LocalDataUnresolved {
        /// Participant.
        participant: String,
        /// Local mesh that was searched.
        mesh: String,
        /// Data name.
        data: String,
    },
}

impl fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateParticipant { participant } => {
                write!(f, "participant \"{participant}\" is defined more than once")
            }
            Self::DuplicateMeshUsage { participant, mesh } => {
                write!(
                    f,
                    "participant \"{participant}\" uses mesh \"{mesh}\" more than once"
                )
            }
            Self::DuplicateMapping {
                participant,
                mesh,
                direction,
            } => {
                write!(
                    f,
                    "participant \"{participant}\" defines more than one {direction} mapping \
                     on mesh \"{mesh}\""
                )
            }
            Self::LocalDataUnresolved {
                participant,
                mesh,
                data,
            } => {
                write!(
                    f,
                    "participant \"{participant}\": data \"{data}\" missing on local mesh \"{mesh}\""
                )
            }
        }
    }
}

impl Error for ConsistencyError {}

// ── ElementError ───────────────────────────────────────────────────

/// A generic markup tag could not be converted into an [`Element`](crate::Element).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ElementError {
    /// The tag is not part of the participant element surface.
    UnknownElement {
        /// Qualified tag name (`namespace:name`).
        name: String,
    },
    /// A required attribute is absent.
    MissingAttribute {
        /// Qualified tag name.
        element: String,
        /// Attribute name.
        attribute: &'static str,
    },
    /// An attribute value does not parse.
    InvalidAttribute {
        /// Qualified tag name.
        element: String,
        /// Attribute name.
        attribute: &'static str,
        /// The offending raw value.
        value: String,
        /// What was expected.
        reason: String,
    },
}

impl fmt::Display for ElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement { name } => write!(f, "unknown element <{name}>"),
            Self::MissingAttribute { element, attribute } => {
                write!(f, "<{element}> requires attribute \"{attribute}\"")
            }
            Self::InvalidAttribute {
                element,
                attribute,
                value,
                reason,
            } => {
                write!(
                    f,
                    "<{element}> attribute \"{attribute}\" has invalid value \"{value}\": {reason}"
                )
            }
        }
    }
}

impl Error for ElementError {}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors that abort a participant configuration pass.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// A name did not resolve.
    Reference(ReferenceError),
    /// A binding targets an unused mesh.
    Usage(UsageError),
    /// The configuration contradicts itself.
    Consistency(ConsistencyError),
    /// A vector does not match the simulation dimensionality.
    Dimension(DimensionError),
    /// A markup tag could not be converted.
    Element(ElementError),
    /// A nested element arrived while no participant was open.
    OutsideParticipant {
        /// The misplaced element.
        element: ElementKind,
    },
    /// A participant was opened inside another.
    NestedParticipant {
        /// The participant still open.
        open: String,
        /// The participant that was requested.
        requested: String,
    },
    /// A mapping, action, or export was declared while no participant
    /// was open.
    FragmentOutsideParticipant {
        /// What was declared.
        fragment: &'static str,
    },
    /// The pass ended with a participant still open.
    UnterminatedParticipant {
        /// The open participant.
        participant: String,
    },
    /// An earlier error already aborted this pass.
    Aborted,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference(e) => write!(f, "reference: {e}"),
            Self::Usage(e) => write!(f, "usage: {e}"),
            Self::Consistency(e) => write!(f, "consistency: {e}"),
            Self::Dimension(e) => write!(f, "dimension: {e}"),
            Self::Element(e) => write!(f, "element: {e}"),
            Self::OutsideParticipant { element } => {
                write!(f, "<{element}> must be nested directly in an open <participant>")
            }
            Self::NestedParticipant { open, requested } => {
                write!(
                    f,
                    "participant \"{requested}\" opened while participant \"{open}\" is still open"
                )
            }
            Self::FragmentOutsideParticipant { fragment } => {
                write!(f, "{fragment} declared outside of a participant")
            }
            Self::UnterminatedParticipant { participant } => {
                write!(f, "participant \"{participant}\" was never closed")
            }
            Self::Aborted => write!(f, "configuration pass already aborted"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Reference(e) => Some(e),
            Self::Usage(e) => Some(e),
            Self::Consistency(e) => Some(e),
            Self::Dimension(e) => Some(e),
            Self::Element(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReferenceError> for ConfigError {
    fn from(e: ReferenceError) -> Self {
        Self::Reference(e)
    }
}

impl From<UsageError> for ConfigError {
    fn from(e: UsageError) -> Self {
        Self::Usage(e)
    }
}

impl From<ConsistencyError> for ConfigError {
    fn from(e: ConsistencyError) -> Self {
        Self::Consistency(e)
    }
}

impl From<DimensionError> for ConfigError {
    fn from(e: DimensionError) -> Self {
        Self::Dimension(e)
    }
}

impl From<ElementError> for ConfigError {
    fn from(e: ElementError) -> Self {
        Self::Element(e)
    }
}
