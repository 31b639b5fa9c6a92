//! The participant element surface.
//!
//! [`Element`] is the closed set of elements a participant declaration may
//! contain. A markup reader that only knows generic tags can convert them
//! with [`Element::from_tag`], which applies attribute defaults and checks
//! vector lengths against the simulation dimensionality.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use tether_core::{Dimensions, Vector};

use crate::error::{ConfigError, ElementError};
use crate::server::{ServerBackend, DEFAULT_SOCKET_PORT};
use crate::watchpoint::WatchPointConfig;

/// Namespace of the server backend elements.
pub const SERVER_NAMESPACE: &str = "server";

/// A `use-mesh` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct UseMesh {
    /// Mesh name.
    pub name: String,
    /// Local offset. `None` means the zero vector.
    pub offset: Option<Vector>,
    /// Participant that creates the mesh, if it is not created locally.
    pub from: Option<String>,
    /// Whether this participant creates the mesh.
    pub provide: bool,
}

impl UseMesh {
    /// Use `name` with default attributes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offset: None,
            from: None,
            provide: false,
        }
    }
}

/// A `write-data` or `read-data` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataDecl {
    /// Data name.
    pub name: String,
    /// Mesh carrying the data.
    pub mesh: String,
}

impl DataDecl {
    /// Declare data `name` on `mesh`.
    pub fn new(name: impl Into<String>, mesh: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh: mesh.into(),
        }
    }
}

/// Elements of a participant declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// Opens a participant.
    Participant {
        /// Participant name.
        name: String,
    },
    /// Makes a mesh available to the participant.
    UseMesh(UseMesh),
    /// Data the participant writes.
    WriteData(DataDecl),
    /// Data the participant reads.
    ReadData(DataDecl),
    /// A point probe.
    WatchPoint(WatchPointConfig),
    /// Channel to a coupling server.
    Server(ServerBackend),
}

/// Element identity without payload, used for end events and errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `participant`
    Participant,
    /// `use-mesh`
    UseMesh,
    /// `write-data`
    WriteData,
    /// `read-data`
    ReadData,
    /// `watch-point`
    WatchPoint,
    /// `server:*`
    Server,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Participant => "participant",
            Self::UseMesh => "use-mesh",
            Self::WriteData => "write-data",
            Self::ReadData => "read-data",
            Self::WatchPoint => "watch-point",
            Self::Server => "server",
        };
        f.write_str(name)
    }
}

/// An event of the element stream.
#[derive(Clone, Debug, PartialEq)]
pub enum ElementEvent {
    /// An element was opened.
    Start(Element),
    /// An element was closed.
    End(ElementKind),
}

impl Element {
    /// Payload-free identity.
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Participant { .. } => ElementKind::Participant,
            Self::UseMesh(_) => ElementKind::UseMesh,
            Self::WriteData(_) => ElementKind::WriteData,
            Self::ReadData(_) => ElementKind::ReadData,
            Self::WatchPoint(_) => ElementKind::WatchPoint,
            Self::Server(_) => ElementKind::Server,
        }
    }

    /// Convert a generic tag, applying defaults:
    ///
    /// | Element | Attribute | Default |
    /// |---------|-----------|---------|
    /// | `use-mesh` | `offset` | zero vector |
    /// | `use-mesh` | `from` | locally provided |
    /// | `use-mesh` | `provide` | `false` |
    /// | `server:sockets` | `port` | 51235 |
    /// | `server:mpi` | `exchange-directory` | startup directory |
    pub fn from_tag(tag: &Tag, dimensions: Dimensions) -> Result<Self, ConfigError> {
        let element = match ElementKind::from_tag(tag)? {
            ElementKind::Participant => Self::Participant {
                name: tag.required("name")?.to_string(),
            },
            ElementKind::UseMesh => {
                let name = tag.required("name")?.to_string();
                let offset = match tag.attribute("offset") {
                    Some(raw) => {
                        let offset = tag.parse_vector("offset", raw)?;
                        dimensions.check(&offset, || format!("offset of mesh \"{name}\""))?;
                        Some(offset)
                    }
                    None => None,
                };
                let from = tag
                    .attribute("from")
                    .filter(|from| !from.is_empty())
                    .map(str::to_string);
                let provide = match tag.attribute("provide") {
                    Some(raw) => tag.parse_bool("provide", raw)?,
                    None => false,
                };
                Self::UseMesh(UseMesh {
                    name,
                    offset,
                    from,
                    provide,
                })
            }
            ElementKind::WriteData => Self::WriteData(tag.data_decl()?),
            ElementKind::ReadData => Self::ReadData(tag.data_decl()?),
            ElementKind::WatchPoint => {
                let name = tag.required("name")?.to_string();
                let mesh = tag.required("mesh")?.to_string();
                let coordinates = tag.parse_vector("coordinate", tag.required("coordinate")?)?;
                dimensions.check(&coordinates, || {
                    format!("coordinate of watch point \"{name}\"")
                })?;
                Self::WatchPoint(WatchPointConfig {
                    name,
                    mesh,
                    coordinates,
                })
            }
            ElementKind::Server => Self::Server(tag.server_backend()?),
        };
        Ok(element)
    }
}

impl ElementKind {
    /// Identify a generic tag.
    pub fn from_tag(tag: &Tag) -> Result<Self, ElementError> {
        match (tag.namespace.as_deref(), tag.name.as_str()) {
            (None, "participant") => Ok(Self::Participant),
            (None, "use-mesh") => Ok(Self::UseMesh),
            (None, "write-data") => Ok(Self::WriteData),
            (None, "read-data") => Ok(Self::ReadData),
            (None, "watch-point") => Ok(Self::WatchPoint),
            (Some(SERVER_NAMESPACE), "sockets" | "mpi" | "mpi-single") => Ok(Self::Server),
            _ => Err(ElementError::UnknownElement {
                name: tag.qualified_name(),
            }),
        }
    }
}

/// A generic markup element: optional namespace, name, and raw string
/// attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tag {
    namespace: Option<String>,
    name: String,
    attributes: IndexMap<String, String>,
}

impl Tag {
    /// A tag without namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
            attributes: IndexMap::new(),
        }
    }

    /// A namespaced tag, e.g. `server:sockets`.
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..Self::new(name)
        }
    }

    /// Set an attribute.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Raw attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// `namespace:name`, or just `name`.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}:{}", self.name),
            None => self.name.clone(),
        }
    }

    fn required(&self, attribute: &'static str) -> Result<&str, ElementError> {
        self.attribute(attribute)
            .ok_or_else(|| ElementError::MissingAttribute {
                element: self.qualified_name(),
                attribute,
            })
    }

    fn invalid(&self, attribute: &'static str, value: &str, reason: &str) -> ElementError {
        ElementError::InvalidAttribute {
            element: self.qualified_name(),
            attribute,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Vectors are written as `;`-separated components: `"0.0; 1.5; 2"`.
    fn parse_vector(&self, attribute: &'static str, raw: &str) -> Result<Vector, ElementError> {
        raw.split(';')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| self.invalid(attribute, raw, "expected ';'-separated numbers"))
            })
            .collect()
    }

    fn parse_bool(&self, attribute: &'static str, raw: &str) -> Result<bool, ElementError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(self.invalid(attribute, raw, "expected a boolean")),
        }
    }

    fn data_decl(&self) -> Result<DataDecl, ElementError> {
        Ok(DataDecl::new(self.required("name")?, self.required("mesh")?))
    }

    fn server_backend(&self) -> Result<ServerBackend, ElementError> {
        match self.name.as_str() {
            "sockets" => {
                let port = match self.attribute("port") {
                    Some(raw) => raw
                        .trim()
                        .parse::<u16>()
                        .map_err(|_| self.invalid("port", raw, "expected a port number"))?,
                    None => DEFAULT_SOCKET_PORT,
                };
                Ok(ServerBackend::Sockets { port })
            }
            "mpi" => Ok(ServerBackend::Mpi {
                exchange_directory: PathBuf::from(
                    self.attribute("exchange-directory").unwrap_or_default(),
                ),
            }),
            "mpi-single" => Ok(ServerBackend::MpiSingle),
            _ => Err(ElementError::UnknownElement {
                name: self.qualified_name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(tag: Tag) -> Result<Element, ConfigError> {
        Element::from_tag(&tag, Dimensions::THREE)
    }

    #[test]
    fn use_mesh_defaults() {
        let element = convert(Tag::new("use-mesh").with("name", "Surface")).unwrap();
        assert_eq!(element, Element::UseMesh(UseMesh::new("Surface")));
    }

    #[test]
    fn use_mesh_attributes() {
        let element = convert(
            Tag::new("use-mesh")
                .with("name", "Surface")
                .with("offset", "1.0; 0; -2.5")
                .with("from", "Solid")
                .with("provide", "on"),
        )
        .unwrap();
        let Element::UseMesh(decl) = element else {
            panic!("expected UseMesh");
        };
        assert_eq!(decl.offset.as_deref(), Some(&[1.0, 0.0, -2.5][..]));
        assert_eq!(decl.from.as_deref(), Some("Solid"));
        assert!(decl.provide);
    }

    #[test]
    fn empty_from_means_local() {
        let element = convert(Tag::new("use-mesh").with("name", "Surface").with("from", "")).unwrap();
        assert_eq!(element, Element::UseMesh(UseMesh::new("Surface")));
    }

    #[test]
    fn offset_length_checked() {
        match convert(Tag::new("use-mesh").with("name", "Surface").with("offset", "1;2")) {
            Err(ConfigError::Dimension(tether_core::DimensionError::VectorLength {
                expected: 3,
                actual: 2,
                ..
            })) => {}
            other => panic!("expected VectorLength, got {other:?}"),
        }
    }

    #[test]
    fn malformed_vector_rejected() {
        match convert(Tag::new("use-mesh").with("name", "Surface").with("offset", "1;x;2")) {
            Err(ConfigError::Element(ElementError::InvalidAttribute { attribute: "offset", .. })) => {}
            other => panic!("expected InvalidAttribute, got {other:?}"),
        }
    }

    #[test]
    fn malformed_bool_rejected() {
        match convert(Tag::new("use-mesh").with("name", "Surface").with("provide", "maybe")) {
            Err(ConfigError::Element(ElementError::InvalidAttribute { attribute: "provide", .. })) => {}
            other => panic!("expected InvalidAttribute, got {other:?}"),
        }
    }

    #[test]
    fn watch_point_requires_coordinate() {
        match convert(Tag::new("watch-point").with("name", "Tip").with("mesh", "Surface")) {
            Err(ConfigError::Element(ElementError::MissingAttribute {
                attribute: "coordinate",
                ..
            })) => {}
            other => panic!("expected MissingAttribute, got {other:?}"),
        }
    }

    #[test]
    fn watch_point_coordinate_length_checked() {
        let tag = Tag::new("watch-point")
            .with("name", "Tip")
            .with("mesh", "Surface")
            .with("coordinate", "0.0; 1.0");
        assert!(matches!(
            convert(tag.clone()),
            Err(ConfigError::Dimension(_))
        ));
        assert!(Element::from_tag(&tag, Dimensions::TWO).is_ok());
    }

    #[test]
    fn data_elements_require_mesh() {
        match convert(Tag::new("read-data").with("name", "Pressure")) {
            Err(ConfigError::Element(ElementError::MissingAttribute { attribute: "mesh", .. })) => {}
            other => panic!("expected MissingAttribute, got {other:?}"),
        }
        let element = convert(
            Tag::new("write-data")
                .with("name", "Pressure")
                .with("mesh", "Surface"),
        )
        .unwrap();
        assert_eq!(
            element,
            Element::WriteData(DataDecl::new("Pressure", "Surface"))
        );
    }

    #[test]
    fn server_backends() {
        assert_eq!(
            convert(Tag::namespaced("server", "sockets")).unwrap(),
            Element::Server(ServerBackend::Sockets { port: 51235 })
        );
        assert_eq!(
            convert(Tag::namespaced("server", "sockets").with("port", "4000")).unwrap(),
            Element::Server(ServerBackend::Sockets { port: 4000 })
        );
        assert_eq!(
            convert(Tag::namespaced("server", "mpi")).unwrap(),
            Element::Server(ServerBackend::Mpi {
                exchange_directory: PathBuf::new(),
            })
        );
        assert_eq!(
            convert(Tag::namespaced("server", "mpi-single")).unwrap(),
            Element::Server(ServerBackend::MpiSingle)
        );
        assert!(matches!(
            convert(Tag::namespaced("server", "sockets").with("port", "99999")),
            Err(ConfigError::Element(ElementError::InvalidAttribute { attribute: "port", .. }))
        ));
    }

    #[test]
    fn unknown_elements_rejected() {
        for tag in [Tag::new("mapping"), Tag::new("sockets"), Tag::namespaced("server", "pipes")] {
            let name = tag.qualified_name();
            match ElementKind::from_tag(&tag) {
                Err(ElementError::UnknownElement { name: got }) => assert_eq!(got, name),
                other => panic!("expected UnknownElement for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn kind_matches_element() {
        let element = Element::ReadData(DataDecl::new("Pressure", "Surface"));
        assert_eq!(element.kind(), ElementKind::ReadData);
        assert_eq!(ElementKind::WatchPoint.to_string(), "watch-point");
    }
}
