//! Benchmark profiles for Tether participant configuration.
//!
//! - [`wide_references`]: many meshes, several data fields each.
//! - [`participant_events`]: one participant using every mesh and reading
//!   or writing every field.
//! - [`participant_mappings`]: one read and one write mapping per mesh.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use tether_config::{DataDecl, Element, ElementEvent, ElementKind, UseMesh};
use tether_core::{Dimensions, Direction, Timing};
use tether_mapping::{ConfiguredMapping, Constraint, InterpolationMapping, Method, RbfKernel};
use tether_mesh::{Mesh, References};

/// Name of the `index`-th mesh of a profile.
pub fn mesh_name(index: usize) -> String {
    format!("Mesh{index}")
}

/// Name of the `index`-th data field on every mesh of a profile.
pub fn data_name(index: usize) -> String {
    format!("Data{index}")
}

/// Register `meshes` 3D meshes with `fields` scalar data each.
pub fn wide_references(meshes: usize, fields: usize) -> References {
    let mut references = References::new();
    for m in 0..meshes {
        let mut mesh = Mesh::new(mesh_name(m), Dimensions::THREE, false);
        for d in 0..fields {
            mesh.create_data(data_name(d), 1)
                .expect("profile data names are unique");
        }
        references
            .meshes
            .add(mesh)
            .expect("profile mesh names are unique");
    }
    references
}

/// Element stream of one participant using every mesh of `references`.
///
/// Even data fields are written, odd ones read.
pub fn participant_events(references: &References, fields: usize) -> Vec<ElementEvent> {
    let mut events = vec![ElementEvent::Start(Element::Participant {
        name: "Bench".to_string(),
    })];
    for mesh in references.meshes.iter() {
        events.push(ElementEvent::Start(Element::UseMesh(UseMesh::new(mesh.name()))));
    }
    for mesh in references.meshes.iter() {
        for d in 0..fields {
            let decl = DataDecl::new(data_name(d), mesh.name());
            let element = if d % 2 == 0 {
                Element::WriteData(decl)
            } else {
                Element::ReadData(decl)
            };
            events.push(ElementEvent::Start(element));
        }
    }
    events
}

/// A write and a read mapping for every mesh of `references`.
pub fn participant_mappings(references: &References) -> Vec<ConfiguredMapping> {
    let mut mappings = Vec::with_capacity(references.meshes.len() * 2);
    for mesh in references.meshes.iter() {
        mappings.push(ConfiguredMapping::new(
            Arc::clone(mesh),
            Direction::Write,
            Timing::Initial,
            Box::new(InterpolationMapping::new(
                Method::NearestProjection,
                Constraint::Conservative,
            )),
        ));
        mappings.push(ConfiguredMapping::new(
            Arc::clone(mesh),
            Direction::Read,
            Timing::OnAdvance,
            Box::new(InterpolationMapping::new(
                Method::RadialBasis(RbfKernel::ThinPlateSplines),
                Constraint::Consistent,
            )),
        ));
    }
    mappings
}

/// Closing event of the participant opened by [`participant_events`].
pub fn end_participant() -> ElementEvent {
    ElementEvent::End(ElementKind::Participant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_config::ParticipantConfiguration;

    #[test]
    fn mapped_profile_resolves_every_field() {
        let references = wide_references(3, 4);
        let mut config = ParticipantConfiguration::new(Dimensions::THREE, &references);
        config
            .apply(participant_events(&references, 4))
            .unwrap();
        for mapping in participant_mappings(&references) {
            config.declare_mapping(mapping).unwrap();
        }
        config.handle(end_participant()).unwrap();
        let participants = config.finish().unwrap();
        let bench = &participants[0];
        assert_eq!(bench.write_data_contexts().len(), 6);
        assert_eq!(bench.read_data_contexts().len(), 6);
        assert!(bench
            .write_data_contexts()
            .iter()
            .chain(bench.read_data_contexts())
            .all(|d| d.local_data().is_some()));
    }
}
