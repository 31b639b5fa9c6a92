//! Participant finalization.
//!
//! Runs once, when a participant declaration closes. The fragments
//! buffered while it was open are merged into the participant in five
//! steps:
//!
//! | Step | Input | Effect |
//! |------|-------|--------|
//! | A | mappings | local mesh copies, mapping slots, mesh requirements |
//! | B | data contexts | local data bound through the merged mappings |
//! | C | actions | appended, mesh must be used |
//! | D | exports | appended |
//! | E | watch points | mesh resolved, output file derived |
//!
//! B reads what A wrote. C to E only need mesh usage to be complete, which
//! element order guarantees: mesh usage is declared inside the participant,
//! fragments are only merged once it closes.

use std::sync::Arc;

use tether_core::{Direction, MeshRequirement, Timing};
use tether_mapping::{ConfiguredMapping, Mapping};

use crate::action::Action;
use crate::context::{DataContext, LocalBinding, MappingContext, MeshContext};
use crate::error::{ConfigError, ConsistencyError, UsageError};
use crate::export::ExportContext;
use crate::participant::Participant;
use crate::watchpoint::{WatchPoint, WatchPointConfig};

/// Everything drained from the fragment buffers for one participant.
#[derive(Debug, Default)]
pub struct Fragments {
    /// Mapping declarations.
    pub mappings: Vec<ConfiguredMapping>,
    /// Action declarations.
    pub actions: Vec<Action>,
    /// Export declarations.
    pub exports: Vec<ExportContext>,
    /// Watch point declarations.
    pub watch_points: Vec<WatchPointConfig>,
}

impl Fragments {
    /// Whether no fragment was declared at all.
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
            && self.actions.is_empty()
            && self.exports.is_empty()
            && self.watch_points.is_empty()
    }
}

/// Merge drained fragments into `participant`.
///
/// Stops at the first error. The participant is then in a partially
/// merged state and must be discarded.
pub fn finalize_participant(
    participant: &mut Participant,
    fragments: Fragments,
) -> Result<(), ConfigError> {
    let Fragments {
        mappings,
        actions,
        exports,
        watch_points,
    } = fragments;
    tracing::trace!(
        participant = %participant.name,
        mappings = mappings.len(),
        actions = actions.len(),
        exports = exports.len(),
        watch_points = watch_points.len(),
        "finalize_participant"
    );

    for configured in mappings {
        merge_mapping(participant, configured)?;
    }
    resolve_local_data(participant)?;

    for action in actions {
        merge_action(participant, action)?;
    }

    if !exports.is_empty() {
        tracing::debug!(participant = %participant.name, count = exports.len(), "exports merged");
    }
    participant.exports.extend(exports);

    for config in watch_points {
        merge_watch_point(participant, config)?;
    }
    Ok(())
}

// ── Step A: mappings ───────────────────────────────────────────────

fn merge_mapping(
    participant: &mut Participant,
    configured: ConfiguredMapping,
) -> Result<(), ConfigError> {
    let ConfiguredMapping {
        mesh,
        direction,
        timing,
        mut mapping,
    } = configured;

    let Some(context) = participant.mesh_contexts.get_mut(&mesh.id()) else {
        return Err(UsageError::MappingOnUnusedMesh {
            participant: participant.name.clone(),
            mesh: mesh.name().to_string(),
            direction,
        }
        .into());
    };
    if context.mapping(direction).is_some() {
        return Err(ConsistencyError::DuplicateMapping {
            participant: participant.name.clone(),
            mesh: mesh.name().to_string(),
            direction,
        }
        .into());
    }

    let before = context.mesh_requirement;
    context.mesh_requirement.raise(mapping.requirement_for(direction));

    let local_mesh = Arc::new(context.mesh.structural_copy());
    let (input, output) = match direction {
        Direction::Write => (Arc::clone(&local_mesh), Arc::clone(&context.mesh)),
        Direction::Read => (Arc::clone(&context.mesh), Arc::clone(&local_mesh)),
    };
    tracing::debug!(
        participant = %participant.name,
        mapping = mapping.name(),
        %direction,
        %timing,
        input = input.name(),
        output = output.name(),
        "mapping meshes bound"
    );
    mapping.set_meshes(input, output);

    *context.mapping_slot_mut(direction) = Some(MappingContext {
        mapping: Arc::from(mapping),
        local_mesh,
        timing,
    });

    context.mesh_requirement.apply_timing_floor(timing);
    debug_assert!(context.mesh_requirement >= before);
    tracing::trace!(
        mesh = %context.mesh.name(),
        requirement = %context.mesh_requirement,
        "mesh requirement updated"
    );
    Ok(())
}

// ── Step B: local data ─────────────────────────────────────────────

fn resolve_local_data(participant: &mut Participant) -> Result<(), ConfigError> {
    let Participant {
        name,
        mesh_contexts,
        write_data,
        read_data,
        ..
    } = participant;

    let directions = [(Direction::Write, write_data), (Direction::Read, read_data)];
    for (direction, contexts) in directions {
        for data_context in contexts.iter_mut() {
            let Some(mesh_context) = mesh_contexts.get(&data_context.mesh.id()) else {
                return Err(UsageError::DataOnUnusedMesh {
                    participant: name.clone(),
                    mesh: data_context.mesh.name().to_string(),
                    data: data_context.data.name().to_string(),
                    direction,
                }
                .into());
            };
            bind_local(name, mesh_context, direction, data_context)?;
        }
    }
    Ok(())
}

fn bind_local(
    participant: &str,
    mesh_context: &MeshContext,
    direction: Direction,
    data_context: &mut DataContext,
) -> Result<(), ConsistencyError> {
    let Some(mapping) = mesh_context.mapping(direction) else {
        return Ok(());
    };
    let local_data = mapping
        .local_mesh
        .data_by_name(data_context.data.name())
        .cloned()
        .ok_or_else(|| ConsistencyError::LocalDataUnresolved {
            participant: participant.to_string(),
            mesh: mapping.local_mesh.name().to_string(),
            data: data_context.data.name().to_string(),
        })?;
    data_context.binding = LocalBinding::Mapped {
        mapping: mapping.clone(),
        local_data,
    };
    Ok(())
}

// ── Steps C and E: actions and watch points ────────────────────────

fn merge_action(participant: &mut Participant, action: Action) -> Result<(), ConfigError> {
    if !participant.is_mesh_used(action.mesh().id()) {
        return Err(UsageError::ActionOnUnusedMesh {
            participant: participant.name.clone(),
            mesh: action.mesh().name().to_string(),
        }
        .into());
    }
    tracing::debug!(
        participant = %participant.name,
        kind = ?action.kind(),
        mesh = action.mesh().name(),
        "action merged"
    );
    participant.actions.push(action);
    Ok(())
}

fn merge_watch_point(
    participant: &mut Participant,
    config: WatchPointConfig,
) -> Result<(), ConfigError> {
    let Some(mesh) = participant
        .mesh_context_by_name(&config.mesh)
        .map(|context| Arc::clone(&context.mesh))
    else {
        return Err(UsageError::WatchPointOnUnusedMesh {
            participant: participant.name.clone(),
            watch_point: config.name,
            mesh: config.mesh,
        }
        .into());
    };
    let watch_point = WatchPoint::new(config, mesh);
    tracing::debug!(
        participant = %participant.name,
        watch_point = watch_point.name(),
        file = watch_point.output_file(),
        "watch point resolved"
    );
    participant.watch_points.push(watch_point);
    Ok(())
}

/// Fold of mapping requirements as finalization applies them to one mesh.
///
/// Each `(requirement, timing)` pair raises the level, then the timing
/// floor is applied with that mapping's timing.
pub fn fold_requirements(
    merges: impl IntoIterator<Item = (MeshRequirement, Timing)>,
) -> MeshRequirement {
    merges
        .into_iter()
        .fold(MeshRequirement::Undefined, |mut level, (requirement, timing)| {
            level.raise(requirement);
            level.apply_timing_floor(timing);
            level
        })
}
