//! [`Participant`]: one solver's resolved configuration.

use std::sync::Arc;

use indexmap::IndexMap;
use tether_core::{Direction, MeshId};

use crate::action::Action;
use crate::context::{DataContext, MeshContext};
use crate::error::ConsistencyError;
use crate::export::ExportContext;
use crate::server::ServerChannel;
use crate::watchpoint::WatchPoint;

/// One simulation solver coupled through Tether.
///
/// Built incrementally while its declaration is open, finalized when the
/// declaration closes, and read-only afterwards.
#[derive(Debug)]
pub struct Participant {
    pub(crate) name: String,
    pub(crate) mesh_contexts: IndexMap<MeshId, MeshContext>,
    pub(crate) write_data: Vec<DataContext>,
    pub(crate) read_data: Vec<DataContext>,
    pub(crate) actions: Vec<Action>,
    pub(crate) exports: Vec<ExportContext>,
    pub(crate) watch_points: Vec<WatchPoint>,
    pub(crate) server: Option<Arc<ServerChannel>>,
}

impl Participant {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mesh_contexts: IndexMap::new(),
            write_data: Vec::new(),
            read_data: Vec::new(),
            actions: Vec::new(),
            exports: Vec::new(),
            watch_points: Vec::new(),
            server: None,
        }
    }

    /// Participant name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn use_mesh(&mut self, context: MeshContext) -> Result<(), ConsistencyError> {
        let id = context.mesh.id();
        if self.mesh_contexts.contains_key(&id) {
            return Err(ConsistencyError::DuplicateMeshUsage {
                participant: self.name.clone(),
                mesh: context.mesh.name().to_string(),
            });
        }
        self.mesh_contexts.insert(id, context);
        Ok(())
    }

    /// Whether the participant uses the mesh.
    pub fn is_mesh_used(&self, mesh: MeshId) -> bool {
        self.mesh_contexts.contains_key(&mesh)
    }

    /// Context of a used mesh.
    pub fn mesh_context(&self, mesh: MeshId) -> Option<&MeshContext> {
        self.mesh_contexts.get(&mesh)
    }

    /// Context of a used mesh, looked up by mesh name.
    pub fn mesh_context_by_name(&self, name: &str) -> Option<&MeshContext> {
        self.mesh_contexts.values().find(|c| c.mesh.name() == name)
    }

    /// Contexts of all used meshes, in `use-mesh` order.
    pub fn used_mesh_contexts(&self) -> impl Iterator<Item = &MeshContext> {
        self.mesh_contexts.values()
    }

    pub(crate) fn add_data_context(&mut self, direction: Direction, context: DataContext) {
        match direction {
            Direction::Write => self.write_data.push(context),
            Direction::Read => self.read_data.push(context),
        }
    }

    /// Data written by the participant.
    pub fn write_data_contexts(&self) -> &[DataContext] {
        &self.write_data
    }

    /// Data read by the participant.
    pub fn read_data_contexts(&self) -> &[DataContext] {
        &self.read_data
    }

    /// Data contexts for `direction`.
    pub fn data_contexts(&self, direction: Direction) -> &[DataContext] {
        match direction {
            Direction::Write => &self.write_data,
            Direction::Read => &self.read_data,
        }
    }

    /// Actions on the participant's meshes.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Export settings.
    pub fn export_contexts(&self) -> &[ExportContext] {
        &self.exports
    }

    /// Watch points.
    pub fn watch_points(&self) -> &[WatchPoint] {
        &self.watch_points
    }

    /// Channel to the coupling server, if the participant runs through one.
    pub fn server_channel(&self) -> Option<&Arc<ServerChannel>> {
        self.server.as_ref()
    }

    pub(crate) fn set_server_channel(&mut self, channel: Arc<ServerChannel>) {
        if let Some(previous) = self.server.replace(channel) {
            tracing::warn!(
                participant = %self.name,
                previous = ?previous.backend(),
                "server channel declared more than once, keeping the last one"
            );
        }
    }
}
