//! Configuration pass driver.
//!
//! [`BuilderContext`] holds the state of one pass: finalized participants,
//! the participant currently open, and the fragment buffers that
//! sub-configurations fill while it is open. [`ParticipantConfiguration`]
//! owns a context and dispatches element events into it.

use std::sync::Arc;

use tether_core::{Dimensions, Direction, FragmentBuffer, FragmentSource};
use tether_mapping::ConfiguredMapping;
use tether_mesh::References;

use crate::action::Action;
use crate::binding::{bind_data, bind_mesh};
use crate::element::{Element, ElementEvent, ElementKind, Tag};
use crate::error::{ConfigError, ConsistencyError};
use crate::export::ExportContext;
use crate::finalize::{finalize_participant, Fragments};
use crate::participant::Participant;
use crate::server::ServerChannel;
use crate::watchpoint::WatchPointConfig;

// ── BuilderContext ─────────────────────────────────────────────────

/// Mutable state of one configuration pass.
///
/// Binders receive the context explicitly; there is no ambient "current
/// participant".
#[derive(Debug, Default)]
pub struct BuilderContext {
    participants: Vec<Participant>,
    open: Option<Participant>,
    mappings: FragmentBuffer<ConfiguredMapping>,
    actions: FragmentBuffer<Action>,
    exports: FragmentBuffer<ExportContext>,
    watch_points: FragmentBuffer<WatchPointConfig>,
}

impl BuilderContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a participant.
    ///
    /// Fails if a participant is already open or the name is taken.
    pub fn begin_participant(&mut self, name: impl Into<String>) -> Result<(), ConfigError> {
        let name = name.into();
        if let Some(open) = &self.open {
            return Err(ConfigError::NestedParticipant {
                open: open.name().to_string(),
                requested: name,
            });
        }
        if self.participants.iter().any(|p| p.name() == name) {
            return Err(ConsistencyError::DuplicateParticipant { participant: name }.into());
        }
        tracing::trace!(participant = %name, "begin_participant");
        self.open = Some(Participant::new(name));
        Ok(())
    }

    /// The open participant, if any.
    pub fn current(&self) -> Option<&Participant> {
        self.open.as_ref()
    }

    /// The open participant, for an element of `kind` that needs one.
    pub fn current_mut(&mut self, kind: ElementKind) -> Result<&mut Participant, ConfigError> {
        self.open
            .as_mut()
            .ok_or(ConfigError::OutsideParticipant { element: kind })
    }

    /// Participants finalized so far, in declaration order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Buffered mapping declarations.
    pub fn mappings(&self) -> &FragmentBuffer<ConfiguredMapping> {
        &self.mappings
    }

    /// Buffered action declarations.
    pub fn actions(&self) -> &FragmentBuffer<Action> {
        &self.actions
    }

    /// Buffered export declarations.
    pub fn exports(&self) -> &FragmentBuffer<ExportContext> {
        &self.exports
    }

    /// Buffered watch point declarations.
    pub fn watch_points(&self) -> &FragmentBuffer<WatchPointConfig> {
        &self.watch_points
    }

    fn require_open(&self, fragment: &'static str) -> Result<(), ConfigError> {
        if self.open.is_none() {
            return Err(ConfigError::FragmentOutsideParticipant { fragment });
        }
        Ok(())
    }

    /// Buffer a mapping for the open participant.
    pub fn push_mapping(&mut self, mapping: ConfiguredMapping) -> Result<(), ConfigError> {
        self.require_open("mapping")?;
        self.mappings.push(mapping);
        Ok(())
    }

    /// Buffer an action for the open participant.
    pub fn push_action(&mut self, action: Action) -> Result<(), ConfigError> {
        self.require_open("action")?;
        self.actions.push(action);
        Ok(())
    }

    /// Buffer an export for the open participant.
    pub fn push_export(&mut self, export: ExportContext) -> Result<(), ConfigError> {
        self.require_open("export")?;
        self.exports.push(export);
        Ok(())
    }

    /// Buffer a watch point for the open participant.
    pub fn push_watch_point(&mut self, config: WatchPointConfig) -> Result<(), ConfigError> {
        self.current_mut(ElementKind::WatchPoint)?;
        self.watch_points.push(config);
        Ok(())
    }

    /// Drain all four buffers.
    ///
    /// # Panics
    ///
    /// Panics if a buffer is not empty afterwards.
    pub fn take_fragments(&mut self) -> Fragments {
        let fragments = Fragments {
            mappings: self.mappings.drain(),
            actions: self.actions.drain(),
            exports: self.exports.drain(),
            watch_points: self.watch_points.drain(),
        };
        assert!(
            self.mappings.is_empty()
                && self.actions.is_empty()
                && self.exports.is_empty()
                && self.watch_points.is_empty(),
            "fragment buffers not empty after drain"
        );
        fragments
    }

    /// Close the open participant and finalize it with the drained
    /// fragments.
    pub fn close_current(&mut self) -> Result<(), ConfigError> {
        let mut participant = self.open.take().ok_or(ConfigError::OutsideParticipant {
            element: ElementKind::Participant,
        })?;
        let fragments = self.take_fragments();
        finalize_participant(&mut participant, fragments)?;
        tracing::debug!(
            participant = %participant.name(),
            meshes = participant.mesh_contexts.len(),
            "participant finalized"
        );
        self.participants.push(participant);
        Ok(())
    }
}

// ── ParticipantConfiguration ───────────────────────────────────────

/// One configuration pass over participant declarations.
///
/// Errors are fail-fast: the first error poisons the pass, every later
/// call returns [`ConfigError::Aborted`], and [`finish`](Self::finish)
/// never hands out participants from a failed pass.
///
/// # Examples
///
/// ```
/// use tether_config::{DataDecl, Element, ElementEvent, ElementKind, ParticipantConfiguration, UseMesh};
/// use tether_core::Dimensions;
/// use tether_mesh::{Mesh, References};
///
/// let mut references = References::new();
/// let mut mesh = Mesh::new("Surface", Dimensions::THREE, false);
/// mesh.create_data("Pressure", 1).unwrap();
/// references.meshes.add(mesh).unwrap();
///
/// let mut config = ParticipantConfiguration::new(Dimensions::THREE, &references);
/// config
///     .apply([
///         ElementEvent::Start(Element::Participant { name: "Fluid".into() }),
///         ElementEvent::Start(Element::UseMesh(UseMesh::new("Surface"))),
///         ElementEvent::Start(Element::WriteData(DataDecl::new("Pressure", "Surface"))),
///         ElementEvent::End(ElementKind::Participant),
///     ])
///     .unwrap();
/// let participants = config.finish().unwrap();
/// assert_eq!(participants[0].write_data_contexts().len(), 1);
/// ```
#[derive(Debug)]
pub struct ParticipantConfiguration<'r> {
    dimensions: Dimensions,
    references: &'r References,
    context: BuilderContext,
    poisoned: bool,
}

impl<'r> ParticipantConfiguration<'r> {
    /// Start a pass resolving names against `references`.
    pub fn new(dimensions: Dimensions, references: &'r References) -> Self {
        Self {
            dimensions,
            references,
            context: BuilderContext::new(),
            poisoned: false,
        }
    }

    /// Simulation dimensionality.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Run `op` unless the pass is poisoned; poison it if `op` fails.
    fn guarded<T>(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<T, ConfigError>,
    ) -> Result<T, ConfigError> {
        if self.poisoned {
            return Err(ConfigError::Aborted);
        }
        let result = op(self);
        if let Err(error) = &result {
            tracing::debug!(%error, "configuration pass aborted");
            self.poisoned = true;
        }
        result
    }

    /// Feed one element event.
    pub fn handle(&mut self, event: ElementEvent) -> Result<(), ConfigError> {
        match event {
            ElementEvent::Start(element) => self.start(element),
            ElementEvent::End(kind) => self.end(kind),
        }
    }

    /// Feed a whole event stream, stopping at the first error.
    pub fn apply(
        &mut self,
        events: impl IntoIterator<Item = ElementEvent>,
    ) -> Result<(), ConfigError> {
        events.into_iter().try_for_each(|event| self.handle(event))
    }

    /// An element was opened.
    pub fn start(&mut self, element: Element) -> Result<(), ConfigError> {
        self.guarded(|this| {
            let dimensions = this.dimensions;
            let ctx = &mut this.context;
            match element {
                Element::Participant { name } => ctx.begin_participant(name),
                Element::UseMesh(decl) => bind_mesh(ctx, dimensions, this.references, decl),
                Element::WriteData(decl) => bind_data(ctx, decl, Direction::Write),
                Element::ReadData(decl) => bind_data(ctx, decl, Direction::Read),
                Element::WatchPoint(config) => {
                    dimensions.check(&config.coordinates, || {
                        format!("coordinate of watch point \"{}\"", config.name)
                    })?;
                    ctx.push_watch_point(config)
                }
                Element::Server(backend) => {
                    let participant = ctx.current_mut(ElementKind::Server)?;
                    participant.set_server_channel(Arc::new(ServerChannel::new(backend)));
                    Ok(())
                }
            }
        })
    }

    /// A generic tag was opened. Converts it with this pass's
    /// dimensionality, then behaves like [`start`](Self::start).
    pub fn start_tag(&mut self, tag: &Tag) -> Result<(), ConfigError> {
        let dimensions = self.dimensions;
        let element = self.guarded(|_| Element::from_tag(tag, dimensions))?;
        self.start(element)
    }

    /// An element was closed. Closing a participant finalizes it; other
    /// elements complete on open.
    pub fn end(&mut self, kind: ElementKind) -> Result<(), ConfigError> {
        self.guarded(|this| match kind {
            ElementKind::Participant => this.context.close_current(),
            ElementKind::UseMesh
            | ElementKind::WriteData
            | ElementKind::ReadData
            | ElementKind::WatchPoint
            | ElementKind::Server => Ok(()),
        })
    }

    /// Sub-configuration hook: a mapping was declared inside the open
    /// participant.
    pub fn declare_mapping(&mut self, mapping: ConfiguredMapping) -> Result<(), ConfigError> {
        self.guarded(|this| this.context.push_mapping(mapping))
    }

    /// Sub-configuration hook: an action was declared inside the open
    /// participant.
    pub fn declare_action(&mut self, action: Action) -> Result<(), ConfigError> {
        self.guarded(|this| this.context.push_action(action))
    }

    /// Sub-configuration hook: an export was declared inside the open
    /// participant.
    pub fn declare_export(&mut self, export: ExportContext) -> Result<(), ConfigError> {
        self.guarded(|this| this.context.push_export(export))
    }

    /// Mappings buffered for the open participant.
    pub fn pending_mappings(&self) -> &[ConfiguredMapping] {
        self.context.mappings().pending()
    }

    /// Actions buffered for the open participant.
    pub fn pending_actions(&self) -> &[Action] {
        self.context.actions().pending()
    }

    /// Exports buffered for the open participant.
    pub fn pending_exports(&self) -> &[ExportContext] {
        self.context.exports().pending()
    }

    /// Watch points buffered for the open participant.
    pub fn pending_watch_points(&self) -> &[WatchPointConfig] {
        self.context.watch_points().pending()
    }

    /// Participants finalized so far. Empty once the pass is poisoned.
    pub fn participants(&self) -> &[Participant] {
        if self.poisoned {
            return &[];
        }
        self.context.participants()
    }

    /// Whether an earlier error aborted the pass.
    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// End the pass and hand out the finalized participants.
    pub fn finish(self) -> Result<Vec<Participant>, ConfigError> {
        if self.poisoned {
            return Err(ConfigError::Aborted);
        }
        if let Some(open) = self.context.open {
            return Err(ConfigError::UnterminatedParticipant {
                participant: open.name,
            });
        }
        Ok(self.context.participants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{DataDecl, UseMesh};
    use crate::server::ServerBackend;
    use smallvec::smallvec;
    use tether_core::{MeshRequirement, Timing};
    use tether_test_utils::{configured_mapping, surface_references, FixedMapping};

    fn start_participant(config: &mut ParticipantConfiguration<'_>, name: &str) {
        config
            .start(Element::Participant {
                name: name.to_string(),
            })
            .unwrap();
    }

    #[test]
    fn participant_inside_participant_is_rejected() {
        let mut ctx = BuilderContext::new();
        ctx.begin_participant("Fluid").unwrap();
        match ctx.begin_participant("Solid") {
            Err(ConfigError::NestedParticipant { open, requested }) => {
                assert_eq!(open, "Fluid");
                assert_eq!(requested, "Solid");
            }
            other => panic!("expected NestedParticipant, got {other:?}"),
        }
        assert_eq!(ctx.current().unwrap().name(), "Fluid");
    }

    #[test]
    fn duplicate_participant_names_are_rejected() {
        let refs = surface_references(Dimensions::THREE);
        let mut config = ParticipantConfiguration::new(Dimensions::THREE, &refs);
        start_participant(&mut config, "Fluid");
        config.end(ElementKind::Participant).unwrap();
        match config.start(Element::Participant {
            name: "Fluid".to_string(),
        }) {
            Err(ConfigError::Consistency(ConsistencyError::DuplicateParticipant {
                participant,
            })) => assert_eq!(participant, "Fluid"),
            other => panic!("expected DuplicateParticipant, got {other:?}"),
        }
    }

    #[test]
    fn fragments_need_an_open_participant() {
        let refs = surface_references(Dimensions::THREE);
        let mut config = ParticipantConfiguration::new(Dimensions::THREE, &refs);
        match config.declare_export(ExportContext::default()) {
            Err(ConfigError::FragmentOutsideParticipant { fragment }) => {
                assert_eq!(fragment, "export");
            }
            other => panic!("expected FragmentOutsideParticipant, got {other:?}"),
        }
        assert!(config.is_poisoned());
    }

    #[test]
    fn end_of_participant_drains_buffers() {
        let refs = surface_references(Dimensions::THREE);
        let mut config = ParticipantConfiguration::new(Dimensions::THREE, &refs);
        start_participant(&mut config, "Fluid");
        config
            .start(Element::UseMesh(UseMesh::new("Surface")))
            .unwrap();
        config
            .declare_mapping(configured_mapping(
                &refs,
                "Surface",
                Direction::Write,
                Timing::Initial,
                FixedMapping::new(MeshRequirement::Vertex, MeshRequirement::Vertex),
            ))
            .unwrap();
        config.declare_export(ExportContext::default()).unwrap();
        config
            .start(Element::WatchPoint(WatchPointConfig {
                name: "Probe".to_string(),
                mesh: "Surface".to_string(),
                coordinates: smallvec![0.0, 0.0, 1.0],
            }))
            .unwrap();
        assert_eq!(config.pending_mappings().len(), 1);
        assert_eq!(config.pending_exports().len(), 1);
        assert_eq!(config.pending_watch_points().len(), 1);
        assert!(config.pending_actions().is_empty());

        config.end(ElementKind::Participant).unwrap();
        assert!(config.pending_mappings().is_empty());
        assert!(config.pending_exports().is_empty());
        assert!(config.pending_watch_points().is_empty());

        let participants = config.finish().unwrap();
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].export_contexts().len(), 1);
        assert_eq!(participants[0].watch_points().len(), 1);
    }

    #[test]
    fn watch_point_coordinates_are_checked() {
        let refs = surface_references(Dimensions::TWO);
        let mut config = ParticipantConfiguration::new(Dimensions::TWO, &refs);
        start_participant(&mut config, "Fluid");
        let result = config.start(Element::WatchPoint(WatchPointConfig {
            name: "Probe".to_string(),
            mesh: "Surface".to_string(),
            coordinates: smallvec![0.0, 0.0, 1.0],
        }));
        assert!(matches!(result, Err(ConfigError::Dimension(_))));
    }

    #[test]
    fn server_channel_is_attached_and_replaced() {
        let refs = surface_references(Dimensions::THREE);
        let mut config = ParticipantConfiguration::new(Dimensions::THREE, &refs);
        start_participant(&mut config, "Fluid");
        config
            .start(Element::Server(ServerBackend::default()))
            .unwrap();
        config.start(Element::Server(ServerBackend::MpiSingle)).unwrap();
        config.end(ElementKind::Server).unwrap();
        config.end(ElementKind::Participant).unwrap();
        let participants = config.finish().unwrap();
        let channel = participants[0].server_channel().unwrap();
        assert_eq!(channel.backend(), &ServerBackend::MpiSingle);
    }

    #[test]
    fn error_poisons_the_pass() {
        let refs = surface_references(Dimensions::THREE);
        let mut config = ParticipantConfiguration::new(Dimensions::THREE, &refs);
        start_participant(&mut config, "Fluid");
        let err = config
            .start(Element::ReadData(DataDecl::new("Pressure", "Surface")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Usage(_)));
        assert_eq!(
            config.start(Element::UseMesh(UseMesh::new("Surface"))),
            Err(ConfigError::Aborted)
        );
        assert_eq!(config.end(ElementKind::Participant), Err(ConfigError::Aborted));
        assert_eq!(config.finish().unwrap_err(), ConfigError::Aborted);
    }

    #[test]
    fn poisoned_pass_hides_finalized_participants() {
        let refs = surface_references(Dimensions::THREE);
        let mut config = ParticipantConfiguration::new(Dimensions::THREE, &refs);
        start_participant(&mut config, "Fluid");
        config.end(ElementKind::Participant).unwrap();
        assert_eq!(config.participants().len(), 1);

        start_participant(&mut config, "Solid");
        let err = config
            .start(Element::ReadData(DataDecl::new("Forces", "Surface")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Usage(_)));
        assert!(config.is_poisoned());
        assert!(config.participants().is_empty());
    }

    #[test]
    fn finish_rejects_open_participant() {
        let refs = surface_references(Dimensions::THREE);
        let mut config = ParticipantConfiguration::new(Dimensions::THREE, &refs);
        start_participant(&mut config, "Fluid");
        match config.finish() {
            Err(ConfigError::UnterminatedParticipant { participant }) => {
                assert_eq!(participant, "Fluid");
            }
            other => panic!("expected UnterminatedParticipant, got {other:?}"),
        }
    }

    #[test]
    fn tags_drive_a_pass() {
        let refs = surface_references(Dimensions::TWO);
        let mut config = ParticipantConfiguration::new(Dimensions::TWO, &refs);
        config
            .start_tag(&Tag::new("participant").with("name", "Solid"))
            .unwrap();
        config
            .start_tag(
                &Tag::new("use-mesh")
                    .with("name", "Surface")
                    .with("offset", "1.0;2.0")
                    .with("provide", "yes"),
            )
            .unwrap();
        config
            .start_tag(&Tag::new("read-data").with("name", "Forces").with("mesh", "Surface"))
            .unwrap();
        config.start_tag(&Tag::namespaced("server", "sockets")).unwrap();
        config.end(ElementKind::Participant).unwrap();

        let participants = config.finish().unwrap();
        let solid = &participants[0];
        let surface = solid.mesh_context_by_name("Surface").unwrap();
        assert!(surface.provides_mesh());
        assert_eq!(surface.local_offset(), &[1.0, 2.0]);
        assert_eq!(solid.read_data_contexts()[0].data().name(), "Forces");
        assert!(solid.server_channel().is_some());
    }

    #[test]
    fn bad_tag_poisons_the_pass() {
        let refs = surface_references(Dimensions::TWO);
        let mut config = ParticipantConfiguration::new(Dimensions::TWO, &refs);
        assert!(matches!(
            config.start_tag(&Tag::new("participant")),
            Err(ConfigError::Element(_))
        ));
        assert!(config.is_poisoned());
    }
}
