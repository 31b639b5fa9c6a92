//! Data actions.
//!
//! Actions are post-processing steps applied to mesh data at fixed points
//! of the coupling cycle. They are declared by the action
//! sub-configuration and attached to the participant that owns the mesh.

use std::sync::Arc;

use tether_mesh::{Data, Mesh};

/// What the action computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    /// Multiply target data by the vertex-associated area.
    MultiplyByArea,
    /// Divide target data by the vertex-associated area.
    DivideByArea,
    /// Scale by the ratio of computed to full time step length.
    ScaleByComputedDtRatio,
    /// Scale by the ratio of computed to partial time step length.
    ScaleByComputedDtPartRatio,
    /// Scale by the time step length.
    ScaleByDt,
    /// Compute surface curvature into the target data.
    ComputeCurvature,
    /// Sum the source data into the target data.
    Summation,
}

/// When in the coupling cycle the action runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionTiming {
    /// Before every advance.
    RegularPrior,
    /// After every advance.
    RegularPost,
    /// Before data is exchanged.
    OnExchangePrior,
    /// After data is exchanged.
    OnExchangePost,
    /// After a time step has converged.
    OnTimestepCompletePost,
}

/// A declared action.
#[derive(Clone, Debug)]
pub struct Action {
    kind: ActionKind,
    timing: ActionTiming,
    mesh: Arc<Mesh>,
    target_data: Arc<Data>,
    source_data: Vec<Arc<Data>>,
}

impl Action {
    /// Declare an action writing `target_data` on `mesh`.
    pub fn new(kind: ActionKind, timing: ActionTiming, mesh: Arc<Mesh>, target_data: Arc<Data>) -> Self {
        Self {
            kind,
            timing,
            mesh,
            target_data,
            source_data: Vec::new(),
        }
    }

    /// Add input data (used by [`ActionKind::Summation`]).
    pub fn with_source_data(mut self, data: Arc<Data>) -> Self {
        self.source_data.push(data);
        self
    }

    /// What the action computes.
    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    /// When the action runs.
    pub fn timing(&self) -> ActionTiming {
        self.timing
    }

    /// Mesh the action operates on.
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    /// Data written by the action.
    pub fn target_data(&self) -> &Arc<Data> {
        &self.target_data
    }

    /// Data read by the action.
    pub fn source_data(&self) -> &[Arc<Data>] {
        &self.source_data
    }
}
