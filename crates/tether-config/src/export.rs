//! Mesh export declarations.

use std::path::PathBuf;

/// Output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Legacy VTK.
    #[default]
    Vtk,
}

/// How often meshes are exported.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportInterval {
    /// Every `n`-th time step.
    EveryTimesteps(u32),
    /// Only once, after the final time step.
    FinalOnly,
}

impl Default for ExportInterval {
    fn default() -> Self {
        Self::EveryTimesteps(1)
    }
}

/// Export settings attached to a participant.
///
/// Exports carry no mesh reference: they cover every mesh the
/// participant uses.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportContext {
    /// Output format.
    pub format: ExportFormat,
    /// Directory written to. Empty means the working directory.
    pub location: PathBuf,
    /// Export frequency.
    pub interval: ExportInterval,
    /// Ask the solver to plot its own state alongside.
    pub trigger_solver_plot: bool,
    /// Include vertex normals.
    pub plot_normals: bool,
    /// Include vertex neighbour relations.
    pub plot_neighbors: bool,
}
