//! Watch point declarations and resolved watch points.

use std::sync::Arc;

use tether_core::Vector;
use tether_mesh::Mesh;

/// Suffix appended to a watch point name to form its output file.
pub const WATCH_POINT_FILE_SUFFIX: &str = ".watchpoint.txt";

/// A watch point as declared, before its mesh is resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct WatchPointConfig {
    /// Watch point name.
    pub name: String,
    /// Name of the mesh to watch.
    pub mesh: String,
    /// Probe location.
    pub coordinates: Vector,
}

/// A probe following data and vertex coordinates of one mesh at a point.
///
/// If the point is not on the mesh, the runtime uses its closest
/// projection onto the mesh.
#[derive(Clone, Debug)]
pub struct WatchPoint {
    name: String,
    coordinates: Vector,
    mesh: Arc<Mesh>,
    output_file: String,
}

impl WatchPoint {
    /// Resolve a declaration against the watched mesh.
    pub fn new(config: WatchPointConfig, mesh: Arc<Mesh>) -> Self {
        let output_file = format!("{}{WATCH_POINT_FILE_SUFFIX}", config.name);
        Self {
            name: config.name,
            coordinates: config.coordinates,
            mesh,
            output_file,
        }
    }

    /// Watch point name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Probe location.
    pub fn coordinates(&self) -> &[f64] {
        &self.coordinates
    }

    /// Watched mesh.
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    /// File the runtime writes the time series to.
    pub fn output_file(&self) -> &str {
        &self.output_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;
    use tether_core::Dimensions;

    #[test]
    fn output_file_is_name_plus_suffix() {
        let mesh = Arc::new(Mesh::new("Surface", Dimensions::TWO, false));
        let wp = WatchPoint::new(
            WatchPointConfig {
                name: "Tip".to_string(),
                mesh: "Surface".to_string(),
                coordinates: smallvec![0.5, 1.0],
            },
            Arc::clone(&mesh),
        );
        assert_eq!(wp.output_file(), "Tip.watchpoint.txt");
        assert_eq!(wp.coordinates(), &[0.5, 1.0]);
        assert_eq!(wp.mesh().id(), mesh.id());
    }
}
