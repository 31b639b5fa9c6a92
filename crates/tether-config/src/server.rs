//! Participant-to-server channel declarations.
//!
//! A solver that runs in parallel talks to a separately running coupling
//! server. The configuration only records which backend to use; the
//! runtime establishes the connection.

use std::path::PathBuf;

/// Port used by the sockets backend when none is configured.
pub const DEFAULT_SOCKET_PORT: u16 = 51235;

/// Transport between a participant and its coupling server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ServerBackend {
    /// TCP sockets.
    Sockets {
        /// Server port.
        port: u16,
    },
    /// MPI with startup in separate communication spaces.
    Mpi {
        /// Directory where connection information is exchanged. Empty
        /// means the startup directory.
        exchange_directory: PathBuf,
    },
    /// MPI with startup in a common communication space.
    MpiSingle,
}

impl Default for ServerBackend {
    fn default() -> Self {
        Self::Sockets {
            port: DEFAULT_SOCKET_PORT,
        }
    }
}

/// Handle to a declared client/server channel, shared with the runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerChannel {
    backend: ServerBackend,
}

impl ServerChannel {
    /// Declare a channel over `backend`.
    pub fn new(backend: ServerBackend) -> Self {
        Self { backend }
    }

    /// Transport to connect over.
    pub fn backend(&self) -> &ServerBackend {
        &self.backend
    }
}
