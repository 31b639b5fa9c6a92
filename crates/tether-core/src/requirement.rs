//! Mapping direction, timing, and mesh requirement levels.

use std::fmt;

/// Which way a participant moves data through a mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Data flows from the participant's local mesh copy into the mesh.
    Write,
    /// Data flows from the mesh into the participant's local mesh copy.
    Read,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Write => write!(f, "write"),
            Self::Read => write!(f, "read"),
        }
    }
}

/// When a mapping is recomputed during a coupled run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Timing {
    /// Computed once, at initialization.
    #[default]
    Initial,
    /// Recomputed at every time step advance.
    OnAdvance,
    /// Recomputed on every call, on demand.
    Incremental,
}

impl Timing {
    /// Whether a mapping with this timing keeps its mesh around between
    /// computations, which a `Temporary` mesh cannot guarantee.
    pub fn requires_persistent_vertices(self) -> bool {
        !matches!(self, Self::Incremental)
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial"),
            Self::OnAdvance => write!(f, "on-advance"),
            Self::Incremental => write!(f, "incremental"),
        }
    }
}

/// The strongest guarantee a mesh must satisfy for its mappings to work.
///
/// Ordered: `Undefined < Temporary < Vertex < Full`. A mesh context's
/// requirement only ever moves up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshRequirement {
    /// No mapping has asked for anything yet.
    #[default]
    Undefined,
    /// Vertices are needed only for the duration of one computation.
    Temporary,
    /// Vertices must persist.
    Vertex,
    /// Vertices plus connectivity (edges, triangles).
    Full,
}

impl MeshRequirement {
    /// Raise `self` to `other` if `other` is stronger.
    ///
    /// Returns `true` if the level changed.
    pub fn raise(&mut self, other: Self) -> bool {
        if other > *self {
            *self = other;
            true
        } else {
            false
        }
    }

    /// Apply the timing floor: a `Temporary` requirement is lifted to
    /// `Vertex` when the mapping's timing needs persistent vertices.
    pub fn apply_timing_floor(&mut self, timing: Timing) {
        if *self == Self::Temporary && timing.requires_persistent_vertices() {
            *self = Self::Vertex;
        }
    }
}

impl fmt::Display for MeshRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Temporary => write!(f, "temporary"),
            Self::Vertex => write!(f, "vertex"),
            Self::Full => write!(f, "full"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_requirement() -> impl Strategy<Value = MeshRequirement> {
        prop_oneof![
            Just(MeshRequirement::Undefined),
            Just(MeshRequirement::Temporary),
            Just(MeshRequirement::Vertex),
            Just(MeshRequirement::Full),
        ]
    }

    fn arb_timing() -> impl Strategy<Value = Timing> {
        prop_oneof![
            Just(Timing::Initial),
            Just(Timing::OnAdvance),
            Just(Timing::Incremental),
        ]
    }

    #[test]
    fn ordering() {
        assert!(MeshRequirement::Undefined < MeshRequirement::Temporary);
        assert!(MeshRequirement::Temporary < MeshRequirement::Vertex);
        assert!(MeshRequirement::Vertex < MeshRequirement::Full);
    }

    #[test]
    fn raise_never_lowers() {
        let mut r = MeshRequirement::Full;
        assert!(!r.raise(MeshRequirement::Temporary));
        assert_eq!(r, MeshRequirement::Full);
    }

    #[test]
    fn floor_lifts_temporary_only() {
        let mut r = MeshRequirement::Temporary;
        r.apply_timing_floor(Timing::Initial);
        assert_eq!(r, MeshRequirement::Vertex);

        let mut r = MeshRequirement::Temporary;
        r.apply_timing_floor(Timing::Incremental);
        assert_eq!(r, MeshRequirement::Temporary);

        let mut r = MeshRequirement::Undefined;
        r.apply_timing_floor(Timing::OnAdvance);
        assert_eq!(r, MeshRequirement::Undefined);
    }

    proptest! {
        #[test]
        fn raise_is_max(a in arb_requirement(), b in arb_requirement()) {
            let mut r = a;
            r.raise(b);
            prop_assert_eq!(r, a.max(b));
        }

        #[test]
        fn floor_never_lowers(a in arb_requirement(), t in arb_timing()) {
            let mut r = a;
            r.apply_timing_floor(t);
            prop_assert!(r >= a);
        }
    }
}
