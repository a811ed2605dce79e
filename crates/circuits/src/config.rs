//! Circuit configuration surface.
//!
//! Tree depth is a build-time constant, never a witness. Changing a depth
//! or the public-input arity changes the circuit shape, which invalidates
//! the deployed verifier; any such change must go through a version bump
//! and a regenerated setup artifact.

/// Version tag of the circuit shape, carried alongside persisted or
/// transmitted proofs. Version 1 was the retired shape with free path
/// direction bits; only version 2 proofs are accepted.
pub const CIRCUIT_VERSION: u16 = 2;

/// Depth of a municipal district tree (1,024 identities).
pub const DEPTH_MUNICIPAL: usize = 10;

/// Depth of a state-legislative district tree (4,096 identities).
pub const DEPTH_STATE: usize = 12;

/// Depth of a federal district tree (16,384 identities).
pub const DEPTH_FEDERAL: usize = 14;

/// Depth of the global registry tree of districts (256 districts).
pub const DEPTH_GLOBAL: usize = 8;

/// Jurisdiction granularity tiers supported by the build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeDepth {
    Municipal,
    State,
    Federal,
}

impl TreeDepth {
    /// The tree depth this tier is compiled at.
    pub fn depth(self) -> usize {
        match self {
            TreeDepth::Municipal => DEPTH_MUNICIPAL,
            TreeDepth::State => DEPTH_STATE,
            TreeDepth::Federal => DEPTH_FEDERAL,
        }
    }

    /// All supported tiers.
    pub fn all() -> [TreeDepth; 3] {
        [TreeDepth::Municipal, TreeDepth::State, TreeDepth::Federal]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers_have_distinct_depths() {
        let depths: Vec<usize> = TreeDepth::all().iter().map(|t| t.depth()).collect();
        assert_eq!(depths, vec![DEPTH_MUNICIPAL, DEPTH_STATE, DEPTH_FEDERAL]);
        assert!(depths.windows(2).all(|w| w[0] < w[1]));
    }
}
