//! Merkle path structure shared by the native and constrained folds.

use ark_bn254::Fr;

use crate::poseidon::hash_pair;
use super::tree::MerkleError;

/// The ordered sibling hashes needed to recompute a root from a leaf.
///
/// Unlike the tree itself, a path carries no direction flags: direction is
/// derived from the bits of the leaf index at fold time, which is exactly
/// the property the constrained verifier depends on.
#[derive(Clone, Debug)]
pub struct MerklePath {
    siblings: Vec<Fr>,
}

impl MerklePath {
    /// Create a path from leaf-to-root sibling hashes.
    pub fn new(siblings: Vec<Fr>) -> Self {
        Self { siblings }
    }

    /// The sibling hashes, level 0 first.
    pub fn siblings(&self) -> &[Fr] {
        &self.siblings
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }

    /// Fold the path up to a root natively.
    ///
    /// Bit `i` of `index` (LSB first) decides the order at level `i`:
    /// bit 0 means the running hash is the left child, bit 1 the right.
    /// Rejects indices that do not fit in `depth` bits.
    pub fn compute_root(&self, leaf: Fr, index: u64) -> Result<Fr, MerkleError> {
        let capacity = 1u64 << self.depth();
        if index >= capacity {
            return Err(MerkleError::IndexOutOfRange { index, capacity });
        }

        let mut current = leaf;
        for (level, sibling) in self.siblings.iter().enumerate() {
            let is_right = (index >> level) & 1 == 1;
            current = if is_right {
                hash_pair(*sibling, current)
            } else {
                hash_pair(current, *sibling)
            };
        }

        Ok(current)
    }

    /// An all-zero path of the given depth, used for circuit setup.
    pub fn empty(depth: usize) -> Self {
        Self {
            siblings: vec![Fr::from(0u64); depth],
        }
    }
}

#[cfg(test)]
mod path_tests {
    use super::*;

    #[test]
    fn test_compute_root_deterministic() {
        let path = MerklePath::new(vec![Fr::from(1u64), Fr::from(2u64)]);

        let a = path.compute_root(Fr::from(7u64), 1).unwrap();
        let b = path.compute_root(Fr::from(7u64), 1).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_index_different_root() {
        let path = MerklePath::new(vec![Fr::from(1u64), Fr::from(2u64)]);
        let leaf = Fr::from(7u64);

        let roots: Vec<Fr> = (0..4u64)
            .map(|i| path.compute_root(leaf, i).unwrap())
            .collect();

        for i in 0..roots.len() {
            for j in (i + 1)..roots.len() {
                assert_ne!(roots[i], roots[j], "indices {} and {} collided", i, j);
            }
        }
    }

    #[test]
    fn test_index_out_of_range_rejected() {
        let path = MerklePath::new(vec![Fr::from(1u64), Fr::from(2u64)]);
        assert!(path.compute_root(Fr::from(7u64), 4).is_err());
    }

    #[test]
    fn test_fold_matches_hand_computation() {
        let sibling_0 = Fr::from(100u64);
        let sibling_1 = Fr::from(200u64);
        let leaf = Fr::from(9u64);
        let path = MerklePath::new(vec![sibling_0, sibling_1]);

        // Index 2 = bits [0, 1]: left child at level 0, right child at level 1.
        let expected = hash_pair(sibling_1, hash_pair(leaf, sibling_0));
        assert_eq!(path.compute_root(leaf, 2).unwrap(), expected);
    }
}
