//! Native Merkle tree implementation.
//!
//! A perfect binary tree of fixed depth over BN254 field elements. Leaf
//! sets come from the external boundary-data pipeline; the tree here must
//! hash them with exactly the same Poseidon parameters the circuit uses,
//! since the circuit has no way to detect drift.

use ark_bn254::Fr;
use thiserror::Error;

use crate::poseidon::batch_hash_pairs;
use super::path::MerklePath;

/// Errors from native tree operations.
#[derive(Error, Debug)]
pub enum MerkleError {
    #[error("leaf count {count} exceeds tree capacity {capacity}")]
    TooManyLeaves { count: usize, capacity: u64 },
    #[error("index {index} out of range for tree of {capacity} leaves")]
    IndexOutOfRange { index: u64, capacity: u64 },
    #[error("path has {got} siblings, expected {expected}")]
    PathLength { got: usize, expected: usize },
}

/// A perfect binary Merkle tree of fixed depth.
///
/// Positions beyond the supplied leaf set are padded with the zero element.
/// Internal node = `hash_pair(left, right)`; the combination is
/// order-significant, which is what makes path direction carry information.
#[derive(Clone)]
pub struct MerkleTree {
    depth: usize,

    /// levels[0] is the padded leaf layer, levels[depth] is the root layer.
    levels: Vec<Vec<Fr>>,
}

impl MerkleTree {
    /// Build a tree of the given depth over a leaf set.
    ///
    /// Tree building is the dominant cost of preparing a new district;
    /// each level is hashed as one parallel batch.
    pub fn from_leaves(leaves: &[Fr], depth: usize) -> Result<Self, MerkleError> {
        let capacity = 1u64 << depth;
        if leaves.len() as u64 > capacity {
            return Err(MerkleError::TooManyLeaves {
                count: leaves.len(),
                capacity,
            });
        }

        let mut layer = leaves.to_vec();
        layer.resize(capacity as usize, Fr::from(0u64));

        let mut levels = Vec::with_capacity(depth + 1);
        levels.push(layer);

        for level in 0..depth {
            let pairs: Vec<(Fr, Fr)> = levels[level]
                .chunks_exact(2)
                .map(|pair| (pair[0], pair[1]))
                .collect();
            levels.push(batch_hash_pairs(&pairs));
        }

        Ok(Self { depth, levels })
    }

    /// The tree depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of leaf positions.
    pub fn capacity(&self) -> u64 {
        1u64 << self.depth
    }

    /// The root hash.
    pub fn root(&self) -> Fr {
        self.levels[self.depth][0]
    }

    /// The (possibly padded) leaf at the given position.
    pub fn leaf(&self, index: u64) -> Result<Fr, MerkleError> {
        self.check_index(index)?;
        Ok(self.levels[0][index as usize])
    }

    /// Generate the sibling path for the leaf at the given position.
    ///
    /// `path.siblings()[i]` is the sibling at level `i` counting from the
    /// leaf, aligned with bit `i` of the index.
    pub fn proof(&self, index: u64) -> Result<MerklePath, MerkleError> {
        self.check_index(index)?;

        let mut siblings = Vec::with_capacity(self.depth);
        let mut current = index as usize;

        for level in 0..self.depth {
            let sibling = current ^ 1;
            siblings.push(self.levels[level][sibling]);
            current >>= 1;
        }

        Ok(MerklePath::new(siblings))
    }

    /// Verify a proof natively against this tree's root.
    pub fn verify_proof(&self, leaf: Fr, index: u64, path: &MerklePath) -> Result<bool, MerkleError> {
        Ok(path.compute_root(leaf, index)? == self.root())
    }

    fn check_index(&self, index: u64) -> Result<(), MerkleError> {
        if index >= self.capacity() {
            return Err(MerkleError::IndexOutOfRange {
                index,
                capacity: self.capacity(),
            });
        }
        Ok(())
    }
}
