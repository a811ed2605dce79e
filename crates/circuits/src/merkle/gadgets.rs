//! In-circuit Merkle inclusion verification.
//!
//! This is the security-critical gadget of the repository. Every path
//! direction is derived from the bit decomposition of a single witnessed
//! index; the bits are boolean-constrained and must recompose to the
//! witnessed value. A prover holding a valid path for one position cannot
//! fold it into a different root by choosing directions freely, which was
//! the forgery class the constrained index closes.

use ark_bn254::Fr;
use ark_ff::{BigInteger, Field, One, PrimeField};
use ark_r1cs_std::{
    boolean::Boolean,
    fields::fp::FpVar,
    prelude::*,
};
use ark_relations::r1cs::{ConstraintSystemRef, SynthesisError};

use crate::poseidon::hash_pair_var;
use super::path::MerklePath;

/// Circuit variable representation of a Merkle path.
#[derive(Clone)]
pub struct MerklePathVar {
    siblings: Vec<FpVar<Fr>>,
}

impl MerklePathVar {
    /// Allocate the sibling hashes as witness variables.
    pub fn new_witness(
        cs: ConstraintSystemRef<Fr>,
        path: &MerklePath,
    ) -> Result<Self, SynthesisError> {
        let siblings = path
            .siblings()
            .iter()
            .map(|h| FpVar::new_witness(cs.clone(), || Ok(*h)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { siblings })
    }

    /// The sibling variables, level 0 first.
    pub fn siblings(&self) -> &[FpVar<Fr>] {
        &self.siblings
    }

    /// Number of levels.
    pub fn depth(&self) -> usize {
        self.siblings.len()
    }
}

/// Decompose a witnessed index into exactly `depth` constrained bits.
///
/// Three constraints make the decomposition binding:
/// 1. each allocated `Boolean` is forced to 0 or 1;
/// 2. the bits are recomposed LSB-first as `sum(bit_i * 2^i)`;
/// 3. the recomposition is enforced equal to the witnessed index.
///
/// Together these also reject any claimed index >= 2^depth: a value that
/// does not fit in `depth` bits has no satisfying bit assignment, so the
/// surrounding proof is unconstructable rather than silently wrapped.
pub fn index_bits(
    cs: ConstraintSystemRef<Fr>,
    index: &FpVar<Fr>,
    depth: usize,
) -> Result<Vec<Boolean<Fr>>, SynthesisError> {
    let mut bits = Vec::with_capacity(depth);
    for i in 0..depth {
        let bit = Boolean::new_witness(cs.clone(), || {
            let value = index.value()?;
            Ok(value.into_bigint().get_bit(i))
        })?;
        bits.push(bit);
    }

    let mut recomposed = FpVar::<Fr>::zero();
    let mut power_of_two = Fr::one();
    for bit in &bits {
        let bit_fp: FpVar<Fr> = bit.clone().into();
        recomposed += bit_fp * FpVar::constant(power_of_two);
        power_of_two.double_in_place();
    }
    recomposed.enforce_equal(index)?;

    Ok(bits)
}

/// Compute the root from a leaf and Merkle path in-circuit.
///
/// At every level both recombination orders are hashed and the constrained
/// index bit selects between them, so the circuit's shape is independent of
/// the witness.
pub fn compute_root_from_path(
    cs: ConstraintSystemRef<Fr>,
    leaf: &FpVar<Fr>,
    index: &FpVar<Fr>,
    path: &MerklePathVar,
) -> Result<FpVar<Fr>, SynthesisError> {
    let bits = index_bits(cs, index, path.depth())?;

    let mut current = leaf.clone();
    for (sibling, bit) in path.siblings.iter().zip(bits.iter()) {
        // bit = 0: current is the left child, hash(current, sibling)
        // bit = 1: current is the right child, hash(sibling, current)
        let hash_if_left = hash_pair_var(&current, sibling)?;
        let hash_if_right = hash_pair_var(sibling, &current)?;

        current = bit.select(&hash_if_right, &hash_if_left)?;
    }

    Ok(current)
}

/// Verify that a leaf sits at the witnessed index of the tree with the
/// expected root.
pub fn verify_membership(
    cs: ConstraintSystemRef<Fr>,
    expected_root: &FpVar<Fr>,
    leaf: &FpVar<Fr>,
    index: &FpVar<Fr>,
    path: &MerklePathVar,
) -> Result<(), SynthesisError> {
    let computed_root = compute_root_from_path(cs, leaf, index, path)?;
    computed_root.enforce_equal(expected_root)?;
    Ok(())
}
