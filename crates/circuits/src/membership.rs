//! Single-tier district membership circuit.
//!
//! Proves that a private identity commitment occupies some position in the
//! district tree with the public root, and binds the nullifier to the
//! (identity, action, template) triple.
//!
//! Public inputs, in fixed order: district_root, nullifier, action_id.
//! Everything else is a private witness and never leaves the proof's
//! cryptographic envelope.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

use crate::merkle::{compute_root_from_path, MerklePath, MerklePathVar};
use crate::nullifier::{derive_nullifier, derive_nullifier_var};
use crate::poseidon::hash_single_var;

/// Single-tier district membership circuit.
#[derive(Clone)]
pub struct DistrictMembershipCircuit {
    // Public inputs
    /// Published root of the district tree
    pub district_root: Option<Fr>,
    /// Expected nullifier for this (identity, action, template)
    pub nullifier: Option<Fr>,
    /// Action being performed
    pub action_id: Option<Fr>,

    // Private witnesses
    /// Commitment to the prover's identity; the raw identity never enters
    /// the circuit
    pub identity_commitment: Option<Fr>,
    /// Position of the identity's leaf in the district tree
    pub leaf_index: Option<u64>,
    /// Sibling path from the leaf to the district root
    pub path: Option<MerklePath>,
    /// Campaign template tag, disambiguates numerically equal action ids
    pub template_tag: Option<Fr>,
}

impl DistrictMembershipCircuit {
    /// Create an empty circuit of the given tree depth for setup.
    /// Uses dummy values that produce the right constraint structure.
    pub fn empty(depth: usize) -> Self {
        Self {
            district_root: Some(Fr::from(0u64)),
            nullifier: Some(Fr::from(0u64)),
            action_id: Some(Fr::from(0u64)),
            identity_commitment: Some(Fr::from(0u64)),
            leaf_index: Some(0),
            path: Some(MerklePath::empty(depth)),
            template_tag: Some(Fr::from(0u64)),
        }
    }

    /// Create a circuit with witnesses. The expected nullifier is derived
    /// natively from the same triple the circuit re-derives in constraints.
    pub fn new(
        identity_commitment: Fr,
        leaf_index: u64,
        path: MerklePath,
        district_root: Fr,
        action_id: Fr,
        template_tag: Fr,
    ) -> Self {
        let nullifier = derive_nullifier(identity_commitment, action_id, template_tag);

        Self {
            district_root: Some(district_root),
            nullifier: Some(nullifier),
            action_id: Some(action_id),
            identity_commitment: Some(identity_commitment),
            leaf_index: Some(leaf_index),
            path: Some(path),
            template_tag: Some(template_tag),
        }
    }
}

impl ConstraintSynthesizer<Fr> for DistrictMembershipCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        // === Public inputs, fixed order ===
        let district_root_var = FpVar::new_input(cs.clone(), || {
            self.district_root.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let nullifier_var = FpVar::new_input(cs.clone(), || {
            self.nullifier.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let action_id_var = FpVar::new_input(cs.clone(), || {
            self.action_id.ok_or(SynthesisError::AssignmentMissing)
        })?;

        // === Private witnesses ===
        let identity_var = FpVar::new_witness(cs.clone(), || {
            self.identity_commitment
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let index_var = FpVar::new_witness(cs.clone(), || {
            self.leaf_index
                .map(Fr::from)
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let template_var = FpVar::new_witness(cs.clone(), || {
            self.template_tag.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let path = self.path.as_ref().ok_or(SynthesisError::AssignmentMissing)?;
        let path_var = MerklePathVar::new_witness(cs.clone(), path)?;

        // === Constraint 1: leaf is the hash of the identity commitment ===
        let leaf_var = hash_single_var(&identity_var)?;

        // === Constraint 2: the leaf folds to the public district root
        // under the constrained index ===
        let computed_root = compute_root_from_path(cs.clone(), &leaf_var, &index_var, &path_var)?;
        computed_root.enforce_equal(&district_root_var)?;

        // === Constraint 3: the nullifier is derived from the same
        // identity the membership proof is about ===
        let computed_nullifier =
            derive_nullifier_var(&identity_var, &action_id_var, &template_var)?;
        computed_nullifier.enforce_equal(&nullifier_var)?;

        Ok(())
    }
}
