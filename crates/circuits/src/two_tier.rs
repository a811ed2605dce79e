//! Two-tier district membership circuit.
//!
//! Tier 1 proves the identity's leaf sits in a district tree; tier 2
//! re-folds that district root as a leaf of the global registry tree of
//! districts (identity-in-district-in-global nesting). The same inclusion
//! verifier runs at both tiers, at different fixed depths.
//!
//! Public inputs, in fixed order: district_root, global_root, nullifier,
//! action_id.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::prelude::*;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

use crate::merkle::{compute_root_from_path, MerklePath, MerklePathVar};
use crate::nullifier::{derive_nullifier, derive_nullifier_var};
use crate::poseidon::hash_single_var;

/// Two-tier district membership circuit.
#[derive(Clone)]
pub struct TwoTierMembershipCircuit {
    // Public inputs
    /// Published root of the district tree
    pub district_root: Option<Fr>,
    /// Published root of the global registry of districts
    pub global_root: Option<Fr>,
    /// Expected nullifier for this (identity, action, template)
    pub nullifier: Option<Fr>,
    /// Action being performed
    pub action_id: Option<Fr>,

    // Private witnesses
    /// Commitment to the prover's identity
    pub identity_commitment: Option<Fr>,
    /// Position of the identity's leaf in the district tree
    pub leaf_index: Option<u64>,
    /// Sibling path from the leaf to the district root
    pub leaf_path: Option<MerklePath>,
    /// Position of the district in the global tree
    pub district_index: Option<u64>,
    /// Sibling path from the district root to the global root
    pub global_path: Option<MerklePath>,
    /// Campaign template tag
    pub template_tag: Option<Fr>,
}

impl TwoTierMembershipCircuit {
    /// Create an empty circuit for setup at the given tier depths.
    pub fn empty(leaf_depth: usize, global_depth: usize) -> Self {
        Self {
            district_root: Some(Fr::from(0u64)),
            global_root: Some(Fr::from(0u64)),
            nullifier: Some(Fr::from(0u64)),
            action_id: Some(Fr::from(0u64)),
            identity_commitment: Some(Fr::from(0u64)),
            leaf_index: Some(0),
            leaf_path: Some(MerklePath::empty(leaf_depth)),
            district_index: Some(0),
            global_path: Some(MerklePath::empty(global_depth)),
            template_tag: Some(Fr::from(0u64)),
        }
    }

    /// Create a circuit with witnesses.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        identity_commitment: Fr,
        leaf_index: u64,
        leaf_path: MerklePath,
        district_root: Fr,
        district_index: u64,
        global_path: MerklePath,
        global_root: Fr,
        action_id: Fr,
        template_tag: Fr,
    ) -> Self {
        let nullifier = derive_nullifier(identity_commitment, action_id, template_tag);

        Self {
            district_root: Some(district_root),
            global_root: Some(global_root),
            nullifier: Some(nullifier),
            action_id: Some(action_id),
            identity_commitment: Some(identity_commitment),
            leaf_index: Some(leaf_index),
            leaf_path: Some(leaf_path),
            district_index: Some(district_index),
            global_path: Some(global_path),
            template_tag: Some(template_tag),
        }
    }
}

impl ConstraintSynthesizer<Fr> for TwoTierMembershipCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        // === Public inputs, fixed order ===
        let district_root_var = FpVar::new_input(cs.clone(), || {
            self.district_root.ok_or(SynthesisError::AssignmentMissing)
        })?;
        let global_root_var = FpVar::new_input(cs.clone(), || {
            self.global_root.ok_or(SynthesisError::AssignmentMissing)
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
        let leaf_index_var = FpVar::new_witness(cs.clone(), || {
            self.leaf_index
                .map(Fr::from)
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let district_index_var = FpVar::new_witness(cs.clone(), || {
            self.district_index
                .map(Fr::from)
                .ok_or(SynthesisError::AssignmentMissing)
        })?;
        let template_var = FpVar::new_witness(cs.clone(), || {
            self.template_tag.ok_or(SynthesisError::AssignmentMissing)
        })?;

        let leaf_path = self
            .leaf_path
            .as_ref()
            .ok_or(SynthesisError::AssignmentMissing)?;
        let leaf_path_var = MerklePathVar::new_witness(cs.clone(), leaf_path)?;

        let global_path = self
            .global_path
            .as_ref()
            .ok_or(SynthesisError::AssignmentMissing)?;
        let global_path_var = MerklePathVar::new_witness(cs.clone(), global_path)?;

        // === Tier 1: identity leaf folds to the district root ===
        let leaf_var = hash_single_var(&identity_var)?;
        let computed_district_root =
            compute_root_from_path(cs.clone(), &leaf_var, &leaf_index_var, &leaf_path_var)?;
        computed_district_root.enforce_equal(&district_root_var)?;

        // === Tier 2: the district root is itself a leaf of the global
        // registry tree; same verifier, different fixed depth ===
        let computed_global_root = compute_root_from_path(
            cs.clone(),
            &computed_district_root,
            &district_index_var,
            &global_path_var,
        )?;
        computed_global_root.enforce_equal(&global_root_var)?;

        // === Nullifier binding ===
        let computed_nullifier =
            derive_nullifier_var(&identity_var, &action_id_var, &template_var)?;
        computed_nullifier.enforce_equal(&nullifier_var)?;

        Ok(())
    }
}
