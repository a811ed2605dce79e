//! Proof generation for district membership circuits.
//!
//! Witness material is validated against the tree before any constraints
//! are built: a malformed or mismatched witness fails fast with a typed
//! error instead of surfacing as an unsatisfiable constraint system deep in
//! the prover. One call builds one proof on the calling thread; independent
//! calls share nothing and may run in parallel.

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, ProvingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use district_circuits::{
    derive_nullifier, hash_single, DistrictMembershipCircuit, MerkleTree,
    TwoTierMembershipCircuit,
};

/// Errors during proof generation
#[derive(Error, Debug)]
pub enum ProveError {
    #[error("Proof generation failed: {0}")]
    ProofGeneration(String),
    #[error("Invalid witness: {0}")]
    InvalidWitness(String),
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// A proof with its public inputs, in the fixed interface order
#[derive(Clone)]
pub struct ProofWithInputs {
    pub proof: Proof<Bn254>,
    pub public_inputs: Vec<Fr>,
}

impl ProofWithInputs {
    /// Serialize proof to bytes
    pub fn serialize_proof(&self) -> Result<Vec<u8>, ProveError> {
        let mut bytes = Vec::new();
        self.proof
            .serialize_compressed(&mut bytes)
            .map_err(|e| ProveError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    /// Deserialize proof from bytes
    pub fn deserialize_proof(bytes: &[u8]) -> Result<Proof<Bn254>, ProveError> {
        Proof::deserialize_compressed(bytes).map_err(|e| ProveError::Serialization(e.to_string()))
    }
}

/// Generate a single-tier membership proof.
///
/// Public inputs: `[district_root, nullifier, action_id]`.
pub fn prove_membership(
    pk: &ProvingKey<Bn254>,
    tree: &MerkleTree,
    identity_commitment: Fr,
    leaf_index: u64,
    action_id: Fr,
    template_tag: Fr,
) -> Result<ProofWithInputs, ProveError> {
    let path = tree
        .proof(leaf_index)
        .map_err(|e| ProveError::InvalidWitness(e.to_string()))?;

    let enrolled = tree
        .leaf(leaf_index)
        .map_err(|e| ProveError::InvalidWitness(e.to_string()))?;
    if enrolled != hash_single(identity_commitment) {
        return Err(ProveError::InvalidWitness(format!(
            "identity is not enrolled at index {}",
            leaf_index
        )));
    }

    let nullifier = derive_nullifier(identity_commitment, action_id, template_tag);

    let circuit = DistrictMembershipCircuit::new(
        identity_commitment,
        leaf_index,
        path,
        tree.root(),
        action_id,
        template_tag,
    );

    let mut rng = StdRng::from_entropy();
    let proof = Groth16::<Bn254>::prove(pk, circuit, &mut rng)
        .map_err(|e| ProveError::ProofGeneration(e.to_string()))?;

    let public_inputs = vec![tree.root(), nullifier, action_id];

    Ok(ProofWithInputs {
        proof,
        public_inputs,
    })
}

/// Generate a two-tier membership proof.
///
/// Public inputs: `[district_root, global_root, nullifier, action_id]`.
#[allow(clippy::too_many_arguments)]
pub fn prove_two_tier(
    pk: &ProvingKey<Bn254>,
    district_tree: &MerkleTree,
    global_tree: &MerkleTree,
    identity_commitment: Fr,
    leaf_index: u64,
    district_index: u64,
    action_id: Fr,
    template_tag: Fr,
) -> Result<ProofWithInputs, ProveError> {
    let leaf_path = district_tree
        .proof(leaf_index)
        .map_err(|e| ProveError::InvalidWitness(e.to_string()))?;
    let global_path = global_tree
        .proof(district_index)
        .map_err(|e| ProveError::InvalidWitness(e.to_string()))?;

    let enrolled = district_tree
        .leaf(leaf_index)
        .map_err(|e| ProveError::InvalidWitness(e.to_string()))?;
    if enrolled != hash_single(identity_commitment) {
        return Err(ProveError::InvalidWitness(format!(
            "identity is not enrolled at index {}",
            leaf_index
        )));
    }

    let registered = global_tree
        .leaf(district_index)
        .map_err(|e| ProveError::InvalidWitness(e.to_string()))?;
    if registered != district_tree.root() {
        return Err(ProveError::InvalidWitness(format!(
            "district is not registered at index {}",
            district_index
        )));
    }

    let nullifier = derive_nullifier(identity_commitment, action_id, template_tag);

    let circuit = TwoTierMembershipCircuit::new(
        identity_commitment,
        leaf_index,
        leaf_path,
        district_tree.root(),
        district_index,
        global_path,
        global_tree.root(),
        action_id,
        template_tag,
    );

    let mut rng = StdRng::from_entropy();
    let proof = Groth16::<Bn254>::prove(pk, circuit, &mut rng)
        .map_err(|e| ProveError::ProofGeneration(e.to_string()))?;

    let public_inputs = vec![
        district_tree.root(),
        global_tree.root(),
        nullifier,
        action_id,
    ];

    Ok(ProofWithInputs {
        proof,
        public_inputs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::setup_membership;
    use ark_std::rand::SeedableRng;

    const DEPTH: usize = 3;

    fn fixture() -> (Vec<Fr>, MerkleTree) {
        let identities: Vec<Fr> = (3000..3008u64).map(Fr::from).collect();
        let leaves: Vec<Fr> = identities.iter().map(|&id| hash_single(id)).collect();
        let tree = MerkleTree::from_leaves(&leaves, DEPTH).unwrap();
        (identities, tree)
    }

    #[test]
    fn test_prove_membership() {
        let mut rng = StdRng::seed_from_u64(42);
        let keys = setup_membership(&mut rng, DEPTH).unwrap();

        let (identities, tree) = fixture();

        let result = prove_membership(
            &keys.proving_key,
            &tree,
            identities[2],
            2,
            Fr::from(555u64),
            Fr::from(1u64),
        );
        assert!(result.is_ok());

        let proof_with_inputs = result.unwrap();
        assert_eq!(proof_with_inputs.public_inputs.len(), 3);
        assert_eq!(proof_with_inputs.public_inputs[0], tree.root());
    }

    #[test]
    fn test_prove_rejects_unenrolled_identity() {
        let mut rng = StdRng::seed_from_u64(42);
        let keys = setup_membership(&mut rng, DEPTH).unwrap();

        let (_, tree) = fixture();

        let result = prove_membership(
            &keys.proving_key,
            &tree,
            Fr::from(9999u64),
            2,
            Fr::from(555u64),
            Fr::from(1u64),
        );
        assert!(matches!(result, Err(ProveError::InvalidWitness(_))));
    }

    #[test]
    fn test_prove_rejects_out_of_range_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let keys = setup_membership(&mut rng, DEPTH).unwrap();

        let (identities, tree) = fixture();

        let result = prove_membership(
            &keys.proving_key,
            &tree,
            identities[0],
            8,
            Fr::from(555u64),
            Fr::from(1u64),
        );
        assert!(matches!(result, Err(ProveError::InvalidWitness(_))));
    }
}
