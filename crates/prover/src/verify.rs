//! Local proof verification.
//!
//! Verification is a pure function of (proof, public inputs, verifying
//! key). In production the same check runs in the on-chain pairing
//! verifier; this implementation exists for tests and for the proof
//! server's self-check.

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, Proof, VerifyingKey};
use ark_snark::SNARK;
use thiserror::Error;

/// Errors during verification
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("Verification failed: {0}")]
    Verification(String),
}

/// Verify a single-tier membership proof against its public tuple.
pub fn verify_membership(
    vk: &VerifyingKey<Bn254>,
    proof: &Proof<Bn254>,
    district_root: Fr,
    nullifier: Fr,
    action_id: Fr,
) -> Result<bool, VerifyError> {
    let public_inputs = vec![district_root, nullifier, action_id];

    Groth16::<Bn254>::verify(vk, &public_inputs, proof)
        .map_err(|e| VerifyError::Verification(e.to_string()))
}

/// Verify a two-tier membership proof against its public tuple.
pub fn verify_two_tier(
    vk: &VerifyingKey<Bn254>,
    proof: &Proof<Bn254>,
    district_root: Fr,
    global_root: Fr,
    nullifier: Fr,
    action_id: Fr,
) -> Result<bool, VerifyError> {
    let public_inputs = vec![district_root, global_root, nullifier, action_id];

    Groth16::<Bn254>::verify(vk, &public_inputs, proof)
        .map_err(|e| VerifyError::Verification(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prove::prove_membership;
    use crate::setup::setup_membership;
    use ark_std::rand::{rngs::StdRng, SeedableRng};
    use district_circuits::{hash_single, MerkleTree};

    const DEPTH: usize = 3;

    #[test]
    fn test_verify_membership_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let keys = setup_membership(&mut rng, DEPTH).unwrap();

        let identities: Vec<Fr> = (5000..5008u64).map(Fr::from).collect();
        let leaves: Vec<Fr> = identities.iter().map(|&id| hash_single(id)).collect();
        let tree = MerkleTree::from_leaves(&leaves, DEPTH).unwrap();

        let action_id = Fr::from(555u64);
        let result = prove_membership(
            &keys.proving_key,
            &tree,
            identities[4],
            4,
            action_id,
            Fr::from(1u64),
        )
        .unwrap();

        let valid = verify_membership(
            &keys.verifying_key,
            &result.proof,
            result.public_inputs[0],
            result.public_inputs[1],
            result.public_inputs[2],
        )
        .unwrap();
        assert!(valid);
    }

    #[test]
    fn test_verify_rejects_wrong_nullifier() {
        let mut rng = StdRng::seed_from_u64(42);
        let keys = setup_membership(&mut rng, DEPTH).unwrap();

        let identities: Vec<Fr> = (5000..5008u64).map(Fr::from).collect();
        let leaves: Vec<Fr> = identities.iter().map(|&id| hash_single(id)).collect();
        let tree = MerkleTree::from_leaves(&leaves, DEPTH).unwrap();

        let result = prove_membership(
            &keys.proving_key,
            &tree,
            identities[4],
            4,
            Fr::from(555u64),
            Fr::from(1u64),
        )
        .unwrap();

        let valid = verify_membership(
            &keys.verifying_key,
            &result.proof,
            result.public_inputs[0],
            Fr::from(12345u64),
            result.public_inputs[2],
        )
        .unwrap();
        assert!(!valid);
    }
}
