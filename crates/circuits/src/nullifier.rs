//! Nullifier derivation.
//!
//! A nullifier is the public, deterministic token that lets the external
//! registry detect reuse of one identity for one action, without learning
//! the identity. It is derived with a hash entry point distinct from both
//! leaf and node hashing, so nullifier computation can never be confused
//! with tree computation.
//!
//! The template tag is included because action ids are assigned by external
//! campaigns: two unrelated campaigns picking the same numeric action id
//! would otherwise produce identical nullifiers for one identity, revealing
//! that the same person acted in both.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_relations::r1cs::SynthesisError;

use crate::poseidon::{hash_nullifier, hash_nullifier_var};

/// Derive the nullifier for an (identity, action, template) triple.
pub fn derive_nullifier(identity_commitment: Fr, action_id: Fr, template_tag: Fr) -> Fr {
    hash_nullifier(identity_commitment, action_id, template_tag)
}

/// Derive the nullifier in-circuit.
pub fn derive_nullifier_var(
    identity_commitment: &FpVar<Fr>,
    action_id: &FpVar<Fr>,
    template_tag: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    hash_nullifier_var(identity_commitment, action_id, template_tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_r1cs_std::alloc::AllocVar;
    use ark_r1cs_std::R1CSVar;
    use ark_relations::r1cs::ConstraintSystem;
    use ark_std::rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn test_determinism() {
        let id = Fr::from(1001u64);
        let action = Fr::from(555u64);
        let template = Fr::from(1u64);

        assert_eq!(
            derive_nullifier(id, action, template),
            derive_nullifier(id, action, template)
        );
    }

    #[test]
    fn test_different_actions_unlinkable() {
        let id = Fr::from(1001u64);
        let template = Fr::from(1u64);

        let a = derive_nullifier(id, Fr::from(100u64), template);
        let b = derive_nullifier(id, Fr::from(200u64), template);
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_templates_unlinkable() {
        // Same numeric action id issued by two campaign templates must not
        // collide for one identity.
        let id = Fr::from(1001u64);
        let action = Fr::from(555u64);

        let a = derive_nullifier(id, action, Fr::from(1u64));
        let b = derive_nullifier(id, action, Fr::from(2u64));
        assert_ne!(a, b);
    }

    #[test]
    fn test_different_identities_distinct() {
        let action = Fr::from(555u64);
        let template = Fr::from(1u64);

        let a = derive_nullifier(Fr::from(1u64), action, template);
        let b = derive_nullifier(Fr::from(2u64), action, template);
        assert_ne!(a, b);
    }

    #[test]
    fn test_no_collisions_over_many_samples() {
        // Statistical check: 1000 random triples, no collisions expected.
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();

        for _ in 0..1000 {
            let id = Fr::from(rng.gen::<u64>());
            let action = Fr::from(rng.gen::<u64>());
            let template = Fr::from(rng.gen::<u32>() as u64);

            let nullifier = derive_nullifier(id, action, template);
            assert!(seen.insert(nullifier), "nullifier collision");
        }
    }

    #[test]
    fn test_gadget_matches_native() {
        let cs = ConstraintSystem::<Fr>::new_ref();

        let id = Fr::from(42u64);
        let action = Fr::from(9000u64);
        let template = Fr::from(3u64);

        let id_var = FpVar::new_witness(cs.clone(), || Ok(id)).unwrap();
        let action_var = FpVar::new_witness(cs.clone(), || Ok(action)).unwrap();
        let template_var = FpVar::new_witness(cs.clone(), || Ok(template)).unwrap();

        let out = derive_nullifier_var(&id_var, &action_var, &template_var).unwrap();

        assert!(cs.is_satisfied().unwrap());
        assert_eq!(out.value().unwrap(), derive_nullifier(id, action, template));
    }
}
