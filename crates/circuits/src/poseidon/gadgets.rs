//! Poseidon R1CS gadgets for in-circuit hashing.
//!
//! Mirrors `native.rs` round for round. The linear layers (round constants,
//! MDS mix) cost no constraints; each S-box costs three multiplications, so
//! one permutation is roughly 8 * 9 + 57 * 3 constraints.

use ark_bn254::Fr;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::fields::FieldVar;
use ark_relations::r1cs::SynthesisError;

use super::constants::{
    mds_matrix, round_constants, DOMAIN_NULLIFIER, DOMAIN_PAIR, DOMAIN_SINGLE, FULL_ROUNDS,
    PARTIAL_ROUNDS, WIDTH,
};

/// The x^5 S-box in-circuit. Costs 3 multiplication constraints.
fn sbox_var(x: &FpVar<Fr>) -> Result<FpVar<Fr>, SynthesisError> {
    let x2 = x.square()?;
    let x4 = x2.square()?;
    Ok(&x4 * x)
}

/// Multiply the state by the MDS matrix. Linear, no constraints.
fn apply_mds_var(state: &mut [FpVar<Fr>; WIDTH]) {
    let mds = mds_matrix();
    let mut next: [FpVar<Fr>; WIDTH] =
        [FpVar::zero(), FpVar::zero(), FpVar::zero()];
    for (i, row) in mds.iter().enumerate() {
        for (j, entry) in row.iter().enumerate() {
            next[i] += &state[j] * FpVar::constant(*entry);
        }
    }
    *state = next;
}

/// Execute the full Poseidon permutation in-circuit.
fn permute_var(state: &mut [FpVar<Fr>; WIDTH]) -> Result<(), SynthesisError> {
    let half_full = FULL_ROUNDS / 2;
    let constants = round_constants();

    for (round, row) in constants.iter().enumerate() {
        for (slot, c) in state.iter_mut().zip(row.iter()) {
            *slot += FpVar::constant(*c);
        }

        let full = round < half_full || round >= half_full + PARTIAL_ROUNDS;
        if full {
            for slot in state.iter_mut() {
                *slot = sbox_var(slot)?;
            }
        } else {
            state[0] = sbox_var(&state[0])?;
        }

        apply_mds_var(state);
    }

    Ok(())
}

/// Hash a single field element in-circuit.
pub fn hash_single_var(input: &FpVar<Fr>) -> Result<FpVar<Fr>, SynthesisError> {
    let mut state = [
        FpVar::constant(Fr::from(DOMAIN_SINGLE)),
        input.clone(),
        FpVar::zero(),
    ];
    permute_var(&mut state)?;
    Ok(state[1].clone())
}

/// Hash an ordered pair of field elements in-circuit.
pub fn hash_pair_var(left: &FpVar<Fr>, right: &FpVar<Fr>) -> Result<FpVar<Fr>, SynthesisError> {
    let mut state = [
        FpVar::constant(Fr::from(DOMAIN_PAIR)),
        left.clone(),
        right.clone(),
    ];
    permute_var(&mut state)?;
    Ok(state[1].clone())
}

/// Hash the nullifier triple in-circuit.
pub fn hash_nullifier_var(
    a: &FpVar<Fr>,
    b: &FpVar<Fr>,
    c: &FpVar<Fr>,
) -> Result<FpVar<Fr>, SynthesisError> {
    let mut state = [
        FpVar::constant(Fr::from(DOMAIN_NULLIFIER)),
        a.clone(),
        b.clone(),
    ];
    permute_var(&mut state)?;
    state[1] += c;
    permute_var(&mut state)?;
    Ok(state[1].clone())
}
