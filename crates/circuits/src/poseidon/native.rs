//! Native Poseidon implementation (outside circuits).
//!
//! Used to build Merkle trees, precompute witness tuples, and produce the
//! reference values the in-circuit gadgets are validated against.

use ark_bn254::Fr;
use ark_ff::Field;
use rayon::prelude::*;

use super::constants::{
    mds_matrix, round_constants, DOMAIN_NULLIFIER, DOMAIN_PAIR, DOMAIN_SINGLE, FULL_ROUNDS,
    PARTIAL_ROUNDS, WIDTH,
};

/// The x^5 S-box.
fn sbox(x: Fr) -> Fr {
    let x2 = x.square();
    let x4 = x2.square();
    x4 * x
}

/// Multiply the state by the MDS matrix.
fn apply_mds(state: &mut [Fr; WIDTH]) {
    let mds = mds_matrix();
    let mut next = [Fr::from(0u64); WIDTH];
    for (i, row) in mds.iter().enumerate() {
        for (j, entry) in row.iter().enumerate() {
            next[i] += *entry * state[j];
        }
    }
    *state = next;
}

/// Execute the full Poseidon permutation.
///
/// Round structure: add round constants, S-box (all elements in full
/// rounds, capacity element only in partial rounds), MDS mix. The first and
/// last `FULL_ROUNDS / 2` rounds are full.
pub(crate) fn permute(state: &mut [Fr; WIDTH]) {
    let half_full = FULL_ROUNDS / 2;
    let constants = round_constants();

    for (round, row) in constants.iter().enumerate() {
        for (slot, c) in state.iter_mut().zip(row.iter()) {
            *slot += c;
        }

        let full = round < half_full || round >= half_full + PARTIAL_ROUNDS;
        if full {
            for slot in state.iter_mut() {
                *slot = sbox(*slot);
            }
        } else {
            state[0] = sbox(state[0]);
        }

        apply_mds(state);
    }
}

/// Hash a single field element.
///
/// Entry point for leaf hashing. The capacity element carries the arity
/// tag, so this can never collide with `hash_pair(x, 0)`.
pub fn hash_single(input: Fr) -> Fr {
    let mut state = [Fr::from(DOMAIN_SINGLE), input, Fr::from(0u64)];
    permute(&mut state);
    state[1]
}

/// Hash an ordered pair of field elements.
///
/// Entry point for internal tree nodes. Order matters:
/// `hash_pair(a, b) != hash_pair(b, a)` for `a != b`, which is what lets a
/// Merkle path encode left vs right.
pub fn hash_pair(left: Fr, right: Fr) -> Fr {
    let mut state = [Fr::from(DOMAIN_PAIR), left, right];
    permute(&mut state);
    state[1]
}

/// Hash the nullifier triple.
///
/// Entry point for nullifier derivation, distinct from both leaf and node
/// hashing. Absorbs `(a, b)` in the first block and `c` in the second.
pub fn hash_nullifier(a: Fr, b: Fr, c: Fr) -> Fr {
    let mut state = [Fr::from(DOMAIN_NULLIFIER), a, b];
    permute(&mut state);
    state[1] += c;
    permute(&mut state);
    state[1]
}

/// Hash many ordered pairs in parallel.
///
/// Tree construction hashes one pair per internal node; this is the
/// dominant cost of preparing a new district, so it fans out across cores.
pub fn batch_hash_pairs(pairs: &[(Fr, Fr)]) -> Vec<Fr> {
    pairs
        .par_iter()
        .map(|&(left, right)| hash_pair(left, right))
        .collect()
}
