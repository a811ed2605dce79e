//! ZK circuits for private district membership proofs.
//!
//! This crate provides:
//! - `DistrictMembershipCircuit`: prove identity residency in a district tree
//! - `TwoTierMembershipCircuit`: additionally prove the district is
//!   registered in the global tree of districts
//! - Native Poseidon hashing and Merkle tree construction for witness
//!   precomputation and cross-validation

pub mod config;
pub mod encoding;
pub mod membership;
pub mod merkle;
pub mod nullifier;
pub mod poseidon;
pub mod two_tier;


pub use config::{TreeDepth, CIRCUIT_VERSION, DEPTH_FEDERAL, DEPTH_GLOBAL, DEPTH_MUNICIPAL,
                 DEPTH_STATE};
pub use encoding::{fr_from_hex, fr_to_hex, EncodingError};
pub use membership::DistrictMembershipCircuit;
pub use merkle::{MerkleError, MerklePath, MerkleTree};
pub use nullifier::derive_nullifier;
pub use poseidon::{batch_hash_pairs, hash_pair, hash_single};
pub use two_tier::TwoTierMembershipCircuit;

use ark_bn254::Fr;

/// Common type aliases
pub type ConstraintF = Fr;
