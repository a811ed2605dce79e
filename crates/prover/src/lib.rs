//! Proof generation library for district membership.
//!
//! This crate provides utilities for:
//! - Trusted setup (generating proving and verifying keys per tree depth)
//! - Proof generation for the single- and two-tier membership circuits
//! - Local proof verification (for testing)
//! - Versioned proof bundles for transport

pub mod bundle;
pub mod prove;
pub mod setup;
pub mod verify;

pub use bundle::{BundleError, ProofBundle};
pub use prove::{prove_membership, prove_two_tier, ProofWithInputs, ProveError};
pub use setup::{setup_all_circuits, setup_membership, setup_two_tier, CircuitKeyPair,
                CircuitKeys, SetupError};
pub use verify::{verify_membership, verify_two_tier, VerifyError};

use ark_bn254::Fr;

/// Common field type for all operations
pub type ConstraintF = Fr;
