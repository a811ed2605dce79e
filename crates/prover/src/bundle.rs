//! Versioned proof bundles for transport.
//!
//! The verifier artifact is derived from a fixed circuit shape, so every
//! persisted or transmitted proof carries the circuit version it was
//! generated for. Decoding rejects versions outside the supported set;
//! version 1 (the retired free-direction-bit shape) is never accepted.

use ark_bn254::{Bn254, Fr};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use district_circuits::{fr_from_hex, fr_to_hex, EncodingError, CIRCUIT_VERSION};

use crate::prove::{ProofWithInputs, ProveError};

/// Errors from bundle encoding and decoding
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("unsupported circuit version {0}")]
    UnsupportedVersion(u16),
    #[error("field encoding: {0}")]
    Encoding(#[from] EncodingError),
    #[error("proof encoding: {0}")]
    Proof(String),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A proof with its public inputs in wire form.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProofBundle {
    /// Circuit shape this proof was generated for
    pub version: u16,
    /// Compressed Groth16 proof, hex encoded
    pub proof: String,
    /// Public inputs in the fixed interface order, hex encoded
    pub public_inputs: Vec<String>,
}

impl ProofBundle {
    /// Wrap a freshly generated proof in the current-version wire form.
    pub fn new(proof_with_inputs: &ProofWithInputs) -> Result<Self, BundleError> {
        let proof_bytes = proof_with_inputs
            .serialize_proof()
            .map_err(|e| BundleError::Proof(e.to_string()))?;

        Ok(Self {
            version: CIRCUIT_VERSION,
            proof: format!("0x{}", hex::encode(proof_bytes)),
            public_inputs: proof_with_inputs
                .public_inputs
                .iter()
                .map(fr_to_hex)
                .collect(),
        })
    }

    /// Decode back into a proof and public inputs, rejecting unsupported
    /// versions and malformed hex before anything reaches the verifier.
    pub fn decode(&self) -> Result<(ark_groth16::Proof<Bn254>, Vec<Fr>), BundleError> {
        if self.version != CIRCUIT_VERSION {
            return Err(BundleError::UnsupportedVersion(self.version));
        }

        let body = self
            .proof
            .strip_prefix("0x")
            .ok_or(BundleError::Encoding(EncodingError::MissingPrefix))?;
        let proof_bytes =
            hex::decode(body).map_err(|e| BundleError::Proof(e.to_string()))?;
        let proof = ProofWithInputs::deserialize_proof(&proof_bytes)
            .map_err(|e: ProveError| BundleError::Proof(e.to_string()))?;

        let public_inputs = self
            .public_inputs
            .iter()
            .map(|s| fr_from_hex(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((proof, public_inputs))
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, BundleError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        Ok(serde_json::from_str(json)?)
    }
}
