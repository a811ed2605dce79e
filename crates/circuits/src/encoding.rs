//! Hex bridge for field elements crossing a process or language boundary.
//!
//! The wire form is a `0x`-prefixed, fixed-length 64-hex-character string,
//! big-endian. Malformed strings are rejected here, before anything reaches
//! the field-arithmetic layer; values at or above the field modulus are an
//! error, never silently reduced.

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};
use num_bigint::BigUint;
use thiserror::Error;

/// Expected number of hex characters after the prefix (32 bytes).
const HEX_LEN: usize = 64;

/// Errors from hex decoding.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
    #[error("missing 0x prefix")]
    MissingPrefix,
    #[error("expected {HEX_LEN} hex characters, got {0}")]
    WrongLength(usize),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("value is not a canonical field element (>= modulus)")]
    OutOfRange,
}

/// Parse a `0x`-prefixed 64-character hex string into a field element.
pub fn fr_from_hex(hex_str: &str) -> Result<Fr, EncodingError> {
    let body = hex_str
        .strip_prefix("0x")
        .ok_or(EncodingError::MissingPrefix)?;

    if body.len() != HEX_LEN {
        return Err(EncodingError::WrongLength(body.len()));
    }

    let bytes = hex::decode(body).map_err(|e| EncodingError::InvalidHex(e.to_string()))?;

    let value = BigUint::from_bytes_be(&bytes);
    let modulus = BigUint::from_bytes_be(&<Fr as PrimeField>::MODULUS.to_bytes_be());
    if value >= modulus {
        return Err(EncodingError::OutOfRange);
    }

    Ok(Fr::from_be_bytes_mod_order(&bytes))
}

/// Encode a field element as a `0x`-prefixed 64-character hex string.
pub fn fr_to_hex(value: &Fr) -> String {
    let bytes = value.into_bigint().to_bytes_be();
    format!("0x{}", hex::encode(bytes))
}
