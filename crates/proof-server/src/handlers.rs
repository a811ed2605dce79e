//! HTTP request handlers for proof generation.
//!
//! Hex parsing happens at the boundary: a malformed field element is a 400
//! with a typed error body, and never reaches the prover. Each request
//! builds its own tree and proof; requests share only the immutable keys,
//! so independent proofs run in parallel.

use std::sync::Arc;

use ark_bn254::Fr;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use district_circuits::{fr_from_hex, fr_to_hex, nullifier, MerkleTree, TreeDepth, DEPTH_GLOBAL,
                        DEPTH_STATE};
use district_prover::{prove, ProofBundle};

use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn bad_request(error: String) -> axum::response::Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

/// Jurisdiction tier in API requests
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierRequest {
    Municipal,
    State,
    Federal,
}

impl From<TierRequest> for TreeDepth {
    fn from(tier: TierRequest) -> Self {
        match tier {
            TierRequest::Municipal => TreeDepth::Municipal,
            TierRequest::State => TreeDepth::State,
            TierRequest::Federal => TreeDepth::Federal,
        }
    }
}

/// Parse a list of hex field elements
fn parse_fr_list(items: &[String]) -> Result<Vec<Fr>, String> {
    items
        .iter()
        .map(|s| fr_from_hex(s).map_err(|e| e.to_string()))
        .collect()
}

// ============ Single-tier membership ============

#[derive(Deserialize)]
pub struct MembershipRequest {
    pub tier: TierRequest,
    /// Leaves of the district tree, as published by the boundary pipeline
    pub leaves: Vec<String>,
    pub identity_commitment: String,
    pub leaf_index: u64,
    pub action_id: String,
    pub template_tag: String,
}

pub async fn prove_membership(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(req): Json<MembershipRequest>,
) -> impl IntoResponse {
    let leaves = match parse_fr_list(&req.leaves) {
        Ok(l) => l,
        Err(e) => return bad_request(e),
    };
    let identity = match fr_from_hex(&req.identity_commitment) {
        Ok(v) => v,
        Err(e) => return bad_request(e.to_string()),
    };
    let action_id = match fr_from_hex(&req.action_id) {
        Ok(v) => v,
        Err(e) => return bad_request(e.to_string()),
    };
    let template_tag = match fr_from_hex(&req.template_tag) {
        Ok(v) => v,
        Err(e) => return bad_request(e.to_string()),
    };

    let tier: TreeDepth = req.tier.into();
    let tree = match MerkleTree::from_leaves(&leaves, tier.depth()) {
        Ok(t) => t,
        Err(e) => return bad_request(e.to_string()),
    };

    let state = state.read().await;
    let keys = state.keys.for_tier(tier);

    match prove::prove_membership(
        &keys.proving_key,
        &tree,
        identity,
        req.leaf_index,
        action_id,
        template_tag,
    ) {
        Ok(proof_with_inputs) => match ProofBundle::new(&proof_with_inputs) {
            Ok(bundle) => (StatusCode::OK, Json(bundle)).into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response(),
        },
        Err(e) => bad_request(e.to_string()),
    }
}

// ============ Two-tier membership ============

#[derive(Deserialize)]
pub struct TwoTierRequest {
    /// Leaves of the district tree (state-tier depth)
    pub district_leaves: Vec<String>,
    pub leaf_index: u64,
    /// District roots registered in the global tree
    pub district_roots: Vec<String>,
    pub district_index: u64,
    pub identity_commitment: String,
    pub action_id: String,
    pub template_tag: String,
}

pub async fn prove_two_tier(
    State(state): State<Arc<RwLock<AppState>>>,
    Json(req): Json<TwoTierRequest>,
) -> impl IntoResponse {
    let district_leaves = match parse_fr_list(&req.district_leaves) {
        Ok(l) => l,
        Err(e) => return bad_request(e),
    };
    let district_roots = match parse_fr_list(&req.district_roots) {
        Ok(l) => l,
        Err(e) => return bad_request(e),
    };
    let identity = match fr_from_hex(&req.identity_commitment) {
        Ok(v) => v,
        Err(e) => return bad_request(e.to_string()),
    };
    let action_id = match fr_from_hex(&req.action_id) {
        Ok(v) => v,
        Err(e) => return bad_request(e.to_string()),
    };
    let template_tag = match fr_from_hex(&req.template_tag) {
        Ok(v) => v,
        Err(e) => return bad_request(e.to_string()),
    };

    let district_tree = match MerkleTree::from_leaves(&district_leaves, DEPTH_STATE) {
        Ok(t) => t,
        Err(e) => return bad_request(e.to_string()),
    };
    let global_tree = match MerkleTree::from_leaves(&district_roots, DEPTH_GLOBAL) {
        Ok(t) => t,
        Err(e) => return bad_request(e.to_string()),
    };

    let state = state.read().await;

    match prove::prove_two_tier(
        &state.keys.two_tier.proving_key,
        &district_tree,
        &global_tree,
        identity,
        req.leaf_index,
        req.district_index,
        action_id,
        template_tag,
    ) {
        Ok(proof_with_inputs) => match ProofBundle::new(&proof_with_inputs) {
            Ok(bundle) => (StatusCode::OK, Json(bundle)).into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response(),
        },
        Err(e) => bad_request(e.to_string()),
    }
}

// ============ Utilities ============

#[derive(Deserialize)]
pub struct NullifierRequest {
    pub identity_commitment: String,
    pub action_id: String,
    pub template_tag: String,
}

#[derive(Serialize)]
pub struct NullifierResponse {
    pub nullifier: String,
}

/// Derive the nullifier a proof for this triple will carry. Lets a client
/// check the registry for reuse before paying for proof generation.
pub async fn derive_nullifier_handler(
    Json(req): Json<NullifierRequest>,
) -> impl IntoResponse {
    let identity = match fr_from_hex(&req.identity_commitment) {
        Ok(v) => v,
        Err(e) => return bad_request(e.to_string()),
    };
    let action_id = match fr_from_hex(&req.action_id) {
        Ok(v) => v,
        Err(e) => return bad_request(e.to_string()),
    };
    let template_tag = match fr_from_hex(&req.template_tag) {
        Ok(v) => v,
        Err(e) => return bad_request(e.to_string()),
    };

    let nullifier = nullifier::derive_nullifier(identity, action_id, template_tag);

    (
        StatusCode::OK,
        Json(NullifierResponse {
            nullifier: fr_to_hex(&nullifier),
        }),
    )
        .into_response()
}
