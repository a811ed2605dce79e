//! Export verifying keys for on-chain verifier deployment.
//!
//! Generates or loads the circuit keys and writes the verifying keys as hex
//! strings plus a JSON artifact for scripting.

use std::path::Path;

use district_prover::setup::{setup_all_circuits, CircuitKeys};

fn main() {
    let keys_dir = Path::new("keys");

    println!("Loading or generating circuit keys...");

    let keys = if keys_dir.exists() {
        println!("Loading existing keys from {:?}", keys_dir);
        CircuitKeys::load_from_directory(keys_dir).expect("Failed to load keys")
    } else {
        println!("Running trusted setup (this may take a while)...");
        let keys = setup_all_circuits().expect("Failed to setup circuits");
        keys.save_to_directory(keys_dir).expect("Failed to save keys");
        println!("Keys saved to {:?}", keys_dir);
        keys
    };

    println!("\n=== Verifying Keys for Deployment ===\n");

    let municipal_vk = keys.municipal.serialize_vk().unwrap();
    let state_vk = keys.state.serialize_vk().unwrap();
    let federal_vk = keys.federal.serialize_vk().unwrap();
    let two_tier_vk = keys.two_tier.serialize_vk().unwrap();

    println!("Municipal VK ({} bytes):", municipal_vk.len());
    println!("0x{}\n", hex::encode(&municipal_vk));

    println!("State VK ({} bytes):", state_vk.len());
    println!("0x{}\n", hex::encode(&state_vk));

    println!("Federal VK ({} bytes):", federal_vk.len());
    println!("0x{}\n", hex::encode(&federal_vk));

    println!("TwoTier VK ({} bytes):", two_tier_vk.len());
    println!("0x{}\n", hex::encode(&two_tier_vk));

    // Also export as JSON for scripting
    let json = serde_json::json!({
        "circuit_version": district_circuits::CIRCUIT_VERSION,
        "municipal_vk": format!("0x{}", hex::encode(&municipal_vk)),
        "state_vk": format!("0x{}", hex::encode(&state_vk)),
        "federal_vk": format!("0x{}", hex::encode(&federal_vk)),
        "two_tier_vk": format!("0x{}", hex::encode(&two_tier_vk)),
    });

    let json_path = keys_dir.join("verifying_keys.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&json).unwrap())
        .expect("Failed to write JSON");
    println!("JSON exported to {:?}", json_path);
}
