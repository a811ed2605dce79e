//! Trusted setup utilities for generating proving and verifying keys.
//!
//! Setup runs once per circuit shape (variant + depth) and produces
//! long-lived key artifacts; a depth change is a new shape and requires a
//! fresh setup.

use std::path::Path;

use ark_bn254::Bn254;
use ark_groth16::{Groth16, ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_snark::SNARK;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use district_circuits::{
    DistrictMembershipCircuit, TreeDepth, TwoTierMembershipCircuit, DEPTH_GLOBAL, DEPTH_STATE,
};

/// Errors that can occur during setup
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Circuit setup failed: {0}")]
    CircuitSetup(String),
    #[error("Serialization failed: {0}")]
    Serialization(String),
    #[error("Deserialization failed: {0}")]
    Deserialization(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Keys for a single circuit shape
#[derive(Clone)]
pub struct CircuitKeyPair {
    pub proving_key: ProvingKey<Bn254>,
    pub verifying_key: VerifyingKey<Bn254>,
}

impl CircuitKeyPair {
    /// Serialize proving key to bytes
    pub fn serialize_pk(&self) -> Result<Vec<u8>, SetupError> {
        let mut bytes = Vec::new();
        self.proving_key
            .serialize_compressed(&mut bytes)
            .map_err(|e| SetupError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    /// Serialize verifying key to bytes
    pub fn serialize_vk(&self) -> Result<Vec<u8>, SetupError> {
        let mut bytes = Vec::new();
        self.verifying_key
            .serialize_compressed(&mut bytes)
            .map_err(|e| SetupError::Serialization(e.to_string()))?;
        Ok(bytes)
    }

    /// Deserialize proving key from bytes
    pub fn deserialize_pk(bytes: &[u8]) -> Result<ProvingKey<Bn254>, SetupError> {
        ProvingKey::deserialize_compressed(bytes)
            .map_err(|e| SetupError::Deserialization(e.to_string()))
    }

    /// Deserialize verifying key from bytes
    pub fn deserialize_vk(bytes: &[u8]) -> Result<VerifyingKey<Bn254>, SetupError> {
        VerifyingKey::deserialize_compressed(bytes)
            .map_err(|e| SetupError::Deserialization(e.to_string()))
    }

    fn save(&self, dir: &Path, name: &str) -> Result<(), SetupError> {
        std::fs::write(dir.join(format!("{name}.pk")), self.serialize_pk()?)?;
        std::fs::write(dir.join(format!("{name}.vk")), self.serialize_vk()?)?;
        Ok(())
    }

    fn load(dir: &Path, name: &str) -> Result<Self, SetupError> {
        Ok(Self {
            proving_key: Self::deserialize_pk(&std::fs::read(dir.join(format!("{name}.pk")))?)?,
            verifying_key: Self::deserialize_vk(&std::fs::read(dir.join(format!("{name}.vk")))?)?,
        })
    }
}

/// Keys for every supported circuit shape: one single-tier circuit per
/// jurisdiction tier, plus the two-tier circuit.
pub struct CircuitKeys {
    pub municipal: CircuitKeyPair,
    pub state: CircuitKeyPair,
    pub federal: CircuitKeyPair,
    pub two_tier: CircuitKeyPair,
}

impl CircuitKeys {
    /// Save all keys to a directory
    pub fn save_to_directory(&self, dir: &Path) -> Result<(), SetupError> {
        std::fs::create_dir_all(dir)?;

        self.municipal.save(dir, "municipal")?;
        self.state.save(dir, "state")?;
        self.federal.save(dir, "federal")?;
        self.two_tier.save(dir, "two_tier")?;

        Ok(())
    }

    /// Load all keys from a directory
    pub fn load_from_directory(dir: &Path) -> Result<Self, SetupError> {
        Ok(Self {
            municipal: CircuitKeyPair::load(dir, "municipal")?,
            state: CircuitKeyPair::load(dir, "state")?,
            federal: CircuitKeyPair::load(dir, "federal")?,
            two_tier: CircuitKeyPair::load(dir, "two_tier")?,
        })
    }

    /// The single-tier key pair for a jurisdiction tier.
    pub fn for_tier(&self, tier: TreeDepth) -> &CircuitKeyPair {
        match tier {
            TreeDepth::Municipal => &self.municipal,
            TreeDepth::State => &self.state,
            TreeDepth::Federal => &self.federal,
        }
    }
}

/// Run trusted setup for every supported circuit shape
pub fn setup_all_circuits() -> Result<CircuitKeys, SetupError> {
    // Fixed seed for reproducible setup (production keys come from a
    // ceremony, not from here)
    let mut rng = StdRng::seed_from_u64(42);

    println!("Setting up municipal membership circuit...");
    let municipal = setup_membership(&mut rng, TreeDepth::Municipal.depth())?;

    println!("Setting up state membership circuit...");
    let state = setup_membership(&mut rng, TreeDepth::State.depth())?;

    println!("Setting up federal membership circuit...");
    let federal = setup_membership(&mut rng, TreeDepth::Federal.depth())?;

    println!("Setting up two-tier membership circuit...");
    let two_tier = setup_two_tier(&mut rng)?;

    Ok(CircuitKeys {
        municipal,
        state,
        federal,
        two_tier,
    })
}

/// Setup the single-tier membership circuit at a given tree depth
pub fn setup_membership(rng: &mut StdRng, depth: usize) -> Result<CircuitKeyPair, SetupError> {
    let circuit = DistrictMembershipCircuit::empty(depth);
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(circuit, rng)
        .map_err(|e| SetupError::CircuitSetup(e.to_string()))?;

    Ok(CircuitKeyPair {
        proving_key: pk,
        verifying_key: vk,
    })
}

/// Setup the two-tier membership circuit (state-depth district trees under
/// the global registry tree)
pub fn setup_two_tier(rng: &mut StdRng) -> Result<CircuitKeyPair, SetupError> {
    let circuit = TwoTierMembershipCircuit::empty(DEPTH_STATE, DEPTH_GLOBAL);
    let (pk, vk) = Groth16::<Bn254>::circuit_specific_setup(circuit, rng)
        .map_err(|e| SetupError::CircuitSetup(e.to_string()))?;

    Ok(CircuitKeyPair {
        proving_key: pk,
        verifying_key: vk,
    })
}
