//! Circuit statistics utility - reports constraint counts per circuit shape.
//!
//! Run before deploying a verifier artifact: a count that moved since the
//! artifact was generated means the circuit shape changed and the deployed
//! verifier is stale.
//!
//! Usage:
//!   cargo run --release --bin circuit-stats

use ark_bn254::Fr;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystem};

use district_circuits::{
    DistrictMembershipCircuit, TreeDepth, TwoTierMembershipCircuit, CIRCUIT_VERSION,
    DEPTH_GLOBAL, DEPTH_STATE,
};

fn count_constraints<C: ConstraintSynthesizer<Fr>>(circuit: C, name: &str) -> usize {
    let cs = ConstraintSystem::<Fr>::new_ref();
    circuit.generate_constraints(cs.clone()).unwrap();
    let count = cs.num_constraints();
    // Empty circuits use dummy values, so satisfaction is not expected here;
    // the constraint count is still the shape.
    println!("{:32} {:>8} constraints", name, count);
    count
}

fn main() {
    println!("District membership circuits, version {}\n", CIRCUIT_VERSION);

    let mut total = 0;

    for tier in TreeDepth::all() {
        let depth = tier.depth();
        let name = format!("{:?} (depth {})", tier, depth);
        total += count_constraints(DistrictMembershipCircuit::empty(depth), &name);
    }

    let two_tier_name = format!("TwoTier (depth {} + {})", DEPTH_STATE, DEPTH_GLOBAL);
    total += count_constraints(
        TwoTierMembershipCircuit::empty(DEPTH_STATE, DEPTH_GLOBAL),
        &two_tier_name,
    );

    println!("\nTotal constraints (all shapes): {}", total);
    println!("\nCompare against the counts recorded when the deployed verifier");
    println!("artifact was generated; any difference requires a version bump");
    println!("and a regenerated setup.");
}
