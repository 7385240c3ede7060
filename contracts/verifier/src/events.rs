//! Structured event publishing for the Verifier (spec.md §6).

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_verification_performed(
    env: &Env,
    verifier: &Address,
    ballot: &Address,
    voter: &Address,
    receipt_valid: bool,
    timestamp: u64,
) {
    env.events().publish(
        (symbol_short!("VERIFIED"),),
        (
            verifier.clone(),
            ballot.clone(),
            voter.clone(),
            receipt_valid,
            timestamp,
        ),
    );
}
