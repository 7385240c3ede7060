//! Structured event publishing for the Voter Registry (spec.md §6).

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_voter_registered(env: &Env, wallet: &Address, constituency_id: u32, timestamp: u64) {
    env.events().publish(
        (symbol_short!("V_REG"),),
        (wallet.clone(), constituency_id, timestamp),
    );
}

pub fn publish_voter_deactivated(env: &Env, wallet: &Address, reason: &soroban_sdk::String) {
    env.events()
        .publish((symbol_short!("V_DEACT"),), (wallet.clone(), reason.clone()));
}

pub fn publish_voter_reactivated(env: &Env, wallet: &Address) {
    env.events()
        .publish((symbol_short!("V_REACT"),), wallet.clone());
}
