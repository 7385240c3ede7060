//! Structured event publishing for a Ballot (spec.md §6). State mutation
//! always precedes event emission (spec.md §5 ordering guarantee); a
//! failed operation emits no events (spec.md §7).

use soroban_sdk::{symbol_short, Address, BytesN, Env};

pub fn publish_vote_committed(env: &Env, voter: &Address, receipt_hash: &BytesN<32>, timestamp: u64) {
    env.events().publish(
        (symbol_short!("VT_COM"),),
        (voter.clone(), receipt_hash.clone(), timestamp),
    );
}

pub fn publish_vote_revealed(env: &Env, voter: &Address, timestamp: u64) {
    env.events()
        .publish((symbol_short!("VT_REV"),), (voter.clone(), timestamp));
}

pub fn publish_election_finalized(env: &Env, total_reveals: u32, timestamp: u64) {
    env.events()
        .publish((symbol_short!("EL_FIN"),), (total_reveals, timestamp));
}

pub fn publish_election_cancelled(env: &Env, reason: &soroban_sdk::String, timestamp: u64) {
    env.events()
        .publish((symbol_short!("EL_CAN"),), (reason.clone(), timestamp));
}
