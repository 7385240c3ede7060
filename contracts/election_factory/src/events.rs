//! Structured event publishing for the Election Factory (spec.md §6).

use soroban_sdk::{symbol_short, Address, Env, String};

pub fn publish_election_created(
    env: &Env,
    election_id: u64,
    name: &String,
    ballot_ref: &Address,
    commit_deadline: u64,
    reveal_deadline: u64,
    created_by: &Address,
) {
    env.events().publish(
        (symbol_short!("EL_NEW"), election_id),
        (
            name.clone(),
            ballot_ref.clone(),
            commit_deadline,
            reveal_deadline,
            created_by.clone(),
        ),
    );
}
