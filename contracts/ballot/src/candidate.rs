//! Candidate list storage (spec.md §3): a dense, 1-indexed array fixed at
//! election creation. `vote_count` is the only mutable field, incremented
//! exactly once per accepted reveal.

use soroban_sdk::{contracttype, symbol_short, Env, String, Symbol, Vec};

const CANDIDATES: Symbol = symbol_short!("CANDS");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Candidate {
    pub id: u32,
    pub name: String,
    pub party: String,
    pub vote_count: u64,
}

pub(crate) fn store_all(env: &Env, candidates: &Vec<Candidate>) {
    env.storage().instance().set(&CANDIDATES, candidates);
}

pub(crate) fn load_all(env: &Env) -> Vec<Candidate> {
    env.storage()
        .instance()
        .get(&CANDIDATES)
        .unwrap_or_else(|| Vec::new(env))
}

pub(crate) fn count(env: &Env) -> u32 {
    load_all(env).len()
}

pub(crate) fn get(env: &Env, id: u32) -> Option<Candidate> {
    if id == 0 {
        return None;
    }
    load_all(env).get(id - 1)
}

/// Increment `candidates[id - 1].vote_count`. Caller must have already
/// validated `1 <= id <= count`.
pub(crate) fn increment_vote_count(env: &Env, id: u32) {
    let mut all = load_all(env);
    if let Some(mut c) = all.get(id - 1) {
        c.vote_count += 1;
        all.set(id - 1, c);
        store_all(env, &all);
    }
}
