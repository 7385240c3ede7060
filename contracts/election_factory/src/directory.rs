//! Append-only election directory (spec.md §3 Election Factory record).
//! IDs are issued 1..N monotonically and never reused.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol};

const DIR_CTR: Symbol = symbol_short!("DIR_CTR");
const DIR: Symbol = symbol_short!("DIR");
const BY_BALLOT: Symbol = symbol_short!("BY_BALLOT");

// TTL: ~300 days at 5s/ledger.
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// Advisory category tag (spec.md §6); does not alter protocol behavior.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ElectionType {
    General,
    Constituency,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ElectionRecord {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub ballot_ref: Address,
    pub created_at: u64,
    pub created_by: Address,
    pub election_type: ElectionType,
}

fn record_key(id: u64) -> (Symbol, u64) {
    (DIR, id)
}

fn by_ballot_key(ballot_ref: &Address) -> (Symbol, Address) {
    (BY_BALLOT, ballot_ref.clone())
}

pub(crate) fn next_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .instance()
        .get(&DIR_CTR)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&DIR_CTR, &id);
    id
}

pub(crate) fn count(env: &Env) -> u64 {
    env.storage().instance().get(&DIR_CTR).unwrap_or(0u64)
}

pub(crate) fn store(env: &Env, record: &ElectionRecord) {
    let key = record_key(record.id);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let bkey = by_ballot_key(&record.ballot_ref);
    env.storage().persistent().set(&bkey, &record.id);
    env.storage()
        .persistent()
        .extend_ttl(&bkey, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<ElectionRecord> {
    env.storage().persistent().get(&record_key(id))
}

pub(crate) fn load_by_ballot(env: &Env, ballot_ref: &Address) -> Option<ElectionRecord> {
    let id: u64 = env.storage().persistent().get(&by_ballot_key(ballot_ref))?;
    load(env, id)
}
