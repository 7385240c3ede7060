//! Voter record storage: the eligibility source of truth for every ballot
//! (spec.md §3, §4.1).

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol};

const VOTER: Symbol = symbol_short!("VOTER");
const IDENTITY: Symbol = symbol_short!("IDENT");
const VOTER_LIST: Symbol = symbol_short!("V_LIST");
const VOTER_CNT: Symbol = symbol_short!("V_CNT");

// TTL: ~300 days at 5s/ledger, matching contracts/common/src/whitelist.rs.
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

/// A registered voter. `active` is the only field that ever mutates after
/// creation; `identity_hash` is never released even across deactivation
/// (spec.md §3 invariant 7).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoterRecord {
    pub wallet: Address,
    pub identity_hash: BytesN<32>,
    pub constituency_id: u32,
    pub registered: bool,
    pub active: bool,
    pub registered_at: u64,
}

fn voter_key(wallet: &Address) -> (Symbol, Address) {
    (VOTER, wallet.clone())
}

fn identity_key(identity_hash: &BytesN<32>) -> (Symbol, BytesN<32>) {
    (IDENTITY, identity_hash.clone())
}

pub(crate) fn store_voter(env: &Env, record: &VoterRecord) {
    let key = voter_key(&record.wallet);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn load_voter(env: &Env, wallet: &Address) -> Option<VoterRecord> {
    let key = voter_key(wallet);
    let record: Option<VoterRecord> = env.storage().persistent().get(&key);
    if record.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    record
}

pub(crate) fn wallet_registered(env: &Env, wallet: &Address) -> bool {
    env.storage().persistent().has(&voter_key(wallet))
}

/// True once this identity hash has ever been consumed by a registration,
/// including by a voter later deactivated — identity hashes are never
/// released (spec.md §3 invariant 7).
pub(crate) fn identity_consumed(env: &Env, identity_hash: &BytesN<32>) -> bool {
    env.storage().persistent().has(&identity_key(identity_hash))
}

pub(crate) fn mark_identity_consumed(env: &Env, identity_hash: &BytesN<32>) {
    let key = identity_key(identity_hash);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn push_enumeration(env: &Env, wallet: &Address) {
    let mut list: soroban_sdk::Vec<Address> = env
        .storage()
        .persistent()
        .get(&VOTER_LIST)
        .unwrap_or_else(|| soroban_sdk::Vec::new(env));
    list.push_back(wallet.clone());
    env.storage().persistent().set(&VOTER_LIST, &list);
    env.storage()
        .persistent()
        .extend_ttl(&VOTER_LIST, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn enumeration_at(env: &Env, index: u32) -> Option<Address> {
    let list: soroban_sdk::Vec<Address> = env.storage().persistent().get(&VOTER_LIST)?;
    list.get(index)
}

pub(crate) fn total_voters(env: &Env) -> u32 {
    env.storage().instance().get(&VOTER_CNT).unwrap_or(0u32)
}

pub(crate) fn increment_total_voters(env: &Env) {
    let n = total_voters(env).saturating_add(1);
    env.storage().instance().set(&VOTER_CNT, &n);
}
