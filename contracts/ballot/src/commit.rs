//! Per-voter commit/reveal state (spec.md §3 VoteCommit, §9 design note):
//! a tagged union `None -> Committed -> Revealed` rather than a struct of
//! booleans, so the state machine is exhaustive under pattern matching.

use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, Symbol, Vec};

const COMMIT: Symbol = symbol_short!("B_COMMIT");
const ORDER: Symbol = symbol_short!("B_ORDER");

// TTL: ~90 days at 5s/ledger — elections are multi-hour to multi-day
// (spec.md §5) but receipts must remain queryable well after tally.
const TTL_THRESHOLD: u32 = 1_555_200;
const TTL_EXTEND_TO: u32 = 3_110_400;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommitRecord {
    pub commit_hash: BytesN<32>,
    pub receipt_hash: BytesN<32>,
    pub commit_timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RevealRecord {
    pub commit_hash: BytesN<32>,
    pub receipt_hash: BytesN<32>,
    pub commit_timestamp: u64,
    pub candidate_id: u32,
}

/// `None -> Committed(..) -> Revealed(..)`. No backward transitions exist
/// in the storage API: `reveal` replaces a `Committed` with a `Revealed`,
/// nothing ever replaces a `Revealed`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VoterState {
    None,
    Committed(CommitRecord),
    Revealed(RevealRecord),
}

fn commit_key(voter: &Address) -> (Symbol, Address) {
    (COMMIT, voter.clone())
}

pub(crate) fn load(env: &Env, voter: &Address) -> VoterState {
    let key = commit_key(voter);
    let state: Option<VoterState> = env.storage().persistent().get(&key);
    if state.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    state.unwrap_or(VoterState::None)
}

fn store(env: &Env, voter: &Address, state: &VoterState) {
    let key = commit_key(voter);
    env.storage().persistent().set(&key, state);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn store_commit(env: &Env, voter: &Address, record: CommitRecord) {
    store(env, voter, &VoterState::Committed(record));
}

pub(crate) fn store_reveal(env: &Env, voter: &Address, record: RevealRecord) {
    store(env, voter, &VoterState::Revealed(record));
}

pub(crate) fn push_order(env: &Env, voter: &Address) {
    let mut list: Vec<Address> = env
        .storage()
        .persistent()
        .get(&ORDER)
        .unwrap_or_else(|| Vec::new(env));
    list.push_back(voter.clone());
    env.storage().persistent().set(&ORDER, &list);
    env.storage()
        .persistent()
        .extend_ttl(&ORDER, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub(crate) fn order_len(env: &Env) -> u32 {
    let list: Option<Vec<Address>> = env.storage().persistent().get(&ORDER);
    list.map(|l| l.len()).unwrap_or(0)
}
