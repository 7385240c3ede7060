#![no_std]

//! # Ballot
//!
//! One deployed instance per election (spec.md §4.2): the commit/reveal
//! state machine, candidate tally, and admin overrides. Phase is a pure
//! function of the ledger clock and the two deadlines — there is no
//! explicit phase-transition call (spec.md §4.2 "Phase function").

pub mod candidate;
pub mod commit;
pub mod events;

use soroban_sdk::{contract, contractimpl, contracttype, symbol_short, Address, BytesN, Env, String, Symbol, Vec};

use candidate::Candidate;
use commit::{CommitRecord, RevealRecord, VoterState};
use voter_registry::VoterRegistryContractClient;

// ── Error codes (spec.md §7, closed taxonomy) ────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum BallotError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotAdmin = 3,
    EmptyName = 4,
    CandidateCountMismatch = 5,
    DeadlineOrdering = 6,
    WrongPhase = 7,
    ElectionCancelled = 8,
    EmptyHash = 9,
    AlreadyCommitted = 10,
    NoCommit = 11,
    AlreadyRevealed = 12,
    InvalidCandidate = 13,
    HashMismatch = 14,
    NotEligible = 15,
    WrongConstituency = 16,
    RevealNotEnded = 17,
    AlreadyFinalized = 18,
    CanOnlyExtend = 19,
    ResultsNotReady = 20,
}

// ── Storage keys (instance: small, always-live config + counters) ───────────

const ELECTION_ID: Symbol = symbol_short!("ELEC_ID");
const NAME: Symbol = symbol_short!("NAME");
const REGISTRY: Symbol = symbol_short!("REGISTRY");
const ADMIN: Symbol = symbol_short!("ADMIN");
const CONSTITUENCY: Symbol = symbol_short!("CONSTIT");
const COMMIT_DL: Symbol = symbol_short!("COMMIT_DL");
const REVEAL_DL: Symbol = symbol_short!("REVEAL_DL");
const TOTAL_COMMITS: Symbol = symbol_short!("TOT_COM");
const TOTAL_REVEALS: Symbol = symbol_short!("TOT_REV");
const CANCELLED: Symbol = symbol_short!("CANCEL");
const FINALIZED: Symbol = symbol_short!("FINAL");

pub const MAX_CANDIDATES: u32 = 50;

/// Temporal state of a ballot, derived purely from `now` vs. the two
/// deadlines (spec.md §4.2). No state transition call is required.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Commit,
    Reveal,
    Tally,
}

/// Read-only snapshot returned by `get_election_info`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct ElectionInfo {
    pub election_id: u64,
    pub name: String,
    pub registry: Address,
    pub admin: Address,
    pub constituency_id: u32,
    pub commit_deadline: u64,
    pub reveal_deadline: u64,
    pub total_commits: u32,
    pub total_reveals: u32,
    pub is_cancelled: bool,
    pub is_finalized: bool,
    pub candidate_count: u32,
}

fn require_initialized(env: &Env) -> Result<(), BallotError> {
    if !env.storage().instance().has(&ELECTION_ID) {
        return Err(BallotError::NotInitialized);
    }
    Ok(())
}

fn load_admin(env: &Env) -> Address {
    env.storage().instance().get(&ADMIN).unwrap()
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), BallotError> {
    caller.require_auth();
    if caller != &load_admin(env) {
        return Err(BallotError::NotAdmin);
    }
    Ok(())
}

fn is_cancelled(env: &Env) -> bool {
    env.storage().instance().get(&CANCELLED).unwrap_or(false)
}

fn is_finalized(env: &Env) -> bool {
    env.storage().instance().get(&FINALIZED).unwrap_or(false)
}

fn commit_deadline(env: &Env) -> u64 {
    env.storage().instance().get(&COMMIT_DL).unwrap_or(0)
}

fn reveal_deadline(env: &Env) -> u64 {
    env.storage().instance().get(&REVEAL_DL).unwrap_or(0)
}

fn is_zero_hash(hash: &BytesN<32>) -> bool {
    hash.to_array() == [0u8; 32]
}

#[contract]
pub struct BallotContract;

#[contractimpl]
impl BallotContract {
    /// Instantiate one election. Called once, typically by
    /// `ElectionFactory` immediately after deploying this instance
    /// (spec.md §4.3), but callable directly by any deployer.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        election_id: u64,
        name: String,
        registry: Address,
        admin: Address,
        constituency_id: u32,
        commit_deadline: u64,
        reveal_deadline: u64,
        candidate_names: Vec<String>,
        candidate_parties: Vec<String>,
    ) -> Result<(), BallotError> {
        if env.storage().instance().has(&ELECTION_ID) {
            return Err(BallotError::AlreadyInitialized);
        }
        if name.is_empty() {
            return Err(BallotError::EmptyName);
        }
        let now = env.ledger().timestamp();
        if commit_deadline <= now {
            return Err(BallotError::DeadlineOrdering);
        }
        if reveal_deadline <= commit_deadline {
            return Err(BallotError::DeadlineOrdering);
        }
        if candidate_names.is_empty() || candidate_names.len() > MAX_CANDIDATES {
            return Err(BallotError::CandidateCountMismatch);
        }
        if candidate_names.len() != candidate_parties.len() {
            return Err(BallotError::CandidateCountMismatch);
        }

        let mut candidates = Vec::new(&env);
        for i in 0..candidate_names.len() {
            candidates.push_back(Candidate {
                id: i + 1,
                name: candidate_names.get(i).unwrap(),
                party: candidate_parties.get(i).unwrap(),
                vote_count: 0,
            });
        }
        candidate::store_all(&env, &candidates);

        env.storage().instance().set(&ELECTION_ID, &election_id);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&REGISTRY, &registry);
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&CONSTITUENCY, &constituency_id);
        env.storage().instance().set(&COMMIT_DL, &commit_deadline);
        env.storage().instance().set(&REVEAL_DL, &reveal_deadline);
        env.storage().instance().set(&TOTAL_COMMITS, &0u32);
        env.storage().instance().set(&TOTAL_REVEALS, &0u32);
        env.storage().instance().set(&CANCELLED, &false);
        env.storage().instance().set(&FINALIZED, &false);
        Ok(())
    }

    /// Submit a hiding, binding commitment. spec.md §4.2.
    pub fn commit_vote(env: Env, voter: Address, commit_hash: BytesN<32>) -> Result<(), BallotError> {
        require_initialized(&env)?;
        voter.require_auth();

        if Self::current_phase(env.clone()) != Phase::Commit {
            return Err(BallotError::WrongPhase);
        }
        if is_cancelled(&env) {
            return Err(BallotError::ElectionCancelled);
        }
        if is_zero_hash(&commit_hash) {
            return Err(BallotError::EmptyHash);
        }
        if commit::load(&env, &voter) != VoterState::None {
            return Err(BallotError::AlreadyCommitted);
        }

        let registry: Address = env.storage().instance().get(&REGISTRY).unwrap();
        let registry_client = VoterRegistryContractClient::new(&env, &registry);
        if !registry_client.is_eligible(&voter) {
            return Err(BallotError::NotEligible);
        }
        let constituency_id: u32 = env.storage().instance().get(&CONSTITUENCY).unwrap_or(0);
        if constituency_id > 0 && registry_client.get_voter_constituency(&voter) != constituency_id {
            return Err(BallotError::WrongConstituency);
        }

        let now = env.ledger().timestamp();
        let election_id: u64 = env.storage().instance().get(&ELECTION_ID).unwrap();
        let receipt_hash = common::compute_receipt_hash(&env, &voter, &commit_hash, now, election_id);

        commit::store_commit(
            &env,
            &voter,
            CommitRecord {
                commit_hash,
                receipt_hash: receipt_hash.clone(),
                commit_timestamp: now,
            },
        );
        commit::push_order(&env, &voter);
        let total: u32 = env.storage().instance().get(&TOTAL_COMMITS).unwrap_or(0);
        env.storage().instance().set(&TOTAL_COMMITS, &(total + 1));

        events::publish_vote_committed(&env, &voter, &receipt_hash, now);
        Ok(())
    }

    /// Disclose `(candidateId, secret)`, binding it to the stored commit.
    /// Eligibility is deliberately NOT re-checked here (spec.md §5, §9
    /// Open Question: preserved as-is to avoid censoring already-committed
    /// votes via a mid-ballot deactivation).
    pub fn reveal_vote(env: Env, voter: Address, candidate_id: u32, secret: BytesN<32>) -> Result<(), BallotError> {
        require_initialized(&env)?;
        voter.require_auth();

        if Self::current_phase(env.clone()) != Phase::Reveal {
            return Err(BallotError::WrongPhase);
        }
        if is_cancelled(&env) {
            return Err(BallotError::ElectionCancelled);
        }

        let record = match commit::load(&env, &voter) {
            VoterState::None => return Err(BallotError::NoCommit),
            VoterState::Revealed(_) => return Err(BallotError::AlreadyRevealed),
            VoterState::Committed(r) => r,
        };

        let candidate_count = candidate::count(&env);
        if candidate_id == 0 || candidate_id > candidate_count {
            return Err(BallotError::InvalidCandidate);
        }

        let expected = common::compute_commit_hash(&env, candidate_id, &secret);
        if expected != record.commit_hash {
            return Err(BallotError::HashMismatch);
        }

        commit::store_reveal(
            &env,
            &voter,
            RevealRecord {
                commit_hash: record.commit_hash,
                receipt_hash: record.receipt_hash,
                commit_timestamp: record.commit_timestamp,
                candidate_id,
            },
        );
        candidate::increment_vote_count(&env, candidate_id);
        let total: u32 = env.storage().instance().get(&TOTAL_REVEALS).unwrap_or(0);
        env.storage().instance().set(&TOTAL_REVEALS, &(total + 1));

        let now = env.ledger().timestamp();
        events::publish_vote_revealed(&env, &voter, now);
        Ok(())
    }

    /// Declare the tally final. Callable by anyone once the reveal window
    /// has closed. The `¬isCancelled` check is made explicit rather than
    /// relying on phase math alone (spec.md §9 Open Question, resolved).
    pub fn finalize(env: Env) -> Result<(), BallotError> {
        require_initialized(&env)?;
        if is_cancelled(&env) {
            return Err(BallotError::ElectionCancelled);
        }
        if is_finalized(&env) {
            return Err(BallotError::AlreadyFinalized);
        }
        let now = env.ledger().timestamp();
        if now <= reveal_deadline(&env) {
            return Err(BallotError::RevealNotEnded);
        }

        env.storage().instance().set(&FINALIZED, &true);
        let total_reveals: u32 = env.storage().instance().get(&TOTAL_REVEALS).unwrap_or(0);
        events::publish_election_finalized(&env, total_reveals, now);
        Ok(())
    }

    /// Admin-only kill switch. Counters and existing commits are NOT rolled
    /// back — results are simply never declared final.
    pub fn cancel_election(env: Env, caller: Address, reason: String) -> Result<(), BallotError> {
        require_initialized(&env)?;
        require_admin(&env, &caller)?;
        if is_cancelled(&env) {
            return Err(BallotError::ElectionCancelled);
        }
        env.storage().instance().set(&CANCELLED, &true);
        let now = env.ledger().timestamp();
        events::publish_election_cancelled(&env, &reason, now);
        Ok(())
    }

    /// Move the commit deadline forward only. Extending it while already
    /// in REVEAL re-opens COMMIT as a pure consequence of `current_phase`
    /// (spec.md §4.2, §9 Open Question: preserved as-is, not special-cased).
    pub fn extend_commit_deadline(env: Env, caller: Address, new_deadline: u64) -> Result<(), BallotError> {
        require_initialized(&env)?;
        require_admin(&env, &caller)?;
        if new_deadline <= commit_deadline(&env) {
            return Err(BallotError::CanOnlyExtend);
        }
        if new_deadline >= reveal_deadline(&env) {
            return Err(BallotError::DeadlineOrdering);
        }
        env.storage().instance().set(&COMMIT_DL, &new_deadline);
        Ok(())
    }

    /// Move the reveal deadline forward only.
    pub fn extend_reveal_deadline(env: Env, caller: Address, new_deadline: u64) -> Result<(), BallotError> {
        require_initialized(&env)?;
        require_admin(&env, &caller)?;
        if new_deadline <= reveal_deadline(&env) {
            return Err(BallotError::CanOnlyExtend);
        }
        env.storage().instance().set(&REVEAL_DL, &new_deadline);
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────────────────────

    pub fn current_phase(env: Env) -> Phase {
        let now = env.ledger().timestamp();
        if now <= commit_deadline(&env) {
            Phase::Commit
        } else if now <= reveal_deadline(&env) {
            Phase::Reveal
        } else {
            Phase::Tally
        }
    }

    pub fn get_candidate(env: Env, id: u32) -> Result<Candidate, BallotError> {
        candidate::get(&env, id).ok_or(BallotError::InvalidCandidate)
    }

    pub fn get_all_candidates(env: Env) -> Vec<Candidate> {
        candidate::load_all(&env)
    }

    /// Fails `ResultsNotReady` unless the reveal window has closed or the
    /// election has already been finalized.
    pub fn get_results(env: Env) -> Result<Vec<Candidate>, BallotError> {
        let now = env.ledger().timestamp();
        if now <= reveal_deadline(&env) && !is_finalized(&env) {
            return Err(BallotError::ResultsNotReady);
        }
        Ok(candidate::load_all(&env))
    }

    pub fn get_voter_commit_status(env: Env, voter: Address) -> VoterState {
        commit::load(&env, &voter)
    }

    /// `false` on a zero hash or a mismatch; never panics on an unknown
    /// voter.
    pub fn verify_receipt(env: Env, voter: Address, receipt_hash: BytesN<32>) -> bool {
        if is_zero_hash(&receipt_hash) {
            return false;
        }
        let stored = match commit::load(&env, &voter) {
            VoterState::None => return false,
            VoterState::Committed(r) => r.receipt_hash,
            VoterState::Revealed(r) => r.receipt_hash,
        };
        stored == receipt_hash
    }

    pub fn get_election_info(env: Env) -> Result<ElectionInfo, BallotError> {
        require_initialized(&env)?;
        Ok(ElectionInfo {
            election_id: env.storage().instance().get(&ELECTION_ID).unwrap_or(0),
            name: env
                .storage()
                .instance()
                .get(&NAME)
                .unwrap_or_else(|| String::from_str(&env, "")),
            registry: env.storage().instance().get(&REGISTRY).unwrap_or(load_admin(&env)),
            admin: load_admin(&env),
            constituency_id: env.storage().instance().get(&CONSTITUENCY).unwrap_or(0),
            commit_deadline: commit_deadline(&env),
            reveal_deadline: reveal_deadline(&env),
            total_commits: env.storage().instance().get(&TOTAL_COMMITS).unwrap_or(0),
            total_reveals: env.storage().instance().get(&TOTAL_REVEALS).unwrap_or(0),
            is_cancelled: is_cancelled(&env),
            is_finalized: is_finalized(&env),
            candidate_count: candidate::count(&env),
        })
    }

    pub fn get_total_committers(env: Env) -> u32 {
        commit::order_len(&env)
    }

    /// Pure helper: identical hashing contract on the host and on-chain
    /// (spec.md §4.2, cross-checked by `common::hashing`'s conformance
    /// test against the reference vector).
    pub fn compute_commit_hash(env: Env, candidate_id: u32, secret: BytesN<32>) -> BytesN<32> {
        common::compute_commit_hash(&env, candidate_id, &secret)
    }
}
