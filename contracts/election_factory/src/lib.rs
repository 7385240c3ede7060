#![no_std]

//! # Election Factory
//!
//! Admin-gated creation of `Ballot` instances and an append-only election
//! directory (spec.md §4.3). The factory retains no administrative power
//! over a `Ballot` after creation — the created instance's `admin` is the
//! caller of `create_election`, not the factory itself.

pub mod directory;
pub mod events;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, BytesN, Env, String, Symbol, Vec};

use ballot::BallotContractClient;
use common::AccessController;
use directory::{ElectionRecord, ElectionType};

// ── Error codes (spec.md §7, closed taxonomy) ────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum FactoryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOwner = 3,
    NotAdmin = 4,
    EmptyName = 5,
    DeadlineOrdering = 6,
    CandidateCountMismatch = 7,
    BallotNotFound = 8,
}

const INITIALIZED: Symbol = symbol_short!("INIT");
const REGISTRY: Symbol = symbol_short!("REGISTRY");
const WASM_HASH: Symbol = symbol_short!("WASM_HASH");

/// Recommended ceiling from spec.md §4.3 ("implementation-defined
/// MAX_CANDIDATES (≤ 50 recommended)"); shared with `ballot::MAX_CANDIDATES`.
pub const MAX_CANDIDATES: u32 = ballot::MAX_CANDIDATES;

fn require_initialized(env: &Env) -> Result<(), FactoryError> {
    if !env.storage().instance().has(&INITIALIZED) {
        return Err(FactoryError::NotInitialized);
    }
    Ok(())
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), FactoryError> {
    caller.require_auth();
    if !AccessController::is_admin(env, caller) {
        return Err(FactoryError::NotAdmin);
    }
    Ok(())
}

fn salt_from_id(env: &Env, id: u64) -> BytesN<32> {
    let mut buf = [0u8; 32];
    buf[24..32].copy_from_slice(&id.to_be_bytes());
    BytesN::from_array(env, &buf)
}

#[contract]
pub struct ElectionFactoryContract;

#[contractimpl]
impl ElectionFactoryContract {
    /// Bootstrap the factory. `ballot_wasm_hash` is the installed Wasm of
    /// the `ballot` contract, uploaded to the ledger ahead of time
    /// (spec.md §4.3 "[ADD]" mapping in SPEC_FULL.md).
    pub fn initialize(
        env: Env,
        owner: Address,
        registry: Address,
        ballot_wasm_hash: BytesN<32>,
    ) -> Result<(), FactoryError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(FactoryError::AlreadyInitialized);
        }
        AccessController::init(&env, &owner);
        env.storage().instance().set(&REGISTRY, &registry);
        env.storage().instance().set(&WASM_HASH, &ballot_wasm_hash);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    pub fn add_admin(env: Env, caller: Address, admin: Address) -> Result<(), FactoryError> {
        require_initialized(&env)?;
        caller.require_auth();
        if !AccessController::is_owner(&env, &caller) {
            return Err(FactoryError::NotOwner);
        }
        AccessController::add_admin(&env, &admin);
        Ok(())
    }

    pub fn remove_admin(env: Env, caller: Address, admin: Address) -> Result<(), FactoryError> {
        require_initialized(&env)?;
        caller.require_auth();
        if !AccessController::is_owner(&env, &caller) {
            return Err(FactoryError::NotOwner);
        }
        AccessController::remove_admin(&env, &admin);
        Ok(())
    }

    /// Deploy and initialize a new `Ballot`. Admin-only.
    #[allow(clippy::too_many_arguments)]
    pub fn create_election(
        env: Env,
        caller: Address,
        name: String,
        description: String,
        commit_deadline: u64,
        reveal_deadline: u64,
        candidate_names: Vec<String>,
        candidate_parties: Vec<String>,
        constituency_id: u32,
        election_type: ElectionType,
    ) -> Result<(u64, Address), FactoryError> {
        require_initialized(&env)?;
        require_admin(&env, &caller)?;

        if name.is_empty() {
            return Err(FactoryError::EmptyName);
        }
        let now = env.ledger().timestamp();
        if commit_deadline <= now || reveal_deadline <= commit_deadline {
            return Err(FactoryError::DeadlineOrdering);
        }
        if candidate_names.is_empty()
            || candidate_names.len() > MAX_CANDIDATES
            || candidate_names.len() != candidate_parties.len()
        {
            return Err(FactoryError::CandidateCountMismatch);
        }

        let id = directory::next_id(&env);
        let wasm_hash: BytesN<32> = env.storage().instance().get(&WASM_HASH).unwrap();
        let registry: Address = env.storage().instance().get(&REGISTRY).unwrap();

        let salt = salt_from_id(&env, id);
        let ballot_address = env
            .deployer()
            .with_current_contract(salt)
            .deploy_v2(wasm_hash, ());

        let ballot_client = BallotContractClient::new(&env, &ballot_address);
        ballot_client.initialize(
            &id,
            &name,
            &registry,
            &caller,
            &constituency_id,
            &commit_deadline,
            &reveal_deadline,
            &candidate_names,
            &candidate_parties,
        );

        let record = ElectionRecord {
            id,
            name: name.clone(),
            description,
            ballot_ref: ballot_address.clone(),
            created_at: now,
            created_by: caller.clone(),
            election_type,
        };
        directory::store(&env, &record);

        events::publish_election_created(
            &env,
            id,
            &name,
            &ballot_address,
            commit_deadline,
            reveal_deadline,
            &caller,
        );

        Ok((id, ballot_address))
    }

    // ── Views ─────────────────────────────────────────────────────────────

    pub fn get_election_count(env: Env) -> u64 {
        directory::count(&env)
    }

    pub fn get_election(env: Env, index: u64) -> Result<ElectionRecord, FactoryError> {
        directory::load(&env, index).ok_or(FactoryError::BallotNotFound)
    }

    pub fn get_election_by_ballot(env: Env, ballot_ref: Address) -> Result<ElectionRecord, FactoryError> {
        directory::load_by_ballot(&env, &ballot_ref).ok_or(FactoryError::BallotNotFound)
    }

    pub fn get_all_elections(env: Env) -> Vec<ElectionRecord> {
        let total = directory::count(&env);
        let mut out = Vec::new(&env);
        let mut i = 1u64;
        while i <= total {
            if let Some(r) = directory::load(&env, i) {
                out.push_back(r);
            }
            i += 1;
        }
        out
    }
}
