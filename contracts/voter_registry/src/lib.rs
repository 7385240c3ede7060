#![no_std]

//! # Voter Registry
//!
//! Authoritative eligibility source of truth for every Ballot (spec.md
//! §4.1): one-identity-one-wallet registration, constituency tagging, and
//! an activation flag admins can toggle without ever releasing the
//! underlying identity hash (spec.md §3 invariant 7).

pub mod events;
pub mod voter;

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, String};

use common::AccessController;
use voter::VoterRecord;

// ── Error codes (spec.md §7, closed taxonomy) ────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RegistryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    NotOwner = 3,
    NotAdmin = 4,
    ZeroAddress = 5,
    AlreadyRegistered = 6,
    IdentityReused = 7,
    InvalidConstituency = 8,
    NotRegistered = 9,
}

const INITIALIZED: soroban_sdk::Symbol = soroban_sdk::symbol_short!("INIT");

fn require_initialized(env: &Env) -> Result<(), RegistryError> {
    if !env.storage().instance().has(&INITIALIZED) {
        return Err(RegistryError::NotInitialized);
    }
    Ok(())
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), RegistryError> {
    caller.require_auth();
    if !AccessController::is_admin(env, caller) {
        return Err(RegistryError::NotAdmin);
    }
    Ok(())
}

/// Read-only snapshot returned by `get_voter_info`.
#[contracttype]
#[derive(Clone, Debug)]
pub struct VoterInfo {
    pub wallet: Address,
    pub identity_hash: BytesN<32>,
    pub constituency_id: u32,
    pub registered: bool,
    pub active: bool,
    pub registered_at: u64,
}

impl From<VoterRecord> for VoterInfo {
    fn from(r: VoterRecord) -> Self {
        VoterInfo {
            wallet: r.wallet,
            identity_hash: r.identity_hash,
            constituency_id: r.constituency_id,
            registered: r.registered,
            active: r.active,
            registered_at: r.registered_at,
        }
    }
}

#[contract]
pub struct VoterRegistryContract;

#[contractimpl]
impl VoterRegistryContract {
    /// Bootstrap the registry. The caller becomes `owner` (spec.md §4.1:
    /// "ownership transfer is not required; the owner is set at
    /// construction").
    pub fn initialize(env: Env, owner: Address) -> Result<(), RegistryError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(RegistryError::AlreadyInitialized);
        }
        AccessController::init(&env, &owner);
        env.storage().instance().set(&INITIALIZED, &true);
        Ok(())
    }

    /// Grant admin rights. Owner-only.
    pub fn add_admin(env: Env, caller: Address, admin: Address) -> Result<(), RegistryError> {
        require_initialized(&env)?;
        caller.require_auth();
        if !AccessController::is_owner(&env, &caller) {
            return Err(RegistryError::NotOwner);
        }
        AccessController::add_admin(&env, &admin);
        Ok(())
    }

    /// Revoke admin rights. Owner-only; cannot be used against the owner
    /// itself since the owner was never stored as an admin record.
    pub fn remove_admin(env: Env, caller: Address, admin: Address) -> Result<(), RegistryError> {
        require_initialized(&env)?;
        caller.require_auth();
        if !AccessController::is_owner(&env, &caller) {
            return Err(RegistryError::NotOwner);
        }
        AccessController::remove_admin(&env, &admin);
        Ok(())
    }

    /// Register a new voter. Admin-only.
    ///
    /// Fails `AlreadyRegistered` if `wallet` already has a record,
    /// `IdentityReused` if `identity_hash` was ever consumed by any
    /// registration (including one later deactivated), `InvalidConstituency`
    /// if `constituency_id == 0`.
    pub fn register_voter(
        env: Env,
        caller: Address,
        wallet: Address,
        identity_hash: BytesN<32>,
        constituency_id: u32,
    ) -> Result<(), RegistryError> {
        require_initialized(&env)?;
        require_admin(&env, &caller)?;

        if constituency_id == 0 {
            return Err(RegistryError::InvalidConstituency);
        }
        if voter::wallet_registered(&env, &wallet) {
            return Err(RegistryError::AlreadyRegistered);
        }
        if voter::identity_consumed(&env, &identity_hash) {
            return Err(RegistryError::IdentityReused);
        }

        let now = env.ledger().timestamp();
        let record = VoterRecord {
            wallet: wallet.clone(),
            identity_hash: identity_hash.clone(),
            constituency_id,
            registered: true,
            active: true,
            registered_at: now,
        };
        voter::store_voter(&env, &record);
        voter::mark_identity_consumed(&env, &identity_hash);
        voter::push_enumeration(&env, &wallet);
        voter::increment_total_voters(&env);

        events::publish_voter_registered(&env, &wallet, constituency_id, now);
        Ok(())
    }

    /// Deactivate a voter. Admin-only. Does NOT release the identity hash
    /// (spec.md §3 invariant 7).
    pub fn deactivate_voter(
        env: Env,
        caller: Address,
        wallet: Address,
        reason: String,
    ) -> Result<(), RegistryError> {
        require_initialized(&env)?;
        require_admin(&env, &caller)?;

        let mut record = voter::load_voter(&env, &wallet).ok_or(RegistryError::NotRegistered)?;
        record.active = false;
        voter::store_voter(&env, &record);

        events::publish_voter_deactivated(&env, &wallet, &reason);
        Ok(())
    }

    /// Reactivate a previously deactivated voter. Admin-only.
    pub fn reactivate_voter(env: Env, caller: Address, wallet: Address) -> Result<(), RegistryError> {
        require_initialized(&env)?;
        require_admin(&env, &caller)?;

        let mut record = voter::load_voter(&env, &wallet).ok_or(RegistryError::NotRegistered)?;
        record.active = true;
        voter::store_voter(&env, &record);

        events::publish_voter_reactivated(&env, &wallet);
        Ok(())
    }

    // ── Views ─────────────────────────────────────────────────────────────

    /// `registered ∧ active`. Called by `Ballot::commit_vote` (spec.md §5).
    pub fn is_eligible(env: Env, wallet: Address) -> bool {
        match voter::load_voter(&env, &wallet) {
            Some(r) => r.registered && r.active,
            None => false,
        }
    }

    /// Registered constituency tag. Returns 0 (open) for an unregistered
    /// wallet — callers must check `is_eligible` first, as `Ballot` does.
    pub fn get_voter_constituency(env: Env, wallet: Address) -> u32 {
        voter::load_voter(&env, &wallet)
            .map(|r| r.constituency_id)
            .unwrap_or(0)
    }

    /// Constant-time-in-intent equality between a candidate identity hash
    /// and the one on file for `wallet`.
    pub fn verify_identity(env: Env, wallet: Address, candidate_hash: BytesN<32>) -> bool {
        match voter::load_voter(&env, &wallet) {
            Some(r) => r.identity_hash == candidate_hash,
            None => false,
        }
    }

    pub fn get_voter_info(env: Env, wallet: Address) -> Result<VoterInfo, RegistryError> {
        voter::load_voter(&env, &wallet)
            .map(VoterInfo::from)
            .ok_or(RegistryError::NotRegistered)
    }

    pub fn get_voter_count(env: Env) -> u32 {
        voter::total_voters(&env)
    }

    pub fn get_voter_at_index(env: Env, index: u32) -> Result<Address, RegistryError> {
        voter::enumeration_at(&env, index).ok_or(RegistryError::NotRegistered)
    }
}
