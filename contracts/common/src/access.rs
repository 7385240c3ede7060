//! Two-level capability check shared by every contract in this workspace:
//! a single `owner` set at construction (never removed, never transferred)
//! and a mutable set of `admin` addresses the owner manages.
//!
//! Each contract embeds this as a value rather than inheriting from a base
//! contract — Soroban has no contract inheritance — and maps a failed check
//! to its own `#[contracterror]` variant.

use soroban_sdk::{symbol_short, Address, Env, Symbol};

const OWNER: Symbol = symbol_short!("AC_OWNER");
const ADMIN: Symbol = symbol_short!("AC_ADMIN");

// TTL: ~300 days at 5s/ledger, matching contracts/common/src/whitelist.rs.
const TTL_THRESHOLD: u32 = 5_184_000;
const TTL_EXTEND_TO: u32 = 10_368_000;

fn admin_key(address: &Address) -> (Symbol, Address) {
    (ADMIN, address.clone())
}

/// Owner/admin capability set, keyed under the embedding contract's own
/// storage (contracts never share storage, so no key prefix is needed
/// beyond these constants).
pub struct AccessController;

impl AccessController {
    /// Set the owner. Call exactly once, from the contract's `initialize`.
    pub fn init(env: &Env, owner: &Address) {
        env.storage().instance().set(&OWNER, owner);
    }

    pub fn owner(env: &Env) -> Option<Address> {
        env.storage().instance().get(&OWNER)
    }

    pub fn is_owner(env: &Env, address: &Address) -> bool {
        Self::owner(env).as_ref() == Some(address)
    }

    /// Grant admin rights to `address`. Idempotent.
    pub fn add_admin(env: &Env, address: &Address) {
        let key = admin_key(address);
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    /// Revoke admin rights from `address`. Idempotent; the owner itself was
    /// never stored as an admin record, so this cannot be used to strip
    /// ownership.
    pub fn remove_admin(env: &Env, address: &Address) {
        env.storage().persistent().remove(&admin_key(address));
    }

    /// Owners are implicitly admins: every contract operation gated on
    /// "admin-only" in spec.md is also callable by the owner.
    pub fn is_admin(env: &Env, address: &Address) -> bool {
        if Self::is_owner(env, address) {
            return true;
        }
        let key = admin_key(address);
        let is_admin = env.storage().persistent().get(&key).unwrap_or(false);
        if is_admin {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
        }
        is_admin
    }
}
