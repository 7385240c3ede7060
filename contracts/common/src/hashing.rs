//! Bit-exact keccak256 hashing contract shared by `ballot` and `verifier`
//! (spec.md §4.2, §9). Both the commit hash and the receipt hash are
//! keccak256 of a fixed-order concatenation of big-endian, zero-padded
//! 32-byte integers — no length prefixes, no ABI encoding beyond that.
//!
//! `env.crypto().keccak256` is the same Soroban host-function primitive the
//! wider contract suite uses wherever a fixed-size cryptographic digest is
//! needed.

use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{Address, Bytes, BytesN, Env};

fn push_u256_be(buf: &mut Bytes, value: &[u8]) {
    debug_assert!(value.len() <= 32);
    for _ in 0..(32 - value.len()) {
        buf.push_back(0);
    }
    for b in value {
        buf.push_back(*b);
    }
}

fn push_u32_be32(buf: &mut Bytes, value: u32) {
    push_u256_be(buf, &value.to_be_bytes());
}

fn push_u64_be32(buf: &mut Bytes, value: u64) {
    push_u256_be(buf, &value.to_be_bytes());
}

fn push_bytesn32(buf: &mut Bytes, value: &BytesN<32>) {
    for b in value.to_array() {
        buf.push_back(b);
    }
}

/// `keccak256( u256_be(candidate_id) ‖ secret )`
pub fn compute_commit_hash(env: &Env, candidate_id: u32, secret: &BytesN<32>) -> BytesN<32> {
    let mut buf = Bytes::new(env);
    push_u32_be32(&mut buf, candidate_id);
    push_bytesn32(&mut buf, secret);
    env.crypto().keccak256(&buf).into()
}

/// `keccak256( voter_xdr ‖ commit_hash[32] ‖ u256_be(timestamp) ‖ u256_be(election_id) )`
///
/// Spec.md's reference encoding hashes a raw 20-byte EVM address; Soroban's
/// `Address` has no equivalent fixed-width raw form, so the voter is
/// represented by its canonical XDR byte serialization (`Address::to_xdr`).
/// This preserves the *shape* of the hashing contract — a fixed-order
/// keccak256 concatenation — without byte-for-byte parity to an EVM
/// encoding of the same logical voter.
pub fn compute_receipt_hash(
    env: &Env,
    voter: &Address,
    commit_hash: &BytesN<32>,
    timestamp: u64,
    election_id: u64,
) -> BytesN<32> {
    let mut buf = voter.clone().to_xdr(env);
    push_bytesn32(&mut buf, commit_hash);
    push_u64_be32(&mut buf, timestamp);
    push_u64_be32(&mut buf, election_id);
    env.crypto().keccak256(&buf).into()
}
