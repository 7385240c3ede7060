#![no_std]

//! # Verifier
//!
//! Stateless read layer over a `Ballot` and the `VoterRegistry` (spec.md
//! §4.4). Owns no state of its own; every view is derived live from the
//! other three components, discovering the registry address through the
//! ballot's own `get_election_info` rather than storing a copy of it.

pub mod events;

use soroban_sdk::{contract, contractimpl, contracttype, Address, BytesN, Env, String};

use ballot::BallotContractClient;
use voter_registry::VoterRegistryContractClient;

#[contracttype]
#[derive(Clone, Debug)]
pub struct ReceiptVerification {
    pub is_registered: bool,
    pub has_committed: bool,
    pub has_revealed: bool,
    pub receipt_valid: bool,
    pub commit_timestamp: u64,
    pub stored_receipt: BytesN<32>,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct IntegrityReport {
    pub integrous: bool,
    pub total_reveals: u32,
    pub total_candidate_votes: u64,
    pub total_commits: u32,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ParticipationStatus {
    pub committed: bool,
    pub revealed: bool,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ElectionSummary {
    pub name: String,
    pub total_committers: u32,
    pub total_revealed: u32,
    pub candidate_count: u32,
    pub finalized: bool,
    pub cancelled: bool,
}

fn zero_bytes(env: &Env) -> BytesN<32> {
    BytesN::from_array(env, &[0u8; 32])
}

#[contract]
pub struct VerifierContract;

#[contractimpl]
impl VerifierContract {
    /// Check a voter's receipt against the ballot's stored state and the
    /// registry's eligibility record. `caller` identifies who asked, for
    /// the `VerificationPerformed` audit event; no authorization is
    /// required to run a read-only check.
    pub fn verify_voter_receipt(
        env: Env,
        caller: Address,
        ballot: Address,
        voter: Address,
        receipt_hash: BytesN<32>,
    ) -> ReceiptVerification {
        let ballot_client = BallotContractClient::new(&env, &ballot);
        let info = ballot_client.get_election_info();
        let registry_client = VoterRegistryContractClient::new(&env, &info.registry);

        let is_registered = matches!(registry_client.try_get_voter_info(&voter), Ok(Ok(_)));
        let state = ballot_client.get_voter_commit_status(&voter);

        let (has_committed, has_revealed, commit_timestamp, stored_receipt) = match state {
            ballot::commit::VoterState::None => (false, false, 0u64, zero_bytes(&env)),
            ballot::commit::VoterState::Committed(r) => (true, false, r.commit_timestamp, r.receipt_hash),
            ballot::commit::VoterState::Revealed(r) => (true, true, r.commit_timestamp, r.receipt_hash),
        };

        let zero = zero_bytes(&env);
        let receipt_valid = stored_receipt == receipt_hash && receipt_hash != zero;

        let now = env.ledger().timestamp();
        events::publish_verification_performed(&env, &caller, &ballot, &voter, receipt_valid, now);

        ReceiptVerification {
            is_registered,
            has_committed,
            has_revealed,
            receipt_valid,
            commit_timestamp,
            stored_receipt,
        }
    }

    /// Live enforcement of spec.md §3 invariant (2):
    /// `totalReveals == Σ candidates[i].voteCount`.
    pub fn verify_election_integrity(env: Env, ballot: Address) -> IntegrityReport {
        let ballot_client = BallotContractClient::new(&env, &ballot);
        let info = ballot_client.get_election_info();
        let candidates = ballot_client.get_all_candidates();
        let total_candidate_votes: u64 = candidates.iter().map(|c| c.vote_count).sum();

        IntegrityReport {
            integrous: info.total_reveals as u64 == total_candidate_votes,
            total_reveals: info.total_reveals,
            total_candidate_votes,
            total_commits: info.total_commits,
        }
    }

    pub fn did_voter_participate(env: Env, ballot: Address, voter: Address) -> ParticipationStatus {
        let ballot_client = BallotContractClient::new(&env, &ballot);
        match ballot_client.get_voter_commit_status(&voter) {
            ballot::commit::VoterState::None => ParticipationStatus {
                committed: false,
                revealed: false,
            },
            ballot::commit::VoterState::Committed(_) => ParticipationStatus {
                committed: true,
                revealed: false,
            },
            ballot::commit::VoterState::Revealed(_) => ParticipationStatus {
                committed: true,
                revealed: true,
            },
        }
    }

    pub fn get_election_summary(env: Env, ballot: Address) -> ElectionSummary {
        let ballot_client = BallotContractClient::new(&env, &ballot);
        let info = ballot_client.get_election_info();
        ElectionSummary {
            name: info.name,
            total_committers: ballot_client.get_total_committers(),
            total_revealed: info.total_reveals,
            candidate_count: info.candidate_count,
            finalized: info.is_finalized,
            cancelled: info.is_cancelled,
        }
    }

    /// Pure helper sharing the hashing contract with `ballot` (spec.md §4.2).
    pub fn compute_commit_hash(env: Env, candidate_id: u32, secret: BytesN<32>) -> BytesN<32> {
        common::compute_commit_hash(&env, candidate_id, &secret)
    }
}
