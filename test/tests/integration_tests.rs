//! # Election Protocol Testing Framework — Integration Tests
//!
//! Comprehensive tests exercising the testing framework itself:
//! - Property-based testing with invariant verification
//! - State space exploration
//! - Scenario DSL
//! - Mutation testing detection

extern crate std;

use proptest::prelude::*;
use soroban_sdk::testutils::Address as _;
use soroban_sdk::Address;

use test_framework::generators::*;
use test_framework::invariants::*;
use test_framework::scenario_dsl::Scenario;
use test_framework::state_explorer::*;
use test_framework::*;

// ═════════════════════════════════════════════════════════════════════════════
//  Property-Based Tests
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// **Property**: committing always increases `total_commits` by exactly 1.
    #[test]
    fn prop_commit_increases_total_commits(secret_tag in 0u32..1000u32) {
        let mut env = TestEnv::new();
        let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);
        let voter = harness.register_voter();

        let before = harness.client.get_election_info().total_commits;
        harness.commit(&voter, 1, &harness.secret(secret_tag));
        let after = harness.client.get_election_info().total_commits;

        prop_assert_eq!(after, before + 1,
            "total_commits did not increase by exactly one");
    }

    /// **Property**: a matching commit/reveal pair always tallies on the
    /// committed candidate, never any other.
    #[test]
    fn prop_reveal_tallies_committed_candidate(
        candidate_id in 1u32..=3u32,
        secret_tag in 0u32..1000u32,
    ) {
        let mut env = TestEnv::new();
        let mut harness = BallotTestHarness::new(&mut env, 3, 3_600, 3_600);
        let voter = harness.register_voter();
        let secret = harness.secret(secret_tag);

        harness.commit(&voter, candidate_id, &secret);
        harness.enter_reveal_phase();
        harness.reveal(&voter, candidate_id, &secret);

        let candidate = harness.client.get_candidate(&candidate_id).unwrap();
        prop_assert_eq!(candidate.vote_count, 1,
            "revealed candidate {} should have exactly one vote", candidate_id);

        for other in 1u32..=3u32 {
            if other != candidate_id {
                let c = harness.client.get_candidate(&other).unwrap();
                prop_assert_eq!(c.vote_count, 0,
                    "non-voted candidate {} should have zero votes", other);
            }
        }
    }

    /// **Property**: a reveal using the wrong secret is always rejected
    /// with `HashMismatch`, never silently tallied.
    #[test]
    fn prop_wrong_secret_reveal_rejected(
        candidate_id in 1u32..=2u32,
        secret_tag in 0u32..1000u32,
        wrong_tag in 1000u32..2000u32,
    ) {
        let mut env = TestEnv::new();
        let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);
        let voter = harness.register_voter();
        let secret = harness.secret(secret_tag);
        let wrong_secret = harness.secret(wrong_tag);

        harness.commit(&voter, candidate_id, &secret);
        harness.enter_reveal_phase();

        let result = harness.client.try_reveal_vote(&voter, &candidate_id, &wrong_secret);
        prop_assert!(result.is_err(), "reveal with the wrong secret should be rejected");

        let candidate = harness.client.get_candidate(&candidate_id).unwrap();
        prop_assert_eq!(candidate.vote_count, 0,
            "a rejected reveal must not affect the tally");
    }

    /// **Property**: invariants hold after arbitrary action sequences.
    #[test]
    fn prop_invariants_hold_under_random_actions(
        actions in ballot_action_sequence(3, 3, 15),
    ) {
        let mut env = TestEnv::new();
        let mut harness = BallotTestHarness::new(&mut env, 3, 3_600, 3_600);
        let voters: std::vec::Vec<Address> = (0..3).map(|_| harness.register_voter()).collect();

        let invariants = InvariantSet::ballot_defaults();
        let config = ExplorerConfig {
            max_steps: 15,
            fail_fast: true,
            record_snapshots: false,
        };

        let mut explorer = StateExplorer::new(&harness, invariants, config, voters);
        let result = explorer.explore(&actions);

        prop_assert!(result.passed(),
            "Invariant violations: {:?}", result.summary.invariant_violations);
    }

    /// **Property**: double-committing the same voter is always rejected.
    #[test]
    fn prop_double_commit_rejected(secret_tag in 0u32..1000u32) {
        let mut env = TestEnv::new();
        let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);
        let voter = harness.register_voter();
        let secret = harness.secret(secret_tag);

        let hash = harness.commit_hash(1, &secret);
        let first = harness.client.try_commit_vote(&voter, &hash);
        let second = harness.client.try_commit_vote(&voter, &hash);

        prop_assert!(first.is_ok());
        prop_assert!(second.is_err(), "a second commit by the same voter should be rejected");
    }

    /// **Property**: every committer's receipt hash is unique to that
    /// commit, never colliding across distinct commits in the same batch.
    #[test]
    fn prop_receipts_distinct_across_voters(n in 2usize..=5usize) {
        let mut env = TestEnv::new();
        let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);

        let mut receipts = std::vec::Vec::new();
        for i in 0..n {
            let voter = harness.register_voter();
            let secret = harness.secret(i as u32);
            harness.commit(&voter, 1, &secret);
            let status = harness.client.get_voter_commit_status(&voter);
            if let ballot::commit::VoterState::Committed(r) = status {
                receipts.push(r.receipt_hash);
            }
        }

        for i in 0..receipts.len() {
            for j in (i + 1)..receipts.len() {
                prop_assert_ne!(&receipts[i], &receipts[j],
                    "receipt hashes for distinct voters collided");
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
//  Invariant Tests
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_all_invariants_hold_on_fresh_ballot() {
    let mut env = TestEnv::new();
    let harness = BallotTestHarness::new(&mut env, 3, 3_600, 3_600);

    let invariants = InvariantSet::ballot_defaults();
    invariants.assert_all(&harness.snapshot());
}

#[test]
fn test_invariants_after_commit_reveal_cycle() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);

    let alice = harness.register_voter();
    let bob = harness.register_voter();

    let invariants = InvariantSet::ballot_defaults();
    invariants.assert_all(&harness.snapshot());

    harness.commit(&alice, 1, &harness.secret(1));
    invariants.assert_all(&harness.snapshot());

    harness.commit(&bob, 2, &harness.secret(2));
    invariants.assert_all(&harness.snapshot());

    harness.enter_reveal_phase();
    invariants.assert_all(&harness.snapshot());

    harness.reveal(&alice, 1, &harness.secret(1));
    invariants.assert_all(&harness.snapshot());

    harness.reveal(&bob, 2, &harness.secret(2));
    invariants.assert_all(&harness.snapshot());
}

#[test]
fn test_transition_invariant_commits_monotonic() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);
    let alice = harness.register_voter();

    let before = harness.snapshot();
    harness.commit(&alice, 1, &harness.secret(1));
    let after = harness.snapshot();

    let inv = CommitsMonotonic;
    assert!(inv.check(&before, &after).is_ok());
}

#[test]
fn test_transition_invariant_finalize_irreversible() {
    let mut env = TestEnv::new();
    let harness = BallotTestHarness::new(&mut env, 1, 3_600, 3_600);

    let before = harness.snapshot();
    harness.enter_tally_phase();
    harness.client.finalize();
    let after = harness.snapshot();

    let inv = FinalizeIrreversible;
    assert!(inv.check(&before, &after).is_ok());
    assert!(after.is_finalized);
}

// ═════════════════════════════════════════════════════════════════════════════
//  State Space Explorer Tests
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_explorer_simple_sequence() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);
    let voters: std::vec::Vec<Address> = (0..2).map(|_| harness.register_voter()).collect();

    let actions = vec![
        BallotAction::Commit { voter_index: 0, candidate_id: 1, secret_tag: 1 },
        BallotAction::AdvanceTime { delta: 3_601 },
        BallotAction::Reveal { voter_index: 0, candidate_id: 1, secret_tag: 1 },
        BallotAction::Commit { voter_index: 1, candidate_id: 2, secret_tag: 2 },
    ];

    let mut explorer = StateExplorer::with_defaults(&harness, voters);
    let result = explorer.explore(&actions);

    assert!(result.passed(), "Violations: {:?}", result.summary.invariant_violations);
    assert_eq!(result.summary.actions_executed, 4);
    assert!(result.summary.entry_points_hit.contains("commit_vote"));
    assert!(result.summary.entry_points_hit.contains("reveal_vote"));
}

#[test]
fn test_explorer_coverage_tracking() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);
    let voters: std::vec::Vec<Address> = (0..2).map(|_| harness.register_voter()).collect();

    let actions = vec![
        BallotAction::Commit { voter_index: 0, candidate_id: 1, secret_tag: 1 },
        BallotAction::AdvanceTime { delta: 3_601 },
        BallotAction::Reveal { voter_index: 0, candidate_id: 1, secret_tag: 1 },
        BallotAction::AdvanceTime { delta: 3_601 },
        BallotAction::Finalize,
    ];

    let mut explorer = StateExplorer::with_defaults(&harness, voters);
    let result = explorer.explore(&actions);

    assert!(result.passed());

    let coverage = result.summary.entry_point_coverage(BALLOT_ENTRY_POINTS.len());
    assert!(
        coverage >= 0.4,
        "Expected at least 40% coverage, got {:.1}%",
        coverage * 100.0
    );
}

#[test]
fn test_explorer_with_historical_patterns() {
    let patterns = vec![
        VotingPattern::SimpleCommitAndReveal,
        VotingPattern::BlockCommitThenBlockReveal,
        VotingPattern::CommitWithoutReveal,
    ];

    for pattern in &patterns {
        let mut local_env = TestEnv::new();
        let mut local_harness = BallotTestHarness::new(&mut local_env, 2, 3_600, 3_600);
        let local_voters: std::vec::Vec<Address> =
            (0..4).map(|_| local_harness.register_voter()).collect();

        let actions = pattern_to_actions(pattern, 4);
        let mut explorer = StateExplorer::with_defaults(&local_harness, local_voters);
        let result = explorer.explore(&actions);

        assert!(
            result.passed(),
            "Pattern {:?} failed: {:?}",
            pattern,
            result.summary.invariant_violations
        );
    }
}

// ═════════════════════════════════════════════════════════════════════════════
//  Scenario DSL Tests
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_scenario_simple_commit_and_verify() {
    Scenario::new("Simple commit and verify")
        .with_candidate_count(2)
        .given(|ctx| {
            let voter = ctx.harness.register_voter();
            ctx.voters.push(voter);
        })
        .when("voter commits to candidate 1", |ctx| {
            let secret = ctx.harness.secret(1);
            ctx.harness.commit(&ctx.voters[0], 1, &secret);
        })
        .then("total_commits equals one", |ctx| {
            assert_eq!(ctx.harness.client.get_election_info().total_commits, 1);
        })
        .then("the voter's commit status is Committed", |ctx| {
            let status = ctx.harness.client.get_voter_commit_status(&ctx.voters[0]);
            assert!(matches!(status, ballot::commit::VoterState::Committed(_)));
        })
        .run();
}

#[test]
fn test_scenario_commit_reveal_finalize() {
    Scenario::new("Commit, reveal, then finalize")
        .with_candidate_count(2)
        .with_invariants(InvariantSet::ballot_defaults())
        .given(|ctx| {
            let alice = ctx.harness.register_voter();
            let bob = ctx.harness.register_voter();
            ctx.voters.push(alice);
            ctx.voters.push(bob);
        })
        .when("both voters commit and reveal to candidate 1", |ctx| {
            let s0 = ctx.harness.secret(1);
            let s1 = ctx.harness.secret(2);
            ctx.harness.commit(&ctx.voters[0], 1, &s0);
            ctx.harness.commit(&ctx.voters[1], 1, &s1);
            ctx.harness.enter_reveal_phase();
            ctx.harness.reveal(&ctx.voters[0], 1, &s0);
            ctx.harness.reveal(&ctx.voters[1], 1, &s1);
            ctx.harness.enter_tally_phase();
            ctx.harness.client.finalize();
        })
        .then("candidate 1 has two votes", |ctx| {
            let c = ctx.harness.client.get_candidate(&1).unwrap();
            assert_eq!(c.vote_count, 2);
        })
        .then("the election is finalized", |ctx| {
            assert!(ctx.harness.client.get_election_info().is_finalized);
        })
        .run();
}

#[test]
fn test_scenario_abstention_leaves_candidate_untouched() {
    Scenario::new("Commit without reveal never tallies")
        .with_candidate_count(2)
        .given(|ctx| {
            let voter = ctx.harness.register_voter();
            ctx.voters.push(voter);
        })
        .when("voter commits but never reveals", |ctx| {
            let secret = ctx.harness.secret(1);
            ctx.harness.commit(&ctx.voters[0], 1, &secret);
            ctx.harness.enter_tally_phase();
        })
        .then("candidate 1 still has zero votes", |ctx| {
            let c = ctx.harness.client.get_candidate(&1).unwrap();
            assert_eq!(c.vote_count, 0);
        })
        .run();
}

// ═════════════════════════════════════════════════════════════════════════════
//  Mutation Testing
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_mutation_swap_candidate_detected() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 3, 3_600, 3_600);
    let voter = harness.register_voter();
    let secret = harness.secret(1);

    harness.commit(&voter, 1, &secret);
    harness.enter_reveal_phase();

    let result = harness.client.try_reveal_vote(&voter, &2u32, &secret);
    assert!(result.is_err(), "revealing with a swapped candidate id was not caught");
}

#[test]
fn test_mutation_zero_commit_hash_detected() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);
    let voter = harness.register_voter();
    let zero = soroban_sdk::BytesN::from_array(&harness.env.env, &[0u8; 32]);

    let result = harness.client.try_commit_vote(&voter, &zero);
    assert!(result.is_err(), "a zeroed commit hash was not caught");
}

#[test]
fn test_mutation_double_reveal_invariants_hold() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);
    let voter = harness.register_voter();
    let secret = harness.secret(1);

    harness.commit(&voter, 1, &secret);
    harness.enter_reveal_phase();
    harness.reveal(&voter, 1, &secret);
    let _ = harness.client.try_reveal_vote(&voter, &1u32, &secret);

    let invariants = InvariantSet::ballot_defaults();
    invariants.assert_all(&harness.snapshot());
}

// ═════════════════════════════════════════════════════════════════════════════
//  Snapshot Tests
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_snapshot_captures_correct_state() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);

    let alice = harness.register_voter();
    let bob = harness.register_voter();

    harness.commit(&alice, 1, &harness.secret(1));
    harness.commit(&bob, 2, &harness.secret(2));
    harness.enter_reveal_phase();
    harness.reveal(&alice, 1, &harness.secret(1));

    let snapshot = harness.snapshot();

    assert_eq!(snapshot.total_commits, 2);
    assert_eq!(snapshot.total_reveals, 1);
    assert_eq!(snapshot.sum_candidate_votes(), 1);
}

#[test]
fn test_snapshot_consistency_invariant() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);

    let alice = harness.register_voter();
    let bob = harness.register_voter();

    harness.commit(&alice, 1, &harness.secret(1));
    harness.commit(&bob, 1, &harness.secret(2));
    harness.enter_reveal_phase();
    harness.reveal(&alice, 1, &harness.secret(1));
    harness.reveal(&bob, 1, &harness.secret(2));

    let snapshot = harness.snapshot();

    assert_eq!(
        snapshot.total_reveals as u64,
        snapshot.sum_candidate_votes(),
        "Snapshot invariant: total_reveals must equal sum of candidate votes"
    );
}

// ═════════════════════════════════════════════════════════════════════════════
//  Edge Case Tests
// ═════════════════════════════════════════════════════════════════════════════

#[test]
fn test_reveal_before_commit_window_closes_is_wrong_phase() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 2, 3_600, 3_600);
    let voter = harness.register_voter();
    let secret = harness.secret(1);

    harness.commit(&voter, 1, &secret);
    let result = harness.client.try_reveal_vote(&voter, &1u32, &secret);
    assert!(result.is_err(), "revealing during the commit phase should fail");
}

#[test]
fn test_no_voters_no_reveals_integrity_holds() {
    let mut env = TestEnv::new();
    let harness = BallotTestHarness::new(&mut env, 3, 3_600, 3_600);

    harness.enter_tally_phase();
    harness.client.finalize();

    let snapshot = harness.snapshot();
    assert_eq!(snapshot.total_reveals, 0);
    assert_eq!(snapshot.sum_candidate_votes(), 0);
}

#[test]
fn test_single_candidate_election() {
    let mut env = TestEnv::new();
    let mut harness = BallotTestHarness::new(&mut env, 1, 3_600, 3_600);
    let voter = harness.register_voter();
    let secret = harness.secret(1);

    harness.commit(&voter, 1, &secret);
    harness.enter_reveal_phase();
    harness.reveal(&voter, 1, &secret);

    let candidate = harness.client.get_candidate(&1).unwrap();
    assert_eq!(candidate.vote_count, 1);
}
