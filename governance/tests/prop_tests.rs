use std::collections::HashSet;

use proptest::prelude::*;

use ballot_governance::{LedgerState, VotingError, MAX_BATCH};
use ballot_types::{AccountId, ProposalId, Timestamp};

fn account(i: u8) -> AccountId {
    AccountId::new(format!("acct{i}")).unwrap()
}

/// A single step applied to the ledger by a random caller.
#[derive(Clone, Debug)]
enum Op {
    Create { len: usize, duration: u64 },
    Vote { voter: u8, proposal: u64, support: bool },
    Tick(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..600, 0u64..50).prop_map(|(len, duration)| Op::Create { len, duration }),
        (0u8..8, 0u64..12, any::<bool>())
            .prop_map(|(voter, proposal, support)| Op::Vote { voter, proposal, support }),
        (0u64..20).prop_map(Op::Tick),
    ]
}

proptest! {
    /// Successful creations receive 0, 1, 2, ... and the count tracks them;
    /// every vote tally equals the number of distinct accepted voters.
    #[test]
    fn ids_sequential_and_votes_accounted(ops in prop::collection::vec(op(), 1..120)) {
        let mut state = LedgerState::default();
        let mut now = 0u64;
        let mut created = 0u64;
        let mut accepted: Vec<HashSet<u8>> = Vec::new();

        for op in ops {
            match op {
                Op::Create { len, duration } => {
                    let text = "x".repeat(len);
                    if let Ok(id) = state.create_proposal(&account(0), &text, duration, Timestamp::new(now)) {
                        prop_assert_eq!(id, ProposalId::new(created));
                        created += 1;
                        accepted.push(HashSet::new());
                    } else {
                        prop_assert!(len == 0 || len > 512 || duration == 0);
                    }
                }
                Op::Vote { voter, proposal, support } => {
                    let id = ProposalId::new(proposal);
                    let before = state.proposal(id).map(|p| p.total_votes()).ok();
                    match state.vote(&account(voter), id, support, Timestamp::new(now)) {
                        Ok(()) => {
                            let fresh = accepted[proposal as usize].insert(voter);
                            prop_assert!(fresh);
                        }
                        Err(VotingError::AlreadyVoted { .. }) => {
                            prop_assert!(accepted[proposal as usize].contains(&voter));
                        }
                        Err(VotingError::ProposalNotExist(_)) => prop_assert!(proposal >= created),
                        Err(VotingError::VotingClosed { deadline, .. }) => {
                            prop_assert!(Timestamp::new(now) > deadline);
                        }
                        Err(other) => prop_assert!(false, "unexpected error {other:?}"),
                    }
                    let after = state.proposal(id).map(|p| p.total_votes()).ok();
                    if let (Some(b), Some(a)) = (before, after) {
                        prop_assert!(a >= b);
                    }
                }
                Op::Tick(secs) => now += secs,
            }
        }

        prop_assert_eq!(state.proposal_count(), created);
        for (i, voters) in accepted.iter().enumerate() {
            let id = ProposalId::new(i as u64);
            prop_assert_eq!(state.outcome(id).unwrap().total_votes, voters.len() as u64);
        }
    }

    /// Range results never exceed min(count, total - start) and stay index-aligned.
    #[test]
    fn range_bounded_and_aligned(total in 0u64..40, start in 0u64..50, count in 0u64..120) {
        let mut state = LedgerState::default();
        for i in 0..total {
            state
                .create_proposal(&account(1), &format!("Proposal {i}"), 60, Timestamp::EPOCH)
                .unwrap();
        }

        match state.range(ProposalId::new(start), count) {
            Ok(range) => {
                prop_assert!(count >= 1 && count <= MAX_BATCH && start < total);
                let expected = count.min(total - start) as usize;
                prop_assert_eq!(range.len(), expected);
                prop_assert_eq!(range.votes_for.len(), expected);
                prop_assert_eq!(range.votes_against.len(), expected);
                prop_assert_eq!(range.creators.len(), expected);
                prop_assert_eq!(range.deadlines.len(), expected);
                for row in range.rows() {
                    let expected_text = format!("Proposal {}", row.id.as_u64());
                    prop_assert_eq!(row.description, expected_text.as_str());
                }
            }
            Err(VotingError::InvalidDuration(c)) => {
                prop_assert_eq!(c, count);
                prop_assert!(count == 0 || count > MAX_BATCH);
            }
            Err(VotingError::ProposalNotExist(id)) => {
                prop_assert_eq!(id.as_u64(), start);
                prop_assert!(start >= total);
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    /// A proposal passes iff strictly more votes are for than against.
    #[test]
    fn result_requires_strict_majority(votes_for in 0u8..20, votes_against in 0u8..20) {
        let mut state = LedgerState::default();
        let id = state
            .create_proposal(&account(0), "tally", 60, Timestamp::EPOCH)
            .unwrap();
        for i in 0..votes_for {
            state.vote(&AccountId::new(format!("for{i}")).unwrap(), id, true, Timestamp::EPOCH).unwrap();
        }
        for i in 0..votes_against {
            state.vote(&AccountId::new(format!("against{i}")).unwrap(), id, false, Timestamp::EPOCH).unwrap();
        }

        let outcome = state.outcome(id).unwrap();
        prop_assert_eq!(outcome.passed, votes_for > votes_against);
        prop_assert_eq!(outcome.total_votes, u64::from(votes_for) + u64::from(votes_against));
    }
}
