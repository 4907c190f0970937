use super::*;
use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::thread;

const ADMIN: Principal = Principal([0xaa; 20]);
const V1: Principal = Principal([1; 20]);
const V2: Principal = Principal([2; 20]);

fn e1() -> ElectionId {
    ElectionId::from("e1")
}

/// Election "e1" with V1 registered, moved to Commit
fn committing(engine: &Engine) {
    engine.create_election(e1(), ADMIN).unwrap();
    engine.add_voter(&e1(), &ADMIN, V1).unwrap();
    assert_eq!(engine.advance_phase(&e1(), &ADMIN), Ok(Phase::Commit));
}

#[test]
fn commit_then_reveal() {
    let engine: Engine = Engine::default();
    committing(&engine);

    let commitment = compute_commitment(&CandidateId::Index(1), b"s3cr3t");
    engine.commit_vote(&e1(), V1, commitment).unwrap();
    assert_eq!(engine.get_stats(&e1()).unwrap().total_committed, 1);
    assert!(engine.has_committed(&e1(), &V1));

    assert_eq!(engine.advance_phase(&e1(), &ADMIN), Ok(Phase::Reveal));
    engine
        .reveal_vote(&e1(), V1, CandidateId::Index(1), b"s3cr3t")
        .unwrap();

    assert_eq!(engine.get_vote_count(&e1(), &CandidateId::Index(1)), 1);
    let stats = engine.get_stats(&e1()).unwrap();
    assert_eq!(stats.total_revealed, 1);
    assert_eq!(stats.total_voters, 1);
    assert!(engine.has_revealed(&e1(), &V1));
}

#[test]
fn wrong_secret_leaves_tally_alone() {
    let engine: Engine = Engine::default();
    committing(&engine);
    engine
        .commit_vote(&e1(), V1, compute_commitment(&CandidateId::Index(1), b"s3cr3t"))
        .unwrap();
    engine.advance_phase(&e1(), &ADMIN).unwrap();

    assert_eq!(
        engine.reveal_vote(&e1(), V1, CandidateId::Index(1), b"wrong"),
        Err(ProtocolError::InvalidReveal)
    );
    assert_eq!(engine.get_vote_count(&e1(), &CandidateId::Index(1)), 0);
    assert_eq!(engine.get_stats(&e1()).unwrap().total_revealed, 0);
    assert!(!engine.has_revealed(&e1(), &V1));
}

#[test]
fn unregistered_voter_cannot_commit() {
    let engine: Engine = Engine::default();
    committing(&engine);

    assert_eq!(
        engine.commit_vote(&e1(), V2, Commitment([7; 32])),
        Err(ProtocolError::NotEligible)
    );
    assert!(!engine.has_committed(&e1(), &V2));
    assert_eq!(engine.get_stats(&e1()).unwrap().total_committed, 0);
}

#[test]
fn commit_during_registration() {
    let engine: Engine = Engine::default();
    engine.create_election(e1(), ADMIN).unwrap();
    engine.add_voter(&e1(), &ADMIN, V1).unwrap();

    assert_eq!(
        engine.commit_vote(&e1(), V1, Commitment([7; 32])),
        Err(ProtocolError::WrongPhase {
            expected: Phase::Commit,
            actual: Phase::Registration
        })
    );
}

#[test]
fn two_voters_two_candidates() {
    let engine: Engine = Engine::default();
    engine.create_election(e1(), ADMIN).unwrap();
    assert_eq!(engine.add_voters_batch(&e1(), &ADMIN, &[V1, V2]), Ok(2));
    engine.advance_phase(&e1(), &ADMIN).unwrap();

    engine
        .commit_vote(&e1(), V1, compute_commitment(&CandidateId::Index(1), b"s1"))
        .unwrap();
    engine
        .commit_vote(&e1(), V2, compute_commitment(&CandidateId::Index(2), b"s2"))
        .unwrap();
    engine.advance_phase(&e1(), &ADMIN).unwrap();

    engine
        .reveal_vote(&e1(), V1, CandidateId::Index(1), b"s1")
        .unwrap();
    engine
        .reveal_vote(&e1(), V2, CandidateId::Index(2), b"s2")
        .unwrap();

    assert_eq!(engine.get_vote_count(&e1(), &CandidateId::Index(1)), 1);
    assert_eq!(engine.get_vote_count(&e1(), &CandidateId::Index(2)), 1);
    assert_eq!(engine.get_stats(&e1()).unwrap().total_revealed, 2);

    assert_eq!(engine.advance_phase(&e1(), &ADMIN), Ok(Phase::Results));
    assert_eq!(
        engine.advance_phase(&e1(), &ADMIN),
        Err(ProtocolError::TerminalPhase)
    );
    assert_eq!(engine.results(&e1()).unwrap().leaders().len(), 2);
}

#[test]
fn history_records_every_change() {
    let engine: Engine = Engine::default();
    committing(&engine);
    let commitment = compute_commitment(&"alice".into(), b"pepper");
    engine.commit_vote(&e1(), V1, commitment).unwrap();
    engine.advance_phase(&e1(), &ADMIN).unwrap();

    // Rejected operations leave no trace
    assert_eq!(
        engine.reveal_vote(&e1(), V1, "bob".into(), b"pepper"),
        Err(ProtocolError::InvalidReveal)
    );
    engine
        .reveal_vote(&e1(), V1, "alice".into(), b"pepper")
        .unwrap();

    assert_eq!(
        engine.events(&e1()).unwrap(),
        vec![
            Event::ElectionCreated { admin: ADMIN },
            Event::VoterAdded { voter: V1 },
            Event::PhaseChanged {
                phase: Phase::Commit
            },
            Event::VoteCommitted {
                voter: V1,
                commitment
            },
            Event::PhaseChanged {
                phase: Phase::Reveal
            },
            Event::VoteRevealed {
                voter: V1,
                candidate: "alice".into()
            },
        ]
    );
}

#[test]
fn racing_reveals_count_once() {
    let engine: Arc<Engine> = Arc::new(Engine::default());
    committing(&engine);
    engine
        .commit_vote(&e1(), V1, compute_commitment(&CandidateId::Index(3), b"race"))
        .unwrap();
    engine.advance_phase(&e1(), &ADMIN).unwrap();

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let engine = engine.clone();
            thread::spawn(move || engine.reveal_vote(&e1(), V1, CandidateId::Index(3), b"race"))
        })
        .collect();
    let results: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == ProtocolError::AlreadyRevealed));
    assert_eq!(engine.get_vote_count(&e1(), &CandidateId::Index(3)), 1);
    assert_eq!(engine.get_stats(&e1()).unwrap().total_revealed, 1);
}

#[test]
fn racing_commits_keep_the_first() {
    let engine: Arc<Engine> = Arc::new(Engine::default());
    committing(&engine);

    let workers: Vec<_> = (0..8u8)
        .map(|i| {
            let engine = engine.clone();
            thread::spawn(move || {
                let commitment = Commitment([i; 32]);
                (commitment, engine.commit_vote(&e1(), V1, commitment))
            })
        })
        .collect();
    let results: Vec<_> = workers.into_iter().map(|w| w.join().unwrap()).collect();

    let winners: Vec<Commitment> = results
        .iter()
        .filter(|(_, r)| r.is_ok())
        .map(|(c, _)| *c)
        .collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(engine.commitment(&e1(), &V1), Some(winners[0]));
    assert_eq!(engine.get_stats(&e1()).unwrap().total_committed, 1);
}

#[test]
fn concurrent_voters_are_all_counted() {
    let engine: Arc<Engine> = Arc::new(Engine::default());
    let voters: Vec<Principal> = (1..=40u8).map(|i| Principal([i; 20])).collect();
    engine.create_election(e1(), ADMIN).unwrap();
    engine.add_voters_batch(&e1(), &ADMIN, &voters).unwrap();
    engine.advance_phase(&e1(), &ADMIN).unwrap();

    for (i, voter) in voters.iter().enumerate() {
        let candidate = CandidateId::Index(i as u64 % 3);
        let commitment = compute_commitment(&candidate, &voter.to_bytes());
        engine.commit_vote(&e1(), *voter, commitment).unwrap();
    }
    engine.advance_phase(&e1(), &ADMIN).unwrap();

    let workers: Vec<_> = voters
        .iter()
        .cloned()
        .enumerate()
        .map(|(i, voter)| {
            let engine = engine.clone();
            thread::spawn(move || {
                let candidate = CandidateId::Index(i as u64 % 3);
                engine.reveal_vote(&e1(), voter, candidate, &voter.to_bytes())
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap().unwrap();
    }

    let results = engine.results(&e1()).unwrap();
    assert_eq!(results.total(), 40);
    assert_eq!(results.count(&CandidateId::Index(0)), 14);
    assert_eq!(results.count(&CandidateId::Index(1)), 13);
    assert_eq!(results.count(&CandidateId::Index(2)), 13);
    assert_eq!(engine.get_stats(&e1()).unwrap().total_revealed, 40);
}

// Property tests
// --------------

const VOTERS: [Principal; 4] = [
    Principal([1; 20]),
    Principal([2; 20]),
    Principal([3; 20]),
    Principal([4; 20]),
];
const SECRETS: [&[u8]; 2] = [b"alpha", b"beta"];
const CANDIDATES: u64 = 3;

#[derive(Debug, Clone)]
enum Step {
    Add(usize),
    Advance,
    Commit(usize, u64, usize),
    Reveal(usize, u64, usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0..VOTERS.len()).prop_map(Step::Add),
        Just(Step::Advance),
        (0..VOTERS.len(), 0..CANDIDATES, 0..SECRETS.len())
            .prop_map(|(v, c, s)| Step::Commit(v, c, s)),
        (0..VOTERS.len(), 0..CANDIDATES, 0..SECRETS.len())
            .prop_map(|(v, c, s)| Step::Reveal(v, c, s)),
    ]
}

proptest! {
    #[test]
    fn protocol_invariants(steps in prop::collection::vec(step(), 0..80)) {
        let engine: Engine = Engine::new(EngineConfig::open_eligibility());
        engine.create_election(e1(), ADMIN).unwrap();

        let mut eligible = HashSet::new();
        let mut committed: HashMap<usize, (u64, usize)> = HashMap::new();
        let mut revealed = HashSet::new();
        let mut phase = Phase::Registration;

        for step in steps {
            match step {
                Step::Add(v) => {
                    engine.add_voter(&e1(), &ADMIN, VOTERS[v]).unwrap();
                    eligible.insert(v);
                }
                Step::Advance => {
                    let result = engine.advance_phase(&e1(), &ADMIN);
                    match phase.next() {
                        Some(next) => {
                            prop_assert_eq!(result, Ok(next));
                            phase = next;
                        }
                        None => prop_assert_eq!(result, Err(ProtocolError::TerminalPhase)),
                    }
                }
                Step::Commit(v, c, s) => {
                    let commitment = compute_commitment(&CandidateId::Index(c), SECRETS[s]);
                    let result = engine.commit_vote(&e1(), VOTERS[v], commitment);
                    if !eligible.contains(&v) {
                        prop_assert_eq!(result, Err(ProtocolError::NotEligible));
                    } else if phase != Phase::Commit {
                        prop_assert!(
                            matches!(result, Err(ProtocolError::WrongPhase { .. })),
                            "expected WrongPhase, got {:?}",
                            result
                        );
                    } else if committed.contains_key(&v) {
                        prop_assert_eq!(result, Err(ProtocolError::AlreadyCommitted));
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        committed.insert(v, (c, s));
                    }
                }
                Step::Reveal(v, c, s) => {
                    let result = engine.reveal_vote(&e1(), VOTERS[v], CandidateId::Index(c), SECRETS[s]);
                    if phase != Phase::Reveal {
                        prop_assert!(
                            matches!(result, Err(ProtocolError::WrongPhase { .. })),
                            "expected WrongPhase, got {:?}",
                            result
                        );
                    } else if !committed.contains_key(&v) {
                        prop_assert_eq!(result, Err(ProtocolError::NoCommitment));
                    } else if revealed.contains(&v) {
                        prop_assert_eq!(result, Err(ProtocolError::AlreadyRevealed));
                    } else if committed[&v] == (c, s) {
                        prop_assert_eq!(result, Ok(()));
                        revealed.insert(v);
                    } else {
                        prop_assert_eq!(result, Err(ProtocolError::InvalidReveal));
                    }
                }
            }

            let stats = engine.get_stats(&e1()).unwrap();
            let tally_sum: u64 = (0..CANDIDATES)
                .map(|c| engine.get_vote_count(&e1(), &CandidateId::Index(c)))
                .sum();

            prop_assert_eq!(stats.phase, phase);
            prop_assert_eq!(stats.total_voters, eligible.len() as u64);
            prop_assert_eq!(stats.total_committed, committed.len() as u64);
            prop_assert_eq!(stats.total_revealed, revealed.len() as u64);
            prop_assert_eq!(tally_sum, stats.total_revealed);
            for (v, voter) in VOTERS.iter().enumerate() {
                prop_assert_eq!(engine.is_eligible(&e1(), voter), eligible.contains(&v));
                prop_assert_eq!(engine.has_committed(&e1(), voter), committed.contains_key(&v));
            }
        }
    }

    #[test]
    fn reveal_matches_only_its_preimage(
        candidate in any::<u64>(),
        secret in prop::collection::vec(any::<u8>(), 0..64),
        other_candidate in any::<u64>(),
        other_secret in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let candidate = CandidateId::Index(candidate);
        let commitment = compute_commitment(&candidate, &secret);
        prop_assert!(verify_reveal(&commitment, &candidate, &secret));

        let other_candidate = CandidateId::Index(other_candidate);
        if (other_candidate.clone(), other_secret.clone()) != (candidate, secret) {
            prop_assert!(!verify_reveal(&commitment, &other_candidate, &other_secret));
        }
    }
}
