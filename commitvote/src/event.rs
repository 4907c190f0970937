use crate::*;

/// An entry in an election's append-only history
///
/// Mirrors and indexers outside the engine follow these events; they are
/// never a source of truth for commitments or tallies.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Event {
    ElectionCreated { admin: Principal },
    VoterAdded { voter: Principal },
    PhaseChanged { phase: Phase },
    VoteCommitted { voter: Principal, commitment: Commitment },
    VoteRevealed { voter: Principal, candidate: CandidateId },
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Event::ElectionCreated { admin } => write!(f, "created by {}", admin),
            Event::VoterAdded { voter } => write!(f, "voter {} added", voter),
            Event::PhaseChanged { phase } => write!(f, "phase changed to {}", phase),
            Event::VoteCommitted { voter, commitment } => {
                write!(f, "voter {} committed {}", voter, commitment)
            }
            Event::VoteRevealed { voter, candidate } => {
                write!(f, "voter {} revealed a vote for {}", voter, candidate)
            }
        }
    }
}
