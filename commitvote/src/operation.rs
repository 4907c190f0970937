use crate::*;
use content_inspector::ContentType;

/// A request against the engine
///
/// Operations are what a transport or relay layer hands to the engine once it
/// has authenticated the caller. They can be recorded as a transcript and
/// replayed with `Engine::apply`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    CreateElection {
        election: ElectionId,
        admin: Principal,
    },
    AddVoter {
        election: ElectionId,
        admin: Principal,
        voter: Principal,
    },
    AddVotersBatch {
        election: ElectionId,
        admin: Principal,
        voters: Vec<Principal>,
    },
    AdvancePhase {
        election: ElectionId,
        admin: Principal,
    },
    SetPhase {
        election: ElectionId,
        admin: Principal,
        phase: u8,
    },
    CommitVote {
        election: ElectionId,
        voter: Principal,
        commitment: Commitment,
    },
    RevealVote {
        election: ElectionId,
        voter: Principal,
        candidate: CandidateId,
        secret: String,
    },
}

impl Operation {
    /// The election this operation targets
    pub fn election(&self) -> &ElectionId {
        match self {
            Operation::CreateElection { election, .. } => election,
            Operation::AddVoter { election, .. } => election,
            Operation::AddVotersBatch { election, .. } => election,
            Operation::AdvancePhase { election, .. } => election,
            Operation::SetPhase { election, .. } => election,
            Operation::CommitVote { election, .. } => election,
            Operation::RevealVote { election, .. } => election,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateElection { .. } => "create_election",
            Operation::AddVoter { .. } => "add_voter",
            Operation::AddVotersBatch { .. } => "add_voters_batch",
            Operation::AdvancePhase { .. } => "advance_phase",
            Operation::SetPhase { .. } => "set_phase",
            Operation::CommitVote { .. } => "commit_vote",
            Operation::RevealVote { .. } => "reveal_vote",
        }
    }

    /// Unpack a single operation from JSON or CBOR
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        decode(bytes)
    }

    /// Unpack a transcript (a list of operations) from JSON or CBOR
    pub fn list_from_bytes(bytes: &[u8]) -> Result<Vec<Self>, Error> {
        decode(bytes)
    }

    /// Pack into CBOR bytes
    pub fn as_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(serde_cbor::to_vec(self)?)
    }
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, Error> {
    // CBOR often has no NUL bytes, so text alone does not mean JSON
    match content_inspector::inspect(bytes) {
        ContentType::UTF_8 if starts_like_json(bytes) => Ok(serde_json::from_slice(bytes)?),
        ContentType::UTF_8 | ContentType::BINARY => Ok(serde_cbor::from_slice(bytes)?),
        _ => Err(Error::DeserializationUnknownFormat),
    }
}

fn starts_like_json(bytes: &[u8]) -> bool {
    match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(b'{') | Some(b'[') => true,
        _ => false,
    }
}

/// What a successful operation produced
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "outcome")]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Created { election: Election },
    VoterAdded,
    VotersAdded { added: usize },
    PhaseChanged { phase: Phase },
    Committed,
    Revealed,
}

impl<S: Store> Engine<S> {
    /// Apply one operation
    pub fn apply(&self, operation: &Operation) -> Result<Outcome, ProtocolError> {
        match operation {
            Operation::CreateElection { election, admin } => self
                .create_election(election.clone(), *admin)
                .map(|election| Outcome::Created { election }),
            Operation::AddVoter {
                election,
                admin,
                voter,
            } => self
                .add_voter(election, admin, *voter)
                .map(|_| Outcome::VoterAdded),
            Operation::AddVotersBatch {
                election,
                admin,
                voters,
            } => self
                .add_voters_batch(election, admin, voters)
                .map(|added| Outcome::VotersAdded { added }),
            Operation::AdvancePhase { election, admin } => self
                .advance_phase(election, admin)
                .map(|phase| Outcome::PhaseChanged { phase }),
            Operation::SetPhase {
                election,
                admin,
                phase,
            } => self
                .set_phase(election, admin, *phase)
                .map(|phase| Outcome::PhaseChanged { phase }),
            Operation::CommitVote {
                election,
                voter,
                commitment,
            } => self
                .commit_vote(election, *voter, *commitment)
                .map(|_| Outcome::Committed),
            Operation::RevealVote {
                election,
                voter,
                candidate,
                secret,
            } => self
                .reveal_vote(election, *voter, candidate.clone(), secret.as_bytes())
                .map(|_| Outcome::Revealed),
        }
    }
}
