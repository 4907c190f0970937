use crate::*;
use std::collections::{HashMap, HashSet};

/// Caller-supplied election identifier
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ElectionId(String);

impl ElectionId {
    pub fn new(id: impl Into<String>) -> Self {
        ElectionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ElectionId {
    fn from(id: &str) -> Self {
        ElectionId(id.to_owned())
    }
}

impl From<String> for ElectionId {
    fn from(id: String) -> Self {
        ElectionId(id)
    }
}

impl std::fmt::Display for ElectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Election metadata and counters
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Election {
    pub id: ElectionId,

    /// The only principal allowed to change eligibility or phase
    pub admin: Principal,

    pub phase: Phase,

    pub total_voters: u64,
    pub total_committed: u64,
    pub total_revealed: u64,
}

impl Election {
    pub fn new(id: ElectionId, admin: Principal) -> Self {
        Election {
            id,
            admin,
            phase: Phase::Registration,
            total_voters: 0,
            total_committed: 0,
            total_revealed: 0,
        }
    }

    pub fn stats(&self) -> ElectionStats {
        ElectionStats {
            admin: self.admin,
            phase: self.phase,
            total_voters: self.total_voters,
            total_committed: self.total_committed,
            total_revealed: self.total_revealed,
        }
    }
}

/// Read-only snapshot returned by `Engine::get_stats`
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub struct ElectionStats {
    pub admin: Principal,
    pub phase: Phase,
    pub total_voters: u64,
    pub total_committed: u64,
    pub total_revealed: u64,
}

/// The complete state of one election
///
/// A record is only ever reached through its store handle, so every mutation
/// runs under that election's write lock. Mutating methods check every
/// precondition before touching any field: a failed call leaves the record
/// exactly as it was.
#[derive(Debug, Clone)]
pub struct ElectionRecord {
    pub(crate) election: Election,
    pub(crate) eligible: HashSet<Principal>,
    pub(crate) commitments: HashMap<Principal, Commitment>,
    pub(crate) revealed: HashSet<Principal>,
    pub(crate) tally: Tally,
    pub(crate) events: Vec<Event>,
}

impl ElectionRecord {
    pub fn new(id: ElectionId, admin: Principal) -> Self {
        ElectionRecord {
            election: Election::new(id, admin),
            eligible: HashSet::new(),
            commitments: HashMap::new(),
            revealed: HashSet::new(),
            tally: Tally::default(),
            events: vec![Event::ElectionCreated { admin }],
        }
    }

    pub fn election(&self) -> &Election {
        &self.election
    }

    pub fn id(&self) -> &ElectionId {
        &self.election.id
    }

    pub fn phase(&self) -> Phase {
        self.election.phase
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Append-only history of this election
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub(crate) fn ensure_admin(&self, caller: &Principal) -> Result<(), ProtocolError> {
        if *caller != self.election.admin {
            return Err(ProtocolError::Unauthorized);
        }
        Ok(())
    }
}
