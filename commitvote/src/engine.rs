use crate::*;
use log::{debug, info};

/// The commit-reveal voting engine
///
/// Every call locks exactly one election. Mutations take that election's
/// write lock for their whole duration, so concurrent calls against the same
/// election are applied one at a time and calls against different elections
/// never contend. Identity is not checked here: callers pass principals that
/// the layer in front of the engine has already authenticated.
pub struct Engine<S: Store = MemStore> {
    store: S,
    config: EngineConfig,
}

impl Engine<MemStore> {
    pub fn new(config: EngineConfig) -> Self {
        Engine::with_store(MemStore::default(), config)
    }
}

impl Default for Engine<MemStore> {
    fn default() -> Self {
        Engine::new(EngineConfig::default())
    }
}

impl<S: Store> Engine<S> {
    pub fn with_store(store: S, config: EngineConfig) -> Self {
        Engine { store, config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a new election in the Registration phase
    pub fn create_election(
        &self,
        id: ElectionId,
        admin: Principal,
    ) -> Result<Election, ProtocolError> {
        if id.is_empty() {
            return Err(ProtocolError::InvalidElectionId);
        }

        let handle = match self.store.insert(ElectionRecord::new(id.clone(), admin)) {
            Ok(handle) => handle,
            Err(e) => {
                debug!("election {}: create_election rejected: {}", id, e);
                return Err(e);
            }
        };
        let election = handle.read().election().clone();

        info!("election {}: created by {}", id, admin);
        Ok(election)
    }

    pub fn add_voter(
        &self,
        id: &ElectionId,
        admin: &Principal,
        voter: Principal,
    ) -> Result<(), ProtocolError> {
        let config = &self.config;
        let added = self.mutate(id, "add_voter", |record| {
            record.add_voter(admin, voter, config)
        })?;

        if added {
            info!("election {}: voter {} added", id, voter);
        }
        Ok(())
    }

    /// Add several voters. Either every voter is added or none is.
    ///
    /// Returns how many of them were not already eligible.
    pub fn add_voters_batch(
        &self,
        id: &ElectionId,
        admin: &Principal,
        voters: &[Principal],
    ) -> Result<usize, ProtocolError> {
        let config = &self.config;
        let added = self.mutate(id, "add_voters_batch", |record| {
            record.add_voters_batch(admin, voters, config)
        })?;

        info!(
            "election {}: {} of {} voters added",
            id,
            added,
            voters.len()
        );
        Ok(added)
    }

    pub fn advance_phase(&self, id: &ElectionId, admin: &Principal) -> Result<Phase, ProtocolError> {
        let phase = self.mutate(id, "advance_phase", |record| record.advance_phase(admin))?;

        info!("election {}: phase changed to {}", id, phase);
        Ok(phase)
    }

    /// Move to a numbered phase, which must be the next one
    pub fn set_phase(
        &self,
        id: &ElectionId,
        admin: &Principal,
        phase: u8,
    ) -> Result<Phase, ProtocolError> {
        let phase = self.mutate(id, "set_phase", |record| record.set_phase(admin, phase))?;

        info!("election {}: phase changed to {}", id, phase);
        Ok(phase)
    }

    pub fn commit_vote(
        &self,
        id: &ElectionId,
        voter: Principal,
        commitment: Commitment,
    ) -> Result<(), ProtocolError> {
        self.mutate(id, "commit_vote", |record| {
            record.commit_vote(voter, commitment)
        })?;

        info!("election {}: voter {} committed {}", id, voter, commitment);
        Ok(())
    }

    pub fn reveal_vote(
        &self,
        id: &ElectionId,
        voter: Principal,
        candidate: CandidateId,
        secret: &[u8],
    ) -> Result<(), ProtocolError> {
        self.mutate(id, "reveal_vote", |record| {
            record.reveal_vote(voter, candidate, secret)
        })?;

        info!("election {}: vote from {} counted", id, voter);
        Ok(())
    }

    /// Votes counted for a candidate, zero for unknown elections or candidates
    pub fn get_vote_count(&self, id: &ElectionId, candidate: &CandidateId) -> u64 {
        self.query(id, |record| record.tally().count(candidate))
            .unwrap_or(0)
    }

    pub fn get_stats(&self, id: &ElectionId) -> Result<ElectionStats, ProtocolError> {
        self.query(id, |record| record.election().stats())
    }

    /// False for unknown elections
    pub fn is_eligible(&self, id: &ElectionId, voter: &Principal) -> bool {
        self.query(id, |record| record.is_eligible(voter))
            .unwrap_or(false)
    }

    pub fn has_committed(&self, id: &ElectionId, voter: &Principal) -> bool {
        self.query(id, |record| record.has_committed(voter))
            .unwrap_or(false)
    }

    pub fn has_revealed(&self, id: &ElectionId, voter: &Principal) -> bool {
        self.query(id, |record| record.has_revealed(voter))
            .unwrap_or(false)
    }

    pub fn commitment(&self, id: &ElectionId, voter: &Principal) -> Option<Commitment> {
        self.query(id, |record| record.commitment(voter))
            .ok()
            .flatten()
    }

    pub fn election(&self, id: &ElectionId) -> Result<Election, ProtocolError> {
        self.query(id, |record| record.election().clone())
    }

    /// Snapshot of the per-candidate totals
    pub fn results(&self, id: &ElectionId) -> Result<Tally, ProtocolError> {
        self.query(id, |record| record.tally().clone())
    }

    /// The election's full history, oldest first
    pub fn events(&self, id: &ElectionId) -> Result<Vec<Event>, ProtocolError> {
        self.query(id, |record| record.events().to_vec())
    }

    pub fn elections(&self) -> Vec<ElectionId> {
        self.store.ids()
    }

    fn handle(&self, id: &ElectionId) -> Result<ElectionHandle, ProtocolError> {
        self.store
            .get(id)
            .ok_or_else(|| ProtocolError::NotFound(id.clone()))
    }

    /// Run `op` under the election's write lock
    fn mutate<T, F>(&self, id: &ElectionId, name: &str, op: F) -> Result<T, ProtocolError>
    where
        F: FnOnce(&mut ElectionRecord) -> Result<T, ProtocolError>,
    {
        let result = self.handle(id).and_then(|handle| {
            let mut record = handle.write();
            op(&mut *record)
        });

        if let Err(e) = &result {
            debug!("election {}: {} rejected: {}", id, name, e);
        }
        result
    }

    /// Run `op` under the election's read lock
    fn query<T, F>(&self, id: &ElectionId, op: F) -> Result<T, ProtocolError>
    where
        F: FnOnce(&ElectionRecord) -> T,
    {
        let handle = self.handle(id)?;
        let record = handle.read();
        Ok(op(&*record))
    }
}
