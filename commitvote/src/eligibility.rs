use crate::*;

impl ElectionRecord {
    pub fn is_eligible(&self, voter: &Principal) -> bool {
        self.eligible.contains(voter)
    }

    /// Add a single voter.
    ///
    /// Returns `true` if the voter was newly added; re-adding an eligible
    /// voter succeeds without touching the counters.
    pub(crate) fn add_voter(
        &mut self,
        caller: &Principal,
        voter: Principal,
        config: &EngineConfig,
    ) -> Result<bool, ProtocolError> {
        self.check_eligibility_change(caller, config)?;
        if voter.is_zero() {
            return Err(ProtocolError::InvalidPrincipal(voter));
        }

        Ok(self.insert_voter(voter))
    }

    /// Add many voters at once, all or nothing.
    ///
    /// Every entry is checked before any is added. Returns the number of
    /// voters that were not already eligible (duplicates count once).
    pub(crate) fn add_voters_batch(
        &mut self,
        caller: &Principal,
        voters: &[Principal],
        config: &EngineConfig,
    ) -> Result<usize, ProtocolError> {
        self.check_eligibility_change(caller, config)?;
        if let Some(invalid) = voters.iter().find(|voter| voter.is_zero()) {
            return Err(ProtocolError::InvalidPrincipal(*invalid));
        }

        let mut added = 0;
        for voter in voters {
            if self.insert_voter(*voter) {
                added += 1;
            }
        }
        Ok(added)
    }

    fn check_eligibility_change(
        &self,
        caller: &Principal,
        config: &EngineConfig,
    ) -> Result<(), ProtocolError> {
        self.ensure_admin(caller)?;
        if config.registration_only_eligibility {
            self.require_phase(Phase::Registration)?;
        }
        Ok(())
    }

    fn insert_voter(&mut self, voter: Principal) -> bool {
        if !self.eligible.insert(voter) {
            return false;
        }
        self.election.total_voters += 1;
        self.events.push(Event::VoterAdded { voter });
        true
    }
}
