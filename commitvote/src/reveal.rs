use crate::*;

/// Check a revealed choice and secret against a stored commitment
pub fn verify_reveal(commitment: &Commitment, candidate: &CandidateId, secret: &[u8]) -> bool {
    compute_commitment(candidate, secret) == *commitment
}

impl ElectionRecord {
    pub fn has_revealed(&self, voter: &Principal) -> bool {
        self.revealed.contains(voter)
    }

    /// Open a voter's commitment and count the vote.
    ///
    /// Checks run in this order: phase, commitment present, not yet
    /// revealed, hash matches. Only a fully verified reveal touches the
    /// tally.
    pub(crate) fn reveal_vote(
        &mut self,
        voter: Principal,
        candidate: CandidateId,
        secret: &[u8],
    ) -> Result<(), ProtocolError> {
        self.require_phase(Phase::Reveal)?;
        let commitment = self
            .commitments
            .get(&voter)
            .ok_or(ProtocolError::NoCommitment)?;
        if self.has_revealed(&voter) {
            return Err(ProtocolError::AlreadyRevealed);
        }
        if !verify_reveal(commitment, &candidate, secret) {
            return Err(ProtocolError::InvalidReveal);
        }

        self.revealed.insert(voter);
        self.election.total_revealed += 1;
        self.tally.record(candidate.clone());
        self.events.push(Event::VoteRevealed { voter, candidate });
        Ok(())
    }
}
