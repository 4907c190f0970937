use crate::*;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// Per-candidate vote counts
///
/// Candidates are kept in the order their first vote was revealed. Counts
/// only ever go up.
///
/// Serializes as a list of `{"candidate": .., "count": ..}` entries: `1` and
/// `"1"` are different candidates but would share a JSON object key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    totals: IndexMap<CandidateId, u64>,
}

impl Tally {
    /// Count one verified vote
    pub(crate) fn record(&mut self, candidate: CandidateId) {
        *self.totals.entry(candidate).or_insert(0) += 1;
    }

    /// Votes for a candidate, zero if nobody voted for it
    pub fn count(&self, candidate: &CandidateId) -> u64 {
        self.totals.get(candidate).copied().unwrap_or(0)
    }

    /// Sum over all candidates
    pub fn total(&self) -> u64 {
        self.totals.values().sum()
    }

    pub fn totals(&self) -> &IndexMap<CandidateId, u64> {
        &self.totals
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CandidateId, &u64)> {
        self.totals.iter()
    }

    /// Candidates with the most votes (several on a tie, none if empty)
    pub fn leaders(&self) -> Vec<&CandidateId> {
        let best = match self.totals.values().max() {
            Some(best) => *best,
            None => return vec![],
        };
        self.totals
            .iter()
            .filter(|(_, count)| **count == best)
            .map(|(candidate, _)| candidate)
            .collect()
    }
}

#[derive(Serialize)]
struct TallyEntry<'a> {
    candidate: &'a CandidateId,
    count: u64,
}

impl Serialize for Tally {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(
            self.totals
                .iter()
                .map(|(candidate, count)| TallyEntry {
                    candidate,
                    count: *count,
                }),
        )
    }
}
