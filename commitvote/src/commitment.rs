use crate::*;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::convert::TryInto;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

/// A 32-byte commitment to a candidate choice and a secret
///
/// The engine treats commitments as opaque. It never learns the choice or
/// the secret until the voter reveals them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Commitment(pub [u8; 32]);

impl Commitment {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Commitment {
    fn from(bytes: [u8; 32]) -> Self {
        Commitment(bytes)
    }
}

impl FromStr for Commitment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = crate::principal::decode_hex(s)?;
        let bytes: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::BadLength {
                expected: 32,
                found: bytes.len(),
            })?;
        Ok(Commitment(bytes))
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        FromStr::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for Commitment {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// A candidate identifier
///
/// Numeric identifiers are hashed as a 256-bit big-endian word, names as
/// their raw UTF-8 bytes with no length prefix or padding.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
pub enum CandidateId {
    Index(u64),
    Name(String),
}

impl CandidateId {
    /// The bytes that precede the secret in the commitment preimage
    pub fn encode(&self) -> Vec<u8> {
        match self {
            CandidateId::Index(index) => {
                let mut word = [0u8; 32];
                word[24..].copy_from_slice(&index.to_be_bytes());
                word.to_vec()
            }
            CandidateId::Name(name) => name.as_bytes().to_vec(),
        }
    }
}

impl From<u64> for CandidateId {
    fn from(index: u64) -> Self {
        CandidateId::Index(index)
    }
}

impl From<&str> for CandidateId {
    fn from(name: &str) -> Self {
        CandidateId::Name(name.to_owned())
    }
}

impl From<String> for CandidateId {
    fn from(name: String) -> Self {
        CandidateId::Name(name)
    }
}

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CandidateId::Index(index) => write!(f, "{}", index),
            CandidateId::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Compute `keccak256(encode(candidate) || secret)`.
///
/// This is the original Keccak padding, not NIST SHA3-256.
pub fn compute_commitment(candidate: &CandidateId, secret: &[u8]) -> Commitment {
    let mut output = [0u8; 32];
    let mut hasher = Keccak::v256();
    hasher.update(&candidate.encode());
    hasher.update(secret);
    hasher.finalize(&mut output);
    Commitment(output)
}

impl ElectionRecord {
    pub fn has_committed(&self, voter: &Principal) -> bool {
        self.commitments.contains_key(voter)
    }

    pub fn commitment(&self, voter: &Principal) -> Option<Commitment> {
        self.commitments.get(voter).copied()
    }

    /// Store a voter's commitment. A commitment can never be replaced.
    pub(crate) fn commit_vote(
        &mut self,
        voter: Principal,
        commitment: Commitment,
    ) -> Result<(), ProtocolError> {
        if !self.is_eligible(&voter) {
            return Err(ProtocolError::NotEligible);
        }
        self.require_phase(Phase::Commit)?;
        if self.has_committed(&voter) {
            return Err(ProtocolError::AlreadyCommitted);
        }

        self.commitments.insert(voter, commitment);
        self.election.total_committed += 1;
        self.events.push(Event::VoteCommitted { voter, commitment });
        Ok(())
    }
}
