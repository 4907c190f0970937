use crate::*;

use thiserror::Error;

/// Error types
#[derive(Debug, Error)]
pub enum Error {
    #[error("commitvote: invalid hexidecimal")]
    BadHex,

    #[error("commitvote: wrong length - expected {expected} bytes, found {found}")]
    BadLength { expected: usize, found: usize },

    #[error("commitvote: CBOR error deserializing operations: {0}")]
    CBORDeserialization(#[from] serde_cbor::Error),

    #[error("commitvote: JSON error deserializing operations: {0}")]
    JSONDeserialization(#[from] serde_json::Error),

    #[error("commitvote: error deserializing operations: unknown format")]
    DeserializationUnknownFormat,
}

/// Protocol errors
///
/// Every variant aborts the attempted operation with no state change.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("commitvote: caller is not the election admin")]
    Unauthorized,

    #[error("commitvote: election {0} not found")]
    NotFound(ElectionId),

    #[error("commitvote: election {0} already exists")]
    AlreadyExists(ElectionId),

    #[error("commitvote: election id must not be empty")]
    InvalidElectionId,

    #[error("commitvote: {0} is not a valid voter")]
    InvalidPrincipal(Principal),

    #[error("commitvote: voter is not eligible in this election")]
    NotEligible,

    #[error("commitvote: operation requires the {expected} phase, election is in {actual}")]
    WrongPhase { expected: Phase, actual: Phase },

    #[error("commitvote: election is already in its final phase")]
    TerminalPhase,

    #[error("commitvote: {0} is not a phase number")]
    InvalidPhase(u8),

    #[error("commitvote: cannot move from {from} to {to}")]
    IllegalTransition { from: Phase, to: Phase },

    #[error("commitvote: voter has already committed")]
    AlreadyCommitted,

    #[error("commitvote: voter has no commitment")]
    NoCommitment,

    #[error("commitvote: voter has already revealed")]
    AlreadyRevealed,

    #[error("commitvote: reveal does not match commitment")]
    InvalidReveal,
}
