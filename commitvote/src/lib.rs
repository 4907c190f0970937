//! Commit-reveal voting engine.
//!
//! Voters first commit to `keccak256(candidate || secret)` and later reveal
//! the candidate and secret, which are checked against the stored commitment
//! before the vote is counted. See [`Engine`] for the operations.

#[macro_use]
extern crate serde;

mod commitment;
mod config;
mod election;
mod eligibility;
mod engine;
mod error;
mod event;
mod operation;
mod phase;
mod principal;
mod reveal;
mod store;
mod tally;

pub use commitment::*;
pub use config::*;
pub use election::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use operation::*;
pub use phase::*;
pub use principal::*;
pub use reveal::*;
pub use store::*;
pub use tally::*;

#[cfg(test)]
mod tests;
