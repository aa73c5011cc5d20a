use std::time::Duration;

use lookout_config::ChainId;
use thiserror::Error;

use crate::readiness::Observed;

/// The main error type for lookout operations.
///
/// Library consumers can match against the structured variants; each one
/// corresponds to a distinct failure a scenario may want to handle
/// differently (bad input, chain never converged, assertion target absent).
#[derive(Error, Debug)]
pub enum LookoutError {
    /// Malformed denom trace path passed to hashing
    #[error("invalid denom path: {0}")]
    InvalidPath(#[from] InvalidPathError),

    /// A readiness/height probe exhausted its deadline
    #[error("{0}")]
    Timeout(#[from] TimeoutError),

    /// An expected event was absent from a transaction result
    #[error("{0}")]
    EventNotFound(#[from] EventNotFound),

    /// An expected attribute was absent from an event
    #[error("{0}")]
    AttributeNotFound(#[from] AttributeNotFound),

    /// Generic error wrapper for compatibility with anyhow
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Local, never retried: the caller handed us a hop that can't be part of
/// any valid transfer path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidPathError {
    #[error("hop {index} has an empty port id")]
    EmptyPortId { index: usize },

    #[error("hop {index} has an empty channel id")]
    EmptyChannelId { index: usize },
}

/// A polling operation ran out of budget. `last_observed` is whatever the
/// final successful query reported, so a stuck handshake is diagnosable
/// from the error message alone.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{chain_id}: gave up after {waited:?}, last observed: {last_observed}")]
pub struct TimeoutError {
    pub chain_id: ChainId,
    pub waited: Duration,
    pub last_observed: Observed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventNotFound {
    #[error("message {msg_index} emitted no {ty} event")]
    InMessage { msg_index: u32, ty: String },

    #[error("no {ty} event anywhere in the transaction")]
    InTx { ty: String },

    #[error("transaction has no message at index {msg_index}")]
    NoSuchMessage { msg_index: u32 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{ty} event has no {key} attribute")]
pub struct AttributeNotFound {
    pub ty: String,
    pub key: String,
}
