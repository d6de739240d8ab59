use thiserror::Error;

/// Failures surfaced by the ledger core. None of them are fatal to the
/// process: validation and address errors bounce back to the caller, peer
/// errors are skipped during consensus resolution.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("invalid transaction: {0}")]
    InvalidTransaction(&'static str),

    #[error("malformed peer address `{0}`: {1}")]
    AddressFormat(String, &'static str),

    #[error("peer {0} unreachable: {1}")]
    PeerUnreachable(String, String),

    #[error("peer chain rejected: {0}")]
    InvalidChain(&'static str),
}
