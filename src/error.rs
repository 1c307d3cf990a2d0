//! Crate error type.
//!
//! Only structurally invalid inputs (a setup error, not a data edge case)
//! surface as `Err`. Recoverable statistical degeneracies are expressed as
//! `Option`/NaN by the modules that produce them.

/// Errors raised by the matrix builder for inputs no analysis can use.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Graph with zero nodes.
    #[error("empty graph: no nodes")]
    EmptyGraph,

    /// Graph with nodes but zero edges; a transition matrix over it would be
    /// all-zero and every walk would stall at its seed.
    #[error("degenerate graph: {nodes} nodes but no edges")]
    DegenerateGraph { nodes: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
