use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy for the event generator.
///
/// Configuration and table errors are fatal and surface before any event is
/// generated. `RejectionExhausted` is recoverable: the caller skips the
/// particle (or leaves a parent undecayed) and keeps going.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid generator configuration (unknown model type, uninitialized
    /// multiplicity table, non-positive temperature, ...).
    #[error("configuration error: {0}")]
    Config(String),

    /// Decay table that cannot be used for roulette selection.
    #[error("malformed decay table for species '{species}': {detail}")]
    MalformedDecay { species: String, detail: String },

    /// Multiplicity table file that does not match the species database.
    #[error("malformed multiplicity table at line {line}: {detail}")]
    MalformedTable { line: usize, detail: String },

    /// A rejection loop hit its attempt cap without accepting a sample.
    #[error("rejection sampling exhausted after {attempts} attempts in {context}")]
    RejectionExhausted {
        context: &'static str,
        attempts: usize,
    },

    /// Propagated I/O errors (multiplicity table import/export, species files).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON parse failure (species database or settings file).
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
