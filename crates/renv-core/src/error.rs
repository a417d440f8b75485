use thiserror::Error;

pub type RenvResult<T> = Result<T, RenvError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenvError {
    /// Not running under a supported launcher.
    #[error("No MPI environment, {key} not found")]
    MissingRankEnvironment { key: String },
    #[error("{name} is already defined; fix or launch with --force")]
    AlreadyDefined { name: String },
    #[error("malformed map entry {entry:?}: missing key/value separator {separator:?}")]
    MalformedMap { entry: String, separator: String },
    #[error("{which} separator must not be empty")]
    EmptySeparator { which: &'static str },
    #[error("invalid rank source {0:?} (expected one of: slurm, mpi, pmi)")]
    InvalidSource(String),
    #[error("rank source {0:?} is not implemented")]
    UnsupportedSource(String),
}

impl RenvError {
    /// Guard failures a launcher user is expected to act on.
    ///
    /// These are reported on stdout; everything else goes to stderr.
    pub fn is_guard(&self) -> bool {
        matches!(
            self,
            RenvError::MissingRankEnvironment { .. } | RenvError::AlreadyDefined { .. }
        )
    }
}
