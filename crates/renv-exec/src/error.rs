use std::io;

use thiserror::Error;

pub type ExecResult<T> = Result<T, ExecError>;

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("missing program")]
    MissingProgram,
    #[error("{program}: command not found")]
    NotFound { program: String },
    #[error("{program}: permission denied")]
    PermissionDenied { program: String },
    #[error("{program}: {reason}")]
    Io { program: String, reason: String },
}

impl ExecError {
    pub fn from_io(program: impl Into<String>, e: io::Error) -> Self {
        let program = program.into();
        match e.kind() {
            io::ErrorKind::NotFound => ExecError::NotFound { program },
            io::ErrorKind::PermissionDenied => ExecError::PermissionDenied { program },
            _ => ExecError::Io {
                program,
                reason: e.to_string(),
            },
        }
    }

    /// Exit status to report, following the shell convention.
    pub fn exit_code(&self) -> u8 {
        match self {
            ExecError::NotFound { .. } => 127,
            ExecError::PermissionDenied { .. } => 126,
            ExecError::MissingProgram | ExecError::Io { .. } => 1,
        }
    }
}
