use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum ClauseReason {
    #[error("format error")]
    Format,
    #[error("clause build error")]
    Build,
    #[error("unsupported operation")]
    Unsupported,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for ClauseReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::Format => 3001,
            Self::Build => 3002,
            Self::Unsupported => 3003,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type ClauseError = StructError<ClauseReason>;
pub type ClauseResult<T> = Result<T, ClauseError>;
