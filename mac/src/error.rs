use super::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The single failure reported for any tag that does not verify.
    #[error("verification failed")]
    VerificationFailed,

    #[error(transparent)]
    Keyset(#[from] keyset::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::VerificationFailed => ErrorKind::InvalidArgument,
            Self::Keyset(e) => e.kind(),
        }
    }
}
