/*!
The error type shared by keyset validation, key resolution and the
keyset manager.

Every failure that callers can provoke with bad input classifies as
[`ErrorKind::InvalidArgument`]; see [`Error::kind`].
*/

use thiserror::Error;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied a malformed keyset, key, tag or template.
    InvalidArgument,
    /// A key manager is already registered for the key type.
    AlreadyExists,
    /// The failure did not originate from the caller's input, e.g. stream I/O.
    Internal,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("keyset must contain at least one key")]
    EmptyKeyset,

    #[error("keyset must contain at least one ENABLED key")]
    NoEnabledKey,

    #[error("keyset doesn't contain a valid primary key")]
    MissingPrimary,

    #[error("keyset contains more than one ENABLED key with id {0}")]
    DuplicateKeyId(u32),

    #[error("key {0} not found")]
    KeyNotFound(u32),

    #[error("key {0} is not ENABLED")]
    KeyNotEnabled(u32),

    #[error("key {0} has been destroyed")]
    KeyDestroyed(u32),

    #[error("cannot {0} the primary key")]
    PrimaryKey(&'static str),

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("a key manager for {0} is already registered")]
    AlreadyRegistered(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Resolution of a single key failed; `key_id` names the offending key.
    #[error("key {key_id}: {source}")]
    Key { key_id: u32, source: Box<Error> },

    #[error("Failed to decode {field}: {source}")]
    InvalidField {
        field: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[cfg(feature = "serde")]
    #[error("invalid keyset: {0}")]
    InvalidKeyset(serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AlreadyRegistered(_) => ErrorKind::AlreadyExists,
            Self::Io(_) => ErrorKind::Internal,
            Self::Key { source, .. } => source.kind(),
            _ => ErrorKind::InvalidArgument,
        }
    }

    /// Attaches the id of the key being processed when `self` occurred.
    pub fn for_key(self, key_id: u32) -> Self {
        Self::Key {
            key_id,
            source: Box::new(self),
        }
    }
}

/// Maps any error into [`Error::InvalidField`], recording what was being decoded.
pub trait CaptureFieldErr<T> {
    fn map_field_err(self, field: &'static str) -> Result<T, Error>;
}

impl<T, E: Into<Box<dyn std::error::Error + Send + Sync>>> CaptureFieldErr<T>
    for std::result::Result<T, E>
{
    fn map_field_err(self, field: &'static str) -> Result<T, Error> {
        self.map_err(|e| Error::InvalidField {
            field,
            source: e.into(),
        })
    }
}
