/*!
Keysets are versioned collections of keys with exactly one primary key.

This crate holds the data model shared by every primitive family, the
output-prefix convention that tags produced values with the id of the key
that made them, and the [`PrimitiveSet`] that resolves a keyset into one
primitive per enabled key through an explicitly constructed [`Registry`].
*/

use hashbrown::{HashMap, HashSet};
use tracing::*;

mod error;

pub mod handle;
pub mod key;
pub mod keyset;
pub mod manager;
pub mod output_prefix;
pub mod primitive_set;
pub mod registry;

#[cfg(feature = "serde")]
mod base64_value;

#[cfg(feature = "serde")]
pub mod cleartext;

#[cfg(test)]
mod test_util;

pub use error::{CaptureFieldErr, Error, ErrorKind};
pub use handle::KeysetHandle;
pub use key::{Key, KeyData, KeyMaterialType, KeyStatus, KeyTemplate, OutputPrefixType};
pub use keyset::{KeyInfo, Keyset, KeysetInfo};
pub use manager::KeysetManager;
pub use output_prefix::Prefix;
pub use primitive_set::{Entry, PrimitiveSet};
pub use registry::{KeyManager, Registry};

#[cfg(feature = "serde")]
pub use cleartext::CleartextKeysetHandle;
