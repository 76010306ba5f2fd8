use super::*;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Lifecycle state of a key within a keyset.
///
/// Only [`KeyStatus::Enabled`] keys are resolved into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum KeyStatus {
    Enabled,
    Disabled,
    Destroyed,
}

/// How values produced with a key are prefixed, see [`output_prefix`](crate::output_prefix).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OutputPrefixType {
    Tink,
    Legacy,
    Raw,
    Crunchy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum KeyMaterialType {
    Symmetric,
    AsymmetricPrivate,
    AsymmetricPublic,
    Remote,
}

/// Serialized key material, tagged with the type identifier a
/// [`KeyManager`](crate::KeyManager) is registered under.
///
/// The material is wiped when the value is dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KeyData {
    pub type_url: String,

    #[cfg_attr(feature = "serde", serde(with = "crate::base64_value"))]
    pub value: Vec<u8>,

    #[zeroize(skip)]
    pub key_material_type: KeyMaterialType,
}

impl core::fmt::Debug for KeyData {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyData")
            .field("type_url", &self.type_url)
            .field("value", &format_args!("<{} bytes redacted>", self.value.len()))
            .field("key_material_type", &self.key_material_type)
            .finish()
    }
}

/// One entry of a [`Keyset`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Key {
    pub key_data: KeyData,
    pub status: KeyStatus,
    pub key_id: u32,
    pub output_prefix_type: OutputPrefixType,
}

impl Key {
    pub fn is_enabled(&self) -> bool {
        self.status == KeyStatus::Enabled
    }

    /// The bytes prepended to every value produced with this key.
    pub fn output_prefix(&self) -> Prefix {
        self.output_prefix_type.prefix(self.key_id)
    }
}

/// Describes how to generate a new key: the key type, a type-specific
/// serialized key format, and the prefix type the new key will carry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KeyTemplate {
    pub type_url: String,

    #[cfg_attr(feature = "serde", serde(with = "crate::base64_value"))]
    pub value: Vec<u8>,

    pub output_prefix_type: OutputPrefixType,
}
