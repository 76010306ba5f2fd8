// Byte fields travel as standard padded base64 strings in JSON keysets
use base64::prelude::*;
use serde::{Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64_STANDARD.encode(value))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let s = String::deserialize(deserializer)?;
    BASE64_STANDARD
        .decode(s.as_bytes())
        .map_err(serde::de::Error::custom)
}
