/*!
Key templates for the standard HMAC parameter sets.

Every template produces keys with a TINK output prefix.
*/

use super::*;
use hmac_sha2::{HashType, HmacKeyFormat, HmacParams};
use keyset::{KeyTemplate, OutputPrefixType};

fn hmac_template(hash: HashType, key_size: u32, tag_size: u32) -> KeyTemplate {
    KeyTemplate {
        type_url: hmac_sha2::TYPE_URL.into(),
        value: HmacKeyFormat {
            params: HmacParams { hash, tag_size },
            key_size,
        }
        .to_bytes()
        .trace_expect("Failed to encode HMAC key format"),
        output_prefix_type: OutputPrefixType::Tink,
    }
}

/// 32 byte key, 16 byte HMAC-SHA256 tag.
pub fn hmac_sha256_128bittag() -> KeyTemplate {
    hmac_template(HashType::Sha256, 32, 16)
}

/// 32 byte key, 32 byte HMAC-SHA256 tag.
pub fn hmac_sha256_256bittag() -> KeyTemplate {
    hmac_template(HashType::Sha256, 32, 32)
}

/// 64 byte key, 32 byte HMAC-SHA512 tag.
pub fn hmac_sha512_256bittag() -> KeyTemplate {
    hmac_template(HashType::Sha512, 64, 32)
}

/// 64 byte key, 64 byte HMAC-SHA512 tag.
pub fn hmac_sha512_512bittag() -> KeyTemplate {
    hmac_template(HashType::Sha512, 64, 64)
}
