/*!
HMAC with SHA-2 digests, truncated to a configurable tag size.

Key material and key formats are serialized as CBOR.
*/

use super::*;
use ::hmac::{Hmac, Mac as _, digest::KeyInit};
use keyset::{CaptureFieldErr, KeyData, KeyManager, KeyMaterialType};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const TYPE_URL: &str = "type.googleapis.com/google.crypto.tink.HmacKey";

const VERSION: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashType {
    Sha256,
    Sha384,
    Sha512,
}

impl HashType {
    /// Length of the untruncated HMAC output in bytes.
    pub fn digest_size(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmacParams {
    pub hash: HashType,
    pub tag_size: u32,
}

#[derive(Clone, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct HmacKey {
    #[zeroize(skip)]
    pub version: u32,
    #[zeroize(skip)]
    pub params: HmacParams,
    pub key_value: Vec<u8>,
}

impl core::fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HmacKey")
            .field("version", &self.version)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl HmacKey {
    pub fn to_bytes(&self) -> Result<Vec<u8>, keyset::Error> {
        let mut data = Vec::new();
        ciborium::into_writer(self, &mut data).map_field_err("HMAC key")?;
        Ok(data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, keyset::Error> {
        ciborium::from_reader(data).map_field_err("HMAC key")
    }
}

/// The parameters of a key yet to be generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmacKeyFormat {
    pub params: HmacParams,
    pub key_size: u32,
}

impl HmacKeyFormat {
    pub fn to_bytes(&self) -> Result<Vec<u8>, keyset::Error> {
        let mut data = Vec::new();
        ciborium::into_writer(self, &mut data).map_field_err("HMAC key format")?;
        Ok(data)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, keyset::Error> {
        ciborium::from_reader(data).map_field_err("HMAC key format")
    }
}

/// The raw HMAC primitive for a single key. Tags carry no output prefix.
pub struct HmacSha2 {
    hash: HashType,
    key: Zeroizing<Vec<u8>>,
    tag_size: usize,
}

impl HmacSha2 {
    pub fn new(hash: HashType, key: &[u8], tag_size: usize) -> Self {
        Self {
            hash,
            key: Zeroizing::new(key.to_vec()),
            tag_size,
        }
    }

    fn keyed<M: ::hmac::Mac + KeyInit>(&self, data: &[u8]) -> Result<M, Error> {
        let mut mac = <M as KeyInit>::new_from_slice(&self.key)
            .map_err(|e| keyset::Error::InvalidKey(e.to_string()))?;
        mac.update(data);
        Ok(mac)
    }
}

impl Mac for HmacSha2 {
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        let mut tag = match self.hash {
            HashType::Sha256 => self.keyed::<Hmac<Sha256>>(data)?.finalize().into_bytes().to_vec(),
            HashType::Sha384 => self.keyed::<Hmac<Sha384>>(data)?.finalize().into_bytes().to_vec(),
            HashType::Sha512 => self.keyed::<Hmac<Sha512>>(data)?.finalize().into_bytes().to_vec(),
        };
        tag.truncate(self.tag_size);
        Ok(tag)
    }

    fn verify_mac(&self, tag: &[u8], data: &[u8]) -> Result<(), Error> {
        if tag.len() != self.tag_size {
            return Err(Error::VerificationFailed);
        }

        // Constant time comparison against the leftmost tag_size bytes
        match self.hash {
            HashType::Sha256 => self.keyed::<Hmac<Sha256>>(data)?.verify_truncated_left(tag),
            HashType::Sha384 => self.keyed::<Hmac<Sha384>>(data)?.verify_truncated_left(tag),
            HashType::Sha512 => self.keyed::<Hmac<Sha512>>(data)?.verify_truncated_left(tag),
        }
        .map_err(|_| Error::VerificationFailed)
    }
}

/// Resolves [`HmacKey`] material into [`HmacSha2`] primitives.
pub struct HmacKeyManager {
    min_key_size: usize,
    min_tag_size: usize,
}

impl HmacKeyManager {
    pub fn new(config: &config::Config) -> Self {
        Self {
            min_key_size: config.min_key_size,
            min_tag_size: config.min_tag_size,
        }
    }

    fn validate_params(&self, params: &HmacParams) -> Result<(), keyset::Error> {
        let tag_size = params.tag_size as usize;
        if tag_size < self.min_tag_size {
            return Err(keyset::Error::InvalidKey(format!(
                "tag size {tag_size} is below the minimum of {}",
                self.min_tag_size
            )));
        }
        if tag_size > params.hash.digest_size() {
            return Err(keyset::Error::InvalidKey(format!(
                "tag size {tag_size} is too large for {:?}",
                params.hash
            )));
        }
        Ok(())
    }

    fn validate_key_size(&self, key_size: usize) -> Result<(), keyset::Error> {
        if key_size < self.min_key_size {
            Err(keyset::Error::InvalidKey(format!(
                "key size {key_size} is below the minimum of {}",
                self.min_key_size
            )))
        } else {
            Ok(())
        }
    }
}

impl KeyManager<dyn Mac> for HmacKeyManager {
    fn key_type(&self) -> &str {
        TYPE_URL
    }

    fn primitive(&self, key_value: &[u8]) -> Result<Box<dyn Mac>, keyset::Error> {
        let key = HmacKey::from_bytes(key_value)?;
        if key.version != VERSION {
            return Err(keyset::Error::InvalidKey(format!(
                "unsupported HMAC key version {}",
                key.version
            )));
        }
        self.validate_key_size(key.key_value.len())?;
        self.validate_params(&key.params)?;

        Ok(Box::new(HmacSha2::new(
            key.params.hash,
            &key.key_value,
            key.params.tag_size as usize,
        )))
    }

    fn new_key_data(&self, key_format: &[u8]) -> Result<KeyData, keyset::Error> {
        let format = HmacKeyFormat::from_bytes(key_format)?;
        self.validate_key_size(format.key_size as usize)?;
        self.validate_params(&format.params)?;

        let mut key = HmacKey {
            version: VERSION,
            params: format.params,
            key_value: vec![0; format.key_size as usize],
        };
        rand::rng().fill_bytes(&mut key.key_value);

        Ok(KeyData {
            type_url: TYPE_URL.into(),
            value: key.to_bytes()?,
            key_material_type: KeyMaterialType::Symmetric,
        })
    }
}
