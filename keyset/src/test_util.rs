// A trivial primitive family used to exercise the generic machinery
use super::*;

pub const ECHO_TYPE_URL: &str = "type.example.com/test.EchoKey";

/// Reports the id stored in its key material.
pub trait Echo: Send + Sync {
    fn echo(&self) -> u32;
}

struct EchoPrimitive(u32);

impl Echo for EchoPrimitive {
    fn echo(&self) -> u32 {
        self.0
    }
}

pub struct EchoKeyManager;

impl KeyManager<dyn Echo> for EchoKeyManager {
    fn key_type(&self) -> &str {
        ECHO_TYPE_URL
    }

    fn primitive(&self, key_value: &[u8]) -> Result<Box<dyn Echo>, Error> {
        let value: [u8; 4] = key_value
            .try_into()
            .map_err(|_| Error::InvalidKey(format!("{} byte echo key", key_value.len())))?;
        Ok(Box::new(EchoPrimitive(u32::from_be_bytes(value))))
    }

    fn new_key_data(&self, key_format: &[u8]) -> Result<KeyData, Error> {
        self.primitive(key_format)?;
        Ok(KeyData {
            type_url: ECHO_TYPE_URL.into(),
            value: key_format.to_vec(),
            key_material_type: KeyMaterialType::Symmetric,
        })
    }
}

pub fn echo_registry() -> Registry<dyn Echo> {
    let mut registry = Registry::new();
    registry
        .register(EchoKeyManager)
        .expect("Failed to register echo key manager");
    registry
}

pub fn echo_template(value: u32, output_prefix_type: OutputPrefixType) -> KeyTemplate {
    KeyTemplate {
        type_url: ECHO_TYPE_URL.into(),
        value: value.to_be_bytes().to_vec(),
        output_prefix_type,
    }
}

/// A key whose echo value equals its key id.
pub fn echo_key(key_id: u32, status: KeyStatus, output_prefix_type: OutputPrefixType) -> Key {
    Key {
        key_data: KeyData {
            type_url: ECHO_TYPE_URL.into(),
            value: key_id.to_be_bytes().to_vec(),
            key_material_type: KeyMaterialType::Symmetric,
        },
        status,
        key_id,
        output_prefix_type,
    }
}
