use serde::{Deserialize, Serialize};

/// Limits applied by the HMAC key manager to keys and key formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum key length in bytes.
    pub min_key_size: usize,

    /// Minimum tag length in bytes.
    pub min_tag_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_key_size: 16,
            min_tag_size: 10,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let config: Config =
            serde_json::from_value(serde_json::json!({ "min_tag_size": 16 })).unwrap();
        assert_eq!(config.min_tag_size, 16);
        assert_eq!(config.min_key_size, Config::default().min_key_size);
    }
}
