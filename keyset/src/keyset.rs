use super::*;

/// An ordered collection of keys, one of which is the primary.
///
/// The order of `keys` carries no meaning beyond making iteration
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Keyset {
    pub primary_key_id: u32,

    #[cfg_attr(feature = "serde", serde(rename = "key", default))]
    pub keys: Vec<Key>,
}

impl Keyset {
    pub fn new(primary_key_id: u32, keys: Vec<Key>) -> Self {
        Self {
            primary_key_id,
            keys,
        }
    }

    /// Checks the keyset can back a primitive.
    ///
    /// In order, short-circuiting on the first failure:
    /// 1. there is at least one key,
    /// 2. at least one key is enabled,
    /// 3. exactly one enabled key carries the primary key id,
    /// 4. no two enabled keys share a key id.
    pub fn validate(&self) -> Result<(), Error> {
        if self.keys.is_empty() {
            return Err(Error::EmptyKeyset);
        }

        let mut enabled = self.keys.iter().filter(|k| k.is_enabled()).peekable();
        if enabled.peek().is_none() {
            return Err(Error::NoEnabledKey);
        }

        let mut primaries = 0usize;
        let mut duplicate = None;
        let mut seen = HashSet::new();
        for key in enabled {
            if key.key_id == self.primary_key_id {
                primaries += 1;
            }
            if !seen.insert(key.key_id) && duplicate.is_none() {
                duplicate = Some(key.key_id);
            }
        }

        if primaries != 1 {
            return Err(Error::MissingPrimary);
        }

        match duplicate {
            Some(key_id) => Err(Error::DuplicateKeyId(key_id)),
            None => Ok(()),
        }
    }

    /// The enabled key with id `primary_key_id`, if any.
    pub fn primary(&self) -> Option<&Key> {
        self.keys
            .iter()
            .find(|k| k.is_enabled() && k.key_id == self.primary_key_id)
    }

    /// The first key with id `key_id`, whatever its status.
    pub fn key(&self, key_id: u32) -> Option<&Key> {
        self.keys.iter().find(|k| k.key_id == key_id)
    }

    pub fn info(&self) -> KeysetInfo {
        KeysetInfo {
            primary_key_id: self.primary_key_id,
            key_info: self
                .keys
                .iter()
                .map(|k| KeyInfo {
                    type_url: k.key_data.type_url.clone(),
                    status: k.status,
                    key_id: k.key_id,
                    output_prefix_type: k.output_prefix_type,
                })
                .collect(),
        }
    }
}

/// A summary of a [`Keyset`] that carries no key material, and so is safe to log.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KeysetInfo {
    pub primary_key_id: u32,
    pub key_info: Vec<KeyInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KeyInfo {
    pub type_url: String,
    pub status: KeyStatus,
    pub key_id: u32,
    pub output_prefix_type: OutputPrefixType,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::echo_key;

    #[test]
    fn empty_keyset() {
        let err = Keyset::default().validate().unwrap_err();
        assert!(matches!(err, Error::EmptyKeyset));
        assert!(err.to_string().contains("at least one key"));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn no_enabled_key() {
        let keyset = Keyset::new(
            1,
            vec![
                echo_key(1, KeyStatus::Disabled, OutputPrefixType::Tink),
                echo_key(2, KeyStatus::Destroyed, OutputPrefixType::Raw),
            ],
        );
        assert!(matches!(keyset.validate(), Err(Error::NoEnabledKey)));
    }

    #[test]
    fn disabled_primary_is_not_a_primary() {
        let keyset = Keyset::new(
            1,
            vec![
                echo_key(1, KeyStatus::Disabled, OutputPrefixType::Tink),
                echo_key(2, KeyStatus::Enabled, OutputPrefixType::Tink),
            ],
        );
        let err = keyset.validate().unwrap_err();
        assert!(err.to_string().contains("valid primary key"));
        assert!(keyset.primary().is_none());
        assert_eq!(keyset.key(1).map(|k| k.status), Some(KeyStatus::Disabled));
    }

    #[test]
    fn ambiguous_primary() {
        let keyset = Keyset::new(
            7,
            vec![
                echo_key(7, KeyStatus::Enabled, OutputPrefixType::Tink),
                echo_key(7, KeyStatus::Enabled, OutputPrefixType::Raw),
            ],
        );
        assert!(matches!(keyset.validate(), Err(Error::MissingPrimary)));
    }

    #[test]
    fn duplicate_enabled_ids() {
        let keyset = Keyset::new(
            1,
            vec![
                echo_key(1, KeyStatus::Enabled, OutputPrefixType::Tink),
                echo_key(2, KeyStatus::Enabled, OutputPrefixType::Tink),
                echo_key(2, KeyStatus::Enabled, OutputPrefixType::Legacy),
            ],
        );
        assert!(matches!(keyset.validate(), Err(Error::DuplicateKeyId(2))));

        // Disabled keys may reuse an id
        let keyset = Keyset::new(
            1,
            vec![
                echo_key(1, KeyStatus::Enabled, OutputPrefixType::Tink),
                echo_key(1, KeyStatus::Disabled, OutputPrefixType::Tink),
            ],
        );
        keyset.validate().expect("Disabled duplicates are allowed");
    }

    #[test]
    fn info_has_no_key_material() {
        let keyset = Keyset::new(
            3,
            vec![
                echo_key(3, KeyStatus::Enabled, OutputPrefixType::Tink),
                echo_key(4, KeyStatus::Disabled, OutputPrefixType::Raw),
            ],
        );
        let info = keyset.info();
        assert_eq!(info.primary_key_id, 3);
        assert_eq!(info.key_info.len(), 2);
        assert_eq!(info.key_info[1].status, KeyStatus::Disabled);
        assert_eq!(info.key_info[1].output_prefix_type, OutputPrefixType::Raw);
        assert!(!format!("{keyset:?}").contains("value: ["));
    }
}
