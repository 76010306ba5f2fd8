/*!
A keyset resolved into one primitive per enabled key, indexed by output prefix.

The set is built once from a [`Keyset`] and a [`Registry`], and is immutable
afterwards. Lookups by prefix are what allow a multi-key primitive to find
the key that produced a value without trying every key in the set.
*/

use super::*;

/// A resolved key: its primitive plus the metadata needed to use it.
pub struct Entry<P: ?Sized> {
    primitive: Box<P>,
    key_id: u32,
    status: KeyStatus,
    output_prefix_type: OutputPrefixType,
    prefix: Prefix,
}

impl<P: ?Sized> Entry<P> {
    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    pub fn key_id(&self) -> u32 {
        self.key_id
    }

    pub fn status(&self) -> KeyStatus {
        self.status
    }

    pub fn output_prefix_type(&self) -> OutputPrefixType {
        self.output_prefix_type
    }

    /// The bytes this key prepends to its outputs, empty for raw keys.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }
}

impl<P: ?Sized> core::fmt::Debug for Entry<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Entry")
            .field("key_id", &self.key_id)
            .field("status", &self.status)
            .field("output_prefix_type", &self.output_prefix_type)
            .finish_non_exhaustive()
    }
}

pub struct PrimitiveSet<P: ?Sized> {
    entries: HashMap<Prefix, Vec<Entry<P>>>,
    // Bucket and position of the primary entry
    primary: (Prefix, usize),
}

impl<P: ?Sized + 'static> PrimitiveSet<P> {
    /// Validates `keyset` and resolves each of its enabled keys through `registry`.
    ///
    /// Keys that are not enabled are skipped entirely. The first key that
    /// fails to resolve aborts the build, and the returned error names its id.
    pub fn build(keyset: &Keyset, registry: &Registry<P>) -> Result<Self, Error> {
        keyset.validate()?;

        let mut entries: HashMap<Prefix, Vec<Entry<P>>> = HashMap::new();
        let mut primary = None;
        for key in &keyset.keys {
            if !key.is_enabled() {
                trace!("Skipping key {} with status {:?}", key.key_id, key.status);
                continue;
            }

            let primitive = registry
                .primitive(&key.key_data)
                .map_err(|e| e.for_key(key.key_id))?;

            let prefix = key.output_prefix();
            let bucket = entries.entry(prefix.clone()).or_default();
            if key.key_id == keyset.primary_key_id {
                primary = Some((prefix.clone(), bucket.len()));
            }

            debug!(
                "Resolved key {} of type {} with {:?} output prefix",
                key.key_id, key.key_data.type_url, key.output_prefix_type
            );

            bucket.push(Entry {
                primitive,
                key_id: key.key_id,
                status: key.status,
                output_prefix_type: key.output_prefix_type,
                prefix,
            });
        }

        // Validation guarantees exactly one enabled primary
        let primary = primary.ok_or(Error::MissingPrimary)?;
        Ok(Self { entries, primary })
    }
}

impl<P: ?Sized> PrimitiveSet<P> {
    /// The entry used for every new output.
    pub fn primary(&self) -> &Entry<P> {
        let (prefix, index) = &self.primary;
        &self.entries[prefix][*index]
    }

    /// All entries whose output prefix equals `prefix`, in keyset order.
    pub fn entries_with_prefix(&self, prefix: &[u8]) -> &[Entry<P>] {
        self.entries
            .get(prefix)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// All entries with the empty prefix, in keyset order.
    pub fn raw_entries(&self) -> &[Entry<P>] {
        self.entries_with_prefix(&[])
    }

    pub fn entries(&self) -> impl Iterator<Item = &Entry<P>> {
        self.entries.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<P: ?Sized> core::fmt::Debug for PrimitiveSet<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrimitiveSet")
            .field("primary", self.primary())
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_util::*;

    fn scenario() -> Keyset {
        Keyset::new(
            7213743,
            vec![
                echo_key(1234543, KeyStatus::Enabled, OutputPrefixType::Tink),
                echo_key(726329, KeyStatus::Enabled, OutputPrefixType::Raw),
                echo_key(7213743, KeyStatus::Enabled, OutputPrefixType::Tink),
                echo_key(55, KeyStatus::Disabled, OutputPrefixType::Tink),
                echo_key(66, KeyStatus::Enabled, OutputPrefixType::Raw),
            ],
        )
    }

    #[test]
    fn build_and_lookup() {
        let set = PrimitiveSet::build(&scenario(), &echo_registry()).expect("Failed to build");
        assert_eq!(set.len(), 4);
        assert!(!set.is_empty());

        let primary = set.primary();
        assert_eq!(primary.key_id(), 7213743);
        assert_eq!(primary.primitive().echo(), 7213743);
        assert_eq!(primary.prefix(), hex_literal::hex!("01006e12af"));

        let found = set.entries_with_prefix(&OutputPrefixType::Tink.prefix(1234543));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].primitive().echo(), 1234543);
        assert_eq!(found[0].status(), KeyStatus::Enabled);
    }

    #[test]
    fn raw_entries_are_grouped_in_keyset_order() {
        let set = PrimitiveSet::build(&scenario(), &echo_registry()).expect("Failed to build");
        let ids: Vec<_> = set.raw_entries().iter().map(Entry::key_id).collect();
        assert_eq!(ids, [726329, 66]);
        assert!(
            set.raw_entries()
                .iter()
                .all(|e| e.output_prefix_type() == OutputPrefixType::Raw)
        );
    }

    #[test]
    fn disabled_keys_are_invisible() {
        let set = PrimitiveSet::build(&scenario(), &echo_registry()).expect("Failed to build");
        assert!(
            set.entries_with_prefix(&OutputPrefixType::Tink.prefix(55))
                .is_empty()
        );
        assert!(set.entries().all(|e| e.key_id() != 55));
    }

    #[test]
    fn unknown_prefix_is_empty() {
        let set = PrimitiveSet::build(&scenario(), &echo_registry()).expect("Failed to build");
        assert!(set.entries_with_prefix(b"nope!").is_empty());
        assert!(
            set.entries_with_prefix(&OutputPrefixType::Legacy.prefix(1234543))
                .is_empty()
        );
    }

    #[test]
    fn invalid_keyset_is_rejected() {
        let err = PrimitiveSet::build(&Keyset::default(), &echo_registry()).unwrap_err();
        assert!(err.to_string().contains("at least one key"));

        let mut keyset = scenario();
        keyset.primary_key_id = 55;
        let err = PrimitiveSet::build(&keyset, &echo_registry()).unwrap_err();
        assert!(err.to_string().contains("valid primary key"));
    }

    #[test]
    fn resolution_failure_names_the_key() {
        let mut keyset = scenario();
        keyset.keys[1].key_data.value = b"garbage".to_vec();
        let err = PrimitiveSet::build(&keyset, &echo_registry()).unwrap_err();
        assert!(matches!(err, Error::Key { key_id: 726329, .. }));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);

        let mut keyset = scenario();
        keyset.keys[0].key_data.type_url = "type.example.com/Unknown".into();
        let err = PrimitiveSet::build(&keyset, &echo_registry()).unwrap_err();
        assert!(err.to_string().contains("key 1234543"));
        assert!(err.to_string().contains("unsupported key type"));
    }

    #[test]
    fn disabled_keys_are_not_resolved() {
        let mut keyset = scenario();
        keyset.keys[3].key_data.value = b"garbage".to_vec();
        PrimitiveSet::build(&keyset, &echo_registry()).expect("Disabled key was resolved");
    }

    #[test]
    fn later_keyset_changes_do_not_leak() {
        let mut keyset = scenario();
        let set = PrimitiveSet::build(&keyset, &echo_registry()).expect("Failed to build");
        keyset.keys.clear();
        keyset.primary_key_id = 0;
        assert_eq!(set.primary().key_id(), 7213743);
        assert_eq!(set.len(), 4);
    }
}
