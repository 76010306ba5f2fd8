use super::*;
use keyset::output_prefix;

/// A [`Mac`] backed by every enabled key of a keyset.
///
/// New tags are computed with the primary key and carry its output prefix.
/// A tag verifies if any key whose prefix it carries accepts it, or failing
/// that, if any raw key accepts the whole tag.
pub struct MultiKeyMac {
    primitives: PrimitiveSet,
}

impl MultiKeyMac {
    pub fn new(primitives: PrimitiveSet) -> Self {
        Self { primitives }
    }

    pub fn primitives(&self) -> &PrimitiveSet {
        &self.primitives
    }
}

impl core::fmt::Debug for MultiKeyMac {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MultiKeyMac")
            .field("primitives", &self.primitives)
            .finish()
    }
}

impl Mac for MultiKeyMac {
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        let primary = self.primitives.primary();
        let tag = primary.primitive().compute_mac(data)?;

        let mut output = Vec::with_capacity(primary.prefix().len() + tag.len());
        output.extend_from_slice(primary.prefix());
        output.extend_from_slice(&tag);
        Ok(output)
    }

    fn verify_mac(&self, tag: &[u8], data: &[u8]) -> Result<(), Error> {
        if let Some((prefix, raw_tag)) = output_prefix::split(tag) {
            for entry in self.primitives.entries_with_prefix(prefix) {
                if entry.primitive().verify_mac(raw_tag, data).is_ok() {
                    return Ok(());
                }
                trace!("Key {} rejected prefixed tag", entry.key_id());
            }
        }

        let raw_entries = self.primitives.raw_entries();
        if !raw_entries.is_empty() {
            trace!("Trying {} raw key(s) against the whole tag", raw_entries.len());
        }
        for entry in raw_entries {
            if entry.primitive().verify_mac(tag, data).is_ok() {
                return Ok(());
            }
            trace!("Raw key {} rejected tag", entry.key_id());
        }

        Err(Error::VerificationFailed)
    }
}
