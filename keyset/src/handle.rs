use super::*;

/// Owns a [`Keyset`] on behalf of callers that should not touch its key material.
///
/// Handles are obtained from a [`KeysetManager`], or through the restricted
/// [`CleartextKeysetHandle`](crate::CleartextKeysetHandle) entry point.
#[derive(Debug, Clone)]
pub struct KeysetHandle {
    keyset: Keyset,
}

impl KeysetHandle {
    pub(crate) fn new(keyset: Keyset) -> Self {
        Self { keyset }
    }

    pub(crate) fn keyset(&self) -> &Keyset {
        &self.keyset
    }

    /// Generates a keyset holding a single fresh key, made primary.
    pub fn generate_new<P: ?Sized + 'static>(
        template: &KeyTemplate,
        registry: &Registry<P>,
    ) -> Result<Self, Error> {
        let mut manager = KeysetManager::new();
        manager.rotate(template, registry)?;
        Ok(manager.handle())
    }

    pub fn keyset_info(&self) -> KeysetInfo {
        self.keyset.info()
    }

    /// Resolves the keyset into a [`PrimitiveSet`].
    ///
    /// The set is independent of the handle once built.
    pub fn primitives<P: ?Sized + 'static>(
        &self,
        registry: &Registry<P>,
    ) -> Result<PrimitiveSet<P>, Error> {
        PrimitiveSet::build(&self.keyset, registry)
    }
}
