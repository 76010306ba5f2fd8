/*!
Key rotation.

A [`KeysetManager`] edits a keyset: it adds fresh keys, promotes a key to
primary, and retires old keys by disabling, destroying or deleting them. The
primary key is protected, it must be replaced before it can be retired.
*/

use super::*;
use rand::prelude::*;
use zeroize::Zeroize;

#[derive(Debug, Default)]
pub struct KeysetManager {
    keyset: Keyset,
}

impl KeysetManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_handle(handle: &KeysetHandle) -> Self {
        Self {
            keyset: handle.keyset().clone(),
        }
    }

    /// A handle to a copy of the current keyset.
    pub fn handle(&self) -> KeysetHandle {
        KeysetHandle::new(self.keyset.clone())
    }

    /// Generates a new enabled key from `template`, returning its id.
    ///
    /// The new key is not made primary.
    pub fn add<P: ?Sized + 'static>(
        &mut self,
        template: &KeyTemplate,
        registry: &Registry<P>,
    ) -> Result<u32, Error> {
        let key_data = registry.new_key_data(template)?;
        let key_id = self.new_key_id();
        debug!(
            "Adding key {key_id} of type {} with {:?} output prefix",
            template.type_url, template.output_prefix_type
        );

        self.keyset.keys.push(Key {
            key_data,
            status: KeyStatus::Enabled,
            key_id,
            output_prefix_type: template.output_prefix_type,
        });
        Ok(key_id)
    }

    /// Generates a new key from `template` and makes it the primary.
    pub fn rotate<P: ?Sized + 'static>(
        &mut self,
        template: &KeyTemplate,
        registry: &Registry<P>,
    ) -> Result<u32, Error> {
        let key_id = self.add(template, registry)?;
        self.set_primary(key_id)?;
        Ok(key_id)
    }

    pub fn set_primary(&mut self, key_id: u32) -> Result<(), Error> {
        let key = self.find(key_id)?;
        if !key.is_enabled() {
            return Err(Error::KeyNotEnabled(key_id));
        }

        debug!("Promoting key {key_id} to primary");
        self.keyset.primary_key_id = key_id;
        Ok(())
    }

    pub fn enable(&mut self, key_id: u32) -> Result<(), Error> {
        let key = self.find_mut(key_id)?;
        match key.status {
            KeyStatus::Destroyed => Err(Error::KeyDestroyed(key_id)),
            _ => {
                key.status = KeyStatus::Enabled;
                Ok(())
            }
        }
    }

    pub fn disable(&mut self, key_id: u32) -> Result<(), Error> {
        self.guard_primary(key_id, "disable")?;
        let key = self.find_mut(key_id)?;
        match key.status {
            KeyStatus::Destroyed => Err(Error::KeyDestroyed(key_id)),
            _ => {
                key.status = KeyStatus::Disabled;
                Ok(())
            }
        }
    }

    /// Wipes the key material of `key_id`, leaving a destroyed entry behind.
    pub fn destroy(&mut self, key_id: u32) -> Result<(), Error> {
        self.guard_primary(key_id, "destroy")?;
        let key = self.find_mut(key_id)?;
        key.key_data.zeroize();
        key.status = KeyStatus::Destroyed;
        debug!("Destroyed key {key_id}");
        Ok(())
    }

    /// Removes `key_id` from the keyset altogether.
    pub fn delete(&mut self, key_id: u32) -> Result<(), Error> {
        self.guard_primary(key_id, "delete")?;
        let index = self
            .keyset
            .keys
            .iter()
            .position(|k| k.key_id == key_id)
            .ok_or(Error::KeyNotFound(key_id))?;
        self.keyset.keys.remove(index);
        debug!("Deleted key {key_id}");
        Ok(())
    }

    fn guard_primary(&self, key_id: u32, operation: &'static str) -> Result<(), Error> {
        if key_id == self.keyset.primary_key_id && self.keyset.primary().is_some() {
            Err(Error::PrimaryKey(operation))
        } else {
            Ok(())
        }
    }

    fn find(&self, key_id: u32) -> Result<&Key, Error> {
        self.keyset.key(key_id).ok_or(Error::KeyNotFound(key_id))
    }

    fn find_mut(&mut self, key_id: u32) -> Result<&mut Key, Error> {
        self.keyset
            .keys
            .iter_mut()
            .find(|k| k.key_id == key_id)
            .ok_or(Error::KeyNotFound(key_id))
    }

    fn new_key_id(&self) -> u32 {
        let mut rng = rand::rng();
        loop {
            let key_id = rng.next_u32();
            if self.keyset.key(key_id).is_none() {
                return key_id;
            }
        }
    }
}
