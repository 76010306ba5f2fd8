use super::*;

/// Turns serialized key material of one key type into primitives of family `P`.
pub trait KeyManager<P: ?Sized>: Send + Sync {
    /// The type identifier this manager handles.
    fn key_type(&self) -> &str;

    /// Parses and validates `key_value`, returning a ready-to-use primitive.
    fn primitive(&self, key_value: &[u8]) -> Result<Box<P>, Error>;

    /// Generates fresh key material from a serialized, type-specific key format.
    fn new_key_data(&self, key_format: &[u8]) -> Result<KeyData, Error>;

    fn does_support(&self, type_url: &str) -> bool {
        self.key_type() == type_url
    }
}

/// Maps type identifiers to the [`KeyManager`]s that resolve them.
///
/// A registry is an ordinary value: populate it at start-up, before any
/// keyset is resolved through it, then share it by reference.
pub struct Registry<P: ?Sized + 'static> {
    managers: HashMap<String, Box<dyn KeyManager<P>>>,
}

impl<P: ?Sized + 'static> Default for Registry<P> {
    fn default() -> Self {
        Self {
            managers: HashMap::new(),
        }
    }
}

impl<P: ?Sized + 'static> Registry<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `manager` under its [`KeyManager::key_type`].
    ///
    /// Each type identifier can be registered once.
    pub fn register(&mut self, manager: impl KeyManager<P> + 'static) -> Result<(), Error> {
        let type_url = manager.key_type().to_string();
        if self.managers.contains_key(&type_url) {
            return Err(Error::AlreadyRegistered(type_url));
        }

        debug!("Registered key manager for {type_url}");
        self.managers.insert(type_url, Box::new(manager));
        Ok(())
    }

    pub fn key_manager(&self, type_url: &str) -> Result<&dyn KeyManager<P>, Error> {
        self.managers
            .get(type_url)
            .map(|m| m.as_ref())
            .ok_or_else(|| Error::UnsupportedKeyType(type_url.to_string()))
    }

    pub fn is_registered(&self, type_url: &str) -> bool {
        self.managers.contains_key(type_url)
    }

    pub fn key_types(&self) -> impl Iterator<Item = &str> {
        self.managers.keys().map(String::as_str)
    }

    /// Resolves serialized key material of type `type_url` into a primitive.
    pub fn resolve(&self, type_url: &str, key_value: &[u8]) -> Result<Box<P>, Error> {
        self.key_manager(type_url)?.primitive(key_value)
    }

    pub fn primitive(&self, key_data: &KeyData) -> Result<Box<P>, Error> {
        self.resolve(&key_data.type_url, &key_data.value)
    }

    pub fn new_key_data(&self, template: &KeyTemplate) -> Result<KeyData, Error> {
        self.key_manager(&template.type_url)?
            .new_key_data(&template.value)
    }
}
