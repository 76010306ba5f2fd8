use super::*;
use keyset::KeysetHandle;

/// Registers the key managers for every MAC key type this crate implements.
///
/// Fails with [`ErrorKind::AlreadyExists`] if any of them is already
/// present in `registry`.
pub fn register_standard_key_types(
    registry: &mut Registry,
    config: &config::Config,
) -> Result<(), keyset::Error> {
    registry.register(hmac_sha2::HmacKeyManager::new(config))
}

/// Resolves every enabled key of `handle` and wraps them in a [`MultiKeyMac`].
///
/// The keyset is validated first, and the first key that fails to resolve
/// aborts construction with an error naming its id.
pub fn new_mac(handle: &KeysetHandle, registry: &Registry) -> Result<MultiKeyMac, Error> {
    let primitives = handle.primitives(registry).inspect_err(|e| {
        debug!("Failed to build MAC primitive set: {e}");
    })?;

    debug!(
        "Built MAC over {} key(s), primary key {}",
        primitives.len(),
        primitives.primary().key_id()
    );
    Ok(MultiKeyMac::new(primitives))
}
