/*!
Message authentication codes over rotating keysets.

[`new_mac`] turns a [`KeysetHandle`](tessera_keyset::KeysetHandle) into a
[`MultiKeyMac`], which authenticates with the keyset's primary key and
accepts tags produced by any of its enabled keys. Key types are resolved
through an explicitly populated [`Registry`]; [`register_standard_key_types`]
adds the HMAC key manager.

```ignore
let mut registry = tessera_mac::Registry::new();
tessera_mac::register_standard_key_types(&mut registry, &Default::default())?;

let handle = KeysetHandle::generate_new(&templates::hmac_sha256_128bittag(), &registry)?;
let mac = tessera_mac::new_mac(&handle, &registry)?;

let tag = mac.compute_mac(b"data")?;
mac.verify_mac(&tag, b"data")?;
```
*/

use tessera_keyset as keyset;
use trace_err::*;
use tracing::*;

mod error;
mod factory;
mod multi_key;

pub mod config;
pub mod hmac_sha2;
pub mod templates;


pub use error::Error;
pub use factory::{new_mac, register_standard_key_types};
pub use keyset::ErrorKind;
pub use multi_key::MultiKeyMac;

/// Computes and verifies authentication tags.
///
/// Implementations are immutable once constructed and may be shared between
/// threads.
pub trait Mac: Send + Sync {
    fn compute_mac(&self, data: &[u8]) -> Result<Vec<u8>, Error>;

    /// Succeeds only if `tag` authenticates `data`; any mismatch is
    /// [`Error::VerificationFailed`].
    fn verify_mac(&self, tag: &[u8], data: &[u8]) -> Result<(), Error>;
}

/// A registry of key managers producing [`Mac`]s.
pub type Registry = keyset::Registry<dyn Mac>;

/// A keyset resolved into [`Mac`]s.
pub type PrimitiveSet = keyset::PrimitiveSet<dyn Mac>;
