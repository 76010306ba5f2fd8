/*!
Loading and storing keysets whose key material is not protected.

This is a restricted entry point. Everything read or written here is plain
key material, so it should only be used where the keyset is already known to
be non-sensitive, such as in tests, or where an outer layer protects it.

Keysets are represented as JSON:

```json
{
  "primaryKeyId": 42,
  "key": [{
    "keyData": {
      "typeUrl": "type.googleapis.com/google.crypto.tink.HmacKey",
      "value": "<base64>",
      "keyMaterialType": "SYMMETRIC"
    },
    "status": "ENABLED",
    "keyId": 42,
    "outputPrefixType": "TINK"
  }]
}
```

Parsing does not validate the keyset; that happens when it is resolved into
primitives.
*/

use super::*;
use std::io::{Read, Write};

pub struct CleartextKeysetHandle(());

impl CleartextKeysetHandle {
    pub fn parse(serialized: &[u8]) -> Result<KeysetHandle, Error> {
        serde_json::from_slice(serialized)
            .map(KeysetHandle::new)
            .map_err(from_json_err)
    }

    pub fn read(reader: impl Read) -> Result<KeysetHandle, Error> {
        serde_json::from_reader(reader)
            .map(KeysetHandle::new)
            .map_err(from_json_err)
    }

    pub fn write(handle: &KeysetHandle, writer: impl Write) -> Result<(), Error> {
        serde_json::to_writer(writer, handle.keyset()).map_err(from_json_err)
    }

    pub fn to_vec(handle: &KeysetHandle) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(handle.keyset()).map_err(from_json_err)
    }

    pub fn from_keyset(keyset: Keyset) -> KeysetHandle {
        KeysetHandle::new(keyset)
    }

    pub fn keyset(handle: &KeysetHandle) -> &Keyset {
        handle.keyset()
    }
}

fn from_json_err(e: serde_json::Error) -> Error {
    if e.is_io() {
        Error::Io(e.into())
    } else {
        Error::InvalidKeyset(e)
    }
}
