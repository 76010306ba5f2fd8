/*!
The output-prefix convention.

Values produced by a key whose [`OutputPrefixType`] is not `Raw` start with a
fixed five byte prefix: a start byte followed by the big-endian key id. A
verifier reads those five bytes back to narrow the set of candidate keys
before attempting any cryptographic check.

| prefix type          | length | layout                          |
|----------------------|--------|---------------------------------|
| `Raw`                | 0      | none                            |
| `Tink`               | 5      | `0x01` + big-endian key id      |
| `Legacy`, `Crunchy`  | 5      | `0x00` + big-endian key id      |
*/

use super::*;
use smallvec::SmallVec;

/// Length of the prefix of every non-raw output.
pub const NON_RAW_PREFIX_SIZE: usize = 5;

/// Length of the prefix of raw outputs.
pub const RAW_PREFIX_SIZE: usize = 0;

pub const TINK_START_BYTE: u8 = 0x01;

/// Shared by `Legacy` and `Crunchy` outputs.
pub const LEGACY_START_BYTE: u8 = 0x00;

/// Prefix bytes, held inline.
pub type Prefix = SmallVec<[u8; NON_RAW_PREFIX_SIZE]>;

impl OutputPrefixType {
    pub fn prefix(&self, key_id: u32) -> Prefix {
        match self {
            Self::Raw => Prefix::new(),
            Self::Tink => with_start_byte(TINK_START_BYTE, key_id),
            Self::Legacy | Self::Crunchy => with_start_byte(LEGACY_START_BYTE, key_id),
        }
    }

    pub fn prefix_size(&self) -> usize {
        match self {
            Self::Raw => RAW_PREFIX_SIZE,
            _ => NON_RAW_PREFIX_SIZE,
        }
    }
}

fn with_start_byte(start_byte: u8, key_id: u32) -> Prefix {
    let mut prefix = Prefix::new();
    prefix.push(start_byte);
    prefix.extend_from_slice(&key_id.to_be_bytes());
    prefix
}

/// Splits `output` into its would-be prefix and the remainder.
///
/// Returns `None` when `output` is too short to carry a non-raw prefix.
pub fn split(output: &[u8]) -> Option<(&[u8], &[u8])> {
    output.split_at_checked(NON_RAW_PREFIX_SIZE)
}

/// Reads the key id out of a prefixed output, if the first byte is a known start byte.
pub fn key_id(output: &[u8]) -> Option<u32> {
    let (prefix, _) = split(output)?;
    match prefix {
        [TINK_START_BYTE | LEGACY_START_BYTE, id @ ..] => {
            Some(u32::from_be_bytes(id.try_into().ok()?))
        }
        _ => None,
    }
}
