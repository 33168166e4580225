use std::fmt;
use std::str::FromStr;

use crate::hex::{hex_decode, hex_to_string};
use crate::HashError;

/// The length of a SHA-1 digest in bytes.
pub const OID_LEN: usize = 20;
/// The length of an OID's hex representation.
pub const OID_HEX_LEN: usize = OID_LEN * 2;

/// A content-addressed object identifier: the SHA-1 digest of
/// `kind‖0x00‖payload`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; OID_LEN]);

impl ObjectId {
    /// Create an ObjectId from raw digest bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HashError> {
        if bytes.len() != OID_LEN {
            return Err(HashError::InvalidHashLength {
                expected: OID_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; OID_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }

    /// Parse a 40-hex-digit string as an OID. Accepts mixed case.
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        if hex.len() != OID_HEX_LEN {
            return Err(HashError::InvalidHexLength {
                expected: OID_HEX_LEN,
                actual: hex.len(),
            });
        }
        let mut bytes = [0u8; OID_LEN];
        hex_decode(hex, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Is `s` syntactically a literal OID: exactly 40 hex digits?
    pub fn looks_like_oid(s: &str) -> bool {
        s.len() == OID_HEX_LEN && crate::hex::is_valid_hex(s)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Lowercase hex representation.
    pub fn to_hex(&self) -> String {
        hex_to_string(&self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", &self.to_hex()[..8])
    }
}

impl FromStr for ObjectId {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
