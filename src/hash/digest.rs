use sha2::Digest as _;

use crate::foundation::error::{MandalaError, MandalaResult};

/// Number of bytes in a [`Digest`].
pub const DIGEST_LEN: usize = 32;

/// 256-bit digest of an intention, exposed as 32 independent bytes.
///
/// A digest is immutable for the lifetime of one generated pattern. Equal input strings
/// (exact bytes, including whitespace and case) always yield equal digests.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// SHA-256 over the UTF-8 bytes of `text`. Total: the empty string is a valid input.
    pub fn of_text(text: &str) -> Self {
        let out = sha2::Sha256::digest(text.as_bytes());
        Self(out.into())
    }

    /// Wrap raw digest bytes.
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Digest where every byte is `b`; used for boundary checks.
    pub fn filled(b: u8) -> Self {
        Self([b; DIGEST_LEN])
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Byte at `offset mod 32`. Offsets past the end wrap around instead of panicking.
    pub fn byte(&self, offset: usize) -> u8 {
        self.0[offset % DIGEST_LEN]
    }

    /// Lowercase 64-character hex form.
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(DIGEST_LEN * 2);
        for b in self.0 {
            out.push_str(&format!("{:02x}", b));
        }
        out
    }

    /// Parse a 64-character hex string (either case).
    pub fn from_hex(s: &str) -> MandalaResult<Self> {
        let s = s.trim();
        if !s.is_ascii() || s.len() % 2 != 0 {
            return Err(MandalaError::validation(format!(
                "digest hex must be an even-length ascii string, got {} chars",
                s.chars().count()
            )));
        }
        let bytes = (0..s.len())
            .step_by(2)
            .map(|i| {
                u8::from_str_radix(&s[i..i + 2], 16)
                    .map_err(|e| MandalaError::validation(format!("invalid digest hex: {e}")))
            })
            .collect::<MandalaResult<Vec<u8>>>()?;
        Self::try_from(bytes.as_slice())
    }

    /// Number of byte positions where `self` and `other` differ.
    pub fn differing_bytes(&self, other: &Self) -> usize {
        self.0.iter().zip(other.0.iter()).filter(|(a, b)| a != b).count()
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = MandalaError;

    fn try_from(bytes: &[u8]) -> MandalaResult<Self> {
        let arr: [u8; DIGEST_LEN] = bytes
            .try_into()
            .map_err(|_| MandalaError::invalid_digest_length(bytes.len()))?;
        Ok(Self(arr))
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Digest").field(&self.to_hex()).finish()
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl serde::Serialize for Digest {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Digest {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hash/digest.rs"]
mod tests;
