// Copyright (c) 2022-2023 The MobileCoin Foundation

//! BIP32 derivation path parsing and encoding
//!
//! Paths are parsed from the usual `m/44'/60'/0'/0/0` textual form,
//! with hardened segments folded in as `index + 0x80000000`.

use core::fmt;
use core::str::FromStr;

use byteorder::{BigEndian, ByteOrder};

use crate::ApduError;

/// Offset added to a segment index for hardened derivation
pub const HARDENED: u32 = 0x8000_0000;

/// Parsed BIP32 derivation path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    /// Build a path from raw segment values (hardened offset included)
    pub fn new(segments: Vec<u32>) -> Self {
        Self(segments)
    }

    /// Raw segment values, hardened offset included
    pub fn segments(&self) -> &[u32] {
        &self.0
    }

    /// Encode as a segment count byte followed by each segment as a
    /// big-endian u32
    pub fn to_bytes(&self) -> Result<Vec<u8>, ApduError> {
        // count must fit the single leading byte
        if self.0.len() > 0xff {
            return Err(ApduError::InvalidDerivationPath);
        }

        let mut out = vec![0u8; 1 + self.0.len() * 4];
        out[0] = self.0.len() as u8;

        for (i, seg) in self.0.iter().enumerate() {
            BigEndian::write_u32(&mut out[1 + i * 4..][..4], *seg);
        }

        Ok(out)
    }
}

/// Default Ethereum account path `m/44'/60'/0'/0/0`
impl Default for DerivationPath {
    fn default() -> Self {
        Self(vec![44 | HARDENED, 60 | HARDENED, HARDENED, 0, 0])
    }
}

impl FromStr for DerivationPath {
    type Err = ApduError;

    /// Parse a path matching `m(/<digits>'?)*`, rejecting segment
    /// indices at or above the hardening offset
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        if parts.next() != Some("m") {
            return Err(ApduError::InvalidDerivationPath);
        }

        let mut segments = Vec::new();
        for part in parts {
            let (digits, hardened) = match part.strip_suffix('\'') {
                Some(d) => (d, true),
                None => (part, false),
            };

            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ApduError::InvalidDerivationPath);
            }

            let index: u32 = digits
                .parse()
                .map_err(|_| ApduError::InvalidDerivationPath)?;
            if index >= HARDENED {
                return Err(ApduError::InvalidDerivationPath);
            }

            segments.push(if hardened { index | HARDENED } else { index });
        }

        Ok(Self(segments))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for seg in &self.0 {
            if seg & HARDENED != 0 {
                write!(f, "/{}'", seg & !HARDENED)?;
            } else {
                write!(f, "/{seg}")?;
            }
        }
        Ok(())
    }
}
