//! Holder addresses.

use blake2::digest::consts::U20;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

type Blake2b160 = Blake2b<U20>;

/// An opaque 20-byte holder identity.
///
/// The all-zero address is the "empty" address: it is what an omitted
/// referrer resolves to, and it is never credited by the exchange.
///
/// Human-readable formats (JSON, TOML) carry the `0x` hex form; binary
/// formats carry the raw bytes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 20]);

impl Address {
    pub const LEN: usize = 20;

    /// The empty address.
    pub const ZERO: Self = Self([0u8; 20]);

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Derive a deterministic address from a human label (Blake2b-160 of the UTF-8 bytes).
    ///
    /// Used by tooling so that `alice` always maps to the same holder.
    pub fn from_label(label: &str) -> Self {
        let digest = Blake2b160::digest(label.as_bytes());
        let mut out = [0u8; 20];
        out.copy_from_slice(&digest);
        Self(out)
    }

    /// Parse a hex address, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, TypesError> {
        let raw = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(raw).map_err(|e| TypesError::InvalidAddress(format!("{s}: {e}")))?;
        let bytes: [u8; 20] = bytes.try_into().map_err(|b: Vec<u8>| {
            TypesError::InvalidAddress(format!("{s}: expected {} bytes, got {}", Self::LEN, b.len()))
        })?;
        Ok(Self(bytes))
    }

    /// Resolve a holder reference: `0x`-prefixed input is parsed as hex,
    /// anything else is treated as a label.
    pub fn resolve(reference: &str) -> Result<Self, TypesError> {
        if reference.starts_with("0x") {
            Self::from_hex(reference)
        } else if reference.is_empty() {
            Err(TypesError::InvalidAddress("empty holder reference".into()))
        } else {
            Ok(Self::from_label(reference))
        }
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{}..)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; 20]>::deserialize(deserializer).map(Self)
        }
    }
}

impl Default for Address {
    fn default() -> Self {
        Self::ZERO
    }
}
