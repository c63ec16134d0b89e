//! Shared error vocabulary.
//!
//! Every crate keeps its own `thiserror` enum, but all of them map onto the stable
//! [`ErrorKind`] keys so callers can match on a kind (or on the human-readable
//! reason string) without depending on crate-internal variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors raised while constructing the types in this crate.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("price must be greater than zero")]
    ZeroPrice,

    #[error("referral chain too long: {given} > {max}")]
    TooManyReferrers { given: usize, max: usize },

    #[error("invalid protocol parameters: {0}")]
    InvalidParams(String),
}

impl TypesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZeroPrice => ErrorKind::InvalidPrice,
            Self::TooManyReferrers { .. } => ErrorKind::TooManyReferrers,
            Self::InvalidAddress(_) | Self::InvalidParams(_) => ErrorKind::Config,
        }
    }
}

/// Stable, string-keyed error kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ZeroAmount,
    InsufficientBalance,
    InsufficientTreasury,
    InvalidPrice,
    NotOwner,
    EpochNotElapsed,
    WindowNotElapsed,
    AlreadyExecuted,
    TooManyReferrers,
    TransferFailed,
    Overflow,
    Storage,
    Config,
}

/// Broad failure classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Bad input, rejected before any state change.
    Validation,
    /// Caller lacks the required identity.
    Authorization,
    /// A time gate is still closed; retrying later resolves it.
    Timing,
    /// Balance or treasury shortfall.
    Insufficiency,
    /// Arithmetic, storage or external-transfer failure.
    Economic,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "ZeroAmount",
            Self::InsufficientBalance => "InsufficientBalance",
            Self::InsufficientTreasury => "InsufficientTreasury",
            Self::InvalidPrice => "InvalidPrice",
            Self::NotOwner => "NotOwner",
            Self::EpochNotElapsed => "EpochNotElapsed",
            Self::WindowNotElapsed => "WindowNotElapsed",
            Self::AlreadyExecuted => "AlreadyExecuted",
            Self::TooManyReferrers => "TooManyReferrers",
            Self::TransferFailed => "TransferFailed",
            Self::Overflow => "Overflow",
            Self::Storage => "Storage",
            Self::Config => "Config",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::ZeroAmount | Self::InvalidPrice | Self::TooManyReferrers | Self::Config => {
                ErrorClass::Validation
            }
            Self::NotOwner => ErrorClass::Authorization,
            Self::EpochNotElapsed | Self::WindowNotElapsed | Self::AlreadyExecuted => {
                ErrorClass::Timing
            }
            Self::InsufficientBalance | Self::InsufficientTreasury => ErrorClass::Insufficiency,
            Self::TransferFailed | Self::Overflow | Self::Storage => ErrorClass::Economic,
        }
    }

    /// Whether waiting (without any other action) can make the call succeed.
    pub fn is_retriable(&self) -> bool {
        self.class() == ErrorClass::Timing
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_render_their_stable_key() {
        assert_eq!(ErrorKind::ZeroAmount.to_string(), "ZeroAmount");
        assert_eq!(ErrorKind::EpochNotElapsed.as_str(), "EpochNotElapsed");
        assert_eq!(ErrorKind::AlreadyExecuted.as_str(), "AlreadyExecuted");
    }

    #[test]
    fn only_timing_errors_are_retriable() {
        assert!(ErrorKind::WindowNotElapsed.is_retriable());
        assert!(ErrorKind::EpochNotElapsed.is_retriable());
        assert!(!ErrorKind::InsufficientBalance.is_retriable());
        assert!(!ErrorKind::NotOwner.is_retriable());
        assert_eq!(ErrorKind::NotOwner.class(), ErrorClass::Authorization);
    }

    #[test]
    fn types_errors_map_to_kinds() {
        assert_eq!(TypesError::ZeroPrice.kind(), ErrorKind::InvalidPrice);
        assert_eq!(
            TypesError::TooManyReferrers { given: 4, max: 3 }.kind(),
            ErrorKind::TooManyReferrers
        );
    }
}
