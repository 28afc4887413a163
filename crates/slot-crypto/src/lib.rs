//! # Slot Leader Cryptography
//!
//! This crate implements the group arithmetic used by the slot-leader eligibility proofs:
//! secp256k1 keys and scalars, SEC1 point encoding, and a Blake2s based hash-to-scalar
//! function used for Fiat-Shamir challenges.

/// Private and public keys
pub(crate) mod keys;
pub use keys::{PrivateKey, PublicKey};

/// Scalar and point helpers over secp256k1
pub mod group;
pub use group::{Point, Scalar};

/// Hashing to the scalar field and Fiat-Shamir transcripts
pub mod hash_to_scalar;
pub use hash_to_scalar::{hash_to_scalar, Transcript};

/// Useful hash functions
pub mod hashers;
pub use hashers::{DirectHasher, Hasher};

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

use thiserror::Error;

/// Convenience result alias
pub type CryptoResult<T> = std::result::Result<T, CryptoError>;

/// Domain separator for the OR-proof challenge
pub const CHALLENGE_DOMAIN: &[u8] = b"SLchalng";

/// Domain separator for the per-branch slot scalars
pub const SLOT_DOMAIN: &[u8] = b"SLslotbs";

#[derive(Debug, Error, Clone, PartialEq)]
/// Error type
pub enum CryptoError {
    /// Scalar bytes were not a canonical, in-range field element
    #[error("invalid scalar: {0}")]
    InvalidScalar(&'static str),
    /// Point bytes did not describe a usable curve point
    #[error("invalid point: {0}")]
    InvalidPoint(&'static str),
    /// The point at infinity was supplied where a proper point is required
    #[error("point at infinity")]
    PointAtInfinity,
    /// Input had the wrong number of bytes
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    /// Hex decoding failed
    #[error("hex error: {0}")]
    Hex(#[from] hex::FromHexError),
    /// Personalization string cannot be larger than 8 bytes
    #[error("domain length is too large: {0}")]
    DomainTooLarge(usize),
}
