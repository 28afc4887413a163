//! Deterministic hashing into the secp256k1 scalar field.
//!
//! The input is hashed with a [`Hasher`] to 48 bytes and the big-endian integer is reduced
//! modulo the group order. Using 16 bytes more than the size of the order keeps the bias of
//! the reduction below 2^-128.
//!
//! # Examples
//!
//! ```rust
//! use slot_crypto::{hash_to_scalar, DirectHasher, Transcript, CHALLENGE_DOMAIN};
//!
//! let e = hash_to_scalar(&DirectHasher, CHALLENGE_DOMAIN, b"some data").unwrap();
//!
//! // or absorb structured data through a transcript
//! let mut transcript = Transcript::new(CHALLENGE_DOMAIN);
//! transcript.append_u64(b"slot", 7);
//! transcript.append_bytes(b"rb", b"beacon");
//! let challenge = transcript.challenge().unwrap();
//! assert_ne!(challenge, e);
//! ```

use crate::{
    group::scalar_to_bytes,
    hashers::{DirectHasher, Hasher},
    CryptoError, CryptoResult, PublicKey, Scalar,
};

use ark_ff::PrimeField;
use byteorder::{ByteOrder, LittleEndian};
use log::trace;

/// Number of XOF bytes reduced into one scalar
pub const WIDE_SCALAR_BYTES: usize = 48;

/// Hashes `message` under `domain` to a scalar
pub fn hash_to_scalar<H: Hasher<Error = CryptoError>>(
    hasher: &H,
    domain: &[u8],
    message: &[u8],
) -> CryptoResult<Scalar> {
    let bytes = hasher.hash(domain, message, WIDE_SCALAR_BYTES)?;
    let scalar = Scalar::from_be_bytes_mod_order(&bytes);
    trace!(
        "hashed {} bytes to scalar {}",
        message.len(),
        hex::encode(scalar_to_bytes(&scalar))
    );
    Ok(scalar)
}

/// Accumulates labelled, length-prefixed data and squeezes a Fiat-Shamir challenge from it.
///
/// Every item is written as `label_len (u8) || label || data_len (u32 LE) || data`, so two
/// different sequences of appends can never produce the same buffer.
#[derive(Clone, Debug)]
pub struct Transcript {
    domain: &'static [u8],
    buffer: Vec<u8>,
}

impl Transcript {
    pub fn new(domain: &'static [u8]) -> Self {
        Self {
            domain,
            buffer: Vec::new(),
        }
    }

    pub fn append_bytes(&mut self, label: &'static [u8], data: &[u8]) -> &mut Self {
        let mut len = [0u8; 4];
        LittleEndian::write_u32(&mut len, data.len() as u32);
        self.buffer.push(label.len() as u8);
        self.buffer.extend_from_slice(label);
        self.buffer.extend_from_slice(&len);
        self.buffer.extend_from_slice(data);
        self
    }

    pub fn append_u64(&mut self, label: &'static [u8], value: u64) -> &mut Self {
        let mut bytes = [0u8; 8];
        LittleEndian::write_u64(&mut bytes, value);
        self.append_bytes(label, &bytes)
    }

    pub fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar) -> &mut Self {
        self.append_bytes(label, &scalar_to_bytes(scalar))
    }

    pub fn append_point(&mut self, label: &'static [u8], point: &PublicKey) -> &mut Self {
        self.append_bytes(label, &point.to_sec1())
    }

    /// The absorbed bytes, excluding the domain
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn challenge(&self) -> CryptoResult<Scalar> {
        hash_to_scalar(&DirectHasher, self.domain, &self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{group::scalar_from_bytes, PrivateKey, CHALLENGE_DOMAIN, SLOT_DOMAIN};
    use rand::thread_rng;

    #[test]
    fn conformance_vector() {
        let e = hash_to_scalar(&DirectHasher, CHALLENGE_DOMAIN, b"slot leader").unwrap();
        let expected = scalar_from_bytes(
            &hex::decode("51d66733d427083cc6d10ed788994b8918308b6a280042387bfc2c967760adc1")
                .unwrap(),
        )
        .unwrap();
        assert_eq!(e, expected);
    }

    #[test]
    fn domain_separation() {
        let a = hash_to_scalar(&DirectHasher, CHALLENGE_DOMAIN, b"data").unwrap();
        let b = hash_to_scalar(&DirectHasher, SLOT_DOMAIN, b"data").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn transcript_is_length_prefixed() {
        let mut t1 = Transcript::new(CHALLENGE_DOMAIN);
        t1.append_bytes(b"a", b"bc").append_bytes(b"a", b"d");
        let mut t2 = Transcript::new(CHALLENGE_DOMAIN);
        t2.append_bytes(b"a", b"b").append_bytes(b"a", b"cd");
        assert_ne!(t1.as_bytes(), t2.as_bytes());
        assert_ne!(t1.challenge().unwrap(), t2.challenge().unwrap());
    }

    #[test]
    fn transcript_is_deterministic() {
        let pk = PrivateKey::generate(&mut thread_rng()).to_public();
        let build = || {
            let mut t = Transcript::new(CHALLENGE_DOMAIN);
            t.append_u64(b"slot", 3)
                .append_point(b"pk", &pk)
                .append_scalar(b"rb", &Scalar::from(42u64));
            t.challenge().unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn transcript_domain_matters() {
        let mut t1 = Transcript::new(CHALLENGE_DOMAIN);
        t1.append_u64(b"slot", 1);
        let mut t2 = Transcript::new(SLOT_DOMAIN);
        t2.append_u64(b"slot", 1);
        assert_eq!(t1.as_bytes(), t2.as_bytes());
        assert_ne!(t1.challenge().unwrap(), t2.challenge().unwrap());
    }
}
