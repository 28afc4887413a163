use crate::{
    group::{
        ensure_nonzero, generator, random_nonzero_scalar, scalar_from_bytes, scalar_to_bytes,
        SCALAR_BYTES,
    },
    CryptoResult, PublicKey, Scalar,
};

use rand::Rng;
use std::fmt;

/// An epoch leader's private key: a non-zero scalar
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    sk: Scalar,
}

impl PrivateKey {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> PrivateKey {
        PrivateKey {
            sk: random_nonzero_scalar(rng),
        }
    }

    pub fn from_sk(sk: &Scalar) -> CryptoResult<PrivateKey> {
        ensure_nonzero(sk, "private key cannot be zero")?;
        Ok(PrivateKey { sk: *sk })
    }

    /// Reads a 32-byte big-endian private key
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<PrivateKey> {
        PrivateKey::from_sk(&scalar_from_bytes(bytes)?)
    }

    pub fn from_hex(data: &str) -> CryptoResult<PrivateKey> {
        PrivateKey::from_bytes(&hex::decode(data)?)
    }

    pub fn to_bytes(&self) -> [u8; SCALAR_BYTES] {
        scalar_to_bytes(&self.sk)
    }

    pub fn to_public(&self) -> PublicKey {
        PublicKey::from(generator() * self.sk)
    }
}

impl AsRef<Scalar> for PrivateKey {
    fn as_ref(&self) -> &Scalar {
        &self.sk
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey(..)")
    }
}
