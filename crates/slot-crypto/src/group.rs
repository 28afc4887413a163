use crate::{CryptoError, CryptoResult};

use ark_ec::Group;
use ark_ff::{BigInt, BigInteger, PrimeField, UniformRand, Zero};
use ark_secp256k1::{Fq, Fr, Projective};
use byteorder::{BigEndian, ByteOrder};
use rand::Rng;

/// An element of the secp256k1 scalar field (integers modulo the group order)
pub type Scalar = Fr;

/// A secp256k1 point in projective coordinates
pub type Point = Projective;

/// Size of a big-endian encoded scalar or base field coordinate
pub const SCALAR_BYTES: usize = 32;

/// The fixed generator of the group
pub fn generator() -> Point {
    Point::generator()
}

/// Samples a uniformly random scalar, rejecting zero
pub fn random_nonzero_scalar<R: Rng + ?Sized>(rng: &mut R) -> Scalar {
    loop {
        let s = Scalar::rand(rng);
        if !s.is_zero() {
            return s;
        }
    }
}

/// Fails with `InvalidScalar` if the scalar is zero
pub fn ensure_nonzero(scalar: &Scalar, what: &'static str) -> CryptoResult<()> {
    if scalar.is_zero() {
        return Err(CryptoError::InvalidScalar(what));
    }
    Ok(())
}

/// Sums scalars modulo the group order
pub fn sum_scalars<'a>(scalars: impl IntoIterator<Item = &'a Scalar>) -> Scalar {
    scalars.into_iter().sum()
}

/// Encodes a scalar as 32 big-endian bytes
pub fn scalar_to_bytes(scalar: &Scalar) -> [u8; SCALAR_BYTES] {
    let mut out = [0u8; SCALAR_BYTES];
    out.copy_from_slice(&scalar.into_bigint().to_bytes_be());
    out
}

/// Decodes 32 big-endian bytes into a scalar. Values at or above the group order are rejected
/// instead of being reduced, so every scalar has exactly one encoding.
pub fn scalar_from_bytes(bytes: &[u8]) -> CryptoResult<Scalar> {
    let limbs = be_limbs(bytes)?;
    Scalar::from_bigint(BigInt::new(limbs))
        .ok_or(CryptoError::InvalidScalar("value is not below the group order"))
}

pub(crate) fn coordinate_to_bytes(coordinate: &Fq) -> [u8; SCALAR_BYTES] {
    let mut out = [0u8; SCALAR_BYTES];
    out.copy_from_slice(&coordinate.into_bigint().to_bytes_be());
    out
}

pub(crate) fn coordinate_from_bytes(bytes: &[u8]) -> CryptoResult<Fq> {
    let limbs = be_limbs(bytes)?;
    Fq::from_bigint(BigInt::new(limbs))
        .ok_or(CryptoError::InvalidPoint("coordinate is not below the field modulus"))
}

// big-endian bytes to little-endian u64 limbs
fn be_limbs(bytes: &[u8]) -> CryptoResult<[u64; 4]> {
    if bytes.len() != SCALAR_BYTES {
        return Err(CryptoError::InvalidLength {
            expected: SCALAR_BYTES,
            actual: bytes.len(),
        });
    }
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.rchunks(8)) {
        *limb = BigEndian::read_u64(chunk);
    }
    Ok(limbs)
}
