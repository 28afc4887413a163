use crate::{
    group::{coordinate_from_bytes, coordinate_to_bytes, generator, SCALAR_BYTES},
    CryptoError, CryptoResult, Point, PrivateKey,
};

use ark_ec::{AffineRepr, CurveGroup};
use ark_secp256k1::Affine;

const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;
const SEC1_IDENTITY_TAG: u8 = 0x00;

/// A secp256k1 public key or, more generally, any group element carried by the proof
/// protocol (SMA pieces, blinded commitments).
///
/// The wrapped point is not necessarily valid: keys decoded with
/// [`PublicKey::from_sec1_unchecked`] only have canonical coordinates, and callers that
/// need a real group element must check [`PublicKey::is_valid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey(Affine);

impl From<Point> for PublicKey {
    fn from(pk: Point) -> PublicKey {
        PublicKey(pk.into_affine())
    }
}

impl From<Affine> for PublicKey {
    fn from(pk: Affine) -> PublicKey {
        PublicKey(pk)
    }
}

impl From<&PrivateKey> for PublicKey {
    fn from(sk: &PrivateKey) -> PublicKey {
        PublicKey::from(generator() * sk.as_ref())
    }
}

impl AsRef<Affine> for PublicKey {
    fn as_ref(&self) -> &Affine {
        &self.0
    }
}

impl PublicKey {
    /// Length of the SEC1 uncompressed encoding `0x04 || X || Y`
    pub const SEC1_UNCOMPRESSED_LEN: usize = 1 + 2 * SCALAR_BYTES;

    pub fn into_projective(&self) -> Point {
        self.0.into_group()
    }

    pub fn is_identity(&self) -> bool {
        self.0.infinity
    }

    /// True for points on the curve, in the prime order subgroup and not at infinity
    pub fn is_valid(&self) -> bool {
        !self.0.infinity
            && self.0.is_on_curve()
            && self.0.is_in_correct_subgroup_assuming_on_curve()
    }

    /// Same as [`PublicKey::is_valid`] but reporting the reason
    pub fn validate(&self) -> CryptoResult<()> {
        if self.0.infinity {
            return Err(CryptoError::PointAtInfinity);
        }
        if !self.0.is_on_curve() {
            return Err(CryptoError::InvalidPoint("point is not on the curve"));
        }
        if !self.0.is_in_correct_subgroup_assuming_on_curve() {
            return Err(CryptoError::InvalidPoint("point is not in the prime order subgroup"));
        }
        Ok(())
    }

    /// SEC1 encoding: `0x04 || X || Y` with big-endian coordinates, or the single byte
    /// `0x00` for the point at infinity
    pub fn to_sec1(&self) -> Vec<u8> {
        if self.0.infinity {
            return vec![SEC1_IDENTITY_TAG];
        }
        let mut out = Vec::with_capacity(Self::SEC1_UNCOMPRESSED_LEN);
        out.push(SEC1_UNCOMPRESSED_TAG);
        out.extend_from_slice(&coordinate_to_bytes(&self.0.x));
        out.extend_from_slice(&coordinate_to_bytes(&self.0.y));
        out
    }

    /// Parses a SEC1 encoding without checking curve membership. Only the framing and the
    /// canonicity of the coordinates are checked.
    pub fn from_sec1_unchecked(data: &[u8]) -> CryptoResult<PublicKey> {
        match data.first() {
            Some(&SEC1_IDENTITY_TAG) if data.len() == 1 => Ok(PublicKey(Affine::identity())),
            Some(&SEC1_UNCOMPRESSED_TAG) => {
                if data.len() != Self::SEC1_UNCOMPRESSED_LEN {
                    return Err(CryptoError::InvalidLength {
                        expected: Self::SEC1_UNCOMPRESSED_LEN,
                        actual: data.len(),
                    });
                }
                let x = coordinate_from_bytes(&data[1..1 + SCALAR_BYTES])?;
                let y = coordinate_from_bytes(&data[1 + SCALAR_BYTES..])?;
                Ok(PublicKey(Affine::new_unchecked(x, y)))
            }
            Some(_) => Err(CryptoError::InvalidPoint("unsupported SEC1 tag")),
            None => Err(CryptoError::InvalidLength {
                expected: Self::SEC1_UNCOMPRESSED_LEN,
                actual: 0,
            }),
        }
    }

    /// Parses a SEC1 encoding and checks that it is a valid, non-identity group element
    pub fn from_sec1(data: &[u8]) -> CryptoResult<PublicKey> {
        let pk = PublicKey::from_sec1_unchecked(data)?;
        pk.validate()?;
        Ok(pk)
    }

    pub fn from_hex(data: &str) -> CryptoResult<PublicKey> {
        PublicKey::from_sec1(&hex::decode(data)?)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.to_sec1())
    }
}
