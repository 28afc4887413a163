use crate::{PrivateKey, PublicKey, Scalar};

use crate::group::random_nonzero_scalar;
use ark_ff::UniformRand;
use rand::Rng;

// Same RNG for all tests
pub fn rng() -> rand::rngs::ThreadRng {
    rand::thread_rng()
}

/// generate a keypair
pub fn keygen<R: Rng + ?Sized>(rng: &mut R) -> (PrivateKey, PublicKey) {
    let secret_key = PrivateKey::generate(rng);
    let public_key = secret_key.to_public();
    (secret_key, public_key)
}

/// generate N keypairs
pub fn keygen_mul<R: Rng + ?Sized>(rng: &mut R, num: usize) -> (Vec<PrivateKey>, Vec<PublicKey>) {
    let mut secret_keys = Vec::new();
    let mut public_keys = Vec::new();
    for _ in 0..num {
        let (secret_key, public_key) = keygen(rng);
        secret_keys.push(secret_key);
        public_keys.push(public_key);
    }
    (secret_keys, public_keys)
}

/// generate `num` random group elements
pub fn random_points<R: Rng + ?Sized>(rng: &mut R, num: usize) -> Vec<PublicKey> {
    (0..num)
        .map(|_| PublicKey::from(crate::Point::rand(rng)))
        .collect()
}

/// generate `num` random non-zero scalars
pub fn random_scalars<R: Rng + ?Sized>(rng: &mut R, num: usize) -> Vec<Scalar> {
    (0..num).map(|_| random_nonzero_scalar(rng)).collect()
}
