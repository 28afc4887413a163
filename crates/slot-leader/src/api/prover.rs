use super::{
    check_length, fiat_shamir_challenge, slot_randomizer, slot_scalar, ProofError, ProofMessage,
    ProofResponse, ProofTriple,
};
use crate::context::EpochContext;
use slot_crypto::{
    group::{ensure_nonzero, generator, random_nonzero_scalar, sum_scalars},
    PrivateKey, Scalar,
};

use ark_ff::{UniformRand, Zero};
use rand::Rng;
use tracing::{debug, debug_span, warn};

/// Proves that the holder of `private_key` is one of the leaders of `ctx` and may produce the
/// block of `slot_id`, without revealing which one.
///
/// Every index `i` of the leader set gets a branch stating that the discrete log of `PK_i` to
/// `G` equals the discrete log of `skGt_i` to `t_i·Gt_i`. The branch of the prover is proven
/// honestly, all others are simulated, and the challenges are tied together through a single
/// Fiat-Shamir hash so that at most one branch can be real. If the key occurs several times in
/// the leader set, its first occurrence is proven.
pub fn generate<R: Rng + ?Sized>(
    private_key: &PrivateKey,
    slot_id: u64,
    ctx: &EpochContext,
    rng: &mut R,
) -> Result<(ProofMessage, ProofResponse), ProofError> {
    let span = debug_span!("generate", epoch = ctx.epoch_id, slot = slot_id);
    let _enter = span.enter();

    let n = ctx.leader_count();
    check_length("SMA pieces", n, ctx.sma_pieces.len())?;
    let randomizer = slot_randomizer(ctx, slot_id)?;
    ensure_nonzero(&ctx.random_beacon, "random beacon is zero")?;
    ensure_nonzero(randomizer, "commitment randomizer is zero")?;
    for point in ctx.leader_set.iter().chain(&ctx.sma_pieces) {
        point.validate()?;
    }

    let real = ctx
        .leader_index(&private_key.to_public())
        .ok_or_else(|| {
            warn!("private key is not an epoch leader");
            ProofError::InvalidIndex
        })?;

    let g = generator();
    let nonce = random_nonzero_scalar(rng);
    let mut message = Vec::with_capacity(n);
    let mut commitments = Vec::with_capacity(n);
    let mut challenges = vec![Scalar::zero(); n];
    let mut responses = vec![Scalar::zero(); n];

    for (i, public_key) in ctx.leader_set.iter().enumerate() {
        let t = slot_scalar(ctx, slot_id, randomizer, i)?;
        let r = random_nonzero_scalar(rng);
        let gt = g * r;
        let base = gt * t;
        let pk = public_key.into_projective();
        // x_i·(t_i·Gt_i) without knowing x_i
        let sk_gt = pk * (t * r);

        if i == real {
            commitments.push((g * nonce, base * nonce));
        } else {
            let e = Scalar::rand(rng);
            let z = Scalar::rand(rng);
            commitments.push((g * z - pk * e, base * z - sk_gt * e));
            challenges[i] = e;
            responses[i] = z;
        }

        message.push(ProofTriple {
            public_key: *public_key,
            gt: gt.into(),
            sk_gt: sk_gt.into(),
        });
    }

    let e = fiat_shamir_challenge(ctx, slot_id, randomizer, &message, &commitments)?;
    // the real challenge is still zero here
    challenges[real] = e - sum_scalars(&challenges);
    responses[real] = nonce + challenges[real] * private_key.as_ref();

    debug!(leaders = n, "generated slot leader proof");

    Ok((
        message,
        ProofResponse {
            challenges,
            responses,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::verify;
    use slot_crypto::{
        test_helpers::{keygen_mul, random_points, random_scalars},
        CryptoError,
    };

    fn context(n: usize) -> (Vec<PrivateKey>, EpochContext) {
        let rng = &mut rand::thread_rng();
        let (secret_keys, leader_set) = keygen_mul(rng, n);
        let ctx = EpochContext {
            epoch_id: 12,
            leader_set,
            random_beacon: random_scalars(rng, 1)[0],
            commitment_randomizers: random_scalars(rng, 5),
            sma_pieces: random_points(rng, n),
        };
        (secret_keys, ctx)
    }

    #[test]
    fn proof_has_one_entry_per_leader() {
        let rng = &mut rand::thread_rng();
        let (secret_keys, ctx) = context(6);
        let (message, response) = generate(&secret_keys[2], 3, &ctx, rng).unwrap();

        assert_eq!(message.len(), 6);
        assert_eq!(response.challenges.len(), 6);
        assert_eq!(response.responses.len(), 6);
        for (triple, pk) in message.iter().zip(&ctx.leader_set) {
            assert_eq!(&triple.public_key, pk);
            assert!(triple.gt.is_valid());
            assert!(triple.sk_gt.is_valid());
        }
        assert!(verify(&response, &message, 3, &ctx).unwrap());
    }

    #[test]
    fn every_leader_can_prove() {
        let rng = &mut rand::thread_rng();
        let (secret_keys, ctx) = context(4);
        for sk in &secret_keys {
            let (message, response) = generate(sk, 0, &ctx, rng).unwrap();
            assert!(verify(&response, &message, 0, &ctx).unwrap());
        }
    }

    #[test]
    fn single_leader() {
        let rng = &mut rand::thread_rng();
        let (secret_keys, ctx) = context(1);
        let (message, response) = generate(&secret_keys[0], 4, &ctx, rng).unwrap();
        assert!(verify(&response, &message, 4, &ctx).unwrap());
    }

    #[test]
    fn outsider_cannot_prove() {
        let rng = &mut rand::thread_rng();
        let (_, ctx) = context(3);
        let outsider = PrivateKey::generate(rng);
        assert_eq!(
            generate(&outsider, 0, &ctx, rng).unwrap_err(),
            ProofError::InvalidIndex
        );
    }

    #[test]
    fn rejects_bad_context() {
        let rng = &mut rand::thread_rng();
        let (secret_keys, ctx) = context(3);

        assert_eq!(
            generate(&secret_keys[0], 5, &ctx, rng).unwrap_err(),
            ProofError::SlotOutOfRange { slot: 5, slots: 5 }
        );

        let mut short_sma = ctx.clone();
        short_sma.sma_pieces.pop();
        assert!(matches!(
            generate(&secret_keys[0], 0, &short_sma, rng).unwrap_err(),
            ProofError::LengthMismatch { .. }
        ));

        let mut zero_beacon = ctx.clone();
        zero_beacon.random_beacon = Scalar::zero();
        assert!(matches!(
            generate(&secret_keys[0], 0, &zero_beacon, rng).unwrap_err(),
            ProofError::Arithmetic(CryptoError::InvalidScalar(_))
        ));

        let mut zero_randomizer = ctx.clone();
        zero_randomizer.commitment_randomizers[1] = Scalar::zero();
        assert!(generate(&secret_keys[0], 1, &zero_randomizer, rng).is_err());
        assert!(generate(&secret_keys[0], 0, &zero_randomizer, rng).is_ok());

        let mut identity_sma = ctx;
        identity_sma.sma_pieces[2] = slot_crypto::Point::zero().into();
        assert_eq!(
            generate(&secret_keys[0], 0, &identity_sma, rng).unwrap_err(),
            ProofError::Arithmetic(CryptoError::PointAtInfinity)
        );
    }

    #[test]
    fn proofs_are_randomized() {
        let rng = &mut rand::thread_rng();
        let (secret_keys, ctx) = context(3);
        let (m1, r1) = generate(&secret_keys[1], 2, &ctx, rng).unwrap();
        let (m2, r2) = generate(&secret_keys[1], 2, &ctx, rng).unwrap();
        assert_ne!(m1, m2);
        assert_ne!(r1, r2);
    }
}
