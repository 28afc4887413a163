use super::{
    check_length, fiat_shamir_challenge, slot_randomizer, slot_scalar, ProofError, ProofResponse,
    ProofTriple,
};
use crate::context::EpochContext;
use slot_crypto::{
    group::{generator, sum_scalars},
    CryptoError, Point,
};

use ark_std::cfg_into_iter;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, debug_span, warn};

/// Checks a slot leader proof against the context of its epoch.
///
/// Malformed proofs (length mismatches, a slot the epoch does not have) are errors. A
/// well-formed proof that does not convince the verifier yields `Ok(false)`.
pub fn verify(
    response: &ProofResponse,
    message: &[ProofTriple],
    slot_id: u64,
    ctx: &EpochContext,
) -> Result<bool, ProofError> {
    let span = debug_span!("verify", epoch = ctx.epoch_id, slot = slot_id);
    let _enter = span.enter();

    let n = ctx.leader_count();
    check_length("challenges", n, response.challenges.len())?;
    check_length("responses", n, response.responses.len())?;
    check_length("proof message", n, message.len())?;
    check_length("SMA pieces", n, ctx.sma_pieces.len())?;
    let randomizer = slot_randomizer(ctx, slot_id)?;

    for (i, (triple, leader)) in message.iter().zip(&ctx.leader_set).enumerate() {
        if &triple.public_key != leader {
            warn!(index = i, "public key does not match the epoch leader set");
            return Ok(false);
        }
        if !triple.gt.is_valid() || !triple.sk_gt.is_valid() {
            warn!(index = i, "proof carries an invalid group element");
            return Ok(false);
        }
    }

    let g = generator();
    let commitments = cfg_into_iter!(0..n)
        .map(|i| -> Result<(Point, Point), CryptoError> {
            let t = slot_scalar(ctx, slot_id, randomizer, i)?;
            let triple = &message[i];
            let e = response.challenges[i];
            let z = response.responses[i];
            let base = triple.gt.into_projective() * t;
            Ok((
                g * z - triple.public_key.into_projective() * e,
                base * z - triple.sk_gt.into_projective() * e,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let e = fiat_shamir_challenge(ctx, slot_id, randomizer, message, &commitments)?;
    if sum_scalars(&response.challenges) != e {
        warn!("challenges do not sum to the transcript hash");
        return Ok(false);
    }

    debug!(leaders = n, "verified slot leader proof");
    Ok(true)
}
