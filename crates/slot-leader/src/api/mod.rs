/// Slot leader proof generation
mod prover;
pub use prover::generate;

/// Slot leader proof verification
mod verifier;
pub use verifier::verify;

use crate::context::EpochContext;
use slot_crypto::{
    group::ensure_nonzero, CryptoError, Point, PublicKey, Scalar, Transcript, CHALLENGE_DOMAIN,
    SLOT_DOMAIN,
};

use ark_ec::CurveGroup;
use thiserror::Error;

/// The public part of a proof for one leader index: the leader's key, the blinded generator
/// `Gt = r·G` and the key's multiple `skGt = x·(t·Gt)`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProofTriple {
    pub public_key: PublicKey,
    pub gt: PublicKey,
    pub sk_gt: PublicKey,
}

/// One [`ProofTriple`] per index of the epoch leader set
pub type ProofMessage = Vec<ProofTriple>;

/// The challenges `e` and responses `z` of the OR-proof, one of each per leader index
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofResponse {
    pub challenges: Vec<Scalar>,
    pub responses: Vec<Scalar>,
}

#[derive(Debug, Error, Clone, PartialEq)]
/// Error raised while generating or checking a slot leader proof
pub enum ProofError {
    #[error("the private key does not belong to the epoch leader set")]
    InvalidIndex,
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] CryptoError),
    #[error("{what} has {actual} entries, expected {expected}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("slot {slot} is out of range, the epoch has {slots} slots")]
    SlotOutOfRange { slot: u64, slots: usize },
}

fn check_length(what: &'static str, expected: usize, actual: usize) -> Result<(), ProofError> {
    if expected != actual {
        return Err(ProofError::LengthMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

fn slot_randomizer(ctx: &EpochContext, slot_id: u64) -> Result<&Scalar, ProofError> {
    ctx.randomizer(slot_id).ok_or(ProofError::SlotOutOfRange {
        slot: slot_id,
        slots: ctx.slot_count(),
    })
}

/// The scalar `t_i` tying branch `index` to the epoch's beacon, the slot and its SMA piece
fn slot_scalar(
    ctx: &EpochContext,
    slot_id: u64,
    randomizer: &Scalar,
    index: usize,
) -> Result<Scalar, CryptoError> {
    let mut transcript = Transcript::new(SLOT_DOMAIN);
    transcript
        .append_scalar(b"rb", &ctx.random_beacon)
        .append_u64(b"slot", slot_id)
        .append_scalar(b"crs", randomizer)
        .append_u64(b"index", index as u64)
        .append_point(b"sma", &ctx.sma_pieces[index]);
    let t = transcript.challenge()?;
    ensure_nonzero(&t, "slot scalar is zero")?;
    Ok(t)
}

/// The Fiat-Shamir challenge `e` over the epoch, the slot, the proof message and the commitments
/// `(A_i, B_i)` of every branch
fn fiat_shamir_challenge(
    ctx: &EpochContext,
    slot_id: u64,
    randomizer: &Scalar,
    message: &[ProofTriple],
    commitments: &[(Point, Point)],
) -> Result<Scalar, CryptoError> {
    let mut transcript = Transcript::new(CHALLENGE_DOMAIN);
    transcript
        .append_u64(b"epoch", ctx.epoch_id)
        .append_scalar(b"rb", &ctx.random_beacon)
        .append_u64(b"slot", slot_id)
        .append_scalar(b"crs", randomizer);
    for public_key in &ctx.leader_set {
        transcript.append_point(b"leader", public_key);
    }
    for triple in message {
        transcript
            .append_point(b"pk", &triple.public_key)
            .append_point(b"gt", &triple.gt)
            .append_point(b"skgt", &triple.sk_gt);
    }

    let points = commitments
        .iter()
        .flat_map(|(a, b)| vec![*a, *b])
        .collect::<Vec<_>>();
    for (i, point) in Point::normalize_batch(&points).into_iter().enumerate() {
        let label: &'static [u8] = if i % 2 == 0 { b"A" } else { b"B" };
        transcript.append_point(label, &PublicKey::from(point));
    }

    transcript.challenge()
}
