use slot_crypto::{PublicKey, Scalar};
use std::convert::TryFrom;

/// Everything the proof protocol needs to know about one epoch. Resolved once from the store
/// and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpochContext {
    pub epoch_id: u64,
    /// The keys eligible to lead the slots of this epoch (selected during the previous one)
    pub leader_set: Vec<PublicKey>,
    pub random_beacon: Scalar,
    /// One randomizer per slot of the epoch
    pub commitment_randomizers: Vec<Scalar>,
    /// One SMA piece per leader index
    pub sma_pieces: Vec<PublicKey>,
}

impl EpochContext {
    /// Number of leaders, `N`
    pub fn leader_count(&self) -> usize {
        self.leader_set.len()
    }

    pub fn slot_count(&self) -> usize {
        self.commitment_randomizers.len()
    }

    /// The commitment randomizer of `slot_id`, if the epoch has such a slot
    pub fn randomizer(&self, slot_id: u64) -> Option<&Scalar> {
        usize::try_from(slot_id)
            .ok()
            .and_then(|slot| self.commitment_randomizers.get(slot))
    }

    /// Index of the first occurrence of `public_key` in the leader set
    pub fn leader_index(&self, public_key: &PublicKey) -> Option<usize> {
        self.leader_set.iter().position(|pk| pk == public_key)
    }
}
