use crate::{
    config::ProtocolConfig,
    context::EpochContext,
    store::{EpochStore, StoreError},
};

use thiserror::Error;
use tracing::{debug, debug_span, error};

#[derive(Debug, Error, Clone, PartialEq)]
/// Error raised while assembling the context of an epoch
pub enum ResolutionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("epoch {epoch} has {actual} leaders, expected {expected}")]
    LeaderSetLength {
        epoch: u64,
        expected: usize,
        actual: usize,
    },
    #[error("epoch {epoch} has {actual} SMA pieces, expected {expected}")]
    SmaLength {
        epoch: u64,
        expected: usize,
        actual: usize,
    },
    #[error("epoch {epoch} has {actual} commitment randomizers, expected {expected}")]
    RandomizerCount {
        epoch: u64,
        expected: usize,
        actual: usize,
    },
}

/// Turns the raw records of an [`EpochStore`] into checked [`EpochContext`]s
#[derive(Clone, Debug)]
pub struct Resolver<S> {
    config: ProtocolConfig,
    store: S,
}

impl<S: EpochStore> Resolver<S> {
    pub fn new(config: ProtocolConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the context of `epoch_id`.
    ///
    /// The leaders of an epoch are the keys selected during the previous one; epoch 0 has no
    /// predecessor and uses the genesis set instead. The beacon, randomizers and SMA pieces
    /// always belong to `epoch_id` itself.
    pub fn resolve(&self, epoch_id: u64) -> Result<EpochContext, ResolutionError> {
        let span = debug_span!("resolve", epoch = epoch_id);
        let _enter = span.enter();

        self.fetch(epoch_id).map_err(|err| {
            error!(epoch = epoch_id, "could not resolve epoch context: {}", err);
            err
        })
    }

    fn fetch(&self, epoch_id: u64) -> Result<EpochContext, ResolutionError> {
        let n = self.config.epoch_leader_count();

        let leader_set = match epoch_id.checked_sub(1) {
            None => self.config.genesis_leader_set(),
            Some(previous) => self.store.epoch_leader_keys(previous)?,
        };
        if leader_set.len() != n {
            return Err(ResolutionError::LeaderSetLength {
                epoch: epoch_id,
                expected: n,
                actual: leader_set.len(),
            });
        }

        let random_beacon = self.store.random_beacon(epoch_id)?;

        let commitment_randomizers = self.store.commitment_randomizers(epoch_id)?;
        if commitment_randomizers.len() != self.config.slots_per_epoch() {
            return Err(ResolutionError::RandomizerCount {
                epoch: epoch_id,
                expected: self.config.slots_per_epoch(),
                actual: commitment_randomizers.len(),
            });
        }

        let sma_pieces = self.store.sma_pieces(epoch_id)?;
        if sma_pieces.len() != n {
            return Err(ResolutionError::SmaLength {
                epoch: epoch_id,
                expected: n,
                actual: sma_pieces.len(),
            });
        }

        debug!(leaders = n, slots = commitment_randomizers.len(), "resolved");

        Ok(EpochContext {
            epoch_id,
            leader_set,
            random_beacon,
            commitment_randomizers,
            sma_pieces,
        })
    }
}
