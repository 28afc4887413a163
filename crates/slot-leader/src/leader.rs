use crate::{
    api::{generate, verify, ProofError, ProofMessage, ProofResponse, ProofTriple},
    cache::ContextCache,
    config::{ConfigError, ProtocolConfig},
    context::EpochContext,
    encoding::{pack, unpack, EncodingError},
    resolver::{ResolutionError, Resolver},
    store::EpochStore,
};
use slot_crypto::PrivateKey;

use rand::Rng;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
/// Union type of everything that can go wrong while proving or checking slot leadership
pub enum SlotLeaderError {
    #[error("Config Error: {0}")]
    Config(#[from] ConfigError),
    #[error("Resolution Error: {0}")]
    Resolution(#[from] ResolutionError),
    #[error("Proof Error: {0}")]
    Proof(#[from] ProofError),
    #[error("Encoding Error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("could not lock the epoch context cache")]
    CacheLock,
}

/// Entry point for block producers and validators: resolves epoch contexts from a store and
/// runs the proof protocol and codec over them
pub struct SlotLeader<S> {
    resolver: Resolver<S>,
    cache: Option<Mutex<ContextCache>>,
}

impl<S: EpochStore> SlotLeader<S> {
    pub fn new(config: ProtocolConfig, store: S) -> Self {
        Self {
            resolver: Resolver::new(config, store),
            cache: None,
        }
    }

    /// Keeps up to `capacity` resolved epochs in memory
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = Some(Mutex::new(ContextCache::new(capacity)));
        self
    }

    pub fn config(&self) -> &ProtocolConfig {
        self.resolver.config()
    }

    pub fn store(&self) -> &S {
        self.resolver.store()
    }

    /// The context of `epoch_id`, from the cache if one is configured
    pub fn epoch_context(&self, epoch_id: u64) -> Result<Arc<EpochContext>, SlotLeaderError> {
        let cache = match &self.cache {
            Some(cache) => cache,
            None => return Ok(Arc::new(self.resolver.resolve(epoch_id)?)),
        };

        if let Some(context) = cache
            .lock()
            .map_err(|_| SlotLeaderError::CacheLock)?
            .get(epoch_id)
        {
            return Ok(context);
        }

        // resolve without holding the lock, a concurrent miss at worst resolves twice
        let context = Arc::new(self.resolver.resolve(epoch_id)?);
        cache
            .lock()
            .map_err(|_| SlotLeaderError::CacheLock)?
            .insert(context.clone());
        Ok(context)
    }

    /// Proves that `private_key` may lead `slot_id` of `epoch_id`
    pub fn slot_leader_proof<R: Rng + ?Sized>(
        &self,
        private_key: &PrivateKey,
        epoch_id: u64,
        slot_id: u64,
        rng: &mut R,
    ) -> Result<(ProofMessage, ProofResponse), SlotLeaderError> {
        let ctx = self.epoch_context(epoch_id)?;
        let proof = generate(private_key, slot_id, &ctx, rng)?;
        info!(epoch = epoch_id, slot = slot_id, "created slot leader proof");
        Ok(proof)
    }

    pub fn verify_slot_proof(
        &self,
        epoch_id: u64,
        slot_id: u64,
        response: &ProofResponse,
        message: &[ProofTriple],
    ) -> Result<bool, SlotLeaderError> {
        let ctx = self.epoch_context(epoch_id)?;
        let valid = verify(response, message, slot_id, &ctx)?;
        info!(
            epoch = epoch_id,
            slot = slot_id,
            valid,
            "checked slot leader proof"
        );
        Ok(valid)
    }

    /// Proves leadership of the slot and serializes the proof for a block header
    pub fn pack_slot_proof<R: Rng + ?Sized>(
        &self,
        epoch_id: u64,
        slot_id: u64,
        private_key: &PrivateKey,
        rng: &mut R,
    ) -> Result<Vec<u8>, SlotLeaderError> {
        let (message, response) = self.slot_leader_proof(private_key, epoch_id, slot_id, rng)?;
        Ok(pack(&response, &message)?)
    }

    /// Decodes the proof carried in a block header's extra data
    pub fn info_from_header_extra(
        &self,
        epoch_id: u64,
        extra: &[u8],
    ) -> Result<(ProofResponse, ProofMessage), SlotLeaderError> {
        unpack(extra).map_err(|err| {
            error!(
                epoch = epoch_id,
                extra = %hex::encode(extra),
                "could not decode slot leader proof: {}",
                err
            );
            err.into()
        })
    }

    /// Decodes and checks the proof carried in a block header's extra data
    pub fn verify_header_extra(
        &self,
        epoch_id: u64,
        slot_id: u64,
        extra: &[u8],
    ) -> Result<bool, SlotLeaderError> {
        let (response, message) = self.info_from_header_extra(epoch_id, extra)?;
        self.verify_slot_proof(epoch_id, slot_id, &response, &message)
    }
}
