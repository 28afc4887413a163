use dotenv::dotenv;
use slot_crypto::{CryptoError, PublicKey};
use std::env;
use thiserror::Error;

/// Number of epoch leaders eligible in every epoch
pub const EPOCH_LEADER_COUNT: usize = 50;

/// Number of slots in an epoch, one commitment randomizer each
pub const SLOTS_PER_EPOCH: usize = 17280;

/// SEC1 encoded public key repeated to form the leader set of epoch 0
pub const GENESIS_PUBLIC_KEY: &str = "04dff8ab0f7190d4aa6c8db4e8a0a84a86b24af13fa20502217362575de752a61c8d2bbe63c441852bb72185438599eabc3eb2024a2bbdeeb887b7cffc54bdbc90";

pub const ENV_LEADER_COUNT: &str = "SLOT_LEADER_COUNT";
pub const ENV_SLOTS_PER_EPOCH: &str = "SLOT_LEADER_SLOTS_PER_EPOCH";
pub const ENV_GENESIS_PUBLIC_KEY: &str = "SLOT_LEADER_GENESIS_PK";

#[derive(Debug, Error, PartialEq)]
/// Error raised while building the protocol configuration
pub enum ConfigError {
    #[error("invalid genesis public key: {0}")]
    InvalidGenesisKey(#[from] CryptoError),
    #[error("epoch leader count must be positive")]
    ZeroLeaderCount,
    #[error("slots per epoch must be positive")]
    ZeroSlotCount,
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}

/// Process-wide protocol constants. Built once at startup and handed to the resolver, it is
/// never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolConfig {
    epoch_leader_count: usize,
    slots_per_epoch: usize,
    genesis_public_key: PublicKey,
}

impl ProtocolConfig {
    /// Fails if the genesis key does not decode to a valid curve point or a count is zero
    pub fn new(
        epoch_leader_count: usize,
        slots_per_epoch: usize,
        genesis_public_key: &str,
    ) -> Result<Self, ConfigError> {
        if epoch_leader_count == 0 {
            return Err(ConfigError::ZeroLeaderCount);
        }
        if slots_per_epoch == 0 {
            return Err(ConfigError::ZeroSlotCount);
        }
        let genesis_public_key = PublicKey::from_hex(genesis_public_key)?;
        Ok(Self {
            epoch_leader_count,
            slots_per_epoch,
            genesis_public_key,
        })
    }

    /// The built-in network constants
    pub fn mainnet() -> Result<Self, ConfigError> {
        Self::new(EPOCH_LEADER_COUNT, SLOTS_PER_EPOCH, GENESIS_PUBLIC_KEY)
    }

    /// Reads overrides from the environment (and a `.env` file if present), falling back to
    /// the built-in constants for unset variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();

        let epoch_leader_count = match env::var(ENV_LEADER_COUNT) {
            Ok(value) => parse_count(ENV_LEADER_COUNT, value)?,
            Err(_) => EPOCH_LEADER_COUNT,
        };
        let slots_per_epoch = match env::var(ENV_SLOTS_PER_EPOCH) {
            Ok(value) => parse_count(ENV_SLOTS_PER_EPOCH, value)?,
            Err(_) => SLOTS_PER_EPOCH,
        };
        let genesis =
            env::var(ENV_GENESIS_PUBLIC_KEY).unwrap_or_else(|_| GENESIS_PUBLIC_KEY.to_owned());

        Self::new(epoch_leader_count, slots_per_epoch, genesis.trim())
    }

    pub fn epoch_leader_count(&self) -> usize {
        self.epoch_leader_count
    }

    pub fn slots_per_epoch(&self) -> usize {
        self.slots_per_epoch
    }

    pub fn genesis_public_key(&self) -> &PublicKey {
        &self.genesis_public_key
    }

    /// The leader set used for epoch 0: `epoch_leader_count` copies of the genesis key
    pub fn genesis_leader_set(&self) -> Vec<PublicKey> {
        vec![self.genesis_public_key; self.epoch_leader_count]
    }
}

fn parse_count(var: &'static str, value: String) -> Result<usize, ConfigError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
