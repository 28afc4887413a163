use slot_crypto::{
    group::{scalar_from_bytes, scalar_to_bytes},
    CryptoError, PublicKey, Scalar,
};

use rlp::Rlp;
use std::{collections::HashMap, fmt};
use thiserror::Error;

/// The per-epoch records a store serves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StoreItem {
    EpochLeaderKeys,
    RandomBeacon,
    CommitmentRandomizers,
    SmaPieces,
}

impl fmt::Display for StoreItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreItem::EpochLeaderKeys => "epoch leader keys",
            StoreItem::RandomBeacon => "random beacon",
            StoreItem::CommitmentRandomizers => "commitment randomizers",
            StoreItem::SmaPieces => "SMA pieces",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
/// Error raised by an [`EpochStore`] lookup
pub enum StoreError {
    #[error("no {item} stored for epoch {epoch}")]
    NotFound { epoch: u64, item: StoreItem },
    #[error("{item} of epoch {epoch} are corrupt: {reason}")]
    Corrupt {
        epoch: u64,
        item: StoreItem,
        reason: String,
    },
}

/// Read-only access to the per-epoch data the node keeps. Implementations are expected to be
/// safe to share between threads; lookups are blocking.
pub trait EpochStore {
    /// The leader keys selected during `epoch`, which lead the slots of `epoch + 1`
    fn epoch_leader_keys(&self, epoch: u64) -> Result<Vec<PublicKey>, StoreError>;

    fn random_beacon(&self, epoch: u64) -> Result<Scalar, StoreError>;

    fn commitment_randomizers(&self, epoch: u64) -> Result<Vec<Scalar>, StoreError>;

    fn sma_pieces(&self, epoch: u64) -> Result<Vec<PublicKey>, StoreError>;
}

impl<S: EpochStore + ?Sized> EpochStore for &S {
    fn epoch_leader_keys(&self, epoch: u64) -> Result<Vec<PublicKey>, StoreError> {
        (**self).epoch_leader_keys(epoch)
    }

    fn random_beacon(&self, epoch: u64) -> Result<Scalar, StoreError> {
        (**self).random_beacon(epoch)
    }

    fn commitment_randomizers(&self, epoch: u64) -> Result<Vec<Scalar>, StoreError> {
        (**self).commitment_randomizers(epoch)
    }

    fn sma_pieces(&self, epoch: u64) -> Result<Vec<PublicKey>, StoreError> {
        (**self).sma_pieces(epoch)
    }
}

/// An in-memory store holding the encoded records of each epoch. Points are kept as RLP lists of
/// SEC1 strings, scalars as 32-byte big-endian strings, so reads go through the same decoding and
/// validation a persistent store would need.
#[derive(Clone, Debug, Default)]
pub struct MemoryEpochStore {
    records: HashMap<(u64, StoreItem), Vec<u8>>,
}

impl MemoryEpochStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_epoch_leader_keys(&mut self, epoch: u64, keys: &[PublicKey]) {
        self.insert_raw(epoch, StoreItem::EpochLeaderKeys, encode_points(keys));
    }

    pub fn insert_random_beacon(&mut self, epoch: u64, beacon: &Scalar) {
        self.insert_raw(
            epoch,
            StoreItem::RandomBeacon,
            scalar_to_bytes(beacon).to_vec(),
        );
    }

    pub fn insert_commitment_randomizers(&mut self, epoch: u64, randomizers: &[Scalar]) {
        let items = randomizers
            .iter()
            .map(|s| scalar_to_bytes(s).to_vec())
            .collect::<Vec<_>>();
        self.insert_raw(
            epoch,
            StoreItem::CommitmentRandomizers,
            rlp::encode_list::<Vec<u8>, _>(&items).to_vec(),
        );
    }

    pub fn insert_sma_pieces(&mut self, epoch: u64, pieces: &[PublicKey]) {
        self.insert_raw(epoch, StoreItem::SmaPieces, encode_points(pieces));
    }

    /// Stores `bytes` as-is, replacing any previous record
    pub fn insert_raw(&mut self, epoch: u64, item: StoreItem, bytes: Vec<u8>) {
        self.records.insert((epoch, item), bytes);
    }

    pub fn remove(&mut self, epoch: u64, item: StoreItem) -> Option<Vec<u8>> {
        self.records.remove(&(epoch, item))
    }

    fn record(&self, epoch: u64, item: StoreItem) -> Result<&[u8], StoreError> {
        self.records
            .get(&(epoch, item))
            .map(|bytes| bytes.as_slice())
            .ok_or(StoreError::NotFound { epoch, item })
    }

    fn list(&self, epoch: u64, item: StoreItem) -> Result<Vec<Vec<u8>>, StoreError> {
        let bytes = self.record(epoch, item)?;
        let rlp = Rlp::new(bytes);
        if !rlp.is_list() {
            return Err(corrupt(epoch, item, "expected an RLP list"));
        }
        rlp.as_list::<Vec<u8>>()
            .map_err(|err| corrupt(epoch, item, err))
    }

    fn points(&self, epoch: u64, item: StoreItem) -> Result<Vec<PublicKey>, StoreError> {
        self.list(epoch, item)?
            .iter()
            .map(|bytes| PublicKey::from_sec1(bytes))
            .collect::<Result<Vec<_>, CryptoError>>()
            .map_err(|err| corrupt(epoch, item, err))
    }
}

impl EpochStore for MemoryEpochStore {
    fn epoch_leader_keys(&self, epoch: u64) -> Result<Vec<PublicKey>, StoreError> {
        self.points(epoch, StoreItem::EpochLeaderKeys)
    }

    fn random_beacon(&self, epoch: u64) -> Result<Scalar, StoreError> {
        let item = StoreItem::RandomBeacon;
        scalar_from_bytes(self.record(epoch, item)?).map_err(|err| corrupt(epoch, item, err))
    }

    fn commitment_randomizers(&self, epoch: u64) -> Result<Vec<Scalar>, StoreError> {
        let item = StoreItem::CommitmentRandomizers;
        self.list(epoch, item)?
            .iter()
            .map(|bytes| scalar_from_bytes(bytes))
            .collect::<Result<Vec<_>, CryptoError>>()
            .map_err(|err| corrupt(epoch, item, err))
    }

    fn sma_pieces(&self, epoch: u64) -> Result<Vec<PublicKey>, StoreError> {
        self.points(epoch, StoreItem::SmaPieces)
    }
}

fn encode_points(points: &[PublicKey]) -> Vec<u8> {
    let items = points.iter().map(PublicKey::to_sec1).collect::<Vec<_>>();
    rlp::encode_list::<Vec<u8>, _>(&items).to_vec()
}

fn corrupt(epoch: u64, item: StoreItem, reason: impl fmt::Display) -> StoreError {
    StoreError::Corrupt {
        epoch,
        item,
        reason: reason.to_string(),
    }
}
