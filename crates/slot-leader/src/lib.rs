//! # Slot Leader Proofs
//!
//! This crate implements the slot leader eligibility proofs of a proof-of-stake chain.
//!
//! Every epoch has a set of `N` epoch leaders, selected during the previous epoch. For each slot
//! of the epoch one of them produces the block, and proves that it is entitled to do so without
//! revealing which of the `N` leaders it is:
//!
//! - The epoch's random beacon, the slot's commitment randomizer and the per-leader SMA pieces
//!   are hashed into a scalar `t_i` for every leader index `i`
//! - The prover publishes a triple `(PK_i, Gt_i, skGt_i)` per index and a Fiat-Shamir OR-proof
//!   showing that for at least one index `log_G(PK_i) == log_{t_i·Gt_i}(skGt_i)`
//! - Any validator can check the proof against the same epoch data and learns only that some
//!   leader produced it
//!
//! Epoch 0 has no previous epoch, so its leader set consists of `N` copies of a fixed genesis key.
//!
//! The proof travels RLP encoded in the extra data of the block header; see [`pack`] and
//! [`unpack`]. [`SlotLeader`] ties the store, the protocol and the codec together.

/// Proof generation and verification
mod api;
pub use api::{generate, verify, ProofError, ProofMessage, ProofResponse, ProofTriple};

mod cache;
pub use cache::{ContextCache, DEFAULT_CACHE_CAPACITY};

/// Protocol constants
pub mod config;
pub use config::{ConfigError, ProtocolConfig};

mod context;
pub use context::EpochContext;

mod encoding;
pub use encoding::{pack, unpack, EncodingError, Pack};

mod leader;
pub use leader::{SlotLeader, SlotLeaderError};

mod resolver;
pub use resolver::{ResolutionError, Resolver};

/// Access to the per-epoch data kept by the node
pub mod store;
pub use store::{EpochStore, MemoryEpochStore, StoreError, StoreItem};
