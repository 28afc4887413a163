//! secp256k1 keys used by epoch leaders.

mod secret;
pub use secret::PrivateKey;

mod public;
pub use public::PublicKey;
