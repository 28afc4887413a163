use crate::api::{ProofMessage, ProofResponse, ProofTriple};
use slot_crypto::{
    group::{scalar_from_bytes, scalar_to_bytes},
    CryptoError, PublicKey, Scalar,
};

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
/// Union type for proof serialization errors
pub enum EncodingError {
    #[error("RLP Error: {0}")]
    Rlp(#[from] DecoderError),
    #[error("Crypto Error: {0}")]
    Crypto(#[from] CryptoError),
    #[error("invalid proof layout: {0}")]
    Layout(String),
}

/// The envelope a slot leader proof travels in. `proof` holds the challenges followed by the
/// responses as 32-byte big-endian scalars, `proof_meg` the flattened `[PK, Gt, skGt]` triples
/// as SEC1 points.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pack {
    pub proof: Vec<Vec<u8>>,
    pub proof_meg: Vec<Vec<u8>>,
}

impl Encodable for Pack {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(2);
        s.append_list::<Vec<u8>, _>(&self.proof);
        s.append_list::<Vec<u8>, _>(&self.proof_meg);
    }
}

impl Decodable for Pack {
    fn decode(r: &Rlp) -> Result<Self, DecoderError> {
        if !r.is_list() {
            return Err(DecoderError::RlpExpectedToBeList);
        }
        if r.item_count()? != 2 {
            return Err(DecoderError::RlpIncorrectListLen);
        }
        // `list_at` would read a byte string as an empty list
        for i in 0..2 {
            if !r.at(i)?.is_list() {
                return Err(DecoderError::RlpExpectedToBeList);
            }
        }
        Ok(Self {
            proof: r.list_at(0)?,
            proof_meg: r.list_at(1)?,
        })
    }
}

impl Pack {
    pub fn new(response: &ProofResponse, message: &[ProofTriple]) -> Result<Self, EncodingError> {
        let n = response.challenges.len();
        if response.responses.len() != n {
            return Err(EncodingError::Layout(format!(
                "{} challenges but {} responses",
                n,
                response.responses.len()
            )));
        }
        if message.len() != n {
            return Err(EncodingError::Layout(format!(
                "{} challenges but {} proof triples",
                n,
                message.len()
            )));
        }

        let proof = response
            .challenges
            .iter()
            .chain(&response.responses)
            .map(|s| scalar_to_bytes(s).to_vec())
            .collect();
        let proof_meg = message
            .iter()
            .flat_map(|triple| {
                vec![
                    triple.public_key.to_sec1(),
                    triple.gt.to_sec1(),
                    triple.sk_gt.to_sec1(),
                ]
            })
            .collect();

        Ok(Self { proof, proof_meg })
    }

    /// Parses the scalars and points. Points are only checked to be well formed, curve
    /// membership is left to the verifier.
    pub fn into_proof(self) -> Result<(ProofResponse, ProofMessage), EncodingError> {
        if self.proof.len() % 2 != 0 {
            return Err(EncodingError::Layout(format!(
                "odd number of proof scalars: {}",
                self.proof.len()
            )));
        }
        if self.proof_meg.len() % 3 != 0 {
            return Err(EncodingError::Layout(format!(
                "proof message has {} points, not a multiple of 3",
                self.proof_meg.len()
            )));
        }
        let n = self.proof.len() / 2;
        if self.proof_meg.len() / 3 != n {
            return Err(EncodingError::Layout(format!(
                "{} proof triples for {} challenges",
                self.proof_meg.len() / 3,
                n
            )));
        }

        let mut scalars = self
            .proof
            .iter()
            .map(|bytes| scalar_from_bytes(bytes))
            .collect::<Result<Vec<Scalar>, _>>()?;
        let responses = scalars.split_off(n);

        let points = self
            .proof_meg
            .iter()
            .map(|bytes| PublicKey::from_sec1_unchecked(bytes))
            .collect::<Result<Vec<_>, _>>()?;
        let message = points
            .chunks(3)
            .map(|triple| ProofTriple {
                public_key: triple[0],
                gt: triple[1],
                sk_gt: triple[2],
            })
            .collect();

        Ok((
            ProofResponse {
                challenges: scalars,
                responses,
            },
            message,
        ))
    }
}

/// Serializes a proof into the bytes carried in a block header's extra data
pub fn pack(response: &ProofResponse, message: &[ProofTriple]) -> Result<Vec<u8>, EncodingError> {
    let pack = Pack::new(response, message)?;
    Ok(rlp::encode(&pack).to_vec())
}

/// Parses the bytes produced by [`pack`]. Anything but exactly one well formed envelope is an
/// error, including trailing bytes.
pub fn unpack(bytes: &[u8]) -> Result<(ProofResponse, ProofMessage), EncodingError> {
    let rlp = Rlp::new(bytes);
    let total = rlp.payload_info()?.total();
    if total != bytes.len() {
        return Err(EncodingError::Layout(format!(
            "proof envelope spans {} bytes, got {}",
            total,
            bytes.len()
        )));
    }
    rlp.as_val::<Pack>()?.into_proof()
}
