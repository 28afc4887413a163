use super::Hasher;
use crate::CryptoError;

use blake2s_simd::Params;

const DIGEST_BYTES: usize = 32;

/// Blake2s CRH followed by the Blake2Xs XOF, as described in https://blake2.net/blake2x.pdf
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectHasher;

// Blake2X stores the requested XOF length in the upper bytes of the node offset
fn xof_digest_length_to_node_offset(
    node_offset: usize,
    xof_digest_length: usize,
) -> Result<u64, CryptoError> {
    if xof_digest_length > u16::MAX as usize {
        return Err(CryptoError::InvalidLength {
            expected: u16::MAX as usize,
            actual: xof_digest_length,
        });
    }
    Ok(node_offset as u64 | ((xof_digest_length as u64) << 32))
}

fn check_domain(domain: &[u8]) -> Result<(), CryptoError> {
    if domain.len() > 8 {
        return Err(CryptoError::DomainTooLarge(domain.len()));
    }
    Ok(())
}

impl Hasher for DirectHasher {
    type Error = CryptoError;

    fn crh(
        &self,
        domain: &[u8],
        message: &[u8],
        xof_digest_length: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        check_domain(domain)?;
        let hash_result = Params::new()
            .hash_length(DIGEST_BYTES)
            .node_offset(xof_digest_length_to_node_offset(0, xof_digest_length)?)
            .personal(domain)
            .to_state()
            .update(message)
            .finalize()
            .as_ref()
            .to_vec();
        Ok(hash_result)
    }

    fn xof(
        &self,
        domain: &[u8],
        hashed_message: &[u8],
        xof_digest_length: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        check_domain(domain)?;
        let num_hashes = (xof_digest_length + DIGEST_BYTES - 1) / DIGEST_BYTES;

        let mut result = Vec::with_capacity(num_hashes * DIGEST_BYTES);
        for i in 0..num_hashes {
            let hash_result = Params::new()
                .hash_length(DIGEST_BYTES)
                .max_leaf_length(DIGEST_BYTES as u32)
                .inner_hash_length(DIGEST_BYTES)
                .fanout(0)
                .max_depth(0)
                .personal(domain)
                .node_offset(xof_digest_length_to_node_offset(i, xof_digest_length)?)
                .to_state()
                .update(hashed_message)
                .finalize();
            result.extend_from_slice(hash_result.as_bytes());
        }
        result.truncate(xof_digest_length);

        Ok(result)
    }
}
