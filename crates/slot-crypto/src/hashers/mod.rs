mod direct;
pub use direct::DirectHasher;

/// Two-stage hashing used to derive scalars: the message is first compressed (`crh`) and the
/// digest is then stretched to the requested length (`xof`). Both stages are keyed by a short
/// domain separator.
pub trait Hasher {
    type Error;

    /// Compresses `message` under `domain`. The final output length is mixed into the digest, so
    /// requests for different lengths never share a prefix.
    fn crh(
        &self,
        domain: &[u8],
        message: &[u8],
        xof_digest_length: usize,
    ) -> Result<Vec<u8>, Self::Error>;

    /// Expands a compressed digest to `output_size_in_bytes` bytes
    fn xof(
        &self,
        domain: &[u8],
        hashed_message: &[u8],
        output_size_in_bytes: usize,
    ) -> Result<Vec<u8>, Self::Error>;

    /// `crh` followed by `xof`
    fn hash(
        &self,
        domain: &[u8],
        message: &[u8],
        output_size_in_bytes: usize,
    ) -> Result<Vec<u8>, Self::Error> {
        let digest = self.crh(domain, message, output_size_in_bytes)?;
        self.xof(domain, &digest, output_size_in_bytes)
    }
}
