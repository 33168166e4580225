use digest::Digest;

use crate::{HashError, ObjectId};

/// Streaming SHA-1 computation with collision detection, used to compute
/// the digest of `kind‖0x00‖payload`.
pub struct Hasher(Box<sha1_checked::Sha1>);

impl Hasher {
    pub fn new() -> Self {
        Self(Box::new(sha1_checked::Sha1::new()))
    }

    pub fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    /// Finalize and return the ObjectId. Fails if collision detection fires.
    pub fn finalize(self) -> Result<ObjectId, HashError> {
        let result = self.0.try_finalize();
        if result.has_collision() {
            return Err(HashError::Sha1Collision);
        }
        ObjectId::from_bytes(result.hash().as_slice())
    }

    /// Hash an object: digest of `kind‖0x00‖payload`, with no length field.
    pub fn hash_object(kind: &str, payload: &[u8]) -> Result<ObjectId, HashError> {
        let mut h = Self::new();
        h.update(kind.as_bytes());
        h.update(&[0u8]);
        h.update(payload);
        h.finalize()
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::io::Write for Hasher {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_object_deterministic() {
        let a = Hasher::hash_object("blob", b"hello\n").unwrap();
        let b = Hasher::hash_object("blob", b"hello\n").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hash_object_distinguishes_kind() {
        let blob = Hasher::hash_object("blob", b"x").unwrap();
        let tree = Hasher::hash_object("tree", b"x").unwrap();
        assert_ne!(blob, tree);
    }
}
