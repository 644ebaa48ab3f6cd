use sha2::{Digest, Sha512};

/// One-way password hash. Implementations must be deterministic: accounts are
/// looked up by `(email, hash)`.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> String;
}

/// SHA-512, hex encoded (128 lowercase characters).
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512PasswordHasher;

impl PasswordHasher for Sha512PasswordHasher {
    fn hash(&self, password: &str) -> String {
        hex::encode(Sha512::digest(password.as_bytes()))
    }
}
