use zoorl_core::hash::compute_hash;

/// Trait for deriving the short hash of a URL.
///
/// Implementations must be pure: the same URL always yields the same hash.
/// Uniqueness is not required; colliding hashes overwrite each other in
/// storage.
pub trait HashGenerator: Send + Sync + 'static {
    fn generate(&self, url: &str) -> String;
}

/// SHA-256 digest reduced modulo 10^12 and encoded in base 62.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Base62;

impl HashGenerator for Sha256Base62 {
    fn generate(&self, url: &str) -> String {
        compute_hash(url)
    }
}
