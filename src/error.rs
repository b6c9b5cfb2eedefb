/// Errors raised while configuring, parsing or merging estimators.
///
/// Inserting items and computing estimates never fail; every error here is
/// detected up front, before any item is processed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("hash length {0} is outside the supported range 2..=32")]
    HashLength(u32),

    #[error("bucket index width {hash_k} is invalid for a {hash_length}-bit hash")]
    BucketBits { hash_k: u32, hash_length: u32 },

    #[error("bias-correction constant {0} must be finite and positive")]
    Alpha(f64),

    #[error("cannot merge estimators built with different configurations")]
    Mismatch,

    #[error("cannot merge a LogLog estimator with a HyperLogLog estimator")]
    VariantMismatch,

    #[error("unknown estimator variant '{0}'")]
    UnknownVariant(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
