/// Encryption/decryption key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key<T>(pub T);

/// Initialization vector for a [block mode](crate::Ctr).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iv<T>(pub T);
