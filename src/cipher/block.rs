pub mod modes;
pub mod opossum;

pub use {
    modes::{Ctr, CtrError, InvalidIvLength},
    opossum::{InvalidKeyLength, Opossum, RoundKeys},
};

/// The encryption half of a block cipher operating on a single fixed-size
/// block.
///
/// Note that a block cipher alone does not handle input of arbitrary length
/// — it can only transform one block at a time. To do that it must be
/// combined with a mode of operation, such as [`Ctr`].
pub trait BlockEncrypt {
    type Block;

    /// Encrypt one block under the given round keys. Fails with
    /// [`InvalidBlockLength`] if `block` is not exactly the right size; this
    /// is unreachable from the public [`Ctr`] API, since the counter block it
    /// builds is always the correct length.
    fn encrypt_block(
        &self,
        block: &[u8],
        round_keys: &[Self::Block],
    ) -> Result<Self::Block, InvalidBlockLength>;
}

/// Expands a master key into the round keys a [`BlockEncrypt`] implementation
/// needs.
///
/// Kept as a separate trait from [`BlockEncrypt`] because it models a
/// distinct responsibility (stretching key material) that a caller typically
/// invokes once per logical encryption session, not once per block — see
/// [`Ctr`], which expands the key a single time and reuses the result across
/// every block of the input.
pub trait KeySchedule: BlockEncrypt {
    /// Expand `key` into `self`'s round keys. Fails with
    /// [`InvalidKeyLength`] if `key` is not exactly the right size.
    fn expand_key(&self, key: &[u8]) -> Result<RoundKeys, InvalidKeyLength>;
}

/// Raised when [`BlockEncrypt::encrypt_block`] is called with a block of the
/// wrong size.
#[derive(Debug)]
pub struct InvalidBlockLength;

impl std::fmt::Display for InvalidBlockLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "block must be exactly {} bytes", opossum::BLOCK_BYTES)
    }
}

impl std::error::Error for InvalidBlockLength {}
