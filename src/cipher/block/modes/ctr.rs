use {
    crate::{
        cipher::block::{opossum::BLOCK_BYTES, InvalidKeyLength, KeySchedule},
        Ciphertext,
        Iv,
        Key,
        Plaintext,
    },
    std::fmt,
};

/// IV size in bytes (256 bits). Occupies the first [`IV_BYTES`] of every
/// counter block; the remaining `BLOCK_BYTES - IV_BYTES` bytes are the
/// counter field that [`increment_counter`] advances.
pub const IV_BYTES: usize = 32;

/// Counter mode: turns a [`KeySchedule`]d [block cipher](crate::BlockEncrypt)
/// into a length-preserving stream cipher over input of any length,
/// including zero.
///
/// The key is expanded into round keys exactly once per call and reused
/// across every block of the input; each successive counter block is
/// encrypted to produce a keystream block, which is XORed against (up to)
/// the next 256 bytes of input. Encryption and decryption are the same
/// operation — CTR is an involution over its keystream — so [`Ctr::decrypt`]
/// simply calls through to the same XOR pass as [`Ctr::encrypt`].
pub struct Ctr<'a, C> {
    cipher: &'a C,
}

impl<'a, C: KeySchedule<Block = [u8; BLOCK_BYTES]>> Ctr<'a, C> {
    /// Build a CTR driver over the given block cipher context.
    pub fn new(cipher: &'a C) -> Self {
        Self { cipher }
    }

    /// Encrypt `data` under `key` and `iv`. Fails if `key` or `iv` are not
    /// exactly the required size.
    pub fn encrypt(
        &self,
        data: Plaintext<&[u8]>,
        key: Key<&[u8]>,
        iv: Iv<&[u8]>,
    ) -> Result<Ciphertext<Vec<u8>>, CtrError> {
        self.apply(data.0, key.0, iv.0).map(Ciphertext)
    }

    /// Decrypt `data` under `key` and `iv`. Identical to [`Ctr::encrypt`];
    /// kept as a separate method purely for call-site clarity.
    pub fn decrypt(
        &self,
        data: Ciphertext<&[u8]>,
        key: Key<&[u8]>,
        iv: Iv<&[u8]>,
    ) -> Result<Plaintext<Vec<u8>>, CtrError> {
        self.apply(data.0, key.0, iv.0).map(Plaintext)
    }

    fn apply(&self, data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, CtrError> {
        let iv: [u8; IV_BYTES] = iv.try_into().map_err(|_| CtrError::InvalidIvLength(InvalidIvLength))?;
        let round_keys = self
            .cipher
            .expand_key(key)
            .map_err(CtrError::InvalidKeyLength)?;

        let mut output = vec![0u8; data.len()];
        let mut counter = [0u8; BLOCK_BYTES];
        counter[..IV_BYTES].copy_from_slice(&iv);

        let mut p = 0;
        while p < data.len() {
            let keystream = self
                .cipher
                .encrypt_block(&counter, &round_keys)
                .expect("counter block is always BLOCK_BYTES long");

            let n = (data.len() - p).min(BLOCK_BYTES);
            for j in 0..n {
                output[p + j] = data[p + j] ^ keystream[j];
            }

            p += n;
            increment_counter(&mut counter);
        }

        Ok(output)
    }
}

/// Increment the counter field (bytes `[IV_BYTES, BLOCK_BYTES)`) as a single
/// big-endian integer. Carries from the least-significant end toward
/// `IV_BYTES`; if the whole field wraps through zero, the carry simply runs
/// out at `IV_BYTES` and the IV prefix is left untouched. The wrap is silent
/// — the next keystream block is then produced from an all-zero counter
/// field, exactly as if encryption had started over.
fn increment_counter(counter: &mut [u8; BLOCK_BYTES]) {
    for byte in counter[IV_BYTES..].iter_mut().rev() {
        *byte = byte.wrapping_add(1);
        if *byte != 0 {
            return;
        }
    }
}

/// Raised when an IV is not exactly [`IV_BYTES`] long.
#[derive(Debug)]
pub struct InvalidIvLength;

impl fmt::Display for InvalidIvLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iv must be exactly {IV_BYTES} bytes")
    }
}

impl std::error::Error for InvalidIvLength {}

/// Everything that can go wrong calling [`Ctr::encrypt`] or [`Ctr::decrypt`].
#[derive(Debug)]
pub enum CtrError {
    InvalidKeyLength(InvalidKeyLength),
    InvalidIvLength(InvalidIvLength),
}

impl fmt::Display for CtrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CtrError::InvalidKeyLength(e) => e.fmt(f),
            CtrError::InvalidIvLength(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for CtrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CtrError::InvalidKeyLength(e) => Some(e),
            CtrError::InvalidIvLength(e) => Some(e),
        }
    }
}
