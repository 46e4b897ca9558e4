//! Opossum is an experimental 2048-bit block cipher (see [`Opossum`])
//! wrapped in [CTR mode](Ctr) to handle input of arbitrary length.
//!
//! ```
//! use opossum::{Ciphertext, Ctr, Iv, Key, Opossum, Plaintext};
//!
//! let cipher = Opossum::default();
//! let ctr = Ctr::new(&cipher);
//!
//! let key = [0u8; 256];
//! let iv = [0u8; 32];
//! let plaintext = b"a message longer than one block, or shorter, CTR doesn't care";
//!
//! let Ciphertext(ciphertext) = ctr
//!     .encrypt(Plaintext(plaintext.as_slice()), Key(&key), Iv(&iv))
//!     .unwrap();
//! let Plaintext(decrypted) = ctr
//!     .decrypt(Ciphertext(ciphertext.as_slice()), Key(&key), Iv(&iv))
//!     .unwrap();
//! assert_eq!(decrypted, plaintext);
//! ```
//!
//! Opossum is a research/toy construction: the S-box, permutation and round
//! structure are far more regular than a vetted cipher's, and no security
//! claims are made about it. See [`Opossum`] for the full design.

#[cfg(test)]
mod test;

mod cipher;
mod key;
mod text;

pub use {
    cipher::{
        block::{
            modes::IV_BYTES,
            opossum::{
                rotate_left_bits,
                InvalidKeyLength,
                Opossum,
                RoundKeys,
                BLOCK_BYTES,
                DEFAULT_ROUNDS,
                INV_S_BOX,
                KEY_BYTES,
                PERMUTATION,
                S_BOX,
            },
            Ctr,
        },
        BlockEncrypt,
        CtrError,
        InvalidBlockLength,
        InvalidIvLength,
        KeySchedule,
    },
    key::{Iv, Key},
    text::{Ciphertext, Plaintext},
};
