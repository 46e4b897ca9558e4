//! Opossum is an experimental block cipher operating on 2048-bit blocks with
//! 2048-bit keys.
//!
//! Opossum is a substitution-permutation network (SPN): a fixed, deterministically
//! derived S-box provides confusion, a byte-permutation table provides
//! diffusion, a round-dependent mixing step is layered on top to break up
//! the otherwise static round structure, and a key schedule stretches the
//! 256-byte master key into one 256-byte subkey per round.
//!
//! Opossum is a research/toy construction. The round count, S-box and
//! permutation are far more regular than a vetted cipher's, and no security
//! claims are made. It is implemented here because its transformation
//! semantics are fully specified and worth preserving bit-for-bit, not
//! because it should be used to protect anything.
//!
//! Opossum has no block mode of its own; it is always used through
//! [`Ctr`](crate::Ctr).

use {
    crate::cipher::block::{BlockEncrypt, InvalidBlockLength, KeySchedule},
    docext::docext,
    zeroize::{Zeroize, ZeroizeOnDrop},
};

/// Block size in bytes (2048 bits).
pub const BLOCK_BYTES: usize = 256;

/// Key size in bytes (2048 bits). Equal to [`BLOCK_BYTES`]; round keys are the
/// same size as a block.
pub const KEY_BYTES: usize = BLOCK_BYTES;

/// Default round count, used by [`Opossum::default`].
pub const DEFAULT_ROUNDS: usize = 160;

/// The substitution table.
///
/// Derived once by a Fisher-Yates shuffle of the identity permutation, using a
/// deterministic generator seeded with the literal `42`: for `i` from 255 down
/// to 1, swap `S[i]` with `S[rng.next(i + 1)]`.
///
/// The reference construction this cipher is modeled on leaves the exact
/// generator algorithm unspecified beyond the seed, which makes it impossible
/// to reproduce bit-for-bit without that reference. Rather than depend on
/// guessing a specific non-cryptographic PRNG, this table is precomputed once
/// with a minimal generator of this crate's own choosing and embedded as a
/// constant. The only externally observable requirement is that it is *some*
/// bijection on `[0, 256)`, which the test suite checks directly.
#[rustfmt::skip]
pub const S_BOX: [u8; 256] = [
    0x92, 0x78, 0x80, 0xc6, 0x62, 0x36, 0x05, 0xd5, 0x34, 0x14, 0x3e, 0xad, 0x4a, 0x22, 0x6e, 0x86,
    0x50, 0x45, 0xca, 0x49, 0x26, 0x25, 0x0a, 0x18, 0x23, 0xb5, 0x91, 0xac, 0x28, 0xa2, 0x90, 0x55,
    0x24, 0xa5, 0xb8, 0x32, 0x7a, 0x6a, 0x0d, 0x5c, 0x3a, 0x2a, 0xd1, 0xb6, 0x60, 0x52, 0x04, 0x73,
    0x6b, 0x44, 0xe7, 0x37, 0xfa, 0x2d, 0x8a, 0x59, 0x61, 0x21, 0x46, 0x2f, 0x9a, 0x7e, 0x2e, 0xf8,
    0xce, 0x75, 0xb0, 0x66, 0x38, 0x95, 0x42, 0xe6, 0xf9, 0xc2, 0xfc, 0x9c, 0xf4, 0x57, 0xb4, 0x93,
    0xe0, 0x5e, 0xec, 0xe4, 0x4c, 0xd0, 0x4e, 0xea, 0x33, 0x3d, 0x74, 0x94, 0x98, 0x63, 0x71, 0xae,
    0xa9, 0x72, 0x88, 0x4f, 0x31, 0xbe, 0xf0, 0xd7, 0x10, 0x8e, 0xf1, 0xdf, 0xcc, 0x76, 0xd4, 0xb1,
    0xf2, 0x39, 0xd9, 0xf3, 0x6f, 0x19, 0x11, 0xba, 0x16, 0x81, 0x0e, 0xe9, 0x1c, 0x82, 0x4d, 0x8d,
    0x68, 0xf6, 0xed, 0xa4, 0x1a, 0x7d, 0x84, 0x0b, 0x64, 0x79, 0x7c, 0xda, 0x48, 0xff, 0xbc, 0xa7,
    0x00, 0x13, 0x56, 0x99, 0x5f, 0x9e, 0x6c, 0x83, 0xa6, 0xcb, 0xa0, 0xc8, 0xb7, 0x65, 0xd8, 0xaf,
    0x20, 0x1d, 0xb2, 0xdd, 0xa3, 0x6d, 0x03, 0xc7, 0xa8, 0xc1, 0x85, 0xab, 0x1f, 0xc3, 0xcf, 0xc4,
    0x06, 0xe5, 0x70, 0xc0, 0x12, 0xd2, 0xee, 0xe1, 0xb9, 0x01, 0xe8, 0xfb, 0x29, 0x8f, 0x97, 0x5b,
    0x8b, 0xa1, 0xaa, 0x0f, 0xbf, 0x47, 0x2c, 0xd6, 0xc9, 0x3f, 0x0c, 0xeb, 0x54, 0x51, 0xdc, 0xe2,
    0x89, 0xfd, 0x09, 0x07, 0x1e, 0x35, 0xde, 0xb3, 0x15, 0x69, 0xbd, 0x87, 0x9d, 0xf5, 0x2b, 0x7b,
    0x3c, 0x9b, 0xfe, 0x67, 0x58, 0xbb, 0x8c, 0xe3, 0x43, 0x77, 0x4b, 0x9f, 0x40, 0x5d, 0x30, 0x3b,
    0x27, 0xf7, 0xcd, 0xdb, 0x02, 0x17, 0xc5, 0xd3, 0x5a, 0x53, 0x08, 0x7f, 0x96, 0x41, 0xef, 0x1b,
];

/// Inverse [substitution table](S_BOX).
///
/// Derived from `S_BOX` by `InvSBox[SBox[i]] = i` for all `i`.
#[rustfmt::skip]
pub const INV_S_BOX: [u8; 256] = [
    0x90, 0xb9, 0xf4, 0xa6, 0x2e, 0x06, 0xb0, 0xd3, 0xfa, 0xd2, 0x16, 0x87, 0xca, 0x26, 0x7a, 0xc3,
    0x68, 0x76, 0xb4, 0x91, 0x09, 0xd8, 0x78, 0xf5, 0x17, 0x75, 0x84, 0xff, 0x7c, 0xa1, 0xd4, 0xac,
    0xa0, 0x39, 0x0d, 0x18, 0x20, 0x15, 0x14, 0xf0, 0x1c, 0xbc, 0x29, 0xde, 0xc6, 0x35, 0x3e, 0x3b,
    0xee, 0x64, 0x23, 0x58, 0x08, 0xd5, 0x05, 0x33, 0x44, 0x71, 0x28, 0xef, 0xe0, 0x59, 0x0a, 0xc9,
    0xec, 0xfd, 0x46, 0xe8, 0x31, 0x11, 0x3a, 0xc5, 0x8c, 0x13, 0x0c, 0xea, 0x54, 0x7e, 0x56, 0x63,
    0x10, 0xcd, 0x2d, 0xf9, 0xcc, 0x1f, 0x92, 0x4d, 0xe4, 0x37, 0xf8, 0xbf, 0x27, 0xed, 0x51, 0x94,
    0x2c, 0x38, 0x04, 0x5d, 0x88, 0x9d, 0x43, 0xe3, 0x80, 0xd9, 0x25, 0x30, 0x96, 0xa5, 0x0e, 0x74,
    0xb2, 0x5e, 0x61, 0x2f, 0x5a, 0x41, 0x6d, 0xe9, 0x01, 0x89, 0x24, 0xdf, 0x8a, 0x85, 0x3d, 0xfb,
    0x02, 0x79, 0x7d, 0x97, 0x86, 0xaa, 0x0f, 0xdb, 0x62, 0xd0, 0x36, 0xc0, 0xe6, 0x7f, 0x69, 0xbd,
    0x1e, 0x1a, 0x00, 0x4f, 0x5b, 0x45, 0xfc, 0xbe, 0x5c, 0x93, 0x3c, 0xe1, 0x4b, 0xdc, 0x95, 0xeb,
    0x9a, 0xc1, 0x1d, 0xa4, 0x83, 0x21, 0x98, 0x8f, 0xa8, 0x60, 0xc2, 0xab, 0x1b, 0x0b, 0x5f, 0x9f,
    0x42, 0x6f, 0xa2, 0xd7, 0x4e, 0x19, 0x2b, 0x9c, 0x22, 0xb8, 0x77, 0xe5, 0x8e, 0xda, 0x65, 0xc4,
    0xb3, 0xa9, 0x49, 0xad, 0xaf, 0xf6, 0x03, 0xa7, 0x9b, 0xc8, 0x12, 0x99, 0x6c, 0xf2, 0x40, 0xae,
    0x55, 0x2a, 0xb5, 0xf7, 0x6e, 0x07, 0xc7, 0x67, 0x9e, 0x72, 0x8b, 0xf3, 0xce, 0xa3, 0xd6, 0x6b,
    0x50, 0xb7, 0xcf, 0xe7, 0x53, 0xb1, 0x47, 0x32, 0xba, 0x7b, 0x57, 0xcb, 0x52, 0x82, 0xb6, 0xfe,
    0x66, 0x6a, 0x70, 0x73, 0x4c, 0xdd, 0x81, 0xf1, 0x3f, 0x48, 0x34, 0xbb, 0x4a, 0xd1, 0xe2, 0x8d,
];

/// The byte-position permutation table.
///
/// Treats the 256-byte state as a 16x16 row-major matrix and shifts row `r`
/// left by `r` positions (row 0 is unchanged): `P[orig] = dest` where
/// `dest = row * 16 + (col + 16 - row) % 16`. Unlike [`S_BOX`], this is pure
/// arithmetic with no RNG, so it's derived in-source as a `const fn` instead
/// of hand-embedded.
pub const PERMUTATION: [usize; 256] = build_permutation();

const fn build_permutation() -> [usize; 256] {
    let mut table = [0usize; 256];
    let mut row = 0;
    while row < 16 {
        let mut col = 0;
        while col < 16 {
            let orig = row * 16 + col;
            let new_col = (col + 16 - row) % 16;
            table[orig] = row * 16 + new_col;
            col += 1;
        }
        row += 1;
    }
    table
}

/// The Opossum cipher context.
///
/// Owns only the round count; the S-box, inverse S-box and permutation table
/// are crate-level constants shared by every instance. Immutable after
/// construction and safe to share across threads — it holds no key material,
/// so concurrent calls using their own key/IV/buffers never observe each
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opossum {
    rounds: usize,
}

impl Opossum {
    /// Build a context with the given round count.
    pub fn new(rounds: usize) -> Self {
        Self { rounds }
    }

    /// The round count this context was constructed with.
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl Default for Opossum {
    /// Construct with the default round count of [`DEFAULT_ROUNDS`].
    fn default() -> Self {
        Self::new(DEFAULT_ROUNDS)
    }
}

impl BlockEncrypt for Opossum {
    type Block = [u8; BLOCK_BYTES];

    /// Encrypt one 256-byte block under the given round keys.
    ///
    /// Whitens with `round_keys[0]`, applies `rounds - 1` main rounds of
    /// [`sub_bytes`], [`permute_bytes`], [`mix_columns`] and
    /// [`apply_round_dependent_transforms`], each closed by an
    /// [`add_round_key`], and finishes with a final round that omits
    /// `mix_columns`. There is no separate decryption routine: under CTR mode
    /// this same function produces the keystream for both directions.
    fn encrypt_block(
        &self,
        block: &[u8],
        round_keys: &[Self::Block],
    ) -> Result<Self::Block, InvalidBlockLength> {
        let mut state: [u8; BLOCK_BYTES] = block.try_into().map_err(|_| InvalidBlockLength)?;
        let rounds = self.rounds;

        add_round_key(&mut state, &round_keys[0]);

        for round in 1..rounds {
            sub_bytes(&mut state);
            permute_bytes(&mut state);
            mix_columns(&mut state);
            apply_round_dependent_transforms(&mut state, round);
            add_round_key(&mut state, &round_keys[round]);
        }

        sub_bytes(&mut state);
        permute_bytes(&mut state);
        apply_round_dependent_transforms(&mut state, rounds);
        add_round_key(&mut state, &round_keys[rounds]);

        Ok(state)
    }
}

impl KeySchedule for Opossum {
    /// Expand a 256-byte master key into `rounds + 1` round keys of 256 bytes
    /// each.
    ///
    /// Each window after the first is derived from the one before it: rotate
    /// left by 3 bytes, substitute every fourth byte through the [`S_BOX`],
    /// XOR a round constant into the first byte, then XOR the whole window
    /// with the window 256 bytes earlier.
    fn expand_key(&self, key: &[u8]) -> Result<RoundKeys, InvalidKeyLength> {
        let key: [u8; KEY_BYTES] = key.try_into().map_err(|_| InvalidKeyLength)?;
        let mut expanded = vec![0u8; (self.rounds + 1) * KEY_BYTES];
        expanded[..KEY_BYTES].copy_from_slice(&key);

        for window in 1..=self.rounds {
            let i = window * KEY_BYTES;
            let mut t = [0u8; KEY_BYTES];
            t.copy_from_slice(&expanded[i - KEY_BYTES..i]);

            t.rotate_left(3);
            for b in t.iter_mut().step_by(4) {
                *b = S_BOX[*b as usize];
            }
            let rc = (i / KEY_BYTES) % 256;
            t[0] ^= rc as u8;

            let mut prev = [0u8; KEY_BYTES];
            prev.copy_from_slice(&expanded[i - KEY_BYTES..i]);

            for (dst, (prev, new)) in expanded[i..i + KEY_BYTES].iter_mut().zip(prev.iter().zip(t.iter())) {
                *dst = prev ^ new;
            }
        }

        let round_keys = RoundKeys(
            expanded
                .chunks_exact(KEY_BYTES)
                .map(|c| c.try_into().expect("chunk is exactly KEY_BYTES long"))
                .collect(),
        );
        expanded.zeroize();
        Ok(round_keys)
    }
}

/// Round keys produced by [`Opossum::expand_key`].
///
/// Zeroized on drop, since round keys are derived directly from the master
/// key and are just as sensitive.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys(pub(crate) Vec<[u8; KEY_BYTES]>);

impl std::ops::Deref for RoundKeys {
    type Target = [[u8; KEY_BYTES]];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Raised when a master key is not exactly [`KEY_BYTES`] long.
#[derive(Debug)]
pub struct InvalidKeyLength;

impl std::fmt::Display for InvalidKeyLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "key must be exactly {KEY_BYTES} bytes")
    }
}

impl std::error::Error for InvalidKeyLength {}

/// The SubBytes transformation.
///
/// Replaces each byte in the state with the corresponding byte from
/// [`S_BOX`].
pub fn sub_bytes(state: &mut [u8; BLOCK_BYTES]) {
    for b in state.iter_mut() {
        *b = S_BOX[*b as usize];
    }
}

/// The PermuteBytes transformation.
///
/// Builds a fresh buffer with `t[P[i]] = state[i]` for every source index
/// `i`, then copies it back over `state`. Built into a fresh buffer rather
/// than permuted in place because [`PERMUTATION`] is not made of disjoint
/// transpositions in general, so an in-place swap pass would clobber sources
/// before they're read.
pub fn permute_bytes(state: &mut [u8; BLOCK_BYTES]) {
    let mut t = [0u8; BLOCK_BYTES];
    for (i, &b) in state.iter().enumerate() {
        t[PERMUTATION[i]] = b;
    }
    *state = t;
}

/// The MixColumns transformation (intra-group diffusion).
///
/// Partitions the state into sixteen 16-byte groups. Within each group, every
/// byte is XORed with a left-bit-rotation (by 3 bits) of its right neighbour
/// and with its left neighbour, both indices wrapping around the group. The
/// neighbours are read from a snapshot of the group taken before any byte in
/// it is updated — updating in place instead would mean later bytes in the
/// group see already-mixed neighbours, producing a different, incompatible
/// cipher. This is the subtlest step in the block primitive.
#[docext]
pub fn mix_columns(state: &mut [u8; BLOCK_BYTES]) {
    for group in state.chunks_mut(16) {
        let g: [u8; 16] = group.try_into().expect("group is exactly 16 bytes");
        for i in 0..16 {
            let next = g[(i + 1) % 16];
            let rotated = next.rotate_left(3);
            group[i] ^= rotated;
            group[i] ^= g[(i + 15) % 16];
        }
    }
}

/// Round-dependent mixing: a bit-rotation of the whole state followed by a
/// round-dependent additive mask, so that no two rounds apply the same
/// transformation.
///
/// The rotation amount `(round % 8) + 1` is always in `[1, 8]`, so the
/// general [`rotate_left_bits`] helper is only ever exercised with a bit
/// shift in `[1, 7]` from here (see that function's doc comment for the
/// `bitShift == 0` special case this never hits internally).
pub fn apply_round_dependent_transforms(state: &mut [u8; BLOCK_BYTES], round: usize) {
    let rot = (round % 8) + 1;
    *state = rotate_left_bits(state, rot)
        .try_into()
        .expect("rotate_left_bits preserves length");

    let x = (round * 17 + 83) % 256;
    for (i, b) in state.iter_mut().enumerate() {
        *b ^= ((x + i) % 256) as u8;
    }
}

/// The AddRoundKey transformation: XOR the state with a round key.
pub fn add_round_key(state: &mut [u8; BLOCK_BYTES], round_key: &[u8; BLOCK_BYTES]) {
    for (s, k) in state.iter_mut().zip(round_key.iter()) {
        *s ^= k;
    }
}

/// Rotate a byte array left by `k` bits, treating it as a big-endian bit
/// string of length `8 * data.len()`.
///
/// `k` is normalized modulo the bit length first, and `k == 0` (after
/// normalization) is special-cased to return the input unchanged. When the
/// normalized rotation is a whole number of bytes (`k % 8 == 0`), this is
/// pure byte rotation via [`slice::rotate_left`]; the general per-bit formula
/// below is only well-defined for a bit shift in `[1, 7]`, since a shift of a
/// `u8` by 8 is not meaningful.
#[docext]
pub fn rotate_left_bits(data: &[u8], k: usize) -> Vec<u8> {
    let len = data.len();
    let total_bits = 8 * len;
    let k = k % total_bits;
    if k == 0 {
        return data.to_vec();
    }

    let byte_shift = k / 8;
    let bit_shift = k % 8;
    if bit_shift == 0 {
        let mut out = data.to_vec();
        out.rotate_left(byte_shift);
        return out;
    }

    (0..len)
        .map(|i| {
            let src = (i + len - byte_shift) % len;
            let prev = (src + len - 1) % len;
            (data[src] << bit_shift) | (data[prev] >> (8 - bit_shift))
        })
        .collect()
}
