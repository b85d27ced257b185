//! crypto/digest.rs
//! Fast (non-KDF) digests with optional salt and iteration.
//!
//! Design:
//! - Pass 1 digests `input || salt` (salt omitted when `saltLength == 0`).
//! - Each later pass digests the raw bytes of the previous output.
//! - Result is the lower-case hex of the final digest.
//! - `sha3` and `sha3-128` are Keccak with the original 0x01 padding, not the
//!   FIPS 202 functions. `sha3-128` is Keccak with capacity 256 cut to 16 bytes.

use digest::Digest;
use md5::Md5;
use ripemd::Ripemd160;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use sha3::Keccak512;

use crate::constants::{KECCAK128_OUT_LEN, KECCAK128_RATE, NO_SALT};
use crate::crypto::close_window;
use crate::crypto::types::{HashComponent, HashResult, SegmentColor};
use crate::params::{AlgorithmId, FastHashParams};
use crate::telemetry::{Stage, TelemetryTimer};
use crate::types::ComputationError;
use crate::utils::{preview, random_bytes, to_hex};

/// Supported fast digests.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DigestAlg {
    Md5,
    Sha1,
    Sha256,
    Sha512,
    /// Keccak-512.
    Keccak512,
    /// Keccak, 1344-bit rate, 128-bit output.
    Keccak128,
    Ripemd160,
}

impl DigestAlg {
    pub fn from_id(id: AlgorithmId) -> Option<Self> {
        match id {
            AlgorithmId::Md5       => Some(DigestAlg::Md5),
            AlgorithmId::Sha1      => Some(DigestAlg::Sha1),
            AlgorithmId::Sha256    => Some(DigestAlg::Sha256),
            AlgorithmId::Sha512    => Some(DigestAlg::Sha512),
            AlgorithmId::Sha3      => Some(DigestAlg::Keccak512),
            AlgorithmId::Sha3_128  => Some(DigestAlg::Keccak128),
            AlgorithmId::Ripemd160 => Some(DigestAlg::Ripemd160),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DigestAlg::Md5       => "MD5",
            DigestAlg::Sha1      => "SHA-1",
            DigestAlg::Sha256    => "SHA-256",
            DigestAlg::Sha512    => "SHA-512",
            DigestAlg::Keccak512 => "SHA-3",
            DigestAlg::Keccak128 => "SHA-3-128",
            DigestAlg::Ripemd160 => "RIPEMD-160",
        }
    }

    pub fn color(self) -> SegmentColor {
        match self {
            DigestAlg::Md5 | DigestAlg::Sha1 => SegmentColor::Yellow,
            DigestAlg::Sha256 | DigestAlg::Sha512 => SegmentColor::Cyan,
            DigestAlg::Keccak512 | DigestAlg::Keccak128 | DigestAlg::Ripemd160 => SegmentColor::Purple,
        }
    }

    /// Output size in bytes.
    pub fn output_len(self) -> usize {
        match self {
            DigestAlg::Md5       => 16,
            DigestAlg::Sha1      => 20,
            DigestAlg::Sha256    => 32,
            DigestAlg::Sha512    => 64,
            DigestAlg::Keccak512 => 64,
            DigestAlg::Keccak128 => KECCAK128_OUT_LEN,
            DigestAlg::Ripemd160 => 20,
        }
    }
}

/// Keccak sponge over `keccak::f1600` with the legacy `0x01` pad.
///
/// Only rates that are a whole number of lanes are supported.
struct KeccakSponge {
    state: [u64; 25],
    block: Vec<u8>,
    rate: usize,
}

impl KeccakSponge {
    fn new(rate: usize) -> Self {
        Self { state: [0u64; 25], block: Vec::with_capacity(rate), rate }
    }

    fn absorb_block(&mut self) {
        for (lane, chunk) in self.state.iter_mut().zip(self.block.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *lane ^= u64::from_le_bytes(word);
        }
        keccak::f1600(&mut self.state);
        self.block.clear();
    }

    fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            let take = (self.rate - self.block.len()).min(data.len());
            self.block.extend_from_slice(&data[..take]);
            data = &data[take..];
            if self.block.len() == self.rate {
                self.absorb_block();
            }
        }
    }

    /// Pad, absorb the final block and squeeze `out_len` bytes (at most one rate).
    fn finalize(mut self, out_len: usize) -> Vec<u8> {
        let used = self.block.len();
        self.block.resize(self.rate, 0);
        self.block[used] ^= 0x01;
        self.block[self.rate - 1] ^= 0x80;
        self.absorb_block();

        self.state
            .iter()
            .flat_map(|lane| lane.to_le_bytes())
            .take(out_len)
            .collect()
    }
}

/// Internal hashing state.
enum DigestState {
    Md5(Md5),
    Sha1(Sha1),
    Sha256(Sha256),
    Sha512(Sha512),
    Keccak512(Keccak512),
    Keccak128(KeccakSponge),
    Ripemd160(Ripemd160),
}

impl DigestState {
    fn new(alg: DigestAlg) -> Self {
        match alg {
            DigestAlg::Md5       => DigestState::Md5(Md5::new()),
            DigestAlg::Sha1      => DigestState::Sha1(Sha1::new()),
            DigestAlg::Sha256    => DigestState::Sha256(Sha256::new()),
            DigestAlg::Sha512    => DigestState::Sha512(Sha512::new()),
            DigestAlg::Keccak512 => DigestState::Keccak512(Keccak512::new()),
            DigestAlg::Keccak128 => DigestState::Keccak128(KeccakSponge::new(KECCAK128_RATE)),
            DigestAlg::Ripemd160 => DigestState::Ripemd160(Ripemd160::new()),
        }
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        match self {
            DigestState::Md5(h)       => Digest::update(h, data),
            DigestState::Sha1(h)      => Digest::update(h, data),
            DigestState::Sha256(h)    => Digest::update(h, data),
            DigestState::Sha512(h)    => Digest::update(h, data),
            DigestState::Keccak512(h) => Digest::update(h, data),
            DigestState::Keccak128(h) => h.update(data),
            DigestState::Ripemd160(h) => Digest::update(h, data),
        }
    }

    #[inline]
    fn finalize(self) -> Vec<u8> {
        match self {
            DigestState::Md5(h)       => h.finalize().to_vec(),
            DigestState::Sha1(h)      => h.finalize().to_vec(),
            DigestState::Sha256(h)    => h.finalize().to_vec(),
            DigestState::Sha512(h)    => h.finalize().to_vec(),
            DigestState::Keccak512(h) => h.finalize().to_vec(),
            DigestState::Keccak128(h) => h.finalize(KECCAK128_OUT_LEN),
            DigestState::Ripemd160(h) => h.finalize().to_vec(),
        }
    }
}

/// One digest pass over `parts`, fed in order.
pub fn digest_once(alg: DigestAlg, parts: &[&[u8]]) -> Vec<u8> {
    let mut state = DigestState::new(alg);
    for p in parts {
        state.update(p);
    }
    state.finalize()
}

/// `iterations` passes; `salt` only joins the first one.
pub fn digest_iterated(alg: DigestAlg, input: &[u8], salt: &[u8], iterations: u32) -> Vec<u8> {
    let mut out = digest_once(alg, &[input, salt]);
    for _ in 1..iterations {
        out = digest_once(alg, &[out.as_slice()]);
    }
    out
}

pub fn hash(
    alg: DigestAlg,
    password: &str,
    params: &FastHashParams,
) -> Result<HashResult, ComputationError> {
    params.validate()?;

    let mut timer = TelemetryTimer::new();
    let salt = timer.stage(Stage::Salt, || random_bytes(params.salt_length));
    let out = timer.stage(Stage::Compute, || {
        digest_iterated(alg, password.as_bytes(), &salt, params.iterations)
    });
    let time_ms = close_window(&mut timer, alg.display_name());

    let result_hex = to_hex(&out);
    let (salt_value, salt_desc) = if salt.is_empty() {
        (NO_SALT.to_string(), "Unsalted")
    } else {
        (to_hex(&salt), "Random salt")
    };

    Ok(HashResult {
        breakdown: vec![
            HashComponent::new("Alg", alg.display_name(), "Message Digest", alg.color()),
            HashComponent::new("Iter", params.iterations.to_string(), "Loop count", SegmentColor::Gray),
            HashComponent::new("Salt", salt_value, salt_desc, SegmentColor::Yellow),
            HashComponent::new("Hash", preview(&result_hex), "Result (truncated)", SegmentColor::Green),
        ],
        hash: result_hex,
        time_ms,
    })
}
