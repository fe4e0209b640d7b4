use crate::error::{OtpError, Result};
use crate::hmac::{self, DIGEST_LEN, Digest, HashPrimitive};
use tracing::debug;

/// The widest supported code
pub const MAX_DIGITS: u32 = 8;

static MODULI: [u32; MAX_DIGITS as usize + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
];

/// `10^digits`, or [OtpError::InvalidDigitCount] beyond [MAX_DIGITS]
pub fn modulus(digits: u32) -> Result<u32> {
    MODULI.get(digits as usize).copied().ok_or_else(|| {
        debug!(digits, "digit count out of range");
        OtpError::InvalidDigitCount(digits)
    })
}

/// RFC 4226 dynamic truncation of an HMAC digest to a `digits`-wide code
pub fn truncate(digest: &Digest, digits: u32) -> Result<u32> {
    let modulus = modulus(digits)?;
    let offset = (digest[DIGEST_LEN - 1] & 0x0f) as usize;
    let code = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);
    Ok(code % modulus)
}

/// Generate a code for an explicit counter value
///
/// - `hash`: the hash the HMAC is built on
/// - `secret`: the raw secret bytes
/// - `counter`: the counter, serialized as 8 big-endian bytes
/// - `digits`: the code width, `0..=8`
pub fn code_at_counter<H: HashPrimitive + ?Sized>(
    hash: &H,
    secret: &[u8],
    counter: u64,
    digits: u32,
) -> Result<u32> {
    modulus(digits)?;
    let digest = hmac::hmac(hash, secret, &counter.to_be_bytes());
    truncate(&digest, digits)
}
