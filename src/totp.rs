use crate::base32;
use crate::config::TotpConfig;
use crate::error::{OtpError, Result};
use crate::hmac::{HashPrimitive, RingSha1};
use crate::hotp;
use crate::random::RandomSource;
use crate::uri::TotpUri;
use rand::Rng;
use std::time::SystemTime;
use tracing::{trace, warn};

/// The default period of TOTP code in seconds
pub const RFC6238_TOTP_PERIOD: u64 = 30;

/// The default length of TOTP secret in bytes
pub const RFC6238_TOTP_KEY_LENGTH: usize = 20;

/// The default number of digits in a TOTP code
pub const RFC6238_TOTP_DIGITS: u32 = 6;

/// Smallest capacity that holds a base32 encoded secret and its terminator
pub const SECRET_TEXT_CAPACITY: usize = base32::encoded_len(RFC6238_TOTP_KEY_LENGTH) + 1;

/// Seconds since the UNIX epoch
pub fn unix_seconds(timestamp: SystemTime) -> Result<u64> {
    timestamp
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .map_err(|_| OtpError::TimeBeforeEpoch)
}

/// `floor(timestamp / time_step)`
pub fn counter(timestamp: u64, time_step: u64) -> Result<u64> {
    timestamp
        .checked_div(time_step)
        .ok_or(OtpError::InvalidTimeStep)
}

/// Compute a TOTP code with a custom hash
pub fn compute_code_with<H: HashPrimitive + ?Sized>(
    hash: &H,
    secret: &[u8],
    timestamp: u64,
    time_step: u64,
    digits: u32,
) -> Result<u32> {
    let counter = counter(timestamp, time_step)?;
    hotp::code_at_counter(hash, secret, counter, digits)
}

/// Compute an HMAC-SHA1 TOTP code
///
/// - `secret`: the raw secret bytes
/// - `timestamp`: seconds since the UNIX epoch
/// - `time_step`: the period of the code in seconds
/// - `digits`: the code width, `0..=8`
pub fn compute_code(secret: &[u8], timestamp: u64, time_step: u64, digits: u32) -> Result<u32> {
    compute_code_with(&RingSha1, secret, timestamp, time_step, digits)
}

/// Render a code with leading zeros to exactly `digits` characters
pub fn format_code(code: u32, digits: u32) -> String {
    if digits == 0 {
        return String::new();
    }
    format!("{code:0width$}", width = digits as usize)
}

/// Generate a 160-bit secret from `source` and return it base32 encoded.
///
/// `capacity` counts the terminator, so it must be at least [SECRET_TEXT_CAPACITY].
pub fn generate_secret<R: RandomSource + ?Sized>(source: &mut R, capacity: usize) -> Result<String> {
    if capacity < SECRET_TEXT_CAPACITY {
        return Err(OtpError::BufferTooSmall {
            required: SECRET_TEXT_CAPACITY,
            capacity,
        });
    }
    let mut secret = [0u8; RFC6238_TOTP_KEY_LENGTH];
    source.try_fill(&mut secret).inspect_err(|err| {
        warn!(error = %err, "random source failed while generating a secret");
    })?;
    base32::encode_with_capacity(&secret, capacity)
}

/// TOTP secret
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpSecret(Box<[u8]>);

impl AsRef<[u8]> for TotpSecret {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TotpSecret {
    /// Create a new TOTP secret from a byte array
    pub fn new(secret: &[u8]) -> Self {
        Self(secret.into())
    }

    /// Create a new TOTP secret that complies with RFC 6238
    pub fn new_rfc6238() -> Self {
        let mut secret = [0u8; RFC6238_TOTP_KEY_LENGTH];
        rand::rng().fill(&mut secret);
        Self(secret.into())
    }

    /// Create a new RFC 6238 sized TOTP secret from a custom random source
    pub fn from_random_source<R: RandomSource + ?Sized>(source: &mut R) -> Result<Self> {
        let mut secret = [0u8; RFC6238_TOTP_KEY_LENGTH];
        source.try_fill(&mut secret)?;
        Ok(Self(secret.into()))
    }

    /// Create a new TOTP secret from a base32 encoded string
    pub fn try_from_base32(secret: impl AsRef<str>) -> Result<Self> {
        let secret = base32::decode(secret.as_ref())?.into_boxed_slice();
        Ok(Self(secret))
    }

    /// The secret as padded base32 text
    pub fn to_base32(&self) -> String {
        base32::encode(&self.0)
    }

    /// Generate a TOTP code at the given UNIX time in seconds
    pub fn generate_at(&self, config: &TotpConfig, timestamp: u64) -> Result<u32> {
        compute_code(&self.0, timestamp, config.period, config.digits)
    }

    /// Generate a TOTP code at the given timestamp
    pub fn generate(&self, config: &TotpConfig, timestamp: SystemTime) -> Result<u32> {
        self.generate_at(config, unix_seconds(timestamp)?)
    }

    /// Verify a TOTP code at the given UNIX time in seconds
    ///
    /// Windows from `timestamp/period - config.back_retry` to `timestamp/period` are accepted.
    pub fn verify_at(&self, code: u32, config: &TotpConfig, timestamp: u64) -> Result<bool> {
        config.validate()?;
        if code >= hotp::modulus(config.digits)? {
            return Ok(false);
        }

        let current = counter(timestamp, config.period)?;
        for back in 0..=config.back_retry as u64 {
            let Some(window) = current.checked_sub(back) else {
                break;
            };
            trace!(back, "checking totp window");
            if hotp::code_at_counter(&RingSha1, &self.0, window, config.digits)? == code {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Verify a TOTP code at the given timestamp
    ///
    /// - `code`: the code to be verified
    /// - `config`: period, digits and how many earlier windows to accept
    /// - `timestamp`: the timestamp of the TOTP code
    pub fn verify(&self, code: u32, config: &TotpConfig, timestamp: SystemTime) -> Result<bool> {
        self.verify_at(code, config, unix_seconds(timestamp)?)
    }

    /// Generate a URI for the TOTP secret
    pub fn to_uri(&self, label: impl AsRef<str>, issuer: impl AsRef<str>) -> TotpUri {
        TotpUri::new(label, issuer, self.to_base32())
    }
}
