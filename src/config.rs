use crate::error::{OtpError, Result};
use crate::hotp;
use crate::totp::{RFC6238_TOTP_DIGITS, RFC6238_TOTP_PERIOD};
use serde::{Deserialize, Serialize};

/// Most earlier windows verification may be configured to accept
pub const MAX_BACK_RETRY: usize = 10;

/// Settings shared by code generation and verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TotpConfig {
    /// Time step in seconds
    pub period: u64,
    /// Code width, `0..=8`
    pub digits: u32,
    /// Earlier windows accepted by verification, besides the current one
    pub back_retry: usize,
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            period: RFC6238_TOTP_PERIOD,
            digits: RFC6238_TOTP_DIGITS,
            back_retry: 1,
        }
    }
}

impl TotpConfig {
    /// Creates a new [TotpConfig] with the given period and digits, accepting no earlier windows
    pub fn new(period: u64, digits: u32) -> Self {
        Self {
            period,
            digits,
            back_retry: 0,
        }
    }

    /// Check the period, digit width and verification window
    pub fn validate(&self) -> Result<()> {
        if self.period == 0 {
            return Err(OtpError::InvalidTimeStep);
        }
        if self.back_retry > MAX_BACK_RETRY {
            return Err(OtpError::InvalidBackRetry(self.back_retry));
        }
        hotp::modulus(self.digits).map(|_| ())
    }
}
