#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![doc = include_str!("../README.md")]

mod error;

/// RFC 4648 base32 encoding and decoding
pub mod base32;

/// HMAC over a pluggable 64-byte-block, 20-byte-digest hash
pub mod hmac;

/// Counter-based code generation and dynamic truncation
pub mod hotp;

/// TOTP (Time-based One-Time Password) generation and verification
pub mod totp;

/// TOTP settings
pub mod config;

/// Entropy sources for secret generation
pub mod random;

/// `otpauth://` URI assembly
pub mod uri;

pub use config::TotpConfig;
pub use error::{OtpError, Result};
pub use random::{FnRandom, RandomSource, RandomSourceError};
pub use totp::TotpSecret;
pub use uri::TotpUri;
