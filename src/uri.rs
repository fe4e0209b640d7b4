use compact_str::CompactString;
use std::fmt;

/// Longest label kept, in bytes
pub const LABEL_MAX_LEN: usize = 16;
/// Longest secret kept, in bytes. A 160-bit secret is 32 symbols.
pub const SECRET_MAX_LEN: usize = 32;
/// Longest issuer kept, in bytes
pub const ISSUER_MAX_LEN: usize = 16;
/// Longest URI kept, in bytes. This is the byte capacity of a version 5 QR code.
pub const URI_MAX_LEN: usize = 106;

/// An `otpauth://totp/` URI, ready to be handed to a QR renderer.
///
/// Fields are truncated to fixed widths on a character boundary and are not escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpUri {
    label: CompactString,
    secret: CompactString,
    issuer: CompactString,
    uri: CompactString,
}

fn truncate(value: &str, max_len: usize) -> &str {
    if value.len() <= max_len {
        return value;
    }
    let mut end = max_len;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

impl TotpUri {
    /// Assemble a URI from a label, an issuer and a base32 secret
    pub fn new(label: impl AsRef<str>, issuer: impl AsRef<str>, secret: impl AsRef<str>) -> Self {
        let label = CompactString::from(truncate(label.as_ref(), LABEL_MAX_LEN));
        let secret = CompactString::from(truncate(secret.as_ref(), SECRET_MAX_LEN));
        let issuer = CompactString::from(truncate(issuer.as_ref(), ISSUER_MAX_LEN));
        let uri = format!("otpauth://totp/{label}?secret={secret}&issuer={issuer}");
        let uri = CompactString::from(truncate(&uri, URI_MAX_LEN));
        Self {
            label,
            secret,
            issuer,
            uri,
        }
    }

    /// The label, as embedded
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The base32 secret, as embedded
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// The issuer, as embedded
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// The full URI
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl AsRef<str> for TotpUri {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for TotpUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_uri() {
        let uri = TotpUri::new("alice", "Example", "JBSWY3DPEHPK3PXP");
        assert_eq!(
            uri.as_str(),
            "otpauth://totp/alice?secret=JBSWY3DPEHPK3PXP&issuer=Example"
        );
        assert_eq!(uri.to_string(), uri.as_str());
    }

    #[test]
    fn truncates_fields() {
        let uri = TotpUri::new(
            "a-very-long-account-label",
            "an-issuer-name-that-is-too-long",
            "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567ABCDEFGH",
        );
        assert_eq!(uri.label(), "a-very-long-acco");
        assert_eq!(uri.issuer(), "an-issuer-name-t");
        assert_eq!(uri.secret(), "ABCDEFGHIJKLMNOPQRSTUVWXYZ234567");
        assert!(uri.as_str().len() <= URI_MAX_LEN);
    }

    #[test]
    fn truncates_on_char_boundary() {
        // 'é' is two bytes and straddles the 16 byte limit
        let uri = TotpUri::new("abcdefghijklmnoé", "", "");
        assert_eq!(uri.label(), "abcdefghijklmno");
    }
}
