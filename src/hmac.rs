/// Block width of the hash, in bytes
pub const BLOCK_LEN: usize = 64;

/// Digest width of the hash, in bytes
pub const DIGEST_LEN: usize = 20;

/// A 20-byte hash or HMAC output
pub type Digest = [u8; DIGEST_LEN];

const INNER_PAD: u8 = 0x36;
const OUTER_PAD: u8 = 0x5c;

/// A deterministic hash with a 64-byte block and a 20-byte digest
pub trait HashPrimitive {
    /// Hash `data` in one shot
    fn hash(&self, data: &[u8]) -> Digest;
}

impl<F> HashPrimitive for F
where
    F: Fn(&[u8]) -> Digest,
{
    fn hash(&self, data: &[u8]) -> Digest {
        self(data)
    }
}

/// SHA-1 provided by `ring`
#[derive(Debug, Clone, Copy, Default)]
pub struct RingSha1;

impl HashPrimitive for RingSha1 {
    fn hash(&self, data: &[u8]) -> Digest {
        let digest = ring::digest::digest(&ring::digest::SHA1_FOR_LEGACY_USE_ONLY, data);
        let mut output = [0u8; DIGEST_LEN];
        output.copy_from_slice(digest.as_ref());
        output
    }
}

/// RFC 2104 HMAC over `hash`.
///
/// Keys longer than [BLOCK_LEN] are hashed down first, whatever their length.
/// Shorter keys are zero-padded to the block width.
pub fn hmac<H: HashPrimitive + ?Sized>(hash: &H, key: &[u8], message: &[u8]) -> Digest {
    let mut block = [0u8; BLOCK_LEN];
    if key.len() > BLOCK_LEN {
        block[..DIGEST_LEN].copy_from_slice(&hash.hash(key));
    } else {
        block[..key.len()].copy_from_slice(key);
    }

    let mut inner = Vec::with_capacity(BLOCK_LEN + message.len());
    inner.extend(block.iter().map(|byte| byte ^ INNER_PAD));
    inner.extend_from_slice(message);
    let inner_digest = hash.hash(&inner);

    let mut outer = [0u8; BLOCK_LEN + DIGEST_LEN];
    for (pad, byte) in outer.iter_mut().zip(block.iter()) {
        *pad = byte ^ OUTER_PAD;
    }
    outer[BLOCK_LEN..].copy_from_slice(&inner_digest);
    hash.hash(&outer)
}

/// HMAC-SHA1 of `message` under `key`
pub fn hmac_sha1(key: &[u8], message: &[u8]) -> Digest {
    hmac(&RingSha1, key, message)
}
