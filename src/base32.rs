use crate::error::{OtpError, Result};
use tracing::debug;

/// The RFC 4648 base32 alphabet, indexed by 5-bit value
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Padding sentinel appended up to the next multiple of 8 symbols
pub const PADDING: u8 = b'=';

/// Classification of a single input byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// A member of [ALPHABET] carrying a 5-bit value
    Value(u8),
    /// The [PADDING] sentinel
    Padding,
    /// Anything else
    Invalid,
}

static SYMBOLS: [Symbol; 256] = symbol_table();

const fn symbol_table() -> [Symbol; 256] {
    let mut table = [Symbol::Invalid; 256];
    let mut value = 0;
    while value < ALPHABET.len() {
        table[ALPHABET[value] as usize] = Symbol::Value(value as u8);
        value += 1;
    }
    table[PADDING as usize] = Symbol::Padding;
    table
}

impl Symbol {
    /// Look up a byte in the decode table
    pub fn classify(byte: u8) -> Self {
        SYMBOLS[byte as usize]
    }
}

/// Number of symbols (padding included) produced for `len` input bytes
pub const fn encoded_len(len: usize) -> usize {
    len.div_ceil(5) * 8
}

/// Pending bits between octets and quintets. Holds at most 32 bits.
#[derive(Debug, Default)]
struct BitAccumulator {
    bits: u32,
    pending: u32,
}

impl BitAccumulator {
    fn push(&mut self, value: u32, width: u32) {
        debug_assert!(self.pending + width <= u32::BITS);
        self.bits = (self.bits << width) | value;
        self.pending += width;
    }

    /// Remove the `width` most significant pending bits
    fn take(&mut self, width: u32) -> u32 {
        debug_assert!(width <= self.pending);
        self.pending -= width;
        let value = (self.bits >> self.pending) & mask(width);
        self.bits &= mask(self.pending);
        value
    }
}

fn mask(width: u32) -> u32 {
    ((1u64 << width) - 1) as u32
}

/// Writes symbols and padding for `input` into `output`, which must hold
/// [encoded_len] bytes. Returns the number of bytes written.
fn write_symbols(input: &[u8], output: &mut [u8]) -> usize {
    let mut acc = BitAccumulator::default();
    let mut written = 0;
    let mut emit = |acc: &mut BitAccumulator, written: &mut usize| {
        output[*written] = ALPHABET[acc.take(5) as usize];
        *written += 1;
    };

    for &byte in input {
        acc.push(u32::from(byte), 8);
        // 25 bits is five whole symbols
        if acc.pending >= 25 {
            for _ in 0..5 {
                emit(&mut acc, &mut written);
            }
        }
    }

    if acc.pending > 0 {
        let fill = acc.pending.div_ceil(5) * 5 - acc.pending;
        acc.push(0, fill);
        while acc.pending > 0 {
            emit(&mut acc, &mut written);
        }
    }

    let end = encoded_len(input.len());
    output[written..end].fill(PADDING);
    end
}

/// Encode `input` into `output`, whose length is the declared capacity.
///
/// Non-empty input needs room for every symbol, the padding and a trailing NUL.
/// Empty input writes only the NUL, and only when `output` is non-empty.
/// Returns the symbol count, padding included, terminator excluded.
pub fn encode_into(input: &[u8], output: &mut [u8]) -> Result<usize> {
    if input.is_empty() {
        if let Some(first) = output.first_mut() {
            *first = 0;
        }
        return Ok(0);
    }

    let symbols = encoded_len(input.len());
    let required = symbols + 1;
    if required > output.len() {
        debug!(required, capacity = output.len(), "base32 encode buffer too small");
        return Err(OtpError::BufferTooSmall {
            required,
            capacity: output.len(),
        });
    }

    let written = write_symbols(input, output);
    output[written] = 0;
    Ok(written)
}

/// Encode `input` into a string, failing when the encoded form plus its
/// terminator would exceed `capacity`
pub fn encode_with_capacity(input: &[u8], capacity: usize) -> Result<String> {
    let mut buffer = vec![0u8; capacity.min(encoded_len(input.len()) + 1)];
    let written = encode_into(input, &mut buffer)?;
    Ok(buffer[..written].iter().copied().map(char::from).collect())
}

/// Encode `input` into a padded base32 string
pub fn encode(input: &[u8]) -> String {
    let mut buffer = vec![0u8; encoded_len(input.len())];
    write_symbols(input, &mut buffer);
    buffer.into_iter().map(char::from).collect()
}

/// Count alphabet symbols, rejecting the first invalid byte
fn count_symbols(input: &[u8]) -> Result<usize> {
    let mut symbols = 0;
    for (position, &byte) in input.iter().enumerate() {
        match Symbol::classify(byte) {
            Symbol::Value(_) => symbols += 1,
            Symbol::Padding => {}
            Symbol::Invalid => {
                debug!(position, "invalid base32 character");
                return Err(OtpError::InvalidCharacter { position, byte });
            }
        }
    }
    Ok(symbols)
}

/// Unpack validated input. Trailing bits short of an octet are dropped.
fn unpack(input: &[u8], output: &mut [u8]) -> usize {
    let mut acc = BitAccumulator::default();
    let mut written = 0;
    for &byte in input {
        if let Symbol::Value(value) = Symbol::classify(byte) {
            acc.push(u32::from(value), 5);
            if acc.pending >= 8 {
                output[written] = acc.take(8) as u8;
                written += 1;
            }
        }
    }
    written
}

/// Decode base32 `input` into `output`, whose length is the declared capacity.
///
/// Padding is skipped wherever it appears. `output` is left untouched unless
/// the whole input is valid and fits. Returns the number of bytes written.
pub fn decode_into(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let required = count_symbols(input)? * 5 / 8;
    if required > output.len() {
        debug!(required, capacity = output.len(), "base32 decode buffer too small");
        return Err(OtpError::BufferTooSmall {
            required,
            capacity: output.len(),
        });
    }
    Ok(unpack(input, output))
}

/// Decode base32 `input`, failing when more than `capacity` bytes would result
pub fn decode_with_capacity(input: &str, capacity: usize) -> Result<Vec<u8>> {
    let input = input.as_bytes();
    let mut buffer = vec![0u8; capacity.min(input.len() * 5 / 8)];
    let written = decode_into(input, &mut buffer)?;
    buffer.truncate(written);
    Ok(buffer)
}

/// Decode base32 `input` into bytes
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let input = input.as_bytes();
    let mut buffer = vec![0u8; count_symbols(input)? * 5 / 8];
    unpack(input, &mut buffer);
    Ok(buffer)
}
