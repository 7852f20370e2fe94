//! # Bit Codec
//!
//! Converts text to a flat MSB-first bit sequence and back. Decoding is lenient:
//! a trailing partial byte is discarded and invalid UTF-8 is dropped, so a wrong
//! key produces garbage text instead of an error.

/// Ordered sequence of single-bit values, each stored as `0` or `1`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: Vec::with_capacity(capacity),
        }
    }

    /// Expand bytes into bits, most significant bit first.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut seq = Self::with_capacity(bytes.len() * 8);
        for &byte in bytes {
            seq.push_byte(byte);
        }
        seq
    }

    pub fn push(&mut self, bit: u8) {
        self.bits.push(bit & 1);
    }

    pub fn push_byte(&mut self, byte: u8) {
        for shift in (0..8).rev() {
            self.bits.push((byte >> shift) & 1);
        }
    }

    pub fn extend(&mut self, other: &BitSequence) {
        self.bits.extend_from_slice(&other.bits);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u8> {
        self.bits.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// Bits from `start` onward.
    pub fn tail(&self, start: usize) -> BitSequence {
        Self {
            bits: self.bits.get(start..).unwrap_or_default().to_vec(),
        }
    }

    /// Pack into bytes. A trailing group shorter than 8 bits is discarded.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.bits
            .chunks_exact(8)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit))
            .collect()
    }
}

impl From<Vec<u8>> for BitSequence {
    fn from(bits: Vec<u8>) -> Self {
        Self {
            bits: bits.into_iter().map(|b| b & 1).collect(),
        }
    }
}

/// UTF-8 encode `text` into bits.
pub fn encode(text: &str) -> BitSequence {
    BitSequence::from_bytes(text.as_bytes())
}

/// Decode bits into text, dropping invalid UTF-8 sequences.
pub fn decode(bits: &BitSequence) -> String {
    if bits.is_empty() {
        return String::new();
    }
    lossy_utf8(&bits.to_bytes())
}

fn lossy_utf8(mut bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                text.push_str(valid);
                return text;
            }
            Err(err) => {
                let (valid, rest) = bytes.split_at(err.valid_up_to());
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                // incomplete sequence at the end: drop it
                let skip = err.error_len().unwrap_or(rest.len());
                bytes = &rest[skip..];
            }
        }
    }
}
