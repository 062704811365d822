//! Short-code codec: reversible base-N encoding of link identifiers.
//!
//! A link's public short code is its database identifier, shifted by a fixed
//! offset and written as a positional numeral over a fixed alphabet. Every
//! valid code decodes back to exactly one identifier.
//!
//! The deployed alphabet and offset are part of the public URL contract:
//! changing either one breaks every short URL issued so far.
//!
//! # Examples
//!
//! ```
//! use shorty::domain::codec::{self, ShortCodec};
//!
//! assert_eq!(codec::encode(0), "5pKs");
//! assert_eq!(codec::decode("5pKs").unwrap(), 0);
//!
//! let codec = ShortCodec::default();
//! let code = codec.encode(999_999_999);
//! assert_eq!(codec.decode(&code).unwrap(), 999_999_999);
//! ```

use std::sync::LazyLock;

use thiserror::Error;

/// Deployed alphabet. `0` is deliberately absent.
pub const ALPHABET: &str = "123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Deployed bias added to identifiers before encoding.
pub const OFFSET: u64 = 1_000_000;

/// Largest offset for which every non-negative `i64` still fits in a `u64`.
pub const MAX_OFFSET: u64 = u64::MAX - i64::MAX as u64;

/// Marker for "not in the alphabet" in the lookup table.
const NO_DIGIT: u8 = u8::MAX;

static DEFAULT_CODEC: LazyLock<ShortCodec> = LazyLock::new(ShortCodec::default);

/// Errors produced while building a codec or decoding a short code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The code contains a character outside the alphabet, or is empty
    /// (`character` is `None` in that case).
    #[error("{}", describe_invalid(.character, .position, .code))]
    InvalidCharacter {
        character: Option<char>,
        position: usize,
        code: String,
    },

    /// The code is well-formed but does not map to a representable identifier.
    #[error("short code '{code}' is out of range")]
    OutOfRange { code: String },

    /// The code starts with the alphabet's zero digit, so it is a
    /// non-canonical spelling of a shorter code.
    #[error("short code '{code}' has a leading zero digit")]
    LeadingZero { code: String },

    /// The alphabet handed to [`ShortCodec::new`] cannot form a numeral system.
    #[error("invalid alphabet: {0}")]
    InvalidAlphabet(String),

    /// The offset handed to [`ShortCodec::new`] would overflow for large identifiers.
    #[error("offset {offset} exceeds the maximum of {max}")]
    InvalidOffset { offset: u64, max: u64 },
}

fn describe_invalid(character: &Option<char>, position: &usize, code: &str) -> String {
    match character {
        Some(c) => format!("invalid character '{c}' at position {position} in short code '{code}'"),
        None => "short code must not be empty".to_string(),
    }
}

/// Immutable base-N codec over a fixed alphabet and offset.
///
/// Cheap to share: all state is built once in [`ShortCodec::new`].
#[derive(Debug, Clone)]
pub struct ShortCodec {
    alphabet: Box<[u8]>,
    digits: [u8; 128],
    offset: u64,
}

impl Default for ShortCodec {
    fn default() -> Self {
        Self::new(ALPHABET, OFFSET).expect("deployed alphabet is valid")
    }
}

impl ShortCodec {
    /// Builds a codec from an alphabet and an offset.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidAlphabet`] if the alphabet has fewer than
    /// two characters, contains anything other than printable ASCII, or
    /// repeats a character.
    /// Returns [`CodecError::InvalidOffset`] if `offset` exceeds [`MAX_OFFSET`].
    pub fn new(alphabet: &str, offset: u64) -> Result<Self, CodecError> {
        if offset > MAX_OFFSET {
            return Err(CodecError::InvalidOffset {
                offset,
                max: MAX_OFFSET,
            });
        }

        let bytes = alphabet.as_bytes();

        if bytes.len() < 2 {
            return Err(CodecError::InvalidAlphabet(format!(
                "needs at least 2 characters, got {}",
                bytes.len()
            )));
        }

        let mut digits = [NO_DIGIT; 128];

        for (index, &byte) in bytes.iter().enumerate() {
            if !byte.is_ascii_graphic() {
                return Err(CodecError::InvalidAlphabet(format!(
                    "character at position {index} is not printable ASCII"
                )));
            }

            let slot = &mut digits[byte as usize];
            if *slot != NO_DIGIT {
                return Err(CodecError::InvalidAlphabet(format!(
                    "duplicate character '{}'",
                    byte as char
                )));
            }
            // bytes.len() <= 94 here, so the index fits.
            *slot = index as u8;
        }

        Ok(Self {
            alphabet: bytes.into(),
            digits,
            offset,
        })
    }

    /// Numeral base (alphabet length).
    pub fn base(&self) -> u64 {
        self.alphabet.len() as u64
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Returns true if `c` is one of the alphabet's digits.
    pub fn contains(&self, c: char) -> bool {
        c.is_ascii() && self.digits[c as usize] != NO_DIGIT
    }

    /// Encodes a non-negative identifier into its short code.
    ///
    /// # Panics
    ///
    /// Panics if `id` is negative. Identifiers come from the database
    /// sequence, so a negative value is a bug in the caller.
    pub fn encode(&self, id: i64) -> String {
        assert!(id >= 0, "cannot encode negative identifier {id}");

        // offset <= MAX_OFFSET, so this cannot overflow.
        let mut n = id as u64 + self.offset;
        let base = self.base();
        let mut buf = Vec::with_capacity(16);

        loop {
            buf.push(self.alphabet[(n % base) as usize]);
            n /= base;
            if n == 0 {
                break;
            }
        }

        buf.reverse();
        buf.into_iter().map(char::from).collect()
    }

    /// Decodes a short code back into its identifier.
    ///
    /// # Errors
    ///
    /// - [`CodecError::InvalidCharacter`] if `code` is empty or contains a
    ///   character outside the alphabet
    /// - [`CodecError::LeadingZero`] if a multi-character code starts with
    ///   the alphabet's first character, which [`ShortCodec::encode`] never emits
    /// - [`CodecError::OutOfRange`] if the value overflows, lies below the
    ///   offset, or exceeds `i64::MAX`
    pub fn decode(&self, code: &str) -> Result<i64, CodecError> {
        if code.is_empty() {
            return Err(CodecError::InvalidCharacter {
                character: None,
                position: 0,
                code: String::new(),
            });
        }

        let base = self.base();
        let mut n: u64 = 0;
        let mut overflowed = false;

        for (position, c) in code.chars().enumerate() {
            let digit = self.digit(c).ok_or_else(|| CodecError::InvalidCharacter {
                character: Some(c),
                position,
                code: code.to_string(),
            })?;

            // Keep scanning after overflow so an invalid character still wins.
            if !overflowed {
                match n.checked_mul(base).and_then(|v| v.checked_add(digit)) {
                    Some(v) => n = v,
                    None => overflowed = true,
                }
            }
        }

        if code.len() > 1 && code.as_bytes()[0] == self.alphabet[0] {
            return Err(CodecError::LeadingZero {
                code: code.to_string(),
            });
        }

        let out_of_range = || CodecError::OutOfRange {
            code: code.to_string(),
        };

        if overflowed {
            return Err(out_of_range());
        }

        let id = n.checked_sub(self.offset).ok_or_else(out_of_range)?;
        i64::try_from(id).map_err(|_| out_of_range())
    }

    fn digit(&self, c: char) -> Option<u64> {
        if !c.is_ascii() {
            return None;
        }
        match self.digits[c as usize] {
            NO_DIGIT => None,
            d => Some(u64::from(d)),
        }
    }
}

/// Encodes `id` with the deployed alphabet and offset.
///
/// # Panics
///
/// Panics if `id` is negative.
pub fn encode(id: i64) -> String {
    DEFAULT_CODEC.encode(id)
}

/// Decodes `code` with the deployed alphabet and offset.
pub fn decode(code: &str) -> Result<i64, CodecError> {
    DEFAULT_CODEC.decode(code)
}
