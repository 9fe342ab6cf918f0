#![warn(clippy::all, clippy::nursery, clippy::pedantic)]

pub mod list;
pub mod pattern;

pub use pattern::{compile_pattern, matches, MatchPattern, PatternError, PatternOctet};

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Why a token is not a dotted IPv4 address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressError {
    #[error("Expected 4 dot-separated octets, found {0} segments")]
    SegmentCount(usize),

    #[error("Octet is not an integer: {0:?}")]
    Integer(String),

    #[error("Octet {0} is outside 0-255")]
    Range(i32),
}

impl AddressError {
    /// Whether the token failed to decompose into four integers,
    /// as opposed to holding a number outside the octet range.
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::SegmentCount(_) | Self::Integer(_))
    }
}

/// Four octets that were each checked to be an integer in 0-255.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct ParsedAddress {
    octets: [u8; 4],
}

impl ParsedAddress {
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self {
            octets: [a, b, c, d],
        }
    }

    pub const fn octets(&self) -> [u8; 4] {
        self.octets
    }
}

impl FromStr for ParsedAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s.split('.').collect::<Vec<&str>>();
        if segments.len() != 4 {
            return Err(AddressError::SegmentCount(segments.len()));
        }

        // every segment has to be an integer before any of them is range checked
        let mut values = [0i32; 4];
        for (value, segment) in values.iter_mut().zip(&segments) {
            *value = segment
                .parse::<i32>()
                .map_err(|_| AddressError::Integer((*segment).to_owned()))?;
        }

        let mut octets = [0u8; 4];
        for (octet, value) in octets.iter_mut().zip(values) {
            *octet = u8::try_from(value).map_err(|_| AddressError::Range(value))?;
        }
        Ok(Self { octets })
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets;
        write!(f, "{a}.{b}.{c}.{d}")
    }
}

impl From<ParsedAddress> for Ipv4Addr {
    fn from(addr: ParsedAddress) -> Self {
        Self::from(addr.octets)
    }
}

impl From<Ipv4Addr> for ParsedAddress {
    fn from(addr: Ipv4Addr) -> Self {
        Self {
            octets: addr.octets(),
        }
    }
}

/// Parse a token into an address, keeping the reason it was rejected.
///
/// Unlike [`Ipv4Addr::from_str`] this accepts leading zeros and a leading
/// sign (`"010.+1.0.0"`), it only cares that each segment is an integer
/// in range.
pub fn classify(token: &str) -> Result<ParsedAddress, AddressError> {
    token.parse()
}

/// Whether `token` is four dot-separated integers, each in 0-255.
pub fn validate(token: &str) -> bool {
    classify(token).is_ok()
}
