use crate::ParsedAddress;
use log::{debug, warn};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Expected 4 dot-separated octets, found {0} segments")]
    SegmentCount(usize),

    #[error("Octet {position} is not an integer: {token:?}")]
    Literal { position: usize, token: String },

    #[error("Octet {position} looks like a range but is not wrapped in [ ]: {token:?}")]
    MissingBracket { position: usize, token: String },

    #[error("Octet {position} range must be [lo-hi]: {token:?}")]
    RangeBounds { position: usize, token: String },

    #[error("Octet {position} only accepts an exact value, got {token:?}")]
    RestrictedOctet { position: usize, token: String },
}

/// One position of a [`MatchPattern`].
///
/// Values are kept as written, so `300` or `[0-300]` compile fine: an
/// exact value outside 0-255 matches nothing, and a range is only ever
/// compared against real octets.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum PatternOctet {
    Exact(i32),
    Wildcard,
    /// Inclusive on both ends. `lo > hi` is kept as is and matches nothing.
    Range { lo: i32, hi: i32 },
}

impl PatternOctet {
    pub fn matches(self, octet: u8) -> bool {
        let octet = i32::from(octet);
        match self {
            Self::Exact(v) => v == octet,
            Self::Wildcard => true,
            Self::Range { lo, hi } => lo <= octet && octet <= hi,
        }
    }

    /// Count the number of octet values this position accepts.
    pub fn count(self) -> usize {
        let (lo, hi) = match self {
            Self::Exact(v) => (v, v),
            Self::Wildcard => (0, 255),
            Self::Range { lo, hi } => (lo.max(0), hi.min(255)),
        };
        if lo > hi || hi < 0 || lo > 255 {
            return 0;
        }
        usize::try_from(hi - lo + 1).unwrap_or(0)
    }

    /// Positions 0 and 1 only take a literal, 2 and 3 also take `*` and `[lo-hi]`.
    fn parse(token: &str, position: usize) -> Result<Self, PatternError> {
        if position < 2 {
            return parse_literal_only(token, position).map(Self::Exact);
        }

        if token == "*" {
            return Ok(Self::Wildcard);
        }
        if !(token.contains('[') || token.contains(']') || token.contains('-')) {
            return parse_literal(token, position).map(Self::Exact);
        }

        let Some(inner) = token
            .strip_prefix('[')
            .and_then(|t| t.strip_suffix(']'))
        else {
            return Err(PatternError::MissingBracket {
                position,
                token: token.to_owned(),
            });
        };
        let bounds = inner.split('-').collect::<Vec<&str>>();
        let [lo, hi] = bounds[..] else {
            return Err(PatternError::RangeBounds {
                position,
                token: token.to_owned(),
            });
        };
        let lo = parse_literal(lo, position)?;
        let hi = parse_literal(hi, position)?;
        if lo > hi {
            warn!("Range [{lo}-{hi}] at octet {position} is inverted and will never match");
        }
        Ok(Self::Range { lo, hi })
    }
}

fn parse_literal(token: &str, position: usize) -> Result<i32, PatternError> {
    let value = token
        .parse::<i32>()
        .map_err(|_| PatternError::Literal {
            position,
            token: token.to_owned(),
        })?;
    if !(0..=255).contains(&value) {
        warn!("Value {value} at octet {position} is outside 0-255");
    }
    Ok(value)
}

fn parse_literal_only(token: &str, position: usize) -> Result<i32, PatternError> {
    if token == "*" || token.contains('[') || token.contains(']') {
        return Err(PatternError::RestrictedOctet {
            position,
            token: token.to_owned(),
        });
    }
    parse_literal(token, position)
}

impl fmt::Display for PatternOctet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(v) => write!(f, "{v}"),
            Self::Wildcard => f.write_str("*"),
            Self::Range { lo, hi } => write!(f, "[{lo}-{hi}]"),
        }
    }
}

/// An address-shaped pattern such as `172.16.*.[100-200]`.
///
/// The first two octets are always exact, so they are stored as plain values.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub struct MatchPattern {
    first: i32,
    second: i32,
    third: PatternOctet,
    fourth: PatternOctet,
}

impl MatchPattern {
    pub const fn new(first: i32, second: i32, third: PatternOctet, fourth: PatternOctet) -> Self {
        Self {
            first,
            second,
            third,
            fourth,
        }
    }

    pub const fn octets(&self) -> [PatternOctet; 4] {
        [
            PatternOctet::Exact(self.first),
            PatternOctet::Exact(self.second),
            self.third,
            self.fourth,
        ]
    }

    /// All four positions have to match.
    pub fn matches(&self, address: &ParsedAddress) -> bool {
        self.octets()
            .into_iter()
            .zip(address.octets())
            .all(|(pattern, octet)| pattern.matches(octet))
    }

    pub fn matches_addr(&self, addr: Ipv4Addr) -> bool {
        self.matches(&ParsedAddress::from(addr))
    }

    /// Count the number of addresses this pattern matches.
    pub fn count(&self) -> usize {
        self.octets().into_iter().map(PatternOctet::count).product()
    }

    /// Whether no address can ever match, e.g. a range is inverted or an
    /// exact value is above 255.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl FromStr for MatchPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments = s.split('.').collect::<Vec<&str>>();
        let [first, second, third, fourth] = segments[..] else {
            return Err(PatternError::SegmentCount(segments.len()));
        };

        let first = parse_literal_only(first, 0)?;
        let second = parse_literal_only(second, 1)?;
        let third = PatternOctet::parse(third, 2)?;
        let fourth = PatternOctet::parse(fourth, 3)?;
        Ok(Self::new(first, second, third, fourth))
    }
}

impl fmt::Display for MatchPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.first, self.second, self.third, self.fourth
        )
    }
}

/// Compile a dotted pattern. See [`PatternOctet`] for what each position accepts.
pub fn compile_pattern(text: &str) -> Result<MatchPattern, PatternError> {
    let pattern = text.parse::<MatchPattern>()?;
    debug!("Compiled pattern {pattern} ({} addresses)", pattern.count());
    Ok(pattern)
}

pub fn matches(pattern: &MatchPattern, address: &ParsedAddress) -> bool {
    pattern.matches(address)
}
