use crate::{classify, validate, AddressError, ParsedAddress};
use anyhow::{bail, Context};
use log::debug;

/// Smallest address count the list header may declare.
pub const MIN_ADDRESS_COUNT: usize = 1;
/// Largest address count the list header may declare.
pub const MAX_ADDRESS_COUNT: usize = 100;

/// A count header followed by that many address tokens, one per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressList {
    tokens: Vec<String>,
}

impl AddressList {
    /// Lines after the declared count are ignored. Tokens are kept verbatim
    /// apart from the line terminator, so `" 1.2.3.4"` stays invalid.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut lines = text.lines();
        let Some(header) = lines.next() else {
            bail!("Address list is empty");
        };
        let count = header
            .trim()
            .parse::<usize>()
            .with_context(|| format!("Failed to parse address count {header:?} on line 1"))?;
        if !(MIN_ADDRESS_COUNT..=MAX_ADDRESS_COUNT).contains(&count) {
            bail!("Address count {count} is outside {MIN_ADDRESS_COUNT}-{MAX_ADDRESS_COUNT}");
        }

        let tokens = lines
            .by_ref()
            .take(count)
            .map(str::to_owned)
            .collect::<Vec<String>>();
        if tokens.len() < count {
            bail!("Expected {count} addresses, found {}", tokens.len());
        }
        let trailing = lines.count();
        if trailing > 0 {
            debug!("Ignoring {trailing} lines after the last address");
        }
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// One verdict per token, in input order.
    pub fn verdicts(&self) -> Vec<bool> {
        self.tokens.iter().map(|t| validate(t)).collect()
    }

    /// Like [`Self::verdicts`] but keeps the reason a token was rejected.
    pub fn classify(&self) -> Vec<Result<ParsedAddress, AddressError>> {
        self.tokens.iter().map(|t| classify(t)).collect()
    }
}
