//! The supported precious metals and their upstream symbols.

use std::fmt;
use std::str::FromStr;

use crate::error::PriceError;

/// A precious metal with a spot price on the upstream provider.
///
/// Ordering follows the canonical listing order used in `/metals` responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metal {
    Gold,
    Silver,
    Platinum,
    Palladium,
}

impl Metal {
    pub const ALL: [Metal; 4] = [Metal::Gold, Metal::Silver, Metal::Platinum, Metal::Palladium];

    /// Lowercase identifier, as accepted in request paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            Metal::Gold => "gold",
            Metal::Silver => "silver",
            Metal::Platinum => "platinum",
            Metal::Palladium => "palladium",
        }
    }

    /// Capitalized name used on the wire (`"Gold"`).
    pub fn display_name(&self) -> &'static str {
        match self {
            Metal::Gold => "Gold",
            Metal::Silver => "Silver",
            Metal::Platinum => "Platinum",
            Metal::Palladium => "Palladium",
        }
    }

    /// ISO 4217-style commodity code used by the upstream currency pair.
    pub fn symbol(&self) -> &'static str {
        match self {
            Metal::Gold => "XAU",
            Metal::Silver => "XAG",
            Metal::Platinum => "XPT",
            Metal::Palladium => "XPD",
        }
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn parse(name: &str) -> Option<Metal> {
        let name = name.trim();
        Metal::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Metal {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metal::parse(s).ok_or_else(|| PriceError::UnsupportedMetal(s.to_string()))
    }
}
