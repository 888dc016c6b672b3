//! Gecko code records and the hex pair decoder for their payload lines.
//!
//! A payload line is normally an address and a value written as hexadecimal
//! numbers separated by a single space. Lines that don't fit that shape are
//! still kept, so they can be written back exactly as they were read.
//!
//! ```
//! use geckocfg::gecko::CodeLine;
//! use geckocfg::gecko::HexPair;
//!
//! assert_eq!(
//!     "04000000 60000000".parse::<HexPair>().unwrap(),
//!     HexPair {
//!         address: 0x04000000,
//!         data: 0x60000000,
//!     }
//! );
//!
//! let raw = CodeLine::from_line("notarealcode");
//! assert_eq!(raw.original_line, "notarealcode");
//! assert!(!raw.is_decoded());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use snafu::ensure;
use snafu::ResultExt;
use snafu::Snafu;
use tracing::trace;

/// Error decoding a Gecko payload line
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum DecodeError {
    /// The line doesn't contain an address and a value
    #[snafu(display("Gecko code line has {} token(s), expected at least 2", count))]
    TooFewTokens {
        /// Number of tokens found
        count: usize,
    },

    /// A token contains something other than hex digits
    #[snafu(display("Gecko code token {:?} is not hexadecimal", token))]
    NotHex {
        /// The offending token
        token: String,
    },

    /// Error parsing a hex token
    #[snafu(display("Gecko code hex parse: {}", source))]
    HexToken {
        /// Error parsing the integer
        source: std::num::ParseIntError,
    },
}

/// Address and value of a decoded payload line
///
/// ```text
/// XXXXXXXX YYYYYYYY
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HexPair {
    /// Address part `XXXXXXXX`
    pub address: u32,
    /// Value part `YYYYYYYY`
    pub data: u32,
}

/// Parse one token as an unsigned hex number
///
/// Only hex digits are accepted. `u32::from_str_radix` alone would also take
/// a leading `+`.
fn parse_hex(token: &str) -> Result<u32, DecodeError> {
    ensure!(token.chars().all(|c| c.is_ascii_hexdigit()), NotHex { token });
    u32::from_str_radix(token, 0x10).context(HexToken)
}

impl FromStr for HexPair {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Split on every single space, so doubled spaces leave empty tokens
        // behind and fail below
        let tokens = s.split(' ').collect::<Vec<&str>>();
        ensure!(
            tokens.len() >= 2,
            TooFewTokens {
                count: tokens.len(),
            }
        );

        // Anything after the value would be an option, which isn't supported
        Ok(HexPair {
            address: parse_hex(tokens[0])?,
            data: parse_hex(tokens[1])?,
        })
    }
}

impl fmt::Display for HexPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X} {:08X}", self.address, self.data)
    }
}

/// One payload line of a [`GeckoCode`]
///
/// The line's text is always kept in `original_line`, and that text is what
/// gets saved. `pair` is only filled in when the line decodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodeLine {
    /// Line exactly as it appeared in the configuration
    pub original_line: String,

    /// Decoded address and value, `None` for raw lines
    pub pair: Option<HexPair>,
}

impl CodeLine {
    /// Build a line entry, falling back to a raw entry if decoding fails
    pub fn from_line(line: &str) -> Self {
        let pair = match decode_line(line) {
            Ok(pair) => Some(pair),
            Err(err) => {
                trace!("Keeping raw Gecko line {:?}: {}", line, err);
                None
            }
        };

        CodeLine {
            original_line: line.to_string(),
            pair,
        }
    }

    /// Whether the line decoded into an address and value
    pub fn is_decoded(&self) -> bool {
        self.pair.is_some()
    }

    /// Decoded address, `None` for raw lines
    pub fn address(&self) -> Option<u32> {
        self.pair.map(|pair| pair.address)
    }

    /// Decoded value, `None` for raw lines
    pub fn data(&self) -> Option<u32> {
        self.pair.map(|pair| pair.data)
    }
}

/// Decode a `<hex-address> <hex-value>` payload line
pub fn decode_line(line: &str) -> Result<HexPair, DecodeError> {
    line.parse::<HexPair>()
}

/// A named Gecko cheat code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeckoCode {
    /// Display name, without surrounding whitespace
    pub name: String,

    /// Who wrote the code, empty if unknown
    pub creator: String,

    /// Whether the code is currently on
    pub enabled: bool,

    /// Enabled state from the global configuration, used to work out which
    /// overrides need saving
    pub default_enabled: bool,

    /// Whether the code belongs to the user configuration. Only these codes
    /// are written back as content.
    pub user_defined: bool,

    /// Notes, without their leading `*`
    pub notes: Vec<String>,

    /// Payload lines
    pub codes: Vec<CodeLine>,
}

impl GeckoCode {
    /// Title line: `$name`, followed by ` [creator]` when there is a creator
    ///
    /// ```
    /// use geckocfg::gecko::GeckoCode;
    ///
    /// let mut code = GeckoCode {
    ///     name: String::from("Infinite Lives"),
    ///     ..GeckoCode::default()
    /// };
    /// assert_eq!(code.title(), "$Infinite Lives");
    ///
    /// code.creator = String::from("Link");
    /// assert_eq!(code.title(), "$Infinite Lives [Link]");
    /// ```
    ///
    /// A name starting with `0` or `1` would be read back as a state digit,
    /// so it gets an explicit `0` in front. The saved state lives in the
    /// override lists, not the title.
    ///
    /// ```
    /// use geckocfg::gecko::GeckoCode;
    ///
    /// let code = GeckoCode {
    ///     name: String::from("100 Coins Star"),
    ///     ..GeckoCode::default()
    /// };
    /// assert_eq!(code.title(), "$0100 Coins Star");
    /// ```
    pub fn title(&self) -> String {
        let marker = if self.name.starts_with('0') || self.name.starts_with('1') {
            "$0"
        } else {
            "$"
        };

        if self.creator.is_empty() {
            format!("{}{}", marker, self.name)
        } else {
            format!("{}{} [{}]", marker, self.name, self.creator)
        }
    }

    /// Turn the code on or off
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Flip the code between on and off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Whether the enabled state differs from the global baseline
    pub fn is_overridden(&self) -> bool {
        self.enabled != self.default_enabled
    }
}
