//! Access to line-based configuration sections

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Which configuration a code was loaded from
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// Defaults shipped with the game settings
    Global,
    /// The user's own settings
    User,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::User => write!(f, "user"),
        }
    }
}

/// A configuration holding named sections of raw lines
pub trait Store {
    /// Lines of a section, unfiltered. A missing section has no lines.
    fn lines(&self, section: &str) -> Vec<String>;

    /// Replace all lines of a section
    fn set_lines(&mut self, section: &str, lines: Vec<String>);
}

/// Name of the section listing codes enabled on top of the defaults
pub fn enabled_section(section: &str) -> String {
    format!("{}_Enabled", section)
}

/// Name of the section listing codes disabled on top of the defaults
pub fn disabled_section(section: &str) -> String {
    format!("{}_Disabled", section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_names() {
        assert_eq!(enabled_section("Gecko"), "Gecko_Enabled");
        assert_eq!(disabled_section("Gecko"), "Gecko_Disabled");
    }
}
