//! Minimal INI file store
//!
//! Sections are opened by `[Name]` lines. Every other line is kept as a raw
//! line of the current section, with trailing whitespace removed, so code
//! sections survive a load and save unchanged.
//!
//! ```
//! use geckocfg::IniFile;
//! use geckocfg::Store;
//!
//! let mut ini = IniFile::from_text("[Core]\nCPUThread = True\n[Gecko]\n$Code\n");
//! assert_eq!(ini.lines("Gecko"), vec![String::from("$Code")]);
//! assert!(ini.lines("Gecko_Enabled").is_empty());
//!
//! ini.set_lines("Gecko_Enabled", vec![String::from("$Code")]);
//! assert_eq!(
//!     ini.to_string(),
//!     "[Core]\nCPUThread = True\n[Gecko]\n$Code\n[Gecko_Enabled]\n$Code\n"
//! );
//! ```

use crate::store::Store;

use std::convert::Infallible;
use std::fmt;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use snafu::ResultExt;
use snafu::Snafu;
use tracing::debug;

/// Error reading or writing an INI file
#[derive(Debug, Snafu)]
pub enum IniError {
    #[snafu(display("Could not read {}: {}", path.display(), source))]
    Read { path: PathBuf, source: io::Error },

    #[snafu(display("Could not write {}: {}", path.display(), source))]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    lines: Vec<String>,
}

/// An INI file as ordered sections of raw lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniFile {
    /// Lines before the first section header
    preamble: Vec<String>,
    sections: Vec<Section>,
}

impl IniFile {
    /// Parse INI text. Parsing never fails; unrecognised lines are kept.
    pub fn from_text(text: &str) -> Self {
        let mut ini = IniFile::default();
        let mut current: Option<usize> = None;

        for line in text.lines() {
            let line = line.trim_end();

            if let Some(name) = section_header(line) {
                current = Some(ini.section_index(name));
                continue;
            }

            match current {
                Some(index) => ini.sections[index].lines.push(line.to_string()),
                None => ini.preamble.push(line.to_string()),
            }
        }

        ini
    }

    /// Load an INI file. A file that doesn't exist loads as empty.
    pub fn load(path: &Path) -> Result<Self, IniError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(IniFile::from_text(&text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("{} does not exist, using empty configuration", path.display());
                Ok(IniFile::default())
            }
            Err(err) => Err(err).context(Read { path }),
        }
    }

    /// Write the INI file, replacing its contents
    pub fn save(&self, path: &Path) -> Result<(), IniError> {
        std::fs::write(path, self.to_string()).context(Write { path })
    }

    /// Names of all sections, in file order
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    /// Index of a section, created at the end if missing
    fn section_index(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|section| section.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    lines: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

/// Name of the section opened by a `[Name]` line
fn section_header(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix('[')?;
    let close = rest.find(']')?;
    Some(&rest[..close])
}

impl FromStr for IniFile {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(IniFile::from_text(s))
    }
}

impl fmt::Display for IniFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.preamble {
            writeln!(f, "{}", line)?;
        }
        for section in &self.sections {
            writeln!(f, "[{}]", section.name)?;
            for line in &section.lines {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

impl Store for IniFile {
    fn lines(&self, section: &str) -> Vec<String> {
        self.sections
            .iter()
            .find(|s| s.name == section)
            .map(|s| s.lines.clone())
            .unwrap_or_default()
    }

    fn set_lines(&mut self, section: &str, lines: Vec<String>) {
        let index = self.section_index(section);
        self.sections[index].lines = lines;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections() {
        let ini = IniFile::from_text(
            "; leading comment\r\n\
             [Gecko]\r\n\
             $Code [Me]   \r\n\
             \r\n\
             04000000 60000000\r\n\
             [Gecko_Enabled]\n\
             $Code\n",
        );

        assert_eq!(
            ini.section_names().collect::<Vec<_>>(),
            vec!["Gecko", "Gecko_Enabled"]
        );
        assert_eq!(
            ini.lines("Gecko"),
            vec![
                String::from("$Code [Me]"),
                String::new(),
                String::from("04000000 60000000"),
            ]
        );
        assert_eq!(ini.lines("Gecko_Enabled"), vec![String::from("$Code")]);
        assert!(ini.lines("Gecko_Disabled").is_empty());
    }

    #[test]
    fn test_repeated_section_merges() {
        let ini = IniFile::from_text("[Gecko]\n$A\n[Other]\nx\n[Gecko]\n$B\n");
        assert_eq!(ini.lines("Gecko"), vec![String::from("$A"), String::from("$B")]);
    }

    #[test]
    fn test_display_round_trip() {
        let text = "; header\n[Core]\nkey = value\n[Gecko]\n$Code\n*note\n";
        let ini = text.parse::<IniFile>().unwrap();
        assert_eq!(ini.to_string(), text);
    }

    #[test]
    fn test_set_lines_in_place() {
        let mut ini = IniFile::from_text("[Gecko]\n$Old\n[Core]\nkey = value\n");
        ini.set_lines("Gecko", vec![String::from("$New")]);
        ini.set_lines("Gecko_Disabled", Vec::new());

        assert_eq!(
            ini.to_string(),
            "[Gecko]\n$New\n[Core]\nkey = value\n[Gecko_Disabled]\n"
        );
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ini = IniFile::load(&dir.path().join("GALE01.ini")).unwrap();
        assert_eq!(ini, IniFile::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("GALE01.ini");

        let mut ini = IniFile::default();
        ini.set_lines("Gecko", vec![String::from("$Code"), String::from("04000000 60000000")]);
        ini.save(&path).unwrap();

        assert_eq!(IniFile::load(&path).unwrap(), ini);
    }

    #[test]
    fn test_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("GALE01.ini");

        let err = IniFile::default().save(&path).unwrap_err();
        assert!(matches!(err, IniError::Write { .. }));
        assert!(err.to_string().contains("GALE01.ini"));
    }
}
