//! Loading and saving Gecko codes through a [`Store`]
//!
//! Codes live in the `Gecko` section as blocks of lines, each block starting
//! with a title. Enabled state that differs from the global defaults is kept
//! in `Gecko_Enabled` and `Gecko_Disabled`.
//!
//! ```
//! use geckocfg::config;
//! use geckocfg::IniFile;
//!
//! let global = IniFile::default();
//! let user = IniFile::from_text(
//!     "[Gecko]\n\
//!      $MyCode [Author]\n\
//!      04000000 60000000\n\
//!      *A note\n",
//! );
//!
//! let codes = config::load_codes(&global, &user);
//! assert_eq!(codes.len(), 1);
//! assert_eq!(codes[0].name, "MyCode");
//! assert_eq!(codes[0].creator, "Author");
//!
//! let saved = config::serialize_codes(&codes);
//! assert_eq!(saved.content, vec!["$MyCode [Author]", "04000000 60000000", "*A note"]);
//! assert!(saved.enabled.is_empty());
//! assert!(saved.disabled.is_empty());
//! ```

use crate::gecko::CodeLine;
use crate::gecko::GeckoCode;
use crate::line::strip_comments;
use crate::line::Line;
use crate::store::disabled_section;
use crate::store::enabled_section;
use crate::store::Scope;
use crate::store::Store;

use tracing::debug;
use tracing::trace;

/// Section holding Gecko codes
pub const GECKO_SECTION: &str = "Gecko";

/// Load codes from the global configuration, then the user configuration
///
/// Global codes come first. Each code's `default_enabled` is its enabled
/// state after the global configuration has been applied.
pub fn load_codes(global: &dyn Store, user: &dyn Store) -> Vec<GeckoCode> {
    let mut codes = Vec::new();

    for &(store, scope) in &[(global, Scope::Global), (user, Scope::User)] {
        let lines = store.lines(GECKO_SECTION);
        let loaded = group_codes(lines, scope);
        debug!("Loaded {} {} Gecko code(s)", loaded.len(), scope);
        codes.extend(loaded);

        // Overrides of one configuration apply to every code seen so far, so
        // the user configuration can toggle global codes
        read_enabled_and_disabled(store, GECKO_SECTION, &mut codes);

        if scope == Scope::Global {
            for code in &mut codes {
                code.default_enabled = code.enabled;
            }
        }
    }

    codes
}

/// Group the lines of one configuration's Gecko section into codes
///
/// Blank and comment lines are dropped first. Lines before the first title,
/// and codes whose name is empty, are discarded.
pub fn group_codes(lines: Vec<String>, scope: Scope) -> Vec<GeckoCode> {
    let lines = strip_comments(lines);

    let mut codes = Vec::new();
    let mut current: Option<GeckoCode> = None;

    for line in &lines {
        match Line::classify(line) {
            Line::Title {
                enabled,
                name,
                creator,
            } => {
                let next = GeckoCode {
                    name: name.to_string(),
                    creator: creator.to_string(),
                    enabled,
                    user_defined: scope == Scope::User,
                    ..GeckoCode::default()
                };
                if let Some(code) = current.replace(next) {
                    flush(&mut codes, code);
                }
            }
            Line::Note(note) => match current.as_mut() {
                Some(code) => code.notes.push(note.to_string()),
                None => trace!("Ignoring Gecko note before any code: {:?}", line),
            },
            Line::Code(text) => match current.as_mut() {
                Some(code) => code.codes.push(CodeLine::from_line(text)),
                None => trace!("Ignoring Gecko line before any code: {:?}", line),
            },
        }
    }

    if let Some(code) = current {
        flush(&mut codes, code);
    }

    codes
}

/// Finish a code, keeping it only if it has a name
fn flush(codes: &mut Vec<GeckoCode>, code: GeckoCode) {
    if code.name.is_empty() {
        debug!(
            "Discarding unnamed Gecko code with {} line(s) and {} note(s)",
            code.codes.len(),
            code.notes.len()
        );
    } else {
        codes.push(code);
    }
}

/// Apply a configuration's `<section>_Enabled` and `<section>_Disabled` lists
pub fn read_enabled_and_disabled(store: &dyn Store, section: &str, codes: &mut [GeckoCode]) {
    apply_overrides(&store.lines(&enabled_section(section)), true, codes);
    apply_overrides(&store.lines(&disabled_section(section)), false, codes);
}

/// Set `enabled` on every code named by a `$name` line
///
/// Lines without the leading `$` are ignored.
pub fn apply_overrides(lines: &[String], enabled: bool, codes: &mut [GeckoCode]) {
    for name in lines.iter().filter_map(|line| line.strip_prefix('$')) {
        for code in codes.iter_mut().filter(|code| code.name == name) {
            code.enabled = enabled;
        }
    }
}

/// Lines to write back for a set of codes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SavedCodes {
    /// `Gecko` section: user-defined codes
    pub content: Vec<String>,
    /// `Gecko_Enabled` section: codes turned on against the defaults
    pub enabled: Vec<String>,
    /// `Gecko_Disabled` section: codes turned off against the defaults
    pub disabled: Vec<String>,
}

/// Append the lines of one code. Codes that aren't user-defined add nothing.
pub fn save_code(lines: &mut Vec<String>, code: &GeckoCode) {
    if !code.user_defined {
        return;
    }

    lines.push(code.title());

    // Payload lines are written as read, never re-encoded
    lines.extend(code.codes.iter().map(|line| line.original_line.clone()));

    lines.extend(code.notes.iter().map(|note| format!("*{}", note)));
}

/// Turn codes into section lines
pub fn serialize_codes(codes: &[GeckoCode]) -> SavedCodes {
    let mut saved = SavedCodes::default();

    for code in codes {
        if code.is_overridden() {
            let overrides = if code.enabled {
                &mut saved.enabled
            } else {
                &mut saved.disabled
            };
            overrides.push(format!("${}", code.name));
        }

        save_code(&mut saved.content, code);
    }

    saved
}

/// Write codes to a store, replacing its Gecko sections
pub fn save_codes(store: &mut dyn Store, codes: &[GeckoCode]) {
    let saved = serialize_codes(codes);
    debug!(
        "Saving {} Gecko line(s), {} enabled and {} disabled override(s)",
        saved.content.len(),
        saved.enabled.len(),
        saved.disabled.len()
    );

    store.set_lines(GECKO_SECTION, saved.content);
    store.set_lines(&enabled_section(GECKO_SECTION), saved.enabled);
    store.set_lines(&disabled_section(GECKO_SECTION), saved.disabled);
}
