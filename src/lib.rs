//! Load and save Gecko cheat codes kept in game INI files.
//!
//! Codes are read from two configurations: the global defaults shipped with
//! the game settings and the user's own file. Saving writes the user's codes
//! back along with the enabled state that differs from the defaults. Lines
//! are written back exactly as they were read.
//!
//! ```
//! use geckocfg::IniFile;
//! use geckocfg::Store;
//!
//! let global = IniFile::from_text("[Gecko]\n$Shipped Code\n04000000 00000000\n");
//! let mut user = IniFile::default();
//!
//! let mut codes = geckocfg::load_codes(&global, &user);
//! codes[0].toggle();
//! geckocfg::save_codes(&mut user, &codes);
//!
//! assert!(user.lines("Gecko").is_empty());
//! assert_eq!(user.lines("Gecko_Enabled"), vec![String::from("$Shipped Code")]);
//! ```

pub mod config;
pub mod gecko;
pub mod ini;
pub mod line;
pub mod store;

pub use config::load_codes;
pub use config::save_codes;
pub use gecko::CodeLine;
pub use gecko::GeckoCode;
pub use ini::IniFile;
pub use store::Scope;
pub use store::Store;
