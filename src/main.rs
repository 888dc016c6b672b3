use geckocfg::config;
use geckocfg::ini::IniError;
use geckocfg::GeckoCode;
use geckocfg::IniFile;
use geckocfg::Scope;
use geckocfg::Store;

use std::ffi::OsStr;
use std::path::Path;
use std::path::PathBuf;

use snafu::ensure;
use snafu::ResultExt;
use snafu::Snafu;
use structopt::StructOpt;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("{}", source))]
    Ini { source: IniError },

    #[snafu(display("No Gecko code named '{}'", name))]
    NoCode { name: String },

    #[snafu(display("Could not scan directory: {}", source))]
    Walk { source: walkdir::Error },
}

/// Global and user INI files of one game
#[derive(StructOpt)]
struct Files {
    /// Path to the global game settings INI with default codes
    #[structopt(long)]
    global: Option<PathBuf>,

    /// Path to the user's game settings INI
    #[structopt(long)]
    user: PathBuf,
}

impl Files {
    /// Load both files, returning the user INI and all codes
    fn load(&self) -> Result<(IniFile, Vec<GeckoCode>), Error> {
        let global = match &self.global {
            Some(path) => IniFile::load(path).context(Ini)?,
            None => IniFile::default(),
        };
        let user = IniFile::load(&self.user).context(Ini)?;
        let codes = geckocfg::load_codes(&global, &user);
        Ok((user, codes))
    }
}

#[derive(StructOpt)]
#[structopt(about = "Inspect and toggle Gecko codes in game INI files")]
enum Opts {
    /// List all codes
    List {
        #[structopt(flatten)]
        files: Files,
    },

    /// Print the lines and notes of a code
    Show {
        #[structopt(flatten)]
        files: Files,

        /// Name of the code
        name: String,
    },

    /// Turn a code on and save the user INI
    Enable {
        #[structopt(flatten)]
        files: Files,

        /// Name of the code
        name: String,
    },

    /// Turn a code off and save the user INI
    Disable {
        #[structopt(flatten)]
        files: Files,

        /// Name of the code
        name: String,
    },

    /// Count the codes defined by every INI file under a directory
    Scan {
        /// Directory to search
        dir: PathBuf,
    },
}

fn list(files: &Files) -> Result<(), Error> {
    let (_, codes) = files.load()?;
    for code in &codes {
        let scope = if code.user_defined {
            Scope::User
        } else {
            Scope::Global
        };
        println!(
            "[{}] {} ({}, {} line(s), {} note(s))",
            if code.enabled { 'x' } else { ' ' },
            code.title(),
            scope,
            code.codes.len(),
            code.notes.len()
        );
    }
    Ok(())
}

fn show(files: &Files, name: &str) -> Result<(), Error> {
    let (_, codes) = files.load()?;
    let mut found = false;
    for code in codes.iter().filter(|code| code.name == name) {
        found = true;
        println!("{}", code.title());
        for line in &code.codes {
            match line.pair {
                Some(pair) => println!("  {}", pair),
                None => println!("  {}  (raw)", line.original_line),
            }
        }
        for note in &code.notes {
            println!("  * {}", note);
        }
    }
    ensure!(found, NoCode { name });
    Ok(())
}

fn set_enabled(files: &Files, name: &str, enabled: bool) -> Result<(), Error> {
    let (mut user, mut codes) = files.load()?;

    let mut found = false;
    for code in codes.iter_mut().filter(|code| code.name == name) {
        code.set_enabled(enabled);
        found = true;
    }
    ensure!(found, NoCode { name });

    config::save_codes(&mut user, &codes);
    user.save(&files.user).context(Ini)
}

fn scan(dir: &Path) -> Result<(), Error> {
    for entry in walkdir::WalkDir::new(dir).sort_by(|a, b| a.file_name().cmp(b.file_name())) {
        let entry = entry.context(Walk)?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension() != Some(OsStr::new("ini")) {
            continue;
        }

        let ini = IniFile::load(path).context(Ini)?;
        let lines = ini.lines(config::GECKO_SECTION);
        let codes = config::group_codes(lines, Scope::Global);
        if !codes.is_empty() {
            println!("{}: {}", path.display(), codes.len());
        }
    }
    Ok(())
}

fn run(opts: Opts) -> Result<(), Error> {
    match opts {
        Opts::List { files } => list(&files),
        Opts::Show { files, name } => show(&files, &name),
        Opts::Enable { files, name } => set_enabled(&files, &name, true),
        Opts::Disable { files, name } => set_enabled(&files, &name, false),
        Opts::Scan { dir } => scan(&dir),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(Opts::from_args()) {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}
