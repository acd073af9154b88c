// spellgate-cli: shared utilities for CLI tools.

use std::path::PathBuf;
use std::process;

use spellgate_hunspell::Hunspell;

/// Dictionary used when no `--lang` is given.
pub const DEFAULT_LANG: &str = "en_US";

/// Dictionary selection parsed from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictArgs {
    pub dict_path: Option<String>,
    pub lang: String,
}

impl Default for DictArgs {
    fn default() -> Self {
        Self {
            dict_path: None,
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

/// Search for `{lang}.aff` / `{lang}.dic` and open them with Hunspell.
///
/// Search order:
/// 1. `dict_path` argument (if provided)
/// 2. `SPELLGATE_DICT_PATH` environment variable
/// 3. `~/.hunspell`
/// 4. `/usr/share/hunspell`, `/usr/share/myspell`
/// 5. Current working directory
///
/// `SPELLGATE_HUNSPELL_LIB` overrides the shared library to load.
pub fn load_engine(args: &DictArgs) -> Result<Hunspell, String> {
    let search_paths = build_search_paths(
        args.dict_path.as_deref(),
        std::env::var("SPELLGATE_DICT_PATH").ok(),
        home_dir(),
    );

    let (affix, dictionary) = find_dictionary(&search_paths, &args.lang).ok_or_else(|| {
        format!(
            "could not find {lang}.aff and {lang}.dic in any of the search paths:\n{}",
            search_paths
                .iter()
                .map(|p| format!("  - {}", p.display()))
                .collect::<Vec<_>>()
                .join("\n"),
            lang = args.lang,
        )
    })?;

    let library = std::env::var_os("SPELLGATE_HUNSPELL_LIB").map(PathBuf::from);
    Hunspell::open(library.as_deref(), &affix, &dictionary)
        .map_err(|e| format!("failed to open {}: {e}", dictionary.display()))
}

/// First directory in `paths` holding both files for `lang`.
pub fn find_dictionary(paths: &[PathBuf], lang: &str) -> Option<(PathBuf, PathBuf)> {
    paths.iter().find_map(|dir| {
        let affix = dir.join(format!("{lang}.aff"));
        let dictionary = dir.join(format!("{lang}.dic"));
        (affix.is_file() && dictionary.is_file()).then_some((affix, dictionary))
    })
}

/// Build the list of directories to search for dictionary files.
fn build_search_paths(
    dict_path: Option<&str>,
    env_path: Option<String>,
    home: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(p) = dict_path {
        paths.push(PathBuf::from(p));
    }

    if let Some(env_path) = env_path.filter(|p| !p.is_empty()) {
        // Colon-separated, like DICPATH.
        paths.extend(
            env_path
                .split(':')
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        );
    }

    if let Some(home) = home {
        paths.push(home.join(".hunspell"));
        #[cfg(target_os = "macos")]
        paths.push(home.join("Library").join("Spelling"));
    }

    paths.push(PathBuf::from("/usr/share/hunspell"));
    paths.push(PathBuf::from("/usr/share/myspell"));

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd);
    }

    paths
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Parse `--dict-path=PATH` / `-d PATH` and `--lang=LANG` / `-l LANG`.
///
/// Returns the selection and the remaining args.
pub fn parse_dict_path(args: &[String]) -> Result<(DictArgs, Vec<String>), String> {
    let mut dict = DictArgs::default();
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix("--dict-path=") {
            dict.dict_path = Some(val.to_string());
        } else if let Some(val) = arg.strip_prefix("--lang=") {
            dict.lang = val.to_string();
        } else if arg == "--dict-path" || arg == "-d" {
            let val = iter.next().ok_or_else(|| format!("{arg} requires a value"))?;
            dict.dict_path = Some(val.clone());
        } else if arg == "--lang" || arg == "-l" {
            let val = iter.next().ok_or_else(|| format!("{arg} requires a value"))?;
            dict.lang = val.clone();
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((dict, remaining))
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

/// Words given as positional arguments (anything not starting with `-`).
pub fn positional_words(args: &[String]) -> Vec<String> {
    args.iter().filter(|a| !a.starts_with('-')).cloned().collect()
}

/// Render control characters visibly for one-line output.
pub fn escape_display(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
