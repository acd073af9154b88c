// spellgate-suggest: Generate spelling suggestions for words.
//
// Prints suggestions for misspelled words. Correctly spelled words are
// printed as-is.
//
// Usage:
//   spellgate-suggest [-d DICT_PATH] [-l LANG] [OPTIONS] [WORD...]
//
// Options:
//   -d, --dict-path PATH      Directory containing LANG.aff and LANG.dic
//   -l, --lang LANG           Dictionary name (default: en_US)
//   -n, --max-suggestions N   Maximum number of suggestions (default: 5)
//   -h, --help                Print help

use std::io::{self, BufRead, Write};

use spellgate_core::SpellEngine;
use spellgate_hunspell::Hunspell;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict, args) =
        spellgate_cli::parse_dict_path(&args).unwrap_or_else(|e| spellgate_cli::fatal(&e));

    if spellgate_cli::wants_help(&args) {
        println!("spellgate-suggest: Generate spelling suggestions.");
        println!();
        println!("Usage: spellgate-suggest [-d DICT_PATH] [-l LANG] [OPTIONS] [WORD...]");
        println!();
        println!("If WORD arguments are given, suggests for each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH     Directory containing LANG.aff and LANG.dic");
        println!("  -l, --lang LANG          Dictionary name (default: en_US)");
        println!("  -n, --max-suggestions N  Maximum number of suggestions (default: 5)");
        println!("  -h, --help               Print this help");
        return;
    }

    let mut max_suggestions: usize = 5;
    let mut words: Vec<String> = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "-n" || arg == "--max-suggestions" {
            let value = iter
                .next()
                .unwrap_or_else(|| spellgate_cli::fatal("--max-suggestions requires a value"));
            max_suggestions = value
                .parse()
                .unwrap_or_else(|_| spellgate_cli::fatal("invalid number for --max-suggestions"));
        } else if !arg.starts_with('-') {
            words.push(arg.clone());
        }
    }

    let mut engine = spellgate_cli::load_engine(&dict).unwrap_or_else(|e| spellgate_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let suggest_word = |word: &str, engine: &mut Hunspell, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        let result = engine.check(word).and_then(|correct| {
            if correct {
                Ok(None)
            } else {
                engine.suggest(word).map(Some)
            }
        });
        match result {
            Ok(None) => {
                let _ = writeln!(out, "{word} (correct)");
            }
            Ok(Some(suggestions)) if suggestions.is_empty() => {
                let _ = writeln!(out, "{word}: (no suggestions)");
            }
            Ok(Some(suggestions)) => {
                let _ = writeln!(out, "{word}:");
                for s in suggestions.iter().take(max_suggestions) {
                    let _ = writeln!(out, "  {s}");
                }
            }
            Err(e) => eprintln!("error checking {word:?}: {e}"),
        }
    };

    if words.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error reading stdin: {e}");
                    break;
                }
            };
            let word = line.trim();
            if word.is_empty() {
                continue;
            }
            suggest_word(word, &mut engine, &mut out);
        }
    } else {
        for word in &words {
            suggest_word(word, &mut engine, &mut out);
        }
    }
}
