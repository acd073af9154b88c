// spellgate-spell: Check spelling of words from stdin.
//
// Reads words from stdin (one per line) and reports whether each word
// is correctly spelled:
//   C: word    (correct)
//   W: word    (wrong / misspelled)
//
// Usage:
//   spellgate-spell [-d DICT_PATH] [-l LANG] [OPTIONS]
//
// Options:
//   -d, --dict-path PATH   Directory containing LANG.aff and LANG.dic
//   -l, --lang LANG        Dictionary name (default: en_US)
//   -s, --suggest          Also print suggestions for misspelled words
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use spellgate_core::SpellEngine;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict, args) =
        spellgate_cli::parse_dict_path(&args).unwrap_or_else(|e| spellgate_cli::fatal(&e));

    if spellgate_cli::wants_help(&args) {
        println!("spellgate-spell: Check spelling of words from stdin.");
        println!();
        println!("Usage: spellgate-spell [-d DICT_PATH] [-l LANG] [OPTIONS]");
        println!();
        println!("Reads words from stdin (one per line). Prints:");
        println!("  C: word    (correct)");
        println!("  W: word    (misspelled)");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Directory containing LANG.aff and LANG.dic");
        println!("  -l, --lang LANG        Dictionary name (default: en_US)");
        println!("  -s, --suggest          Also print suggestions for misspelled words");
        println!("  -h, --help             Print this help");
        return;
    }

    let show_suggestions = args.iter().any(|a| a == "-s" || a == "--suggest");

    let mut engine = spellgate_cli::load_engine(&dict).unwrap_or_else(|e| spellgate_cli::fatal(&e));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

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

        match engine.check(word) {
            Ok(true) => {
                let _ = writeln!(out, "C: {word}");
            }
            Ok(false) => {
                let _ = writeln!(out, "W: {word}");
                if show_suggestions {
                    for suggestion in engine.suggest(word).unwrap_or_default() {
                        let _ = writeln!(out, "S: {suggestion}");
                    }
                }
            }
            Err(e) => eprintln!("error checking {word:?}: {e}"),
        }
    }
}
