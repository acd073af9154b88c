// spellgate-analyze: Morphological analysis of words.
//
// Prints every Hunspell analysis for each word, one per line, in the
// dictionary's own field notation (`st:`, `po:`, `is:` ...).
//
// Usage:
//   spellgate-analyze [-d DICT_PATH] [-l LANG] [WORD...]

use std::io::{self, BufRead, Write};

use spellgate_core::SpellEngine;
use spellgate_hunspell::Hunspell;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict, args) =
        spellgate_cli::parse_dict_path(&args).unwrap_or_else(|e| spellgate_cli::fatal(&e));

    if spellgate_cli::wants_help(&args) {
        println!("spellgate-analyze: Morphological analysis of words.");
        println!();
        println!("Usage: spellgate-analyze [-d DICT_PATH] [-l LANG] [WORD...]");
        println!();
        println!("If WORD arguments are given, analyzes each word.");
        println!("Otherwise reads words from stdin (one per line).");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Directory containing LANG.aff and LANG.dic");
        println!("  -l, --lang LANG        Dictionary name (default: en_US)");
        println!("  -h, --help             Print this help");
        return;
    }

    let words = spellgate_cli::positional_words(&args);

    let mut engine = spellgate_cli::load_engine(&dict).unwrap_or_else(|e| spellgate_cli::fatal(&e));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let analyze_word = |word: &str, engine: &mut Hunspell, out: &mut io::BufWriter<io::StdoutLock<'_>>| {
        match engine.analyze(word) {
            Ok(analyses) if analyses.is_empty() => {
                let _ = writeln!(out, "{word}: (no analysis)");
            }
            Ok(analyses) => {
                let _ = writeln!(out, "{word}:");
                for (i, analysis) in analyses.iter().enumerate() {
                    let _ = writeln!(out, "  Analysis {}: {}", i + 1, analysis.trim());
                }
            }
            Err(e) => eprintln!("error analyzing {word:?}: {e}"),
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
            analyze_word(word, &mut engine, &mut out);
        }
    } else {
        for word in &words {
            analyze_word(word, &mut engine, &mut out);
        }
    }
}
