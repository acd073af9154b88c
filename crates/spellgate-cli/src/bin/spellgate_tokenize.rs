// spellgate-tokenize: Show how the service splits text into segments.
//
// Reads text from stdin and prints one line per segment:
//   WORD  [start..end]: text   (sent to the engine)
//   OTHER [start..end]: text   (passed through as correct)
//
// No dictionary is needed.
//
// Usage:
//   spellgate-tokenize [-h]

use std::io::{self, Read, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if spellgate_cli::wants_help(&args) {
        println!("spellgate-tokenize: Split text into segments.");
        println!();
        println!("Usage: spellgate-tokenize");
        println!();
        println!("Reads text from stdin, prints segments with types:");
        println!("  WORD:  <text>   (checked against the dictionary)");
        println!("  OTHER: <text>   (ignored)");
        return;
    }

    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .unwrap_or_else(|e| spellgate_cli::fatal(&format!("failed to read stdin: {e}")));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    let mut pos = 0;
    for segment in spellgate_core::tokenize(&input) {
        let type_str = if segment.is_word_like() { "WORD" } else { "OTHER" };
        let end = pos + segment.len();
        let _ = writeln!(
            out,
            "{type_str:5} [{pos:>4}..{end:>4}]: {}",
            spellgate_cli::escape_display(segment.text())
        );
        pos = end;
    }
}
