//! # spellgate
//!
//! Spell-checking HTTP service. POST a JSON string to any path and receive
//! one `[segment, {note?, correct}]` pair per token.
//!
//! # Configuration
//!
//! Read from the environment at startup:
//!
//! ```bash
//! PORT=8080 SPELLGATE_AFFIX=/usr/share/hunspell/en_US.aff \
//!   SPELLGATE_DICT=/usr/share/hunspell/en_US.dic spellgate
//! ```

use anyhow::Context;
use spellgate_hunspell::Hunspell;
use spellgate_server::telemetry;
use spellgate_server::{ServerConfig, SpellServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env();
    let guard = telemetry::init_telemetry(&config)?;

    let engine = Hunspell::open(
        config.hunspell_library.as_deref(),
        &config.affix_path,
        &config.dictionary_path,
    )
    .with_context(|| {
        format!(
            "failed to initialize the spelling engine from {} and {}",
            config.affix_path.display(),
            config.dictionary_path.display()
        )
    })?;
    tracing::info!(
        affix = %config.affix_path.display(),
        dictionary = %config.dictionary_path.display(),
        "dictionary loaded"
    );

    let result = SpellServer::new(config, engine).serve().await;

    guard.shutdown().await;
    result
}
