use std::path::Path;

use crate::{
    cli::Cli,
    config::Settings,
    corrector::Tries,
    importer::{self, ImportError},
};

/// Initialize logger.
pub fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            use std::io::Write;
            let level = if record.level() != log::Level::Info {
                format!("[{}] ", record.level())
            } else {
                String::new()
            };
            writeln!(
                buf,
                "{} {}:{} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                level,
                record.args()
            )
        })
        .init();
}

/// Load config files and CLI overrides, exiting on error.
pub fn init_settings(cli: &Cli) -> Settings {
    match cli.settings() {
        Ok(s) => {
            log::info!(
                "distances: {:?}, max lookahead: {}",
                s.allowed_distances,
                s.max_lookahead
            );
            s
        }
        Err(e) => {
            log::error!("error loading config: {}", e);
            std::process::exit(1);
        }
    }
}

/// Build the per-language tries from the dictionary files, exiting on error.
pub fn init_tries(settings: &Settings) -> Tries {
    match load_tries(&settings.dictionaries) {
        Ok(tries) => tries,
        Err(e) => {
            log::error!("error loading dictionaries: {}", e);
            std::process::exit(1);
        }
    }
}

/// Build the per-language tries from the given dictionary files.
pub fn load_tries<P: AsRef<Path>>(paths: &[P]) -> Result<Tries, ImportError> {
    let mut tries = Tries::new();

    for path in paths {
        let path = path.as_ref();
        importer::import_file(path, &mut tries).map_err(|e| match e {
            ImportError::Validation(msg) => {
                ImportError::Validation(format!("{}: {}", path.display(), msg))
            }
            e => e,
        })?;
    }

    for lang in tries.languages() {
        if let Some(trie) = tries.get(lang) {
            log::info!(
                "language: {} ({} phrases, {} nodes)",
                lang,
                trie.num_phrases(),
                trie.len()
            );
        }
    }

    if tries.is_empty() {
        log::warn!("no dictionaries loaded. queries will be returned as-is");
    }

    Ok(tries)
}
