use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{self, Config, ConfigError, Settings};

#[derive(Parser, Debug)]
#[command(name = "phrasefix")]
#[command(about = "phrasefix - Fuzzy multi-word phrase correction against scored dictionaries.")]
#[command(version = env!("VERSION"))]
#[command(subcommand_precedence_over_arg = true)]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    /// Comma separated word length thresholds for the edit budget, eg. "4,9".
    #[arg(long)]
    pub distances: Option<String>,

    /// Port to listen on. Overrides the port in the configured address.
    #[arg(long)]
    pub port: Option<u16>,

    /// Maximum number of words a phrase correction may span.
    #[arg(long)]
    pub max_lookahead: Option<usize>,

    /// Dictionary files to load (`language<TAB>phrase<TAB>score` per line).
    /// Added to the dictionaries listed in the config. Must come before a
    /// subcommand.
    #[arg(value_name = "DICTIONARY")]
    pub dictionaries: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Load the dictionaries, correct a single query and print the result as JSON.
    Correct {
        /// Language of the query.
        #[arg(long)]
        language: String,

        /// Dictionary file to load in addition to the configured ones.
        #[arg(long = "dict", value_name = "DICTIONARY", action = clap::ArgAction::Append)]
        dictionaries: Vec<PathBuf>,

        /// Query to correct.
        text: String,
    },
}

impl Cli {
    /// Load the config files and apply the command line overrides on top.
    pub fn settings(&self) -> Result<Settings, ConfigError> {
        let cfg = config::load_all(&self.config)?;
        self.apply(cfg)
    }

    fn apply(&self, mut cfg: Config) -> Result<Settings, ConfigError> {
        if let Some(d) = &self.distances {
            cfg.app.distances = d.clone();
        }
        if let Some(n) = self.max_lookahead {
            cfg.app.max_lookahead = n;
        }
        cfg.app.dictionaries.extend(self.dictionaries.iter().cloned());
        if let Some(Commands::Correct { dictionaries, .. }) = &self.command {
            cfg.app.dictionaries.extend(dictionaries.iter().cloned());
        }

        let mut settings = cfg.resolve()?;
        if let Some(port) = self.port {
            settings.address = config::with_port(&settings.address, port);
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applies_overrides() {
        let cli = Cli::parse_from([
            "phrasefix",
            "--distances",
            "100",
            "--port",
            "9000",
            "en.tsv",
            "de.tsv",
        ]);

        let s = cli.apply(Config::default()).unwrap();
        assert_eq!(s.allowed_distances, vec![100]);
        assert_eq!(s.address, "0.0.0.0:9000");
        assert_eq!(
            s.dictionaries,
            vec![PathBuf::from("en.tsv"), PathBuf::from("de.tsv")]
        );
    }

    #[test]
    fn rejects_bad_distances() {
        let cli = Cli::parse_from(["phrasefix", "--distances", "4;9"]);
        assert!(cli.apply(Config::default()).is_err());
    }

    #[test]
    fn parses_correct_command() {
        let cli = Cli::parse_from(["phrasefix", "correct", "--language", "en", "some phrse"]);
        match cli.command {
            Some(Commands::Correct {
                language,
                text,
                dictionaries,
            }) => {
                assert_eq!(language, "en");
                assert_eq!(text, "some phrse");
                assert!(dictionaries.is_empty());
            }
            _ => panic!("expected correct command"),
        }
    }

    #[test]
    fn takes_dictionaries_before_a_command() {
        let cli = Cli::try_parse_from([
            "phrasefix",
            "en.tsv",
            "correct",
            "--language",
            "en",
            "some phrse",
        ])
        .unwrap();

        assert_eq!(cli.dictionaries, vec![PathBuf::from("en.tsv")]);
        assert!(matches!(cli.command, Some(Commands::Correct { .. })));

        let s = cli.apply(Config::default()).unwrap();
        assert_eq!(s.dictionaries, vec![PathBuf::from("en.tsv")]);
    }

    #[test]
    fn takes_dictionaries_of_the_correct_command() {
        let cli = Cli::try_parse_from([
            "phrasefix",
            "de.tsv",
            "correct",
            "--language",
            "en",
            "--dict",
            "en.tsv",
            "--dict",
            "fr.tsv",
            "some phrse",
        ])
        .unwrap();

        let mut cfg = Config::default();
        cfg.app.dictionaries = vec![PathBuf::from("base.tsv")];

        let s = cli.apply(cfg).unwrap();
        assert_eq!(
            s.dictionaries,
            vec![
                PathBuf::from("base.tsv"),
                PathBuf::from("de.tsv"),
                PathBuf::from("en.tsv"),
                PathBuf::from("fr.tsv")
            ]
        );
    }
}
