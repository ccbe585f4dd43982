//! Configuration for the companion host
//!
//! Command line flags with environment fallbacks, using clap. Call
//! `dotenvy::dotenv()` before parsing to pick up `.env`.

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, Args};

const DEFAULT_STORE_DB: &str = "grc-settings.db";
const DEFAULT_BASELINE_PATH: &str = "data.json";

/// Where the companion keeps its data and who is using it.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CompanionConfig {
    /// SQLite file backing the settings store
    #[arg(long = "db", env = "GRC_STORE_DB", default_value = DEFAULT_STORE_DB, global = true)]
    pub store_db: PathBuf,

    /// Baseline data.json on disk
    #[arg(
        long = "baseline",
        env = "GRC_BASELINE_PATH",
        default_value = DEFAULT_BASELINE_PATH,
        global = true
    )]
    pub baseline_path: PathBuf,

    /// Host asset root; when set the baseline is fetched over HTTP instead
    #[arg(long, env = "GRC_BASELINE_URL", global = true)]
    pub baseline_url: Option<String>,

    /// Legacy per-user cache file to migrate from
    #[arg(long, env = "GRC_LEGACY_CACHE", global = true)]
    pub legacy_cache: Option<PathBuf>,

    /// Act as the GM (`--gm`, `--gm=false`, or GRC_IS_GM=yes/no)
    #[arg(
        long = "gm",
        env = "GRC_IS_GM",
        global = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_value = "false",
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub is_gm: bool,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            store_db: PathBuf::from(DEFAULT_STORE_DB),
            baseline_path: PathBuf::from(DEFAULT_BASELINE_PATH),
            baseline_url: None,
            legacy_cache: None,
            is_gm: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Host {
        #[command(flatten)]
        config: CompanionConfig,
    }

    fn parse(args: &[&str]) -> CompanionConfig {
        Host::try_parse_from(std::iter::once("grc").chain(args.iter().copied()))
            .expect("valid arguments")
            .config
    }

    #[test]
    fn reads_all_flags() {
        let cfg = parse(&[
            "--db",
            "/tmp/s.db",
            "--baseline",
            "/srv/data.json",
            "--baseline-url",
            "http://localhost:30000",
            "--legacy-cache",
            "legacy.json",
            "--gm",
        ]);
        assert_eq!(cfg.store_db, PathBuf::from("/tmp/s.db"));
        assert_eq!(cfg.baseline_path, PathBuf::from("/srv/data.json"));
        assert_eq!(cfg.baseline_url.as_deref(), Some("http://localhost:30000"));
        assert_eq!(cfg.legacy_cache, Some(PathBuf::from("legacy.json")));
        assert!(cfg.is_gm);
    }

    #[test]
    fn gm_flag_takes_an_explicit_value() {
        assert!(parse(&["--gm=yes"]).is_gm);
        assert!(!parse(&["--gm=false"]).is_gm);
        assert!(!parse(&["--gm=off"]).is_gm);
        assert!(Host::try_parse_from(["grc", "--gm=maybe"]).is_err());
    }

    #[test]
    fn defaults_without_flags() {
        assert_eq!(parse(&[]), CompanionConfig::default());
    }
}
