pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_distinct_paths, validate_path, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use self::toml_config::TomlConfig;

pub const DEFAULT_ROSTER_PATH: &str = "khachhang.txt";
pub const DEFAULT_CALLS_PATH: &str = "cuocgoi.txt";
pub const DEFAULT_REPORT_PATH: &str = "ketqua.txt";
pub const DEFAULT_BASE_DIR: &str = ".";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "phone-billing")]
#[command(about = "Computes per-customer phone call charges from a roster and call records")]
pub struct CliConfig {
    /// Customer roster, one `name;phone` per line [default: khachhang.txt]
    #[arg(long)]
    pub roster: Option<String>,

    /// Call records, one `phone;minutes;HHh;DD/MM/YYYY;zone` per line [default: cuocgoi.txt]
    #[arg(long)]
    pub calls: Option<String>,

    /// Report output path [default: ketqua.txt]
    #[arg(long)]
    pub report: Option<String>,

    /// Directory relative paths are resolved against [default: .]
    #[arg(long)]
    pub base_dir: Option<String>,

    /// Also write the summary as JSON to this path
    #[arg(long)]
    pub json_summary: Option<String>,

    /// TOML configuration file; explicit flags take precedence over it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Merges flags over the TOML file (when given) over the defaults.
    pub fn resolve(&self) -> Result<BillingConfig> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                TomlConfig::from_file(path)?
            }
            None => TomlConfig::default(),
        };
        Ok(self.merge(file))
    }

    pub fn merge(&self, file: TomlConfig) -> BillingConfig {
        fn pick(flag: &Option<String>, file: Option<String>, default: &str) -> String {
            flag.clone()
                .or(file)
                .unwrap_or_else(|| default.to_string())
        }

        BillingConfig {
            roster_path: pick(&self.roster, file.input.roster, DEFAULT_ROSTER_PATH),
            calls_path: pick(&self.calls, file.input.calls, DEFAULT_CALLS_PATH),
            report_path: pick(&self.report, file.output.report, DEFAULT_REPORT_PATH),
            json_summary_path: self.json_summary.clone().or(file.output.json_summary),
            base_dir: pick(&self.base_dir, file.storage.base_dir, DEFAULT_BASE_DIR),
        }
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingConfig {
    pub roster_path: String,
    pub calls_path: String,
    pub report_path: String,
    pub json_summary_path: Option<String>,
    pub base_dir: String,
}

impl Default for BillingConfig {
    fn default() -> Self {
        CliConfig::default().merge(TomlConfig::default())
    }
}

impl ConfigProvider for BillingConfig {
    fn roster_path(&self) -> &str {
        &self.roster_path
    }

    fn calls_path(&self) -> &str {
        &self.calls_path
    }

    fn report_path(&self) -> &str {
        &self.report_path
    }

    fn json_summary_path(&self) -> Option<&str> {
        self.json_summary_path.as_deref()
    }
}

impl Validate for BillingConfig {
    fn validate(&self) -> Result<()> {
        validate_path("base_dir", &self.base_dir)?;
        validate_path("roster", &self.roster_path)?;
        validate_path("calls", &self.calls_path)?;
        validate_path("report", &self.report_path)?;

        let mut paths = vec![
            ("roster", self.roster_path.as_str()),
            ("calls", self.calls_path.as_str()),
            ("report", self.report_path.as_str()),
        ];
        if let Some(json) = &self.json_summary_path {
            validate_path("json_summary", json)?;
            paths.push(("json_summary", json.as_str()));
        }
        validate_distinct_paths(&paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_fixed_paths() {
        let config = BillingConfig::default();
        assert_eq!(config.roster_path, "khachhang.txt");
        assert_eq!(config.calls_path, "cuocgoi.txt");
        assert_eq!(config.report_path, "ketqua.txt");
        assert_eq!(config.base_dir, ".");
        assert!(config.json_summary_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags_override_file() {
        let cli = CliConfig::parse_from(["phone-billing", "--report", "cli.txt"]);
        let file = TomlConfig::from_toml_str(
            "[input]\nroster = \"file_roster.txt\"\n[output]\nreport = \"file_report.txt\"\n",
        )
        .unwrap();

        let config = cli.merge(file);
        assert_eq!(config.roster_path, "file_roster.txt");
        assert_eq!(config.report_path, "cli.txt");
        assert_eq!(config.calls_path, DEFAULT_CALLS_PATH);
    }

    #[test]
    fn test_report_must_not_overwrite_input() {
        let cli = CliConfig::parse_from(["phone-billing", "--report", "khachhang.txt"]);
        let config = cli.merge(TomlConfig::default());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliConfig::parse_from(["phone-billing", "--config", "/nonexistent/billing.toml"]);
        assert!(cli.resolve().is_err());
    }
}
