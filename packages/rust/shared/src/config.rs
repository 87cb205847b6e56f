//! Application configuration and master-list loading for PartnerBoard.
//!
//! User config lives at `~/.partnerboard/partnerboard.toml`.
//! Master lists live next to the profile documents in the data directory and
//! fall back to built-in defaults when absent.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PartnerBoardError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "partnerboard.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".partnerboard";

/// Master domain list file inside the data directory.
const DOMAIN_MASTER_FILE: &str = "domain-master.txt";

/// Relation level master file inside the data directory.
const RELATION_MASTER_FILE: &str = "relation-master.txt";

/// Built-in master domains used when `domain-master.txt` is absent.
const DEFAULT_MASTER_LIST: [&str; 11] = [
    "戦略・企画",
    "営業",
    "プロジェクトマネジメント",
    "コンサルティング",
    "エンジニア",
    "ソリューションサービス",
    "運用",
    "セキュリティ教育",
    "脆弱性診断",
    "フォレンジック対応",
    "バックオフィス業務",
];

/// Built-in relation levels used when `relation-master.txt` is absent.
const DEFAULT_RELATION_MASTER: [&str; 4] = ["強化", "維持", "縮小", "終了"];

// ---------------------------------------------------------------------------
// Config structs (matching partnerboard.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory holding the partner profile `.md` files and master lists.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

fn default_data_dir() -> String {
    "data".into()
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.partnerboard/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| PartnerBoardError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.partnerboard/partnerboard.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| PartnerBoardError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        PartnerBoardError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| PartnerBoardError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| PartnerBoardError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| PartnerBoardError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

// ---------------------------------------------------------------------------
// Master lists
// ---------------------------------------------------------------------------

/// Load the ordered master domain list from `domain-master.txt`.
///
/// Falls back to the built-in defaults when the file does not exist.
pub fn load_master_list(data_dir: &Path) -> Result<Vec<String>> {
    load_list_file(&data_dir.join(DOMAIN_MASTER_FILE), &DEFAULT_MASTER_LIST)
}

/// Load the ordered relation-level list from `relation-master.txt`.
///
/// Falls back to the built-in defaults when the file does not exist.
pub fn load_relation_master(data_dir: &Path) -> Result<Vec<String>> {
    load_list_file(
        &data_dir.join(RELATION_MASTER_FILE),
        &DEFAULT_RELATION_MASTER,
    )
}

/// One entry per line, trimmed, blank lines skipped, order preserved.
fn load_list_file(path: &Path, defaults: &[&str]) -> Result<Vec<String>> {
    if !path.exists() {
        tracing::debug!(?path, "master list not found, using defaults");
        return Ok(defaults.iter().map(|s| s.to_string()).collect());
    }

    let content = std::fs::read_to_string(path).map_err(|e| PartnerBoardError::io(path, e))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("data_dir"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.data_dir, "data");
    }

    #[test]
    fn config_with_custom_data_dir() {
        let toml_str = r#"
[defaults]
data_dir = "/srv/partners"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.data_dir, "/srv/partners");
    }

    #[test]
    fn master_list_defaults_when_file_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let list = load_master_list(dir.path()).expect("load");
        assert_eq!(list.len(), 11);
        assert_eq!(list[0], "戦略・企画");

        let relations = load_relation_master(dir.path()).expect("load");
        assert_eq!(relations, ["強化", "維持", "縮小", "終了"]);
    }

    #[test]
    fn master_list_reads_trimmed_non_blank_lines() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("domain-master.txt"),
            "営業\n\n  運用  \nセキュリティ教育\n",
        )
        .expect("write");

        let list = load_master_list(dir.path()).expect("load");
        assert_eq!(list, ["営業", "運用", "セキュリティ教育"]);
    }
}
