//! quizsmith configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizsmith configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizsmithConfig {
    /// Where graded reports are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Report format(s) used when `--format` is not given.
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./quizsmith-results")
}
fn default_format() -> String {
    "text".to_string()
}

impl Default for QuizsmithConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            default_format: default_format(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizsmith.toml` in the current directory
/// 2. `~/.config/quizsmith/config.toml`
///
/// `QUIZSMITH_OUTPUT_DIR` overrides `output_dir`.
pub fn load_config() -> Result<QuizsmithConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizsmithConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizsmith.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config_file(&path)?
        }
        None => QuizsmithConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZSMITH_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<QuizsmithConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

/// Parse config TOML, resolving `${VAR}` references in `output_dir`.
pub fn parse_config_str(content: &str) -> Result<QuizsmithConfig> {
    let mut config: QuizsmithConfig = toml::from_str(content)?;
    config.output_dir = PathBuf::from(resolve_env_vars(&config.output_dir.to_string_lossy()));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizsmith"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_QUIZSMITH_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_QUIZSMITH_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_QUIZSMITH_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        std::env::remove_var("_QUIZSMITH_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = QuizsmithConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./quizsmith-results"));
        assert_eq!(config.default_format, "text");
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config_str("default_format = \"json,html\"\n").unwrap();
        assert_eq!(config.default_format, "json,html");
        assert_eq!(config.output_dir, PathBuf::from("./quizsmith-results"));
    }

    #[test]
    fn output_dir_resolves_env_vars() {
        std::env::set_var("_QUIZSMITH_TEST_ROOT", "/tmp/qs");
        let config = parse_config_str("output_dir = \"${_QUIZSMITH_TEST_ROOT}/out\"\n").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/qs/out"));
        std::env::remove_var("_QUIZSMITH_TEST_ROOT");
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/definitely/missing.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizsmith.toml");
        std::fs::write(&path, "default_format = \"all\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_format, "all");
    }
}
