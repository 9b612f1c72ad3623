//! Interpreter and REPL configuration
//!
//! Defaults, then an optional JSON file, then `WISP_*` environment variables.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Prompt shown when no other is configured
pub const DEFAULT_PROMPT: &str = "user> ";

/// Configuration for the interpreter and the REPL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// REPL prompt (default: `"user> "`)
    pub prompt: String,
    /// Where REPL history is kept between sessions (default: none)
    pub history_file: Option<PathBuf>,
    /// Evaluate the Lisp prelude into the root environment (default: true)
    pub load_prelude: bool,
    /// Print a version banner when the REPL starts (default: true)
    pub print_banner: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            history_file: None,
            load_prelude: true,
            print_banner: true,
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        Self::parse(&contents)
    }

    /// Parse configuration from a JSON string; missing fields keep defaults
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::runtime(format!("Failed to parse config JSON: {}", e)))
    }

    /// Apply `WISP_PROMPT`, `WISP_HISTORY` and `WISP_NO_PRELUDE` from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable source
    pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(prompt) = var("WISP_PROMPT") {
            self.prompt = prompt;
        }
        if let Some(history) = var("WISP_HISTORY").filter(|h| !h.is_empty()) {
            self.history_file = Some(PathBuf::from(history));
        }
        if let Some(flag) = var("WISP_NO_PRELUDE") {
            self.load_prelude = matches!(flag.as_str(), "" | "0" | "false");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.prompt, "user> ");
        assert!(config.load_prelude);
        assert!(config.history_file.is_none());
    }

    #[test]
    fn test_parse_partial_json() {
        let config = Config::parse(r#"{"prompt": "wisp> ", "print_banner": false}"#).unwrap();
        assert_eq!(config.prompt, "wisp> ");
        assert!(!config.print_banner);
        assert!(config.load_prelude);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            Config::parse("{prompt"),
            Err(Error::RuntimeError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/no/such/wisp/config.json"),
            Err(Error::Io { .. })
        ));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("WISP_PROMPT", "> "),
            ("WISP_HISTORY", "/tmp/wisp-history"),
            ("WISP_NO_PRELUDE", "1"),
        ]
        .into_iter()
        .collect();

        let config = Config::default().with_overrides(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.prompt, "> ");
        assert_eq!(config.history_file, Some(PathBuf::from("/tmp/wisp-history")));
        assert!(!config.load_prelude);
    }

    #[test]
    fn test_no_prelude_falsey_values() {
        let config = Config::default().with_overrides(|k| {
            (k == "WISP_NO_PRELUDE").then(|| "false".to_string())
        });
        assert!(config.load_prelude);
    }
}
