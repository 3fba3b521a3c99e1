use crate::utils::error::{DevisError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_API_ROOT: &str = "https://api.trello.com/1";

/// Connection settings for the card-tracking service. The key and token are
/// normally referenced as `${TRELLO_KEY}` / `${TRELLO_TOKEN}` in the file so
/// secrets stay in the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrelloConfig {
    pub key: String,
    pub token: String,
    pub board_id: String,
    /// List where new client cards are created.
    pub list_id: String,
    /// Base URL of the public quote form, e.g. https://example.com/devis
    pub form_base_url: String,
    #[serde(default = "default_api_root")]
    pub api_root: String,
}

fn default_api_root() -> String {
    DEFAULT_API_ROOT.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrelloFileConfig {
    trello: TrelloConfig,
}

impl TrelloConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DevisError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let file: TrelloFileConfig =
            toml::from_str(&processed_content).map_err(|e| DevisError::ConfigValidationError {
                field: "trello".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        Ok(file.trello)
    }

    /// Replaces `${VAR_NAME}` references with environment values. Unknown
    /// variables are left as-is and caught by `validate`.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TrelloConfig {
    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("trello.key", &self.key),
            ("trello.token", &self.token),
            ("trello.board_id", &self.board_id),
            ("trello.list_id", &self.list_id),
        ] {
            validate_non_empty_string(field, value)?;
            if value.contains("${") {
                return Err(DevisError::MissingConfigError {
                    field: format!("{} (variable d'environnement non définie : {})", field, value),
                });
            }
        }

        validate_url("trello.api_root", &self.api_root)?;
        validate_url("trello.form_base_url", &self.form_base_url)?;
        Ok(())
    }
}
