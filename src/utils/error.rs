use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevisError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Trello error ({status}): {message}")]
    TrelloApiError { status: u16, message: String },

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown catalog item: {id}")]
    UnknownItem { id: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    RemoteApi,
    Config,
    Input,
    Io,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DevisError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DevisError::ApiError(_) => ErrorCategory::Network,
            DevisError::TrelloApiError { .. } => ErrorCategory::RemoteApi,
            DevisError::CsvError(_) | DevisError::IoError(_) => ErrorCategory::Io,
            DevisError::SerializationError(_) => ErrorCategory::RemoteApi,
            DevisError::ConfigValidationError { .. }
            | DevisError::MissingConfigError { .. }
            | DevisError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            DevisError::UnknownItem { .. } | DevisError::ValidationError { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::RemoteApi => ErrorSeverity::Medium,
            ErrorCategory::Config | ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// Short message shown to the user on stderr, in the product language.
    pub fn user_friendly_message(&self) -> String {
        match self {
            DevisError::ApiError(e) => format!("La requête vers Trello a échoué : {}", e),
            DevisError::TrelloApiError { status, message } => {
                format!("Erreur Trello ({}) : {}", status, message)
            }
            DevisError::CsvError(e) => format!("Export CSV impossible : {}", e),
            DevisError::IoError(e) => format!("Erreur fichier : {}", e),
            DevisError::SerializationError(e) => {
                format!("Réponse Trello illisible : {}", e)
            }
            DevisError::ConfigValidationError { field, message } => {
                format!("Configuration invalide ({}) : {}", field, message)
            }
            DevisError::MissingConfigError { field } => {
                format!("Configuration incomplète : « {} » est manquant", field)
            }
            DevisError::InvalidConfigValueError { field, value, reason } => {
                format!("Valeur « {} » invalide pour {} : {}", value, field, reason)
            }
            DevisError::UnknownItem { id } => {
                format!("Option inconnue du catalogue : « {} »", id)
            }
            DevisError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self.category() {
            ErrorCategory::Network => {
                "Vérifiez la connexion réseau puis relancez la commande".to_string()
            }
            ErrorCategory::RemoteApi => {
                "Vérifiez l'identifiant de carte et les droits du token Trello".to_string()
            }
            ErrorCategory::Config => {
                "Vérifiez le fichier de configuration (clé, token, liste) et les variables d'environnement".to_string()
            }
            ErrorCategory::Input => {
                "Vérifiez les identifiants d'options passés en --set (voir le catalogue)".to_string()
            }
            ErrorCategory::Io => {
                "Vérifiez le chemin de sortie et les permissions du dossier".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DevisError>;
