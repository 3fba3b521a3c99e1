pub mod catalog;
pub mod trello;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "atelier-devis")]
#[command(about = "Construit un devis sellerie et le poste en commentaire d'une carte Trello")]
pub struct CliConfig {
    /// Sélection d'options au format id=quantité (répétable, séparable par des virgules)
    #[arg(long, value_delimiter = ',')]
    pub set: Vec<String>,

    /// Fichier catalogue TOML ; catalogue embarqué si absent
    #[arg(long)]
    pub catalog: Option<String>,

    /// Identifiant de la carte Trello à commenter avec le devis
    #[arg(long)]
    pub card: Option<String>,

    /// Fichier de configuration Trello
    #[arg(long, default_value = "trello.toml")]
    pub config: String,

    /// Exporte le devis en CSV vers ce chemin
    #[arg(long)]
    pub export: Option<String>,

    /// Affiche le commentaire qui serait posté, sans appeler l'API
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Journalisation détaillée")]
    pub verbose: bool,
}
