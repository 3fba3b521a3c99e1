use atelier_devis::core::render;
use atelier_devis::utils::error::ErrorSeverity;
use atelier_devis::utils::{logger, validation::Validate};
use atelier_devis::{ContactRequest, QuoteSubmitter, TrelloClient, TrelloConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "nouveau-client")]
#[command(about = "Crée une carte Trello pour un nouveau client avec son lien de devis")]
struct Args {
    /// Fichier de configuration Trello
    #[arg(short, long, default_value = "trello.toml")]
    config: String,

    /// Nom du client
    #[arg(long)]
    nom: String,

    /// Téléphone du client
    #[arg(long)]
    telephone: Option<String>,

    /// Email du client
    #[arg(long)]
    email: Option<String>,

    /// Modèle de moto
    #[arg(long)]
    moto: Option<String>,

    /// Notes libres pour la carte
    #[arg(long)]
    notes: Option<String>,

    /// Affiche le contenu de la carte sans appeler l'API
    #[arg(long)]
    dry_run: bool,

    /// Journalisation détaillée
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting nouveau-client");

    match run(&args).await {
        Ok(()) => {}
        Err(e) => {
            tracing::error!("❌ nouveau-client failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion : {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(args: &Args) -> atelier_devis::Result<()> {
    let contact = ContactRequest {
        nom: args.nom.clone(),
        telephone: args.telephone.clone(),
        email: args.email.clone(),
        moto: args.moto.clone(),
        notes: args.notes.clone(),
    };
    contact.validate()?;

    let trello = TrelloConfig::from_file(&args.config)?;
    trello.validate()?;

    if args.dry_run {
        // No card id yet: show the description with a placeholder link.
        let link = render::form_link(&trello.form_base_url, "ID-CARTE")?;
        println!("🧪 Dry run : carte « {} »", render::client_card_name(&contact));
        println!("{}", render::client_card_description(&contact, &link));
        return Ok(());
    }

    let list_id = trello.list_id.clone();
    let form_base_url = trello.form_base_url.clone();
    let submitter = QuoteSubmitter::new(TrelloClient::new(trello));

    let created = submitter
        .create_client_card(&contact, &list_id, &form_base_url)
        .await?;

    println!("✅ Carte créée : {}", created.card.name);
    if let Some(url) = created.card.short_url.as_deref().or(created.card.url.as_deref()) {
        println!("🔗 Carte : {}", url);
    }
    println!("🔗 Formulaire de devis : {}", created.form_link);

    Ok(())
}
