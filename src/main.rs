use atelier_devis::core::render;
use atelier_devis::utils::{logger, validation::Validate};
use atelier_devis::{load_catalog, CliConfig, QuoteForm, QuoteSubmitter, TrelloClient, TrelloConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting atelier-devis CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    match run(&config).await {
        Ok(()) => {
            tracing::info!("✅ Devis terminé");
        }
        Err(e) => {
            tracing::error!(
                "❌ Devis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion : {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                atelier_devis::utils::error::ErrorSeverity::Low => 0,
                atelier_devis::utils::error::ErrorSeverity::Medium => 2,
                atelier_devis::utils::error::ErrorSeverity::High => 1,
                atelier_devis::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

async fn run(args: &CliConfig) -> atelier_devis::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    tracing::info!(
        "📋 Catalogue chargé : {} options dans {} sections",
        catalog.item_count(),
        catalog.sections().len()
    );

    let mut form = QuoteForm::new(&catalog);
    form.apply_selection(&args.set)?;

    // The rendered quote is both the console output and the card comment.
    let quote_text = render::quote_comment(&form);
    println!("{}", quote_text);

    if let Some(path) = &args.export {
        render::export_quote_csv(&form, path)?;
        println!("📁 Devis exporté vers : {}", path);
    }

    if let Some(card_id) = &args.card {
        if args.dry_run {
            println!("🧪 Dry run : rien n'a été envoyé vers Trello (carte {})", card_id);
            return Ok(());
        }

        let trello = TrelloConfig::from_file(&args.config)?;
        trello.validate()?;

        let submitter = QuoteSubmitter::new(TrelloClient::new(trello));
        let action = submitter.attach_quote(card_id, &form).await?;

        println!("✅ Devis posté en commentaire sur la carte {}", card_id);
        tracing::debug!("Comment action id: {}", action.id);
    }

    Ok(())
}
