use crate::core::quote::QuoteForm;
use crate::domain::model::ContactRequest;
use crate::utils::error::{DevisError, Result};
use chrono::NaiveDate;
use std::io::Write;
use url::Url;

/// Renders the quote as the comment posted on the client's card, dated with
/// today's date.
pub fn quote_comment(form: &QuoteForm<'_>) -> String {
    quote_comment_at(form, chrono::Local::now().date_naive())
}

/// Same rendering with an explicit date.
pub fn quote_comment_at(form: &QuoteForm<'_>, date: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str(&format!("**Devis du {}**\n", date.format("%d/%m/%Y")));

    for section in form.catalog().sections() {
        let lines: Vec<_> = form
            .selected_lines()
            .into_iter()
            .filter(|line| section.items.iter().any(|item| item.id == line.item.id))
            .collect();
        if lines.is_empty() {
            continue;
        }

        out.push_str(&format!("\n**{}**\n", section.title));
        for line in lines {
            out.push_str(&format!(
                "- {} : {} × {} = {}\n",
                line.item.label, line.quantity, line.item.unit_price, line.line_total
            ));
        }
    }

    let totals = form.totals();
    out.push_str(&format!("\nTarif : {}\n", totals.subtotal));
    out.push_str(&format!(
        "Tarif + {}% : {}\n",
        totals.markup_percent, totals.total_with_markup
    ));
    out
}

/// Builds the personalized quote-form link carried in the card description,
/// e.g. `https://example.com/devis?trelloId=<card id>`.
pub fn form_link(form_base_url: &str, card_id: &str) -> Result<Url> {
    let mut url =
        Url::parse(form_base_url).map_err(|e| DevisError::InvalidConfigValueError {
            field: "trello.form_base_url".to_string(),
            value: form_base_url.to_string(),
            reason: format!("Invalid URL format: {}", e),
        })?;
    url.query_pairs_mut().append_pair("trelloId", card_id);
    Ok(url)
}

/// Card title for a new client: the name, with the motorcycle when given.
pub fn client_card_name(contact: &ContactRequest) -> String {
    match &contact.moto {
        Some(moto) if !moto.trim().is_empty() => format!("{} — {}", contact.nom, moto),
        _ => contact.nom.clone(),
    }
}

/// Card description for a new client: contact block plus the personalized
/// form link. Absent fields are simply omitted.
pub fn client_card_description(contact: &ContactRequest, link: &Url) -> String {
    let mut out = String::new();
    out.push_str(&format!("Nom : {}\n", contact.nom));
    if let Some(telephone) = &contact.telephone {
        out.push_str(&format!("Téléphone : {}\n", telephone));
    }
    if let Some(email) = &contact.email {
        out.push_str(&format!("Email : {}\n", email));
    }
    if let Some(moto) = &contact.moto {
        out.push_str(&format!("Moto : {}\n", moto));
    }
    if let Some(notes) = &contact.notes {
        out.push_str(&format!("\nNotes :\n{}\n", notes));
    }
    out.push_str(&format!("\nFormulaire de devis : {}\n", link));
    out
}

/// Writes the selected lines plus the totals rows as CSV, euro amounts as
/// plain decimals for spreadsheet import.
pub fn write_quote_csv<W: Write>(form: &QuoteForm<'_>, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["section", "option", "quantite", "prix_unitaire", "total_ligne"])?;

    for section in form.catalog().sections() {
        for item in &section.items {
            let quantity = form.quantity(&item.id)?;
            if quantity == 0 {
                continue;
            }
            csv.write_record([
                section.title.clone(),
                item.label.clone(),
                quantity.to_string(),
                format!("{:.2}", item.unit_price.as_euros()),
                format!("{:.2}", (item.unit_price * quantity).as_euros()),
            ])?;
        }
    }

    let totals = form.totals();
    csv.write_record([
        String::new(),
        "Tarif".to_string(),
        String::new(),
        String::new(),
        format!("{:.2}", totals.subtotal.as_euros()),
    ])?;
    csv.write_record([
        String::new(),
        format!("Tarif + {}%", totals.markup_percent),
        String::new(),
        String::new(),
        format!("{:.2}", totals.total_with_markup.as_euros()),
    ])?;
    csv.flush()?;
    Ok(())
}

/// CSV export to a file path.
pub fn export_quote_csv(form: &QuoteForm<'_>, path: &str) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_quote_csv(form, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::quote::QuoteForm;
    use crate::domain::model::{Catalog, CatalogItem, Section};
    use crate::domain::money::Eur;

    fn test_catalog() -> Catalog {
        Catalog::new(
            vec![
                Section {
                    id: "housse".to_string(),
                    title: "Housse".to_string(),
                    items: vec![
                        CatalogItem {
                            id: "housse-simple".to_string(),
                            label: "Housse simple monobloc".to_string(),
                            unit_price: Eur::from_cents(14000),
                        },
                        CatalogItem {
                            id: "passepoil".to_string(),
                            label: "Passepoil / liseré".to_string(),
                            unit_price: Eur::from_cents(2000),
                        },
                    ],
                },
                Section {
                    id: "customisations".to_string(),
                    title: "Customisations".to_string(),
                    items: vec![CatalogItem {
                        id: "broderie".to_string(),
                        label: "Broderie".to_string(),
                        unit_price: Eur::from_cents(3000),
                    }],
                },
            ],
            0.10,
        )
        .unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
    }

    #[test]
    fn test_quote_comment_groups_by_section() {
        let catalog = test_catalog();
        let mut form = QuoteForm::new(&catalog);
        form.set_quantity("housse-simple", 2).unwrap();
        form.set_quantity("broderie", 1).unwrap();

        let text = quote_comment_at(&form, date());

        assert!(text.starts_with("**Devis du 06/08/2026**\n"));
        assert!(text.contains("**Housse**"));
        assert!(text.contains("- Housse simple monobloc : 2 × 140,00 € = 280,00 €"));
        assert!(text.contains("**Customisations**"));
        assert!(text.contains("- Broderie : 1 × 30,00 € = 30,00 €"));
        assert!(text.contains("Tarif : 310,00 €"));
        assert!(text.contains("Tarif + 10% : 341,00 €"));
    }

    #[test]
    fn test_quote_comment_skips_untouched_sections_and_lines() {
        let catalog = test_catalog();
        let mut form = QuoteForm::new(&catalog);
        form.set_quantity("passepoil", 1).unwrap();

        let text = quote_comment_at(&form, date());

        assert!(text.contains("**Housse**"));
        assert!(!text.contains("Customisations"));
        assert!(!text.contains("Housse simple monobloc"));
        assert!(text.contains("- Passepoil / liseré : 1 × 20,00 € = 20,00 €"));
    }

    #[test]
    fn test_empty_quote_still_renders_totals() {
        let catalog = test_catalog();
        let form = QuoteForm::new(&catalog);

        let text = quote_comment_at(&form, date());
        assert!(text.contains("Tarif : 0,00 €"));
        assert!(text.contains("Tarif + 10% : 0,00 €"));
    }

    #[test]
    fn test_form_link_carries_card_id() {
        let link = form_link("https://example.com/devis", "abc123").unwrap();
        assert_eq!(link.as_str(), "https://example.com/devis?trelloId=abc123");

        // existing query parameters survive
        let link = form_link("https://example.com/devis?lang=fr", "abc123").unwrap();
        assert_eq!(
            link.as_str(),
            "https://example.com/devis?lang=fr&trelloId=abc123"
        );

        assert!(form_link("pas-une-url", "abc123").is_err());
    }

    #[test]
    fn test_client_card_name_and_description() {
        let contact = ContactRequest {
            nom: "Jean Dupont".to_string(),
            telephone: Some("06 12 34 56 78".to_string()),
            email: None,
            moto: Some("Bonneville T120".to_string()),
            notes: Some("Selle d'origine très abîmée".to_string()),
        };

        assert_eq!(client_card_name(&contact), "Jean Dupont — Bonneville T120");

        let link = form_link("https://example.com/devis", "abc123").unwrap();
        let desc = client_card_description(&contact, &link);

        assert!(desc.contains("Nom : Jean Dupont"));
        assert!(desc.contains("Téléphone : 06 12 34 56 78"));
        assert!(!desc.contains("Email"));
        assert!(desc.contains("Moto : Bonneville T120"));
        assert!(desc.contains("Selle d'origine très abîmée"));
        assert!(desc.contains("https://example.com/devis?trelloId=abc123"));
    }

    #[test]
    fn test_card_name_without_moto() {
        let contact = ContactRequest {
            nom: "Jean Dupont".to_string(),
            ..Default::default()
        };
        assert_eq!(client_card_name(&contact), "Jean Dupont");
    }

    #[test]
    fn test_csv_export() {
        let catalog = test_catalog();
        let mut form = QuoteForm::new(&catalog);
        form.set_quantity("housse-simple", 2).unwrap();
        form.set_quantity("broderie", 1).unwrap();

        let mut buffer = Vec::new();
        write_quote_csv(&form, &mut buffer).unwrap();
        let csv_text = String::from_utf8(buffer).unwrap();

        let lines: Vec<&str> = csv_text.trim_end().split('\n').collect();
        assert_eq!(
            lines[0],
            "section,option,quantite,prix_unitaire,total_ligne"
        );
        assert_eq!(lines[1], "Housse,Housse simple monobloc,2,140.00,280.00");
        assert_eq!(lines[2], "Customisations,Broderie,1,30.00,30.00");
        assert_eq!(lines[3], ",Tarif,,,310.00");
        assert_eq!(lines[4], ",Tarif + 10%,,,341.00");
    }
}
