use crate::domain::money::Eur;
use crate::utils::error::{DevisError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use std::collections::HashSet;

/// One priced option of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub id: String,
    pub label: String,
    pub unit_price: Eur,
}

/// An ordered group of options (Housse, Confort, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub items: Vec<CatalogItem>,
}

/// The static price list: ordered sections of ordered items plus the markup
/// applied on top of the subtotal. Loaded once, never mutated.
#[derive(Debug, Clone)]
pub struct Catalog {
    sections: Vec<Section>,
    markup_rate: f64,
}

impl Catalog {
    pub fn new(sections: Vec<Section>, markup_rate: f64) -> Result<Self> {
        validate_range("catalog.markup_rate", markup_rate, 0.0, 1.0)?;

        let mut seen = HashSet::new();
        for section in &sections {
            validate_non_empty_string("section.id", &section.id)?;
            validate_non_empty_string("section.title", &section.title)?;
            for item in &section.items {
                validate_non_empty_string("item.id", &item.id)?;
                validate_non_empty_string("item.label", &item.label)?;
                if item.unit_price.cents() < 0 {
                    return Err(DevisError::InvalidConfigValueError {
                        field: format!("item.{}.price", item.id),
                        value: item.unit_price.to_string(),
                        reason: "Unit price cannot be negative".to_string(),
                    });
                }
                if !seen.insert(item.id.clone()) {
                    return Err(DevisError::ConfigValidationError {
                        field: "catalog".to_string(),
                        message: format!("Duplicate item id: {}", item.id),
                    });
                }
            }
        }

        Ok(Self {
            sections,
            markup_rate,
        })
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn markup_rate(&self) -> f64 {
        self.markup_rate
    }

    /// Markup as a whole percentage for display ("Tarif + 10%").
    pub fn markup_percent(&self) -> i64 {
        (self.markup_rate * 100.0).round() as i64
    }

    pub fn item(&self, id: &str) -> Option<&CatalogItem> {
        self.sections
            .iter()
            .flat_map(|s| s.items.iter())
            .find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.item(id).is_some()
    }

    pub fn item_count(&self) -> usize {
        self.sections.iter().map(|s| s.items.len()).sum()
    }
}

/// Contact form used to open a card for a new client.
#[derive(Debug, Clone, Default)]
pub struct ContactRequest {
    pub nom: String,
    pub telephone: Option<String>,
    pub email: Option<String>,
    pub moto: Option<String>,
    pub notes: Option<String>,
}

impl Validate for ContactRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("contact.nom", &self.nom)
    }
}
