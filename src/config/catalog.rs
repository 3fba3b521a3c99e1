use crate::domain::model::{Catalog, CatalogItem, Section};
use crate::domain::money::Eur;
use crate::utils::error::{DevisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The atelier's price list shipped with the binary; used when no catalog
/// file is passed on the command line.
const DEFAULT_CATALOG: &str = include_str!("catalog.default.toml");

/// Raw catalog file, before invariants are checked. Prices are written in
/// euros; the domain `Catalog` holds cents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub markup_rate: f64,
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionConfig {
    pub id: String,
    pub title: String,
    pub items: Vec<ItemConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    pub id: String,
    pub label: String,
    pub price: f64,
}

impl CatalogConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DevisError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DevisError::ConfigValidationError {
            field: "catalog".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// The bundled price list. A parse failure here is a packaging bug, so
    /// it surfaces as a config error like any other catalog.
    pub fn bundled() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CATALOG)
    }

    /// Checks the invariants (finite non-negative prices, unique ids, markup
    /// within [0, 1]) and produces the immutable domain catalog.
    pub fn into_catalog(self) -> Result<Catalog> {
        let mut sections = Vec::with_capacity(self.sections.len());
        for section in self.sections {
            let mut items = Vec::with_capacity(section.items.len());
            for item in section.items {
                if !item.price.is_finite() || item.price < 0.0 {
                    return Err(DevisError::InvalidConfigValueError {
                        field: format!("sections.{}.items.{}.price", section.id, item.id),
                        value: item.price.to_string(),
                        reason: "Price must be a non-negative amount in euros".to_string(),
                    });
                }
                items.push(CatalogItem {
                    id: item.id,
                    label: item.label,
                    unit_price: Eur::from_euros(item.price),
                });
            }
            sections.push(Section {
                id: section.id,
                title: section.title,
                items,
            });
        }
        Catalog::new(sections, self.markup_rate)
    }
}

/// Loads the catalog from a file when a path is given, the bundled price
/// list otherwise.
pub fn load_catalog(path: Option<&str>) -> Result<Catalog> {
    let config = match path {
        Some(path) => {
            tracing::debug!("Loading catalog from {}", path);
            CatalogConfig::from_file(path)?
        }
        None => {
            tracing::debug!("Using bundled catalog");
            CatalogConfig::bundled()?
        }
    };
    config.into_catalog()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_catalog() {
        let toml_content = r#"
markup_rate = 0.1

[[sections]]
id = "housse"
title = "Housse"

[[sections.items]]
id = "housse-simple"
label = "Housse simple monobloc"
price = 140

[[sections.items]]
id = "passepoil"
label = "Passepoil / liseré"
price = 19.5
"#;

        let catalog = CatalogConfig::from_toml_str(toml_content)
            .unwrap()
            .into_catalog()
            .unwrap();

        assert_eq!(catalog.item_count(), 2);
        assert_eq!(catalog.item("housse-simple").unwrap().unit_price.cents(), 14000);
        assert_eq!(catalog.item("passepoil").unwrap().unit_price.cents(), 1950);
        assert_eq!(catalog.markup_percent(), 10);
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let catalog = CatalogConfig::bundled().unwrap().into_catalog().unwrap();

        assert_eq!(catalog.sections().len(), 4);
        assert_eq!(catalog.sections()[0].title, "Housse");
        assert_eq!(catalog.item_count(), 26);
        assert_eq!(
            catalog.item("housse-simple-monobloc").unwrap().unit_price.cents(),
            14000
        );
        assert_eq!(catalog.markup_percent(), 10);
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let toml_content = r#"
markup_rate = 0.1

[[sections]]
id = "housse"
title = "Housse"

[[sections.items]]
id = "housse-simple"
label = "Housse simple"
price = -5
"#;

        let result = CatalogConfig::from_toml_str(toml_content)
            .unwrap()
            .into_catalog();
        assert!(matches!(
            result,
            Err(DevisError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let result = CatalogConfig::from_toml_str("markup_rate = ");
        assert!(matches!(
            result,
            Err(DevisError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_catalog_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        let toml_content = r#"
markup_rate = 0.2

[[sections]]
id = "confort"
title = "Confort"

[[sections.items]]
id = "modif-mousse"
label = "Modification mousse"
price = 45
"#;
        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let catalog = load_catalog(Some(temp_file.path().to_str().unwrap())).unwrap();
        assert_eq!(catalog.markup_percent(), 20);
        assert_eq!(catalog.item("modif-mousse").unwrap().unit_price.cents(), 4500);
    }

    #[test]
    fn test_load_catalog_defaults_to_bundled() {
        let catalog = load_catalog(None).unwrap();
        assert_eq!(catalog.item_count(), 26);
    }
}
