use crate::domain::model::{Catalog, CatalogItem};
use crate::domain::money::Eur;
use crate::utils::error::{DevisError, Result};
use std::collections::HashMap;

/// One priced row of the quote: a catalog item, its quantity, and the
/// resulting line total.
#[derive(Debug, Clone)]
pub struct QuoteLine<'a> {
    pub item: &'a CatalogItem,
    pub quantity: u32,
    pub line_total: Eur,
}

/// Derived amounts. Computed on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Eur,
    pub total_with_markup: Eur,
    pub markup_percent: i64,
}

/// The quote under construction: a quantity per catalog item, zero for
/// everything at the start. Mutations address items by id and reject ids
/// the catalog does not know.
#[derive(Debug, Clone)]
pub struct QuoteForm<'a> {
    catalog: &'a Catalog,
    quantities: HashMap<String, u32>,
}

impl<'a> QuoteForm<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        let quantities = catalog
            .sections()
            .iter()
            .flat_map(|s| s.items.iter())
            .map(|item| (item.id.clone(), 0))
            .collect();
        Self {
            catalog,
            quantities,
        }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn quantity(&self, id: &str) -> Result<u32> {
        self.quantities
            .get(id)
            .copied()
            .ok_or_else(|| DevisError::UnknownItem { id: id.to_string() })
    }

    /// Checkbox semantics: any positive quantity flips back to zero, zero
    /// flips to one.
    pub fn toggle(&mut self, id: &str) -> Result<u32> {
        let current = self.quantity(id)?;
        let next = if current > 0 { 0 } else { 1 };
        self.quantities.insert(id.to_string(), next);
        Ok(next)
    }

    /// Direct entry: negative values clamp to zero, no upper bound.
    pub fn set_quantity(&mut self, id: &str, value: i64) -> Result<u32> {
        self.quantity(id)?;
        let next = value.max(0) as u32;
        self.quantities.insert(id.to_string(), next);
        Ok(next)
    }

    /// Stepper semantics: from zero any positive step lands on one;
    /// otherwise the delta applies, clamped at zero.
    pub fn adjust(&mut self, id: &str, delta: i64) -> Result<u32> {
        let current = self.quantity(id)?;
        let next = if current == 0 && delta > 0 {
            1
        } else {
            (i64::from(current) + delta).max(0) as u32
        };
        self.quantities.insert(id.to_string(), next);
        Ok(next)
    }

    /// Applies `id=qty` entries from the command line.
    pub fn apply_selection(&mut self, entries: &[String]) -> Result<()> {
        for entry in entries {
            let (id, raw_qty) =
                entry
                    .split_once('=')
                    .ok_or_else(|| DevisError::ValidationError {
                        message: format!(
                            "Sélection invalide « {} » (format attendu : id=quantité)",
                            entry
                        ),
                    })?;
            let qty: i64 = raw_qty
                .trim()
                .parse()
                .map_err(|_| DevisError::ValidationError {
                    message: format!("Quantité invalide « {} » pour « {} »", raw_qty, id),
                })?;
            self.set_quantity(id.trim(), qty)?;
        }
        Ok(())
    }

    /// Every catalog item in declaration order, priced at its current
    /// quantity.
    pub fn lines(&self) -> Vec<QuoteLine<'a>> {
        self.catalog
            .sections()
            .iter()
            .flat_map(|s| s.items.iter())
            .map(|item| {
                let quantity = self.quantities.get(&item.id).copied().unwrap_or(0);
                QuoteLine {
                    item,
                    quantity,
                    line_total: item.unit_price * quantity,
                }
            })
            .collect()
    }

    /// Only the lines with a positive quantity, still in catalog order.
    pub fn selected_lines(&self) -> Vec<QuoteLine<'a>> {
        self.lines()
            .into_iter()
            .filter(|line| line.quantity > 0)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.values().all(|q| *q == 0)
    }

    pub fn totals(&self) -> Totals {
        let subtotal: Eur = self.lines().into_iter().map(|line| line.line_total).sum();
        Totals {
            subtotal,
            total_with_markup: subtotal.with_markup(self.catalog.markup_rate()),
            markup_percent: self.catalog.markup_percent(),
        }
    }
}
