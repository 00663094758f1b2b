//! Session-local ingredient list edited on the matcher screen.
//!
//! Entries merge on `(name, unit)`: adding an ingredient that is already
//! present sums the quantities instead of creating a second row.

use crate::error::ValidationError;
use crate::models::{EntryId, IngredientEntry, Unit};
use crate::utils::parse_quantity;
use log::debug;

/// Check an entry the way [`IngredientList::add`] will.
pub fn validate_entry(name: &str, quantity: f64) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(ValidationError::NonPositiveQuantity);
    }
    Ok(())
}

/// Read the add-ingredient form: the name is checked before the quantity.
pub fn parse_entry(name: &str, quantity_text: &str) -> Result<f64, ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    let quantity = parse_quantity(quantity_text)?;
    validate_entry(name, quantity)?;
    Ok(quantity)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngredientList {
    entries: Vec<IngredientEntry>,
    next_id: EntryId,
}

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[IngredientEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn fresh_id(&mut self) -> EntryId {
        self.next_id += 1;
        self.next_id
    }

    /// Add `quantity` of `name`, merging into an entry with the same name and unit.
    ///
    /// Returns the id of the entry that now holds the quantity.
    pub fn add(&mut self, name: &str, quantity: f64, unit: Unit) -> Result<EntryId, ValidationError> {
        validate_entry(name, quantity)?;
        let name = name.trim();

        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|e| e.ingredient_name == name && e.unit == unit)
        {
            existing.quantity += quantity;
            debug!("merged {} {} into {}", quantity, unit, name);
            return Ok(existing.id);
        }

        let id = self.fresh_id();
        self.entries.push(IngredientEntry {
            id,
            ingredient_name: name.to_string(),
            quantity,
            unit,
        });
        Ok(id)
    }

    /// Add one piece of `name`. Merges by name alone, whatever unit the
    /// existing entry uses.
    pub fn quick_add(&mut self, name: &str) -> EntryId {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.ingredient_name == name) {
            existing.quantity += 1.0;
            return existing.id;
        }

        let id = self.fresh_id();
        self.entries.push(IngredientEntry {
            id,
            ingredient_name: name.to_string(),
            quantity: 1.0,
            unit: Unit::Pcs,
        });
        id
    }

    pub fn remove(&mut self, id: EntryId) {
        self.entries.retain(|e| e.id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_reports_missing_name_before_quantity() {
        assert_eq!(parse_entry("", ""), Err(ValidationError::EmptyName));
        assert_eq!(parse_entry("  ", "abc"), Err(ValidationError::EmptyName));
        assert_eq!(parse_entry("egg", ""), Err(ValidationError::EmptyField("Quantity")));
        assert_eq!(parse_entry("egg", "0"), Err(ValidationError::NonPositiveQuantity));
        assert_eq!(parse_entry("egg", " 2 "), Ok(2.0));
    }

    #[test]
    fn same_name_and_unit_merges() {
        let mut list = IngredientList::new();
        let a = list.add("tomato", 2.0, Unit::Pcs).unwrap();
        let b = list.add("tomato", 3.0, Unit::Pcs).unwrap();
        assert_eq!(a, b);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].quantity, 5.0);
    }

    #[test]
    fn different_unit_is_a_separate_entry() {
        let mut list = IngredientList::new();
        list.add("flour", 200.0, Unit::G).unwrap();
        list.add("flour", 1.0, Unit::Kg).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn invalid_input_leaves_list_unchanged() {
        let mut list = IngredientList::new();
        list.add("rice", 1.0, Unit::Kg).unwrap();
        let before = list.clone();

        assert_eq!(list.add("", 2.0, Unit::Pcs), Err(ValidationError::EmptyName));
        assert_eq!(list.add("   ", 2.0, Unit::Pcs), Err(ValidationError::EmptyName));
        assert_eq!(
            list.add("tomato", 0.0, Unit::Pcs),
            Err(ValidationError::NonPositiveQuantity)
        );
        assert_eq!(
            list.add("tomato", -2.0, Unit::Pcs),
            Err(ValidationError::NonPositiveQuantity)
        );
        assert_eq!(list, before);
    }

    #[test]
    fn names_are_trimmed_before_merging() {
        let mut list = IngredientList::new();
        list.add(" basil ", 1.0, Unit::G).unwrap();
        list.add("basil", 1.0, Unit::G).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].ingredient_name, "basil");
    }

    #[test]
    fn quick_add_twice_counts_pieces() {
        let mut list = IngredientList::new();
        list.quick_add("egg");
        list.quick_add("egg");
        assert_eq!(list.len(), 1);
        let egg = &list.entries()[0];
        assert_eq!(egg.ingredient_name, "egg");
        assert_eq!(egg.quantity, 2.0);
        assert_eq!(egg.unit, Unit::Pcs);
    }

    #[test]
    fn quick_add_merges_by_name_only() {
        let mut list = IngredientList::new();
        list.add("cheese", 100.0, Unit::G).unwrap();
        list.quick_add("cheese");
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].quantity, 101.0);
        assert_eq!(list.entries()[0].unit, Unit::G);
    }

    #[test]
    fn remove_and_clear() {
        let mut list = IngredientList::new();
        let onion = list.quick_add("onion");
        list.quick_add("garlic");
        list.remove(onion);
        list.remove(999);
        assert_eq!(list.len(), 1);
        assert_eq!(list.entries()[0].ingredient_name, "garlic");

        list.clear();
        assert!(list.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let mut list = IngredientList::new();
        let first = list.quick_add("rice");
        list.remove(first);
        let second = list.quick_add("rice");
        assert_ne!(first, second);
    }
}
