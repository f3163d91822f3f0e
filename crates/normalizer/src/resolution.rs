use core_types::CanonicalField;
use serde::Serialize;
use std::collections::BTreeMap;

/// Where a bound column came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnSource {
    /// A column present in the input.
    Input,
    /// A column synthesized from other resolved fields.
    Derived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Binding {
    column: String,
    source: ColumnSource,
}

/// Binding from canonical field to the column that holds it.
///
/// A field is present only if an input column matched one of its aliases or it
/// was successfully derived. The map is only extended by the derivation steps
/// of this crate; callers get a read-only view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolutionMap {
    bindings: BTreeMap<CanonicalField, Binding>,
}

impl ResolutionMap {
    pub fn column(&self, field: CanonicalField) -> Option<&str> {
        self.bindings.get(&field).map(|b| b.column.as_str())
    }

    pub fn contains(&self, field: CanonicalField) -> bool {
        self.bindings.contains_key(&field)
    }

    pub fn source(&self, field: CanonicalField) -> Option<ColumnSource> {
        self.bindings.get(&field).map(|b| b.source)
    }

    pub fn is_derived(&self, field: CanonicalField) -> bool {
        self.source(field) == Some(ColumnSource::Derived)
    }

    /// Bound fields in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> + '_ {
        self.bindings.iter().map(|(f, b)| (*f, b.column.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Canonical fields with no binding.
    pub fn unresolved(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|f| !self.contains(*f))
            .collect()
    }

    pub(crate) fn bind_derived(&mut self, field: CanonicalField, column: &str) {
        self.bindings.insert(
            field,
            Binding {
                column: column.to_string(),
                source: ColumnSource::Derived,
            },
        );
    }
}

/// Binds each canonical field to the first of its aliases present in `columns`.
///
/// Fields with no matching alias are simply absent.
pub fn resolve(columns: &[String]) -> ResolutionMap {
    let mut map = ResolutionMap::default();
    for field in CanonicalField::ALL {
        let hit = field
            .aliases()
            .iter()
            .find(|alias| columns.iter().any(|c| c.as_str() == **alias));
        if let Some(alias) = hit {
            map.bindings.insert(
                field,
                Binding {
                    column: (*alias).to_string(),
                    source: ColumnSource::Input,
                },
            );
        }
    }
    tracing::debug!(resolved = map.len(), "Resolved canonical columns");
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn alias_priority_beats_column_order() {
        let map = resolve(&cols(&["profit", "pnl"]));
        assert_eq!(map.column(CanonicalField::Pnl), Some("pnl"));
    }

    #[test]
    fn unmatched_fields_are_absent() {
        let map = resolve(&cols(&["qty", "symbol", "whatever"]));
        assert_eq!(map.column(CanonicalField::Quantity), Some("qty"));
        assert_eq!(map.column(CanonicalField::Market), Some("symbol"));
        assert!(!map.contains(CanonicalField::Pnl));
        assert_eq!(map.len(), 2);
        assert_eq!(map.source(CanonicalField::Market), Some(ColumnSource::Input));
    }

    #[test]
    fn resolution_is_deterministic() {
        let c = cols(&["sl", "tp", "entry_price", "exit"]);
        assert_eq!(resolve(&c), resolve(&c));
    }

    #[test]
    fn derived_binding_is_flagged() {
        let mut map = resolve(&cols(&["entry"]));
        map.bind_derived(CanonicalField::Quantity, "_quantity_fallback");
        assert!(map.is_derived(CanonicalField::Quantity));
        assert!(!map.is_derived(CanonicalField::Entry));
    }

    #[test]
    fn unresolved_lists_the_remaining_fields() {
        let map = resolve(&cols(&["pnl", "date"]));
        let missing = map.unresolved();
        assert_eq!(missing.len(), CanonicalField::ALL.len() - 2);
        assert!(!missing.contains(&CanonicalField::Pnl));
        assert!(missing.contains(&CanonicalField::Market));
    }

    #[test]
    fn serializes_as_a_flat_field_map() {
        let mut map = resolve(&cols(&["profit"]));
        map.bind_derived(CanonicalField::Quantity, "_quantity_fallback");
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "pnl": { "column": "profit", "source": "input" },
                "quantity": { "column": "_quantity_fallback", "source": "derived" },
            })
        );
    }
}
