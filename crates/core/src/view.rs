//! The view derivation engine.
//!
//! Every collection page follows the same shape: a live snapshot plus
//! user-controlled view state (search term, sort key and direction,
//! structured filters) yields a deterministic row sequence. This module
//! holds the shared rules; the per-entity field sets live with the entity
//! types.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::Keyed;

// ---------------------------------------------------------------------------
// Sort state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// The active sort column and direction of one table view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortConfig<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: PartialEq> SortConfig<K> {
    /// Column-header click semantics: re-selecting the active key flips
    /// the direction, selecting a new key resets to ascending.
    pub fn select(current: Option<Self>, key: K) -> Self {
        match current {
            Some(config) if config.key == key => Self {
                key,
                direction: config.direction.toggle(),
            },
            _ => Self {
                key,
                direction: SortDirection::Ascending,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Record projections
// ---------------------------------------------------------------------------

/// A comparable projection of one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    /// Compared numerically. Malformed amounts arrive as `NEG_INFINITY`
    /// so they land at one consistent end of the ordering.
    Amount(f64),
    /// Compared case-insensitively.
    Text(String),
}

impl SortValue {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Amount(a), SortValue::Amount(b)) => a.total_cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            // A sort key always projects a single kind; a mixed comparison
            // can only come from a buggy `sort_value` impl.
            (SortValue::Amount(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Amount(_)) => Ordering::Greater,
        }
    }
}

/// A record that can be searched and sorted in a table view.
pub trait ViewRecord {
    type SortKey: Copy + PartialEq;

    /// Case-insensitive substring search over the entity's field set.
    /// `needle` arrives lowercased and non-empty.
    fn matches_search(&self, needle: &str) -> bool;

    /// Project the field named by `key` for ordering.
    fn sort_value(&self, key: Self::SortKey) -> SortValue;
}

/// A structured filter over one entity's records. Inactive filters must
/// accept everything (`Default` instances match all).
pub trait RecordFilter<R> {
    fn accept(&self, record: &R) -> bool;
}

/// Match-all filter for views without structured filtering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unfiltered;

impl<R> RecordFilter<R> for Unfiltered {
    fn accept(&self, _record: &R) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// View state
// ---------------------------------------------------------------------------

/// The user-controlled parameters shaping a derived view. Never mutates
/// the underlying snapshot.
#[derive(Debug, Clone)]
pub struct ViewState<K, F> {
    pub search_term: String,
    pub sort: Option<SortConfig<K>>,
    pub filter: F,
}

impl<K, F: Default> Default for ViewState<K, F> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort: None,
            filter: F::default(),
        }
    }
}

impl<K: Copy + PartialEq, F> ViewState<K, F> {
    /// Apply a column-header click to the sort state.
    pub fn select_sort(&mut self, key: K) {
        self.sort = Some(SortConfig::select(self.sort, key));
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

/// Filter and sort a collection snapshot.
///
/// A record appears iff it matches the free-text search (an empty term
/// matches all) **and** the structured filter. Sorting is stable: records
/// with equal keys keep their snapshot order in both directions.
pub fn derive_rows<'a, R, F>(
    records: &'a [Keyed<R>],
    state: &ViewState<R::SortKey, F>,
) -> Vec<&'a Keyed<R>>
where
    R: ViewRecord,
    F: RecordFilter<R>,
{
    let needle = state.search_term.trim().to_lowercase();
    let mut rows: Vec<&Keyed<R>> = records
        .iter()
        .filter(|keyed| needle.is_empty() || keyed.record.matches_search(&needle))
        .filter(|keyed| state.filter.accept(&keyed.record))
        .collect();

    if let Some(config) = state.sort {
        // Project each key once; the stable sort then never re-derives.
        let mut decorated: Vec<(SortValue, &Keyed<R>)> = rows
            .into_iter()
            .map(|keyed| (keyed.record.sort_value(config.key), keyed))
            .collect();
        decorated.sort_by(|a, b| {
            let ordering = a.0.compare(&b.0);
            match config.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        rows = decorated.into_iter().map(|(_, keyed)| keyed).collect();
    }

    rows
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        label: String,
        amount: f64,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum ItemKey {
        Label,
        Amount,
    }

    impl ViewRecord for Item {
        type SortKey = ItemKey;

        fn matches_search(&self, needle: &str) -> bool {
            self.label.to_lowercase().contains(needle)
        }

        fn sort_value(&self, key: ItemKey) -> SortValue {
            match key {
                ItemKey::Label => SortValue::Text(self.label.clone()),
                ItemKey::Amount => SortValue::Amount(self.amount),
            }
        }
    }

    fn item(id: &str, label: &str, amount: f64) -> Keyed<Item> {
        Keyed::new(
            id,
            Item {
                label: label.to_string(),
                amount,
            },
        )
    }

    fn ids<'a>(rows: &[&'a Keyed<Item>]) -> Vec<&'a str> {
        rows.iter().map(|k| k.id.as_str()).collect()
    }

    // -- SortConfig::select --

    #[test]
    fn selecting_new_key_resets_to_ascending() {
        let config = SortConfig::select(None, ItemKey::Label);
        assert_eq!(config.direction, SortDirection::Ascending);

        let from_other = SortConfig::select(
            Some(SortConfig {
                key: ItemKey::Amount,
                direction: SortDirection::Descending,
            }),
            ItemKey::Label,
        );
        assert_eq!(from_other.key, ItemKey::Label);
        assert_eq!(from_other.direction, SortDirection::Ascending);
    }

    #[test]
    fn reselecting_active_key_flips_direction() {
        let first = SortConfig::select(None, ItemKey::Amount);
        let second = SortConfig::select(Some(first), ItemKey::Amount);
        let third = SortConfig::select(Some(second), ItemKey::Amount);
        assert_eq!(second.direction, SortDirection::Descending);
        assert_eq!(third.direction, SortDirection::Ascending);
    }

    // -- filtering --

    #[test]
    fn empty_search_matches_all() {
        let records = vec![item("a", "Cement", 5.0), item("b", "Bricks", 50.0)];
        let state: ViewState<ItemKey, Unfiltered> = ViewState::default();
        assert_eq!(derive_rows(&records, &state).len(), 2);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let records = vec![item("a", "Cement", 5.0), item("b", "Bricks", 50.0)];
        let state = ViewState::<ItemKey, Unfiltered> {
            search_term: "CEM".to_string(),
            ..ViewState::default()
        };
        assert_eq!(ids(&derive_rows(&records, &state)), vec!["a"]);
    }

    #[test]
    fn search_and_filter_compose_with_and() {
        struct MinAmount(f64);
        impl RecordFilter<Item> for MinAmount {
            fn accept(&self, record: &Item) -> bool {
                record.amount >= self.0
            }
        }

        let records = vec![
            item("a", "Cement", 5.0),
            item("b", "Cement Extra", 50.0),
            item("c", "Bricks", 80.0),
        ];
        let state = ViewState {
            search_term: "cement".to_string(),
            sort: None,
            filter: MinAmount(10.0),
        };
        assert_eq!(ids(&derive_rows(&records, &state)), vec!["b"]);
    }

    // -- sorting --

    #[test]
    fn sort_is_stable_for_equal_keys_both_directions() {
        let records = vec![
            item("a", "x", 10.0),
            item("b", "y", 10.0),
            item("c", "z", 5.0),
        ];
        let mut state: ViewState<ItemKey, Unfiltered> = ViewState::default();

        state.select_sort(ItemKey::Amount);
        assert_eq!(ids(&derive_rows(&records, &state)), vec!["c", "a", "b"]);

        state.select_sort(ItemKey::Amount);
        // Descending still keeps a before b: equal keys preserve snapshot order.
        assert_eq!(ids(&derive_rows(&records, &state)), vec!["a", "b", "c"]);
    }

    #[test]
    fn text_sort_is_case_insensitive() {
        let records = vec![
            item("a", "bricks", 0.0),
            item("b", "Aggregate", 0.0),
            item("c", "Cement", 0.0),
        ];
        let state = ViewState::<ItemKey, Unfiltered> {
            sort: Some(SortConfig {
                key: ItemKey::Label,
                direction: SortDirection::Ascending,
            }),
            ..ViewState::default()
        };
        assert_eq!(ids(&derive_rows(&records, &state)), vec!["b", "a", "c"]);
    }

    #[test]
    fn malformed_amount_sorts_at_the_minimum_end() {
        let records = vec![
            item("a", "x", 100.0),
            item("b", "y", f64::NEG_INFINITY), // projection of an unparseable value
            item("c", "z", 1.0),
        ];
        let mut state: ViewState<ItemKey, Unfiltered> = ViewState::default();

        state.select_sort(ItemKey::Amount);
        assert_eq!(ids(&derive_rows(&records, &state)), vec!["b", "c", "a"]);

        state.select_sort(ItemKey::Amount);
        assert_eq!(ids(&derive_rows(&records, &state)), vec!["a", "c", "b"]);
    }

    #[test]
    fn unsorted_view_preserves_snapshot_order() {
        let records = vec![item("b", "y", 2.0), item("a", "x", 1.0)];
        let state: ViewState<ItemKey, Unfiltered> = ViewState::default();
        assert_eq!(ids(&derive_rows(&records, &state)), vec!["b", "a"]);
    }
}
