//! Filter predicates: free-text search AND every active field filter.

use std::sync::Arc;

use super::config::ViewConfig;
use super::rules::{Rule, RuleTable};
use super::state::ViewState;
use crate::domain::Entity;

/// `(entity, raw filter value) -> keep?`
pub type FilterFn<T> = Arc<dyn Fn(&T, &str) -> bool + Send + Sync>;

/// Whether `entity` stays visible under the state's search and filters
pub fn matches<T: Entity>(entity: &T, state: &ViewState, config: &ViewConfig<T>) -> bool {
    matches_search(entity, &state.search_text, config.searchable_fields())
        && state.active_filters().all(|(id, value)| match config.filters.get(id) {
            Some(predicate) => predicate(entity, value),
            // Unknown filter ids fail closed
            None => false,
        })
}

/// Case-insensitive substring match over the searchable fields
pub fn matches_search<T: Entity>(entity: &T, search: &str, fields: &[&str]) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| {
        entity
            .field(field)
            .search_text()
            .is_some_and(|text| text.contains(&needle))
    })
}

// ==================== Predicate builders ====================

/// `field == value`
pub fn equals<T: Entity + 'static>(field: &'static str) -> impl Fn(&T, &str) -> bool + Send + Sync + 'static {
    move |entity: &T, value: &str| entity.field(field).matches_input(value)
}

/// `field >= value`, value parsed as a number
pub fn at_least<T: Entity + 'static>(field: &'static str) -> impl Fn(&T, &str) -> bool + Send + Sync + 'static {
    move |entity: &T, value: &str| match value.trim().parse::<f64>() {
        Ok(min) => Rule::AtLeast(min).eval(&entity.field(field)),
        Err(_) => false,
    }
}

/// `field <= value`, value parsed as a number
pub fn at_most<T: Entity + 'static>(field: &'static str) -> impl Fn(&T, &str) -> bool + Send + Sync + 'static {
    move |entity: &T, value: &str| match value.trim().parse::<f64>() {
        Ok(max) => Rule::AtMost(max).eval(&entity.field(field)),
        Err(_) => false,
    }
}

/// Value names a bucket of the rule table
pub fn bucket<T: Entity + 'static>(table: &'static RuleTable) -> impl Fn(&T, &str) -> bool + Send + Sync + 'static {
    move |entity: &T, value: &str| table.matches(value, &entity.field(table.field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityId;
    use crate::view::FieldValue;

    struct Item {
        name: &'static str,
        email: Option<&'static str>,
        qty: i64,
    }

    impl Entity for Item {
        fn id(&self) -> EntityId {
            EntityId::from(self.name)
        }

        fn field(&self, name: &str) -> FieldValue {
            match name {
                "name" => self.name.into(),
                "email" => self.email.into(),
                "qty" => self.qty.into(),
                _ => FieldValue::Null,
            }
        }
    }

    fn config() -> ViewConfig<Item> {
        ViewConfig::new()
            .searchable(&["name", "email"])
            .filter("name", equals("name"))
            .filter("min_qty", at_least("qty"))
            .filter("missing", equals("nope"))
    }

    fn item(name: &'static str, email: Option<&'static str>, qty: i64) -> Item {
        Item { name, email, qty }
    }

    #[test]
    fn empty_search_matches_everything() {
        let state = ViewState::default();
        assert!(matches(&item("Martillo", None, 1), &state, &config()));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut state = ViewState::default();
        state.set_search("MART");
        assert!(matches(&item("martillo", None, 1), &state, &config()));
        state.set_search("ferre.co");
        assert!(matches(&item("x", Some("ana@FERRE.co"), 1), &state, &config()));
        assert!(!matches(&item("x", None, 1), &state, &config()));
    }

    #[test]
    fn filters_are_conjunctive() {
        let mut state = ViewState::default();
        state.set_filter("name", "clavo");
        state.set_filter("min_qty", "5");
        assert!(matches(&item("clavo", None, 9), &state, &config()));
        assert!(!matches(&item("clavo", None, 2), &state, &config()));
        assert!(!matches(&item("tornillo", None, 9), &state, &config()));
    }

    #[test]
    fn absent_field_and_unknown_filter_fail_closed() {
        let mut state = ViewState::default();
        state.set_filter("missing", "x");
        assert!(!matches(&item("a", None, 1), &state, &config()));

        let mut state = ViewState::default();
        state.set_filter("bogus", "x");
        assert!(!matches(&item("a", None, 1), &state, &config()));
    }

    #[test]
    fn unparsable_numeric_filter_matches_nothing() {
        let mut state = ViewState::default();
        state.set_filter("min_qty", "muchos");
        assert!(!matches(&item("a", None, 100), &state, &config()));
    }
}
