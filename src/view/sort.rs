//! Stable sort by one field.

use std::cmp::Ordering;

use super::field::FieldValue;
use super::state::{SortDirection, SortSpec};
use crate::domain::Entity;

/// Three-way comparison on the sort field, flipped for descending
pub fn compare<T: Entity>(a: &T, b: &T, spec: &SortSpec) -> Ordering {
    directed(a.field(&spec.field).total_cmp(&b.field(&spec.field)), spec.direction)
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Sort in place. Equal keys keep their input order in both directions.
pub fn sort_stable<T: Entity>(items: &mut Vec<&T>, spec: &SortSpec) {
    // Read each key once; `sort_by` is a stable merge sort.
    let mut keyed: Vec<(FieldValue, &T)> = items
        .iter()
        .map(|item| (item.field(&spec.field), *item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| directed(a.total_cmp(b), spec.direction));
    *items = keyed.into_iter().map(|(_, item)| item).collect();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityId;

    struct Row {
        id: &'static str,
        stock: Option<i64>,
    }

    impl Entity for Row {
        fn id(&self) -> EntityId {
            EntityId::from(self.id)
        }

        fn field(&self, name: &str) -> FieldValue {
            match name {
                "stock" => self.stock.into(),
                _ => FieldValue::Null,
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "a", stock: Some(5) },
            Row { id: "b", stock: Some(0) },
            Row { id: "c", stock: Some(7) },
            Row { id: "d", stock: Some(0) },
            Row { id: "e", stock: Some(2) },
        ]
    }

    fn order(items: &[&Row]) -> Vec<&'static str> {
        items.iter().map(|r| r.id).collect()
    }

    #[test]
    fn ascending_keeps_ties_in_input_order() {
        let data = rows();
        let mut items: Vec<&Row> = data.iter().collect();
        sort_stable(&mut items, &SortSpec::asc("stock"));
        assert_eq!(order(&items), vec!["b", "d", "e", "a", "c"]);
    }

    #[test]
    fn descending_keeps_ties_in_input_order() {
        let data = rows();
        let mut items: Vec<&Row> = data.iter().collect();
        sort_stable(&mut items, &SortSpec::desc("stock"));
        assert_eq!(order(&items), vec!["c", "a", "e", "b", "d"]);
    }

    #[test]
    fn nulls_sort_smallest() {
        let data = vec![
            Row { id: "x", stock: Some(1) },
            Row { id: "y", stock: None },
        ];
        let mut items: Vec<&Row> = data.iter().collect();
        sort_stable(&mut items, &SortSpec::asc("stock"));
        assert_eq!(order(&items), vec!["y", "x"]);
        assert_eq!(compare(&data[1], &data[0], &SortSpec::desc("stock")), Ordering::Greater);
    }

    #[test]
    fn unknown_field_leaves_order_untouched() {
        let data = rows();
        let mut items: Vec<&Row> = data.iter().collect();
        sort_stable(&mut items, &SortSpec::desc("nope"));
        assert_eq!(order(&items), vec!["a", "b", "c", "d", "e"]);
    }
}
