//! Summary-card aggregates over the filtered sequence.
//!
//! Every aggregator is an order-independent reduction, so sorting and paging
//! never change the numbers.

use std::collections::BTreeMap;
use std::sync::Arc;

use hashlink::LinkedHashMap;

use super::config::ViewConfig;
use super::rules::Rule;
use crate::domain::Entity;

type ReduceFn<T> = Arc<dyn Fn(&[&T]) -> f64 + Send + Sync>;

/// How one named stat is computed
pub enum Aggregator<T> {
    /// One number
    Single(ReduceFn<T>),
    /// One count per distinct value of a field, emitted as `name.value`
    GroupCount(&'static str),
}

impl<T> Clone for Aggregator<T> {
    fn clone(&self) -> Self {
        match self {
            Aggregator::Single(f) => Aggregator::Single(f.clone()),
            Aggregator::GroupCount(field) => Aggregator::GroupCount(*field),
        }
    }
}

/// Number of filtered entities
pub fn count<T: 'static>() -> Aggregator<T> {
    Aggregator::Single(Arc::new(|items: &[&T]| items.len() as f64))
}

/// Number of filtered entities satisfying `predicate`
pub fn count_where<T: 'static>(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Aggregator<T> {
    Aggregator::Single(Arc::new(move |items: &[&T]| {
        items.iter().filter(|e| predicate(**e)).count() as f64
    }))
}

/// Number of filtered entities whose `field` satisfies `rule`
pub fn count_rule<T: Entity + 'static>(field: &'static str, rule: Rule) -> Aggregator<T> {
    count_where(move |e: &T| rule.eval(&e.field(field)))
}

/// Sum of a numeric field; non-numeric and missing values count as zero
pub fn sum<T: Entity + 'static>(field: &'static str) -> Aggregator<T> {
    sum_by(move |e: &T| e.field(field).as_f64().unwrap_or(0.0))
}

/// Sum of a derived number
pub fn sum_by<T: 'static>(value: impl Fn(&T) -> f64 + Send + Sync + 'static) -> Aggregator<T> {
    Aggregator::Single(Arc::new(move |items: &[&T]| items.iter().map(|e| value(*e)).sum::<f64>()))
}

/// Count per distinct value of `field`
pub fn group_count<T>(field: &'static str) -> Aggregator<T> {
    Aggregator::GroupCount(field)
}

/// Named stats in registration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats(LinkedHashMap<String, f64>);

impl Stats {
    /// Stat value; missing names read as zero
    pub fn get(&self, name: &str) -> f64 {
        self.0.get(name).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert(&mut self, name: String, value: f64) {
        self.0.insert(name, value);
    }
}

/// Run every configured aggregator over `filtered`
pub fn aggregate<T: Entity>(filtered: &[&T], config: &ViewConfig<T>) -> Stats {
    let mut stats = Stats::default();

    for (name, aggregator) in &config.stats {
        match aggregator {
            Aggregator::Single(reduce) => stats.insert((*name).to_string(), reduce(filtered)),
            Aggregator::GroupCount(field) => {
                // BTreeMap keeps group output independent of input order
                let mut groups: BTreeMap<String, f64> = BTreeMap::new();
                for entity in filtered {
                    let value = entity.field(field);
                    if value.is_null() {
                        continue;
                    }
                    *groups.entry(value.to_string()).or_default() += 1.0;
                }
                for (value, n) in groups {
                    stats.insert(format!("{name}.{value}"), n);
                }
            }
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityId;
    use crate::view::FieldValue;

    struct Tool {
        cat: &'static str,
        price: f64,
        stock: i64,
    }

    impl Entity for Tool {
        fn id(&self) -> EntityId {
            EntityId::from(self.cat)
        }

        fn field(&self, name: &str) -> FieldValue {
            match name {
                "cat" => self.cat.into(),
                "price" => self.price.into(),
                "stock" => self.stock.into(),
                _ => FieldValue::Null,
            }
        }
    }

    fn config() -> ViewConfig<Tool> {
        ViewConfig::new()
            .stat("total", count())
            .stat("agotados", count_rule("stock", Rule::AtMost(0.0)))
            .stat("valor", sum_by(|t: &Tool| t.price * t.stock as f64))
            .stat("stock", sum("stock"))
            .stat("cat", group_count("cat"))
    }

    #[test]
    fn aggregates_in_registration_order() {
        let tools = [
            Tool { cat: "manual", price: 10.0, stock: 2 },
            Tool { cat: "electrica", price: 100.0, stock: 0 },
            Tool { cat: "manual", price: 5.0, stock: 4 },
        ];
        let refs: Vec<&Tool> = tools.iter().collect();
        let stats = aggregate(&refs, &config());

        assert_eq!(stats.get("total"), 3.0);
        assert_eq!(stats.get("agotados"), 1.0);
        assert_eq!(stats.get("valor"), 40.0);
        assert_eq!(stats.get("stock"), 6.0);
        assert_eq!(stats.get("cat.manual"), 2.0);
        assert_eq!(stats.get("cat.electrica"), 1.0);

        let names: Vec<&str> = stats.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["total", "agotados", "valor", "stock", "cat.electrica", "cat.manual"]);
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let stats = aggregate::<Tool>(&[], &config());
        assert_eq!(stats.get("total"), 0.0);
        assert_eq!(stats.get("valor"), 0.0);
        assert!(!stats.contains("cat.manual"));
    }
}
