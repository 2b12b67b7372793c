//! Table - Column Definitions and Text Rendering
//!
//! Columns describe how one record becomes a row of cells. The renderer lays
//! a [`DerivedView`] out as fixed-width text for the terminal.

use crate::constants::TEXT_COLUMN_WIDTH;
use crate::domain::Entity;
use crate::i18n::{Locale, t};
use crate::utils::format::{format_currency, format_decimal, format_field, format_number, truncate};
use crate::view::{DerivedView, SortSpec, Stats};

/// How wide a column renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Fixed width in characters
    Fixed(usize),
    /// The default text width
    Flex,
}

impl ColumnWidth {
    fn chars(self) -> usize {
        match self {
            ColumnWidth::Fixed(n) => n.max(1),
            ColumnWidth::Flex => TEXT_COLUMN_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

type CellFn<R> = Box<dyn Fn(&R, Locale) -> String + Send + Sync>;

/// Column definition for a list table
pub struct Column<R> {
    /// Field the column shows and sorts by
    pub id: &'static str,
    /// Translation key for the header
    pub label_key: &'static str,
    pub width: ColumnWidth,
    pub align: Align,
    pub sortable: bool,
    render: CellFn<R>,
}

impl<R: Entity + 'static> Column<R> {
    /// Column rendering the field through the generic formatter
    pub fn field(id: &'static str, label_key: &'static str) -> Self {
        Self::new(id, label_key, move |row: &R, locale| format_field(&row.field(id), locale))
    }

    /// Field formatted as pesos
    pub fn currency(id: &'static str, label_key: &'static str) -> Self {
        Self::new(id, label_key, move |row: &R, locale| {
            row.field(id)
                .as_f64()
                .map(|v| format_currency(v, locale))
                .unwrap_or_else(|| "-".to_string())
        })
        .align_right()
    }
}

impl<R> Column<R> {
    pub fn new(
        id: &'static str,
        label_key: &'static str,
        render: impl Fn(&R, Locale) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            label_key,
            width: ColumnWidth::Flex,
            align: Align::Left,
            sortable: true,
            render: Box::new(render),
        }
    }

    pub fn fixed_width(mut self, width: usize) -> Self {
        self.width = ColumnWidth::Fixed(width);
        self
    }

    pub fn align_right(mut self) -> Self {
        self.align = Align::Right;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn render_cell(&self, row: &R, locale: Locale) -> String {
        (self.render)(row, locale)
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    let text = truncate(text, width);
    match align {
        Align::Left => format!("{text:<width$}"),
        Align::Right => format!("{text:>width$}"),
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Header label with the sort arrow when this column is the sort key
fn header_label(column: &impl ColumnHeader, sort: Option<&SortSpec>, locale: Locale) -> String {
    let label = t(locale, column.label_key());
    match sort {
        Some(spec) if spec.field == column.field() => format!("{label} {}", spec.direction.arrow()),
        _ => label.to_string(),
    }
}

trait ColumnHeader {
    fn field(&self) -> &str;
    fn label_key(&self) -> &str;
}

impl<R> ColumnHeader for Column<R> {
    fn field(&self) -> &str {
        self.id
    }

    fn label_key(&self) -> &str {
        self.label_key
    }
}

/// Render the current page as a text table with a selection column
pub fn render_table<R: Entity>(
    columns: &[Column<R>],
    view: &DerivedView<'_, R>,
    sort: Option<&SortSpec>,
    locale: Locale,
) -> String {
    let mut out = String::new();

    let header: Vec<String> = columns
        .iter()
        .map(|c| pad(&header_label(c, sort, locale), c.width.chars(), c.align))
        .collect();
    out.push_str(checkbox(view.all_visible_selected));
    out.push(' ');
    out.push_str(header.join(" | ").trim_end());
    out.push('\n');

    let rule_len: usize = columns.iter().map(|c| c.width.chars() + 3).sum::<usize>() + 1;
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    if view.page_items.is_empty() {
        out.push_str(t(locale, "table-no-data"));
        out.push('\n');
        return out;
    }

    for row in &view.page_items {
        let selected = view.selected.contains(&row.id());
        let cells: Vec<String> = columns
            .iter()
            .map(|c| pad(&c.render_cell(row, locale), c.width.chars(), c.align))
            .collect();
        out.push_str(checkbox(selected));
        out.push(' ');
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
    }

    out
}

/// How a stat value is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatFormat {
    #[default]
    Count,
    Currency,
    Decimal,
}

impl StatFormat {
    pub fn apply(self, value: f64, locale: Locale) -> String {
        match self {
            StatFormat::Count => format_number(value.round() as i64, locale),
            StatFormat::Currency => format_currency(value, locale),
            StatFormat::Decimal => format_decimal(value, 2, locale),
        }
    }
}

/// Translation key for a stat name; group stats `a.b` map to `stat-a-b`
pub fn stat_label_key(name: &str) -> String {
    format!("stat-{}", name.replace('.', "-"))
}

/// Summary cards as `label: value` lines
pub fn render_stats(stats: &Stats, format: impl Fn(&str) -> StatFormat, locale: Locale) -> String {
    let mut out = String::new();
    for (name, value) in stats.iter() {
        let key = stat_label_key(name);
        out.push_str(&format!("{}: {}\n", t(locale, &key), format(name).apply(value, locale)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityId;
    use crate::view::{FieldValue, ViewConfig, ViewState, derive_view};

    #[derive(Debug)]
    struct Tool {
        id: &'static str,
        name: &'static str,
        price: f64,
    }

    impl Entity for Tool {
        fn id(&self) -> EntityId {
            EntityId::from(self.id)
        }

        fn field(&self, name: &str) -> FieldValue {
            match name {
                "name" => self.name.into(),
                "price" => self.price.into(),
                _ => FieldValue::Null,
            }
        }
    }

    fn tools() -> Vec<Tool> {
        vec![
            Tool { id: "1", name: "Martillo", price: 32_000.0 },
            Tool { id: "2", name: "Alicate", price: 18_500.0 },
        ]
    }

    fn columns() -> Vec<Column<Tool>> {
        vec![
            Column::field("name", "col-name").fixed_width(10),
            Column::currency("price", "col-price").fixed_width(9),
        ]
    }

    #[test]
    fn renders_rows_selection_and_sort_arrow() {
        let tools = tools();
        let config = ViewConfig::new();
        let mut state = ViewState::default();
        state.toggle_sort("name");
        state.toggle_selection(EntityId::from("2"));

        let view = derive_view(&tools, &state, &config);
        let text = render_table(&columns(), &view, state.sort.as_ref(), Locale::Es);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("[ ] Nombre ↑"));
        assert!(lines[2].starts_with("[x] Alicate"));
        assert!(lines[2].ends_with("$18.500"));
        assert!(lines[3].starts_with("[ ] Martillo"));
    }

    #[test]
    fn empty_page_says_no_data() {
        let tools: Vec<Tool> = Vec::new();
        let view = derive_view(&tools, &ViewState::default(), &ViewConfig::new());
        let text = render_table(&columns(), &view, None, Locale::En);
        assert!(text.ends_with("No data\n"));
    }

    #[test]
    fn stat_keys_flatten_groups() {
        assert_eq!(stat_label_key("segment.frecuente"), "stat-segment-frecuente");
        assert_eq!(StatFormat::Currency.apply(1500.0, Locale::En), "$1,500");
    }
}
