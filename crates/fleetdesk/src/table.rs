//! Searchable, filterable, paginated read-only tables.
//!
//! A [`TableView`] owns a row set plus the view state (query, categorical
//! filter, current page). The visible rows are always derived in the same
//! order: filter, then text query, then page slice. Rows keep their
//! input order; there is no sorting.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::trace;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter value that disables the categorical filter.
pub const FILTER_ALL: &str = "all";

/// Text shown for cells without a value.
pub const EMPTY_CELL: &str = "-";

/// A record that can be shown in a table.
pub trait TableRow {
    /// Textual value of the attribute `key`, or `None` if it has no value.
    fn cell(&self, key: &str) -> Option<String>;
}

impl TableRow for std::collections::BTreeMap<String, String> {
    fn cell(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl TableRow for serde_json::Map<String, serde_json::Value> {
    fn cell(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Custom cell renderer.
pub type CellRenderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// One column of a table.
pub struct Column<T> {
    /// Attribute key the column reads.
    pub key: String,
    /// Header label.
    pub header: String,
    renderer: Option<CellRenderer<T>>,
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            header: self.header.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("header", &self.header)
            .field("custom", &self.renderer.is_some())
            .finish()
    }
}

impl<T: TableRow> Column<T> {
    /// Create a column showing the raw attribute value.
    #[must_use]
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            header: header.into(),
            renderer: None,
        }
    }

    /// Replace the default cell text with a custom renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Cell text for `row`.
    #[must_use]
    pub fn render_cell(&self, row: &T) -> String {
        match &self.renderer {
            Some(render) => render(row),
            None => row.cell(&self.key).unwrap_or_else(|| EMPTY_CELL.to_string()),
        }
    }
}

/// Output of [`TableView::render`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTable {
    /// Header labels in column order.
    pub headers: Vec<String>,
    /// Cell text of the current page.
    pub rows: Vec<Vec<String>>,
    /// Current page, 1-based.
    pub page: usize,
    /// Total number of pages.
    pub page_count: usize,
    /// Number of rows after filtering and search.
    pub matched: usize,
}

impl RenderedTable {
    /// The "Page i of n" label.
    #[must_use]
    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page, self.page_count)
    }
}

impl fmt::Display for RenderedTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |f: &mut fmt::Formatter<'_>, cells: &[String]| -> fmt::Result {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            writeln!(f, "{}", padded.join("  ").trim_end())
        };

        line(f, &self.headers)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        line(f, &rule)?;
        if self.rows.is_empty() {
            writeln!(f, "No results.")?;
        }
        for row in &self.rows {
            line(f, row)?;
        }
        write!(f, "{}", self.page_label())
    }
}

/// A table over rows of type `T`.
pub struct TableView<T> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    search_keys: Vec<String>,
    filter_key: Option<String>,
    filter: Option<String>,
    query: String,
    page_size: usize,
    page: usize,
}

impl<T> fmt::Debug for TableView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableView")
            .field("columns", &self.columns)
            .field("rows", &self.rows.len())
            .field("search_keys", &self.search_keys)
            .field("filter_key", &self.filter_key)
            .field("filter", &self.filter)
            .field("query", &self.query)
            .field("page_size", &self.page_size)
            .field("page", &self.page)
            .finish()
    }
}

impl<T: TableRow> TableView<T> {
    /// Create a view over `rows`.
    #[must_use]
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>) -> Self {
        Self {
            columns,
            rows,
            search_keys: Vec::new(),
            filter_key: None,
            filter: None,
            query: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }

    /// Attribute keys the text query searches.
    #[must_use]
    pub fn with_search_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.search_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Rows per page. Zero is treated as one.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.clamp_page();
        self
    }

    /// Enable the categorical filter on `key`.
    #[must_use]
    pub fn with_filter_key(mut self, key: impl Into<String>) -> Self {
        self.filter_key = Some(key.into());
        self
    }

    /// The columns.
    #[must_use]
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Current query text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Current filter value, `None` meaning "all".
    #[must_use]
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Rows per page.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current page, 1-based.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Set the free-text query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.clamp_page();
    }

    /// Set the categorical filter. `None`, `"all"` and values not among
    /// [`TableView::filter_options`] all disable it.
    pub fn set_filter(&mut self, value: Option<&str>) {
        self.filter = match value {
            Some(v) if v != FILTER_ALL && self.filter_options().iter().any(|o| o == v) => {
                Some(v.to_string())
            }
            _ => None,
        };
        self.clamp_page();
    }

    /// Distinct, trimmed, non-empty values of the filter key, sorted
    /// case-insensitively.
    #[must_use]
    pub fn filter_options(&self) -> Vec<String> {
        let Some(key) = &self.filter_key else {
            return Vec::new();
        };
        let mut options: Vec<String> = self
            .rows
            .iter()
            .filter_map(|row| row.cell(key))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect();
        options.sort_by_cached_key(|v| (v.to_lowercase(), v.clone()));
        options.dedup();
        options
    }

    /// Replace the row set, keeping query and filter when still meaningful.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        if let Some(current) = self.filter.take() {
            if self.filter_options().contains(&current) {
                self.filter = Some(current);
            }
        }
        self.clamp_page();
    }

    /// Move to the next page, stopping at the last.
    pub fn next_page(&mut self) {
        self.page = (self.page + 1).min(self.page_count());
    }

    /// Move to the previous page, stopping at the first.
    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }

    /// Jump to `page`, clamped to the valid range.
    pub fn go_to_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.page_count());
    }

    fn passes_filter(&self, row: &T) -> bool {
        match (&self.filter_key, &self.filter) {
            (Some(key), Some(value)) => row.cell(key).unwrap_or_default() == *value,
            _ => true,
        }
    }

    fn matches_query(&self, row: &T) -> bool {
        if self.query.trim().is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        self.search_keys.iter().any(|key| {
            row.cell(key)
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
        })
    }

    /// Rows passing the filter and the query, in input order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&T> {
        self.rows
            .iter()
            .filter(|row| self.passes_filter(row))
            .filter(|row| self.matches_query(row))
            .collect()
    }

    /// Number of pages of the filtered rows, at least one.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.filtered().len().div_ceil(self.page_size).max(1)
    }

    /// Rows of the current page.
    #[must_use]
    pub fn current_rows(&self) -> Vec<&T> {
        let start = (self.page - 1) * self.page_size;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    /// Render headers and the current page's cells.
    #[must_use]
    pub fn render(&self) -> RenderedTable {
        let filtered = self.filtered();
        let matched = filtered.len();
        let start = (self.page - 1) * self.page_size;
        let rows = filtered
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .map(|row| self.columns.iter().map(|c| c.render_cell(row)).collect())
            .collect();

        RenderedTable {
            headers: self.columns.iter().map(|c| c.header.clone()).collect(),
            rows,
            page: self.page,
            page_count: matched.div_ceil(self.page_size).max(1),
            matched,
        }
    }

    fn clamp_page(&mut self) {
        if self.page > self.page_count() {
            trace!(page = self.page, "Current page out of range, resetting");
            self.page = 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    type Row = BTreeMap<String, String>;

    fn row(name: &str, status: &str) -> Row {
        let mut row = BTreeMap::new();
        row.insert("name".to_string(), name.to_string());
        row.insert("status".to_string(), status.to_string());
        row
    }

    fn roster(n: usize) -> Vec<Row> {
        (0..n)
            .map(|i| {
                let name = match i {
                    2 => "Ali Khan".to_string(),
                    11 => "Usman Ali".to_string(),
                    19 => "ALINA Shah".to_string(),
                    _ => format!("Driver {i}"),
                };
                let status = if i % 3 == 0 { "Active" } else { "On Leave" };
                row(&name, status)
            })
            .collect()
    }

    fn view(rows: Vec<Row>) -> TableView<Row> {
        TableView::new(
            vec![Column::new("name", "Name"), Column::new("status", "Status")],
            rows,
        )
        .with_search_keys(["name", "status"])
        .with_filter_key("status")
    }

    #[test]
    fn test_query_narrows_to_single_page() {
        let mut table = view(roster(25));
        assert_eq!(table.page_count(), 3);

        table.set_query("ali");
        let rendered = table.render();
        assert_eq!(rendered.rows.len(), 3);
        assert_eq!(rendered.rows[0][0], "Ali Khan");
        assert_eq!(rendered.rows[1][0], "Usman Ali");
        assert_eq!(rendered.rows[2][0], "ALINA Shah");
        assert_eq!(rendered.page_label(), "Page 1 of 1");
    }

    #[test]
    fn test_whitespace_query_matches_all() {
        let mut table = view(roster(25));
        table.set_query("   ");
        assert_eq!(table.filtered().len(), 25);
    }

    #[test]
    fn test_query_is_not_trimmed_when_matching() {
        let mut table = view(roster(25));
        table.set_query(" ali");
        // only "Usman Ali" has a space before "ali"
        assert_eq!(table.filtered().len(), 1);
    }

    #[test]
    fn test_query_reset_restores_rows() {
        let mut table = view(roster(25));
        table.set_query("ali");
        table.set_query("");
        assert_eq!(table.filtered().len(), 25);
    }

    #[test]
    fn test_empty_rows() {
        let table = view(Vec::new());
        let rendered = table.render();
        assert!(rendered.rows.is_empty());
        assert_eq!(rendered.page_label(), "Page 1 of 1");
        assert!(rendered.to_string().contains("No results."));
    }

    #[test]
    fn test_pagination_clamps() {
        let mut table = view(roster(25));
        table.previous_page();
        assert_eq!(table.page(), 1);

        table.next_page();
        table.next_page();
        table.next_page();
        assert_eq!(table.page(), 3);
        assert_eq!(table.current_rows().len(), 5);

        table.go_to_page(99);
        assert_eq!(table.page(), 3);
        table.go_to_page(0);
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn test_page_resets_when_result_shrinks() {
        let mut table = view(roster(25));
        table.go_to_page(3);
        table.set_query("ali");
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn test_page_sizes_partition_rows() {
        for size in [1, 4, 7, 10, 25, 30] {
            let mut table = view(roster(25)).with_page_size(size);
            let mut seen = Vec::new();
            for _ in 0..table.page_count() {
                seen.extend(
                    table
                        .current_rows()
                        .into_iter()
                        .map(|r| r["name"].clone()),
                );
                table.next_page();
            }
            let all: Vec<String> = roster(25).into_iter().map(|r| r["name"].clone()).collect();
            assert_eq!(seen, all, "page size {size}");
        }
    }

    #[test]
    fn test_filter_options_distinct_sorted() {
        let mut rows = roster(6);
        rows.push(row("Blank", "  "));
        rows.push(row("Padded", " Warning "));
        let table = view(rows);
        assert_eq!(table.filter_options(), ["Active", "On Leave", "Warning"]);
    }

    #[test]
    fn test_filter_options_ignore_case_when_sorting() {
        let rows = vec![
            row("a", "warning"),
            row("b", "Active"),
            row("c", "Suspended"),
            row("d", "active"),
            row("e", "Active"),
        ];
        let table = view(rows);
        assert_eq!(
            table.filter_options(),
            ["Active", "active", "Suspended", "warning"]
        );
    }

    #[test]
    fn test_filter_then_query() {
        let mut table = view(roster(25));
        table.set_filter(Some("On Leave"));
        assert!(table
            .filtered()
            .iter()
            .all(|r| r["status"] == "On Leave"));

        table.set_query("ali");
        let names: Vec<&str> = table.filtered().iter().map(|r| r["name"].as_str()).collect();
        assert_eq!(names, ["Ali Khan", "Usman Ali", "ALINA Shah"]);
    }

    #[test]
    fn test_filter_and_query_commute() {
        let mut a = view(roster(25));
        a.set_filter(Some("Active"));
        a.set_query("driver 1");

        let mut b = view(roster(25));
        b.set_query("driver 1");
        b.set_filter(Some("Active"));

        let names = |t: &TableView<Row>| -> Vec<String> {
            t.filtered().iter().map(|r| r["name"].clone()).collect()
        };
        assert_eq!(names(&a), names(&b));
        assert!(!names(&a).is_empty());
    }

    #[test]
    fn test_filter_all_and_unknown_disable() {
        let mut table = view(roster(25));
        table.set_filter(Some("Active"));
        assert_eq!(table.filter(), Some("Active"));

        table.set_filter(Some(FILTER_ALL));
        assert_eq!(table.filter(), None);

        table.set_filter(Some("Terminated"));
        assert_eq!(table.filter(), None);
        assert_eq!(table.filtered().len(), 25);
    }

    #[test]
    fn test_set_rows_drops_stale_filter() {
        let mut table = view(roster(25));
        table.set_filter(Some("Active"));
        table.set_rows(vec![row("Only", "On Leave")]);
        assert_eq!(table.filter(), None);
        assert_eq!(table.filtered().len(), 1);
    }

    #[test]
    fn test_missing_cell_and_custom_renderer() {
        let mut r = Row::new();
        r.insert("name".to_string(), "Sana".to_string());
        let table = TableView::new(
            vec![
                Column::new("name", "Name")
                    .with_renderer(|r: &Row| r["name"].to_uppercase()),
                Column::new("status", "Status"),
            ],
            vec![r],
        );
        let rendered = table.render();
        assert_eq!(rendered.rows, vec![vec!["SANA".to_string(), "-".to_string()]]);
    }

    #[test]
    fn test_display_layout() {
        let table = view(vec![row("Ali", "Active")]);
        let text = table.render().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name  Status");
        assert_eq!(lines[1], "----  ------");
        assert_eq!(lines[2], "Ali   Active");
        assert_eq!(lines[3], "Page 1 of 1");
    }

    #[test]
    fn test_json_map_rows() {
        let row = serde_json::json!({"name": "Ali", "age": 35, "photo": null});
        let row = row.as_object().unwrap().clone();
        assert_eq!(row.cell("name").as_deref(), Some("Ali"));
        assert_eq!(row.cell("age").as_deref(), Some("35"));
        assert_eq!(row.cell("photo"), None);
    }
}
