//! Order row model and the column-oriented table it is extracted from.
//!
//! The order list grid is read column-wise (the scripting interface hands out
//! one cell at a time), so the natural in-memory shape is a rectangular
//! column → values mapping over a fixed schema. [`OrderRow`] is the typed
//! view of one index of that mapping.

use std::collections::BTreeMap;

use crate::error::DataError;

/// Production/planned order number.
pub const COL_ORDER: &str = "AUFNR";
/// Sales order reference.
pub const COL_SALES_ORDER: &str = "KDAUF";
/// Sales order line item.
pub const COL_SALES_ORDER_ITEM: &str = "KDPOS";
/// Material number.
pub const COL_MATERIAL: &str = "MATNR";
/// Material short text.
pub const COL_MATERIAL_TEXT: &str = "MAKTX";
/// Order quantity.
pub const COL_QUANTITY: &str = "GAMNG";
/// Basic start date.
pub const COL_START_DATE: &str = "GSTRP";
/// Unrestricted stock level.
pub const COL_STOCK: &str = "LABST";
/// MRP controller (planner group).
pub const COL_PLANNER_GROUP: &str = "DISPO";

/// Fixed extraction schema of the order list grid, in display order.
pub const ORDER_COLUMNS: [&str; 9] = [
    COL_ORDER,
    COL_SALES_ORDER,
    COL_SALES_ORDER_ITEM,
    COL_MATERIAL,
    COL_MATERIAL_TEXT,
    COL_QUANTITY,
    COL_START_DATE,
    COL_STOCK,
    COL_PLANNER_GROUP,
];

/// One production order row as extracted from the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRow {
    pub order_id: String,
    pub sales_order_ref: String,
    pub sales_order_line: String,
    pub material_id: String,
    pub material_text: String,
    pub quantity: i64,
    pub start_date: String,
    /// May be negative in source data; carried through as-is.
    pub stock_level: i64,
    pub planner_group: String,
}

impl OrderRow {
    /// Builds the row at `index` of a column-oriented extraction result.
    pub fn from_columns(
        columns: &BTreeMap<String, Vec<String>>,
        index: usize,
    ) -> Result<Self, DataError> {
        let cell = |column: &str| -> Result<&str, DataError> {
            let values = columns
                .get(column)
                .ok_or_else(|| DataError::MissingColumn {
                    column: column.to_string(),
                })?;
            values
                .get(index)
                .map(String::as_str)
                .ok_or_else(|| DataError::RaggedTable {
                    column: column.to_string(),
                    expected: index + 1,
                    actual: values.len(),
                })
        };

        Ok(Self {
            order_id: cell(COL_ORDER)?.trim().to_string(),
            sales_order_ref: cell(COL_SALES_ORDER)?.trim().to_string(),
            sales_order_line: cell(COL_SALES_ORDER_ITEM)?.trim().to_string(),
            material_id: cell(COL_MATERIAL)?.trim().to_string(),
            material_text: cell(COL_MATERIAL_TEXT)?.to_string(),
            quantity: parse_grid_int(COL_QUANTITY, cell(COL_QUANTITY)?)?,
            start_date: cell(COL_START_DATE)?.trim().to_string(),
            stock_level: parse_grid_int(COL_STOCK, cell(COL_STOCK)?)?,
            planner_group: cell(COL_PLANNER_GROUP)?.trim().to_string(),
        })
    }

    /// Builds all rows of a column-oriented extraction result, in grid order.
    pub fn rows_from_columns(
        columns: &BTreeMap<String, Vec<String>>,
    ) -> Result<Vec<Self>, DataError> {
        let count = columns
            .get(COL_ORDER)
            .ok_or_else(|| DataError::MissingColumn {
                column: COL_ORDER.to_string(),
            })?
            .len();
        (0..count).map(|i| Self::from_columns(columns, i)).collect()
    }
}

/// Parses a grid cell holding a quantity or stock figure.
///
/// The grid renders numbers in local format: `.` as thousands separator and
/// `,` before a decimal tail (always zero for these columns), e.g. `1.250`
/// or `12,000`. An empty cell counts as zero.
fn parse_grid_int(column: &str, raw: &str) -> Result<i64, DataError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let without_decimals = trimmed.split(',').next().unwrap_or(trimmed);
    let compact: String = without_decimals
        .chars()
        .filter(|c| *c != '.' && *c != ' ')
        .collect();
    compact.parse::<i64>().map_err(|_| DataError::InvalidNumber {
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Rectangular column → ordered-values mapping over [`ORDER_COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnTable {
    columns: BTreeMap<String, Vec<String>>,
}

impl ColumnTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a raw extraction result without copying.
    pub fn from_columns(columns: BTreeMap<String, Vec<String>>) -> Self {
        Self { columns }
    }

    /// Appends one typed row, keeping every schema column aligned.
    pub fn push_row(&mut self, row: &OrderRow) {
        let mut push = |column: &str, value: String| {
            self.columns.entry(column.to_string()).or_default().push(value);
        };
        push(COL_ORDER, row.order_id.clone());
        push(COL_SALES_ORDER, row.sales_order_ref.clone());
        push(COL_SALES_ORDER_ITEM, row.sales_order_line.clone());
        push(COL_MATERIAL, row.material_id.clone());
        push(COL_MATERIAL_TEXT, row.material_text.clone());
        push(COL_QUANTITY, row.quantity.to_string());
        push(COL_START_DATE, row.start_date.clone());
        push(COL_STOCK, row.stock_level.to_string());
        push(COL_PLANNER_GROUP, row.planner_group.clone());
    }

    /// Values of one column; empty slice if the column never got a value.
    pub fn column(&self, name: &str) -> &[String] {
        self.columns.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Appends every schema column of `other` to this table, in `other`'s
    /// row order. A column missing in `other` contributes nothing.
    pub fn extend_from(&mut self, other: &ColumnTable) {
        for column in ORDER_COLUMNS {
            let values = other.column(column);
            if values.is_empty() {
                continue;
            }
            self.columns
                .entry(column.to_string())
                .or_default()
                .extend(values.iter().cloned());
        }
    }

    /// Number of rows, taken from the order-number column.
    pub fn row_count(&self) -> usize {
        self.column(COL_ORDER).len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// True when every populated column holds the same number of values.
    pub fn is_rectangular(&self) -> bool {
        let mut lengths = self.columns.values().map(Vec::len);
        match lengths.next() {
            Some(first) => lengths.all(|l| l == first),
            None => true,
        }
    }

    /// Iterates rows in grid order as schema-ordered cell slices.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&str>> + '_ {
        (0..self.row_count()).map(move |i| {
            ORDER_COLUMNS
                .iter()
                .map(|column| self.column(column).get(i).map(String::as_str).unwrap_or(""))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_columns() -> BTreeMap<String, Vec<String>> {
        let mut columns = BTreeMap::new();
        columns.insert(COL_ORDER.into(), vec!["1000001".into(), "1000002".into()]);
        columns.insert(COL_SALES_ORDER.into(), vec!["5001".into(), "".into()]);
        columns.insert(COL_SALES_ORDER_ITEM.into(), vec!["10".into(), "".into()]);
        columns.insert(COL_MATERIAL.into(), vec!["991234".into(), "501234".into()]);
        columns.insert(
            COL_MATERIAL_TEXT.into(),
            vec!["FRAME 9H LEFT".into(), "PANEL PLAIN".into()],
        );
        columns.insert(COL_QUANTITY.into(), vec!["1.250".into(), "1".into()]);
        columns.insert(
            COL_START_DATE.into(),
            vec!["14.07.2025".into(), "15.07.2025".into()],
        );
        columns.insert(COL_STOCK.into(), vec!["0".into(), "12,000".into()]);
        columns.insert(COL_PLANNER_GROUP.into(), vec!["CSR".into(), "101".into()]);
        columns
    }

    #[test]
    fn builds_typed_rows_from_grid_columns() {
        let rows = OrderRow::rows_from_columns(&sample_columns()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].order_id, "1000001");
        assert_eq!(rows[0].quantity, 1250);
        assert_eq!(rows[0].stock_level, 0);
        assert_eq!(rows[0].planner_group, "CSR");
        assert_eq!(rows[1].stock_level, 12);
        assert_eq!(rows[1].material_text, "PANEL PLAIN");
    }

    #[test]
    fn missing_schema_column_is_reported() {
        let mut columns = sample_columns();
        columns.remove(COL_STOCK);
        let err = OrderRow::rows_from_columns(&columns).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn { column } if column == COL_STOCK));
    }

    #[test]
    fn ragged_column_is_reported() {
        let mut columns = sample_columns();
        columns.get_mut(COL_STOCK).unwrap().pop();
        let err = OrderRow::rows_from_columns(&columns).unwrap_err();
        assert!(matches!(err, DataError::RaggedTable { .. }));
    }

    #[test]
    fn parses_local_number_formats() {
        assert_eq!(parse_grid_int(COL_STOCK, "0").unwrap(), 0);
        assert_eq!(parse_grid_int(COL_STOCK, "1.250").unwrap(), 1250);
        assert_eq!(parse_grid_int(COL_STOCK, "12,000").unwrap(), 12);
        assert_eq!(parse_grid_int(COL_STOCK, "-5").unwrap(), -5);
        assert_eq!(parse_grid_int(COL_STOCK, "").unwrap(), 0);
        assert!(parse_grid_int(COL_STOCK, "n/a").is_err());
    }

    #[test]
    fn pushed_rows_stay_rectangular_and_ordered() {
        let rows = OrderRow::rows_from_columns(&sample_columns()).unwrap();
        let mut table = ColumnTable::new();
        for row in &rows {
            table.push_row(row);
        }
        assert_eq!(table.row_count(), 2);
        assert!(table.is_rectangular());
        assert_eq!(table.column(COL_ORDER), ["1000001", "1000002"]);

        let first: Vec<&str> = table.rows().next().unwrap();
        assert_eq!(first[0], "1000001");
        assert_eq!(first.len(), ORDER_COLUMNS.len());
    }

    #[test]
    fn extend_tolerates_missing_columns() {
        let rows = OrderRow::rows_from_columns(&sample_columns()).unwrap();
        let mut partial = ColumnTable::new();
        partial.push_row(&rows[0]);
        let mut stripped = BTreeMap::new();
        stripped.insert(COL_ORDER.to_string(), vec!["1000003".to_string()]);
        let other = ColumnTable::from_columns(stripped);

        let mut merged = ColumnTable::new();
        merged.extend_from(&partial);
        merged.extend_from(&other);
        assert_eq!(merged.column(COL_ORDER).len(), 2);
        assert_eq!(merged.column(COL_MATERIAL).len(), 1);
    }
}
