use dx_core::wire::ApiRow;
use dx_core::{DxError, Result, TableDef, datum_to_primitive, primitive_to_datum};

use crate::models::Row;

/// Type a wire row using the table's column definitions
pub fn api_row_to_row(api_row: &ApiRow, table: &TableDef) -> Result<Row> {
    api_row
        .iter()
        .map(|(name, value)| {
            let column = table
                .column(name)
                .ok_or_else(|| DxError::ColumnNotFound(name.clone()))?;
            Ok((name.clone(), primitive_to_datum(value, column.field_type)?))
        })
        .collect()
}

pub fn row_to_api_row(row: &Row) -> ApiRow {
    row.iter()
        .map(|(name, datum)| (name.clone(), datum_to_primitive(datum)))
        .collect()
}

/// Type a page of wire rows
pub fn rows_from_api(api_rows: &[ApiRow], table: &TableDef) -> Result<Vec<Row>> {
    api_rows
        .iter()
        .map(|api_row| api_row_to_row(api_row, table))
        .collect()
}
