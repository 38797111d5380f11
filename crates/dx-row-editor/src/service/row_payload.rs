//! Request builders for the data-plane table API

use dx_core::wire::{
    DeleteRowsRequest, InsertRowRequest, PaginateTableRequest, UpdateRowRequest, UpdateValue,
    UseDefault,
};
use dx_core::{DxError, EditorMode, Primitive, Result, datum_to_primitive};

use super::{PageCursor, row_to_api_row};
use crate::models::{PatchValue, RowDraft};

/// Request builder for row drafts
///
/// Stateless; every method is an associated function.
pub struct RowPayload;

impl RowPayload {
    /// Insert the draft as a new row
    pub fn insert_request(table_name: &str, draft: &RowDraft) -> Result<InsertRowRequest> {
        if !draft.is_initialized() {
            return Err(DxError::EditorNotInitialized);
        }
        Ok(InsertRowRequest {
            table_name: table_name.to_string(),
            values: row_to_api_row(&draft.insert_row()),
        })
    }

    /// Apply the draft's edits to the row it was initialized from
    pub fn update_request(table_name: &str, draft: &RowDraft) -> Result<UpdateRowRequest> {
        if draft.mode() != EditorMode::Update {
            return Err(DxError::Internal(
                "update request needs a draft initialized from a row".to_string(),
            ));
        }

        let values = draft
            .update_row()
            .into_iter()
            .map(|(name, value)| {
                let value = match value {
                    PatchValue::Null => UpdateValue::Value(Primitive::Null),
                    PatchValue::Default => UpdateValue::Default(UseDefault { use_default: true }),
                    PatchValue::Value(datum) => UpdateValue::Value(datum_to_primitive(&datum)),
                };
                (name, value)
            })
            .collect();

        Ok(UpdateRowRequest {
            table_name: table_name.to_string(),
            id: draft.row_id()?,
            values,
        })
    }

    pub fn delete_request(table_name: &str, ids: Vec<i64>) -> DeleteRowsRequest {
        DeleteRowsRequest {
            table_name: table_name.to_string(),
            ids,
        }
    }

    pub fn paginate_request(table_name: &str, cursor: &PageCursor, limit: u32) -> PaginateTableRequest {
        PaginateTableRequest {
            table_name: table_name.to_string(),
            prev_created_at: cursor.prev_created_at.clone(),
            prev_ids: cursor.prev_ids.clone(),
            limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColumnAction, Row};
    use dx_core::{ColumnDef, Datum, DefaultValue, FieldType};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn columns() -> (ColumnDef, ColumnDef, ColumnDef) {
        (
            ColumnDef::named("title", FieldType::Varchar255).not_null(),
            ColumnDef::named("body", FieldType::Text),
            ColumnDef::named("views", FieldType::Int64)
                .not_null()
                .with_default(DefaultValue::Int64(0)),
        )
    }

    #[test]
    fn test_insert_request_omits_default_columns() {
        let (title, body, views) = columns();
        let mut draft = RowDraft::new();
        draft.init_from_empty();
        draft
            .set_column_action(&title, ColumnAction::SetRegular(Datum::Varchar("Hello".to_string())))
            .unwrap();
        draft.set_column_action(&body, ColumnAction::SetNull).unwrap();
        draft
            .set_column_action(&views, ColumnAction::SetDefault)
            .unwrap();

        let request = RowPayload::insert_request("posts", &draft).expect("should build");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"tableName": "posts", "values": {"title": "Hello", "body": null}})
        );
    }

    #[test]
    fn test_update_request_sends_default_marker() {
        let (title, _, views) = columns();
        let mut draft = RowDraft::new();
        draft.init_from_row(Row::from([
            ("id".to_string(), Datum::Int64(12)),
            ("title".to_string(), Datum::Varchar("Old".to_string())),
            ("views".to_string(), Datum::Int64(40)),
        ]));
        draft
            .set_column_action(&title, ColumnAction::SetRegular(Datum::Varchar("New".to_string())))
            .unwrap();
        draft
            .set_column_action(&views, ColumnAction::SetDefault)
            .unwrap();

        let request = RowPayload::update_request("posts", &draft).expect("should build");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "tableName": "posts",
                "id": 12,
                "values": {"title": "New", "views": {"useDefault": true}}
            })
        );
    }

    #[test]
    fn test_update_request_needs_update_mode() {
        let mut draft = RowDraft::new();
        draft.init_from_empty();
        assert!(RowPayload::update_request("posts", &draft).is_err());
        assert!(matches!(
            RowPayload::insert_request("posts", &RowDraft::new()),
            Err(DxError::EditorNotInitialized)
        ));
    }

    #[test]
    fn test_paginate_request_from_cursor() {
        let cursor = PageCursor {
            prev_created_at: Some("2024-01-01 00:00:00.000".to_string()),
            prev_ids: Some(vec![4, 3]),
        };
        let request = RowPayload::paginate_request("posts", &cursor, 100);
        assert_eq!(request.prev_ids, Some(vec![4, 3]));
        assert_eq!(request.limit, 100);

        let delete = RowPayload::delete_request("posts", vec![1, 2]);
        assert_eq!(delete.ids, vec![1, 2]);
    }
}
