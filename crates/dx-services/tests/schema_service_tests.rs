//! Integration tests for SchemaService
//!
//! Tests schema loading and the cached snapshot using the MockDataPlane.

mod common;

use dx_services::{SchemaService, ServiceError, endpoints};
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{MockDataPlane, init_test_logging, list_table_response, sample_schema};

#[tokio::test]
async fn load_schema_converts_list_table_response() {
    init_test_logging();
    let plane = MockDataPlane::new().with_response(endpoints::LIST_TABLE, list_table_response());
    let service = SchemaService::new();

    let schema = service.load_schema(&plane).await.expect("should load schema");

    assert_eq!(schema, sample_schema());
    assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["users", "posts"]);
    assert_eq!(plane.calls(), vec![(endpoints::LIST_TABLE.to_string(), json!({"req": {}}))]);
}

#[tokio::test]
async fn schema_is_served_from_cache_until_invalidated() {
    let plane = MockDataPlane::new().with_response(endpoints::LIST_TABLE, list_table_response());
    let service = SchemaService::new();
    assert!(service.cached_schema().is_none());

    service.schema(&plane).await.expect("first load");
    service.schema(&plane).await.expect("cached");
    assert_eq!(plane.call_count(), 1);
    assert_eq!(
        service.cached_table("posts").map(|t| t.column_names().len()),
        Some(5)
    );

    service.invalidate();
    assert!(service.cached_table("posts").is_none());
    service.schema(&plane).await.expect("reload");
    assert_eq!(plane.call_count(), 2);
}

#[tokio::test]
async fn unsupported_column_type_fails_the_load() {
    let plane = MockDataPlane::new().with_response(
        endpoints::LIST_TABLE,
        json!([{
            "tableName": "places",
            "columns": [{"columnName": "shape", "fieldType": "geometry", "nullable": "YES", "defaultValue": null, "comment": "", "extra": ""}],
            "primaryKey": []
        }]),
    );
    let service = SchemaService::new();

    let result = service.load_schema(&plane).await;
    assert!(matches!(result, Err(ServiceError::Core(_))));
    assert!(service.cached_schema().is_none());
}

#[tokio::test]
async fn backend_failure_is_propagated() {
    let plane = MockDataPlane::new().failing_at(0);
    let service = SchemaService::new();

    let result = service.load_schema(&plane).await;
    assert!(matches!(result, Err(ServiceError::Backend { status: 500, .. })));
}

#[tokio::test]
async fn malformed_response_is_a_decode_error() {
    let plane =
        MockDataPlane::new().with_response(endpoints::LIST_TABLE, json!({"tables": "nope"}));
    let service = SchemaService::new();

    let result = service.load_schema(&plane).await;
    assert!(matches!(result, Err(ServiceError::Decode(_))));
}
