//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use dx_core::{ColumnDef, DefaultValue, FieldType, SchemaDef, TableDef};
use dx_services::{DataPlane, ServiceError, ServiceResult};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Once};

/// Mock data plane for testing service-layer logic without a server.
///
/// Every invocation is recorded as `(path, body)`. Responses are looked up
/// by path; unknown paths answer `null`. One call, counted from zero across
/// all paths, can be made to fail with a 500.
pub struct MockDataPlane {
    responses: HashMap<String, Value>,
    fail_at: Option<usize>,
    /// Log of all invocations, for assertion in tests
    pub calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl MockDataPlane {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            fail_at: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register the response for an API path
    pub fn with_response(mut self, path: &str, response: Value) -> Self {
        self.responses.insert(path.to_string(), response);
        self
    }

    /// Make the n-th call (zero based) fail with a backend error
    pub fn failing_at(mut self, call: usize) -> Self {
        self.fail_at = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn paths(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(path, _)| path.clone()).collect()
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.calls.lock().iter().map(|(_, body)| body.clone()).collect()
    }
}

#[async_trait]
impl DataPlane for MockDataPlane {
    async fn invoke(&self, path: &str, body: Value) -> ServiceResult<Value> {
        let call = {
            let mut calls = self.calls.lock();
            calls.push((path.to_string(), body));
            calls.len() - 1
        };

        if self.fail_at == Some(call) {
            return Err(ServiceError::Backend {
                status: 500,
                body: "Mock failure".to_string(),
            });
        }
        Ok(self.responses.get(path).cloned().unwrap_or(Value::Null))
    }
}

static INIT_LOGGING: Once = Once::new();

/// Install a test subscriber once per test binary
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = dx_services::logging::init(dx_services::logging::LoggingConfig::testing());
    });
}

/// `listTable` response with a `users` and a `posts` table
pub fn list_table_response() -> Value {
    let system_columns = json!([
        {"columnName": "id", "fieldType": "bigint", "nullable": "NO", "defaultValue": null, "comment": "", "extra": "auto_increment"},
        {"columnName": "created_at", "fieldType": "datetime(3)", "nullable": "NO", "defaultValue": "CURRENT_TIMESTAMP(3)", "comment": "", "extra": "DEFAULT_GENERATED"},
        {"columnName": "updated_at", "fieldType": "datetime(3)", "nullable": "NO", "defaultValue": "CURRENT_TIMESTAMP(3)", "comment": "", "extra": "DEFAULT_GENERATED on update CURRENT_TIMESTAMP(3)"}
    ]);

    let mut users = system_columns.as_array().cloned().unwrap_or_default();
    users.push(json!({"columnName": "name", "fieldType": "varchar(255)", "nullable": "NO", "defaultValue": null, "comment": "", "extra": ""}));
    users.push(json!({"columnName": "age", "fieldType": "bigint", "nullable": "YES", "defaultValue": null, "comment": "", "extra": ""}));

    let mut posts = system_columns.as_array().cloned().unwrap_or_default();
    posts.push(json!({"columnName": "title", "fieldType": "varchar(255)", "nullable": "NO", "defaultValue": null, "comment": "", "extra": ""}));
    posts.push(json!({"columnName": "views", "fieldType": "bigint", "nullable": "NO", "defaultValue": 0, "comment": "", "extra": ""}));

    json!([
        {"tableName": "users", "columns": users, "primaryKey": ["id"]},
        {"tableName": "posts", "columns": posts, "primaryKey": ["id"]}
    ])
}

/// Typed schema matching `list_table_response`
pub fn sample_schema() -> SchemaDef {
    let users = TableDef::template()
        .with_column(ColumnDef::named("name", FieldType::Varchar255).not_null())
        .with_column(ColumnDef::named("age", FieldType::Int64).with_default(DefaultValue::Null));
    let posts = TableDef::template()
        .with_column(ColumnDef::named("title", FieldType::Varchar255).not_null())
        .with_column(
            ColumnDef::named("views", FieldType::Int64)
                .not_null()
                .with_default(DefaultValue::Int64(0)),
        );

    SchemaDef::from([
        (
            "users".to_string(),
            TableDef {
                name: Some("users".to_string()),
                ..users
            },
        ),
        (
            "posts".to_string(),
            TableDef {
                name: Some("posts".to_string()),
                ..posts
            },
        ),
    ])
}
