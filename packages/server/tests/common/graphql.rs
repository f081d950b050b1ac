//! GraphQL client for integration testing.
//!
//! Executes GraphQL queries directly against the schema without HTTP overhead.

use juniper::Variables;
use serde_json::Value;
use server_core::kernel::{ServerDeps, TestDependencies};
use server_core::server::graphql::{create_schema, GraphQLContext, Schema};
use std::sync::Arc;

pub struct GraphQLClient {
    schema: Schema,
    context: GraphQLContext,
}

/// Result of a GraphQL execution.
#[derive(Debug)]
pub struct GraphQLResult {
    pub data: Option<Value>,
    pub errors: Vec<GraphQLErrorInfo>,
}

#[derive(Debug, Clone)]
pub struct GraphQLErrorInfo {
    pub message: String,
    pub extensions: Value,
}

impl GraphQLResult {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Unwraps the data, panicking if there were errors.
    pub fn unwrap(self) -> Value {
        if !self.errors.is_empty() {
            panic!("GraphQL errors: {:?}", self.errors);
        }
        self.data.expect("No data returned")
    }

    /// Message of the first error, panicking if there was none.
    pub fn first_error(&self) -> &GraphQLErrorInfo {
        self.errors.first().expect("Expected a GraphQL error")
    }
}

impl GraphQLClient {
    pub fn new(deps: ServerDeps) -> Self {
        Self {
            schema: create_schema(),
            context: GraphQLContext::new(Arc::new(deps), None),
        }
    }

    /// Client over in-memory mocks
    pub fn with_test_deps(test_deps: TestDependencies) -> Self {
        Self::new(test_deps.into_deps())
    }

    pub async fn execute(&self, query: &str) -> GraphQLResult {
        self.execute_with_vars(query, Variables::new()).await
    }

    pub async fn execute_with_vars(&self, query: &str, variables: Variables) -> GraphQLResult {
        let (result, errors) =
            juniper::execute(query, None, &self.schema, &variables, &self.context)
                .await
                .expect("GraphQL execution failed");

        let data = Some(serde_json::to_value(&result).expect("Failed to serialize GraphQL result"));

        let errors = errors
            .iter()
            .map(|e| GraphQLErrorInfo {
                message: e.error().message().to_string(),
                extensions: serde_json::to_value(e.error().extensions())
                    .expect("Failed to serialize error extensions"),
            })
            .collect();

        GraphQLResult { data, errors }
    }

    pub async fn query(&self, query: &str) -> Value {
        self.execute(query).await.unwrap()
    }

    pub async fn query_with_vars(&self, query: &str, variables: Variables) -> Value {
        self.execute_with_vars(query, variables).await.unwrap()
    }
}

/// Build GraphQL variables from a JSON object
pub fn json_vars(value: Value) -> Variables {
    serde_json::from_value(value).expect("Variables must be a JSON object")
}
