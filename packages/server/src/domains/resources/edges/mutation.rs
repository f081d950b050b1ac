//! GraphQL mutation resolvers for resources

use juniper::{FieldError, FieldResult, Object, Value};
use tracing::info;

use crate::domains::resources::actions::{self, SubmissionError};
use crate::domains::resources::data::{SubmitResourceInput, SubmitResourceResult};
use crate::server::graphql::context::GraphQLContext;

/// Submit a new resource from the public form
pub async fn submit_resource(
    ctx: &GraphQLContext,
    input: SubmitResourceInput,
) -> FieldResult<SubmitResourceResult> {
    info!("submit_resource mutation called: {}", input.org_name.trim());

    actions::submit_resource(input, &ctx.deps)
        .await
        .map_err(submission_field_error)
}

fn submission_field_error(err: SubmissionError) -> FieldError {
    let mut extensions = Object::with_capacity(2);
    extensions.add_field("code", Value::scalar(err.code().to_string()));
    if let SubmissionError::MissingFields(fields) = &err {
        extensions.add_field(
            "fields",
            Value::list(fields.iter().map(|f| Value::scalar(f.clone())).collect()),
        );
    }
    FieldError::new(err, Value::Object(extensions))
}
