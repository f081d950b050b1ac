//! GraphQL mutation resolver for the contact form

use juniper::{FieldError, FieldResult, Value};
use tracing::info;

use crate::domains::contact::actions;
use crate::domains::contact::data::{ContactMessageInput, ContactMessageResult};
use crate::server::graphql::context::GraphQLContext;

pub async fn send_contact_message(
    ctx: &GraphQLContext,
    input: ContactMessageInput,
) -> FieldResult<ContactMessageResult> {
    info!("send_contact_message mutation called");

    actions::send_contact_message(input, &ctx.deps)
        .await
        .map_err(|e| FieldError::new(e, Value::null()))
}
