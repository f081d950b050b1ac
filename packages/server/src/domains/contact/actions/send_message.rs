use std::collections::BTreeMap;

use thiserror::Error;
use tracing::{error, info};

use crate::domains::contact::data::{ContactMessageInput, ContactMessageResult};
use crate::domains::resources::actions::validation::is_valid_email;
use crate::kernel::ServerDeps;

#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Please fill in all required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Contact form is not available right now")]
    NotConfigured,

    #[error("Failed to send message")]
    Send(#[source] anyhow::Error),
}

/// Relay a contact-form message through the configured email service.
///
/// Template parameters are `from_name`, `reply_to` and `message`.
pub async fn send_contact_message(
    input: ContactMessageInput,
    deps: &ServerDeps,
) -> Result<ContactMessageResult, ContactError> {
    let missing: Vec<String> = [
        ("name", &input.name),
        ("email", &input.email),
        ("message", &input.message),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field.to_string())
    .collect();
    if !missing.is_empty() {
        return Err(ContactError::MissingFields(missing));
    }
    if !is_valid_email(&input.email) {
        return Err(ContactError::InvalidEmail);
    }

    let email_service = deps.email_service.as_ref().ok_or(ContactError::NotConfigured)?;

    let params = BTreeMap::from([
        ("from_name".to_string(), input.name.trim().to_string()),
        ("reply_to".to_string(), input.email.trim().to_string()),
        ("message".to_string(), input.message.trim().to_string()),
    ]);

    email_service.send_template(params).await.map_err(|e| {
        error!(error = %e, "Failed to send contact message");
        ContactError::Send(e)
    })?;

    info!("Contact message sent");

    Ok(ContactMessageResult {
        sent: true,
        message: "Thanks for reaching out! We'll get back to you soon.".to_string(),
    })
}
