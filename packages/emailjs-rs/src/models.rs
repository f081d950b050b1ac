use std::collections::BTreeMap;

use serde::Serialize;

/// Request body for `POST /api/v1.0/email/send`.
#[derive(Debug, Clone, Serialize)]
pub struct SendEmailRequest {
    pub service_id: String,
    pub template_id: String,
    /// EmailJS calls the public key `user_id` on the wire.
    pub user_id: String,
    pub template_params: BTreeMap<String, String>,
}

/// Outcome of a send call. EmailJS answers with a plain-text body ("OK" on success).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendEmailResponse {
    pub status: u16,
    pub text: String,
}
