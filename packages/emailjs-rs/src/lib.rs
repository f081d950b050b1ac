// https://www.emailjs.com/docs/rest-api/send/

use std::collections::BTreeMap;

pub mod models;
use reqwest::Client;

use crate::models::{SendEmailRequest, SendEmailResponse};

const DEFAULT_BASE_URL: &str = "https://api.emailjs.com";

#[derive(Debug, Clone)]
pub struct EmailJsOptions {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

#[derive(Debug, Clone)]
pub struct EmailJsService {
    options: EmailJsOptions,
    base_url: String,
    client: Client,
}

impl EmailJsService {
    pub fn new(options: EmailJsOptions) -> Self {
        Self {
            options,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Point the client at a different host (used against local fakes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn options(&self) -> &EmailJsOptions {
        &self.options
    }

    /// Build the request body for a template send without sending it.
    pub fn build_request(&self, template_params: BTreeMap<String, String>) -> SendEmailRequest {
        SendEmailRequest {
            service_id: self.options.service_id.clone(),
            template_id: self.options.template_id.clone(),
            user_id: self.options.public_key.clone(),
            template_params,
        }
    }

    pub async fn send(
        &self,
        template_params: BTreeMap<String, String>,
    ) -> Result<SendEmailResponse, &'static str> {
        let url = format!("{base}/api/v1.0/email/send", base = self.base_url);
        let body = self.build_request(template_params);

        let res = self.client.post(url).json(&body).send().await;

        match res {
            Ok(response) => {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                if !status.is_success() {
                    eprintln!("EmailJS error ({}): {}", status, text);
                    return Err("EmailJS returned an error");
                }

                Ok(SendEmailResponse {
                    status: status.as_u16(),
                    text,
                })
            }
            Err(e) => {
                eprintln!("Request to EmailJS failed: {}", e);
                Err("Error sending email")
            }
        }
    }
}
