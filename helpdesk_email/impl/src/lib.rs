use std::{sync::Arc, time::Duration};

use anyhow::Context;
use helpdesk_email_contracts::{ContentType, Email, EmailRejection, EmailService};
use helpdesk_models::email_address::EmailAddressWithName;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

mod http;

const RESEND_API_ENDPOINT: &str = "https://api.resend.com/";

/// Sends emails through the [Resend](https://resend.com/) HTTP API.
#[derive(Debug, Clone)]
pub struct EmailServiceImpl {
    config: EmailServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    api_key: Arc<str>,
    from: Arc<EmailAddressWithName>,
    emails_endpoint: Arc<Url>,
    timeout: Duration,
}

impl EmailServiceConfig {
    /// `api_endpoint_override` must end with a `/`.
    pub fn new(
        api_key: impl Into<Arc<str>>,
        from: EmailAddressWithName,
        api_endpoint_override: Option<Url>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let api_endpoint = match api_endpoint_override {
            Some(url) => url,
            None => RESEND_API_ENDPOINT.parse()?,
        };
        let emails_endpoint = api_endpoint
            .join("emails")
            .with_context(|| format!("Invalid email api endpoint {api_endpoint}"))?;

        Ok(Self {
            api_key: api_key.into(),
            from: from.into(),
            emails_endpoint: emails_endpoint.into(),
            timeout,
        })
    }
}

impl EmailServiceImpl {
    pub fn new(config: EmailServiceConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new(config.timeout)?;
        Ok(Self { config, client })
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<Result<(), EmailRejection>> {
        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };

        let request = SendEmailRequest {
            from: self.config.from.to_string(),
            to: vec![email.recipient.to_string()],
            subject: &email.subject,
            html,
            text,
            reply_to: email.reply_to.iter().map(ToString::to_string).collect(),
        };

        let response = self
            .client
            .post((*self.config.emails_endpoint).clone())
            .bearer_auth(&*self.config.api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to email api")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read response of email api")?;

        if status.is_success() {
            match serde_json::from_str::<SendEmailResponse>(&body) {
                Ok(SendEmailResponse { id }) => debug!(%id, "email accepted by provider"),
                Err(err) => warn!(%status, %body, "email accepted without a valid id: {err}"),
            }
            return Ok(Ok(()));
        }

        let rejection = match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(ErrorResponse { name, message }) => EmailRejection {
                status: status.as_u16(),
                name,
                message,
            },
            Err(_) => EmailRejection {
                status: status.as_u16(),
                name: status
                    .canonical_reason()
                    .unwrap_or("unknown_error")
                    .to_owned(),
                message: body,
            },
        };

        Ok(Err(rejection))
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: Vec<String>,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    reply_to: Vec<String>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    name: String,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint() {
        let config = EmailServiceConfig::new(
            "re_123",
            "support@example.com".parse().unwrap(),
            None,
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            config.emails_endpoint.as_str(),
            "https://api.resend.com/emails"
        );
    }

    #[test]
    fn endpoint_override() {
        let config = EmailServiceConfig::new(
            "re_123",
            "support@example.com".parse().unwrap(),
            Some("http://127.0.0.1:8003/".parse().unwrap()),
            Duration::from_secs(10),
        )
        .unwrap();
        assert_eq!(
            config.emails_endpoint.as_str(),
            "http://127.0.0.1:8003/emails"
        );
    }

    #[test]
    fn request_omits_empty_fields() {
        let request = SendEmailRequest {
            from: "Helpdesk <support@example.com>".into(),
            to: vec!["admin@example.com".into()],
            subject: "Subject",
            html: Some("<p>Hi</p>"),
            text: None,
            reply_to: vec![],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "from": "Helpdesk <support@example.com>",
                "to": ["admin@example.com"],
                "subject": "Subject",
                "html": "<p>Hi</p>",
            })
        );
    }
}
