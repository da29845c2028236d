use anyhow::Context;
use helpdesk_config::EmailConfig;
use helpdesk_email_impl::{EmailServiceConfig, EmailServiceImpl};
use tracing::warn;

/// Create the client for the email provider's HTTP API
pub fn connect(config: &EmailConfig) -> anyhow::Result<EmailServiceImpl> {
    if config.api_key.is_empty() {
        warn!("No email api key configured, the email provider will reject all emails");
    }

    let service_config = EmailServiceConfig::new(
        config.api_key.as_str(),
        config.from.clone(),
        config.api_endpoint_override.clone(),
        config.timeout.into(),
    )?;

    EmailServiceImpl::new(service_config).context("Failed to create email client")
}
