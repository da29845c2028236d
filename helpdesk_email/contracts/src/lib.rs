use std::future::Future;

use helpdesk_models::email_address::EmailAddressWithName;
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait EmailService: Send + Sync + 'static {
    /// Send an email through the email provider.
    ///
    /// The outer error is returned if the provider could not be reached or
    /// its response could not be understood. If the provider received the
    /// request but refused to send the email, `Ok(Err(rejection))` is
    /// returned instead.
    fn send(
        &self,
        email: Email,
    ) -> impl Future<Output = anyhow::Result<Result<(), EmailRejection>>> + Send;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub recipient: EmailAddressWithName,
    pub subject: String,
    pub body: String,
    pub content_type: ContentType,
    pub reply_to: Option<EmailAddressWithName>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Text,
    Html,
}

/// An error reported by the email provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("email provider responded with {status} ({name}): {message}")]
pub struct EmailRejection {
    pub status: u16,
    pub name: String,
    pub message: String,
}

#[cfg(feature = "mock")]
impl MockEmailService {
    pub fn with_send(mut self, email: Email, result: Result<(), EmailRejection>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(move |_| Box::pin(std::future::ready(Ok(result))));
        self
    }

    pub fn with_send_error(mut self, email: Email) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(email))
            .return_once(|_| {
                Box::pin(std::future::ready(Err(anyhow::anyhow!(
                    "connection refused"
                ))))
            });
        self
    }
}
