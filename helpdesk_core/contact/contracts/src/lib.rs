use std::future::Future;

use helpdesk_models::contact::ContactSubmission;

pub const SEND_FAILED_MESSAGE: &str = "Failed to send email";
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Forward a contact form submission to the admin inbox.
    ///
    /// Failures of the email provider are never propagated, they are logged
    /// and reported as [`DispatchResult::Failure`].
    fn send_message(
        &self,
        submission: ContactSubmission,
    ) -> impl Future<Output = DispatchResult> + Send;
}

/// Outcome of a single dispatch attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Success,
    Failure(String),
}

impl DispatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success => None,
            Self::Failure(error) => Some(error),
        }
    }
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(mut self, submission: ContactSubmission, result: DispatchResult) -> Self {
        self.expect_send_message()
            .once()
            .with(mockall::predicate::eq(submission))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}
