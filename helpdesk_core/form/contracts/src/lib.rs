use std::{future::Future, time::Duration};

use helpdesk_models::contact::{ContactForm, ContactFormErrors};

pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const SENT_MESSAGE_DURATION: Duration = Duration::from_secs(3);
pub const FAILED_FALLBACK_MESSAGE: &str = "Failed to send message";

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait FormFeatureService: Send + Sync + 'static {
    /// Submit the support page form once, starting from a fresh form with the
    /// given field values.
    fn submit(&self, form: ContactForm) -> impl Future<Output = FormSubmission> + Send;
}

/// Receives the transient notifications (toasts) emitted by a form.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notification: Notification);
}

impl Notifier for () {
    fn notify(&self, _notification: Notification) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    /// How long the notification should stay visible, `None` for the default.
    pub duration: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

impl Notification {
    pub fn success(message: impl Into<String>, duration: Option<Duration>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
            duration,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
            duration: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Success,
    Error,
}

impl FormStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submission of the same form is still pending.
    Ignored,
    Invalid(ContactFormErrors),
    Sent,
    Failed(String),
}

/// Snapshot of a form's state, used for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormView {
    pub fields: ContactForm,
    pub errors: ContactFormErrors,
    pub status: FormStatus,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub outcome: SubmitOutcome,
    pub view: ContactFormView,
    pub notifications: Vec<Notification>,
}

#[cfg(feature = "mock")]
impl MockFormFeatureService {
    pub fn with_submit(mut self, form: ContactForm, result: FormSubmission) -> Self {
        self.expect_submit()
            .once()
            .with(mockall::predicate::eq(form))
            .return_once(|_| Box::pin(std::future::ready(result)));
        self
    }
}

#[cfg(feature = "mock")]
impl MockNotifier {
    pub fn with_notify(mut self, notification: Notification) -> Self {
        self.expect_notify()
            .once()
            .with(mockall::predicate::eq(notification))
            .return_const(());
        self
    }
}
