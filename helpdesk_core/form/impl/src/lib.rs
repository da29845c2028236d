use helpdesk_core_contact_contracts::ContactFeatureService;
use helpdesk_core_form_contracts::{FormFeatureService, FormSubmission};
use helpdesk_di::Build;
use helpdesk_models::contact::ContactForm;

pub use crate::{controller::ContactFormController, notification::NotificationBuffer};

mod controller;
mod notification;

#[derive(Debug, Clone, Build)]
pub struct FormFeatureServiceImpl<Contact> {
    contact: Contact,
}

impl<Contact> FormFeatureService for FormFeatureServiceImpl<Contact>
where
    Contact: ContactFeatureService,
{
    async fn submit(&self, form: ContactForm) -> FormSubmission {
        let controller = ContactFormController::new(&self.contact, NotificationBuffer::default());
        controller.set_fields(form);

        let outcome = controller.submit().await;

        FormSubmission {
            outcome,
            view: controller.view(),
            notifications: controller.notifier().take(),
        }
    }
}

#[cfg(test)]
mod tests {
    use helpdesk_core_contact_contracts::{DispatchResult, MockContactFeatureService};
    use helpdesk_core_form_contracts::{
        ContactFormView, FormStatus, Notification, SubmitOutcome,
    };
    use helpdesk_demo::{FOO_FORM, FOO_SUBMISSION, INVALID_FORM};
    use pretty_assertions::assert_eq;

    use super::*;

    #[tokio::test]
    async fn submit_ok() {
        // Arrange
        let contact = MockContactFeatureService::new()
            .with_send_message(FOO_SUBMISSION.clone(), DispatchResult::Success);

        let sut = FormFeatureServiceImpl { contact };

        // Act
        let result = sut.submit(FOO_FORM.clone()).await;

        // Assert
        assert_eq!(
            result,
            FormSubmission {
                outcome: SubmitOutcome::Sent,
                view: ContactFormView {
                    status: FormStatus::Success,
                    ..Default::default()
                },
                notifications: vec![Notification::success(
                    "Message sent successfully!",
                    Some(std::time::Duration::from_secs(3))
                )],
            }
        );
    }

    #[tokio::test]
    async fn submit_failed() {
        // Arrange
        let contact = MockContactFeatureService::new().with_send_message(
            FOO_SUBMISSION.clone(),
            DispatchResult::Failure("Failed to send email".into()),
        );

        let sut = FormFeatureServiceImpl { contact };

        // Act
        let result = sut.submit(FOO_FORM.clone()).await;

        // Assert
        assert_eq!(
            result,
            FormSubmission {
                outcome: SubmitOutcome::Failed("Failed to send email".into()),
                view: ContactFormView {
                    fields: FOO_FORM.clone(),
                    status: FormStatus::Error,
                    ..Default::default()
                },
                notifications: vec![Notification::error("Failed to send email")],
            }
        );
    }

    #[tokio::test]
    async fn submit_invalid() {
        // Arrange
        let contact = MockContactFeatureService::new();

        let sut = FormFeatureServiceImpl { contact };

        // Act
        let result = sut.submit(INVALID_FORM.clone()).await;

        // Assert
        let errors = INVALID_FORM.clone().validate().unwrap_err();
        assert_eq!(
            result,
            FormSubmission {
                outcome: SubmitOutcome::Invalid(errors.clone()),
                view: ContactFormView {
                    fields: INVALID_FORM.clone(),
                    errors,
                    status: FormStatus::Idle,
                    loading: false,
                },
                notifications: vec![],
            }
        );
    }
}
