use std::sync::Arc;

use helpdesk_core_contact_contracts::{
    ContactFeatureService, DispatchResult, SEND_FAILED_MESSAGE, UNEXPECTED_ERROR_MESSAGE,
};
use helpdesk_di::Build;
use helpdesk_email_contracts::{ContentType, Email, EmailService};
use helpdesk_models::{contact::ContactSubmission, email_address::EmailAddressWithName};
use helpdesk_templates_contracts::{ContactMessageTemplate, TemplateService};
use tracing::{error, info};

pub const CONTACT_EMAIL_SUBJECT: &str = "New Contact Form Submission";

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Template, Email> {
    template: Template,
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// The admin inbox receiving all contact messages.
    pub recipient: Arc<EmailAddressWithName>,
}

impl<Template, EmailS> ContactFeatureServiceImpl<Template, EmailS> {
    pub fn new(template: Template, email: EmailS, config: ContactFeatureConfig) -> Self {
        Self {
            template,
            email,
            config,
        }
    }
}

impl<Template, EmailS> ContactFeatureService for ContactFeatureServiceImpl<Template, EmailS>
where
    Template: TemplateService,
    EmailS: EmailService,
{
    async fn send_message(&self, submission: ContactSubmission) -> DispatchResult {
        let reply_to = submission.email.clone().with_name(submission.full_name());

        let body = match self.template.render(&ContactMessageTemplate {
            first_name: submission.first_name.into_inner(),
            last_name: submission.last_name.into_inner(),
            email: submission.email.to_string(),
            message: submission.message.into_inner(),
        }) {
            Ok(body) => body,
            Err(err) => {
                error!("Failed to render contact message: {err:#}");
                return DispatchResult::Failure(UNEXPECTED_ERROR_MESSAGE.into());
            }
        };

        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: CONTACT_EMAIL_SUBJECT.into(),
            body,
            content_type: ContentType::Html,
            reply_to: Some(reply_to),
        };

        match self.email.send(email).await {
            Ok(Ok(())) => {
                info!("Contact message sent");
                DispatchResult::Success
            }
            Ok(Err(rejection)) => {
                error!("Email send error: {rejection}");
                DispatchResult::Failure(SEND_FAILED_MESSAGE.into())
            }
            Err(err) => {
                error!("Email service error: {err:#}");
                DispatchResult::Failure(UNEXPECTED_ERROR_MESSAGE.into())
            }
        }
    }
}
