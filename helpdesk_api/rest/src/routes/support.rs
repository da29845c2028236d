use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    routing, Router,
};
use helpdesk_core_form_contracts::{
    ContactFormView, FormFeatureService, FormSubmission, Notification, NotificationLevel,
};
use helpdesk_models::contact::ContactFormField;
use helpdesk_templates_contracts::{
    SupportPageField, SupportPageNotification, SupportPageTemplate, TemplateService,
};
use tracing::debug;

use super::internal_server_error;
use crate::models::contact::ApiContactForm;

#[derive(Debug)]
pub struct SupportState<Form, Template> {
    pub form: Form,
    pub template: Template,
}

pub fn router(
    state: Arc<SupportState<impl FormFeatureService, impl TemplateService>>,
) -> Router<()> {
    Router::new()
        .route("/support", routing::get(show_page).post(submit_form))
        .with_state(state)
}

async fn show_page(
    state: State<Arc<SupportState<impl FormFeatureService, impl TemplateService>>>,
) -> Response {
    render_page(&state.template, ContactFormView::default(), Vec::new())
}

async fn submit_form(
    state: State<Arc<SupportState<impl FormFeatureService, impl TemplateService>>>,
    axum::Form(form): axum::Form<ApiContactForm>,
) -> Response {
    let FormSubmission {
        outcome,
        view,
        notifications,
    } = state.form.submit(form.into()).await;
    debug!(?outcome, "processed support form submission");

    render_page(&state.template, view, notifications)
}

fn render_page(
    template: &impl TemplateService,
    view: ContactFormView,
    notifications: Vec<Notification>,
) -> Response {
    let page = SupportPageTemplate {
        fields: ContactFormField::ALL
            .into_iter()
            .map(|field| page_field(field, &view))
            .collect(),
        status: view.status.as_str().into(),
        notifications: notifications.into_iter().map(page_notification).collect(),
    };

    match template.render(&page) {
        Ok(html) => Html(html).into_response(),
        Err(err) => internal_server_error(err),
    }
}

fn page_field(field: ContactFormField, view: &ContactFormView) -> SupportPageField {
    let (label, input_type, placeholder) = match field {
        ContactFormField::FirstName => ("First Name", "text", "Enter your first name"),
        ContactFormField::LastName => ("Last Name", "text", "Enter your last name"),
        ContactFormField::Email => ("Email Address", "email", "example@domain.com"),
        ContactFormField::Message => ("Message", "textarea", "Write your message here..."),
    };

    SupportPageField {
        name: field.as_str().into(),
        label: label.into(),
        input_type: input_type.into(),
        placeholder: placeholder.into(),
        value: view.fields.get(field).into(),
        error: view.errors.get(field).map(Into::into),
    }
}

fn page_notification(notification: Notification) -> SupportPageNotification {
    let level = match notification.level {
        NotificationLevel::Success => "success",
        NotificationLevel::Error => "error",
    };

    SupportPageNotification {
        level: level.into(),
        message: notification.message,
        duration_ms: notification
            .duration
            .map(|duration| u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)),
    }
}
