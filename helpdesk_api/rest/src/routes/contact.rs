use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use helpdesk_core_contact_contracts::ContactFeatureService;
use helpdesk_models::contact::ContactForm;
use tracing::debug;

use crate::models::contact::{ApiContactForm, ApiDispatchResult, ApiInvalidContactForm};

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(send_message))
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    Json(form): Json<ApiContactForm>,
) -> Response {
    let submission = match ContactForm::from(form).validate() {
        Ok(submission) => submission,
        Err(errors) => {
            debug!(?errors, "rejecting invalid contact form");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiInvalidContactForm::from(errors)),
            )
                .into_response();
        }
    };

    let result = service.send_message(submission).await;
    Json(ApiDispatchResult::from(result)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request},
    };
    use helpdesk_core_contact_contracts::{DispatchResult, MockContactFeatureService};
    use helpdesk_demo::{FOO_FORM, FOO_SUBMISSION};
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    fn foo_form_json() -> Value {
        json!({
            "firstName": FOO_FORM.first_name,
            "lastName": FOO_FORM.last_name,
            "email": FOO_FORM.email,
            "message": FOO_FORM.message,
        })
    }

    async fn post(contact: MockContactFeatureService, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::post("/contact")
            .header(CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        let response = router(Arc::new(contact)).oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let contact = MockContactFeatureService::new()
            .with_send_message(FOO_SUBMISSION.clone(), DispatchResult::Success);

        // Act
        let result = post(contact, foo_form_json().to_string()).await;

        // Assert
        assert_eq!(result, (StatusCode::OK, json!({"success": true})));
    }

    #[tokio::test]
    async fn dispatch_failure() {
        // Arrange
        let contact = MockContactFeatureService::new().with_send_message(
            FOO_SUBMISSION.clone(),
            DispatchResult::Failure("Failed to send email".into()),
        );

        // Act
        let result = post(contact, foo_form_json().to_string()).await;

        // Assert
        assert_eq!(
            result,
            (
                StatusCode::OK,
                json!({"success": false, "error": "Failed to send email"})
            )
        );
    }

    #[tokio::test]
    async fn invalid_form() {
        // Arrange
        let contact = MockContactFeatureService::new();
        let body = json!({
            "firstName": "A",
            "lastName": "Mustermann",
            "email": "not-an-email",
            "message": "Hello World!",
        });

        // Act
        let result = post(contact, body.to_string()).await;

        // Assert
        assert_eq!(
            result,
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "detail": "Invalid contact form",
                    "errors": {
                        "firstName": "First name must be at least 2 characters",
                        "email": "Please enter a valid email address",
                    },
                })
            )
        );
    }

    #[tokio::test]
    async fn missing_fields() {
        let contact = MockContactFeatureService::new();

        let (status, body) = post(contact, "{}").await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["errors"]["message"], "Message is required");
    }

    #[tokio::test]
    async fn malformed_json() {
        let contact = MockContactFeatureService::new();

        let (status, _) = post(contact, "{").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
