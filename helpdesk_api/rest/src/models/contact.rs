use helpdesk_core_contact_contracts::DispatchResult;
use helpdesk_models::contact::{ContactForm, ContactFormErrors};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContactForm {
    /// First name of the user
    #[serde(default)]
    pub first_name: String,
    /// Last name of the user
    #[serde(default)]
    pub last_name: String,
    /// Email address of the user
    #[serde(default)]
    pub email: String,
    /// Content of the message
    #[serde(default)]
    pub message: String,
}

impl From<ApiContactForm> for ContactForm {
    fn from(value: ApiContactForm) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            message: value.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiDispatchResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<DispatchResult> for ApiDispatchResult {
    fn from(value: DispatchResult) -> Self {
        match value {
            DispatchResult::Success => Self {
                success: true,
                error: None,
            },
            DispatchResult::Failure(error) => Self {
                success: false,
                error: Some(error),
            },
        }
    }
}

#[derive(Serialize)]
pub struct ApiInvalidContactForm {
    pub detail: &'static str,
    pub errors: ContactFormErrors,
}

impl From<ContactFormErrors> for ApiInvalidContactForm {
    fn from(errors: ContactFormErrors) -> Self {
        Self {
            detail: "Invalid contact form",
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn dispatch_result() {
        assert_eq!(
            serde_json::to_value(ApiDispatchResult::from(DispatchResult::Success)).unwrap(),
            json!({"success": true})
        );
        assert_eq!(
            serde_json::to_value(ApiDispatchResult::from(DispatchResult::Failure(
                "Failed to send email".into()
            )))
            .unwrap(),
            json!({"success": false, "error": "Failed to send email"})
        );
    }
}
