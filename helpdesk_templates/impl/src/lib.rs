use std::sync::Arc;

use helpdesk_di::Build;
use helpdesk_templates_contracts::{Template, TemplateService, TEMPLATES};
use tera::Tera;

#[derive(Debug, Clone, Default, Build)]
pub struct TemplateServiceImpl {
    #[state]
    state: State,
}

#[derive(Debug, Clone)]
struct State(Arc<Tera>);

impl Default for State {
    fn default() -> Self {
        let mut tera = Tera::default();

        for &(name, template) in TEMPLATES {
            if let Err(err) = tera.add_raw_template(name, template) {
                panic!("Failed to parse template {name}: {err}");
            }
        }

        Self(tera.into())
    }
}

impl TemplateService for TemplateServiceImpl {
    fn render<T: Template>(&self, template: &T) -> anyhow::Result<String> {
        let context = tera::Context::from_serialize(template)?;
        self.state.0.render(T::NAME, &context).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use helpdesk_templates_contracts::{
        ContactMessageTemplate, SupportPageField, SupportPageNotification, SupportPageTemplate,
    };

    use super::*;

    fn make_sut() -> TemplateServiceImpl {
        TemplateServiceImpl::default()
    }

    fn field(name: &str, input_type: &str, value: &str, error: Option<&str>) -> SupportPageField {
        SupportPageField {
            name: name.into(),
            label: name.into(),
            input_type: input_type.into(),
            placeholder: String::new(),
            value: value.into(),
            error: error.map(Into::into),
        }
    }

    #[test]
    fn contact_message() {
        // Arrange
        let sut = make_sut();

        // Act
        let result = sut
            .render(&ContactMessageTemplate {
                first_name: "Max".into(),
                last_name: "Mustermann".into(),
                email: "max.mustermann@example.com".into(),
                message: "Hello World!\nHow are you?".into(),
            })
            .unwrap();

        // Assert
        assert!(result.contains("<strong>Name:</strong> Max Mustermann</p>"));
        assert!(result.contains("<strong>Email:</strong> max.mustermann@example.com</p>"));
        assert!(result.contains(">Hello World!\nHow are you?</p>"));
    }

    #[test]
    fn contact_message_escapes_user_input() {
        // Arrange
        let sut = make_sut();

        // Act
        let result = sut
            .render(&ContactMessageTemplate {
                first_name: "<b>Max</b>".into(),
                last_name: "Mustermann".into(),
                email: "max.mustermann@example.com".into(),
                message: "<script>alert(1)</script>".into(),
            })
            .unwrap();

        // Assert
        assert!(!result.contains("<script>"));
        assert!(!result.contains("<b>Max</b>"));
        assert!(result.contains("&lt;script&gt;"));
    }

    #[test]
    fn support_page_idle() {
        // Arrange
        let sut = make_sut();

        // Act
        let result = sut
            .render(&SupportPageTemplate {
                fields: vec![
                    field("firstName", "text", "", None),
                    field("message", "textarea", "", None),
                ],
                status: "idle".into(),
                notifications: vec![],
            })
            .unwrap();

        // Assert
        assert!(result.contains(r#"<input id="firstName" name="firstName" type="text""#));
        assert!(result.contains(r#"<textarea id="message" name="message""#));
        assert!(result.contains(r#"placeholder="" value="">"#));
        assert!(result.contains(r#"<button type="submit">Send Message</button>"#));
        assert!(!result.contains(r#"role="alert""#));
        assert!(!result.contains(r#"class="toast"#));
    }

    #[test]
    fn support_page_error() {
        // Arrange
        let sut = make_sut();

        // Act
        let result = sut
            .render(&SupportPageTemplate {
                fields: vec![field(
                    "firstName",
                    "text",
                    "A",
                    Some("First name must be at least 2 characters"),
                )],
                status: "error".into(),
                notifications: vec![SupportPageNotification {
                    level: "error".into(),
                    message: "Failed to send email".into(),
                    duration_ms: None,
                }],
            })
            .unwrap();

        // Assert
        assert!(result.contains(r#"value="A""#));
        assert!(result.contains(
            r#"<span class="error" data-field="firstName">First name must be at least 2 characters</span>"#
        ));
        assert!(result.contains(r#"role="alert""#));
        assert!(result.contains(r#"<div class="toast error" role="status">Failed to send email</div>"#));
    }

    #[test]
    fn support_page_disables_form_on_submit() {
        // Arrange
        let sut = make_sut();

        // Act
        let result = sut
            .render(&SupportPageTemplate {
                fields: vec![field("email", "email", "", None)],
                status: "idle".into(),
                notifications: vec![],
            })
            .unwrap();

        // Assert
        assert!(result.contains(r#"<form id="support-form" method="post""#));
        assert!(result
            .contains(r#"document.getElementById("support-form").addEventListener("submit""#));
        assert!(result.contains("for (const control of form.elements) control.disabled = true;"));
        assert!(result.contains("event.preventDefault();"));
    }
}
