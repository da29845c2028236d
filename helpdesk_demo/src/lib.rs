//! Fixtures shared by the tests of the other crates.

use std::sync::LazyLock;

use helpdesk_models::{
    contact::{ContactForm, ContactSubmission},
    email_address::EmailAddressWithName,
};

pub static ADMIN_EMAIL: LazyLock<EmailAddressWithName> =
    LazyLock::new(|| "Helpdesk Admin <admin@example.com>".parse().unwrap());

pub static FOO_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    first_name: "Max".into(),
    last_name: "Mustermann".into(),
    email: "max.mustermann@example.de".into(),
    message: "Hello World!\nI have a question about my order.".into(),
});

pub static FOO_SUBMISSION: LazyLock<ContactSubmission> =
    LazyLock::new(|| FOO_FORM.clone().validate().unwrap());

/// A form that fails validation on every field.
pub static INVALID_FORM: LazyLock<ContactForm> = LazyLock::new(|| ContactForm {
    first_name: "A".into(),
    last_name: "B".repeat(51),
    email: "not-an-email".into(),
    message: String::new(),
});
