use std::{collections::BTreeMap, ops::RangeInclusive, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::email_address::EmailAddress;

/// A validated contact form submission, ready to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub first_name: ContactFirstName,
    pub last_name: ContactLastName,
    pub email: EmailAddress,
    pub message: ContactMessageContent,
}

impl ContactSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", *self.first_name, *self.last_name)
    }
}

const NAME_LEN: RangeInclusive<usize> = 2..=50;
const MESSAGE_LEN: RangeInclusive<usize> = 2..=1000;

/// Lengths are counted in utf-16 code units, so `"😀"` has a length of 2.
fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

#[nutype(
    validate(predicate = |name| NAME_LEN.contains(&utf16_len(name))),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactFirstName(String);

#[nutype(
    validate(predicate = |name| NAME_LEN.contains(&utf16_len(name))),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactLastName(String);

#[nutype(
    validate(predicate = |message| MESSAGE_LEN.contains(&utf16_len(message))),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// The raw values of the contact form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContactFormField {
    FirstName,
    LastName,
    Email,
    Message,
}

impl ContactFormField {
    pub const ALL: [Self; 4] = [Self::FirstName, Self::LastName, Self::Email, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// Field-level validation errors, at most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("Invalid contact form")]
pub struct ContactFormErrors(BTreeMap<ContactFormField, &'static str>);

impl ContactFormErrors {
    pub fn get(&self, field: ContactFormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactFormField, &'static str)> + '_ {
        self.0.iter().map(|(&field, &message)| (field, message))
    }

    fn collect<T>(&mut self, field: ContactFormField, result: Result<T, &'static str>) -> Option<T> {
        result.map_err(|message| self.0.insert(field, message)).ok()
    }
}

impl ContactForm {
    pub fn get(&self, field: ContactFormField) -> &str {
        match field {
            ContactFormField::FirstName => &self.first_name,
            ContactFormField::LastName => &self.last_name,
            ContactFormField::Email => &self.email,
            ContactFormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactFormField, value: String) {
        let slot = match field {
            ContactFormField::FirstName => &mut self.first_name,
            ContactFormField::LastName => &mut self.last_name,
            ContactFormField::Email => &mut self.email,
            ContactFormField::Message => &mut self.message,
        };
        *slot = value;
    }

    /// Validate every field independently and build the submission if all of
    /// them are valid.
    pub fn validate(self) -> Result<ContactSubmission, ContactFormErrors> {
        let mut errors = ContactFormErrors::default();

        let first_name = errors.collect(
            ContactFormField::FirstName,
            validate_first_name(self.first_name),
        );
        let last_name = errors.collect(
            ContactFormField::LastName,
            validate_last_name(self.last_name),
        );
        let email = errors.collect(ContactFormField::Email, validate_email(&self.email));
        let message = errors.collect(ContactFormField::Message, validate_message(self.message));

        match (first_name, last_name, email, message) {
            (Some(first_name), Some(last_name), Some(email), Some(message)) => {
                Ok(ContactSubmission {
                    first_name,
                    last_name,
                    email,
                    message,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Picks the message for a value outside of `range`.
fn length_error(
    value: &str,
    range: &RangeInclusive<usize>,
    too_short: &'static str,
    too_long: &'static str,
) -> &'static str {
    if utf16_len(value) < *range.start() {
        too_short
    } else {
        too_long
    }
}

pub fn validate_first_name(value: String) -> Result<ContactFirstName, &'static str> {
    let error = length_error(
        &value,
        &NAME_LEN,
        "First name must be at least 2 characters",
        "First name cannot exceed 50 characters",
    );
    ContactFirstName::try_new(value).map_err(|_| error)
}

pub fn validate_last_name(value: String) -> Result<ContactLastName, &'static str> {
    let error = length_error(
        &value,
        &NAME_LEN,
        "Last name must be at least 2 characters",
        "Last name cannot exceed 50 characters",
    );
    ContactLastName::try_new(value).map_err(|_| error)
}

/// Plain ascii addresses with a dotted domain and an alphabetic top level
/// domain. Quoted local parts, ip literals and internationalized domains are
/// rejected even though they are valid rfc 5321 addresses.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .unwrap()
});

pub fn validate_email(value: &str) -> Result<EmailAddress, &'static str> {
    const INVALID: &str = "Please enter a valid email address";

    if value.starts_with('.') || value.contains("..") || !EMAIL_REGEX.is_match(value) {
        return Err(INVALID);
    }

    value.parse().map_err(|_| INVALID)
}

pub fn validate_message(value: String) -> Result<ContactMessageContent, &'static str> {
    let error = length_error(
        &value,
        &MESSAGE_LEN,
        "Message is required",
        "Message cannot exceed 1000 characters",
    );
    ContactMessageContent::try_new(value).map_err(|_| error)
}

#[cfg(test)]
mod tests {
    use helpdesk_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            first_name: "Max".into(),
            last_name: "Mustermann".into(),
            email: "max.mustermann@example.com".into(),
            message: "Hello World!".into(),
        }
    }

    fn single_error(form: ContactForm) -> (ContactFormField, &'static str) {
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 1, "expected exactly one error: {errors:?}");
        let first = errors.iter().next().unwrap();
        first
    }

    #[test]
    fn valid() {
        let submission = valid_form().validate().unwrap();
        assert_eq!(*submission.first_name, "Max");
        assert_eq!(*submission.last_name, "Mustermann");
        assert_eq!(submission.email.as_str(), "max.mustermann@example.com");
        assert_eq!(*submission.message, "Hello World!");
        assert_eq!(submission.full_name(), "Max Mustermann");
    }

    #[test]
    fn first_name_too_short() {
        let form = ContactForm {
            first_name: "A".into(),
            ..valid_form()
        };
        assert_eq!(
            single_error(form),
            (
                ContactFormField::FirstName,
                "First name must be at least 2 characters"
            )
        );
    }

    #[test]
    fn first_name_too_long() {
        let form = ContactForm {
            first_name: "x".repeat(51),
            ..valid_form()
        };
        assert_eq!(
            single_error(form),
            (
                ContactFormField::FirstName,
                "First name cannot exceed 50 characters"
            )
        );
    }

    #[test]
    fn last_name_bounds() {
        let form = ContactForm {
            last_name: "B".into(),
            ..valid_form()
        };
        assert_eq!(
            single_error(form),
            (
                ContactFormField::LastName,
                "Last name must be at least 2 characters"
            )
        );

        let form = ContactForm {
            last_name: "y".repeat(51),
            ..valid_form()
        };
        assert_eq!(
            single_error(form),
            (
                ContactFormField::LastName,
                "Last name cannot exceed 50 characters"
            )
        );

        let form = ContactForm {
            last_name: "y".repeat(50),
            ..valid_form()
        };
        form.validate().unwrap();
    }

    #[test]
    fn lengths_count_utf16_units() {
        let form = ContactForm {
            first_name: "😀".into(),
            last_name: "😀".repeat(25),
            message: "😀".repeat(500),
            ..valid_form()
        };
        form.validate().unwrap();

        let form = ContactForm {
            first_name: "😀".repeat(26),
            ..valid_form()
        };
        assert_eq!(
            single_error(form),
            (
                ContactFormField::FirstName,
                "First name cannot exceed 50 characters"
            )
        );

        let form = ContactForm {
            message: "😀".repeat(501),
            ..valid_form()
        };
        assert_eq!(
            single_error(form),
            (
                ContactFormField::Message,
                "Message cannot exceed 1000 characters"
            )
        );
    }

    #[test]
    fn names_count_characters_not_bytes() {
        let form = ContactForm {
            first_name: "Jö".into(),
            last_name: "ü".repeat(50),
            ..valid_form()
        };
        form.validate().unwrap();
    }

    #[test]
    fn invalid_email() {
        let form = ContactForm {
            email: "not-an-email".into(),
            ..valid_form()
        };
        assert_eq!(
            single_error(form),
            (ContactFormField::Email, "Please enter a valid email address")
        );
    }

    #[test]
    fn email_needs_plain_dotted_domain() {
        for email in [
            "a@b",
            "a@localhost",
            "a@127.0.0.1",
            "a@[127.0.0.1]",
            "\"a b\"@example.com",
            "a@bücher.de",
            ".a@example.com",
            "a..b@example.com",
            "a.@example.com",
            "a@-example.com",
        ] {
            assert_eq!(
                validate_email(email),
                Err("Please enter a valid email address"),
                "{email}"
            );
        }
    }

    #[test]
    fn email_allowed_characters() {
        for email in ["o'neil@example.com", "a+tag@sub.example.co.uk", "A_B-c@Example.DE"] {
            assert_eq!(validate_email(email).unwrap().as_str(), email);
        }
    }

    #[test]
    fn short_email() {
        let form = ContactForm {
            email: "a@b.com".into(),
            ..valid_form()
        };
        let submission = form.validate().unwrap();
        assert_eq!(submission.email.as_str(), "a@b.com");
    }

    #[test]
    fn empty_message() {
        let form = ContactForm {
            message: "".into(),
            ..valid_form()
        };
        assert_eq!(
            single_error(form),
            (ContactFormField::Message, "Message is required")
        );
    }

    #[test]
    fn message_length_limit() {
        let form = ContactForm {
            message: "m".repeat(1001),
            ..valid_form()
        };
        assert_eq!(
            single_error(form),
            (
                ContactFormField::Message,
                "Message cannot exceed 1000 characters"
            )
        );

        let form = ContactForm {
            message: "m".repeat(1000),
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap().message.len(), 1000);
    }

    #[test]
    fn all_fields_invalid() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(
            errors.iter().collect::<Vec<_>>(),
            [
                (
                    ContactFormField::FirstName,
                    "First name must be at least 2 characters"
                ),
                (
                    ContactFormField::LastName,
                    "Last name must be at least 2 characters"
                ),
                (ContactFormField::Email, "Please enter a valid email address"),
                (ContactFormField::Message, "Message is required"),
            ]
        );
    }

    #[test]
    fn errors_serialize_keyed_by_field_name() {
        let form = ContactForm {
            first_name: "A".into(),
            email: "nope".into(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(
            serde_json::to_value(&errors).unwrap(),
            serde_json::json!({
                "firstName": "First name must be at least 2 characters",
                "email": "Please enter a valid email address",
            })
        );
    }

    #[test]
    fn form_deserializes_camel_case_with_defaults() {
        let form: ContactForm =
            serde_json::from_str(r#"{"firstName": "Max", "email": "max@example.com"}"#).unwrap();
        assert_eq!(
            form,
            ContactForm {
                first_name: "Max".into(),
                email: "max@example.com".into(),
                ..Default::default()
            }
        );
    }

    #[test]
    fn get_and_set() {
        let mut form = ContactForm::default();
        for field in ContactFormField::ALL {
            form.set(field, field.as_str().into());
        }
        for field in ContactFormField::ALL {
            assert_eq!(form.get(field), field.as_str());
        }
        assert_matches!(form.validate(), Err(_));
    }
}
