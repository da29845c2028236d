use std::{
    panic::AssertUnwindSafe,
    sync::{Mutex, MutexGuard, PoisonError},
};

use futures::FutureExt;
use helpdesk_core_contact_contracts::{
    ContactFeatureService, DispatchResult, UNEXPECTED_ERROR_MESSAGE,
};
use helpdesk_core_form_contracts::{
    ContactFormView, FormStatus, Notification, Notifier, SubmitOutcome, FAILED_FALLBACK_MESSAGE,
    SENT_MESSAGE, SENT_MESSAGE_DURATION,
};
use helpdesk_models::contact::{ContactForm, ContactFormErrors, ContactFormField};
use tracing::{debug, error};

/// State machine behind a single instance of the contact form.
///
/// The form is `idle` initially and moves to `success` or `error` once a
/// dispatch completes. While a dispatch is pending the form is `loading`: the
/// fields cannot be edited and further submissions are ignored.
#[derive(Debug)]
pub struct ContactFormController<'a, Contact, N> {
    contact: &'a Contact,
    notifier: N,
    state: Mutex<FormState>,
}

#[derive(Debug, Default)]
struct FormState {
    fields: ContactForm,
    errors: ContactFormErrors,
    status: FormStatus,
    loading: bool,
}

impl<'a, Contact, N> ContactFormController<'a, Contact, N>
where
    Contact: ContactFeatureService,
    N: Notifier,
{
    pub fn new(contact: &'a Contact, notifier: N) -> Self {
        Self {
            contact,
            notifier,
            state: Default::default(),
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn fields(&self) -> ContactForm {
        self.lock().fields.clone()
    }

    pub fn errors(&self) -> ContactFormErrors {
        self.lock().errors.clone()
    }

    pub fn status(&self) -> FormStatus {
        self.lock().status
    }

    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    pub fn view(&self) -> ContactFormView {
        let state = self.lock();
        ContactFormView {
            fields: state.fields.clone(),
            errors: state.errors.clone(),
            status: state.status,
            loading: state.loading,
        }
    }

    /// Update a single field. Returns `false` if the form is disabled because
    /// a submission is pending.
    pub fn set_field(&self, field: ContactFormField, value: String) -> bool {
        let mut state = self.lock();
        if state.loading {
            return false;
        }
        state.fields.set(field, value);
        true
    }

    /// Replace all fields at once. Returns `false` if the form is disabled
    /// because a submission is pending.
    pub fn set_fields(&self, fields: ContactForm) -> bool {
        let mut state = self.lock();
        if state.loading {
            return false;
        }
        state.fields = fields;
        true
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let submission = {
            let mut state = self.lock();
            if state.loading {
                debug!("Ignoring submission while another one is pending");
                return SubmitOutcome::Ignored;
            }

            match state.fields.clone().validate() {
                Ok(submission) => {
                    state.errors = ContactFormErrors::default();
                    state.loading = true;
                    state.status = FormStatus::Idle;
                    submission
                }
                Err(errors) => {
                    state.errors = errors.clone();
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        let _loading = LoadingGuard(&self.state);

        let result = AssertUnwindSafe(self.contact.send_message(submission))
            .catch_unwind()
            .await;

        let (outcome, notification) = {
            let mut state = self.lock();
            match result {
                Ok(DispatchResult::Success) => {
                    state.status = FormStatus::Success;
                    state.fields = ContactForm::default();
                    (
                        SubmitOutcome::Sent,
                        Notification::success(SENT_MESSAGE, Some(SENT_MESSAGE_DURATION)),
                    )
                }
                Ok(DispatchResult::Failure(description)) => {
                    state.status = FormStatus::Error;
                    let message = if description.is_empty() {
                        FAILED_FALLBACK_MESSAGE.to_owned()
                    } else {
                        description
                    };
                    (
                        SubmitOutcome::Failed(message.clone()),
                        Notification::error(message),
                    )
                }
                Err(_) => {
                    error!("Contact message dispatch panicked");
                    state.status = FormStatus::Error;
                    (
                        SubmitOutcome::Failed(UNEXPECTED_ERROR_MESSAGE.into()),
                        Notification::error(UNEXPECTED_ERROR_MESSAGE),
                    )
                }
            }
        };

        self.notifier.notify(notification);

        outcome
    }

    fn lock(&self) -> MutexGuard<'_, FormState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<FormState>) -> MutexGuard<'_, FormState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears the loading flag when the pending submission completes or is dropped.
struct LoadingGuard<'a>(&'a Mutex<FormState>);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        lock(self.0).loading = false;
    }
}
