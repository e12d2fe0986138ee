use std::collections::{HashMap, HashSet};

use tracing::warn;

use super::validation::{can_add_char, validate_field, Field, ValidationError};
use crate::auth::Credentials;

/// Everything the login form holds between keystrokes.
///
/// Errors are recomputed on every edit but only shown for a field once it
/// has been touched or a submit was attempted.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    email: String,
    password: String,
    errors: HashMap<Field, ValidationError>,
    touched: HashSet<Field>,
    submit_attempted: bool,
    submitting: bool,
    loading: bool,
    notice: Option<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
        }
    }

    /// Replace a field's value, truncated to the field's length limit.
    /// Returns false if the value had to be altered to fit.
    pub fn set_value(&mut self, field: Field, value: &str) -> bool {
        let cleaned: String = value
            .chars()
            .filter(|c| !c.is_control())
            .take(field.max_length())
            .collect();
        let intact = cleaned == value;
        if !intact {
            warn!(
                field = field.label(),
                max_length = field.max_length(),
                "Value altered to fit the field"
            );
        }
        *self.value_mut(field) = cleaned;
        self.after_edit(field);
        intact
    }

    /// Append a typed character. Returns false if it was refused.
    pub fn push_char(&mut self, field: Field, c: char) -> bool {
        let len = self.value(field).chars().count();
        if !can_add_char(field, len, c) {
            return false;
        }
        self.value_mut(field).push(c);
        self.after_edit(field);
        true
    }

    pub fn pop_char(&mut self, field: Field) {
        if self.value_mut(field).pop().is_some() {
            self.after_edit(field);
        }
    }

    fn after_edit(&mut self, field: Field) {
        self.notice = None;
        self.revalidate(field);
    }

    fn revalidate(&mut self, field: Field) -> bool {
        match validate_field(field, self.value(field)) {
            Ok(()) => {
                self.errors.remove(&field);
                true
            }
            Err(e) => {
                self.errors.insert(field, e);
                false
            }
        }
    }

    /// Mark a field as interacted with (focus left it)
    pub fn touch(&mut self, field: Field) {
        self.touched.insert(field);
        self.revalidate(field);
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Validate every field and record that a submit was attempted.
    pub fn validate_all(&mut self) -> bool {
        self.submit_attempted = true;
        Field::ALL
            .iter()
            .fold(true, |valid, &field| self.revalidate(field) && valid)
    }

    /// Current error for a field, shown or not
    pub fn error(&self, field: Field) -> Option<ValidationError> {
        self.errors.get(&field).copied()
    }

    /// Error message to display next to a field, if it should be shown yet
    pub fn visible_error(&self, field: Field) -> Option<String> {
        if self.submit_attempted || self.is_touched(field) {
            self.error(field).map(|e| e.message(field))
        } else {
            None
        }
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.trim(), self.password.clone())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// A submission is outstanding
    pub fn is_busy(&self) -> bool {
        self.submitting || self.loading
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub(crate) fn set_notice(&mut self, notice: String) {
        self.notice = Some(notice);
    }

    pub(crate) fn begin_submission(&mut self) {
        self.submitting = true;
        self.loading = true;
        self.notice = None;
    }

    pub(crate) fn end_submission(&mut self) {
        self.submitting = false;
        self.loading = false;
    }

    /// Back to the freshly mounted state
    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}
