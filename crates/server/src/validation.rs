//! Request validation for the create endpoints.
//!
//! Request bodies deserialize into the `Create*Request` types, whose fields
//! are all optional so a missing field surfaces here (with its name) rather
//! than as an opaque extractor rejection. `validate` collects every problem
//! before returning, and produces the `New*` model the registries accept.

use serde::{Deserialize, Serialize};

use avukat_ajanda_core::{CaseStatus, CaseStatusError, ClientId, Email};

use crate::models::{NewCase, NewClient};

/// A problem with a single request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field problems found in one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("{}", format_fields(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// A single-field failure.
    #[must_use]
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// The individual field errors.
    #[must_use]
    pub fn fields(&self) -> &[FieldError] {
        &self.errors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

fn format_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every field a request body may carry, for naming fields in decode errors.
const REQUEST_FIELDS: [&str; 7] = [
    "name",
    "email",
    "phone",
    "case_no",
    "title",
    "client_id",
    "status",
];

/// The request field called `name`, if there is one.
#[must_use]
pub fn request_field(name: &str) -> Option<&'static str> {
    REQUEST_FIELDS.iter().copied().find(|field| *field == name)
}

/// Trim a text field, recording an error if it is absent or blank.
fn required_text(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
) -> String {
    let value = value.map(|v| v.trim().to_owned()).unwrap_or_default();
    if value.is_empty() {
        errors.push(field, "is required");
    }
    value
}

/// Body of `POST /api/clients`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateClientRequest {
    /// Check every field and build the client to store.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` naming each missing or malformed field.
    pub fn validate(self) -> Result<NewClient, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required_text(&mut errors, "name", self.name);
        let email = match self.email.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("email", "is required");
                None
            }
            Some(raw) => match Email::parse(raw) {
                Ok(email) => Some(email),
                Err(e) => {
                    errors.push("email", e.to_string());
                    None
                }
            },
        };
        let phone = required_text(&mut errors, "phone", self.phone);

        match email {
            Some(email) => errors.into_result(|| NewClient { name, email, phone }),
            None => Err(errors),
        }
    }
}

/// Body of `POST /api/cases`.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCaseRequest {
    pub case_no: Option<String>,
    pub title: Option<String>,
    pub client_id: Option<i64>,
    pub status: Option<String>,
}

impl CreateCaseRequest {
    /// Check every field and build the case to store.
    ///
    /// An absent or blank `status` becomes [`CaseStatus::Active`].
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` naming each missing or malformed field.
    pub fn validate(self) -> Result<NewCase, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let case_no = required_text(&mut errors, "case_no", self.case_no);
        let title = required_text(&mut errors, "title", self.title);

        let client_id = match self.client_id {
            None => {
                errors.push("client_id", "is required");
                ClientId::new(0)
            }
            Some(id) if id <= 0 => {
                errors.push("client_id", "must be a positive integer");
                ClientId::new(id)
            }
            Some(id) => ClientId::new(id),
        };

        let status = parse_status(&mut errors, self.status.as_deref());

        errors.into_result(|| NewCase {
            case_no,
            title,
            client_id,
            status,
        })
    }
}

fn parse_status(errors: &mut ValidationErrors, raw: Option<&str>) -> CaseStatus {
    match raw.map(str::trim) {
        None | Some("") => CaseStatus::default(),
        Some(raw) => raw.parse().unwrap_or_else(|e: CaseStatusError| {
            errors.push("status", e.to_string());
            CaseStatus::default()
        }),
    }
}

/// Query string of `GET /api/cases`.
#[derive(Debug, Default, Deserialize)]
pub struct CaseListQuery {
    pub status: Option<String>,
}

impl CaseListQuery {
    /// The status filter, if one was given.
    ///
    /// # Errors
    ///
    /// Returns `ValidationErrors` if the status is not a known value.
    pub fn status(&self) -> Result<Option<CaseStatus>, ValidationErrors> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e: CaseStatusError| {
                    ValidationErrors::single("status", e.to_string())
                }),
        }
    }
}
