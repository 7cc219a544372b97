// Request validation stage.
//
// DTOs deserialize with `deny_unknown_fields`, then `Validate` checks every
// per-field constraint and returns either a typed, parsed input or the full
// list of violations. Handlers receive `ValidatedJson<T>` and never see
// unvalidated data.

use std::sync::LazyLock;

use axum::extract::{FromRequest, Request};
use axum::Json;
use chrono::{DateTime, Utc};
use evently_contracts::{CreateEventRequest, LoginRequest, RegisterRequest, UpdateEventRequest};
use evently_storage::models::{CreateEvent, UpdateEvent};
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validation producing a typed input or the full list of violations.
pub trait Validate: Sized {
    type Valid;

    fn validate(self) -> Result<Self::Valid, Vec<String>>;
}

/// Extractor that rejects undeclared fields (via serde) and per-field
/// violations (via `Validate`) with a single structured 400.
pub struct ValidatedJson<T: Validate>(pub T::Valid);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: Validate + DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(dto) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Validation(vec![rejection.body_text()]))?;

        dto.validate().map(ValidatedJson).map_err(ApiError::Validation)
    }
}

fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

impl Validate for RegisterRequest {
    type Valid = RegisterRequest;

    fn validate(self) -> Result<Self::Valid, Vec<String>> {
        let mut violations = Vec::new();

        if self.name.trim().is_empty() {
            violations.push("name should not be empty".to_string());
        }
        if !is_valid_email(&self.email) {
            violations.push("email must be an email".to_string());
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            violations.push(format!(
                "password must be longer than or equal to {MIN_PASSWORD_LEN} characters"
            ));
        }

        if violations.is_empty() {
            Ok(self)
        } else {
            Err(violations)
        }
    }
}

impl Validate for LoginRequest {
    type Valid = LoginRequest;

    fn validate(self) -> Result<Self::Valid, Vec<String>> {
        let mut violations = Vec::new();

        if !is_valid_email(&self.email) {
            violations.push("email must be an email".to_string());
        }
        if self.password.is_empty() {
            violations.push("password should not be empty".to_string());
        }

        if violations.is_empty() {
            Ok(self)
        } else {
            Err(violations)
        }
    }
}

impl Validate for CreateEventRequest {
    type Valid = CreateEvent;

    fn validate(self) -> Result<Self::Valid, Vec<String>> {
        let mut violations = Vec::new();

        if self.name.trim().is_empty() {
            violations.push("name should not be empty".to_string());
        }
        let date = parse_date(&self.date);
        if date.is_none() {
            violations.push("date must be a valid ISO 8601 date string".to_string());
        }

        match (violations.is_empty(), date) {
            (true, Some(date)) => Ok(CreateEvent {
                name: self.name,
                date,
                description: self.description,
                place: self.place,
            }),
            _ => Err(violations),
        }
    }
}

impl Validate for UpdateEventRequest {
    type Valid = UpdateEvent;

    fn validate(self) -> Result<Self::Valid, Vec<String>> {
        let mut violations = Vec::new();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                violations.push("name should not be empty".to_string());
            }
        }
        let date = match &self.date {
            None => None,
            Some(raw) => match parse_date(raw) {
                Some(parsed) => Some(parsed),
                None => {
                    violations.push("date must be a valid ISO 8601 date string".to_string());
                    None
                }
            },
        };

        if violations.is_empty() {
            Ok(UpdateEvent {
                name: self.name,
                date,
                description: self.description,
                place: self.place,
            })
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_collects_every_violation() {
        let request = RegisterRequest {
            name: "  ".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        };

        let violations = request.validate().unwrap_err();
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0], "name should not be empty");
        assert_eq!(violations[1], "email must be an email");
        assert!(violations[2].starts_with("password must be longer"));
    }

    #[test]
    fn register_accepts_valid_input() {
        let request = RegisterRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn create_event_parses_the_date() {
        let request = CreateEventRequest {
            name: "Launch".to_string(),
            date: "2025-01-01T10:00:00Z".to_string(),
            description: None,
            place: None,
        };

        let input = request.validate().unwrap();
        assert_eq!(input.date.to_rfc3339(), "2025-01-01T10:00:00+00:00");
    }

    #[test]
    fn create_event_rejects_a_malformed_date() {
        let request = CreateEventRequest {
            name: "Launch".to_string(),
            date: "tomorrow-ish".to_string(),
            description: None,
            place: None,
        };

        let violations = request.validate().unwrap_err();
        assert_eq!(
            violations,
            vec!["date must be a valid ISO 8601 date string".to_string()]
        );
    }

    #[test]
    fn update_event_allows_absent_fields() {
        let request = UpdateEventRequest {
            place: Some("Berlin".to_string()),
            ..Default::default()
        };

        let changes = request.validate().unwrap();
        assert!(changes.name.is_none());
        assert!(changes.date.is_none());
        assert_eq!(changes.place.as_deref(), Some("Berlin"));
    }

    #[test]
    fn update_event_rejects_empty_name_when_present() {
        let request = UpdateEventRequest {
            name: Some(String::new()),
            ..Default::default()
        };

        let violations = request.validate().unwrap_err();
        assert_eq!(violations, vec!["name should not be empty".to_string()]);
    }

    #[test]
    fn email_pattern_matches_reasonable_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.domain.org"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user @example.com"));
        assert!(!is_valid_email("@example.com"));
    }
}
