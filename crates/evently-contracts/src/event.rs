// Event DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An event as returned by the API.
///
/// `description` and `place` serialize as explicit `null` when unset so
/// clients can rely on a fixed shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: Option<String>,
    pub place: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a new event.
///
/// `date` arrives as a string and is parsed during validation; unknown
/// fields are rejected outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEventRequest {
    pub name: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

/// Request to partially update an event. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_camel_case_with_explicit_nulls() {
        let event = Event {
            id: 1,
            name: "Launch".to_string(),
            date: "2025-01-01T10:00:00Z".parse().unwrap(),
            description: None,
            place: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["id"], 1);
        assert!(json["description"].is_null());
        assert!(json["place"].is_null());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn create_request_rejects_unknown_fields() {
        let result: Result<CreateEventRequest, _> = serde_json::from_str(
            r#"{"name": "Launch", "date": "2025-01-01T10:00:00Z", "organizer": "nobody"}"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("organizer"), "error should name the field: {err}");
    }

    #[test]
    fn update_request_all_fields_optional() {
        let req: UpdateEventRequest = serde_json::from_str(r#"{"place": "Berlin"}"#).unwrap();
        assert!(req.name.is_none());
        assert_eq!(req.place.as_deref(), Some("Berlin"));
    }
}
