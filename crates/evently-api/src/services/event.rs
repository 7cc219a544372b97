// Event service for business logic

use std::sync::Arc;

use evently_contracts::{Event, MessageResponse};
use evently_storage::{
    models::{CreateEvent, UpdateEvent},
    Database, EventRow,
};

use crate::error::ApiError;

pub struct EventService {
    db: Arc<Database>,
}

impl EventService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: CreateEvent) -> Result<Event, ApiError> {
        let row = self.db.create_event(input).await?;
        Ok(Self::row_to_event(row))
    }

    pub async fn list(&self) -> Result<Vec<Event>, ApiError> {
        let rows = self.db.list_events().await?;
        Ok(rows.into_iter().map(Self::row_to_event).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Event, ApiError> {
        let row = self.db.get_event(id).await?.ok_or_else(|| not_found(id))?;
        Ok(Self::row_to_event(row))
    }

    /// Merge the supplied fields onto the stored record. The store performs
    /// the merge in one statement, so existence check and mutation cannot
    /// race.
    pub async fn update(&self, id: i32, changes: UpdateEvent) -> Result<Event, ApiError> {
        let row = self
            .db
            .update_event(id, changes)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(Self::row_to_event(row))
    }

    /// Delete the event, returning a confirmation rather than the record.
    pub async fn remove(&self, id: i32) -> Result<MessageResponse, ApiError> {
        if !self.db.delete_event(id).await? {
            return Err(not_found(id));
        }
        Ok(MessageResponse::new("Event deleted successfully"))
    }

    fn row_to_event(row: EventRow) -> Event {
        Event {
            id: row.id,
            name: row.name,
            date: row.date,
            description: row.description,
            place: row.place,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn not_found(id: i32) -> ApiError {
    ApiError::NotFound(format!("Event with ID {id} not found"))
}
