use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    event::{
        event::{CreateEvent, DeleteEvent, UpdateEvent},
        Event,
    },
    id::EventId,
};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: CreateEvent) -> AppResult<EventId>;
    async fn find_all(&self) -> AppResult<Vec<Event>>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    /// Owner-or-admin gated partial update.
    async fn update(&self, event: UpdateEvent) -> AppResult<()>;
    /// Owner-or-admin gated delete; removes the event's registrations too.
    async fn delete(&self, event: DeleteEvent) -> AppResult<()>;
    /// Closes registration on every open event; returns how many were closed.
    async fn close_registrations_all(&self) -> AppResult<u64>;
}
