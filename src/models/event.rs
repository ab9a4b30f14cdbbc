use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CalendarEvent {
    pub id: Uuid,
    #[schema(example = "Строевой смотр")]
    pub title: String,
    pub description: Option<String>,
    pub organizer: Uuid,
    pub participants: Vec<Uuid>,
    #[schema(example = "1-я рота")]
    pub unit: String,
    pub location: Option<String>,
    #[schema(format = DateTime, example = "2025-10-05T08:00:00Z")]
    pub starts_at: DateTime<Utc>,
    #[schema(format = DateTime, example = "2025-10-05T10:00:00Z")]
    pub ends_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EventCreateRequest {
    #[schema(example = "Строевой смотр")]
    pub title: String,
    pub description: Option<String>,
    pub participants: Option<Vec<Uuid>>,
    pub location: Option<String>,
    #[schema(format = DateTime, example = "2025-10-05T08:00:00Z")]
    pub starts_at: DateTime<Utc>,
    #[schema(format = DateTime, example = "2025-10-05T10:00:00Z")]
    pub ends_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct EventUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub participants: Option<Vec<Uuid>>,
    pub location: Option<String>,
    #[schema(format = DateTime, example = "2025-10-05T09:00:00Z")]
    pub starts_at: Option<DateTime<Utc>>,
    #[schema(format = DateTime, example = "2025-10-05T11:00:00Z")]
    pub ends_at: Option<DateTime<Utc>>,
}
