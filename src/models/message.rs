use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Unit-scoped chat entry; the feed is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub id: Uuid,
    pub author: Uuid,
    #[schema(example = "1-я рота")]
    pub unit: String,
    #[schema(example = "Построение в 08:00")]
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatPostRequest {
    #[schema(example = "Построение в 08:00")]
    pub body: String,
}
