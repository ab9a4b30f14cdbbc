use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::event::{CalendarEvent, EventCreateRequest, EventUpdateRequest};
use crate::utils::{day_bounds, utc_now};

#[derive(Debug, Default)]
pub struct EventStore {
    inner: RwLock<Vec<CalendarEvent>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, organizer: Uuid, unit: &str, req: EventCreateRequest) -> CalendarEvent {
        let now = utc_now();
        let event = CalendarEvent {
            id: Uuid::new_v4(),
            title: req.title,
            description: req.description,
            organizer,
            participants: req.participants.unwrap_or_default(),
            unit: unit.to_string(),
            location: req.location,
            starts_at: req.starts_at,
            ends_at: req.ends_at,
            created_at: now,
            updated_at: now,
        };
        self.inner.write().push(event.clone());
        event
    }

    pub fn update(&self, id: Uuid, req: EventUpdateRequest) -> Option<CalendarEvent> {
        let mut events = self.inner.write();
        let event = events.iter_mut().find(|e| e.id == id)?;

        if let Some(title) = req.title {
            event.title = title;
        }
        if let Some(description) = req.description {
            event.description = Some(description);
        }
        if let Some(participants) = req.participants {
            event.participants = participants;
        }
        if let Some(location) = req.location {
            event.location = Some(location);
        }
        if let Some(starts_at) = req.starts_at {
            event.starts_at = starts_at;
        }
        if let Some(ends_at) = req.ends_at {
            event.ends_at = ends_at;
        }
        event.updated_at = utc_now();

        Some(event.clone())
    }

    pub fn delete(&self, id: Uuid) -> bool {
        let mut events = self.inner.write();
        let before = events.len();
        events.retain(|e| e.id != id);
        events.len() < before
    }

    pub fn get(&self, id: Uuid) -> Option<CalendarEvent> {
        self.inner.read().iter().find(|e| e.id == id).cloned()
    }

    pub fn list(&self) -> Vec<CalendarEvent> {
        self.inner.read().clone()
    }

    /// Events whose span touches the given calendar day (UTC).
    pub fn by_date(&self, date: NaiveDate) -> Vec<CalendarEvent> {
        let (start, end) = day_bounds(date);
        self.by_range(start, end)
    }

    /// Events overlapping the half-open window [from, to).
    pub fn by_range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<CalendarEvent> {
        self.inner
            .read()
            .iter()
            .filter(|e| e.starts_at < to && e.ends_at >= from)
            .cloned()
            .collect()
    }

    pub fn by_organizer(&self, organizer: Uuid) -> Vec<CalendarEvent> {
        self.inner
            .read()
            .iter()
            .filter(|e| e.organizer == organizer)
            .cloned()
            .collect()
    }

    pub fn by_participant(&self, participant: Uuid) -> Vec<CalendarEvent> {
        self.inner
            .read()
            .iter()
            .filter(|e| e.participants.contains(&participant))
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match over title and description.
    pub fn search(&self, query: &str) -> Vec<CalendarEvent> {
        let needle = query.to_lowercase();
        self.inner
            .read()
            .iter()
            .filter(|e| {
                e.title.to_lowercase().contains(&needle)
                    || e.description
                        .as_deref()
                        .map(|d| d.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            })
            .cloned()
            .collect()
    }
}
