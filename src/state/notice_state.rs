//! NoticeState - Toast Messages with Ring Buffer

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use crossbeam_channel::Receiver;

use crate::constants::NOTICE_CAPACITY;
use crate::i18n::{Locale, t, t_format};
use crate::services::ServiceEvent;

/// Notice level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

impl NoticeLevel {
    pub fn label(&self) -> &'static str {
        match self {
            NoticeLevel::Info => "INFO",
            NoticeLevel::Success => "OK",
            NoticeLevel::Error => "ERROR",
        }
    }
}

/// A single notice
#[derive(Debug, Clone)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// Recent notices, oldest evicted first
#[derive(Debug)]
pub struct NoticeState {
    entries: VecDeque<Notice>,
    capacity: usize,
    next_id: u64,
    locale: Locale,
}

fn entity_key(label: &str) -> String {
    format!("entity-{}", label.to_ascii_lowercase())
}

impl NoticeState {
    pub fn new(capacity: usize, locale: Locale) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            next_id: 1,
            locale,
        }
    }

    pub fn push(&mut self, level: NoticeLevel, message: impl Into<String>, timestamp: DateTime<Local>) {
        if self.capacity == 0 {
            return;
        }
        let entry = Notice {
            id: self.next_id,
            level,
            message: message.into(),
            timestamp,
        };
        self.next_id += 1;

        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn push_now(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.push(level, message, Local::now());
    }

    /// Turn a service event into a notice
    pub fn apply(&mut self, event: &ServiceEvent) {
        let locale = self.locale;
        let (level, message) = match event {
            ServiceEvent::Loaded { entity, count } => (
                NoticeLevel::Info,
                t_format(
                    locale,
                    "notice-loaded",
                    &[("entity", t(locale, &entity_key(entity))), ("count", count.to_string().as_str())],
                ),
            ),
            ServiceEvent::Saved { entity, id, created } => (
                NoticeLevel::Success,
                t_format(
                    locale,
                    if *created { "notice-created" } else { "notice-updated" },
                    &[("entity", t(locale, &entity_key(entity))), ("id", id.as_str())],
                ),
            ),
            ServiceEvent::Deleted { entity, ids } => (
                NoticeLevel::Success,
                t_format(
                    locale,
                    "notice-deleted",
                    &[("entity", t(locale, &entity_key(entity))), ("count", ids.len().to_string().as_str())],
                ),
            ),
            ServiceEvent::ImageUploaded { url, .. } => (
                NoticeLevel::Success,
                t_format(locale, "notice-image-uploaded", &[("url", &**url)]),
            ),
            ServiceEvent::SessionChanged { email: Some(email) } => (
                NoticeLevel::Info,
                t_format(locale, "notice-signed-in", &[("email", &**email)]),
            ),
            ServiceEvent::SessionChanged { email: None } => {
                (NoticeLevel::Info, t(locale, "notice-signed-out").to_string())
            }
            ServiceEvent::Failed {
                entity,
                action,
                message,
            } => (
                NoticeLevel::Error,
                t_format(
                    locale,
                    "notice-failed",
                    &[
                        ("entity", t(locale, &entity_key(entity))),
                        ("action", action.as_str()),
                        ("message", &**message),
                    ],
                ),
            ),
        };
        self.push_now(level, message);
    }

    /// Apply every event waiting on `events`
    pub fn drain_from(&mut self, events: &Receiver<ServiceEvent>) -> usize {
        let mut applied = 0;
        for event in events.try_iter() {
            self.apply(&event);
            applied += 1;
        }
        applied
    }

    pub fn entries(&self) -> &VecDeque<Notice> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|n| n.level == NoticeLevel::Error)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for NoticeState {
    fn default() -> Self {
        Self::new(NOTICE_CAPACITY, Locale::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityId;
    use crate::services::{ServiceAction, ServiceHub};

    #[test]
    fn ring_buffer_evicts_oldest() {
        let mut state = NoticeState::new(2, Locale::En);
        state.push_now(NoticeLevel::Info, "a");
        state.push_now(NoticeLevel::Info, "b");
        state.push_now(NoticeLevel::Info, "c");
        let messages: Vec<_> = state.entries().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(messages, ["b", "c"]);
        assert_eq!(state.entries()[1].id, 3);
    }

    #[test]
    fn events_become_localized_notices() {
        let hub = ServiceHub::new();
        hub.emit(ServiceEvent::Deleted {
            entity: "Product",
            ids: vec![EntityId::from("a"), EntityId::from("b")],
        });
        hub.emit(ServiceEvent::Failed {
            entity: "Client",
            action: ServiceAction::Load,
            message: "timeout".into(),
        });

        let mut state = NoticeState::new(10, Locale::En);
        assert_eq!(state.drain_from(&hub.events()), 2);
        assert_eq!(state.entries()[0].message, "Product: 2 deleted");
        assert_eq!(state.entries()[1].message, "Client (load) failed: timeout");
        assert!(state.has_errors());
    }
}
