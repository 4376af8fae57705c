//! Event entity

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::types::{Entity, EntityMeta, EntityType};

/// Local date-time layout used by the Yext API for event times
const EVENT_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl EventTime {
    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.start.as_deref().and_then(parse_event_time)
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.end.as_deref().and_then(parse_event_time)
    }
}

fn parse_event_time(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, EVENT_TIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(default)]
    pub meta: EntityMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<EventTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    /// Id of the location hosting this event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_ticketed: Option<bool>,
}

impl Entity for Event {
    fn entity_type(&self) -> EntityType {
        EntityType::event()
    }

    fn entity_id(&self) -> String {
        self.meta.id.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_event_time_parses_minutes_precision() {
        let time = EventTime {
            start: Some("2019-03-01T18:30".into()),
            end: Some("2019-03-01T21:00:00".into()),
        };
        let start = time.start_time().unwrap();
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2019, 3, 1).unwrap());
        assert_eq!(start.hour(), 18);
        assert_eq!(time.end_time().unwrap().hour(), 21);
    }

    #[test]
    fn test_unparseable_event_time_is_none() {
        let time = EventTime {
            start: Some("next tuesday".into()),
            end: None,
        };
        assert!(time.start_time().is_none());
        assert!(time.end_time().is_none());
    }

    #[test]
    fn test_event_declines_nil_normalization() {
        let mut event = Event::default();
        assert!(event.nil_normalization().is_none());
    }
}
