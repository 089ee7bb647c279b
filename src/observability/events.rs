//! Observable events for the cities service
//!
//! Every log line carries one of these names in its `event` field, so log
//! consumers can filter on a closed, stable set.

use std::fmt;

/// Observable events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & lifecycle
    /// Startup sequence begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Listener bound, serving requests
    ServerStart,
    /// Shutdown signal received
    Shutdown,

    // Store
    /// Database opened and schema applied
    DbOpen,

    // Requests
    /// City inserted
    CityCreated,
    /// City partially updated
    CityUpdated,
    /// City deleted
    CityDeleted,
    /// List query executed
    CitiesListed,
    /// Request rejected by validation
    RequestRejected,
    /// Request failed on a store fault
    RequestFailed,
    /// Request exceeded its time budget
    RequestTimeout,
}

impl Event {
    /// Returns the snake_case event name
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "boot_start",
            Event::ConfigLoaded => "config_loaded",
            Event::ServerStart => "server_start",
            Event::Shutdown => "shutdown",
            Event::DbOpen => "db_open",
            Event::CityCreated => "city_created",
            Event::CityUpdated => "city_updated",
            Event::CityDeleted => "city_deleted",
            Event::CitiesListed => "cities_listed",
            Event::RequestRejected => "request_rejected",
            Event::RequestFailed => "request_failed",
            Event::RequestTimeout => "request_timeout",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_snake_case() {
        let events = [
            Event::BootStart,
            Event::DbOpen,
            Event::CityCreated,
            Event::RequestTimeout,
        ];
        for event in events {
            let name = event.as_str();
            assert!(name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_'));
        }
    }

    #[test]
    fn test_event_display() {
        assert_eq!(Event::CitiesListed.to_string(), "cities_listed");
    }
}
