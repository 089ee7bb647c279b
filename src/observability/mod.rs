//! Observability subsystem for the cities service
//!
//! Provides:
//! - Structured logging through `tracing` (text or JSON)
//! - A closed set of event names
//! - Scope-based start/outcome logging with durations
//!
//! # Usage
//!
//! ```ignore
//! use cities::observability::{init_logging, Event, LogFormat, LogLevel, ObservationScope};
//!
//! init_logging(LogLevel::Info, LogFormat::Text)?;
//!
//! let scope = ObservationScope::new(Event::BootStart);
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{init_logging, LogFormat, LogInitError, LogLevel};
pub use scope::ObservationScope;
