//! # Cities REST API Module
//!
//! HTTP endpoints for creating, updating, deleting and listing cities. List
//! requests are parsed into [`QueryParams`] and compiled into a single
//! parameterized statement before they reach the store.

pub mod errors;
pub mod filter;
pub mod handler;
pub mod parser;
pub mod query;
pub mod response;
pub mod server;

pub use errors::{ErrorResponse, RestError, RestResult};
pub use filter::{FilterExpr, FilterValue, OrderBy};
pub use handler::{CityHandler, CreateCityRequest};
pub use parser::QueryParams;
pub use query::build_select;
pub use response::{CreateCityResponse, MessageResponse};
pub use server::RestServer;
