//! cities - a CRUD HTTP service for city records backed by SQLite
//!
//! Layers, bottom-up: `model` (records and the column allow-list), `store`
//! (SQLite persistence), `rest_api` (query parsing, statement building and
//! handlers), `http_server` (router assembly), `cli` (configuration and
//! process lifecycle).

pub mod cli;
pub mod http_server;
pub mod model;
pub mod observability;
pub mod rest_api;
pub mod store;
