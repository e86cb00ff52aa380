//! Orchestration for layoutmap.
//!
//! This crate ties the layout and schema extractors together into the
//! `parseCombined` task and wraps it in the JSON request/response envelope.

pub mod pipeline;
pub mod protocol;

pub use pipeline::{link_db_fields, parse_combined};
pub use protocol::{ErrorPayload, Request, Response, handle_request, handle_request_json};
