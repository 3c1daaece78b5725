//! Version extraction, ordering and resolution
//!
//! This module is the core of the resource: it turns raw object keys into
//! comparable version values and decides which catalog entries are new
//! relative to a last-known reference.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Extract   │────▶│    Value    │◀────│  Resolver   │
//! │ (regex key) │     │ (total ord) │     │ (decisions) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`value`]: loose semantic-version parsing and the pinned total order
//! - [`extract`]: regex-based version extraction from object keys
//! - [`resolver`]: pure "what is new since X" decision logic
//! - [`error`]: version parse errors

pub mod error;
pub mod extract;
pub mod resolver;
pub mod value;
