//! Request handling for the resource protocol
//!
//! One module per operation: [`check`] resolves new versions, [`fetch`]
//! materializes one of them. Both take the store as a trait object so the
//! handlers stay independent of the concrete storage API.

pub mod check;
pub mod error;
pub mod fetch;
pub mod protocol;

pub use check::check;
pub use error::{CheckError, FetchError};
pub use fetch::fetch;
pub use protocol::{CheckRequest, FetchRequest, FetchResult, MetadataField, Version};
