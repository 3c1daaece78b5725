//! Version resolution for release artifacts kept in an object store
//!
//! A bucket full of build outputs becomes a stream of versions: either the
//! object keys themselves carry version numbers that a configured pattern
//! extracts, or one fixed key is rewritten in place and the store's native
//! version history is the stream. The resource answers "what came out since
//! the version I have" and downloads any version it reported.
//!
//! # Modules
//!
//! - [`config`]: Source configuration and addressing-mode validation
//! - [`resource`]: The check and fetch operations of the resource protocol
//! - [`storage`]: Bucket access behind the [`storage::ObjectStore`] trait
//! - [`version`]: Version parsing, ordering, and the resolution rules

pub mod config;
pub mod resource;
pub mod storage;
pub mod version;
