//! Shared test utilities

pub mod store;

pub use store::FakeStore;
