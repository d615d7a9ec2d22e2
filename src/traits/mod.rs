//! Trait definitions for Harvest operations.
//!
//! Each resource type implements the traits it supports; endpoint
//! differences (paths, HTTP verbs) live in the implementations.

mod create;
mod delete;
mod get;
mod list;
mod toggle;
mod update;

pub use create::Create;
pub use delete::Delete;
pub use get::Get;
pub use list::List;
pub use toggle::Toggle;
pub use update::Update;
