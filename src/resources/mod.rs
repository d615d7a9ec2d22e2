//! Harvest resources and their endpoints.
//!
//! Records are passed through as opaque JSON; each resource type only knows
//! how to reach its endpoints.

mod account;
mod clients;
mod contacts;
mod expense_categories;
mod invoices;
mod people;
mod projects;
mod task_assignments;
mod tasks;
mod time_entries;
mod user_assignments;

pub use account::who_am_i;
pub use clients::Clients;
pub use contacts::Contacts;
pub use expense_categories::ExpenseCategories;
pub use invoices::{InvoiceListQuery, InvoiceStatus, Invoices};
pub use people::People;
pub use projects::{ProjectListQuery, Projects};
pub use task_assignments::TaskAssignments;
pub use tasks::Tasks;
pub use time_entries::TimeEntries;
pub use user_assignments::UserAssignments;
