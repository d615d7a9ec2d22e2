//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the harvest binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use crate::query::UpdatedSince;
use crate::resources::InvoiceStatus;

/// Harvest API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "harvest", about = "Harvest time-tracking API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Credentials file (defaults to $HARVEST_CREDENTIALS or ~/.harvest).
    #[arg(long, global = true)]
    pub credentials: Option<PathBuf>,

    /// Log debug output from this crate.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Append log lines to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the Harvest service status.
    Status,

    /// Show the authenticated user and company.
    Whoami,

    /// Get a single record by id.
    Get {
        /// The type of record to get.
        entity: Entity,

        /// The record id.
        id: u64,
    },

    /// List records with optional filtering.
    List {
        /// The type of record to list.
        entity: Entity,

        /// Only records updated since (RFC 3339, `YYYY-MM-DD HH:MM` or `YYYY-MM-DD`).
        #[arg(long)]
        updated_since: Option<UpdatedSince>,

        /// Client id (projects and contacts only).
        #[arg(long)]
        client: Option<u64>,

        /// Start date (invoices only).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End date (invoices only).
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Invoice status (invoices only).
        #[arg(long, value_enum)]
        status: Option<InvoiceStatus>,

        /// Fetch only these pages (invoices only); repeatable.
        #[arg(long = "page")]
        pages: Vec<u32>,
    },

    /// Create a record from a JSON document.
    Create {
        /// The type of record to create.
        entity: Entity,

        /// The JSON document to send, e.g. '{"client": {"name": "Acme"}}'.
        #[arg(long)]
        data: String,
    },

    /// Update a record with a JSON document.
    Update {
        /// The type of record to update.
        entity: Entity,

        /// The record id.
        id: u64,

        /// The JSON document to send.
        #[arg(long)]
        data: String,
    },

    /// Delete a record.
    Delete {
        /// The type of record to delete.
        entity: Entity,

        /// The record id.
        id: u64,
    },

    /// Toggle a record's active flag (or a time entry's timer).
    Toggle {
        /// The type of record to toggle.
        entity: Entity,

        /// The record id.
        id: u64,
    },

    /// Reactivate an archived record (tasks only).
    Activate {
        /// The type of record to activate.
        entity: Entity,

        /// The record id.
        id: u64,
    },

    /// Export account data to JSON files, then convert them to CSV.
    Export {
        /// Output directory.
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Start of the timesheet/expense range (defaults to January 1st).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// End of the timesheet/expense range (defaults to December 31st).
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Only write the JSON files.
        #[arg(long, default_value = "false")]
        skip_csv: bool,
    },

    /// Convert every JSON file in a directory to CSV.
    Csv {
        /// Directory holding the JSON files.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

/// Record types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A client company.
    #[value(alias = "clients")]
    Client,
    /// A client contact.
    #[value(alias = "contacts")]
    Contact,
    /// A user of the account.
    #[value(alias = "people")]
    Person,
    /// A project.
    #[value(alias = "projects")]
    Project,
    /// A task.
    #[value(alias = "tasks")]
    Task,
    /// An expense category.
    #[value(alias = "expense-categories")]
    ExpenseCategory,
    /// An invoice.
    #[value(alias = "invoices")]
    Invoice,
    /// A time entry (the `daily` endpoints).
    #[value(alias = "time-entries")]
    TimeEntry,
}

/// Record operations that only some entities offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update,
    Toggle,
    Activate,
}

impl Operation {
    /// Subcommand name of the operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Toggle => "toggle",
            Operation::Activate => "activate",
        }
    }
}

impl Entity {
    /// Whether the CLI can run `operation` on this record type.
    ///
    /// Contacts and expense categories are created with a caller-chosen id
    /// and are left to the library.
    pub fn supports(self, operation: Operation) -> bool {
        use Entity::*;

        match operation {
            Operation::Create => matches!(self, Client | Project | Task | Invoice | TimeEntry),
            Operation::Update => self != Person,
            Operation::Toggle => {
                matches!(self, Client | Person | Project | ExpenseCategory | TimeEntry)
            }
            Operation::Activate => self == Task,
        }
    }
}

impl Command {
    /// The entity-dependent operation this command runs, if any.
    pub fn record_operation(&self) -> Option<(Operation, Entity)> {
        match self {
            Command::Create { entity, .. } => Some((Operation::Create, *entity)),
            Command::Update { entity, .. } => Some((Operation::Update, *entity)),
            Command::Toggle { entity, .. } => Some((Operation::Toggle, *entity)),
            Command::Activate { entity, .. } => Some((Operation::Activate, *entity)),
            _ => None,
        }
    }
}
