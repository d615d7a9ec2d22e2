//! Harvest API CLI binary.
//!
//! A command-line interface for the Harvest time-tracking API, including
//! the JSON/CSV account export.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use harvestapi::cli::{Cli, Command, Entity, Operation};
use harvestapi::export::{self, Conversion, ExportOptions};
use harvestapi::{
    Clients, Contacts, Create, DateRange, Delete, ExpenseCategories, Get, HarvestClient,
    HarvestConfig, HarvestResponse, InvoiceListQuery, Invoices, List, PageSelection,
    People, PrettyPrint, ProjectListQuery, Projects, SummaryRow, Tasks, TimeEntries, Toggle,
    Update, UpdatedSinceQuery,
};
use serde_json::Value;
use tabled::Table;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = harvestapi::logging::init(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("Error: could not set up logging: {e}");
        return ExitCode::FAILURE;
    }

    let code = match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    };

    if let Some(path) = &cli.log_file {
        eprintln!("See log at: {}", path.display());
    }
    code
}

async fn run(cli: &Cli) -> harvestapi::Result<ExitCode> {
    match &cli.command {
        Command::Status => {
            let status = harvestapi::status().await;
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Csv { dir } => {
            convert(dir)?;
            Ok(ExitCode::SUCCESS)
        }
        command => {
            let client = match HarvestConfig::load(cli.credentials.as_deref())
                .and_then(|config| config.client())
            {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {e}");
                    eprintln!(
                        "Hint: Create ~/.harvest or set HARVEST_APP, HARVEST_EMAIL and HARVEST_PASSWORD"
                    );
                    return Ok(ExitCode::FAILURE);
                }
            };
            run_with_client(&client, command, cli.json).await
        }
    }
}

async fn run_with_client(
    client: &HarvestClient,
    command: &Command,
    json: bool,
) -> harvestapi::Result<ExitCode> {
    if let Some((operation, entity)) = command.record_operation() {
        if !entity.supports(operation) {
            return unsupported(operation, entity);
        }
    }

    let response = match command {
        Command::Whoami => harvestapi::who_am_i(client).await?,
        Command::Get { entity, id } => handle_get(client, *entity, *id).await?,
        Command::List {
            entity,
            updated_since,
            client: client_id,
            from,
            to,
            status,
            pages,
        } => {
            let since = UpdatedSinceQuery {
                updated_since: *updated_since,
            };
            match entity {
                Entity::Client => Clients::list(client, &since).await?,
                Entity::Contact => match client_id {
                    Some(id) => Contacts::for_client(client, *id, &since).await?,
                    None => Contacts::list(client, &since).await?,
                },
                Entity::Person => People::list(client, &()).await?,
                Entity::Project => {
                    let query = ProjectListQuery {
                        client: *client_id,
                        updated_since: *updated_since,
                    };
                    Projects::list(client, &query).await?
                }
                Entity::Task => Tasks::list(client, &since).await?,
                Entity::ExpenseCategory => ExpenseCategories::list(client, &()).await?,
                Entity::Invoice => {
                    let query = InvoiceListQuery {
                        from: *from,
                        to: *to,
                        status: *status,
                        updated_since: *updated_since,
                        pages: if pages.is_empty() {
                            PageSelection::All
                        } else {
                            PageSelection::Pages(pages.clone())
                        },
                    };
                    Invoices::list(client, &query).await?
                }
                Entity::TimeEntry => TimeEntries::today(client).await?,
            }
        }
        Command::Create { entity, data } => {
            let body = parse_data(data)?;
            match entity {
                Entity::Client => Clients::create(client, &body).await?,
                Entity::Project => Projects::create(client, &body).await?,
                Entity::Task => Tasks::create(client, &body).await?,
                Entity::Invoice => Invoices::create(client, &body).await?,
                Entity::TimeEntry => TimeEntries::create(client, &body).await?,
                other => return unsupported(Operation::Create, *other),
            }
        }
        Command::Update { entity, id, data } => {
            let body = parse_data(data)?;
            match entity {
                Entity::Client => Clients::update(client, *id, &body).await?,
                Entity::Contact => Contacts::update(client, *id, &body).await?,
                Entity::Project => Projects::update(client, *id, &body).await?,
                Entity::Task => Tasks::update(client, *id, &body).await?,
                Entity::ExpenseCategory => ExpenseCategories::update(client, *id, &body).await?,
                Entity::Invoice => Invoices::update(client, *id, &body).await?,
                Entity::TimeEntry => TimeEntries::update(client, *id, &body).await?,
                other => return unsupported(Operation::Update, *other),
            }
        }
        Command::Delete { entity, id } => match entity {
            Entity::Client => Clients::delete(client, *id).await?,
            Entity::Contact => Contacts::delete(client, *id).await?,
            Entity::Person => People::delete(client, *id).await?,
            Entity::Project => Projects::delete(client, *id).await?,
            Entity::Task => Tasks::delete(client, *id).await?,
            Entity::ExpenseCategory => ExpenseCategories::delete(client, *id).await?,
            Entity::Invoice => Invoices::delete(client, *id).await?,
            Entity::TimeEntry => TimeEntries::delete(client, *id).await?,
        },
        Command::Toggle { entity, id } => match entity {
            Entity::Client => Clients::toggle(client, *id).await?,
            Entity::Person => People::toggle(client, *id).await?,
            Entity::Project => Projects::toggle(client, *id).await?,
            Entity::ExpenseCategory => ExpenseCategories::toggle(client, *id).await?,
            Entity::TimeEntry => TimeEntries::toggle(client, *id).await?,
            other => return unsupported(Operation::Toggle, *other),
        },
        Command::Activate { entity, id } => match entity {
            Entity::Task => Tasks::activate(client, *id).await?,
            other => return unsupported(Operation::Activate, *other),
        },
        Command::Export {
            dir,
            from,
            to,
            skip_csv,
        } => return handle_export(client, dir, *from, *to, *skip_csv).await,
        // Handled before connecting.
        Command::Status | Command::Csv { .. } => return Ok(ExitCode::SUCCESS),
    };

    output(&response, json)
}

async fn handle_get(
    client: &HarvestClient,
    entity: Entity,
    id: u64,
) -> harvestapi::Result<HarvestResponse> {
    match entity {
        Entity::Client => Clients::get(client, id).await,
        Entity::Contact => Contacts::get(client, id).await,
        Entity::Person => People::get(client, id).await,
        Entity::Project => Projects::get(client, id).await,
        Entity::Task => Tasks::get(client, id).await,
        Entity::ExpenseCategory => ExpenseCategories::get(client, id).await,
        Entity::Invoice => Invoices::get(client, id).await,
        Entity::TimeEntry => TimeEntries::get(client, id).await,
    }
}

async fn handle_export(
    client: &HarvestClient,
    dir: &Path,
    from: Option<chrono::NaiveDate>,
    to: Option<chrono::NaiveDate>,
    skip_csv: bool,
) -> harvestapi::Result<ExitCode> {
    let year = DateRange::current_year();
    let options = ExportOptions {
        dir: dir.to_path_buf(),
        range: DateRange::new(from.unwrap_or(year.from), to.unwrap_or(year.to)),
    };

    let report = export::export(client, &options).await?;
    if report.errors() > 0 {
        eprintln!(
            "Export stopped: {} collection(s) rejected ({})",
            report.errors(),
            report.failed.join(", ")
        );
        return Ok(ExitCode::from(u8::try_from(report.errors()).unwrap_or(u8::MAX)));
    }
    for path in &report.written {
        println!("{}", path.display());
    }

    if !skip_csv {
        convert(dir)?;
    }
    Ok(ExitCode::SUCCESS)
}

fn convert(dir: &Path) -> harvestapi::Result<()> {
    for (path, outcome) in export::convert_dir(dir)? {
        match outcome {
            Conversion::Rows(rows) => println!("{} ({} rows)", path.display(), rows),
            Conversion::NoData => println!("{} (no data)", path.display()),
        }
    }
    Ok(())
}

fn parse_data(data: &str) -> harvestapi::Result<Value> {
    Ok(serde_json::from_str(data)?)
}

fn unsupported(operation: Operation, entity: Entity) -> harvestapi::Result<ExitCode> {
    let operation = operation.as_str();
    eprintln!("Error: {entity:?} records cannot be used with '{operation}'");
    eprintln!("Hint: Run 'harvest {operation} --help' for the supported record types");
    Ok(ExitCode::FAILURE)
}

fn output(response: &HarvestResponse, json: bool) -> harvestapi::Result<ExitCode> {
    if response.is_auth_failure() {
        eprintln!("Error: Authentication failed");
        return Ok(ExitCode::FAILURE);
    }

    match (response, json) {
        (HarvestResponse::Json { body, .. }, true) => {
            println!("{}", serde_json::to_string_pretty(body)?);
        }
        (HarvestResponse::Raw { body, .. }, true) => println!("{body}"),
        (HarvestResponse::Json { .. }, false) => match response.items() {
            Some(items) => {
                let rows = SummaryRow::from_collection(items);
                println!("{}", Table::new(rows));
                println!("\n{} records", items.len());
            }
            None => println!("{}", response.pretty_print()),
        },
        (HarvestResponse::Raw { .. }, false) => println!("{}", response.pretty_print()),
    }

    Ok(if response.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
