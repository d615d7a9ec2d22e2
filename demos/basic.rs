//! Basic example demonstrating the Harvest API client.
//!
//! Run with:
//! ```
//! HARVEST_APP=acme HARVEST_EMAIL=me@acme.com HARVEST_PASSWORD=secret cargo run --example basic
//! ```

use harvestapi::{
    who_am_i, Clients, Get, HarvestConfig, List, ProjectListQuery, Projects, SummaryRow,
    TaskAssignments,
};

#[tokio::main]
async fn main() -> harvestapi::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Harvest status: {}", harvestapi::status().await);

    // HARVEST_* variables, else ~/.harvest
    let config = HarvestConfig::load(None)?;
    let client = config.client()?;
    println!("Connected to: {}", client.uri());

    let me = who_am_i(&client).await?;
    if me.is_auth_failure() {
        eprintln!("Authentication failed; check your credentials");
        return Ok(());
    }
    if let Some(user) = me.json().and_then(|body| body.get("user")) {
        println!("Logged in as {}", user["email"]);
    }

    // List clients
    println!("\n--- Clients ---");
    let clients = Clients::list(&client, &Default::default()).await?;
    for row in SummaryRow::from_collection(clients.items().map_or(&[][..], Vec::as_slice)) {
        println!("  - {} ({})", row.name, row.id);
    }

    // Projects of the first client, with their tasks
    let first_client = clients
        .items()
        .and_then(|items| items.first())
        .and_then(|c| c["client"]["id"].as_u64());
    if let Some(client_id) = first_client {
        println!("\n--- Projects of client {} ---", client_id);
        let projects = Projects::list(&client, &ProjectListQuery::for_client(client_id)).await?;

        for project in projects.items().into_iter().flatten() {
            let Some(id) = project["project"]["id"].as_u64() else {
                continue;
            };
            let details = Projects::get(&client, id).await?;
            println!("{}", harvestapi::PrettyPrint::pretty_print(&details));

            let tasks = TaskAssignments::list(&client, id).await?;
            println!("  {} task assignments", tasks.items().map_or(0, Vec::len));
        }
    }

    println!("\nDone!");
    Ok(())
}
