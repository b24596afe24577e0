// ABOUTME: Recipe catalogue server binary: loads configuration, opens the store, and serves HTTP
// ABOUTME: Accepts command line overrides for the port and database location
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Catalogue Server Binary

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use recipe_catalogue_server::{
    config::environment::{DatabaseUrl, ServerConfig},
    database::Database,
    logging,
    resources::ServerResources,
    server,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recipe-catalogue-server")]
#[command(about = "Recipe catalogue API - recipes, ingredients, steps, and categories")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL (e.g. `sqlite:./data/recipes.db` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url = DatabaseUrl::parse_url(&database_url)?;
    }

    info!("Starting recipe catalogue server");
    info!("{}", config.summary());

    let database = Database::new(&config.database).await?;
    display_available_endpoints(&config);

    let resources = Arc::new(ServerResources::new(database, config));
    if let Err(e) = server::run(resources).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);

    info!("=== Available API Endpoints ===");
    info!("Recipes:");
    info!("   List:              GET    {base}/recipe?skip=&limit=");
    info!("   Get:               GET    {base}/recipe/{{slug}}");
    info!("   Create:            POST   {base}/recipe");
    info!("   Update:            PUT    {base}/recipe/{{slug}}");
    info!("   Delete:            DELETE {base}/recipe/{{slug}}");
    info!("Ingredients:");
    info!("   List:              GET    {base}/ingredient?skip=&limit=");
    info!("   By recipe:         GET    {base}/ingredient/{{slug}}");
    info!("   Create:            POST   {base}/ingredient");
    info!("   Update / Delete:   PUT    DELETE {base}/ingredient/{{slug}}/{{id}}");
    info!("Steps:");
    info!("   By recipe:         GET    {base}/steps/{{slug}}");
    info!("   Create:            POST   {base}/step");
    info!("   Update / Delete:   PUT    DELETE {base}/steps/{{slug}}/{{id}}");
    info!("Categories:");
    info!("   List:              GET    {base}/category?skip=&limit=");
    info!("   Create:            POST   {base}/category");
    info!("   By recipe:         GET    {base}/category/{{slug}}");
    info!("   Link:              POST   {base}/category/{{slug}}?category_name=");
    info!("   Update / Delete:   PUT    DELETE {base}/category/{{slug}}/{{id}}");
    info!("Monitoring:");
    info!("   Health:            GET    {base}/health");
    info!("   Ready:             GET    {base}/ready");
    info!("=== End of Endpoint List ===");
}
