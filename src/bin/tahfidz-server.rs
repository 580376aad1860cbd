// ABOUTME: Production server binary for the Tahfidz program backend
// ABOUTME: Loads configuration, constructs collaborator clients, and serves the API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Tahfidz API Server Binary
//!
//! Starts the backend with environment-based configuration. The datastore
//! and auth clients are constructed here, once, and injected into the
//! server — the process holds no implicit global state.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tahfidz_server::{
    auth::RestAuthProvider,
    config::ServerConfig,
    context::ApiContext,
    datastore::rest::RestDataStore,
    logging,
    server::TahfidzServer,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "tahfidz-server")]
#[command(about = "Tahfidz program backend - admin and enrollment API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Tahfidz API server");
    info!("{}", config.summary());

    // Construct collaborator clients once; they are shared immutably for
    // the life of the process.
    let datastore = Arc::new(RestDataStore::new(&config.datastore)?);
    let auth = Arc::new(RestAuthProvider::new(&config.datastore)?);
    info!("Datastore and auth clients initialized");

    let context = Arc::new(ApiContext::new(datastore, auth, Arc::new(config)));
    let server = TahfidzServer::new(context);

    display_available_endpoints();

    if let Err(e) = server.run().await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Display the API surface with its gates at startup
fn display_available_endpoints() {
    info!("=== Available API Endpoints ===");
    info!("Public:");
    info!("   Health Check:      GET  /health");
    info!("   Readiness:         GET  /ready");
    info!("   CSRF Token:        GET  /csrf-token");
    info!("Admin (authorization gate + CSRF on mutating verbs):");
    info!("   List Users:        GET    /users");
    info!("   Delete User:       DELETE /users/{{id}}");
    info!("   Reset Password:    POST   /users/{{id}}/reset-password");
    info!("   Update Role:       PUT    /users/{{id}}/role");
    info!("   List Programs:     GET    /programs");
    info!("   Migration File:    GET    /migration/{{filename}}");
    info!("=== End of Endpoint List ===");
}
