// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use axum::http::HeaderName;
use server::{database, routes};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

// Define the DB_URL here for the main application's use.
const MAIN_DB_URL: &str = "sqlite://database/tasks.db";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting up the server...");

    let db_pool = match database::establish_connection_pool(MAIN_DB_URL).await {
        Ok(pool) => {
            tracing::info!("Database connection was made successfully.");
            pool
        }
        Err(e) => {
            tracing::error!("Failed to connect with the database: {:?}", e);
            std::process::exit(1);
        }
    };

    let app_routes = routes::create_router(db_pool);

    // Configure CORS here, applying it globally to the router
    let cors = CorsLayer::new()
        .allow_methods(Any) // Allow all HTTP methods
        // Explicit list of the headers a frontend might send.
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .allow_origin(Any); // Allow all origins

    let app = app_routes.layer(cors); // Apply the CORS layer

    let addr = SocketAddr::from(([0, 0, 0, 0], 8000));
    tracing::info!("The server listens on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
