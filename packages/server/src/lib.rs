#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the park registry.
//!
//! Serves the REST API for reading and writing park records and hosts the
//! static edit form from `public/`. The storage backend is selected from
//! the environment at startup and held in [`AppState`] for the process
//! lifetime; it is released when the server shuts down.

mod handlers;
pub mod service;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::http::Method;
use actix_web::{App, HttpServer, middleware, web};
use park_registry_database::ParkStore;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    /// Park record store.
    pub store: Arc<dyn ParkStore>,
}

/// Starts the park registry API server.
///
/// Opens the configured store, binds from `BIND_ADDR`/`PORT`, and serves
/// until a shutdown signal arrives. This is a regular async function —
/// the caller provides the async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
///
/// # Panics
///
/// Panics if the park store cannot be opened.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Opening park store...");
    let store = park_registry_database::open_from_env()
        .await
        .expect("Failed to open park store");

    let state = web::Data::new(AppState {
        store: Arc::from(store),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .service(
                        web::resource("/parks")
                            .route(web::get().to(handlers::list_parks))
                            .route(web::method(Method::OPTIONS).to(handlers::preflight))
                            .default_service(web::route().to(handlers::method_not_allowed)),
                    )
                    .service(
                        web::resource(["/park/{code}", "/parks/{code}"])
                            .route(web::get().to(handlers::get_park))
                            .route(web::post().to(handlers::save_park))
                            .route(web::method(Method::OPTIONS).to(handlers::preflight))
                            .default_service(web::route().to(handlers::method_not_allowed)),
                    ),
            )
            // Serve the edit form and its assets
            .service(Files::new("/", "public").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    // Actix has drained in-flight requests by now; dropping the state
    // closes the store connection.
    log::info!("Server stopped, closing park store");
    Ok(())
}
