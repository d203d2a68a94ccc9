#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Main entry point for the park registry API server.

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    park_registry_server::run_server().await
}
