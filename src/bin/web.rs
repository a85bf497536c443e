//! Single binary web server: the roster page at `/`, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 127.0.0.1:8080 by default; the roster is a single-user local app.
//! Override with env: HOST, PORT, ROSTER_STORAGE (storage file path), PAGE_SIZE.

use actix_files::Files;
use actix_web::{web::Data, App, HttpServer};
use roster_widget::{api, FileStorage, RosterPage, DEFAULT_PAGE_SIZE};
use std::sync::RwLock;

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_storage_path() -> String {
    "roster-storage.json".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let storage_path = std::env::var("ROSTER_STORAGE").unwrap_or_else(|_| default_storage_path());
    let page_size: usize = std::env::var("PAGE_SIZE")
        .ok()
        .and_then(|p| p.parse().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);

    let storage = FileStorage::new(&storage_path);
    log::info!("Roster storage file: {}", storage.path().display());
    let state = Data::new(RwLock::new(RosterPage::load(Box::new(storage), page_size)));

    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(api::configure)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}
