use std::process;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use pushkind_vod::db::{establish_connection_pool, run_migrations};
use pushkind_vod::models::config::ServerConfig;
use pushkind_vod::repository::DieselRepository;
use pushkind_vod::routes::{configure, cors_headers};
use pushkind_vod::upstream::HttpVodSource;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(server_config) => server_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run database migrations: {e}");
        process::exit(1);
    }

    if server_config.admin_key.is_empty() || server_config.cron_secret.is_empty() {
        log::warn!("Admin key or cron secret is empty; collection triggers will reject all calls");
    }

    let repo = DieselRepository::new(pool);
    let source = HttpVodSource::new(server_config.upstream_url.clone());
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting server on {}:{} (upstream {})",
        bind_address.0,
        bind_address.1,
        server_config.upstream_url
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .wrap(cors_headers())
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(source.clone()))
            .app_data(web::Data::new(server_config.clone()))
            .configure(configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
