use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info, warn};

use rust_lp_api::api::{configure, json_config};
use rust_lp_api::config::Config;

// ---------- Server bootstrap ----------
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Invalid configuration: {}", err);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, err));
        }
    };

    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    if config.is_protected() {
        info!("Protected mode: /solve requires the X-API-Key header");
    } else {
        warn!("Running without API key protection");
    }
    info!(
        "Starting server on http://{}:{} (default solver {})",
        config.bind_address, config.port, config.solve.default_solver
    );

    let bind = (config.bind_address.clone(), config.port);
    let workers = config.workers;
    let json_limit = config.json_limit;
    let data = web::Data::new(config);

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(sentry_actix::Sentry::new())
            .wrap(Logger::default())
            .app_data(data.clone())
            .app_data(json_config(json_limit))
            .configure(configure)
    });
    if let Some(workers) = workers {
        server = server.workers(workers);
    }

    server.bind(bind)?.run().await
}
