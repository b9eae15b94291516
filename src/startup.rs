use std::{net::TcpListener, sync::Arc};

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::SearchSettings,
    routes::{enrich_companies, health_check},
    services::{BatchOrchestrator, ProfileResolver, SearchClient},
};

// Whole filtered company tables arrive in one body
const JSON_BODY_LIMIT: usize = 16 * 1024 * 1024;

pub fn run(
    listener: TcpListener,
    search_client: Arc<dyn SearchClient>,
    search_settings: SearchSettings,
) -> Result<Server, std::io::Error> {
    let worker_count = search_settings.worker_count;
    let resolver = ProfileResolver::new(search_client, search_settings);
    let orchestrator = web::Data::new(BatchOrchestrator::new(resolver, worker_count));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(health_check)
            .service(enrich_companies)
            .app_data(web::JsonConfig::default().limit(JSON_BODY_LIMIT))
            .app_data(orchestrator.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
