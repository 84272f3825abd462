//! Server construction and middleware wiring.

mod config;

pub use config::{ConfigError, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use pastebin::Trace;
#[cfg(debug_assertions)]
use pastebin::doc::ApiDoc;
use pastebin::domain::ports::{PasteRepository, StorageProbe};
use pastebin::domain::{PasteService, PasteSweeper};
use pastebin::inbound::http::{self, cors};
use pastebin::inbound::http::state::{HttpState, HttpStatePorts};
use pastebin::outbound::memory::InMemoryPasteRepository;
use pastebin::outbound::persistence::DieselPasteRepository;

/// Wire the paste service over `repo` and start the sweeper when configured.
fn build_http_state<R>(repo: Arc<R>, config: &ServerConfig) -> web::Data<HttpState>
where
    R: PasteRepository + StorageProbe + 'static,
{
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let service = Arc::new(PasteService::new(
        repo.clone(),
        Arc::new(config.slugs),
        clock.clone(),
    ));

    if let Some(interval) = config.sweep_interval {
        info!(interval_secs = interval.as_secs(), "starting paste sweeper");
        actix_web::rt::spawn(PasteSweeper::new(repo.clone(), clock, interval).run());
    }

    web::Data::new(HttpState::new(
        HttpStatePorts {
            pastes: service.clone(),
            paste_views: service,
            storage: repo,
        },
        config.base_url.clone(),
        config.time_override,
    ))
}

fn wire_storage(config: &ServerConfig) -> web::Data<HttpState> {
    match &config.db_pool {
        Some(pool) => build_http_state(Arc::new(DieselPasteRepository::new(pool.clone())), config),
        None => {
            warn!("no database configured; pastes are kept in memory");
            build_http_state(Arc::new(InMemoryPasteRepository::new()), config)
        }
    }
}

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .wrap(cors::allow_any_origin())
        .wrap(Trace)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// Must be called inside the Actix runtime; the sweeper task is spawned on it.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let http_state = wire_storage(&config);
    let bind_addr = config.bind_addr();

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, base_url = %config.base_url, "paste service listening");
    Ok(server)
}
