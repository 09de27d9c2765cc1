//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub(crate) use state_builders::{build_dispatch, build_http_state};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use relay::Trace;
use relay::doc::ApiDoc;
use relay::inbound::http::health::{HealthState, api_health, live, ready};
use relay::inbound::http::state::HttpState;
use relay::inbound::http::transactions;

/// Grace period for in-flight requests once shutdown begins.
const SHUTDOWN_GRACE_SECONDS: u64 = 5;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    swagger_ui: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(api_health)
        .configure(transactions::configure);

    let docs = swagger_ui.then(|| {
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi())
    });

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
        .configure(move |cfg| {
            if let Some(docs) = docs {
                cfg.service(docs);
            }
        })
}

/// Construct an Actix HTTP server.
///
/// Readiness flips to 200 once the listener is bound. Shutdown drains
/// in-flight requests for a bounded grace period.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        bind_addr,
        swagger_ui,
    } = config;

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone(), swagger_ui)
    })
    .shutdown_timeout(SHUTDOWN_GRACE_SECONDS)
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
