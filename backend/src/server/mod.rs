//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use campgrounds::Trace;
#[cfg(debug_assertions)]
use campgrounds::doc::ApiDoc;
use campgrounds::inbound::http::configure;
use campgrounds::inbound::http::health::{HealthState, live, ready};
use campgrounds::inbound::http::session_config::SessionSettings;
use campgrounds::inbound::http::state::{HttpState, HttpStatePorts};
use campgrounds::middleware::MethodOverride;
use campgrounds::outbound::persistence::{
    DbPool, DieselCommentRepository, DieselIdentityStore, DieselListingRepository,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Pick the port adapters: PostgreSQL when a pool exists, memory otherwise.
fn build_ports(db_pool: Option<&DbPool>) -> HttpStatePorts {
    match db_pool {
        Some(pool) => HttpStatePorts {
            identities: Arc::new(DieselIdentityStore::new(pool.clone())),
            listings: Arc::new(DieselListingRepository::new(pool.clone())),
            comments: Arc::new(DieselCommentRepository::new(pool.clone())),
            clock: Arc::new(DefaultClock),
        },
        None => {
            info!("no database configured; using in-memory stores");
            HttpStatePorts::in_memory()
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    // Registration order is inside-out: Trace runs first, then the method
    // override, then the session.
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(session.middleware())
        .wrap(MethodOverride)
        .wrap(Trace)
        .service(ready)
        .service(live)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        session,
        bind_addr,
        db_pool,
    } = config;
    let http_state = web::Data::new(HttpState::new(build_ports(db_pool.as_ref())));
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}
