//! HTTP surface: GraphQL endpoint, GraphiQL console, liveness greeting.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::ServerSettings;
use crate::error::Result;
use crate::graphql::BlogSchema;

pub const GRAPHQL_PATH: &str = "/graphql";

/// Build the application router. `GET /graphql` serves GraphiQL only when
/// `graphiql` is set; otherwise the method is not allowed.
pub fn build_router(schema: BlogSchema, graphiql: bool) -> Router {
    let mut graphql_route = post(graphql_handler);
    if graphiql {
        graphql_route = graphql_route.get(graphiql_handler);
    }

    Router::new()
        .route("/", get(index))
        .route(GRAPHQL_PATH, graphql_route)
        .layer(TraceLayer::new_for_http())
        .with_state(schema)
}

async fn index() -> &'static str {
    "Hello World"
}

async fn graphql_handler(State(schema): State<BlogSchema>, req: GraphQLRequest) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql_handler() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// Serve until Ctrl+C or SIGTERM.
pub async fn run_server(schema: BlogSchema, settings: &ServerSettings) -> Result<()> {
    let app = build_router(schema, settings.graphiql);

    let listener = TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    let addr = listener.local_addr()?;
    info!("Serving GraphQL on http://{}{}", addr, GRAPHQL_PATH);
    if settings.graphiql {
        info!("GraphiQL console: http://{}{}", addr, GRAPHQL_PATH);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            warn!("Received SIGTERM, shutting down");
        }
    }
}
