use crate::graphql::build_schema;
use crate::server::run_server;
use anyhow::Result;

use super::CommandContext;

pub fn handle_serve(
    ctx: CommandContext,
    host: Option<String>,
    port: Option<u16>,
    no_graphiql: bool,
) -> Result<()> {
    let mut settings = ctx.config.server.clone();
    if let Some(host) = host {
        settings.host = host;
    }
    if let Some(port) = port {
        settings.port = port;
    }
    if no_graphiql {
        settings.graphiql = false;
    }

    println!(
        "Starting GraphQL server on http://{}:{}/graphql",
        settings.host, settings.port
    );

    tokio::runtime::Runtime::new()?.block_on(async {
        let db = ctx.open_database().await?;
        let result = run_server(build_schema(db.clone()), &settings).await;
        db.close().await;
        Ok(result?)
    })
}
