use anyhow::Result;
use clap::Parser;

use blogql::cli::handlers::{
    CommandContext, handle_init, handle_mutate, handle_query, handle_schema, handle_serve,
    handle_user,
};
use blogql::cli::{Cli, Commands};
use blogql::logging;

fn main() -> Result<()> {
    let Cli {
        command,
        config,
        db,
        verbose,
        log_file,
    } = Cli::parse();
    logging::init(verbose, log_file);

    let load = || CommandContext::load(config.as_deref(), db.clone());

    match command {
        Commands::Init => handle_init(config.clone(), db.clone()),
        Commands::Schema => handle_schema(),
        Commands::Serve {
            host,
            port,
            no_graphiql,
        } => handle_serve(load()?, host, port, no_graphiql),
        Commands::Query { query, variables } => handle_query(load()?, query, variables),
        Commands::Mutate {
            mutation,
            variables,
        } => handle_mutate(load()?, mutation, variables),
        Commands::User { action } => handle_user(load()?, action),
    }
}
