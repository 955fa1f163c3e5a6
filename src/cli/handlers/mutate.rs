use crate::graphql::build_schema;
use anyhow::Result;

use super::{CommandContext, execute_and_print};

pub fn handle_mutate(
    ctx: CommandContext,
    mutation: String,
    variables: Option<String>,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let db = runtime.block_on(ctx.open_database())?;
    let schema = build_schema(db);

    // Auto-wrap in mutation { }
    let query = format!("mutation {{ {} }}", mutation);
    execute_and_print(&runtime, &schema, &query, variables)
}
