use crate::graphql::build_schema;
use anyhow::Result;

use super::{CommandContext, execute_and_print};

pub fn handle_query(ctx: CommandContext, query: String, variables: Option<String>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    let db = runtime.block_on(ctx.open_database())?;
    let schema = build_schema(db);
    execute_and_print(&runtime, &schema, &query, variables)
}
