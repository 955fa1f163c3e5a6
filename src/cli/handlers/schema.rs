use crate::graphql::schema_sdl;
use anyhow::Result;

pub fn handle_schema() -> Result<()> {
    println!("{}", schema_sdl());
    Ok(())
}
