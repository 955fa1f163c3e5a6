use crate::cli::UserAction;
use crate::storage::Database;
use anyhow::Result;
use colored::Colorize;

use super::CommandContext;

pub fn handle_user(ctx: CommandContext, action: UserAction) -> Result<()> {
    tokio::runtime::Runtime::new()?.block_on(async {
        let db = ctx.open_database().await?;
        let result = run(&db, action).await;
        db.close().await;
        result
    })
}

async fn run(db: &Database, action: UserAction) -> Result<()> {
    match action {
        UserAction::Add { username, json } => {
            let user = db.users().create(&username).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&user)?);
            } else {
                println!(
                    "{} user {} (id {})",
                    "Created".green(),
                    user.username.cyan(),
                    user.id
                );
            }
        }
        UserAction::List { json } => {
            let users = db.users().list().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else if users.is_empty() {
                println!("No users");
            } else {
                for user in &users {
                    println!("{:>6}  {}", user.id.to_string().dimmed(), user.username);
                }
            }
        }
    }
    Ok(())
}
