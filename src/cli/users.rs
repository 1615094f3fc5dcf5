use clap::{Parser, Subcommand};

use crate::{api::models::NewUser, cli::connection::ApiArgs, prelude::*, tables::build_users_table};

#[derive(Parser)]
pub struct UsersArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[command(subcommand)]
    command: UsersCommand,
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List the user accounts.
    List,

    /// Create a user account.
    Add {
        #[clap(long)]
        username: String,

        #[clap(long, env = "POWERDOWN_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,

        /// Grant administrator rights.
        #[clap(long)]
        admin: bool,
    },

    /// Delete a user account.
    Remove {
        #[clap(long)]
        username: String,
    },
}

impl UsersArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let api = self.api.try_new_client()?;
        match self.command {
            UsersCommand::List => {
                let users = api.get_users().await?;
                println!("{}", build_users_table(&users));
            }
            UsersCommand::Add { username, password, admin } => {
                let user = NewUser { username: &username, password: &password, is_admin: admin };
                let body = api.create_user(&user).await?;
                info!(message = ?body.text(), "done");
            }
            UsersCommand::Remove { username } => {
                let body = api.delete_user(&username).await?;
                info!(message = ?body.text(), "done");
            }
        }
        Ok(())
    }
}
