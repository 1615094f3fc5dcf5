use clap::Parser;

use crate::{api::models::NewUser, cli::connection::ApiArgs, prelude::*};

#[derive(Parser)]
pub struct LoginArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[clap(long, env = "POWERDOWN_USERNAME")]
    username: String,

    #[clap(long, env = "POWERDOWN_PASSWORD", hide_env_values = true)]
    password: String,
}

impl LoginArgs {
    /// Print the access token, so that it can be exported as `POWERDOWN_ACCESS_TOKEN`.
    #[instrument(skip_all, fields(username = %self.username))]
    pub async fn run(self) -> Result {
        let response = self.api.try_new_client()?.login(&self.username, &self.password).await?;
        if response.is_admin {
            info!("administrator");
        }
        println!("{}", response.access_token);
        Ok(())
    }
}

#[derive(Parser)]
pub struct RegisterArgs {
    #[clap(flatten)]
    api: ApiArgs,

    #[clap(long, env = "POWERDOWN_USERNAME")]
    username: String,

    #[clap(long, env = "POWERDOWN_PASSWORD", hide_env_values = true)]
    password: String,

    /// Request administrator rights.
    #[clap(long)]
    admin: bool,
}

impl RegisterArgs {
    #[instrument(skip_all, fields(username = %self.username))]
    pub async fn run(self) -> Result {
        let user = NewUser { username: &self.username, password: &self.password, is_admin: self.admin };
        self.api.try_new_client()?.register(&user).await?;
        Ok(())
    }
}
