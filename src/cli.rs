mod auth;
mod chart;
mod connection;
mod dashboard;
mod devices;
mod due;
mod log;
mod users;

use clap::{Parser, Subcommand};

use crate::{
    cli::{
        auth::{LoginArgs, RegisterArgs},
        chart::ChartArgs,
        dashboard::DashboardArgs,
        devices::DevicesArgs,
        due::DueArgs,
        log::LogArgs,
        users::UsersArgs,
    },
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the devices with today's and this month's estimated savings.
    Dashboard(Box<DashboardArgs>),

    /// Show consumption figures of selected devices.
    Chart(Box<ChartArgs>),

    /// Manage the registered devices.
    Devices(Box<DevicesArgs>),

    /// Manage user accounts (admin only).
    Users(Box<UsersArgs>),

    /// Log in and print the access token.
    Login(Box<LoginArgs>),

    /// Create an account.
    Register(Box<RegisterArgs>),

    /// List the devices to power off or on in the current hour.
    Due(Box<DueArgs>),

    /// Record today's savings of every device in the savings ledger.
    Log(Box<LogArgs>),
}

impl Command {
    pub async fn run(self) -> Result {
        match self {
            Self::Dashboard(args) => args.run().await,
            Self::Chart(args) => args.run().await,
            Self::Devices(args) => args.run().await,
            Self::Users(args) => args.run().await,
            Self::Login(args) => args.run().await,
            Self::Register(args) => args.run().await,
            Self::Due(args) => args.run().await,
            Self::Log(args) => args.run().await,
        }
    }
}
