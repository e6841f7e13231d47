use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "insightboard", about = "Insightboard data tooling")]
pub struct Cli {
    #[arg(long, global = true, default_value = "insights.sqlite")]
    pub db: PathBuf,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Import {
        file: PathBuf,
        #[arg(long, action = ArgAction::SetTrue)]
        append: bool,
    },
}
