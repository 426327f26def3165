use crate::commands::{generate::GenerateArgs, train::TrainArgs};

pub mod generate;
pub mod train;

/// Subcommands for tokchain
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Train a chain on text files, one sample per line.
    Train(TrainArgs),

    /// Generate text from a trained chain, one sample per line.
    Generate(GenerateArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Generate(cmd) => cmd.run(),
        }
    }
}
