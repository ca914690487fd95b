//! Session file commands.

use anyhow::Context;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use vocosync_config::{NoteCue, Session};

#[derive(Args)]
pub struct SessionArgs {
    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Write a starter session file
    Init {
        /// Output TOML file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Session name
        #[arg(long, default_value = "Untitled")]
        name: String,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Load and validate a session file, then print its schedule
    Check {
        /// Session TOML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Resolve cue times at this rate instead of the session's
        #[arg(long)]
        sample_rate: Option<u32>,
    },
}

pub fn run(args: SessionArgs) -> anyhow::Result<()> {
    match args.command {
        SessionCommand::Init {
            output,
            name,
            force,
        } => {
            if output.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    output.display()
                );
            }
            let session = Session::new(name)
                .with_description("A3 for one second, then C4")
                .with_note(NoteCue::at_sample(0, 57))
                .with_note(NoteCue::at_seconds(1.0, 60));
            session.save(&output)?;
            println!("Wrote session '{}' to {}", session.name, output.display());
        }

        SessionCommand::Check { file, sample_rate } => {
            let session = Session::load(&file)?;
            session
                .validate()
                .with_context(|| format!("{} is not a valid session", file.display()))?;

            let rate = sample_rate.unwrap_or(session.sample_rate);
            println!("Session:      {}", session.name);
            if let Some(description) = &session.description {
                println!("Description:  {description}");
            }
            println!("Block size:   {}", session.block_size);
            println!("Timing:       {}", session.timing);
            println!("Default note: {}", session.default_note);
            println!(
                "Params:       mix {}%, transpose {} st, output {} dB",
                session.params.mix, session.params.transpose, session.params.output_db
            );
            println!("Notes at {} Hz:", rate);
            for (at, note) in session.schedule(rate) {
                println!("  {:>10}  {}", at, note);
            }
            println!("OK");
        }
    }

    Ok(())
}
