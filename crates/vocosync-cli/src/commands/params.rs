//! Parameter listing command.

use clap::Args;
use vocosync_config::param_table;
use vocosync_effects::{DEFAULT_NOTE, TRANSPOSE_RANGE};

#[derive(Args)]
pub struct ParamsArgs {
    /// Print only the parameter ids, one per line
    #[arg(long)]
    ids: bool,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    let table = param_table();

    if args.ids {
        for param in &table {
            println!("{}", param.string_id);
        }
        return Ok(());
    }

    println!("Vocoder Parameters");
    println!("==================");
    println!();
    println!(
        "  {:14}  {:10}  {:>8}  {}",
        "Id", "Name", "Default", "Range"
    );
    println!(
        "  {:14}  {:10}  {:>8}  {}",
        "--", "----", "-------", "-----"
    );
    for param in &table {
        let suffix = param.unit.suffix();
        println!(
            "  {:14}  {:10}  {:>8}  {} to {}{}",
            param.string_id,
            param.name,
            format!("{}{}", param.default, suffix),
            param.min,
            param.max,
            suffix
        );
    }

    println!();
    println!("Names are case-insensitive; 'mix', 'Transp' and 'voc_output' all work.");
    println!(
        "Resting note defaults to {} (set with --default-note); transpose spans +/-{} semitones.",
        DEFAULT_NOTE, TRANSPOSE_RANGE
    );
    println!();
    println!("Example usage:");
    println!();
    println!("  vocosync process voice.wav robot.wav --note 0:57 --note 1.5s:60 --param mix=80");

    Ok(())
}
