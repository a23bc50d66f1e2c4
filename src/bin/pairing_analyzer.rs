#![forbid(unsafe_code)]
//! # pairing_analyzer
//!
//! Analyze the character pairings of an archive project and render them
//! as a chord diagram. The `masterkey` argument switches between
//! per-pairing statistics and pairing co-occurrence; `key` selects the
//! plotted field.
//!
//! ## Example
//! ```bash
//! pairing_analyzer path/to/project ships.html stats follows --adult-only
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use fanfic_analysis::{
    MasterKey, Project, StatKey, build_matrix, collect_pairing_data, write_chord_html,
};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Analyze the character pairings of an archive project"
)]
struct Cli {
    /// Path to the archive project
    project: PathBuf,

    /// Path to write the HTML graph to
    outfile: PathBuf,

    /// Table to draw: per-pairing stats or co-occurrence between pairings
    #[arg(value_enum)]
    masterkey: MasterKey,

    /// Field of the chosen table to plot
    #[arg(value_enum)]
    key: StatKey,

    /// Only evaluate stories rated mature
    #[arg(long)]
    adult_only: bool,

    /// Print the gathered data before rendering
    #[arg(short = 'p')]
    print_data: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let project = Project::open(&cli.project)?;
    let stories = project.collect_metadata()?;
    let data = collect_pairing_data(&stories, cli.adult_only);

    if cli.print_data {
        let dump = serde_json::to_string_pretty(&data.printable())
            .map_err(|e| format!("Serialize data failed: {e}"))?;
        println!("{dump}");
    }

    let values = data.select(cli.masterkey, cli.key)?;
    let chord = build_matrix(values);
    write_chord_html(&chord, &cli.outfile)
}
