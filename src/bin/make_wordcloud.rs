#![forbid(unsafe_code)]
//! # make_wordcloud
//!
//! Create a word cloud image from the English stories of an archive
//! project. Frequencies are counted over the cleaned story text, either
//! per single word or per adjacent word pair (`--pairs`), and the built-in
//! ignore list can be extended with `-i`/`--ignore`.
//!
//! ## Example
//! ```bash
//! make_wordcloud path/to/project cloud.png --pairs -i chapter -i note
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::error;

use fanfic_analysis::{CountConfig, Project, combined_text, count_words, include_in_cloud, render_cloud};

#[derive(Parser)]
#[command(author, version, about = "Create a word cloud from an archive project")]
struct Cli {
    /// Path to the archive project
    project: PathBuf,

    /// Path to write the image to
    outfile: PathBuf,

    /// Use adjacent word pairs instead of single words
    #[arg(long)]
    pairs: bool,

    /// Ignore/exclude word(s), in addition to the built-in list
    #[arg(short = 'i', long = "ignore", value_name = "WORD")]
    ignore: Vec<String>,
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
    let config = CountConfig::default().with_ignored(&cli.ignore);

    let project = Project::open(&cli.project)?;
    let stories: Vec<_> = project
        .collect_metadata()?
        .into_iter()
        .filter(include_in_cloud)
        .collect();

    let text = combined_text(&project, &stories)?;
    let frequencies = count_words(&text, &config);
    let table = if cli.pairs {
        &frequencies.pairs
    } else {
        &frequencies.single
    };
    render_cloud(table, &cli.outfile)
}
