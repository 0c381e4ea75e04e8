use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use prenom_trends::{Gender, TrendQuery, TrendStatistics, get_processed_data};

const DEFAULT_DATA_FILE: &str = "data/nat2021.csv";
const DEFAULT_NAMES: [&str; 4] = ["PHILIPPE", "GÉRALD", "GREGORY", "ZIDANE"];

#[derive(Parser)]
#[command(name = "prenom-trends")]
#[command(about = "French first-name popularity by percentage of annual births")]
#[command(version)]
struct Cli {
    /// INSEE national first-name file
    #[arg(long, short, default_value = DEFAULT_DATA_FILE)]
    file: PathBuf,

    /// Gender to report on (male or female)
    #[arg(long, short, default_value = "male")]
    gender: Gender,

    /// First year of the range
    #[arg(long, default_value_t = 1900)]
    from: i32,

    /// Last year of the range
    #[arg(long, default_value_t = 2021)]
    to: i32,

    /// Print the summaries as JSON
    #[arg(long)]
    json: bool,

    /// List the names available for the gender instead of summarizing
    #[arg(long)]
    list_names: bool,

    /// Names to summarize
    names: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let start = Instant::now();
    let table = get_processed_data(&cli.file)
        .with_context(|| format!("Failed to load {}", cli.file.display()))?;
    info!("Loaded {} rows in {:?}", table.len(), start.elapsed());

    if cli.list_names {
        for name in table.names_for(cli.gender) {
            println!("{name}");
        }
        return Ok(());
    }

    let names: Vec<String> = if cli.names.is_empty() {
        DEFAULT_NAMES.iter().map(ToString::to_string).collect()
    } else {
        cli.names
    };

    let query = TrendQuery::new(cli.gender)
        .with_names(&names)
        .with_years(cli.from, cli.to);
    let rows = table.select(&query);
    info!("{} rows match the selection", rows.len());

    let summaries = TrendStatistics::summarize(&rows, &names);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print!("{}", TrendStatistics::generate_report(&query, &summaries));
    }

    Ok(())
}
