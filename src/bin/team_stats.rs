use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::bail;
use chrono::{Local, NaiveDate};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use goalscope::data;
use goalscope::print::{tabulate_comparison, tabulate_report};
use goalscope::team::{Comparison, Filter, TeamReport};
use goalscope::timeline::{Config, TimelineBuilder};

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// CSV/JSON file (or directory of files) to source the match data from
    file: PathBuf,

    /// team to report on (plays at home when comparing)
    team: String,

    /// compare against this team's away record
    #[clap(long)]
    vs: Option<String>,

    /// restrict to a country
    #[clap(short = 'c', long)]
    country: Option<String>,

    /// restrict to one or more seasons
    #[clap(short = 's', long)]
    season: Vec<String>,

    /// ignore fixtures dated after this day (dd/mm/yyyy); defaults to today
    #[clap(long, value_parser = parse_day)]
    as_of: Option<NaiveDate>,

    /// minute assigned to synthesised home goals
    #[clap(long, default_value_t = Config::default().home_sentinel_minute)]
    home_sentinel: u16,

    /// minute assigned to synthesised away goals
    #[clap(long, default_value_t = Config::default().away_sentinel_minute)]
    away_sentinel: u16,

    /// print JSON instead of a table
    #[clap(long)]
    json: bool,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        if self.team.trim().is_empty() {
            bail!("team name cannot be blank");
        }
        if let Some(vs) = &self.vs {
            if vs.trim().is_empty() {
                bail!("the --vs team name cannot be blank");
            }
        }
        Ok(())
    }
}

fn parse_day(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%d/%m/%Y").map_err(|err| format!("{text}: {err}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let builder = TimelineBuilder::try_from(Config {
        home_sentinel_minute: args.home_sentinel,
        away_sentinel_minute: args.away_sentinel,
    })?;

    let start_time = Instant::now();
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let records = data::played_before(data::read_from_file(&args.file)?, as_of);
    let filter = Filter {
        country: args.country.clone(),
        seasons: args.season.clone(),
    };
    let selected = filter.apply(&records);
    info!("selected {} of {} matches", selected.len(), records.len());

    match &args.vs {
        None => {
            let report = TeamReport::compute(&builder, &selected, &args.team)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                info!("\n{}", Console::default().render(&tabulate_report(&report)));
            }
        }
        Some(vs) => {
            let comparison = Comparison::compute(&builder, &selected, &args.team, vs)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                info!("\n{}", Console::default().render(&tabulate_comparison(&comparison)));
            }
        }
    }
    let elapsed = start_time.elapsed();
    info!("took {:.3}s", elapsed.as_millis() as f64 / 1_000.);
    Ok(())
}
