use std::env;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{Local, NaiveDate};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info};

use goalscope::data;
use goalscope::league::{self, LeagueRow, FIRST_HALF_LINES, FULL_TIME_LINES};
use goalscope::print::{tabulate_league, tabulate_timeframes};
use goalscope::team::Filter;
use goalscope::timeline::TimelineBuilder;

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// CSV/JSON file (or directory of files) to source the match data from
    file: PathBuf,

    /// restrict to a country
    #[clap(short = 'c', long)]
    country: Option<String>,

    /// restrict to one or more seasons
    #[clap(short = 's', long)]
    season: Vec<String>,

    /// ignore fixtures dated after this day (dd/mm/yyyy); defaults to today
    #[clap(long, value_parser = parse_day)]
    as_of: Option<NaiveDate>,

    /// export the league summary to a CSV file
    #[clap(long)]
    csv: Option<PathBuf>,

    /// print JSON instead of tables
    #[clap(long)]
    json: bool,
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
    debug!("args: {args:?}");

    let start_time = Instant::now();
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let records = data::played_before(data::read_from_file(&args.file)?, as_of);
    let filter = Filter {
        country: args.country.clone(),
        seasons: args.season.clone(),
    };
    let selected = filter.apply(&records);
    info!("selected {} of {} matches", selected.len(), records.len());

    let mut summary = league::summarise(&selected);
    summary.extend(league::total_row(&summary));
    let by_label = league::summarise_by_label(&selected);
    let timeframes = league::all_timeframes(&TimelineBuilder::default(), &selected);

    if let Some(path) = &args.csv {
        export(path, &summary)?;
        info!("exported {} rows to {path:?}", summary.len());
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "summary": summary,
                "by_label": by_label,
                "timeframes": timeframes,
            }))?
        );
    } else {
        info!("League summary:\n{}", Console::default().render(&tabulate_league(&summary)));
        info!("By price label:\n{}", Console::default().render(&tabulate_league(&by_label)));
        info!("Goal time-frames:\n{}", Console::default().render(&tabulate_timeframes(&timeframes)));
    }
    let elapsed = start_time.elapsed();
    info!("took {:.3}s", elapsed.as_millis() as f64 / 1_000.);
    Ok(())
}

fn export(path: &Path, rows: &[LeagueRow]) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    let mut header = vec![
        "country", "season", "matches", "home_win", "draw", "away_win", "avg_goals_1h",
        "avg_goals_2h", "avg_goals_ft",
    ]
    .into_iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>();
    header.extend(FIRST_HALF_LINES.iter().map(|line| format!("over_{line}_1h")));
    header.extend(FULL_TIME_LINES.iter().map(|line| format!("over_{line}_ft")));
    header.push("btts".into());
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![
            row.group.clone(),
            row.season.clone(),
            row.matches.to_string(),
            row.home_win.to_string(),
            row.draw.to_string(),
            row.away_win.to_string(),
            row.avg_goals_1h.to_string(),
            row.avg_goals_2h.to_string(),
            row.avg_goals_ft.to_string(),
        ];
        record.extend(row.over_1h.iter().map(ToString::to_string));
        record.extend(row.over_ft.iter().map(ToString::to_string));
        record.push(row.btts.to_string());
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
