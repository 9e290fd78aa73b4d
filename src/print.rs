//! Console tables for the computed statistics.

use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Cell, Col, Row, Table};
use strum::IntoEnumIterator;

use crate::band::TimeBand;
use crate::league::{LeagueRow, Timeframes, FIRST_HALF_LINES, FULL_TIME_LINES};
use crate::pattern::Pattern;
use crate::stats::{BandPercents, ResultSplit, StatisticRow};
use crate::team::{Comparison, TeamReport};

fn percent_cell(value: f64) -> Cell {
    format!("{value:.2}").into()
}

fn optional_cell(value: Option<f64>) -> Cell {
    match value {
        None => "-".into(),
        Some(value) => percent_cell(value),
    }
}

/// A statistic row that is absent (a venue without matches) renders as `-` throughout.
fn metric_row<F>(label: &str, rows: &[Option<&StatisticRow>], cell: F) -> Row
where
    F: Fn(&StatisticRow) -> Cell,
{
    let mut cells = vec![label.into()];
    cells.extend(rows.iter().map(|row| match row {
        None => "-".into(),
        Some(row) => cell(row),
    }));
    Row::new(Styles::default(), cells)
}

fn result_rows(
    table: &mut Table,
    prefix: &str,
    rows: &[Option<&StatisticRow>],
    split: impl Fn(&StatisticRow) -> &ResultSplit,
) {
    table.push_row(metric_row(&format!("{prefix}Win %"), rows, |row| {
        percent_cell(split(row).win)
    }));
    table.push_row(metric_row(&format!("{prefix}Draw %"), rows, |row| {
        percent_cell(split(row).draw)
    }));
    table.push_row(metric_row(&format!("{prefix}Loss %"), rows, |row| {
        percent_cell(split(row).loss)
    }));
}

fn band_rows(
    table: &mut Table,
    prefix: &str,
    rows: &[Option<&StatisticRow>],
    bands: impl Fn(&StatisticRow) -> &BandPercents,
) {
    for band in TimeBand::iter() {
        table.push_row(metric_row(&format!("{prefix} {}'", band.label()), rows, |row| {
            percent_cell(bands(row)[band])
        }));
    }
}

/// One metric per table row, one statistic row per column.
fn tabulate_rows(headers: &[String], rows: &[Option<&StatisticRow>]) -> Table {
    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![Col::new(
                Styles::default().with(MinWidth(22)).with(HAlign::Left),
            )];
            for _ in rows {
                cols.push(Col::new(
                    Styles::default().with(MinWidth(12)).with(HAlign::Right),
                ));
            }
            cols
        })
        .with_row({
            let mut header_cells = vec!["".into()];
            header_cells.extend(headers.iter().map(|header| header.clone().into()));
            Row::new(
                Styles::default().with(Header(true)).with(Separator(true)),
                header_cells,
            )
        });

    table.push_row(metric_row("Matches", rows, |row| row.matches.to_string().into()));
    result_rows(&mut table, "", rows, |row| &row.results);
    result_rows(&mut table, "1H ", rows, |row| &row.first_half);
    result_rows(&mut table, "2H ", rows, |row| &row.second_half);
    for pattern in Pattern::iter() {
        table.push_row(metric_row(pattern.label(), rows, |row| {
            optional_cell(row.pattern(pattern))
        }));
    }
    table.push_row(metric_row("Avg Goals Scored", rows, |row| {
        format!("{:.2}", row.avg_goals_scored).into()
    }));
    table.push_row(metric_row("Avg Goals Conceded", rows, |row| {
        format!("{:.2}", row.avg_goals_conceded).into()
    }));
    table.push_row(metric_row("BTTS %", rows, |row| percent_cell(row.btts)));
    band_rows(&mut table, "Scored", rows, |row| &row.scored_bands);
    band_rows(&mut table, "Conceded", rows, |row| &row.conceded_bands);
    table.push_row(metric_row("Synthesised timelines", rows, |row| {
        row.synthesized_matches.to_string().into()
    }));
    table
}

pub fn tabulate_report(report: &TeamReport) -> Table {
    let (headers, rows): (Vec<_>, Vec<_>) = report
        .rows()
        .into_iter()
        .map(|(venue, row)| (format!("{} ({venue})", report.team), row))
        .unzip();
    tabulate_rows(&headers, &rows)
}

pub fn tabulate_comparison(comparison: &Comparison) -> Table {
    let headers = [
        format!("{} ({})", comparison.home_team, comparison.home.venue),
        format!("{} ({})", comparison.away_team, comparison.away.venue),
    ];
    tabulate_rows(&headers, &[Some(&comparison.home), Some(&comparison.away)])
}

pub fn tabulate_league(rows: &[LeagueRow]) -> Table {
    let numeric_cols = 7 + FIRST_HALF_LINES.len() + FULL_TIME_LINES.len();
    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![
                Col::new(Styles::default().with(MinWidth(22)).with(HAlign::Left)),
                Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Left)),
            ];
            for _ in 0..numeric_cols {
                cols.push(Col::new(
                    Styles::default().with(MinWidth(7)).with(HAlign::Right),
                ));
            }
            cols
        })
        .with_row({
            let mut header_cells: Vec<Cell> = [
                "Group", "Season", "Matches", "Home %", "Draw %", "Away %", "Avg 1H", "Avg 2H",
                "Avg FT",
            ]
            .into_iter()
            .map(Into::into)
            .collect();
            for line in FIRST_HALF_LINES {
                header_cells.push(format!("1H >{line}").into());
            }
            for line in FULL_TIME_LINES {
                header_cells.push(format!("FT >{line}").into());
            }
            header_cells.push("BTTS %".into());
            Row::new(
                Styles::default().with(Header(true)).with(Separator(true)),
                header_cells,
            )
        });

    for row in rows {
        let mut row_cells: Vec<Cell> = vec![
            row.group.clone().into(),
            row.season.clone().into(),
            row.matches.to_string().into(),
            percent_cell(row.home_win),
            percent_cell(row.draw),
            percent_cell(row.away_win),
            format!("{:.2}", row.avg_goals_1h).into(),
            format!("{:.2}", row.avg_goals_2h).into(),
            format!("{:.2}", row.avg_goals_ft).into(),
        ];
        row_cells.extend(row.over_1h.iter().map(|&value| percent_cell(value)));
        row_cells.extend(row.over_ft.iter().map(|&value| percent_cell(value)));
        row_cells.push(percent_cell(row.btts));
        table.push_row(Row::new(Styles::default(), row_cells));
    }
    table
}

pub fn tabulate_timeframes(timeframes: &[Timeframes]) -> Table {
    let mut table = Table::default()
        .with_cols({
            let mut cols = vec![
                Col::new(Styles::default().with(MinWidth(24)).with(HAlign::Left)),
                Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
                Col::new(Styles::default().with(MinWidth(9)).with(HAlign::Left)),
                Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            ];
            for _ in TimeBand::iter() {
                cols.push(Col::new(
                    Styles::default().with(MinWidth(7)).with(HAlign::Right),
                ));
            }
            cols
        })
        .with_row({
            let mut header_cells: Vec<Cell> = vec![
                "Label".into(),
                "Matches".into(),
                "".into(),
                "Goals".into(),
            ];
            header_cells.extend(TimeBand::iter().map(|band| format!("{}'", band.label()).into()));
            Row::new(
                Styles::default().with(Header(true)).with(Separator(true)),
                header_cells,
            )
        });

    for frame in timeframes {
        for (series, goals, bands) in [
            ("Scored", frame.scored_goals, &frame.scored),
            ("Conceded", frame.conceded_goals, &frame.conceded),
        ] {
            let (label, matches) = if series == "Scored" {
                (frame.label.to_string(), frame.matches.to_string())
            } else {
                (String::new(), String::new())
            };
            let mut row_cells: Vec<Cell> = vec![
                label.into(),
                matches.into(),
                series.into(),
                goals.to_string().into(),
            ];
            row_cells.extend(TimeBand::iter().map(|band| percent_cell(bands[band])));
            table.push_row(Row::new(Styles::default(), row_cells));
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    use super::*;
    use crate::domain::Score;
    use crate::league;
    use crate::testing::record;
    use crate::timeline::TimelineBuilder;

    #[test]
    fn report_table_renders() {
        let records = [
            record("Team A", "Team B", Score::new(2, 0), Score::new(1, 0), "12;60", ""),
            record("Team B", "Team A", Score::new(1, 1), Score::new(0, 0), "50", "70"),
        ];
        let records: Vec<_> = records.iter().collect();
        let builder = TimelineBuilder::default();
        let report = TeamReport::compute(&builder, &records, "Team A").unwrap();
        let rendered = Console::default().render(&tabulate_report(&report)).to_string();
        assert!(rendered.contains("Team A (Blended)"));
        assert!(rendered.contains("1-1 after 0-1 %"));

        let rendered = Console::default()
            .render(&tabulate_report(&TeamReport::compute(&builder, &records[..1], "Team B").unwrap()))
            .to_string();
        let matches_line = rendered.lines().find(|line| line.contains("Matches")).unwrap();
        assert!(matches_line.contains('-'));
        assert!(matches_line.contains('1'));

        let comparison = Comparison::compute(&builder, &records, "Team A", "Team A").unwrap();
        let rendered = Console::default().render(&tabulate_comparison(&comparison)).to_string();
        assert!(rendered.contains("Team A (Away)"));

        let rows = league::summarise(&records);
        let rendered = Console::default().render(&tabulate_league(&rows)).to_string();
        assert!(rendered.contains("FT >4.5"));

        let frames = league::all_timeframes(&builder, &records);
        let rendered = Console::default().render(&tabulate_timeframes(&frames)).to_string();
        assert!(rendered.contains("Others"));
    }
}
