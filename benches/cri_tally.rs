use criterion::{criterion_group, criterion_main, Criterion};

use goalscope::domain::{MatchRecord, MinuteField, Score, Side};
use goalscope::tally::{tally, tally_seq};
use goalscope::timeline::TimelineBuilder;

fn criterion_benchmark(c: &mut Criterion) {
    fn season(matches: usize) -> Vec<MatchRecord> {
        (0..matches)
            .map(|index| {
                let (home, away) = ((index % 4) as u8, (index % 3) as u8);
                let minutes = |goals: u8, offset: usize| {
                    (0..goals)
                        .map(|goal| ((goal as usize * 23 + offset + index) % 90 + 1).to_string())
                        .collect::<Vec<_>>()
                        .join(";")
                };
                // every fifth match has no minute data and falls back to synthesis
                let (home_minutes, away_minutes) = if index % 5 == 0 {
                    (MinuteField::Missing, MinuteField::Missing)
                } else {
                    (
                        MinuteField::from(minutes(home, 7).as_str()),
                        MinuteField::from(minutes(away, 13).as_str()),
                    )
                };
                MatchRecord::new(
                    format!("Team {}", index % 20),
                    format!("Team {}", (index + 7) % 20),
                    Score::new(home, away),
                    Score::new(home / 2, away / 2),
                    home_minutes,
                    away_minutes,
                )
            })
            .collect()
    }

    let builder = TimelineBuilder::default();
    let records = season(380);
    let records: Vec<_> = records.iter().collect();

    // sanity check
    assert_eq!(
        tally_seq(&builder, &records, Side::Home),
        tally(&builder, &records, Side::Home)
    );

    c.bench_function("cri_tally_seq_380", |b| {
        b.iter(|| tally_seq(&builder, &records, Side::Home));
    });
    c.bench_function("cri_tally_par_380", |b| {
        b.iter(|| tally(&builder, &records, Side::Home));
    });

    let records = season(10_000);
    let records: Vec<_> = records.iter().collect();
    c.bench_function("cri_tally_par_10000", |b| {
        b.iter(|| tally(&builder, &records, Side::Away));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
