//! Grouping of normalized records into per-name shares of annual births

use itertools::Itertools;
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{Result, TrendsError};
use crate::models::{AggregatedRecord, Gender, NormalizedRecord};

/// Births per (name, year, gender)
type NameCounts<'a> = FxHashMap<(&'a str, i32, Gender), u64>;

/// Births per (year, gender), all names
type Totals = FxHashMap<(i32, Gender), u64>;

/// Sum counts per (name, year, gender), join them with the per-(year, gender)
/// totals and derive each name's percentage. Rows come back sorted by
/// (name, gender, year).
pub fn aggregate(records: &[NormalizedRecord]) -> Result<Vec<AggregatedRecord>> {
    let mut name_counts = NameCounts::default();
    let mut totals = Totals::default();
    for record in records {
        let key = (record.year, record.gender);
        add_count(totals.entry(key).or_default(), record)?;
        add_count(
            name_counts
                .entry((record.name.as_str(), record.year, record.gender))
                .or_default(),
            record,
        )?;
    }

    debug!(
        "aggregate: {} records into {} name groups over {} year groups",
        records.len(),
        name_counts.len(),
        totals.len()
    );

    join_totals(name_counts, &totals)
}

fn add_count(sum: &mut u64, record: &NormalizedRecord) -> Result<()> {
    *sum = sum
        .checked_add(record.count)
        .ok_or(TrendsError::CountOverflow {
            year: record.year,
            gender: record.gender,
        })?;
    Ok(())
}

/// Attach each name group's total and percentage, failing on a group without
/// a total or with a zero total
fn join_totals(name_counts: NameCounts<'_>, totals: &Totals) -> Result<Vec<AggregatedRecord>> {
    name_counts
        .into_iter()
        .sorted_unstable_by(|(a, _), (b, _)| (a.0, a.2, a.1).cmp(&(b.0, b.2, b.1)))
        .map(|((name, year, gender), count)| {
            let total_count =
                totals
                    .get(&(year, gender))
                    .copied()
                    .ok_or_else(|| TrendsError::JoinInvariant {
                        name: name.to_string(),
                        year,
                        gender,
                    })?;

            if total_count == 0 {
                return Err(TrendsError::DivisionByZero { year, gender });
            }

            Ok(AggregatedRecord {
                name: name.to_string(),
                year,
                gender,
                count,
                total_count,
                percentage: 100.0 * count as f64 / total_count as f64,
            })
        })
        .collect()
}
