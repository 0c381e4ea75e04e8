use std::io::Write;
use std::path::Path;

use prenom_trends::{DatasetConfig, Result, TrendTable, process_file};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tempfile::NamedTempFile;

/// Header line of the INSEE national file
pub const INSEE_HEADER: &str = "sexe;preusuel;annais;nombre";

const NAMES: [&str; 8] = [
    "PHILIPPE", "JEAN", "MARIE", "CAMILLE", "léo", "Zoé", "GÉRALD", "_PRENOMS_RARES",
];

const YEARS: [&str; 6] = ["1900", "1950", "1999", "2000", "2021", "XXXX"];

/// Write `contents` to a fresh temporary file
#[must_use]
pub fn write_fixture(contents: &str) -> NamedTempFile {
    write_bytes_fixture(contents.as_bytes())
}

/// Write raw bytes, which need not be valid UTF-8, to a fresh temporary file
#[must_use]
pub fn write_bytes_fixture(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create fixture");
    file.write_all(contents).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

/// Render rows as an INSEE-style file with header
#[must_use]
pub fn insee_file(rows: &[(u8, &str, &str, u64)]) -> String {
    let mut out = String::from(INSEE_HEADER);
    out.push('\n');
    for (gender, name, year, count) in rows {
        out.push_str(&format!("{gender};{name};{year};{count}\n"));
    }
    out
}

/// A deterministic pseudo-random INSEE file, including rare-name rows,
/// unparsable years and duplicate keys
#[must_use]
pub fn random_insee_file(seed: u64, rows: usize) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::from(INSEE_HEADER);
    out.push('\n');
    for _ in 0..rows {
        let gender = rng.random_range(1..=2);
        let name = NAMES.choose(&mut rng).copied().unwrap_or("JEAN");
        let year = YEARS.choose(&mut rng).copied().unwrap_or("2000");
        let count = rng.random_range(1..=5_000u64);
        out.push_str(&format!("{gender};{name};{year};{count}\n"));
    }
    out
}

/// Process a fixture with the default dataset configuration
pub fn process(path: &Path) -> Result<TrendTable> {
    process_file(path, &DatasetConfig::default())
}
