use crate::utils::{insee_file, process, write_bytes_fixture, write_fixture};
use prenom_trends::{
    DatasetConfig, Gender, HeaderPolicy, RawRecord, TrendsError, aggregate, normalize, process_file,
};

/// Test the two-name example: equal counts split the year's births in half
#[test]
fn test_equal_share_of_births() {
    let fixture = write_fixture(&insee_file(&[
        (1, "PHILIPPE", "2000", 500),
        (1, "JEAN", "2000", 500),
    ]));

    let table = process(fixture.path()).unwrap();
    assert_eq!(table.len(), 2);

    let philippe = table
        .rows()
        .iter()
        .find(|row| row.name == "PHILIPPE")
        .unwrap();
    assert_eq!(philippe.gender, Gender::Male);
    assert_eq!(philippe.total_count, 1000);
    assert_eq!(philippe.percentage, 50.0);
}

/// Test that duplicate keys merge into one row
#[test]
fn test_duplicate_rows_merge() {
    let fixture = write_fixture(&insee_file(&[
        (1, "LEO", "1999", 10),
        (1, "LEO", "1999", 5),
    ]));

    let table = process(fixture.path()).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].count, 15);
}

/// Test that rows with unparsable years neither appear nor count toward totals
#[test]
fn test_unparsable_year_excluded_from_totals() {
    let fixture = write_fixture(&insee_file(&[
        (2, "MARIE", "2000", 300),
        (2, "ANNE", "2000", 100),
        (2, "MARIE", "XXXX", 9000),
        (2, "ANNE", "", 50),
    ]));

    let table = process(fixture.path()).unwrap();
    assert_eq!(table.len(), 2);
    for row in table.rows() {
        assert_eq!(row.year, 2000);
        assert_eq!(row.total_count, 400);
    }
    assert_eq!(table.rows()[1].name, "MARIE");
    assert_eq!(table.rows()[1].percentage, 75.0);
}

/// Test that the rare-names placeholder never reaches the output
#[test]
fn test_sentinel_excluded() {
    let fixture = write_fixture(&insee_file(&[
        (1, "_PRENOMS_RARES", "2000", 5000),
        (1, "JEAN", "2000", 100),
    ]));

    let table = process(fixture.path()).unwrap();
    assert!(table.rows().iter().all(|row| row.name != "_PRENOMS_RARES"));
    assert_eq!(table.rows()[0].total_count, 100);
    assert_eq!(table.rows()[0].percentage, 100.0);
}

/// Test that names are upper-cased and merged case-insensitively
#[test]
fn test_names_uppercased() {
    let fixture = write_fixture(&insee_file(&[
        (1, "gérald", "1960", 4),
        (1, "GÉRALD", "1960", 6),
    ]));

    let table = process(fixture.path()).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].name, "GÉRALD");
    assert_eq!(table.rows()[0].count, 10);
}

/// Test that a headerless file reads the same as one with a header
#[test]
fn test_headerless_file() {
    let with_header = write_fixture(&insee_file(&[(2, "ZOE", "2010", 7), (2, "EMMA", "2010", 3)]));
    let without_header = write_fixture("2;ZOE;2010;7\n2;EMMA;2010;3\n");

    let a = process(with_header.path()).unwrap();
    let b = process(without_header.path()).unwrap();
    assert_eq!(a.rows(), b.rows());
}

/// Test that a forced header drops the first data row
#[test]
fn test_forced_header_policy() {
    let fixture = write_fixture("2;ZOE;2010;7\n2;EMMA;2010;3\n");
    let config = DatasetConfig::default().with_header(HeaderPolicy::Present);

    let table = process_file(fixture.path(), &config).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.rows()[0].name, "EMMA");
}

/// Test that a missing file reports the data source as unavailable
#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nat2021.csv");

    let err = process(&path).unwrap_err();
    assert!(matches!(
        err,
        TrendsError::DataSourceUnavailable { path: ref p, .. } if p == &path
    ));
}

/// Test that an unknown gender code fails the whole load
#[test]
fn test_invalid_gender_code() {
    let fixture = write_fixture(&insee_file(&[(1, "JEAN", "2000", 1), (3, "JEAN", "2000", 1)]));

    let err = process(fixture.path()).unwrap_err();
    assert!(matches!(
        err,
        TrendsError::InvalidGenderCode { ref code, line: 3 } if code == "3"
    ));
}

/// Test that a row with the wrong number of fields is a malformed source
#[test]
fn test_wrong_field_count() {
    let fixture = write_fixture("sexe;preusuel;annais;nombre\n1;JEAN;2000\n");

    let err = process(fixture.path()).unwrap_err();
    assert!(matches!(err, TrendsError::MalformedSource(_)));
}

/// Test the in-memory pipeline on raw records directly
#[test]
fn test_normalize_then_aggregate() {
    let raw = vec![
        RawRecord::new("1", "PHILIPPE", "2000", "500"),
        RawRecord::new("1", "JEAN", "2000", "500"),
        RawRecord::new("2", "JEAN", "2000", "2"),
    ];

    let normalized = normalize(raw, &DatasetConfig::default()).unwrap();
    let rows = aggregate(&normalized).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!((rows[0].name.as_str(), rows[0].gender), ("JEAN", Gender::Female));
    assert_eq!(rows[0].percentage, 100.0);
    assert_eq!((rows[1].name.as_str(), rows[1].gender), ("JEAN", Gender::Male));
    assert_eq!(rows[1].percentage, 50.0);
}

/// Test that an empty file yields an empty table
#[test]
fn test_empty_file() {
    let fixture = write_fixture("");
    let table = process(fixture.path()).unwrap();
    assert!(table.is_empty());

    let header_only = write_fixture("sexe;preusuel;annais;nombre\n");
    assert!(process(header_only.path()).unwrap().is_empty());
}

/// Test that counts summing past the count type fail instead of wrapping
#[test]
fn test_count_overflow_fails() {
    let fixture = write_fixture(&insee_file(&[
        (1, "LEO", "1999", u64::MAX),
        (1, "LEO", "1999", u64::MAX),
    ]));

    let err = process(fixture.path()).unwrap_err();
    assert!(matches!(
        err,
        TrendsError::CountOverflow {
            year: 1999,
            gender: Gender::Male
        }
    ));
}

/// Test that invalid UTF-8 is a malformed source wherever it appears
#[test]
fn test_invalid_utf8_is_malformed() {
    let first_line = write_bytes_fixture(b"1;L\xffO;1999;3\n1;LEO;2000;4\n");
    let err = process(first_line.path()).unwrap_err();
    assert!(matches!(err, TrendsError::MalformedSource(_)), "{err:?}");

    let later_line = write_bytes_fixture(b"sexe;preusuel;annais;nombre\n1;L\xffO;1999;3\n");
    let err = process(later_line.path()).unwrap_err();
    assert!(matches!(err, TrendsError::MalformedSource(_)), "{err:?}");
}
