//! Reader for the delimited name dataset
//!
//! The source is a header-optional delimited file with the fields
//! `gender_code; name; year; count` in fixed order. Columns are named
//! positionally (`Gender, Name, Year, Count`) and read as text through the
//! Arrow CSV reader; typing happens later in normalization.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::{Array, AsArray, StringArray};
use arrow::csv::ReaderBuilder;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow_schema::{DataType, Field, Schema, SchemaRef};
use log::debug;

use crate::config::{DatasetConfig, HeaderPolicy};
use crate::error::{Result, TrendsError};
use crate::models::RawRecord;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Positional column names of the source
pub const COLUMN_NAMES: [&str; 4] = ["Gender", "Name", "Year", "Count"];

const BOM: &str = "\u{feff}";

/// Record batches read from one source, with the line the first data row sits on
#[derive(Debug, Clone)]
pub struct SourceBatches {
    /// Batches in file order
    pub batches: Vec<RecordBatch>,
    /// 1-based line of the first data row
    pub first_data_line: usize,
}

impl SourceBatches {
    /// Total number of data rows
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RecordBatch::num_rows).sum()
    }
}

/// Reads the delimited source into raw records
#[derive(Debug, Clone, Default)]
pub struct DelimitedReader {
    config: DatasetConfig,
}

impl DelimitedReader {
    #[must_use]
    pub fn new(config: DatasetConfig) -> Self {
        Self { config }
    }

    /// The all-text schema every batch is read with
    #[must_use]
    pub fn schema() -> SchemaRef {
        Arc::new(Schema::new(
            COLUMN_NAMES
                .iter()
                .map(|name| Field::new(*name, DataType::Utf8, true))
                .collect::<Vec<_>>(),
        ))
    }

    /// Read every raw record of the file at `path`
    pub fn read_records(&self, path: &Path) -> Result<Vec<RawRecord>> {
        log_operation_start("Reading", path);
        let start = Instant::now();

        let file = File::open(path).map_err(|e| TrendsError::unavailable(path, e))?;
        let source = self
            .read_batches(BufReader::new(file))
            .map_err(|e| match e {
                TrendsError::DataSourceUnavailable { source, .. } => {
                    TrendsError::unavailable(path, source)
                }
                other => other,
            })?;
        let records = Self::records_from_batches(&source)?;

        log_operation_complete("read", path, records.len(), start.elapsed());
        Ok(records)
    }

    /// Read record batches from any buffered source
    pub fn read_batches<R: BufRead>(&self, mut reader: R) -> Result<SourceBatches> {
        let mut first_line = String::new();
        reader.read_line(&mut first_line).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => {
                TrendsError::MalformedSource(ArrowError::CsvError(format!("line 1: {e}")))
            }
            _ => TrendsError::unavailable("<stream>", e),
        })?;

        let first_line = first_line
            .strip_prefix(BOM)
            .map(str::to_string)
            .unwrap_or(first_line);

        if first_line.trim().is_empty() {
            return Ok(SourceBatches {
                batches: Vec::new(),
                first_data_line: 1,
            });
        }

        let has_header = match self.config.header {
            HeaderPolicy::Present => true,
            HeaderPolicy::Absent => false,
            HeaderPolicy::Auto => self.looks_like_header(&first_line),
        };
        debug!("First line {:?} treated as header: {has_header}", first_line.trim_end());

        let (prefix, first_data_line) = if has_header {
            (Vec::new(), 2)
        } else {
            (first_line.into_bytes(), 1)
        };

        let batches = self.read_csv(Cursor::new(prefix).chain(reader))?;
        Ok(SourceBatches {
            batches,
            first_data_line,
        })
    }

    fn read_csv<R: Read>(&self, input: R) -> Result<Vec<RecordBatch>> {
        let csv = ReaderBuilder::new(Self::schema())
            .with_header(false)
            .with_delimiter(self.config.delimiter)
            .with_batch_size(self.config.batch_size())
            .build(input)?;

        csv.collect::<std::result::Result<Vec<_>, ArrowError>>()
            .map_err(TrendsError::from)
    }

    /// A header's first field is a column label, a data row's is a gender code
    fn looks_like_header(&self, line: &str) -> bool {
        let delimiter = char::from(self.config.delimiter);
        let first_field = line.split(delimiter).next().unwrap_or_default();
        first_field.trim().trim_matches('"').parse::<i64>().is_err()
    }

    /// Convert batches to raw records, numbering lines from `first_data_line`
    pub fn records_from_batches(source: &SourceBatches) -> Result<Vec<RawRecord>> {
        let mut records = Vec::with_capacity(source.num_rows());
        let mut line = source.first_data_line;

        for batch in &source.batches {
            let columns = COLUMN_NAMES
                .iter()
                .map(|name| text_column(batch, name))
                .collect::<Result<Vec<_>>>()?;

            for row in 0..batch.num_rows() {
                let cell = |col: usize| {
                    let array = columns[col];
                    if array.is_null(row) {
                        String::new()
                    } else {
                        array.value(row).to_string()
                    }
                };

                records.push(RawRecord::new(cell(0), cell(1), cell(2), cell(3)).at_line(line));
                line += 1;
            }
        }

        Ok(records)
    }
}

fn text_column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a StringArray> {
    batch
        .column_by_name(name)
        .and_then(|column| column.as_string_opt::<i32>())
        .ok_or_else(|| {
            TrendsError::MalformedSource(ArrowError::SchemaError(format!(
                "column {name} missing or not text"
            )))
        })
}
