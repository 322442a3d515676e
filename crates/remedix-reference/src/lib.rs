//! Reference store for plastic ↔ microbe degradation data.
//!
//! The table is a small CSV loaded once at startup and shared read-only for
//! the lifetime of the process. Each row pairs a plastic type with one
//! candidate microbe and the conditions under which it performs best:
//!
//! | Column             | Meaning                                        |
//! |--------------------|------------------------------------------------|
//! | `plastic_type`     | PE, PET, PP, ... (normalised to upper-case)    |
//! | `microbe`          | Organism name, kept as written                 |
//! | `optimal_pH`       | pH at which the microbe degrades fastest       |
//! | `optimal_temp`     | Temperature (°C) at which it degrades fastest  |
//! | `efficiency`       | Ceiling on the degradable fraction, in [0, 1]  |
//! | `degradation_time` | Days to reach that ceiling under optimum       |
//!
//! # Example
//!
//! ```rust,no_run
//! use remedix_reference::ReferenceTable;
//!
//! let table = ReferenceTable::load_or_empty("data/microbial_db.csv");
//! for record in table.candidates(" pet ") {
//!     println!("{} ({:.2})", record.microbe, record.efficiency);
//! }
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use remedix_common::{normalise_key, RemedixError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Default location of the reference CSV, relative to the working directory.
pub const DEFAULT_REFERENCE_PATH: &str = "data/microbial_db.csv";

/// Header names the CSV must provide (compared lower-cased).
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "plastic_type",
    "microbe",
    "optimal_ph",
    "optimal_temp",
    "efficiency",
    "degradation_time",
];

/// One plastic/microbe pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub plastic_type: String,
    pub microbe: String,
    #[serde(rename = "optimal_pH")]
    pub optimal_ph: f64,
    pub optimal_temp: f64,
    pub efficiency: f64,
    pub degradation_time: f64,
}

impl ReferenceRecord {
    /// Build a validated record. `plastic_type` is normalised, `microbe` trimmed.
    pub fn new(
        plastic_type: &str,
        microbe: &str,
        optimal_ph: f64,
        optimal_temp: f64,
        efficiency: f64,
        degradation_time: f64,
    ) -> Result<Self> {
        let plastic_type = normalise_key(plastic_type);
        let microbe = microbe.trim().to_string();

        if plastic_type.is_empty() {
            return Err(RemedixError::InvalidInput("empty plastic_type".into()));
        }
        if microbe.is_empty() {
            return Err(RemedixError::InvalidInput("empty microbe".into()));
        }
        if !optimal_ph.is_finite() || !optimal_temp.is_finite() {
            return Err(RemedixError::InvalidInput(format!(
                "non-finite optimum for {microbe}: pH={optimal_ph}, temp={optimal_temp}"
            )));
        }
        if !(0.0..=1.0).contains(&efficiency) {
            return Err(RemedixError::InvalidInput(format!(
                "efficiency {efficiency} for {microbe} outside [0, 1]"
            )));
        }
        if !degradation_time.is_finite() || degradation_time <= 0.0 {
            return Err(RemedixError::InvalidInput(format!(
                "degradation_time {degradation_time} for {microbe} must be > 0"
            )));
        }

        Ok(Self {
            plastic_type,
            microbe,
            optimal_ph,
            optimal_temp,
            efficiency,
            degradation_time,
        })
    }

    /// Whether this row is for the given microbe (trimmed, case-insensitive).
    pub fn is_microbe(&self, microbe: &str) -> bool {
        normalise_key(&self.microbe) == normalise_key(microbe)
    }
}

/// Ordered, immutable collection of reference rows.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    records: Vec<ReferenceRecord>,
    source: Option<PathBuf>,
}

impl ReferenceTable {
    /// Load the table from a CSV file.
    ///
    /// Fails with `DataUnavailable` when the file cannot be read or lacks a
    /// required column. Rows that fail validation are skipped and logged.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading reference table from {:?}", path);

        let file = std::fs::File::open(path).map_err(|e| {
            RemedixError::DataUnavailable(format!("{}: {}", path.display(), e))
        })?;

        let mut table = Self::from_reader(file)?;
        table.source = Some(path.to_path_buf());

        info!(
            "Reference table ready: {} rows, {} plastic types from {:?}",
            table.len(),
            table.plastic_types().len(),
            path
        );
        Ok(table)
    }

    /// Load the table, falling back to an empty one when it is unavailable.
    /// Every lookup against the empty table reports "not found".
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(table) => table,
            Err(e) => {
                warn!("Reference table unavailable, serving empty table: {e}");
                Self::default()
            }
        }
    }

    /// Parse CSV content from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| RemedixError::DataUnavailable(format!("unreadable header: {e}")))?
            .iter()
            .map(|h| h.to_lowercase())
            .collect();

        let mut columns = [0usize; 6];
        for (slot, name) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers.iter().position(|h| h == name).ok_or_else(|| {
                RemedixError::DataUnavailable(format!("missing column: {name}"))
            })?;
        }

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for (line, result) in reader.records().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    warn!("Skipping unreadable reference row {}: {}", line + 2, e);
                    skipped += 1;
                    continue;
                }
            };

            match parse_row(&row, &columns) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping reference row {}: {}", line + 2, e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            warn!("Skipped {} malformed reference rows", skipped);
        }

        Ok(Self { records, source: None })
    }

    /// Build a table from already-validated records, keeping their order.
    pub fn from_records(records: Vec<ReferenceRecord>) -> Self {
        Self { records, source: None }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    /// File the table was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// All rows for a plastic type, in table order.
    pub fn candidates<'a>(&'a self, plastic_type: &str) -> impl Iterator<Item = &'a ReferenceRecord> + 'a {
        let key = normalise_key(plastic_type);
        self.records.iter().filter(move |r| r.plastic_type == key)
    }

    /// First row for the (plastic_type, microbe) pair.
    pub fn find(&self, plastic_type: &str, microbe: &str) -> Option<&ReferenceRecord> {
        self.candidates(plastic_type).find(|r| r.is_microbe(microbe))
    }

    /// Distinct plastic types in order of first appearance.
    pub fn plastic_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = Vec::new();
        for record in &self.records {
            if !types.contains(&record.plastic_type.as_str()) {
                types.push(&record.plastic_type);
            }
        }
        types
    }
}

fn parse_row(row: &csv::StringRecord, columns: &[usize; 6]) -> Result<ReferenceRecord> {
    let text = |i: usize| row.get(columns[i]).unwrap_or_default();
    let number = |i: usize| -> Result<f64> {
        let raw = text(i);
        raw.parse::<f64>().map_err(|_| {
            RemedixError::InvalidInput(format!("{}: not a number: {:?}", REQUIRED_COLUMNS[i], raw))
        })
    };

    ReferenceRecord::new(text(0), text(1), number(2)?, number(3)?, number(4)?, number(5)?)
}
