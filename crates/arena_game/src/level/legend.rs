//! Legend CSV: maps map symbols to prop names

use std::collections::BTreeMap;
use std::io::Read;

use super::LevelLoadError;

const HEADER: [&str; 3] = ["Legend", "Symbol", "Name"];

/// Symbol to prop-name table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    entries: BTreeMap<String, String>,
}

impl Legend {
    /// Parse a legend CSV
    ///
    /// The first row must read `Legend,Symbol,Name`. Every later row maps
    /// column 1 (symbol) to column 2 (name); shorter rows are skipped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LevelLoadError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = csv.records();

        let header = records
            .next()
            .transpose()?
            .ok_or_else(|| LevelLoadError::InvalidLegendFormat(String::new()))?;
        let found: Vec<&str> = header.iter().take(3).collect();
        if found != HEADER {
            return Err(LevelLoadError::InvalidLegendFormat(found.join(",")));
        }

        let mut legend = Self::default();
        for (row, record) in records.enumerate() {
            let record = record?;
            match (record.get(1), record.get(2)) {
                (Some(symbol), Some(name)) => legend.insert(symbol, name),
                _ => log::warn!("Skipping legend row {}: expected three columns", row + 1),
            }
        }
        log::debug!("Loaded legend with {} symbols", legend.len());
        Ok(legend)
    }

    /// Map `symbol` to `name`, replacing any earlier mapping
    pub fn insert(&mut self, symbol: impl Into<String>, name: impl Into<String>) {
        let symbol = symbol.into();
        if let Some(previous) = self.entries.insert(symbol.clone(), name.into()) {
            log::debug!("Legend symbol '{symbol}' redefined (was '{previous}')");
        }
    }

    /// Prop name for `symbol`
    pub fn name(&self, symbol: &str) -> Option<&str> {
        self.entries.get(symbol).map(String::as_str)
    }

    /// Number of symbols
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the legend is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(symbol, name)` pairs sorted by symbol
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(s, n)| (s.as_str(), n.as_str()))
    }
}
