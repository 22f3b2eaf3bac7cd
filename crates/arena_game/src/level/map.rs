//! Map CSV: a sized grid of cell strings

use std::io::Read;

use scene_engine::foundation::math::Vec2;

use super::cell::{parse_cell, CellEntry};
use super::{LevelLoadError, CELL_OFFSET};

/// Parse a `"<width>x<height>"` size cell
pub fn parse_map_size(text: &str) -> Result<(usize, usize), LevelLoadError> {
    let invalid = || LevelLoadError::InvalidMapSize(text.to_string());
    let (w, h) = text.trim().split_once('x').ok_or_else(invalid)?;
    let width = w.trim().parse::<usize>().map_err(|_| invalid())?;
    let height = h.trim().parse::<usize>().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }
    Ok((width, height))
}

/// Validated grid of cells indexed `[row][column]`
///
/// Each row is stored mirrored relative to its file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileMap {
    rows: Vec<Vec<String>>,
    entries: Vec<Vec<Vec<CellEntry>>>,
}

impl TileMap {
    /// Read a map CSV
    ///
    /// Cell `(0, 1)` holds the size; rows `1..=height` and columns
    /// `1..=width` hold the grid.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LevelLoadError> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let records = csv.records().collect::<Result<Vec<_>, _>>()?;

        let size = records
            .first()
            .and_then(|r| r.get(1))
            .ok_or_else(|| LevelLoadError::InvalidMapSize(String::new()))?;
        let (width, height) = parse_map_size(size)?;

        let mut rows = Vec::with_capacity(height);
        for y in 1..=height {
            let record = records
                .get(y)
                .ok_or_else(|| LevelLoadError::InvalidMapData(format!("missing row {y} of {height}")))?;
            let mut row = (1..=width)
                .map(|x| {
                    record
                        .get(x)
                        .map(str::to_string)
                        .ok_or_else(|| LevelLoadError::InvalidMapData(format!("row {y} has no column {x}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            row.reverse();
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Build from rows already in grid order, validating every cell
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, LevelLoadError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut entries = Vec::with_capacity(rows.len());
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LevelLoadError::InvalidMapData(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
            let parsed = row
                .iter()
                .enumerate()
                .map(|(x, cell)| {
                    parse_cell(cell)
                        .map_err(|e| LevelLoadError::InvalidMapData(format!("cell ({x}, {y}) '{cell}': {e}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            entries.push(parsed);
        }
        Ok(Self { rows, entries })
    }

    /// Raw cell strings, `[row][column]`
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Raw text of the cell at column `x`, row `y`
    pub fn cell(&self, x: usize, y: usize) -> Option<&str> {
        self.rows.get(y)?.get(x).map(String::as_str)
    }

    /// Parsed segments of the cell at column `x`, row `y`
    pub fn entries(&self, x: usize, y: usize) -> Option<&[CellEntry]> {
        self.entries.get(y)?.get(x).map(Vec::as_slice)
    }

    /// Lower world bound
    pub fn minimum(&self) -> Vec2 {
        Vec2::zeros()
    }

    /// Upper world bound
    #[allow(clippy::cast_precision_loss)]
    pub fn maximum(&self) -> Vec2 {
        Vec2::new(
            CELL_OFFSET * self.column_count() as f32,
            CELL_OFFSET * self.row_count() as f32,
        )
    }
}
