//! Map cell grammar
//!
//! A cell holds one or more segments separated by [`DIVIDER`]. Each segment
//! is a run of ASCII letters naming a legend symbol, optionally followed by
//! transform modifiers introduced with [`TFORM`]:
//!
//! | Segment          | Modifiers        |
//! |------------------|------------------|
//! | `W`              | `[]`             |
//! | `W~90`           | `[90]`           |
//! | `W~(1_2_3)`      | `[1, 2, 3]`      |
//! | `W~(1_2_3)~90`   | `[1, 2, 3, 90]`  |

use std::collections::VecDeque;

use scene_engine::foundation::math::Vec3;

/// Separates objects sharing one cell
pub const DIVIDER: char = '|';

/// Introduces a transform modifier
pub const TFORM: char = '~';

/// Errors from parsing a single cell
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CellParseError {
    /// More than two modifiers in one segment
    #[error("Too many '~' modifiers in '{0}'")]
    TooManyModifiers(String),

    /// A modifier component is not a number
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// A position modifier is missing parentheses or has the wrong arity
    #[error("Malformed position modifier '{0}'")]
    MalformedVector(String),

    /// Text between the symbol and its first modifier
    #[error("Unexpected text '{0}' after symbol")]
    UnexpectedText(String),
}

/// Position and rotation adjustments from a segment's modifiers
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransformOverride {
    /// Added to the cell's world position
    pub offset: Vec3,
    /// Rotation about Z in degrees, when given
    pub rotation_z: Option<f32>,
}

/// One object placed in a cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellEntry {
    /// Legend symbol
    pub symbol: String,
    /// Raw modifier values: empty, `[rotZ]`, `[x, y, z]` or `[x, y, z, rotZ]`
    pub modifiers: Vec<f32>,
}

impl CellEntry {
    /// Interpret the modifiers as a transform override
    pub fn transform(&self) -> TransformOverride {
        match self.modifiers.as_slice() {
            [r] => TransformOverride {
                offset: Vec3::zeros(),
                rotation_z: Some(*r),
            },
            [x, y, z] => TransformOverride {
                offset: Vec3::new(*x, *y, *z),
                rotation_z: None,
            },
            [x, y, z, r] => TransformOverride {
                offset: Vec3::new(*x, *y, *z),
                rotation_z: Some(*r),
            },
            _ => TransformOverride::default(),
        }
    }
}

/// Parse every segment of a cell, left to right
///
/// Segments without a symbol are dropped once their modifiers validate.
pub fn parse_cell(cell: &str) -> Result<Vec<CellEntry>, CellParseError> {
    let mut pending: VecDeque<&str> = cell.split(DIVIDER).collect();
    let mut entries = Vec::with_capacity(pending.len());

    while let Some(segment) = pending.pop_front() {
        let entry = parse_segment(segment.trim())?;
        if !entry.symbol.is_empty() {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn parse_segment(segment: &str) -> Result<CellEntry, CellParseError> {
    let split = segment
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(segment.len());
    let (symbol, rest) = segment.split_at(split);
    Ok(CellEntry {
        symbol: symbol.to_string(),
        modifiers: parse_modifiers(rest)?,
    })
}

/// Parse the modifier tail of a segment (everything after the symbol)
pub fn parse_modifiers(rest: &str) -> Result<Vec<f32>, CellParseError> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Ok(Vec::new());
    }
    let Some(body) = rest.strip_prefix(TFORM) else {
        return Err(CellParseError::UnexpectedText(rest.to_string()));
    };

    let parts: Vec<&str> = body.split(TFORM).collect();
    match parts.as_slice() {
        [single] if single.trim_start().starts_with('(') => parse_vector(single),
        [single] => Ok(vec![parse_number(single)?]),
        [position, rotation] => {
            let mut values = parse_vector(position)?;
            values.push(parse_number(rotation)?);
            Ok(values)
        }
        _ => Err(CellParseError::TooManyModifiers(rest.to_string())),
    }
}

fn parse_vector(text: &str) -> Result<Vec<f32>, CellParseError> {
    let inner = text
        .trim()
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(|| CellParseError::MalformedVector(text.to_string()))?;

    let values = inner.split('_').map(parse_number).collect::<Result<Vec<_>, _>>()?;
    if values.len() != 3 {
        return Err(CellParseError::MalformedVector(text.to_string()));
    }
    Ok(values)
}

fn parse_number(text: &str) -> Result<f32, CellParseError> {
    text.trim()
        .parse::<f32>()
        .map_err(|_| CellParseError::InvalidNumber(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(cell: &str) -> CellEntry {
        let mut entries = parse_cell(cell).unwrap();
        assert_eq!(entries.len(), 1);
        entries.remove(0)
    }

    #[test]
    fn test_modifier_forms() {
        assert!(single("W").modifiers.is_empty());
        assert_eq!(single("W~90").modifiers, vec![90.0]);
        assert_eq!(single("W~(1_2_3)").modifiers, vec![1.0, 2.0, 3.0]);
        assert_eq!(single("W~(1_-2.5_3)~45").modifiers, vec![1.0, -2.5, 3.0, 45.0]);
    }

    #[test]
    fn test_transform_override() {
        let t = single("Lp~(1_2_0)~180").transform();
        assert_eq!(t.offset, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(t.rotation_z, Some(180.0));
        assert_eq!(single("Lp~90").transform().offset, Vec3::zeros());
        assert_eq!(single("Lp").transform(), TransformOverride::default());
    }

    #[test]
    fn test_shared_cell_keeps_modifiers_per_segment() {
        let entries = parse_cell("R~90|W~(0_1_0)|B").unwrap();
        let symbols: Vec<_> = entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, ["R", "W", "B"]);
        assert_eq!(entries[0].modifiers, vec![90.0]);
        assert_eq!(entries[1].modifiers, vec![0.0, 1.0, 0.0]);
        assert!(entries[2].modifiers.is_empty());
    }

    #[test]
    fn test_empty_cells_and_segments() {
        assert!(parse_cell("").unwrap().is_empty());
        assert_eq!(parse_cell("W||").unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_modifiers() {
        assert!(matches!(parse_cell("W~1~2~3"), Err(CellParseError::TooManyModifiers(_))));
        assert!(matches!(parse_cell("W~abc"), Err(CellParseError::InvalidNumber(_))));
        assert!(matches!(parse_cell("W~(1_2)"), Err(CellParseError::MalformedVector(_))));
        assert!(matches!(parse_cell("W~1_2_3~4"), Err(CellParseError::MalformedVector(_))));
        assert!(matches!(parse_cell("W5"), Err(CellParseError::UnexpectedText(_))));
    }
}
