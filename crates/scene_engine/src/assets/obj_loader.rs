//! OBJ file loader for 3D models

use std::io::BufRead;

use crate::foundation::math::{Vec2, Vec3};
use crate::render::{Mesh, Vertex};
use thiserror::Error;

/// OBJ parsing errors
#[derive(Error, Debug)]
pub enum ObjError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed number or index
    #[error("Parse error on line {line}: {message}")]
    ParseError {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },
    /// Structurally invalid file
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Wavefront OBJ reader
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file from disk
    pub fn load_obj<P: AsRef<std::path::Path>>(path: P) -> Result<Mesh, ObjError> {
        let file = std::fs::File::open(path)?;
        Self::parse(std::io::BufReader::new(file))
    }

    /// Parse OBJ text from any buffered reader
    ///
    /// Polygons are fan-triangulated. Missing UVs default to `(0, 0)` and
    /// missing normals to `+Z`.
    pub fn parse<R: BufRead>(reader: R) -> Result<Mesh, ObjError> {
        let mut positions: Vec<Vec3> = Vec::new();
        let mut normals: Vec<Vec3> = Vec::new();
        let mut tex_coords: Vec<Vec2> = Vec::new();
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = number + 1;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" if parts.len() >= 4 => positions.push(parse_vec3(&parts[1..4], line_no)?),
                "vn" if parts.len() >= 4 => normals.push(parse_vec3(&parts[1..4], line_no)?),
                "vt" if parts.len() >= 3 => {
                    let u = parse_float(parts[1], line_no)?;
                    let v = parse_float(parts[2], line_no)?;
                    tex_coords.push(Vec2::new(u, v));
                }
                "f" if parts.len() >= 4 => {
                    let mut face_indices = Vec::with_capacity(parts.len() - 1);

                    for vertex_data in &parts[1..] {
                        let mut fields = vertex_data.split('/');
                        let pos_idx = parse_index(fields.next(), line_no)?
                            .ok_or_else(|| ObjError::ParseError {
                                line: line_no,
                                message: "Face vertex without position".to_string(),
                            })?;
                        let tex_idx = parse_index(fields.next(), line_no)?;
                        let normal_idx = parse_index(fields.next(), line_no)?;

                        let position = *positions.get(pos_idx).ok_or_else(|| {
                            ObjError::InvalidFormat(format!("Position index out of bounds on line {line_no}"))
                        })?;
                        let uv = tex_idx
                            .and_then(|idx| tex_coords.get(idx))
                            .copied()
                            .unwrap_or_else(Vec2::zeros);
                        let normal = normal_idx
                            .and_then(|idx| normals.get(idx))
                            .copied()
                            .unwrap_or_else(Vec3::z);

                        vertices.push(Vertex::new(position, normal, uv));
                        face_indices.push(u32::try_from(vertices.len() - 1).map_err(|_| {
                            ObjError::InvalidFormat("Too many vertices".to_string())
                        })?);
                    }

                    // Fan triangulation
                    for i in 1..(face_indices.len() - 1) {
                        indices.extend_from_slice(&[face_indices[0], face_indices[i], face_indices[i + 1]]);
                    }
                }
                _ => {
                    // Ignore groups, materials, smoothing and short records
                }
            }
        }

        if vertices.is_empty() {
            return Err(ObjError::InvalidFormat("No vertices found in OBJ file".to_string()));
        }

        Ok(Mesh::new(vertices, indices))
    }
}

fn parse_float(text: &str, line: usize) -> Result<f32, ObjError> {
    text.parse().map_err(|_| ObjError::ParseError {
        line,
        message: format!("Invalid number '{text}'"),
    })
}

fn parse_vec3(parts: &[&str], line: usize) -> Result<Vec3, ObjError> {
    Ok(Vec3::new(
        parse_float(parts[0], line)?,
        parse_float(parts[1], line)?,
        parse_float(parts[2], line)?,
    ))
}

/// 1-based OBJ index to 0-based; empty fields are `None`
fn parse_index(field: Option<&str>, line: usize) -> Result<Option<usize>, ObjError> {
    match field {
        None | Some("") => Ok(None),
        Some(text) => {
            let index: usize = text.parse().map_err(|_| ObjError::ParseError {
                line,
                message: format!("Invalid index '{text}'"),
            })?;
            index.checked_sub(1).map(Some).ok_or_else(|| ObjError::ParseError {
                line,
                message: "Index 0 is not valid in OBJ".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const QUAD: &str = "\
# unit quad
v 0 0 0
v 2 0 0
v 2 1 0
v 0 1 3
vt 0 0
vn 0 0 1
f 1/1/1 2/1/1 3/1/1 4//1
";

    #[test]
    fn test_parse_quad() {
        let mesh = ObjLoader::parse(QUAD.as_bytes()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.indices(), &[0, 1, 2, 0, 2, 3]);
        assert_relative_eq!(mesh.extents(), Vec3::new(2.0, 1.0, 3.0));
    }

    #[test]
    fn test_bad_number_reports_line() {
        let err = ObjLoader::parse("v 0 0 0\nv 1 x 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ObjError::ParseError { line: 2, .. }));
    }

    #[test]
    fn test_out_of_range_face() {
        let err = ObjLoader::parse("v 0 0 0\nf 1 2 3\n".as_bytes()).unwrap_err();
        assert!(matches!(err, ObjError::InvalidFormat(_)));
    }

    #[test]
    fn test_empty_file() {
        assert!(ObjLoader::parse("# nothing\n".as_bytes()).is_err());
    }
}
