//! TSPLIB instance loading.
//!
//! Supports coordinate instances (`EUC_2D`, `CEIL_2D`, `GEO`, `ATT`) and
//! explicit ones (`FULL_MATRIX`, `UPPER_ROW`, `LOWER_DIAG_ROW`). Whatever the
//! source, the diagonal is set to `+inf` and the result goes through
//! [`DistanceMatrix::new`], so asymmetric or zero-length instances are
//! refused here rather than inside the colony.

use crate::error::{AcoError, AcoResult};
use crate::matrix::DistanceMatrix;
use std::fs;

#[derive(Debug, Clone, Copy)]
struct Node {
    x: f64,
    y: f64,
}

fn euc_2d(a: Node, b: Node) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    ((dx * dx + dy * dy).sqrt() + 0.5).floor()
}

fn ceil_2d(a: Node, b: Node) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt().ceil()
}

// TSPLIB truncates PI for GEO; published optima depend on it.
#[allow(clippy::approx_constant)]
const PI: f64 = 3.141592;

// GEO coordinates are DDD.MM (degrees, minutes).
fn geo_radians(value: f64) -> f64 {
    let degrees = value.trunc();
    let minutes = value - degrees;
    PI * (degrees + 5.0 * minutes / 3.0) / 180.0
}

fn geo(a: Node, b: Node) -> f64 {
    const RRR: f64 = 6378.388;
    let (lat1, lon1) = (geo_radians(a.x), geo_radians(a.y));
    let (lat2, lon2) = (geo_radians(b.x), geo_radians(b.y));
    let q1 = (lon1 - lon2).cos();
    let q2 = (lat1 - lat2).cos();
    let q3 = (lat1 + lat2).cos();
    (RRR * (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).acos() + 1.0).floor()
}

fn att(a: Node, b: Node) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let rij = ((dx * dx + dy * dy) / 10.0).sqrt();
    let tij = rij.round();
    if tij < rij { tij + 1.0 } else { tij }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeWeightType {
    Euc2D,
    Ceil2D,
    Geo,
    Att,
    Explicit(EdgeWeightFormat),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeWeightFormat {
    FullMatrix,
    UpperRow,
    LowerDiagRow,
}

#[derive(Debug, Clone)]
pub struct TspInstance {
    pub name: String,
    pub comment: String,
    pub edge_weight_type: EdgeWeightType,
    pub distances: DistanceMatrix,
}

#[derive(PartialEq)]
enum Section {
    Header,
    NodeCoords,
    EdgeWeights,
}

pub fn parse_tsp_file(file_path: &str) -> AcoResult<TspInstance> {
    let text = fs::read_to_string(file_path)?;
    parse_tsplib(&text)
}

pub fn parse_tsplib(text: &str) -> AcoResult<TspInstance> {
    let mut name = String::new();
    let mut comment = String::new();
    let mut dimension = 0;
    let mut weight_type = String::new();
    let mut weight_format: Option<String> = None;
    let mut nodes: Vec<Node> = Vec::new();
    let mut weights: Vec<f64> = Vec::new();
    let mut section = Section::Header;
    let mut last_line = 0;

    for (idx, raw) in text.lines().enumerate() {
        let line_num = idx + 1;
        last_line = line_num;
        let line = raw.trim();

        if line == "EOF" {
            break;
        }
        if line.is_empty() {
            continue;
        }
        match line {
            "NODE_COORD_SECTION" => {
                section = Section::NodeCoords;
                continue;
            }
            "EDGE_WEIGHT_SECTION" => {
                section = Section::EdgeWeights;
                continue;
            }
            "DISPLAY_DATA_SECTION" | "TOUR_SECTION" => {
                if section == Section::NodeCoords && nodes.len() != dimension {
                    return Err(AcoError::parse(
                        line_num,
                        format!(
                            "Section '{}' started after {} of {} node coordinates",
                            line,
                            nodes.len(),
                            dimension
                        ),
                    ));
                }
                section = Section::Header;
                continue;
            }
            _ => {}
        }

        match section {
            Section::Header => {
                let Some((key, value)) = line.split_once(':') else {
                    continue;
                };
                let value = value.trim();
                match key.trim() {
                    "NAME" => name = value.to_string(),
                    "COMMENT" => {
                        if !comment.is_empty() {
                            comment.push_str("; ");
                        }
                        comment.push_str(value);
                    }
                    "DIMENSION" => {
                        dimension = value.parse().map_err(|e| {
                            AcoError::parse(line_num, format!("Invalid dimension: {}", e))
                        })?
                    }
                    "EDGE_WEIGHT_TYPE" => weight_type = value.to_uppercase(),
                    "EDGE_WEIGHT_FORMAT" => weight_format = Some(value.to_uppercase()),
                    _ => {}
                }
            }
            Section::NodeCoords => {
                if nodes.len() == dimension {
                    return Err(AcoError::parse(
                        line_num,
                        format!("Unexpected data after {} node coordinates", dimension),
                    ));
                }
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() < 3 {
                    return Err(AcoError::parse(
                        line_num,
                        format!("Malformed node coord line (expected id x y): {}", line),
                    ));
                }
                let coord = |s: &str| {
                    s.parse::<f64>().map_err(|e| {
                        AcoError::parse(line_num, format!("Invalid coordinate '{}': {}", s, e))
                    })
                };
                nodes.push(Node {
                    x: coord(parts[1])?,
                    y: coord(parts[2])?,
                });
            }
            Section::EdgeWeights => {
                for token in line.split_whitespace() {
                    weights.push(token.parse().map_err(|e| {
                        AcoError::parse(
                            line_num,
                            format!("Invalid edge weight '{}': {}", token, e),
                        )
                    })?);
                }
            }
        }
    }

    if dimension == 0 {
        return Err(AcoError::parse(last_line, "DIMENSION not found or is zero"));
    }

    let edge_weight_type = match weight_type.as_str() {
        "EUC_2D" => EdgeWeightType::Euc2D,
        "CEIL_2D" => EdgeWeightType::Ceil2D,
        "GEO" => EdgeWeightType::Geo,
        "ATT" => EdgeWeightType::Att,
        "EXPLICIT" => match weight_format.as_deref() {
            Some("FULL_MATRIX") => EdgeWeightType::Explicit(EdgeWeightFormat::FullMatrix),
            Some("UPPER_ROW") => EdgeWeightType::Explicit(EdgeWeightFormat::UpperRow),
            Some("LOWER_DIAG_ROW") => EdgeWeightType::Explicit(EdgeWeightFormat::LowerDiagRow),
            Some(other) => {
                return Err(AcoError::parse(
                    last_line,
                    format!("Unsupported EDGE_WEIGHT_FORMAT: {}", other),
                ));
            }
            None => {
                return Err(AcoError::parse(
                    last_line,
                    "EDGE_WEIGHT_FORMAT missing for EXPLICIT type",
                ));
            }
        },
        other => {
            return Err(AcoError::parse(
                last_line,
                format!("Unknown edge weight type: {}", other),
            ));
        }
    };

    // Counts are checked against what was actually read before anything is
    // sized from DIMENSION.
    match edge_weight_type {
        EdgeWeightType::Explicit(format) => {
            let expected = match format {
                EdgeWeightFormat::FullMatrix => dimension.checked_mul(dimension),
                EdgeWeightFormat::UpperRow => dimension
                    .checked_mul(dimension - 1)
                    .map(|cells| cells / 2),
                EdgeWeightFormat::LowerDiagRow => dimension
                    .checked_add(1)
                    .and_then(|d| d.checked_mul(dimension))
                    .map(|cells| cells / 2),
            };
            let Some(expected) = expected else {
                return Err(AcoError::parse(
                    last_line,
                    format!("DIMENSION {} is too large", dimension),
                ));
            };
            if weights.len() != expected {
                return Err(AcoError::parse(
                    last_line,
                    format!(
                        "{:?}: expected {} weights, got {}",
                        format,
                        expected,
                        weights.len()
                    ),
                ));
            }
        }
        _ => {
            if nodes.len() != dimension {
                return Err(AcoError::parse(
                    last_line,
                    format!(
                        "DIMENSION ({}) vs node coordinates found ({})",
                        dimension,
                        nodes.len()
                    ),
                ));
            }
        }
    }

    let mut rows = vec![vec![0.0; dimension]; dimension];

    match edge_weight_type {
        EdgeWeightType::Explicit(format) => {
            let mut values = weights.into_iter();
            for i in 0..dimension {
                let columns = match format {
                    EdgeWeightFormat::FullMatrix => 0..dimension,
                    EdgeWeightFormat::UpperRow => (i + 1)..dimension,
                    EdgeWeightFormat::LowerDiagRow => 0..(i + 1),
                };
                for j in columns {
                    let value = values.next().unwrap_or_default();
                    rows[i][j] = value;
                    if format != EdgeWeightFormat::FullMatrix {
                        rows[j][i] = value;
                    }
                }
            }
        }
        coordinate_type => {
            let metric: fn(Node, Node) -> f64 = match coordinate_type {
                EdgeWeightType::Euc2D => euc_2d,
                EdgeWeightType::Ceil2D => ceil_2d,
                EdgeWeightType::Geo => geo,
                _ => att,
            };
            for i in 0..dimension {
                for j in 0..dimension {
                    if i != j {
                        rows[i][j] = metric(nodes[i], nodes[j]);
                    }
                }
            }
        }
    }

    for (i, row) in rows.iter_mut().enumerate() {
        row[i] = f64::INFINITY;
    }

    Ok(TspInstance {
        name,
        comment,
        edge_weight_type,
        distances: DistanceMatrix::new(rows)?,
    })
}
