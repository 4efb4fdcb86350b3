use crate::error::{Error, Result};
use crate::network::{Network, MAX_NODES};
use std::io::BufRead;
use std::str::FromStr;

/// Column layout of an edge list
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputFormat {
    /// `source target`, every edge weighs 1
    #[default]
    TwoColumn,
    /// `source target weight`
    ThreeColumn,
}

impl InputFormat {
    fn columns(self) -> usize {
        match self {
            InputFormat::TwoColumn => 2,
            InputFormat::ThreeColumn => 3,
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "2" | "two" => Ok(InputFormat::TwoColumn),
            "3" | "three" => Ok(InputFormat::ThreeColumn),
            _ => Err(format!("unknown input format '{s}', expected 'two' or 'three'")),
        }
    }
}

/// Read a whitespace separated edge list into a network.
///
/// Blank lines and lines starting with `#` or `%` are skipped. Vertex ids are zero-based and must
/// be `< vcount`; without `vcount` the graph gets `max id + 1` vertices. The first bad record
/// aborts the read. At most `MAX_NODES` vertices are supported.
pub fn read_edge_list(reader: impl BufRead, format: InputFormat, vcount: Option<usize>) -> Result<Network> {
    if let Some(vcount) = vcount {
        if vcount > MAX_NODES {
            return Err(Error::InvalidParameter {
                name: "vcount",
                message: format!("{vcount} vertices exceed the supported maximum of {MAX_NODES}"),
            });
        }
    }
    let limit = vcount.unwrap_or(MAX_NODES);
    let mut edges = Vec::new();
    let mut max_vertex = None;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let record = line.trim();
        if record.is_empty() || record.starts_with('#') || record.starts_with('%') {
            continue;
        }
        let line_no = i + 1;
        let malformed = |reason: String| Error::MalformedRecord {
            line: line_no,
            record: record.to_string(),
            reason,
        };

        let fields: Vec<&str> = record.split_whitespace().collect();
        if fields.len() != format.columns() {
            return Err(malformed(format!(
                "expected {} columns, found {}",
                format.columns(),
                fields.len()
            )));
        }

        let mut vertex = |field: &str| -> Result<usize> {
            let v = field
                .parse::<usize>()
                .map_err(|e| malformed(format!("bad vertex id '{field}': {e}")))?;
            if v >= limit {
                return Err(Error::VertexOutOfRange {
                    line: line_no,
                    vertex: v,
                    vcount: limit,
                });
            }
            max_vertex = max_vertex.max(Some(v));
            Ok(v)
        };
        let source = vertex(fields[0])?;
        let target = vertex(fields[1])?;

        let weight = match format {
            InputFormat::TwoColumn => 1.0,
            InputFormat::ThreeColumn => {
                let w = fields[2]
                    .parse::<f64>()
                    .map_err(|e| malformed(format!("bad weight '{}': {e}", fields[2])))?;
                if !w.is_finite() {
                    return Err(malformed(format!("weight {w} is not finite")));
                }
                w
            }
        };
        edges.push((source, target, weight));
    }

    let nodes = vcount.unwrap_or_else(|| max_vertex.map_or(0, |v| v + 1));
    Ok(Network::from_edges(nodes, edges))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_two_column() {
        let input = "# comment\n0 1\n\n1 2\n  2   0  \n";
        let n = read_edge_list(input.as_bytes(), InputFormat::TwoColumn, Some(4)).unwrap();
        assert_eq!(n.nodes(), 4);
        assert_eq!(n.edges(), 3);
        assert_eq!(n.total_weight(), 3.0);
        assert_eq!(n.degree(3), 0.0);
    }

    #[test]
    fn test_three_column_inferred_size() {
        let input = "0 1 0.5\n% matrix-market style comment\n3 1 2\n0 1 0.25\n";
        let n = read_edge_list(input.as_bytes(), InputFormat::ThreeColumn, None).unwrap();
        assert_eq!(n.nodes(), 4);
        assert_eq!(n.total_weight(), 2.75);
        assert_eq!(n.neighbors(0).collect::<Vec<_>>(), vec![(1, 0.5), (1, 0.25)]);
    }

    #[test]
    fn test_malformed_records() {
        let err = read_edge_list("0 1\n1 x\n".as_bytes(), InputFormat::TwoColumn, None).unwrap_err();
        match err {
            Error::MalformedRecord { line, record, .. } => {
                assert_eq!(line, 2);
                assert_eq!(record, "1 x");
            }
            other => panic!("unexpected {other:?}"),
        }

        let err = read_edge_list("0 1\n".as_bytes(), InputFormat::ThreeColumn, None).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));

        let err = read_edge_list("0 1 1 1\n".as_bytes(), InputFormat::ThreeColumn, None).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));

        let err = read_edge_list("0 1 NaN\n".as_bytes(), InputFormat::ThreeColumn, None).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));

        let err = read_edge_list("-1 1\n".as_bytes(), InputFormat::TwoColumn, None).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 1, .. }));
    }

    #[test]
    fn test_out_of_range() {
        let err = read_edge_list("0 1\n\n1 5\n".as_bytes(), InputFormat::TwoColumn, Some(5)).unwrap_err();
        assert!(matches!(
            err,
            Error::VertexOutOfRange {
                line: 3,
                vertex: 5,
                vcount: 5
            }
        ));
        assert_eq!(err.to_string(), "vertex 5 on line 3 is out of range for 5 vertices");
    }

    #[test]
    fn test_vertex_count_beyond_index_space() {
        let err = read_edge_list("0 1\n".as_bytes(), InputFormat::TwoColumn, Some(MAX_NODES + 1)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "vcount", .. }));

        let input = format!("0 1\n0 {}\n", MAX_NODES);
        let err = read_edge_list(input.as_bytes(), InputFormat::TwoColumn, None).unwrap_err();
        assert!(matches!(err, Error::VertexOutOfRange { line: 2, vcount: MAX_NODES, .. }));
    }

    #[test]
    fn test_errors_are_debuggable() {
        let result = read_edge_list("0\n".as_bytes(), InputFormat::TwoColumn, None);
        assert!(format!("{result:?}").starts_with("Err(MalformedRecord"));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("two".parse::<InputFormat>(), Ok(InputFormat::TwoColumn));
        assert_eq!("3".parse::<InputFormat>(), Ok(InputFormat::ThreeColumn));
        assert!("four".parse::<InputFormat>().is_err());
    }
}
