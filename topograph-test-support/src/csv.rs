//! Decoders for the adjacency CSV exports.
//!
//! Tests use these to cross-check the two encodings against each other and
//! against the store they were rendered from.

use std::collections::BTreeSet;

use thiserror::Error;

/// Problems found while decoding an export body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The first line did not match the expected header.
    #[error("unexpected header `{found}`")]
    Header {
        /// Header line found in the body.
        found: String,
    },
    /// A cell could not be parsed as a node id or a matrix entry.
    #[error("line {line}: cannot parse `{cell}`")]
    Cell {
        /// One-based line number.
        line: usize,
        /// Offending cell text.
        cell: String,
    },
    /// A matrix row did not have one entry per node.
    #[error("line {line}: expected {expected} entries, found {found}")]
    RowLength {
        /// One-based line number.
        line: usize,
        /// Number of nodes named by the header.
        expected: usize,
        /// Entries present on the row.
        found: usize,
    },
    /// A matrix row label disagreed with the header order.
    #[error("line {line}: row `{found}` where header expects `{expected}`")]
    RowLabel {
        /// One-based line number.
        line: usize,
        /// Id expected from the header.
        expected: u64,
        /// Id found at the start of the row.
        found: u64,
    },
}

/// Node order and undirected edge set recovered from an export.
///
/// Edges are stored as `(min, max)` pairs so both encodings compare equal
/// when they describe the same graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedGraph {
    /// Node ids in the order they appear.
    pub nodes: Vec<u64>,
    /// Unordered adjacent pairs.
    pub edges: BTreeSet<(u64, u64)>,
}

impl DecodedGraph {
    fn connect(&mut self, a: u64, b: u64) {
        self.edges.insert(if a <= b { (a, b) } else { (b, a) });
    }
}

fn parse_id(line: usize, cell: &str) -> Result<u64, DecodeError> {
    cell.parse().map_err(|_| DecodeError::Cell {
        line,
        cell: cell.to_owned(),
    })
}

/// Decodes a `Node,Connected Nodes` body.
///
/// # Errors
/// Returns a [`DecodeError`] when the header or any id is malformed.
///
/// # Examples
/// ```
/// use topograph_test_support::csv::decode_adjacency_list;
///
/// let graph = decode_adjacency_list("Node,Connected Nodes\n1,2\n2,1\n3,\n")?;
/// assert_eq!(graph.nodes, vec![1, 2, 3]);
/// assert_eq!(graph.edges.into_iter().collect::<Vec<_>>(), vec![(1, 2)]);
/// # Ok::<(), topograph_test_support::csv::DecodeError>(())
/// ```
pub fn decode_adjacency_list(body: &str) -> Result<DecodedGraph, DecodeError> {
    let mut lines = body.lines();
    let header = lines.next().unwrap_or_default();
    if header != "Node,Connected Nodes" {
        return Err(DecodeError::Header {
            found: header.to_owned(),
        });
    }

    let mut graph = DecodedGraph::default();
    for (index, row) in lines.enumerate() {
        let line = index + 2;
        let (node, neighbours) = row.split_once(',').ok_or_else(|| DecodeError::Cell {
            line,
            cell: row.to_owned(),
        })?;
        let node = parse_id(line, node)?;
        graph.nodes.push(node);
        for neighbour in neighbours.split(';').filter(|cell| !cell.is_empty()) {
            graph.connect(node, parse_id(line, neighbour)?);
        }
    }
    Ok(graph)
}

/// Decodes a `,id1,id2,...` adjacency matrix body.
///
/// # Errors
/// Returns a [`DecodeError`] when the header, a row label, a row length or
/// an entry is malformed.
pub fn decode_adjacency_matrix(body: &str) -> Result<DecodedGraph, DecodeError> {
    let mut lines = body.lines();
    let header = lines.next().unwrap_or_default();
    let Some(ids) = header.strip_prefix(',') else {
        return Err(DecodeError::Header {
            found: header.to_owned(),
        });
    };
    let nodes = ids
        .split(',')
        .filter(|cell| !cell.is_empty())
        .map(|cell| parse_id(1, cell))
        .collect::<Result<Vec<_>, _>>()?;

    let mut graph = DecodedGraph {
        nodes: nodes.clone(),
        edges: BTreeSet::new(),
    };
    for (index, row) in lines.enumerate() {
        let line = index + 2;
        let mut cells = row.split(',');
        let label = parse_id(line, cells.next().unwrap_or_default())?;
        let expected = nodes.get(index).copied().unwrap_or_default();
        if label != expected {
            return Err(DecodeError::RowLabel {
                line,
                expected,
                found: label,
            });
        }
        let entries: Vec<&str> = cells.collect();
        if entries.len() != nodes.len() {
            return Err(DecodeError::RowLength {
                line,
                expected: nodes.len(),
                found: entries.len(),
            });
        }
        for (column, entry) in entries.iter().enumerate() {
            match *entry {
                "0" => {}
                "1" => graph.connect(label, nodes[column]),
                other => {
                    return Err(DecodeError::Cell {
                        line,
                        cell: other.to_owned(),
                    });
                }
            }
        }
    }
    Ok(graph)
}

/// Reports whether every `1` in a matrix body has a mirrored `1`.
///
/// Returns `false` for bodies that do not decode.
#[must_use]
pub fn matrix_is_symmetric(body: &str) -> bool {
    let rows: Vec<Vec<&str>> = body
        .lines()
        .skip(1)
        .map(|row| row.split(',').skip(1).collect())
        .collect();
    rows.iter().enumerate().all(|(i, row)| {
        row.len() == rows.len()
            && row
                .iter()
                .enumerate()
                .all(|(j, cell)| rows.get(j).and_then(|other| other.get(i)) == Some(cell))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn both_encodings_agree_on_a_path() {
        let list = decode_adjacency_list("Node,Connected Nodes\n1,2\n2,1;3\n3,2\n")
            .expect("list decodes");
        let matrix = decode_adjacency_matrix(",1,2,3\n1,0,1,0\n2,1,0,1\n3,0,1,0\n")
            .expect("matrix decodes");
        assert_eq!(list, matrix);
    }

    #[rstest]
    fn empty_bodies_decode_to_empty_graphs() {
        assert_eq!(
            decode_adjacency_list("Node,Connected Nodes\n"),
            Ok(DecodedGraph::default())
        );
        assert_eq!(decode_adjacency_matrix(",\n"), Ok(DecodedGraph::default()));
        assert!(matrix_is_symmetric(",\n"));
    }

    #[rstest]
    #[case("Nodes,Neighbours\n", DecodeError::Header { found: "Nodes,Neighbours".to_owned() })]
    #[case(
        "Node,Connected Nodes\nx,1\n",
        DecodeError::Cell { line: 2, cell: "x".to_owned() }
    )]
    fn malformed_lists_are_rejected(#[case] body: &str, #[case] expected: DecodeError) {
        assert_eq!(decode_adjacency_list(body), Err(expected));
    }

    #[rstest]
    fn short_matrix_rows_are_rejected() {
        assert_eq!(
            decode_adjacency_matrix(",1,2\n1,0\n"),
            Err(DecodeError::RowLength {
                line: 2,
                expected: 2,
                found: 1
            })
        );
    }

    #[rstest]
    #[case(",1,2\n1,0,1\n2,1,0\n", true)]
    #[case(",1,2\n1,0,1\n2,0,0\n", false)]
    #[case(",1,2\n1,0,1\n", false)]
    fn symmetry_check(#[case] body: &str, #[case] symmetric: bool) {
        assert_eq!(matrix_is_symmetric(body), symmetric);
    }
}
