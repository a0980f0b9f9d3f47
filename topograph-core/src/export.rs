//! CSV encodings of the current graph.
//!
//! Both encodings list nodes in storage order. The adjacency list keeps each
//! node's neighbours in edge-insertion order; the adjacency matrix marks a
//! pair with `1` when at least one edge joins it and is symmetric by
//! construction. Encodings are produced line by line through [`CsvLines`],
//! so writers never hold more than one matrix row at a time.

use std::{fmt, fmt::Write as _, io, str::FromStr};

use tracing::instrument;

use crate::store::GraphStore;

/// Prefix that turns a CSV body into a downloadable `data:` URI.
pub const CSV_DATA_URI_PREFIX: &str = "data:text/csv;charset=utf-8,";

const ADJACENCY_LIST_HEADER: &str = "Node,Connected Nodes";

/// Renders `Node,Connected Nodes` followed by one `id,n1;n2;...` line per
/// node.
///
/// # Examples
/// ```
/// use topograph_core::{GraphStore, Position, adjacency_list_csv};
///
/// let mut store = GraphStore::new();
/// let a = store.add_node(Position::default()).id();
/// let b = store.add_node(Position::default()).id();
/// let c = store.add_node(Position::default()).id();
/// store.add_edge(a, c)?;
/// store.add_edge(b, a)?;
/// assert_eq!(
///     adjacency_list_csv(&store),
///     "Node,Connected Nodes\n1,3;2\n2,1\n3,1\n",
/// );
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
#[instrument(name = "core.export_list", skip(store), fields(nodes = store.node_count()))]
#[must_use]
pub fn adjacency_list_csv(store: &GraphStore) -> String {
    ExportFormat::AdjacencyList.lines(store).collect()
}

/// Renders a header of node ids (`,id1,id2,...`) followed by one
/// `id,0,1,...` row per node.
///
/// # Examples
/// ```
/// use topograph_core::{GraphStore, Position, adjacency_matrix_csv};
///
/// let mut store = GraphStore::new();
/// assert_eq!(adjacency_matrix_csv(&store), ",\n");
///
/// let a = store.add_node(Position::default()).id();
/// let b = store.add_node(Position::default()).id();
/// store.add_edge(b, a)?;
/// assert_eq!(adjacency_matrix_csv(&store), ",1,2\n1,0,1\n2,1,0\n");
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
#[instrument(name = "core.export_matrix", skip(store), fields(nodes = store.node_count()))]
#[must_use]
pub fn adjacency_matrix_csv(store: &GraphStore) -> String {
    ExportFormat::AdjacencyMatrix.lines(store).collect()
}

/// Wraps a CSV body in a `data:text/csv` URI, percent-encoding it the way a
/// browser's `encodeURI` does: URI-reserved and unreserved characters pass
/// through, everything else is emitted as UTF-8 `%XX` escapes.
///
/// # Examples
/// ```
/// use topograph_core::csv_data_uri;
///
/// assert_eq!(
///     csv_data_uri("Node,Connected Nodes\n1,2;3\n"),
///     "data:text/csv;charset=utf-8,Node,Connected%20Nodes%0A1,2;3%0A",
/// );
/// ```
#[must_use]
pub fn csv_data_uri(body: &str) -> String {
    let mut out = String::with_capacity(CSV_DATA_URI_PREFIX.len() + body.len() * 2);
    out.push_str(CSV_DATA_URI_PREFIX);
    percent_encode_into(&mut out, body);
    out
}

fn percent_encode_into(out: &mut String, body: &str) {
    for byte in body.bytes() {
        if passes_unescaped(byte) {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
}

fn passes_unescaped(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || b"-_.!~*'();/?:@&=+$,#".contains(&byte)
}

/// Neighbour storage slots per node, in edge-insertion order. A self-loop
/// contributes its node once.
fn neighbour_slots(store: &GraphStore) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); store.node_count()];
    for edge in store.edges() {
        let (Some(source), Some(target)) =
            (store.slot_of(edge.source()), store.slot_of(edge.target()))
        else {
            continue;
        };
        adjacency[source].push(target);
        if source != target {
            adjacency[target].push(source);
        }
    }
    adjacency
}

/// CSV lines of one export, produced one at a time. Every line ends in
/// `\n`; the header comes first.
///
/// Only the adjacency lists and a single row are held in memory, so the
/// quadratic matrix body never has to exist as a whole unless collected.
///
/// # Examples
/// ```
/// use topograph_core::{ExportFormat, GraphStore, Position};
///
/// let mut store = GraphStore::new();
/// let a = store.add_node(Position::default()).id();
/// let b = store.add_node(Position::default()).id();
/// store.add_edge(a, b)?;
///
/// let mut lines = ExportFormat::AdjacencyMatrix.lines(&store);
/// assert_eq!(lines.next().as_deref(), Some(",1,2\n"));
/// assert_eq!(lines.next().as_deref(), Some("1,0,1\n"));
/// # Ok::<(), topograph_core::GraphError>(())
/// ```
#[derive(Debug)]
pub struct CsvLines<'a> {
    store: &'a GraphStore,
    format: ExportFormat,
    adjacency: Vec<Vec<usize>>,
    cells: Vec<bool>,
    next: usize,
}

impl CsvLines<'_> {
    fn header(&self) -> String {
        match self.format {
            ExportFormat::AdjacencyList => format!("{ADJACENCY_LIST_HEADER}\n"),
            ExportFormat::AdjacencyMatrix => {
                let mut line = String::with_capacity(self.store.node_count() * 6 + 2);
                for node in self.store.nodes() {
                    let _ = write!(line, ",{}", node.id());
                }
                if line.is_empty() {
                    line.push(',');
                }
                line.push('\n');
                line
            }
        }
    }

    fn row(&mut self, slot: usize) -> Option<String> {
        let node = self.store.nodes().get(slot)?;
        let neighbours = self.adjacency.get(slot)?;
        let mut line = node.id().to_string();
        match self.format {
            ExportFormat::AdjacencyList => {
                line.push(',');
                for (index, &neighbour) in neighbours.iter().enumerate() {
                    if index > 0 {
                        line.push(';');
                    }
                    if let Some(other) = self.store.nodes().get(neighbour) {
                        let _ = write!(line, "{}", other.id());
                    }
                }
            }
            ExportFormat::AdjacencyMatrix => {
                for &neighbour in neighbours {
                    self.cells[neighbour] = true;
                }
                line.reserve(self.cells.len() * 2 + 1);
                for cell in &self.cells {
                    line.push(',');
                    line.push(if *cell { '1' } else { '0' });
                }
                for &neighbour in neighbours {
                    self.cells[neighbour] = false;
                }
            }
        }
        line.push('\n');
        Some(line)
    }
}

impl Iterator for CsvLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let line = match self.next {
            0 => Some(self.header()),
            index => self.row(index - 1),
        };
        if line.is_some() {
            self.next += 1;
        }
        line
    }
}

/// Downloadable export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// [`adjacency_list_csv`].
    AdjacencyList,
    /// [`adjacency_matrix_csv`].
    AdjacencyMatrix,
}

impl ExportFormat {
    /// Every export format.
    pub const ALL: &'static [Self] = &[Self::AdjacencyList, Self::AdjacencyMatrix];

    /// Stable kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdjacencyList => "adjacency-list",
            Self::AdjacencyMatrix => "adjacency-matrix",
        }
    }

    /// File name offered when the export is downloaded.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::AdjacencyList => "graph_adjacency_list.csv",
            Self::AdjacencyMatrix => "graph_adjacency_matrix.csv",
        }
    }

    /// Encodes the current contents of `store`.
    #[must_use]
    pub fn render(self, store: &GraphStore) -> String {
        match self {
            Self::AdjacencyList => adjacency_list_csv(store),
            Self::AdjacencyMatrix => adjacency_matrix_csv(store),
        }
    }

    /// Lazily encodes `store` one CSV line at a time.
    #[must_use]
    pub fn lines(self, store: &GraphStore) -> CsvLines<'_> {
        let adjacency = neighbour_slots(store);
        let cells = match self {
            Self::AdjacencyList => Vec::new(),
            Self::AdjacencyMatrix => vec![false; store.node_count()],
        };
        CsvLines {
            store,
            format: self,
            adjacency,
            cells,
            next: 0,
        }
    }

    /// Streams the encoding of `store` into `writer` line by line.
    ///
    /// # Errors
    /// Returns any error raised by `writer`.
    #[instrument(
        name = "core.export_write",
        err,
        skip(store, writer),
        fields(format = %self, nodes = store.node_count()),
    )]
    pub fn write_to(self, store: &GraphStore, mut writer: impl io::Write) -> io::Result<()> {
        for line in self.lines(store) {
            writer.write_all(line.as_bytes())?;
        }
        Ok(())
    }

    /// Streams the encoding of `store` into `writer` as a `data:` URI,
    /// byte-for-byte equal to [`csv_data_uri`] of [`ExportFormat::render`].
    ///
    /// # Errors
    /// Returns any error raised by `writer`.
    #[instrument(
        name = "core.export_write_uri",
        err,
        skip(store, writer),
        fields(format = %self, nodes = store.node_count()),
    )]
    pub fn write_data_uri_to(
        self,
        store: &GraphStore,
        mut writer: impl io::Write,
    ) -> io::Result<()> {
        writer.write_all(CSV_DATA_URI_PREFIX.as_bytes())?;
        let mut encoded = String::new();
        for line in self.lines(store) {
            encoded.clear();
            percent_encode_into(&mut encoded, &line);
            writer.write_all(encoded.as_bytes())?;
        }
        Ok(())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown export format name.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown export format `{0}`")]
pub struct UnknownExportFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownExportFormat;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|format| format.as_str() == raw.trim())
            .ok_or_else(|| UnknownExportFormat(raw.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NodeId, Position};
    use rstest::{fixture, rstest};

    #[fixture]
    fn store_with_gap() -> GraphStore {
        // Nodes 1..=4 with node 2 removed: ids are no longer contiguous.
        let mut store = GraphStore::new();
        let ids: Vec<NodeId> = (0..4)
            .map(|_| store.add_node(Position::default()).id())
            .collect();
        store.add_edge(ids[3], ids[0]).expect("endpoints exist");
        store.add_edge(ids[1], ids[2]).expect("endpoints exist");
        store.add_edge(ids[0], ids[2]).expect("endpoints exist");
        assert!(store.remove_node(ids[1]));
        store
    }

    #[rstest]
    fn empty_graph_exports_headers_only() {
        let store = GraphStore::new();
        assert_eq!(adjacency_list_csv(&store), "Node,Connected Nodes\n");
        assert_eq!(adjacency_matrix_csv(&store), ",\n");
    }

    #[rstest]
    fn list_uses_storage_and_insertion_order(store_with_gap: GraphStore) {
        assert_eq!(
            adjacency_list_csv(&store_with_gap),
            "Node,Connected Nodes\n1,4;3\n3,1\n4,1\n"
        );
    }

    #[rstest]
    fn matrix_is_symmetric_with_storage_order(store_with_gap: GraphStore) {
        assert_eq!(
            adjacency_matrix_csv(&store_with_gap),
            ",1,3,4\n1,0,1,1\n3,1,0,0\n4,1,0,0\n"
        );
    }

    #[rstest]
    fn isolated_node_has_empty_neighbour_list() {
        let mut store = GraphStore::new();
        store.add_node(Position::default());
        assert_eq!(adjacency_list_csv(&store), "Node,Connected Nodes\n1,\n");
        assert_eq!(adjacency_matrix_csv(&store), ",1\n1,0\n");
    }

    #[rstest]
    fn self_loop_marks_diagonal_and_lists_once() {
        let mut store = GraphStore::new();
        let a = store.add_node(Position::default()).id();
        store.add_edge(a, a).expect("endpoint exists");
        assert_eq!(adjacency_list_csv(&store), "Node,Connected Nodes\n1,1\n");
        assert_eq!(adjacency_matrix_csv(&store), ",1\n1,1\n");
    }

    #[rstest]
    #[case("a b", "a%20b")]
    #[case("x\"y", "x%22y")]
    #[case("100%", "100%25")]
    #[case("é", "%C3%A9")]
    #[case("a,b;c/d?e#f", "a,b;c/d?e#f")]
    fn data_uri_escapes_like_encode_uri(#[case] body: &str, #[case] escaped: &str) {
        assert_eq!(csv_data_uri(body), format!("{CSV_DATA_URI_PREFIX}{escaped}"));
    }

    #[rstest]
    #[case(ExportFormat::AdjacencyList, "adjacency-list", "graph_adjacency_list.csv")]
    #[case(
        ExportFormat::AdjacencyMatrix,
        "adjacency-matrix",
        "graph_adjacency_matrix.csv"
    )]
    fn formats_have_stable_names(
        #[case] format: ExportFormat,
        #[case] name: &str,
        #[case] file: &str,
    ) {
        assert_eq!(format.to_string(), name);
        assert_eq!(name.parse::<ExportFormat>(), Ok(format));
        assert_eq!(format.file_name(), file);
    }

    #[rstest]
    #[case(ExportFormat::AdjacencyList)]
    #[case(ExportFormat::AdjacencyMatrix)]
    fn streamed_output_matches_rendered_output(
        store_with_gap: GraphStore,
        #[case] format: ExportFormat,
    ) {
        let body = format.render(&store_with_gap);

        let mut streamed = Vec::new();
        format
            .write_to(&store_with_gap, &mut streamed)
            .expect("writing to memory succeeds");
        assert_eq!(String::from_utf8(streamed).expect("CSV is UTF-8"), body);

        let mut uri = Vec::new();
        format
            .write_data_uri_to(&store_with_gap, &mut uri)
            .expect("writing to memory succeeds");
        assert_eq!(String::from_utf8(uri).expect("URI is ASCII"), csv_data_uri(&body));
    }

    #[rstest]
    fn matrix_rows_are_produced_one_at_a_time() {
        // The full body would hold 40 000 x 40 000 cells; only two rows are
        // ever built here.
        let mut store = GraphStore::new();
        let ids: Vec<NodeId> = (0..40_000)
            .map(|_| store.add_node(Position::default()).id())
            .collect();
        for pair in ids.windows(2) {
            store.add_edge(pair[0], pair[1]).expect("endpoints exist");
        }

        let mut lines = ExportFormat::AdjacencyMatrix.lines(&store).skip(1);
        let first = lines.next().expect("first row exists");
        assert!(first.starts_with("1,0,1,0,"));
        assert_eq!(first.len(), "1".len() + 2 * 40_000 + 1);
        let second = lines.next().expect("second row exists");
        assert!(second.starts_with("2,1,0,1,0,"));
    }

    #[rstest]
    fn unknown_format_is_rejected() {
        assert_eq!(
            "edge-list".parse::<ExportFormat>(),
            Err(UnknownExportFormat("edge-list".to_owned()))
        );
    }
}
