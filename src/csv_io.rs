//! External adapter interface: CSV ingestion and emission.

use std::path::Path;

use crate::error::{FasError, FasResult};
use crate::graph::{Arc, Graph, GraphBuilder};
use crate::order::Order;

/// Reads an edge list in `target,source,timestamp,weight` column order
/// (target-first is the documented on-disk convention), skipping the
/// header row. The timestamp column is accepted but ignored — nothing in
/// the elimination algorithm is time-aware. Duplicate (source, target)
/// rows are summed and self-loops dropped by [`GraphBuilder`].
pub fn load_graph<P: AsRef<Path>>(path: P) -> FasResult<Graph> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let mut builder = GraphBuilder::new();
    let mut row_count: u64 = 0;

    for result in reader.records() {
        row_count += 1;
        let record = result?;
        if record.len() != 4 {
            return Err(FasError::MalformedRow(
                row_count,
                format!("expected 4 columns, found {}", record.len()),
            ));
        }
        let target = &record[0];
        let source = &record[1];
        // record[2] is the timestamp column; intentionally unused.
        let weight: f64 = record[3].parse().map_err(|_| {
            FasError::MalformedRow(row_count, format!("non-numeric weight '{}'", &record[3]))
        })?;

        builder.add_arc(source, target, weight)?;
    }

    Ok(builder.build())
}

/// Writes the acyclic output graph (`dag_<postfix>.csv`, header
/// `source,target,trade`, one row per surviving arc with its *original*
/// pre-normalization weight) and the partial order (`partial_<postfix>.csv`,
/// header `node`, one row per vertex in final order) under `dir`, named
/// from a CLI-supplied postfix rather than hardcoded filenames.
pub fn write_outputs(
    graph: &Graph,
    order: &Order,
    dag_arcs: &[Arc],
    dir: &Path,
    postfix: &str,
) -> FasResult<(std::path::PathBuf, std::path::PathBuf)> {
    let dag_path = dir.join(format!("dag_{postfix}.csv"));
    let partial_path = dir.join(format!("partial_{postfix}.csv"));

    let mut dag_writer = csv::WriterBuilder::new().from_path(&dag_path)?;
    dag_writer.write_record(["source", "target", "trade"])?;
    for arc in dag_arcs {
        dag_writer.write_record([graph.key(arc.tail), graph.key(arc.head), &arc.weight.to_string()])?;
    }
    dag_writer.flush()?;

    let mut partial_writer = csv::WriterBuilder::new().from_path(&partial_path)?;
    partial_writer.write_record(["node"])?;
    for &v in order.sequence() {
        partial_writer.write_record([graph.key(v)])?;
    }
    partial_writer.flush()?;

    Ok((dag_path, partial_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eliminate::eliminate;
    use crate::violators::extract_violators;
    use std::io::Write;

    #[test]
    fn loads_target_source_timestamp_weight_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target,source,timestamp,weight").unwrap();
        writeln!(file, "B,A,2020-01-01,1.5").unwrap();
        let graph = load_graph(file.path()).unwrap();
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.arc_count(), 1);
        let a_idx = (0..graph.vertex_count()).find(|&v| graph.key(v) == "A").unwrap();
        assert_eq!(graph.out_degree(a_idx), 1);
    }

    #[test]
    fn rejects_non_numeric_weight() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target,source,timestamp,weight").unwrap();
        writeln!(file, "B,A,2020-01-01,notanumber").unwrap();
        assert!(load_graph(file.path()).is_err());
    }

    #[test]
    fn round_trips_through_emission() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "target,source,timestamp,weight").unwrap();
        writeln!(file, "B,A,t,1.0").unwrap();
        writeln!(file, "C,B,t,1.0").unwrap();
        let mut graph = load_graph(file.path()).unwrap();

        let result = eliminate(&mut graph, false).unwrap();
        let order = Order::assemble(result.s_left, result.s_right, graph.vertex_count());
        let report = extract_violators(&graph, &order).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let (dag_path, partial_path) =
            write_outputs(&graph, &order, &report.dag_arcs, dir.path(), "test").unwrap();
        let dag_contents = std::fs::read_to_string(&dag_path).unwrap();
        let partial_contents = std::fs::read_to_string(&partial_path).unwrap();

        assert!(dag_contents.starts_with("source,target,trade\n"));
        assert!(partial_contents.starts_with("node\n"));
        assert_eq!(partial_contents.lines().count(), 1 + graph.vertex_count());
    }
}
