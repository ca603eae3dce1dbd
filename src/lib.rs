pub mod bucket;
pub mod bucket_array;
pub mod csv_io;
pub mod eliminate;
pub mod error;
pub mod graph;
pub mod order;
pub mod score;
pub mod violators;

// Re-exports for convenience
pub use csv_io::{load_graph, write_outputs};
pub use eliminate::{eliminate, EliminationResult};
pub use error::{FasError, FasResult};
pub use graph::{Arc, Graph, GraphBuilder, VertexKey};
pub use order::Order;
pub use score::{init_scores, ScoreTable, VertexScore};
pub use violators::{extract_violators, ViolatorReport};
