use thiserror::Error;

/// Errors surfaced by the core engine and its adapters.
///
/// Core error kinds (`DegenerateGraph`, `DuplicateVertexKey`,
/// `NegativeWeight`, `InternalInconsistency`) correspond 1:1 to the
/// engine's error table; the rest are adapter-level (CSV/IO) failures.
#[derive(Debug, Error)]
pub enum FasError {
    /// `n = 0`, or every vertex is isolated.
    #[error("degenerate graph: no vertices with incident arcs")]
    DegenerateGraph,

    /// Ingestion-supplied vertex keys collided ambiguously.
    #[error("duplicate vertex key: {0}")]
    DuplicateVertexKey(String),

    /// A weighted arc carried a negative weight.
    #[error("negative weight on arc {0} -> {1}: {2}")]
    NegativeWeight(String, String, f64),

    /// A post-run assertion failed; indicates an implementation bug.
    #[error("internal inconsistency: {0}")]
    InternalInconsistency(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV row {0}: {1}")]
    MalformedRow(u64, String),
}

pub type FasResult<T> = Result<T, FasError>;
