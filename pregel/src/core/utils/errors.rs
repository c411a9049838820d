use pregel_api::core::entities::VertexId;
use std::{io, path::PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum GraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to open {path:?}: {source}")]
    FileOpen { path: PathBuf, source: io::Error },
    #[error("Failed to create {path:?}: {source}")]
    FileCreate { path: PathBuf, source: io::Error },
    #[error("Unexpected end of input while reading {what}")]
    ShortRead { what: &'static str },
    #[error("Malformed input at line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
    #[error("Vertex id {id} is outside the loaded graph (offset {offset}, {count} vertices)")]
    VertexOutOfRange {
        id: VertexId,
        offset: VertexId,
        count: usize,
    },
    #[error("{count} vertices starting at id {offset} do not fit in 32-bit ids")]
    IdRangeOverflow { offset: VertexId, count: usize },
    #[error("Vertex {id} appears more than once in the input")]
    DuplicateVertex { id: VertexId },
    #[error("Vertex {id} is missing from the input")]
    MissingVertex { id: VertexId },
    #[error("Failed to allocate room for {requested} elements")]
    Allocation { requested: usize },
    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("Meta-superstep {meta} does not exist, the run has {count}")]
    MetaSuperstepOutOfRange { meta: usize, count: usize },
}

impl GraphError {
    /// Maps a failed `read_exact` to [`GraphError::ShortRead`] when the input ran out.
    pub fn from_read(what: &'static str) -> impl FnOnce(io::Error) -> GraphError {
        move |err| match err.kind() {
            io::ErrorKind::UnexpectedEof => GraphError::ShortRead { what },
            _ => GraphError::Io(err),
        }
    }

    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        GraphError::MalformedInput {
            line,
            reason: reason.into(),
        }
    }
}

/// Allocates a vector of `len` default values, reporting exhaustion instead of aborting.
pub(crate) fn try_alloc<T: Clone + Default>(len: usize) -> Result<Vec<T>, GraphError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| GraphError::Allocation { requested: len })?;
    v.resize(len, T::default());
    Ok(v)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn eof_becomes_short_read() {
        let err = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(
            GraphError::from_read("vertex id")(err),
            GraphError::ShortRead { what: "vertex id" }
        ));

        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            GraphError::from_read("vertex id")(err),
            GraphError::Io(_)
        ));
    }

    #[test]
    fn impossible_allocation_is_reported() {
        let res = try_alloc::<u64>(usize::MAX / 2);
        assert!(matches!(res, Err(GraphError::Allocation { .. })));
    }

    #[test]
    fn id_range_overflow_message() {
        let err = GraphError::IdRangeOverflow {
            offset: u32::MAX,
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "2 vertices starting at id 4294967295 do not fit in 32-bit ids"
        );
    }

    #[test]
    fn out_of_range_message_names_the_id() {
        let err = GraphError::VertexOutOfRange {
            id: 12,
            offset: 1,
            count: 4,
        };
        assert_eq!(
            err.to_string(),
            "Vertex id 12 is outside the loaded graph (offset 1, 4 vertices)"
        );
    }
}
