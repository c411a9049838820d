//! Binary dump of vertex payloads.
//!
//! A dump is, for every vertex in location order, its id followed by its
//! payload as written by [`VertexCodec::serialise`]. There is no header and no
//! delimiter, the record count is the vertex count of the dumped graph.
//! Integers are native-endian.

use std::{
    fs::File,
    io::{BufWriter, ErrorKind, Read, Write},
    path::Path,
    time::Instant,
};

use bytemuck::Pod;
use kdam::tqdm;
use pregel_api::core::entities::VertexId;
use tracing::info;

use crate::{
    core::utils::errors::GraphError,
    db::{graph::graph::Graph, task::task::Program},
};

/// Per-vertex payload (de)serialisation hooks.
pub trait VertexCodec: Sized {
    fn serialise<W: Write>(&self, writer: &mut W) -> Result<(), GraphError>;

    fn deserialise<R: Read>(reader: &mut R) -> Result<Self, GraphError>;
}

macro_rules! pod_codec {
    ($($t:ty),*) => {
        $(
            impl VertexCodec for $t {
                fn serialise<W: Write>(&self, writer: &mut W) -> Result<(), GraphError> {
                    write_pod(writer, self)
                }

                fn deserialise<R: Read>(reader: &mut R) -> Result<Self, GraphError> {
                    read_pod(reader, stringify!($t))
                }
            }
        )*
    };
}

pod_codec!(u32, u64, i32, i64, f32, f64);

pub fn write_pod<T: Pod, W: Write>(writer: &mut W, value: &T) -> Result<(), GraphError> {
    writer.write_all(bytemuck::bytes_of(value))?;
    Ok(())
}

pub fn read_pod<T: Pod, R: Read>(reader: &mut R, what: &'static str) -> Result<T, GraphError> {
    let mut value = T::zeroed();
    reader
        .read_exact(bytemuck::bytes_of_mut(&mut value))
        .map_err(GraphError::from_read(what))?;
    Ok(value)
}

/// Reads `len` values, growing the buffer as data arrives so a bogus count
/// ends in a short read rather than a huge allocation.
pub fn read_pod_vec<T: Pod, R: Read>(
    reader: &mut R,
    len: usize,
    what: &'static str,
) -> Result<Vec<T>, GraphError> {
    const CHUNK: usize = 1 << 16;
    let mut values: Vec<T> = Vec::new();
    while values.len() < len {
        let start = values.len();
        let n = (len - start).min(CHUNK);
        values
            .try_reserve_exact(n)
            .map_err(|_| GraphError::Allocation { requested: len })?;
        values.resize(start + n, T::zeroed());
        reader
            .read_exact(bytemuck::cast_slice_mut(&mut values[start..]))
            .map_err(GraphError::from_read(what))?;
    }
    Ok(values)
}

/// Writes every vertex of `graph`, halted or not, in location order.
pub fn dump<P, W>(graph: &Graph<P>, writer: &mut W, progress: bool) -> Result<(), GraphError>
where
    P: Program,
    P::State: VertexCodec,
    W: Write,
{
    let now = Instant::now();
    for v in tqdm!(
        graph.vertices().iter(),
        desc = "Dumping vertices",
        total = graph.count(),
        animation = kdam::Animation::FillUp,
        unit_scale = true,
        disable = !progress
    ) {
        write_pod(writer, &v.id())?;
        v.state().serialise(writer)?;
    }
    writer.flush()?;
    info!(vertices = graph.count(), "dumped vertices in {:?}", now.elapsed());
    Ok(())
}

pub fn dump_to_path<P>(
    graph: &Graph<P>,
    path: impl AsRef<Path>,
    progress: bool,
) -> Result<(), GraphError>
where
    P: Program,
    P::State: VertexCodec,
{
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| GraphError::FileCreate {
        path: path.to_path_buf(),
        source,
    })?;
    dump(graph, &mut BufWriter::new(file), progress)
}

// true if `buf` was filled, false on a clean end of input before its first byte
fn fill_or_eof<R: Read>(reader: &mut R, buf: &mut [u8], what: &'static str) -> Result<bool, GraphError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => return Err(GraphError::ShortRead { what }),
            Ok(n) => filled += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(true)
}

/// Parses a dump back into `(id, payload)` records.
pub fn read_dump<S: VertexCodec, R: Read>(reader: R) -> Result<Vec<(VertexId, S)>, GraphError> {
    let mut reader = reader;
    let mut records = vec![];
    let mut id: VertexId = 0;
    while fill_or_eof(&mut reader, bytemuck::bytes_of_mut(&mut id), "vertex id")? {
        let state = S::deserialise(&mut reader)?;
        records.push((id, state));
    }
    Ok(records)
}

#[cfg(test)]
mod serialise_test {
    use super::*;
    use crate::{algorithms::components::hashmin::HashMin, graph_loader::LoadOptions};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::io::Cursor;

    #[test]
    fn dump_writes_id_then_payload() {
        let mut g: Graph<HashMin> =
            Graph::from_edges(2, [(5, 6)], &LoadOptions::default().with_id_offset(5)).unwrap();
        *g.get_mut(5).unwrap().state_mut() = 42;
        *g.get_mut(6).unwrap().state_mut() = 43;

        let mut out = vec![];
        dump(&g, &mut out, false).unwrap();
        let words: Vec<u32> = out
            .chunks_exact(4)
            .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(words, vec![5, 42, 6, 43]);

        let records: Vec<(VertexId, u32)> = read_dump(Cursor::new(out)).unwrap();
        assert_eq!(records, vec![(5, 42), (6, 43)]);
    }

    #[test]
    fn truncated_dump() {
        let bytes: Vec<u8> = bytemuck::cast_slice(&[1u32, 2, 3]).to_vec();
        let res = read_dump::<u32, _>(Cursor::new(&bytes[..10]));
        assert!(matches!(res, Err(GraphError::ShortRead { .. })));
        let res = read_dump::<u32, _>(Cursor::new(&bytes[..]));
        assert!(matches!(res, Err(GraphError::ShortRead { what: "u32" })));
    }

    #[test]
    fn dump_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let g: Graph<HashMin> =
            Graph::from_edges(1, std::iter::empty(), &LoadOptions::default()).unwrap();
        let res = dump_to_path(&g, dir.path().join("nope").join("out.bin"), false);
        assert!(matches!(res, Err(GraphError::FileCreate { .. })));
    }

    proptest! {
        #[test]
        fn dump_round_trips(values in proptest::collection::vec(any::<u32>(), 0..200), offset in 0u32..1000) {
            let n = values.len();
            let opts = LoadOptions::default().with_id_offset(offset);
            let mut g: Graph<HashMin> = Graph::from_edges(n, std::iter::empty(), &opts).unwrap();
            for (i, v) in values.iter().enumerate() {
                *g.get_mut(offset + i as u32).unwrap().state_mut() = *v;
            }

            let mut out = vec![];
            dump(&g, &mut out, false).unwrap();
            prop_assert_eq!(out.len(), n * 8);

            let records: Vec<(VertexId, u32)> = read_dump(Cursor::new(out)).unwrap();
            let expected: Vec<_> = values.iter().enumerate().map(|(i, v)| (offset + i as u32, *v)).collect();
            prop_assert_eq!(records, expected);
        }
    }
}
