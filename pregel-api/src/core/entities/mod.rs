use serde::{Deserialize, Serialize};

/// External vertex identifier as it appears in input files and dumps.
pub type VertexId = u32;

/// Weight attached to an edge when the graph is loaded with weights.
pub type EdgeWeight = f32;

// the location of a vertex inside the vertex store, ids map onto it by subtracting the id offset
#[repr(transparent)]
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, Default,
)]
pub struct VID(pub usize);

impl VID {
    pub fn index(&self) -> usize {
        self.0
    }

    pub fn as_u64(&self) -> u64 {
        self.0 as u64
    }
}

impl From<usize> for VID {
    fn from(id: usize) -> Self {
        VID(id)
    }
}

impl From<VID> for usize {
    fn from(id: VID) -> Self {
        id.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn vid_round_trips_through_usize() {
        let vid: VID = 42usize.into();
        assert_eq!(vid.index(), 42);
        assert_eq!(usize::from(vid), 42);
        assert_eq!(vid.as_u64(), 42u64);
    }
}
