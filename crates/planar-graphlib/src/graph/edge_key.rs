//! Edge key types.
//!
//! Undirected edges are keyed by their endpoint indices with the smaller index first, so both
//! orientations of a pair hash to the same key.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub lo: usize,
    pub hi: usize,
}

impl EdgeKey {
    pub fn new(v_ix: usize, w_ix: usize) -> Self {
        if v_ix <= w_ix {
            Self { lo: v_ix, hi: w_ix }
        } else {
            Self { lo: w_ix, hi: v_ix }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EdgeKey;

    #[test]
    fn key_is_orientation_free() {
        assert_eq!(EdgeKey::new(3, 1), EdgeKey::new(1, 3));
        assert_eq!(EdgeKey::new(3, 1).lo, 1);
    }
}
