//! Bucket Array.
//!
//! An array of `2n-1` [`IndexedBucketList`] slots: slot `0` is the source
//! pile, slot `2n-2` is the sink pile, and interior slot `i` holds vertices
//! whose current score equals `i - (n-1)`. `lowest` tracks the minimum
//! non-empty interior bucket index (as a score, not a slot) so `evict_min`
//! stays O(1) in the common case.

use crate::bucket::IndexedBucketList;

/// Where a vertex currently lives.
pub enum Placement {
    Source,
    Sink,
    Interior(i64),
}

pub struct BucketArray {
    buckets: Vec<IndexedBucketList>,
    /// Minimum interior *score* (not slot index) with a non-empty bucket.
    /// `None` when no interior vertex remains.
    lowest: Option<i64>,
    n: usize,
    mid: i64,
    interior_count: usize,
}

impl BucketArray {
    pub fn new(n: usize) -> Self {
        let slots = if n == 0 { 0 } else { 2 * n - 1 };
        BucketArray {
            buckets: (0..slots).map(|_| IndexedBucketList::new()).collect(),
            lowest: None,
            n,
            mid: n as i64 - 1,
            interior_count: 0,
        }
    }

    fn source_idx(&self) -> usize {
        0
    }

    fn sink_idx(&self) -> usize {
        self.buckets.len() - 1
    }

    fn interior_idx(&self, score: i64) -> usize {
        (score + self.mid) as usize
    }

    pub fn lowest(&self) -> Option<i64> {
        self.lowest
    }

    pub fn is_source_empty(&self) -> bool {
        self.buckets[self.source_idx()].is_empty()
    }

    pub fn is_sink_empty(&self) -> bool {
        self.buckets[self.sink_idx()].is_empty()
    }

    pub fn interior_count(&self) -> usize {
        self.interior_count
    }

    /// Seeds a vertex into its initial placement.
    pub fn seed(&mut self, v: usize, placement: Placement) {
        match placement {
            Placement::Source => self.buckets[self.source_idx()].append(v),
            Placement::Sink => self.buckets[self.sink_idx()].append(v),
            Placement::Interior(score) => self.insert_interior(v, score),
        }
    }

    fn insert_interior(&mut self, v: usize, score: i64) {
        let idx = self.interior_idx(score);
        self.buckets[idx].append(v);
        self.interior_count += 1;
        self.lowest = Some(match self.lowest {
            Some(cur) => cur.min(score),
            None => score,
        });
    }

    pub fn drain_source(&mut self) -> Option<usize> {
        self.buckets[self.source_idx()].pop_head()
    }

    pub fn drain_sink(&mut self) -> Option<usize> {
        self.buckets[self.sink_idx()].pop_head()
    }

    /// Pops the head of the interior bucket at `lowest + (n-1)`.
    /// Caller must have already established `lowest` is valid (there is
    /// at least one interior vertex remaining); this is a programming
    /// error otherwise.
    pub fn evict_min(&mut self) -> usize {
        let lowest = self.lowest.expect("evict_min called with no interior vertices");
        let idx = self.interior_idx(lowest);
        let v = self.buckets[idx]
            .pop_head()
            .unwrap_or_else(|| panic!("lowest bucket {lowest} unexpectedly empty"));
        self.interior_count -= 1;
        self.maybe_refresh_lowest();
        v
    }

    /// Central relocate primitive: removes `v` from its current
    /// interior bucket at `old_score` and places it in `new_placement`.
    pub fn relocate_from_interior(&mut self, v: usize, old_score: i64, new_placement: Placement) {
        let old_idx = self.interior_idx(old_score);
        self.buckets[old_idx].remove(v);
        self.interior_count -= 1;
        match new_placement {
            Placement::Source => self.buckets[self.source_idx()].append(v),
            Placement::Sink => self.buckets[self.sink_idx()].append(v),
            Placement::Interior(score) => self.insert_interior(v, score),
        }
        self.maybe_refresh_lowest();
    }

    /// Lowest maintenance: if the bucket at the tracked minimum
    /// emptied out, advance to the next non-empty interior bucket. The
    /// common case (the next score up is non-empty) is O(1); the fallback
    /// walk is O(n) worst case but the price paid for avoiding a full
    /// priority queue.
    fn maybe_refresh_lowest(&mut self) {
        let Some(lowest) = self.lowest else { return };
        let idx = self.interior_idx(lowest);
        if !self.buckets[idx].is_empty() {
            return;
        }
        if self.interior_count == 0 {
            self.lowest = None;
            return;
        }
        let max_score = self.n as i64 - 1;
        let mut candidate = lowest + 1;
        let mut steps = 0usize;
        while candidate <= max_score {
            if !self.buckets[self.interior_idx(candidate)].is_empty() {
                if steps > 1 {
                    log::debug!("lowest-bucket scan walked {steps} slots past score {lowest}");
                }
                self.lowest = Some(candidate);
                return;
            }
            candidate += 1;
            steps += 1;
        }
        unreachable!(
            "interior_count={} but no non-empty interior bucket found above {}",
            self.interior_count, lowest
        );
    }
}
