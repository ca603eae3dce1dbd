//! Indexed Bucket List.
//!
//! An append-only doubly linked list augmented with a side index from
//! vertex to its entry handle, giving O(1) `append`/`remove`/`peek_head`/
//! `pop_head`. Entries live in a slab (`Vec<Option<Entry>>`) addressed by
//! a stable slot index rather than a raw pointer, with a `HashMap` from
//! vertex to slot standing in for the back-pointer; this keeps relocation
//! a constant-time unsplice-plus-append even as the slab reallocates.

use std::collections::HashMap;

type Slot = usize;

struct Entry {
    vertex: usize,
    prev: Option<Slot>,
    next: Option<Slot>,
}

/// Ordered sequence container supporting O(1) append, membership-keyed
/// removal, head-peek, and head-pop.
#[derive(Default)]
pub struct IndexedBucketList {
    entries: Vec<Option<Entry>>,
    index: HashMap<usize, Slot>,
    head: Option<Slot>,
    tail: Option<Slot>,
    free: Vec<Slot>,
    len: usize,
}

impl IndexedBucketList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Places `v` at the tail, recording a back-pointer to its entry.
    pub fn append(&mut self, v: usize) {
        let slot = match self.free.pop() {
            Some(s) => s,
            None => {
                self.entries.push(None);
                self.entries.len() - 1
            }
        };
        self.entries[slot] = Some(Entry {
            vertex: v,
            prev: self.tail,
            next: None,
        });
        if let Some(t) = self.tail {
            self.entries[t].as_mut().unwrap().next = Some(slot);
        } else {
            self.head = Some(slot);
        }
        self.tail = Some(slot);
        self.index.insert(v, slot);
        self.len += 1;
    }

    /// Unsplices `v`'s entry using the back-pointer. Panics if `v` is not
    /// present — this is a programming error, not a recoverable
    /// condition.
    pub fn remove(&mut self, v: usize) {
        let slot = self
            .index
            .remove(&v)
            .unwrap_or_else(|| panic!("remove() of absent vertex {v}"));
        let (prev, next) = {
            let e = self.entries[slot].as_ref().unwrap();
            (e.prev, e.next)
        };
        match prev {
            Some(p) => self.entries[p].as_mut().unwrap().next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.entries[n].as_mut().unwrap().prev = prev,
            None => self.tail = prev,
        }
        self.entries[slot] = None;
        self.free.push(slot);
        self.len -= 1;
    }

    pub fn peek_head(&self) -> Option<usize> {
        self.head.map(|s| self.entries[s].as_ref().unwrap().vertex)
    }

    /// Removes and returns the head.
    pub fn pop_head(&mut self) -> Option<usize> {
        let v = self.peek_head()?;
        self.remove(v);
        Some(v)
    }

    pub fn contains(&self, v: usize) -> bool {
        self.index.contains_key(&v)
    }
}
