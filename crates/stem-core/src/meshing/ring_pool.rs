use smallvec::SmallVec;

/// Vertex indices of one cross-section of the stem, in angular order.
pub type Ring = SmallVec<[u32; 16]>;

/// Reference to a slot of a [`RingPool`], valid until the pool hands the
/// same slot out again.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RingHandle {
    slot: usize,
    generation: u64,
}

impl RingHandle {
    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Fixed-capacity circular pool of reusable buffers.
///
/// `next` advances a cursor modulo the capacity and returns the slot found
/// there. The buffer is not cleared: callers clear it before filling it.
/// A slot handed out again invalidates every older handle to it, which is
/// checked in debug builds when the old handle is used.
#[derive(Debug)]
pub struct RingPool<T> {
    slots: Vec<T>,
    generations: Vec<u64>,
    cursor: Option<usize>,
    handed_out: u64,
}

impl<T: Default> RingPool<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "a ring pool needs at least one slot");
        Self {
            slots: (0..capacity).map(|_| T::default()).collect(),
            generations: vec![0; capacity],
            cursor: None,
            handed_out: 0,
        }
    }
}

impl<T> RingPool<T> {
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn next(&mut self) -> RingHandle {
        let slot = self.cursor.map(|c| (c + 1) % self.capacity()).unwrap_or(0);
        self.cursor = Some(slot);
        self.handed_out += 1;
        self.generations[slot] = self.handed_out;
        RingHandle {
            slot,
            generation: self.handed_out,
        }
    }

    /// `false` once the slot behind `handle` has been handed out again.
    pub fn is_live(&self, handle: RingHandle) -> bool {
        self.generations[handle.slot] == handle.generation
    }

    /// Forget every outstanding handle and restart the cursor at slot 0.
    /// Buffers keep their allocations.
    pub fn reset(&mut self) {
        self.cursor = None;
        self.generations.iter_mut().for_each(|g| *g = 0);
    }
}

impl<T> std::ops::Index<RingHandle> for RingPool<T> {
    type Output = T;

    fn index(&self, handle: RingHandle) -> &Self::Output {
        debug_assert!(
            self.is_live(handle),
            "ring slot {} was reused while still referenced",
            handle.slot
        );
        &self.slots[handle.slot]
    }
}

impl<T> std::ops::IndexMut<RingHandle> for RingPool<T> {
    fn index_mut(&mut self, handle: RingHandle) -> &mut Self::Output {
        debug_assert!(
            self.is_live(handle),
            "ring slot {} was reused while still referenced",
            handle.slot
        );
        &mut self.slots[handle.slot]
    }
}
