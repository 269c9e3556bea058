//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from issue
//! through commit. It provides:
//! 1. **Allocation:** Assigns a slot (and thereby a tag) to each issued instruction.
//! 2. **Completion:** Records results as they come off the CDB.
//! 3. **In-order Commit:** Retires instructions from the head in program order.
//! 4. **Forwarding:** Lets issue read a finished result before it commits.
//!
//! Tags are plain slot indices: a slot uniquely identifies its instruction
//! for the instruction's whole stay in the machine, because consumers drop
//! their tags at the producer's write result, before the slot can be reused.

use std::fmt;

use crate::common::reg::Reg;
use crate::isa::instruction::OpKind;

/// Tag identifying an in-flight instruction: its ROB slot index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct RobTag(pub usize);

impl fmt::Display for RobTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ROB{}", self.0)
    }
}

/// Lifecycle state of an occupied ROB entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RobState {
    /// Slot allocated, operands possibly still pending in the station.
    #[default]
    Issued,
    /// Dispatched to a functional unit.
    Executing,
    /// Result on the bus; waiting to commit.
    WroteResult,
}

impl fmt::Display for RobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RobState::Issued => "Issued",
            RobState::Executing => "Executing",
            RobState::WroteResult => "WroteResult",
        };
        f.write_str(name)
    }
}

/// A single entry in the Reorder Buffer.
#[derive(Clone, Copy, Debug, Default)]
pub struct RobEntry {
    /// Whether this slot is occupied.
    pub valid: bool,
    /// This slot's own tag.
    pub tag: RobTag,
    /// Program index of the instruction this slot holds.
    pub instr: usize,
    /// Operation kind, mirrored from the instruction.
    pub kind: OpKind,
    /// Current lifecycle state.
    pub state: RobState,
    /// Destination register (`None` for STORE).
    pub dest: Option<Reg>,
    /// Result value, or the data to write for STORE.
    pub value: i64,
    /// Effective address for LOAD/STORE, unused otherwise.
    pub address: i64,
    /// True once `value` is known.
    pub value_ready: bool,
}

/// Reorder Buffer — circular buffer for in-order commit.
pub struct Rob {
    /// Fixed-size entry array.
    entries: Vec<RobEntry>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of occupied entries.
    count: usize,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, RobEntry::default);
        Self {
            entries,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the ROB is full.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.count == self.entries.len()
    }

    /// Returns the number of free slots.
    #[inline]
    pub fn free_slots(&self) -> usize {
        self.entries.len() - self.count
    }

    /// Returns the head (oldest) slot index.
    #[inline]
    pub fn head(&self) -> usize {
        self.head
    }

    /// Returns the tail (next allocation) slot index.
    #[inline]
    pub fn tail(&self) -> usize {
        self.tail
    }

    /// Allocates the tail slot for an instruction. Returns `None` if full.
    pub fn allocate(&mut self, instr: usize, kind: OpKind, dest: Option<Reg>) -> Option<RobTag> {
        if self.is_full() {
            return None;
        }

        let tag = RobTag(self.tail);
        self.entries[self.tail] = RobEntry {
            valid: true,
            tag,
            instr,
            kind,
            state: RobState::Issued,
            dest,
            value: 0,
            address: 0,
            value_ready: false,
        };

        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;
        Some(tag)
    }

    /// Returns the entry with the given tag, if that slot is occupied.
    pub fn get(&self, tag: RobTag) -> Option<&RobEntry> {
        self.entries.get(tag.0).filter(|e| e.valid)
    }

    /// Marks an entry as dispatched to a functional unit.
    pub fn mark_executing(&mut self, tag: RobTag) {
        if let Some(entry) = self.entries.get_mut(tag.0).filter(|e| e.valid) {
            entry.state = RobState::Executing;
        }
    }

    /// Records a broadcast result: value known, state WroteResult.
    pub fn write_result(&mut self, tag: RobTag, value: i64) {
        if let Some(entry) = self.entries.get_mut(tag.0).filter(|e| e.valid) {
            entry.value = value;
            entry.value_ready = true;
            entry.state = RobState::WroteResult;
        }
    }

    /// Records the effective address of a LOAD or STORE.
    pub fn set_address(&mut self, tag: RobTag, address: i64) {
        if let Some(entry) = self.entries.get_mut(tag.0).filter(|e| e.valid) {
            entry.address = address;
        }
    }

    /// Mirrors a STORE's data operand into its entry ahead of write result.
    ///
    /// Called whenever the station's data tag clears (at issue when the data
    /// is already known, or when it arrives over the CDB), so that commit can
    /// rely on `value`/`value_ready` unconditionally.
    pub fn set_store_data(&mut self, tag: RobTag, data: i64) {
        if let Some(entry) = self.entries.get_mut(tag.0).filter(|e| e.valid) {
            entry.value = data;
            entry.value_ready = true;
        }
    }

    /// Returns the head entry without removing it, if the ROB is non-empty.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        if self.count == 0 {
            None
        } else {
            Some(&self.entries[self.head])
        }
    }

    /// Commits (retires) the head entry if it is ready.
    ///
    /// Returns `None` when the ROB is empty, the head has not written its
    /// result, or the head is a STORE whose data is still pending — a STORE
    /// with unresolved data blocks all younger instructions.
    pub fn commit_head(&mut self) -> Option<RobEntry> {
        if self.count == 0 {
            return None;
        }

        let head = &self.entries[self.head];
        if head.state != RobState::WroteResult {
            return None;
        }
        if head.kind == OpKind::Store && !head.value_ready {
            return None;
        }

        let committed = self.entries[self.head];
        self.entries[self.head].valid = false;
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        Some(committed)
    }

    /// Iterates over all slots in index order (occupied or not).
    pub fn slots(&self) -> impl Iterator<Item = &RobEntry> {
        self.entries.iter()
    }
}
