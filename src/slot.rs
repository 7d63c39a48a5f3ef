//! SlotBuffer: an index-based arena of 32-byte slots with symbolic
//! pointers, resolved to absolute byte offsets in one linear pass.
//!
//! This replaces a shared-mutable-slot-with-symbolic-pointer-field
//! pattern with a plain `Vec<Slot>` where a pointer slot's
//! `target`/`anchor` are indices into that same vector. Appending another
//! buffer (`extend`) rebases both fields by the insertion point, so the
//! relative distance between a pointer and its anchor survives being
//! relocated as a unit — this is what lets a dynamic array's element
//! pointers stay correctly anchored to the array's own first element slot
//! regardless of where the array itself lands once stitched into its
//! parent.

/// A 0-based index into a `SlotBuffer`'s slot vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotIndex(pub usize);

#[derive(Debug, Clone)]
pub(crate) enum Slot {
    Raw([u8; 32]),
    Pointer { target: SlotIndex, anchor: SlotIndex },
}

/// An ordered sequence of 32-byte slots. Mutable until [`SlotBuffer::finalize`].
#[derive(Debug, Clone, Default)]
pub(crate) struct SlotBuffer {
    slots: Vec<Slot>,
}

impl SlotBuffer {
    pub(crate) fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Index one past the last pushed slot — the slot the *next* push will
    /// land at, useful for marking an anchor before appending its body.
    pub(crate) fn here(&self) -> SlotIndex {
        SlotIndex(self.slots.len())
    }

    pub(crate) fn push_raw(&mut self, bytes: [u8; 32]) -> SlotIndex {
        let idx = self.here();
        self.slots.push(Slot::Raw(bytes));
        idx
    }

    /// Overwrites a previously pushed slot (typically a zeroed placeholder)
    /// with a pointer whose offset is computed at `finalize`.
    pub(crate) fn set_pointer(&mut self, at: SlotIndex, target: SlotIndex, anchor: SlotIndex) {
        self.slots[at.0] = Slot::Pointer { target, anchor };
    }

    /// Appends `other`'s slots, rebasing its internal pointer `target`/
    /// `anchor` indices by this buffer's current length. Returns the index
    /// the appended buffer now starts at.
    pub(crate) fn extend(&mut self, other: SlotBuffer) -> SlotIndex {
        let base = self.slots.len();
        for slot in other.slots {
            let rebased = match slot {
                Slot::Raw(b) => Slot::Raw(b),
                Slot::Pointer { target, anchor } => {
                    Slot::Pointer { target: SlotIndex(target.0 + base), anchor: SlotIndex(anchor.0 + base) }
                }
            };
            self.slots.push(rebased);
        }
        SlotIndex(base)
    }

    /// Resolves every pointer slot to its big-endian uint256 byte offset
    /// and concatenates the whole buffer into a flat byte vector.
    pub(crate) fn finalize(self) -> Vec<u8> {
        let mut out = vec![0u8; self.slots.len() * 32];
        for (order, slot) in self.slots.iter().enumerate() {
            let bytes = match slot {
                Slot::Raw(b) => *b,
                Slot::Pointer { target, anchor } => {
                    let distance = (target.0 as i128 - anchor.0 as i128) * 32;
                    debug_assert!(distance >= 0, "pointer target must not precede its anchor");
                    encode_offset(distance as u128)
                }
            };
            out[order * 32..(order + 1) * 32].copy_from_slice(&bytes);
        }
        out
    }
}

fn encode_offset(value: u128) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[16..32].copy_from_slice(&value.to_be_bytes());
    out
}
