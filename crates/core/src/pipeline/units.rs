//! Bounded execution-unit pool.
//!
//! Tracks per-class availability for the four pooled unit classes. The pool
//! is reset to full capacity at the top of every tick and re-allocated by
//! the dispatch walk, so availability always means "capacity not claimed by
//! an instruction issuing this cycle" rather than "units idle right now".
//! [`UnitClass::Any`] has no pool entry and never reports available.

use crate::isa::opcode::UnitClass;

/// Number of integer arithmetic units.
pub const ALU_UNITS: u32 = 2;
/// Number of floating-point units.
pub const FPU_UNITS: u32 = 1;
/// Number of memory access units.
pub const MEM_UNITS: u32 = 1;
/// Number of branch units.
pub const BRANCH_UNITS: u32 = 1;

#[derive(Clone, Copy)]
struct PoolEntry {
    capacity: u32,
    available: u32,
}

impl PoolEntry {
    fn full(capacity: u32) -> Self {
        Self {
            capacity,
            available: capacity,
        }
    }
}

/// The execution-unit pool.
pub struct UnitPool {
    entries: [PoolEntry; 4],
}

impl Default for UnitPool {
    fn default() -> Self {
        Self::new()
    }
}

fn pool_index(unit: UnitClass) -> Option<usize> {
    match unit {
        UnitClass::Alu => Some(0),
        UnitClass::Fpu => Some(1),
        UnitClass::Mem => Some(2),
        UnitClass::Branch => Some(3),
        UnitClass::Any => None,
    }
}

impl UnitPool {
    /// Creates a pool at full capacity.
    pub fn new() -> Self {
        Self {
            entries: [
                PoolEntry::full(ALU_UNITS),
                PoolEntry::full(FPU_UNITS),
                PoolEntry::full(MEM_UNITS),
                PoolEntry::full(BRANCH_UNITS),
            ],
        }
    }

    /// Whether a unit of `class` can be allocated this cycle.
    pub fn is_available(&self, class: UnitClass) -> bool {
        pool_index(class).is_some_and(|i| self.entries[i].available > 0)
    }

    /// Claims a unit of `class`. Returns whether the allocation succeeded.
    pub fn allocate(&mut self, class: UnitClass) -> bool {
        match pool_index(class) {
            Some(i) if self.entries[i].available > 0 => {
                self.entries[i].available -= 1;
                true
            }
            _ => false,
        }
    }

    /// Returns a unit of `class`, saturating at capacity.
    pub fn release(&mut self, class: UnitClass) {
        if let Some(i) = pool_index(class) {
            let entry = &mut self.entries[i];
            if entry.available < entry.capacity {
                entry.available += 1;
            }
        }
    }

    /// Restores every class to full capacity.
    pub fn reset(&mut self) {
        for entry in &mut self.entries {
            entry.available = entry.capacity;
        }
    }

    /// Residual availability for `class` (0 for `Any`).
    pub fn available(&self, class: UnitClass) -> u32 {
        pool_index(class).map_or(0, |i| self.entries[i].available)
    }

    /// Capacity of `class` (0 for `Any`).
    pub fn capacity(&self, class: UnitClass) -> u32 {
        pool_index(class).map_or(0, |i| self.entries[i].capacity)
    }
}
