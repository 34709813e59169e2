//! Specialized collection types

pub use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a control stored in a [`crate::ui::ControlTree`]
    pub struct ControlId;
}

/// Arena owning every control of a tree
pub type ControlArena<T> = SlotMap<ControlId, T>;

/// Ordered list whose mutations are queued while a traversal holds it.
///
/// Readers call [`DeferredList::lock`] before iterating and
/// [`DeferredList::unlock`] afterwards; adds and removes requested in
/// between are logged and replayed in request order by
/// [`DeferredList::flush`].
#[derive(Debug, Clone)]
pub struct DeferredList<T> {
    items: Vec<T>,
    lock_depth: u32,
    pending: Vec<PendingOp<T>>,
}

/// A mutation waiting for the list to unlock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingOp<T> {
    Add(T, Option<usize>),
    Remove(T),
}

impl<T: Copy + PartialEq> DeferredList<T> {
    /// Create an empty list
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            lock_depth: 0,
            pending: Vec::new(),
        }
    }

    /// Begin a traversal
    pub fn lock(&mut self) {
        self.lock_depth += 1;
    }

    /// End a traversal
    pub fn unlock(&mut self) {
        self.lock_depth = self.lock_depth.saturating_sub(1);
    }

    /// True while at least one traversal is active
    pub const fn is_locked(&self) -> bool {
        self.lock_depth > 0
    }

    /// Add an item at `index` (or the end). Queued while locked unless `force`.
    pub fn add(&mut self, item: T, index: Option<usize>, force: bool) {
        if !force && self.is_locked() {
            self.pending.push(PendingOp::Add(item, index));
        } else {
            self.insert_now(item, index);
        }
    }

    /// Remove an item. Queued while locked unless `force`.
    pub fn remove(&mut self, item: T, force: bool) {
        if !force && self.is_locked() {
            self.pending.push(PendingOp::Remove(item));
        } else {
            self.items.retain(|existing| *existing != item);
        }
    }

    /// Replay queued mutations in request order.
    ///
    /// Returns true if anything was queued.
    pub fn flush(&mut self) -> bool {
        if self.pending.is_empty() {
            return false;
        }
        for op in std::mem::take(&mut self.pending) {
            match op {
                PendingOp::Add(item, index) => self.insert_now(item, index),
                PendingOp::Remove(item) => self.items.retain(|existing| *existing != item),
            }
        }
        true
    }

    fn insert_now(&mut self, item: T, index: Option<usize>) {
        match index {
            Some(index) => self.items.insert(index.min(self.items.len()), item),
            None => self.items.push(item),
        }
    }

    /// Item at position `index`
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.get(index).copied()
    }

    /// Position of `item`
    pub fn index_of(&self, item: T) -> Option<usize> {
        self.items.iter().position(|existing| *existing == item)
    }

    /// True if `item` will be in the list once queued mutations are replayed
    pub fn contains_or_pending(&self, item: T) -> bool {
        self.pending.iter().fold(self.items.contains(&item), |present, op| match op {
            PendingOp::Add(added, _) if *added == item => true,
            PendingOp::Remove(removed) if *removed == item => false,
            _ => present,
        })
    }

    /// True if mutations are waiting for a flush
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// First item
    pub fn first(&self) -> Option<T> {
        self.items.first().copied()
    }

    /// Last item
    pub fn last(&self) -> Option<T> {
        self.items.last().copied()
    }

    /// Number of applied items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if no items are applied
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applied items in order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Applied items plus items queued for addition
    pub fn all_including_pending(&self) -> Vec<T> {
        let mut all = self.items.clone();
        for op in &self.pending {
            if let PendingOp::Add(item, _) = op {
                if !all.contains(item) {
                    all.push(*item);
                }
            }
        }
        all
    }
}

impl<T: Copy + PartialEq> Default for DeferredList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlocked_mutation_is_immediate() {
        let mut list = DeferredList::new();
        list.add(1, None, false);
        list.add(2, None, false);
        list.add(0, Some(0), false);
        assert_eq!(list.as_slice(), &[0, 1, 2]);
        list.remove(1, false);
        assert_eq!(list.as_slice(), &[0, 2]);
    }

    #[test]
    fn test_locked_mutation_is_deferred() {
        let mut list = DeferredList::new();
        list.add(1, None, false);
        list.lock();
        list.add(2, None, false);
        list.remove(1, false);
        assert_eq!(list.as_slice(), &[1]);
        list.unlock();
        assert!(list.flush());
        assert_eq!(list.as_slice(), &[2]);
        assert!(!list.flush());
    }

    #[test]
    fn test_remove_cancels_queued_add() {
        let mut list = DeferredList::new();
        list.lock();
        list.add(7, None, false);
        assert!(list.contains_or_pending(7));
        list.remove(7, false);
        list.unlock();
        list.flush();
        assert!(list.is_empty());
    }

    #[test]
    fn test_locked_remove_then_add_moves_to_end() {
        let mut list = DeferredList::new();
        for item in [1, 2, 3] {
            list.add(item, None, false);
        }
        list.lock();
        list.remove(1, false);
        list.add(1, None, false);
        assert!(list.contains_or_pending(1));
        list.unlock();
        list.flush();
        assert_eq!(list.as_slice(), &[2, 3, 1]);
    }

    #[test]
    fn test_force_bypasses_lock() {
        let mut list = DeferredList::new();
        list.lock();
        list.add(3, None, true);
        assert_eq!(list.as_slice(), &[3]);
        list.remove(3, true);
        assert!(list.is_empty());
    }

    #[test]
    fn test_insert_index_is_clamped() {
        let mut list = DeferredList::new();
        list.add(1, Some(10), false);
        list.add(2, Some(10), false);
        assert_eq!(list.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_nested_locks() {
        let mut list: DeferredList<u8> = DeferredList::new();
        list.lock();
        list.lock();
        list.unlock();
        assert!(list.is_locked());
        list.unlock();
        assert!(!list.is_locked());
        list.unlock();
        assert!(!list.is_locked());
    }
}
