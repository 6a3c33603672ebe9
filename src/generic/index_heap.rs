/*!
A max heap over a fixed set of indices, each paired with a value.

The backing vector of values stays constant, and the heap records only which indices are *active*.
This allows the heap to act as a store of values for every index, while supporting quick access to the active index with the greatest value.

For example, [IndexHeap] is used as a store of the activity of [atoms](crate::structures::atom), where an atom is active on the heap when the atom has no value.

```rust
# use otter_logic::generic::index_heap::IndexHeap;
let mut heap = IndexHeap::default();

heap.add(6, 10.0);
heap.add(0, 70.0);

heap.activate(6);
heap.activate(0);

assert_eq!(heap.count(), 7);
assert_eq!(heap.pop_max(), Some(0));
assert_eq!(heap.pop_max(), Some(6));
assert!(heap.pop_max().is_none());
```
*/

use std::cmp::Ordering;

/// Values for each index, and a heap over the active indices ordered by value.
pub struct IndexHeap<V: PartialOrd + Default> {
    /// The value of each index.
    values: Vec<V>,

    /// Where each index sits on the heap, if active.
    position_in_heap: Vec<Option<usize>>,

    /// The heap, as indices into `values`.
    heap: Vec<usize>,
}

impl<V: PartialOrd + Default> Default for IndexHeap<V> {
    fn default() -> Self {
        IndexHeap {
            values: Vec::default(),
            position_in_heap: Vec::default(),
            heap: Vec::default(),
        }
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    /// Index `value` with `index`, growing the structure as required.
    /// Returns true if `index` was a fresh index, false otherwise.
    ///
    /// To *activate* `index` on the heap [activate](IndexHeap::activate) should be called after this method.
    pub fn add(&mut self, index: usize, value: V) -> bool {
        let fresh = self.values.len() <= index;
        while self.values.len() <= index {
            self.values.push(V::default());
            self.position_in_heap.push(None);
        }
        self.values[index] = value;
        if !fresh {
            self.heapify_if_active(index);
        }
        fresh
    }

    /// Remove `index` from the heap, if active.
    /// Returns true if `index` was removed, false otherwise.
    pub fn remove(&mut self, index: usize) -> bool {
        let Some(heap_index) = self.position_in_heap.get(index).copied().flatten() else {
            return false;
        };
        let last = self.heap.len() - 1;
        self.swap(heap_index, last);
        self.heap.pop();
        self.position_in_heap[index] = None;
        if heap_index < self.heap.len() {
            self.heapify_down(heap_index);
            self.heapify_up(heap_index);
        }
        true
    }

    /// Activate `index` on the heap.
    /// Returns true if `index` was inactive, false otherwise.
    pub fn activate(&mut self, index: usize) -> bool {
        if index >= self.values.len() {
            return false;
        }
        match self.position_in_heap[index] {
            None => {
                self.heap.push(index);
                let heap_index = self.heap.len() - 1;
                self.position_in_heap[index] = Some(heap_index);
                self.heapify_up(heap_index);
                true
            }
            Some(_) => false,
        }
    }

    /// Whether `index` is on the heap.
    pub fn is_active(&self, index: usize) -> bool {
        matches!(self.position_in_heap.get(index), Some(Some(_)))
    }

    /// Restore the heap property around `index`, if active.
    pub fn heapify_if_active(&mut self, index: usize) {
        if let Some(Some(heap_index)) = self.position_in_heap.get(index).copied() {
            self.heapify_up(heap_index);
            if let Some(heap_index) = self.position_in_heap[index] {
                self.heapify_down(heap_index);
            }
        }
    }

    /// Peek at the active index with the greatest value.
    pub fn peek_max(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// Pop the active index with the greatest value off the heap.
    pub fn pop_max(&mut self) -> Option<usize> {
        let max = self.peek_max()?;
        self.remove(max);
        Some(max)
    }

    /// Restore the heap property across the whole heap, e.g. after [apply_to_all](IndexHeap::apply_to_all).
    pub fn heapify(&mut self) {
        for heap_index in (0..self.heap.len() / 2).rev() {
            self.heapify_down(heap_index)
        }
    }

    /// The value of `index`.
    pub fn value_at(&self, index: usize) -> &V {
        &self.values[index]
    }

    /// Apply `f` to the value of `index`, and restore the heap property.
    pub fn apply_to_index(&mut self, index: usize, f: impl Fn(&V) -> V) {
        self.values[index] = f(&self.values[index]);
        self.heapify_if_active(index);
    }

    /// Apply `f` to all values.
    ///
    /// A uniform scaling preserves the heap property, otherwise a call to [heapify](IndexHeap::heapify) may be required.
    pub fn apply_to_all(&mut self, f: impl Fn(&V) -> V) {
        for value in self.values.iter_mut() {
            *value = f(value)
        }
    }

    /// A count of indices stored by the structure, active or not.
    pub fn count(&self) -> usize {
        self.values.len()
    }

    /// True if no index is stored, false otherwise.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<V: PartialOrd + Default> IndexHeap<V> {
    fn greater(&self, a: usize, b: usize) -> bool {
        matches!(
            self.values[self.heap[a]].partial_cmp(&self.values[self.heap[b]]),
            Some(Ordering::Greater)
        )
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position_in_heap[self.heap[a]] = Some(a);
        self.position_in_heap[self.heap[b]] = Some(b);
    }

    fn heapify_down(&mut self, mut heap_index: usize) {
        loop {
            let left = (2 * heap_index) + 1;
            let right = left + 1;
            let mut update = heap_index;

            if left < self.heap.len() && self.greater(left, update) {
                update = left;
            }
            if right < self.heap.len() && self.greater(right, update) {
                update = right;
            }
            if update == heap_index {
                break;
            }
            self.swap(heap_index, update);
            heap_index = update;
        }
    }

    fn heapify_up(&mut self, mut heap_index: usize) {
        while heap_index > 0 {
            let parent = (heap_index - 1) / 2;
            if !self.greater(heap_index, parent) {
                break;
            }
            self.swap(heap_index, parent);
            heap_index = parent;
        }
    }
}

#[cfg(test)]
mod index_heap_tests {
    use super::*;

    /// Active indices, from greatest value to least.
    fn drain<V: PartialOrd + Default>(heap: &mut IndexHeap<V>) -> Vec<usize> {
        std::iter::from_fn(|| heap.pop_max()).collect()
    }

    fn activities(pairs: &[(usize, f64)]) -> IndexHeap<f64> {
        let mut heap = IndexHeap::default();
        for (index, activity) in pairs {
            heap.add(*index, *activity);
            heap.activate(*index);
        }
        heap
    }

    #[test]
    fn order() {
        let mut heap = activities(&[(3, 0.5), (2, 4.0), (7, 1.5), (1, 8.0), (5, 0.25)]);
        assert_eq!(drain(&mut heap), vec![1, 2, 7, 3, 5]);
        assert_eq!(heap.peek_max(), None);
    }

    #[test]
    fn bumps_and_decay() {
        let mut heap = activities(&[(1, 1.0), (2, 2.0), (3, 3.0)]);

        heap.apply_to_index(1, |activity| activity + 5.0);
        assert_eq!(heap.peek_max(), Some(1));

        heap.apply_to_all(|activity| activity / 2.0);
        assert_eq!(*heap.value_at(1), 3.0);

        heap.apply_to_index(1, |_| 0.0);
        assert_eq!(drain(&mut heap), vec![3, 2, 1]);
    }

    #[test]
    fn values_persist_when_inactive() {
        let mut heap = activities(&[(9, 2.0), (0, 1.0)]);
        assert_eq!(heap.count(), 10);
        assert!(!heap.is_active(4));

        assert_eq!(heap.pop_max(), Some(9));
        assert_eq!(*heap.value_at(9), 2.0);

        assert!(heap.activate(9));
        assert!(!heap.activate(9));
        assert_eq!(drain(&mut heap), vec![9, 0]);
    }

    #[test]
    fn removal() {
        let mut heap = activities(&[(1, 1.0), (2, 2.0), (3, 3.0), (4, 4.0)]);

        assert!(heap.remove(3));
        assert!(!heap.remove(3));
        assert!(!heap.add(3, 10.0));
        assert_eq!(drain(&mut heap), vec![4, 2, 1]);

        heap.activate(3);
        assert_eq!(drain(&mut heap), vec![3]);
    }
}
