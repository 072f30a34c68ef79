//! Fixed-capacity FIFO.

/// Bounded queue that overwrites its oldest element when full.
///
/// Used both as the two-slot occurrence store of every pattern row and as the
/// buffer of pending prefix ends in [`crate::ExactMatcher`].
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    len: usize,
}

impl<T> RingBuffer<T> {
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "ring buffer capacity must be positive");
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    #[inline]
    fn physical(&self, offset: usize) -> usize {
        (self.head + offset) % self.slots.len()
    }

    /// Append `value`, returning the evicted oldest element if the buffer
    /// was full.
    pub fn push_back(&mut self, value: T) -> Option<T> {
        if self.is_full() {
            let evicted = self.slots[self.head].replace(value);
            self.head = self.physical(1);
            return evicted;
        }
        let tail = self.physical(self.len);
        self.slots[tail] = Some(value);
        self.len += 1;
        None
    }

    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.slots[self.head].take();
        self.head = self.physical(1);
        self.len -= 1;
        value
    }

    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|last| self.get(last))
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.get_mut(0)
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        let last = self.len.checked_sub(1)?;
        self.get_mut(last)
    }

    /// Element `offset` places after the oldest.
    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.len {
            return None;
        }
        self.slots[self.physical(offset)].as_ref()
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        if offset >= self.len {
            return None;
        }
        let slot = self.physical(offset);
        self.slots[slot].as_mut()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |offset| self.get(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_pop_in_order() {
        let mut ring = RingBuffer::with_capacity(3);
        assert!(ring.is_empty());
        assert_eq!(ring.push_back(1), None);
        assert_eq!(ring.push_back(2), None);
        assert_eq!(ring.front(), Some(&1));
        assert_eq!(ring.back(), Some(&2));
        assert_eq!(ring.pop_front(), Some(1));
        assert_eq!(ring.pop_front(), Some(2));
        assert_eq!(ring.pop_front(), None);
        assert_eq!(ring.back(), None);
    }

    #[test]
    fn full_buffer_evicts_oldest() {
        let mut ring = RingBuffer::with_capacity(2);
        ring.push_back('a');
        ring.push_back('b');
        assert!(ring.is_full());
        assert_eq!(ring.push_back('c'), Some('a'));
        assert_eq!(ring.len(), 2);
        assert_eq!(ring.iter().copied().collect::<String>(), "bc");
    }

    #[test]
    fn wraps_around_many_times() {
        let mut ring = RingBuffer::with_capacity(4);
        for i in 0..50usize {
            ring.push_back(i);
            if i % 3 == 0 {
                ring.pop_front();
            }
        }
        let items: Vec<usize> = ring.iter().copied().collect();
        assert_eq!(items, vec![46, 47, 48, 49]);
        assert_eq!(ring.get(1), Some(&47));
        assert_eq!(ring.get(4), None);
    }

    #[test]
    fn mutable_ends() {
        let mut ring = RingBuffer::with_capacity(2);
        ring.push_back(10);
        ring.push_back(20);
        if let Some(front) = ring.front_mut() {
            *front += 1;
        }
        if let Some(back) = ring.back_mut() {
            *back += 2;
        }
        assert_eq!(ring.iter().copied().collect::<Vec<_>>(), vec![11, 22]);
    }

    #[test]
    fn clear_resets() {
        let mut ring = RingBuffer::with_capacity(2);
        ring.push_back(1);
        ring.push_back(2);
        ring.push_back(3);
        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.capacity(), 2);
        ring.push_back(4);
        assert_eq!(ring.front(), Some(&4));
    }

    #[test]
    #[should_panic(expected = "capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = RingBuffer::<u8>::with_capacity(0);
    }
}
