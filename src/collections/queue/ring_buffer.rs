use crate::collections::queue::QueueError;

/// A fixed-capacity circular buffer.
///
/// `head` is the next slot to remove, `tail` the next free slot, both taken
/// modulo the capacity. `size` tracks occupancy so that `head == tail` can
/// mean either empty or full. The capacity is immutable after construction.
#[derive(Debug, Clone)]
pub struct RingBuffer<E> {
  slots: Vec<Option<E>>,
  head: usize,
  tail: usize,
  size: usize,
}

impl<E> RingBuffer<E> {
  pub fn new(capacity: usize) -> Self {
    assert!(capacity > 0, "Capacity must be greater than zero");
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    Self {
      slots,
      head: 0,
      tail: 0,
      size: 0,
    }
  }

  /// Writes `element` at the tail slot and advances the tail.
  pub fn offer(&mut self, element: E) -> Result<(), QueueError<E>> {
    if self.is_full() {
      return Err(QueueError::Full(element));
    }
    self.slots[self.tail] = Some(element);
    self.tail = (self.tail + 1) % self.slots.len();
    self.size += 1;
    Ok(())
  }

  /// Removes and returns the element at the head slot, if any.
  pub fn poll(&mut self) -> Option<E> {
    if self.size == 0 {
      return None;
    }
    let element = self.slots[self.head].take();
    self.head = (self.head + 1) % self.slots.len();
    self.size -= 1;
    element
  }

  /// Returns the element at the head slot without removing it.
  pub fn peek(&self) -> Option<&E> {
    self.slots[self.head].as_ref()
  }

  /// Returns the element at the physical slot `index`. Vacant and
  /// out-of-bounds slots both yield `IndexOutOfRange`.
  pub fn get(&self, index: usize) -> Result<&E, QueueError<E>> {
    self
      .slots
      .get(index)
      .and_then(|slot| slot.as_ref())
      .ok_or(QueueError::IndexOutOfRange { index, len: self.size })
  }

  /// Returns whether the physical slot `index` currently holds an element.
  pub fn is_occupied(&self, index: usize) -> bool {
    index < self.slots.len() && self.slots[index].is_some()
  }

  /// Swaps two physical slots. Both indices must be below the capacity.
  pub(crate) fn swap(&mut self, a: usize, b: usize) {
    self.slots.swap(a, b);
  }

  pub fn head(&self) -> usize {
    self.head
  }

  pub fn tail(&self) -> usize {
    self.tail
  }

  pub fn len(&self) -> usize {
    self.size
  }

  pub fn capacity(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.size == 0
  }

  pub fn is_full(&self) -> bool {
    self.size == self.slots.len()
  }

  pub fn clear(&mut self) {
    self.slots.iter_mut().for_each(|slot| *slot = None);
    self.head = 0;
    self.tail = 0;
    self.size = 0;
  }
}
