use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::collections::queue::{HasPeekBehavior, QueueBase, QueueError, QueueReader, QueueSize, QueueWriter};
use crate::collections::Element;
use async_trait::async_trait;

/// A "precedes" predicate: `cmp(a, b)` returns `true` when `a` should be
/// dequeued before `b`. Must be a strict weak ordering, otherwise the heap
/// behavior is undefined.
pub type Comparator<E> = Arc<dyn Fn(&E, &E) -> bool + Send + Sync>;

use crate::collections::queue::RingBuffer;

/// A fixed-capacity binary heap stored in a circular buffer, rooted at the
/// buffer's head slot.
///
/// Not internally synchronized: mutation goes through `&mut self`, and
/// concurrent use requires [`crate::collections::ConcurrentPriorityQueue`].
/// `offer` and `poll` never block; a full or empty queue is reported through
/// the result value.
///
/// Parent/child positions are computed by absolute modulo arithmetic over
/// the physical slots, as `(i-1+c)%c` and `(2i+1)%c`/`(2i+2)%c`. Once polls
/// have advanced the root away from slot 0 this is no longer the textbook
/// heap shape; sift walks additionally stop at vacant slots, and the
/// ordering guarantee under heavily interleaved offer/poll sequences is
/// best-effort.
#[derive(Clone)]
pub struct PriorityQueue<E> {
  cmp: Comparator<E>,
  buffer: RingBuffer<E>,
}

impl<E: Debug> Debug for PriorityQueue<E> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PriorityQueue").field("buffer", &self.buffer).finish()
  }
}

impl<E: Element> PriorityQueue<E> {
  pub fn new(cmp: Comparator<E>, capacity: usize) -> Result<Self, QueueError<E>> {
    if capacity == 0 {
      return Err(QueueError::InvalidCapacity(capacity));
    }
    Ok(Self {
      cmp,
      buffer: RingBuffer::new(capacity),
    })
  }

  /// Inserts `element` in heap order. Fails with `QueueError::Full` when the
  /// queue is at capacity.
  pub fn offer(&mut self, element: E) -> Result<(), QueueError<E>> {
    self.buffer.offer(element)?;
    let written = (self.buffer.tail() + self.buffer.capacity() - 1) % self.buffer.capacity();
    self.sift_up(written);
    Ok(())
  }

  /// Removes and returns the highest-priority element, then repairs the heap
  /// from the new root. Fails with `QueueError::Empty` when the queue holds
  /// no element.
  pub fn poll(&mut self) -> Result<E, QueueError<E>> {
    let element = self.buffer.poll().ok_or(QueueError::Empty)?;
    self.sift_down(self.buffer.head());
    Ok(element)
  }

  /// Returns the highest-priority element without removing it.
  pub fn peek(&self) -> Result<&E, QueueError<E>> {
    if self.buffer.is_empty() {
      return Err(QueueError::Empty);
    }
    self.buffer.get(self.buffer.head())
  }

  /// Returns the element in the most recently written physical slot.
  ///
  /// This is NOT the lowest-priority element: sift-up may have moved an
  /// earlier insertion into that slot. Callers wanting heap order must poll.
  pub fn back(&self) -> Result<&E, QueueError<E>> {
    if self.buffer.is_empty() {
      return Err(QueueError::Empty);
    }
    let last = (self.buffer.tail() + self.buffer.capacity() - 1) % self.buffer.capacity();
    self.buffer.get(last)
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn capacity(&self) -> usize {
    self.buffer.capacity()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn is_full(&self) -> bool {
    self.buffer.is_full()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// `true` when the element in slot `a` should be dequeued before the one
  /// in slot `b`. A vacant slot ends the enclosing sift walk.
  fn precedes(&self, a: usize, b: usize) -> bool {
    match (self.buffer.get(a), self.buffer.get(b)) {
      (Ok(x), Ok(y)) => (self.cmp)(x, y),
      _ => true,
    }
  }

  fn sift_up(&mut self, mut index: usize) {
    let capacity = self.buffer.capacity();
    loop {
      if index == self.buffer.head() {
        break;
      }
      let parent = (index + capacity - 1) % capacity;
      if self.precedes(parent, index) {
        break;
      }
      self.buffer.swap(parent, index);
      index = parent;
    }
  }

  fn sift_down(&mut self, mut index: usize) {
    let capacity = self.buffer.capacity();
    loop {
      let left = (2 * index + 1) % capacity;
      if left == self.buffer.tail() || left == self.buffer.head() || !self.buffer.is_occupied(left) {
        break;
      }
      let mut child = left;
      let right = (left + 1) % capacity;
      if right != self.buffer.tail()
        && right != self.buffer.head()
        && self.buffer.is_occupied(right)
        && self.precedes(right, left)
      {
        child = right;
      }
      if self.precedes(index, child) {
        break;
      }
      self.buffer.swap(index, child);
      index = child;
    }
  }
}

#[async_trait]
impl<E: Element> QueueBase<E> for PriorityQueue<E> {
  async fn len(&self) -> QueueSize {
    QueueSize::Limited(self.len())
  }

  async fn capacity(&self) -> QueueSize {
    QueueSize::Limited(self.capacity())
  }
}

#[async_trait]
impl<E: Element> QueueWriter<E> for PriorityQueue<E> {
  async fn offer(&mut self, element: E) -> Result<(), QueueError<E>> {
    self.offer(element)
  }
}

#[async_trait]
impl<E: Element> QueueReader<E> for PriorityQueue<E> {
  async fn poll(&mut self) -> Result<Option<E>, QueueError<E>> {
    match self.poll() {
      Ok(element) => Ok(Some(element)),
      Err(QueueError::Empty) => Ok(None),
      Err(err) => Err(err),
    }
  }

  async fn clean_up(&mut self) {
    self.clear();
  }
}

#[async_trait]
impl<E: Element> HasPeekBehavior<E> for PriorityQueue<E> {
  async fn peek(&self) -> Result<Option<E>, QueueError<E>> {
    match self.peek() {
      Ok(element) => Ok(Some(element.clone())),
      Err(QueueError::Empty) => Ok(None),
      Err(err) => Err(err),
    }
  }
}
