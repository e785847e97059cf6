use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crossbeam_epoch::{self as epoch, Atomic, Owned, Shared};

use crate::collections::queue::{HasPeekBehavior, QueueBase, QueueError, QueueReader, QueueSize, QueueWriter};
use crate::collections::Element;
use async_trait::async_trait;

/// An unbounded FIFO supporting concurrent `push`/`pop` from many threads
/// without locks, based on atomic pointer compare-and-swap over a
/// singly-linked chain.
///
/// The chain always starts with a dummy node holding no value; the logical
/// first element is `head.next`. `tail` may briefly lag behind the true end
/// of the chain while a push is in flight, which is resolved by the pushing
/// thread's second compare-and-swap. Unlinked nodes are reclaimed through
/// epoch-based garbage collection, so a node is never freed while another
/// thread still dereferences it.
///
/// `len` is kept in a separate counter and is only eventually consistent
/// with the true chain length.
#[derive(Debug, Clone)]
pub struct LockFreeQueue<E> {
  inner: Arc<QueueCore<E>>,
}

#[derive(Debug)]
struct QueueCore<E> {
  head: Atomic<Node<E>>,
  tail: Atomic<Node<E>>,
  len: AtomicUsize,
}

#[derive(Debug)]
struct Node<E> {
  value: Option<E>,
  next: Atomic<Node<E>>,
}

impl<E: Element> LockFreeQueue<E> {
  pub fn new() -> Self {
    let guard = epoch::pin();
    let dummy = Owned::new(Node {
      value: None,
      next: Atomic::null(),
    })
    .into_shared(&guard);
    Self {
      inner: Arc::new(QueueCore {
        head: Atomic::from(dummy),
        tail: Atomic::from(dummy),
        len: AtomicUsize::new(0),
      }),
    }
  }

  /// Appends `element` to the end of the queue. Never waits; retries
  /// internally until the link is installed.
  pub fn push(&self, element: E) {
    let guard = epoch::pin();
    let mut new_node = Owned::new(Node {
      value: Some(element),
      next: Atomic::null(),
    });
    loop {
      let tail = self.inner.tail.load(Ordering::Acquire, &guard);
      let tail_ref = unsafe { tail.deref() };
      let next = tail_ref.next.load(Ordering::Acquire, &guard);
      if !next.is_null() {
        // Another thread has linked a node but not yet advanced the tail.
        // Retry and let that thread swing it forward.
        continue;
      }
      match tail_ref
        .next
        .compare_exchange(Shared::null(), new_node, Ordering::Release, Ordering::Relaxed, &guard)
      {
        Ok(linked) => {
          // Best-effort: if another thread already advanced the tail this
          // CAS fails, which is fine.
          let _ = self
            .inner
            .tail
            .compare_exchange(tail, linked, Ordering::Release, Ordering::Relaxed, &guard);
          self.inner.len.fetch_add(1, Ordering::Relaxed);
          return;
        }
        Err(err) => {
          new_node = err.new;
        }
      }
    }
  }

  /// Removes and returns the first element. Returns `QueueError::Empty` when
  /// `head == tail` at the moment of the consistency check; a concurrent
  /// in-flight push may still be observed as empty.
  pub fn pop(&self) -> Result<E, QueueError<E>> {
    let guard = epoch::pin();
    loop {
      let head = self.inner.head.load(Ordering::Acquire, &guard);
      let tail = self.inner.tail.load(Ordering::Acquire, &guard);
      if head == tail {
        return Err(QueueError::Empty);
      }
      // head != tail, so the head node has a successor; `next` only ever
      // transitions from null to a node, never back.
      let next = unsafe { head.deref() }.next.load(Ordering::Acquire, &guard);
      match self
        .inner
        .head
        .compare_exchange(head, next, Ordering::Release, Ordering::Relaxed, &guard)
      {
        Ok(_) => {
          self.inner.len.fetch_sub(1, Ordering::Relaxed);
          let value = unsafe { next.deref() }.value.clone();
          // The old head is unreachable from the head pointer now; the epoch
          // scheme frees it once no thread can still be reading it.
          unsafe {
            guard.defer_destroy(head);
          }
          return value.ok_or(QueueError::Empty);
        }
        Err(_) => continue,
      }
    }
  }

  /// Returns the first element without removing it. Not necessarily
  /// real-time: the queue may be updated concurrently.
  pub fn front(&self) -> Result<E, QueueError<E>> {
    if self.is_empty() {
      return Err(QueueError::Empty);
    }
    let guard = epoch::pin();
    let head = self.inner.head.load(Ordering::Acquire, &guard);
    let next = unsafe { head.deref() }.next.load(Ordering::Acquire, &guard);
    unsafe { next.as_ref() }
      .and_then(|node| node.value.clone())
      .ok_or(QueueError::Empty)
  }

  /// Returns the last element without removing it. Not necessarily
  /// real-time: the queue may be updated concurrently.
  pub fn back(&self) -> Result<E, QueueError<E>> {
    if self.is_empty() {
      return Err(QueueError::Empty);
    }
    let guard = epoch::pin();
    let tail = self.inner.tail.load(Ordering::Acquire, &guard);
    unsafe { tail.deref() }.value.clone().ok_or(QueueError::Empty)
  }

  /// The approximate number of elements; eventually consistent with the
  /// true chain length.
  pub fn len(&self) -> usize {
    self.inner.len.load(Ordering::Relaxed)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Removes elements until the queue observes empty. Not atomic as a
  /// whole: concurrent pushes may land between iterations.
  pub fn clear(&self) {
    while self.pop().is_ok() {}
  }

  /// A best-effort snapshot of the queue contents in FIFO order.
  pub fn to_vec(&self) -> Vec<E> {
    let guard = epoch::pin();
    let mut out = Vec::with_capacity(self.len());
    let head = self.inner.head.load(Ordering::Acquire, &guard);
    let mut current = unsafe { head.deref() }.next.load(Ordering::Acquire, &guard);
    while let Some(node) = unsafe { current.as_ref() } {
      if let Some(value) = node.value.clone() {
        out.push(value);
      }
      current = node.next.load(Ordering::Acquire, &guard);
    }
    out
  }
}

impl<E: Element> Default for LockFreeQueue<E> {
  fn default() -> Self {
    Self::new()
  }
}

impl<E> Drop for QueueCore<E> {
  fn drop(&mut self) {
    // No handle is left at this point, so the chain can be freed eagerly.
    unsafe {
      let guard = epoch::unprotected();
      let mut current = self.head.load(Ordering::Relaxed, guard);
      while !current.is_null() {
        let next = current.deref().next.load(Ordering::Relaxed, guard);
        drop(current.into_owned());
        current = next;
      }
    }
  }
}

#[async_trait]
impl<E: Element> QueueBase<E> for LockFreeQueue<E> {
  async fn len(&self) -> QueueSize {
    QueueSize::Limited(self.len())
  }

  async fn capacity(&self) -> QueueSize {
    QueueSize::Limitless
  }
}

#[async_trait]
impl<E: Element> QueueWriter<E> for LockFreeQueue<E> {
  async fn offer(&mut self, element: E) -> Result<(), QueueError<E>> {
    self.push(element);
    Ok(())
  }
}

#[async_trait]
impl<E: Element> QueueReader<E> for LockFreeQueue<E> {
  async fn poll(&mut self) -> Result<Option<E>, QueueError<E>> {
    match self.pop() {
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
impl<E: Element> HasPeekBehavior<E> for LockFreeQueue<E> {
  async fn peek(&self) -> Result<Option<E>, QueueError<E>> {
    match self.front() {
      Ok(element) => Ok(Some(element)),
      Err(QueueError::Empty) => Ok(None),
      Err(err) => Err(err),
    }
  }
}
