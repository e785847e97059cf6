use std::sync::Arc;

use crate::collections::queue::{
  Comparator, HasPeekBehavior, PriorityQueue, QueueBase, QueueError, QueueReader, QueueSize, QueueWriter,
};
use crate::collections::Element;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// A thread-safe wrapper around [`PriorityQueue`] using a single
/// readers-writer lock: `offer`/`poll`/`clear` take the exclusive lock,
/// observations take the shared lock.
///
/// Unlike [`crate::collections::ArrayBlockingQueue`], `offer` on a full
/// queue fails immediately instead of waiting for a free slot.
#[derive(Debug, Clone)]
pub struct ConcurrentPriorityQueue<E> {
  underlying: Arc<RwLock<PriorityQueue<E>>>,
}

impl<E: Element> ConcurrentPriorityQueue<E> {
  pub fn new(cmp: Comparator<E>, capacity: usize) -> Result<Self, QueueError<E>> {
    Ok(Self {
      underlying: Arc::new(RwLock::new(PriorityQueue::new(cmp, capacity)?)),
    })
  }

  pub async fn offer(&self, element: E) -> Result<(), QueueError<E>> {
    let mut queue = self.underlying.write().await;
    queue.offer(element)
  }

  pub async fn poll(&self) -> Result<E, QueueError<E>> {
    let mut queue = self.underlying.write().await;
    queue.poll()
  }

  pub async fn peek(&self) -> Result<E, QueueError<E>> {
    let queue = self.underlying.read().await;
    queue.peek().map(|element| element.clone())
  }

  /// See [`PriorityQueue::back`]: the most recently written physical slot,
  /// not the lowest-priority element.
  pub async fn back(&self) -> Result<E, QueueError<E>> {
    let queue = self.underlying.read().await;
    queue.back().map(|element| element.clone())
  }

  pub async fn len(&self) -> usize {
    let queue = self.underlying.read().await;
    queue.len()
  }

  pub async fn capacity(&self) -> usize {
    let queue = self.underlying.read().await;
    queue.capacity()
  }

  pub async fn is_empty(&self) -> bool {
    let queue = self.underlying.read().await;
    queue.is_empty()
  }

  pub async fn is_full(&self) -> bool {
    let queue = self.underlying.read().await;
    queue.is_full()
  }

  pub async fn clear(&self) {
    let mut queue = self.underlying.write().await;
    queue.clear();
  }
}

#[async_trait]
impl<E: Element> QueueBase<E> for ConcurrentPriorityQueue<E> {
  async fn len(&self) -> QueueSize {
    QueueSize::Limited(self.len().await)
  }

  async fn capacity(&self) -> QueueSize {
    QueueSize::Limited(self.capacity().await)
  }
}

#[async_trait]
impl<E: Element> QueueWriter<E> for ConcurrentPriorityQueue<E> {
  async fn offer(&mut self, element: E) -> Result<(), QueueError<E>> {
    ConcurrentPriorityQueue::offer(self, element).await
  }
}

#[async_trait]
impl<E: Element> QueueReader<E> for ConcurrentPriorityQueue<E> {
  async fn poll(&mut self) -> Result<Option<E>, QueueError<E>> {
    match ConcurrentPriorityQueue::poll(self).await {
      Ok(element) => Ok(Some(element)),
      Err(QueueError::Empty) => Ok(None),
      Err(err) => Err(err),
    }
  }

  async fn clean_up(&mut self) {
    self.clear().await;
  }
}

#[async_trait]
impl<E: Element> HasPeekBehavior<E> for ConcurrentPriorityQueue<E> {
  async fn peek(&self) -> Result<Option<E>, QueueError<E>> {
    match ConcurrentPriorityQueue::peek(self).await {
      Ok(element) => Ok(Some(element)),
      Err(QueueError::Empty) => Ok(None),
      Err(err) => Err(err),
    }
  }
}
