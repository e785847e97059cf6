use std::sync::Arc;
use std::time::Duration;

use crate::collections::queue::{
  BlockingQueueBase, BlockingQueueReader, BlockingQueueWriter, QueueBase, QueueError, QueueReader, QueueSize,
  QueueWriter, RingBuffer,
};
use crate::collections::Element;
use crate::concurrent::CancellationToken;
use async_trait::async_trait;
use tokio::sync::{Mutex, Semaphore, SemaphorePermit};
use tokio::time::Instant;

/// A bounded FIFO whose `put`/`take` wait until a free slot or an element is
/// available, or until a caller-supplied token or deadline fires.
///
/// Two counting semaphores gate the circular buffer: `not_full` starts at the
/// capacity and meters free slots, `not_empty` starts at zero and meters
/// filled slots. The buffer itself is only touched under a short-lived lock,
/// never across a wait.
#[derive(Debug, Clone)]
pub struct ArrayBlockingQueue<E> {
  inner: Arc<Inner<E>>,
}

#[derive(Debug)]
struct Inner<E> {
  state: Mutex<RingBuffer<E>>,
  not_full: Semaphore,
  not_empty: Semaphore,
  capacity: usize,
  interrupt: CancellationToken,
}

impl<E: Element> ArrayBlockingQueue<E> {
  pub fn new(capacity: usize) -> Self {
    Self {
      inner: Arc::new(Inner {
        state: Mutex::new(RingBuffer::new(capacity)),
        not_full: Semaphore::new(capacity),
        not_empty: Semaphore::new(0),
        capacity,
        interrupt: CancellationToken::new(),
      }),
    }
  }

  async fn acquire_free_slot(&self, token: &CancellationToken) -> Result<SemaphorePermit<'_>, QueueError<E>> {
    tokio::select! {
      acquired = self.inner.not_full.acquire() => acquired.map_err(|_| QueueError::Cancelled),
      _ = token.cancelled() => Err(QueueError::Cancelled),
      _ = self.inner.interrupt.cancelled() => Err(QueueError::Cancelled),
    }
  }

  async fn acquire_element(&self, token: &CancellationToken) -> Result<SemaphorePermit<'_>, QueueError<E>> {
    tokio::select! {
      acquired = self.inner.not_empty.acquire() => acquired.map_err(|_| QueueError::Cancelled),
      _ = token.cancelled() => Err(QueueError::Cancelled),
      _ = self.inner.interrupt.cancelled() => Err(QueueError::Cancelled),
    }
  }

  /// Inserts `element`, waiting for a free slot. Fails with
  /// `QueueError::Cancelled` once `token` (or the queue interrupt) fires.
  ///
  /// The wait and the buffer mutation are not atomic together: a token that
  /// fires between the slot acquisition and the lock acquisition is detected
  /// by a re-check under the lock, which hands the slot back untouched.
  pub async fn put_with(&self, element: E, token: &CancellationToken) -> Result<(), QueueError<E>> {
    let permit = self.acquire_free_slot(token).await?;
    let mut state = self.inner.state.lock().await;
    if token.is_cancelled() || self.inner.interrupt.is_cancelled() {
      drop(permit);
      return Err(QueueError::Cancelled);
    }
    state.offer(element)?;
    permit.forget();
    self.inner.not_empty.add_permits(1);
    Ok(())
  }

  /// Inserts `element`, waiting at most `timeout` for a free slot. Fails
  /// with `QueueError::Cancelled` once the queue interrupt fires.
  pub async fn put_timeout(&self, element: E, timeout: Duration) -> Result<(), QueueError<E>> {
    let deadline = Instant::now() + timeout;
    let permit = tokio::select! {
      acquired = tokio::time::timeout_at(deadline, self.inner.not_full.acquire()) => match acquired {
        Ok(acquired) => acquired.map_err(|_| QueueError::Cancelled)?,
        Err(_) => return Err(QueueError::TimedOut),
      },
      _ = self.inner.interrupt.cancelled() => return Err(QueueError::Cancelled),
    };
    let mut state = self.inner.state.lock().await;
    if Instant::now() >= deadline {
      drop(permit);
      return Err(QueueError::TimedOut);
    }
    if self.inner.interrupt.is_cancelled() {
      drop(permit);
      return Err(QueueError::Cancelled);
    }
    state.offer(element)?;
    permit.forget();
    self.inner.not_empty.add_permits(1);
    Ok(())
  }

  /// Removes and returns the head element, waiting until one exists. Fails
  /// with `QueueError::Cancelled` once `token` (or the queue interrupt) fires.
  pub async fn take_with(&self, token: &CancellationToken) -> Result<E, QueueError<E>> {
    let permit = self.acquire_element(token).await?;
    let mut state = self.inner.state.lock().await;
    if token.is_cancelled() || self.inner.interrupt.is_cancelled() {
      drop(permit);
      return Err(QueueError::Cancelled);
    }
    match state.poll() {
      Some(element) => {
        permit.forget();
        self.inner.not_full.add_permits(1);
        Ok(element)
      }
      None => Err(QueueError::Empty),
    }
  }

  /// Removes and returns the head element, waiting at most `timeout`. Fails
  /// with `QueueError::Cancelled` once the queue interrupt fires.
  pub async fn take_timeout(&self, timeout: Duration) -> Result<E, QueueError<E>> {
    let deadline = Instant::now() + timeout;
    let permit = tokio::select! {
      acquired = tokio::time::timeout_at(deadline, self.inner.not_empty.acquire()) => match acquired {
        Ok(acquired) => acquired.map_err(|_| QueueError::Cancelled)?,
        Err(_) => return Err(QueueError::TimedOut),
      },
      _ = self.inner.interrupt.cancelled() => return Err(QueueError::Cancelled),
    };
    let mut state = self.inner.state.lock().await;
    if Instant::now() >= deadline {
      drop(permit);
      return Err(QueueError::TimedOut);
    }
    if self.inner.interrupt.is_cancelled() {
      drop(permit);
      return Err(QueueError::Cancelled);
    }
    match state.poll() {
      Some(element) => {
        permit.forget();
        self.inner.not_full.add_permits(1);
        Ok(element)
      }
      None => Err(QueueError::Empty),
    }
  }

  /// Inserts `element` only if a free slot exists right now.
  pub async fn offer(&self, element: E) -> Result<(), QueueError<E>> {
    match self.inner.not_full.try_acquire() {
      Ok(permit) => {
        let mut state = self.inner.state.lock().await;
        state.offer(element)?;
        permit.forget();
        self.inner.not_empty.add_permits(1);
        Ok(())
      }
      Err(_) => Err(QueueError::Full(element)),
    }
  }

  /// Removes and returns the head element only if one exists right now.
  pub async fn poll(&self) -> Result<Option<E>, QueueError<E>> {
    match self.inner.not_empty.try_acquire() {
      Ok(permit) => {
        let mut state = self.inner.state.lock().await;
        match state.poll() {
          Some(element) => {
            permit.forget();
            self.inner.not_full.add_permits(1);
            Ok(Some(element))
          }
          None => Ok(None),
        }
      }
      Err(_) => Ok(None),
    }
  }

  pub async fn len(&self) -> QueueSize {
    let state = self.inner.state.lock().await;
    QueueSize::Limited(state.len())
  }

  pub fn capacity(&self) -> QueueSize {
    QueueSize::Limited(self.inner.capacity)
  }

  pub async fn remaining_capacity(&self) -> QueueSize {
    let state = self.inner.state.lock().await;
    QueueSize::Limited(self.inner.capacity - state.len())
  }

  /// Wakes every current waiter and makes every future wait fail with
  /// `QueueError::Cancelled`.
  pub fn interrupt(&self) {
    tracing::debug!("ArrayBlockingQueue: interrupting waiters");
    self.inner.interrupt.cancel();
  }

  pub fn is_interrupted(&self) -> bool {
    self.inner.interrupt.is_cancelled()
  }

  /// Discards every buffered element, keeping the slot accounting intact.
  pub async fn clean_up(&self) {
    let mut discarded = 0usize;
    while let Ok(Some(_)) = self.poll().await {
      discarded += 1;
    }
    tracing::debug!("ArrayBlockingQueue: cleaned up {} elements", discarded);
  }
}

#[async_trait]
impl<E: Element> QueueBase<E> for ArrayBlockingQueue<E> {
  async fn len(&self) -> QueueSize {
    self.len().await
  }

  async fn capacity(&self) -> QueueSize {
    self.capacity()
  }
}

#[async_trait]
impl<E: Element> QueueWriter<E> for ArrayBlockingQueue<E> {
  async fn offer(&mut self, element: E) -> Result<(), QueueError<E>> {
    ArrayBlockingQueue::offer(self, element).await
  }
}

#[async_trait]
impl<E: Element> QueueReader<E> for ArrayBlockingQueue<E> {
  async fn poll(&mut self) -> Result<Option<E>, QueueError<E>> {
    ArrayBlockingQueue::poll(self).await
  }

  async fn clean_up(&mut self) {
    ArrayBlockingQueue::clean_up(self).await;
  }
}

#[async_trait]
impl<E: Element> BlockingQueueBase<E> for ArrayBlockingQueue<E> {
  async fn remaining_capacity(&self) -> QueueSize {
    self.remaining_capacity().await
  }

  async fn is_interrupted(&self) -> bool {
    self.is_interrupted()
  }
}

#[async_trait]
impl<E: Element> BlockingQueueWriter<E> for ArrayBlockingQueue<E> {
  async fn put(&mut self, element: E) -> Result<(), QueueError<E>> {
    self.put_with(element, &CancellationToken::new()).await
  }

  async fn put_timeout(&mut self, element: E, timeout: Duration) -> Result<(), QueueError<E>> {
    ArrayBlockingQueue::put_timeout(self, element, timeout).await
  }

  async fn interrupt(&mut self) {
    ArrayBlockingQueue::interrupt(self);
  }
}

#[async_trait]
impl<E: Element> BlockingQueueReader<E> for ArrayBlockingQueue<E> {
  async fn take(&mut self) -> Result<E, QueueError<E>> {
    self.take_with(&CancellationToken::new()).await
  }

  async fn take_timeout(&mut self, timeout: Duration) -> Result<E, QueueError<E>> {
    ArrayBlockingQueue::take_timeout(self, timeout).await
  }
}
