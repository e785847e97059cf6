use std::cmp::Ordering;
use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;

use thiserror::Error;

mod blocking_queue;
mod concurrent_priority_queue;
mod concurrent_priority_queue_test;
mod lock_free_queue;
mod priority_queue;
mod priority_queue_test;
mod ring_buffer;
mod ring_buffer_test;

pub use self::{blocking_queue::*, concurrent_priority_queue::*, lock_free_queue::*, priority_queue::*, ring_buffer::*};

use crate::collections::element::Element;

/// An error that occurs when a queue operation fails.<br/>
/// キューの操作に失敗した場合に発生するエラー。
///
/// Every variant is recoverable: callers are expected to match on the kind,
/// never on the message text.
#[derive(Error, Debug, PartialEq)]
pub enum QueueError<E> {
  /// The queue has no free slot; the rejected element is handed back.<br/>
  /// キューに空きがないため、要素をそのまま返します。
  #[error("Failed to offer an element: {0:?}: the queue is full")]
  Full(E),
  /// The queue holds no element.<br/>
  /// キューに要素がありません。
  #[error("Failed to poll an element: the queue is empty")]
  Empty,
  /// A bounded queue cannot be constructed with the requested capacity.<br/>
  /// 指定された容量ではキューを構築できません。
  #[error("Invalid queue capacity: {0}")]
  InvalidCapacity(usize),
  /// A slot access fell outside the occupied range.<br/>
  /// 占有範囲外のスロットへアクセスしました。
  #[error("Index out of range: [{index}] with length: {len}")]
  IndexOutOfRange { index: usize, len: usize },
  /// A blocking wait was cancelled or interrupted before a slot or an
  /// element became available. The queue state is untouched.<br/>
  /// ブロッキング待機がキャンセルされました。キューの状態は変更されません。
  #[error("The operation was cancelled")]
  Cancelled,
  /// A blocking wait reached its deadline. The queue state is untouched.<br/>
  /// ブロッキング待機がタイムアウトしました。キューの状態は変更されません。
  #[error("The operation timed out")]
  TimedOut,
}

/// The size of the queue.<br/>
/// キューのサイズ。
#[derive(Debug, Clone)]
pub enum QueueSize {
  /// The queue has no capacity limit.<br/>
  /// キューに容量制限がない。
  Limitless,
  /// The queue has a capacity limit.<br/>
  /// キューに容量制限がある。
  Limited(usize),
}

impl QueueSize {
  /// Returns whether the queue has no capacity limit.<br/>
  /// キューに容量制限がないかどうかを返します。
  pub fn is_limitless(&self) -> bool {
    matches!(self, QueueSize::Limitless)
  }

  /// Converts to an option type: `None` when limitless.<br/>
  /// オプション型に変換します。容量制限がない場合は `None`。
  pub fn to_option(&self) -> Option<usize> {
    match self {
      QueueSize::Limitless => None,
      QueueSize::Limited(c) => Some(*c),
    }
  }

  /// Converts to a usize, mapping `Limitless` to `usize::MAX`.<br/>
  /// usize型に変換します。容量制限がない場合は `usize::MAX`。
  pub fn to_usize(&self) -> usize {
    match self {
      QueueSize::Limitless => usize::MAX,
      QueueSize::Limited(c) => *c,
    }
  }
}

impl PartialEq<Self> for QueueSize {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (QueueSize::Limitless, QueueSize::Limitless) => true,
      (QueueSize::Limited(l), QueueSize::Limited(r)) => l == r,
      _ => false,
    }
  }
}

impl PartialOrd<Self> for QueueSize {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    match (self, other) {
      (QueueSize::Limitless, QueueSize::Limitless) => Some(Ordering::Equal),
      (QueueSize::Limitless, _) => Some(Ordering::Greater),
      (_, QueueSize::Limitless) => Some(Ordering::Less),
      (QueueSize::Limited(l), QueueSize::Limited(r)) => l.partial_cmp(r),
    }
  }
}

/// A trait that defines the behavior of a queue.<br/>
/// キューの振る舞いを定義するトレイト。
#[async_trait]
pub trait QueueBase<E: Element>: Debug + Send + Sync {
  /// Returns whether this queue is empty.<br/>
  /// このキューが空かどうかを返します。
  async fn is_empty(&self) -> bool {
    self.len().await == QueueSize::Limited(0)
  }

  /// Returns whether this queue is non-empty.<br/>
  /// このキューが空でないかどうかを返します。
  async fn non_empty(&self) -> bool {
    !self.is_empty().await
  }

  /// Returns whether the queue size has reached its capacity.<br/>
  /// このキューのサイズが容量まで到達したかどうかを返します。
  async fn is_full(&self) -> bool {
    self.capacity().await == self.len().await
  }

  /// Returns whether the queue size has not reached its capacity.<br/>
  /// このキューのサイズが容量まで到達してないかどうかを返します。
  async fn non_full(&self) -> bool {
    !self.is_full().await
  }

  /// Returns the length of this queue.<br/>
  /// このキューの長さを返します。
  async fn len(&self) -> QueueSize;

  /// Returns the capacity of this queue.<br/>
  /// このキューの最大容量を返します。
  async fn capacity(&self) -> QueueSize;
}

/// A trait that defines the insertion side of a queue.<br/>
/// キューへの挿入側の振る舞いを定義するトレイト。
#[async_trait]
pub trait QueueWriter<E: Element>: QueueBase<E> {
  /// The specified element will be inserted into this queue,
  /// if the queue can accept it immediately without violating the capacity limit.<br/>
  /// 容量制限に違反せずにすぐ実行できる場合は、指定された要素をこのキューに挿入します。
  ///
  /// # Return Value / 戻り値
  /// - `Ok(())` - If the element is inserted successfully. / 要素が正常に挿入された場合。
  /// - `Err(QueueError::Full(element))` - If the queue is full. / キューが満杯の場合。
  async fn offer(&mut self, element: E) -> Result<(), QueueError<E>>;

  /// Inserts all the specified elements, stopping at the first failure.<br/>
  /// 指定された複数の要素を挿入します。失敗した時点で中断します。
  async fn offer_all(&mut self, elements: Vec<E>) -> Result<(), QueueError<E>> {
    for element in elements {
      self.offer(element).await?;
    }
    Ok(())
  }
}

/// A trait that defines the removal side of a queue.<br/>
/// キューからの取り出し側の振る舞いを定義するトレイト。
#[async_trait]
pub trait QueueReader<E: Element>: QueueBase<E> {
  /// Retrieves and deletes the head of the queue. Returns `None` if the queue is empty.<br/>
  /// キューの先頭を取得および削除します。キューが空の場合は `None` を返します。
  async fn poll(&mut self) -> Result<Option<E>, QueueError<E>>;

  /// Discards every element held by the queue.<br/>
  /// キューが保持するすべての要素を破棄します。
  async fn clean_up(&mut self);
}

/// A trait that defines the behavior of a queue that can be peeked.<br/>
/// Peekができるキューの振る舞いを定義するトレイト。
#[async_trait]
pub trait HasPeekBehavior<E: Element>: QueueReader<E> {
  /// Gets the head of the queue, but does not delete it. Returns `None` if the queue is empty.<br/>
  /// キューの先頭を取得しますが、削除しません。キューが空の場合は `None` を返します。
  async fn peek(&self) -> Result<Option<E>, QueueError<E>>;
}

/// A trait that defines the behavior of a blocking queue.<br/>
/// ブロッキングキューの振る舞いを定義するトレイト。
#[async_trait]
pub trait BlockingQueueBase<E: Element>: QueueBase<E> {
  /// Returns the number of elements that can be inserted into this queue without blocking.<br/>
  /// ブロックせずにこのキューに挿入できる要素数を返します。
  async fn remaining_capacity(&self) -> QueueSize;

  /// Returns whether the operation of this queue has been interrupted.<br/>
  /// このキューの操作が中断されたかどうかを返します。
  async fn is_interrupted(&self) -> bool;
}

/// The blocking insertion side: waits until a free slot exists.<br/>
/// ブロッキング挿入側。空きが生じるまで待機します。
#[async_trait]
pub trait BlockingQueueWriter<E: Element>: BlockingQueueBase<E> + QueueWriter<E> {
  /// Inserts the specified element, waiting for a free slot if necessary.<br/>
  /// 指定された要素を挿入します。必要に応じて、空きが生じるまで待機します。
  ///
  /// # Return Value / 戻り値
  /// - `Ok(())` - If the element is inserted successfully. / 要素が正常に挿入された場合。
  /// - `Err(QueueError::Cancelled)` - If the queue is interrupted while waiting. / 待機中に中断された場合。
  async fn put(&mut self, element: E) -> Result<(), QueueError<E>>;

  /// Same as [`BlockingQueueWriter::put`], but gives up once `timeout` has elapsed.<br/>
  /// [`BlockingQueueWriter::put`] と同様ですが、`timeout` 経過後は中断します。
  ///
  /// # Return Value / 戻り値
  /// - `Err(QueueError::TimedOut)` - If no slot became free in time. / 時間内に空きが生じなかった場合。
  async fn put_timeout(&mut self, element: E, timeout: Duration) -> Result<(), QueueError<E>>;

  /// Interrupts the operation of this queue. Every current and future wait
  /// fails with `QueueError::Cancelled`.<br/>
  /// このキューの操作を中断します。
  async fn interrupt(&mut self);
}

/// The blocking removal side: waits until an element exists.<br/>
/// ブロッキング取り出し側。要素が利用可能になるまで待機します。
#[async_trait]
pub trait BlockingQueueReader<E: Element>: BlockingQueueBase<E> + QueueReader<E> {
  /// Retrieves and deletes the head of this queue, waiting for an element if necessary.<br/>
  /// このキューの先頭を取得して削除します。必要に応じて、要素が利用可能になるまで待機します。
  async fn take(&mut self) -> Result<E, QueueError<E>>;

  /// Same as [`BlockingQueueReader::take`], but gives up once `timeout` has elapsed.<br/>
  /// [`BlockingQueueReader::take`] と同様ですが、`timeout` 経過後は中断します。
  async fn take_timeout(&mut self, timeout: Duration) -> Result<E, QueueError<E>>;
}
