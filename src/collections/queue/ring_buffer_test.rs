#[cfg(test)]
mod tests {
  use crate::collections::{QueueError, RingBuffer};

  #[test]
  fn test_new_buffer() {
    let buffer = RingBuffer::<i32>::new(4);
    assert_eq!(buffer.capacity(), 4);
    assert_eq!(buffer.len(), 0);
    assert!(buffer.is_empty());
    assert!(!buffer.is_full());
  }

  #[test]
  #[should_panic(expected = "Capacity must be greater than zero")]
  fn test_zero_capacity_panics() {
    let _ = RingBuffer::<i32>::new(0);
  }

  #[test]
  fn test_offer_until_full() {
    let mut buffer = RingBuffer::new(2);
    assert!(buffer.offer(1).is_ok());
    assert!(buffer.offer(2).is_ok());
    assert!(buffer.is_full());
    assert_eq!(buffer.offer(3), Err(QueueError::Full(3)));
    assert_eq!(buffer.len(), 2);
  }

  #[test]
  fn test_fifo_order_with_wraparound() {
    let mut buffer = RingBuffer::new(3);
    for i in 0..3 {
      assert!(buffer.offer(i).is_ok());
    }
    assert_eq!(buffer.poll(), Some(0));
    assert!(buffer.offer(3).is_ok());

    // The buffer has wrapped; order must survive the wrap.
    assert_eq!(buffer.poll(), Some(1));
    assert_eq!(buffer.poll(), Some(2));
    assert_eq!(buffer.poll(), Some(3));
    assert_eq!(buffer.poll(), None);
  }

  #[test]
  fn test_peek_does_not_remove() {
    let mut buffer = RingBuffer::new(2);
    assert_eq!(buffer.peek(), None);
    assert!(buffer.offer(7).is_ok());
    assert_eq!(buffer.peek(), Some(&7));
    assert_eq!(buffer.len(), 1);
  }

  #[test]
  fn test_get_checked_access() {
    let mut buffer = RingBuffer::new(3);
    assert!(buffer.offer(10).is_ok());
    assert!(buffer.offer(20).is_ok());

    assert_eq!(buffer.get(0), Ok(&10));
    assert_eq!(buffer.get(1), Ok(&20));
    assert!(buffer.is_occupied(1));
    assert!(!buffer.is_occupied(2));

    // Vacant slot and out-of-bounds index both report the same error kind.
    assert_eq!(buffer.get(2), Err(QueueError::IndexOutOfRange { index: 2, len: 2 }));
    assert_eq!(buffer.get(9), Err(QueueError::IndexOutOfRange { index: 9, len: 2 }));
  }

  #[test]
  fn test_clear_resets_indices() {
    let mut buffer = RingBuffer::new(3);
    for i in 0..3 {
      assert!(buffer.offer(i).is_ok());
    }
    assert_eq!(buffer.poll(), Some(0));
    buffer.clear();

    assert!(buffer.is_empty());
    assert_eq!(buffer.head(), 0);
    assert_eq!(buffer.tail(), 0);
    assert!(buffer.offer(42).is_ok());
    assert_eq!(buffer.poll(), Some(42));
  }
}
