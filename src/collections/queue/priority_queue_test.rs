#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use crate::collections::element::Element;
  use crate::collections::{Comparator, PriorityQueue, QueueError};

  #[derive(Debug, Clone, PartialEq)]
  struct Person {
    name: &'static str,
    age: u8,
  }

  impl Element for Person {}

  fn younger_first() -> Comparator<Person> {
    Arc::new(|a: &Person, b: &Person| a.age < b.age)
  }

  fn person(name: &'static str, age: u8) -> Person {
    Person { name, age }
  }

  #[test]
  fn test_invalid_capacity() {
    let result = PriorityQueue::<Person>::new(younger_first(), 0);
    assert_eq!(result.err(), Some(QueueError::InvalidCapacity(0)));
  }

  #[test]
  fn test_empty_queue() {
    let mut queue = PriorityQueue::<Person>::new(younger_first(), 3).unwrap();
    assert!(queue.is_empty());
    assert!(!queue.is_full());
    assert_eq!(queue.capacity(), 3);
    assert_eq!(queue.poll(), Err(QueueError::Empty));
    assert_eq!(queue.peek(), Err(QueueError::Empty));
    assert_eq!(queue.back(), Err(QueueError::Empty));
  }

  #[test]
  fn test_heap_ordering() {
    let mut queue = PriorityQueue::new(younger_first(), 3).unwrap();
    assert!(queue.offer(person("Alice", 30)).is_ok());
    assert!(queue.offer(person("Bob", 25)).is_ok());
    assert!(queue.offer(person("Charlie", 35)).is_ok());
    assert!(queue.is_full());

    assert_eq!(queue.peek(), Ok(&person("Bob", 25)));
    assert_eq!(queue.poll(), Ok(person("Bob", 25)));
    assert_eq!(queue.poll(), Ok(person("Alice", 30)));
    assert_eq!(queue.poll(), Ok(person("Charlie", 35)));
    assert_eq!(queue.poll(), Err(QueueError::Empty));
  }

  #[test]
  fn test_full_queue_rejects_offer() {
    let mut queue = PriorityQueue::new(younger_first(), 3).unwrap();
    assert!(queue.offer(person("Alice", 30)).is_ok());
    assert!(queue.offer(person("Bob", 25)).is_ok());
    assert!(queue.offer(person("Charlie", 35)).is_ok());

    let rejected = queue.offer(person("David", 40));
    assert_eq!(rejected, Err(QueueError::Full(person("David", 40))));
    assert_eq!(queue.len(), 3);
  }

  #[test]
  fn test_back_returns_raw_slot() {
    let mut queue = PriorityQueue::new(younger_first(), 3).unwrap();
    assert!(queue.offer(person("Alice", 20)).is_ok());
    assert!(queue.offer(person("Bob", 30)).is_ok());
    assert!(queue.offer(person("Charlie", 10)).is_ok());

    assert_eq!(queue.peek(), Ok(&person("Charlie", 10)));
    // Charlie sifted up through the last-written slot, leaving Bob there:
    // back() reports the physical slot, not the lowest priority.
    assert_eq!(queue.back(), Ok(&person("Bob", 30)));
  }

  #[test]
  fn test_clear_and_reuse() {
    let mut queue = PriorityQueue::new(younger_first(), 3).unwrap();
    assert!(queue.offer(person("Alice", 20)).is_ok());
    assert!(queue.offer(person("Bob", 30)).is_ok());
    queue.clear();

    assert!(queue.is_empty());
    assert_eq!(queue.capacity(), 3);
    assert!(queue.offer(person("Charlie", 10)).is_ok());
    assert_eq!(queue.poll(), Ok(person("Charlie", 10)));
  }

  #[derive(Debug, Clone, PartialEq)]
  struct Ticket(i32);

  impl Element for Ticket {}

  #[tokio::test]
  async fn test_offer_all_stops_at_capacity() {
    use crate::collections::QueueWriter;

    let cmp: Comparator<Ticket> = Arc::new(|a, b| a.0 < b.0);
    let mut queue = PriorityQueue::new(cmp, 2).unwrap();

    let result = queue.offer_all(vec![Ticket(3), Ticket(1), Ticket(2)]).await;
    assert_eq!(result, Err(QueueError::Full(Ticket(2))));
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.poll(), Ok(Ticket(1)));
    assert_eq!(queue.poll(), Ok(Ticket(3)));
  }

  #[test]
  fn test_interleaved_offer_poll() {
    // Polls advance the heap root away from slot 0; the modulo arithmetic
    // must still hand elements out in priority order for this sequence.
    let cmp: Comparator<Ticket> = Arc::new(|a, b| a.0 < b.0);
    let mut queue = PriorityQueue::new(cmp, 3).unwrap();

    assert!(queue.offer(Ticket(2)).is_ok());
    assert!(queue.offer(Ticket(1)).is_ok());
    assert!(queue.offer(Ticket(3)).is_ok());

    assert_eq!(queue.poll(), Ok(Ticket(1)));
    assert!(queue.offer(Ticket(4)).is_ok());

    assert_eq!(queue.peek(), Ok(&Ticket(2)));
    assert_eq!(queue.poll(), Ok(Ticket(2)));
    assert_eq!(queue.poll(), Ok(Ticket(3)));
    assert_eq!(queue.poll(), Ok(Ticket(4)));
    assert_eq!(queue.poll(), Err(QueueError::Empty));
  }
}
