#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use crate::collections::element::Element;
  use crate::collections::{Comparator, ConcurrentPriorityQueue, QueueError};

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

  #[tokio::test]
  async fn test_invalid_capacity() {
    let result = ConcurrentPriorityQueue::<Person>::new(younger_first(), 0);
    assert_eq!(result.err(), Some(QueueError::InvalidCapacity(0)));
  }

  #[tokio::test]
  async fn test_basic_ordering() {
    let queue = ConcurrentPriorityQueue::new(younger_first(), 3).unwrap();
    assert!(queue.offer(person("Alice", 30)).await.is_ok());
    assert!(queue.offer(person("Bob", 25)).await.is_ok());
    assert!(queue.offer(person("Charlie", 35)).await.is_ok());

    assert_eq!(queue.len().await, 3);
    assert!(queue.is_full().await);
    assert_eq!(queue.peek().await, Ok(person("Bob", 25)));
    assert_eq!(queue.poll().await, Ok(person("Bob", 25)));
    assert_eq!(queue.len().await, 2);

    queue.clear().await;
    assert!(queue.is_empty().await);
    assert_eq!(queue.poll().await, Err(QueueError::Empty));
  }

  #[tokio::test]
  async fn test_full_queue_rejects_offer() {
    let queue = ConcurrentPriorityQueue::new(younger_first(), 3).unwrap();
    for (name, age) in [("Alice", 30), ("Bob", 25), ("Charlie", 35)] {
      assert!(queue.offer(person(name, age)).await.is_ok());
    }
    assert_eq!(
      queue.offer(person("David", 40)).await,
      Err(QueueError::Full(person("David", 40)))
    );
    assert_eq!(queue.len().await, 3);
  }

  #[derive(Debug, Clone, PartialEq)]
  struct Ticket(i32);

  impl Element for Ticket {}

  fn lowest_first() -> Comparator<Ticket> {
    Arc::new(|a: &Ticket, b: &Ticket| a.0 < b.0)
  }

  #[tokio::test]
  async fn test_racing_offers_drain_in_order() {
    const TASKS: i32 = 4;
    const PER_TASK: i32 = 250;

    let queue = ConcurrentPriorityQueue::new(lowest_first(), (TASKS * PER_TASK) as usize).unwrap();
    let mut handles = vec![];
    for task in 0..TASKS {
      let q = queue.clone();
      handles.push(tokio::spawn(async move {
        for i in 0..PER_TASK {
          q.offer(Ticket(task * PER_TASK + i)).await.unwrap();
        }
      }));
    }
    for handle in handles {
      handle.await.unwrap();
    }
    assert_eq!(queue.len().await, (TASKS * PER_TASK) as usize);

    // No matter how the offers interleaved, the drain comes out sorted.
    for expected in 0..(TASKS * PER_TASK) {
      assert_eq!(queue.poll().await, Ok(Ticket(expected)));
    }
    assert_eq!(queue.poll().await, Err(QueueError::Empty));
  }

  #[tokio::test]
  async fn test_mixed_offer_poll_race_keeps_bounds() {
    let queue = ConcurrentPriorityQueue::new(lowest_first(), 16).unwrap();
    let mut handles = vec![];

    for task in 0..4 {
      let q = queue.clone();
      handles.push(tokio::spawn(async move {
        for i in 0..50 {
          let _ = q.offer(Ticket(task * 50 + i)).await;
          let _ = q.poll().await;
        }
      }));
    }
    for handle in handles {
      handle.await.unwrap();
    }

    let len = queue.len().await;
    assert!(len <= queue.capacity().await);
  }
}
