use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use crate::MessageQueue;

#[test]
fn test_receive_returns_newest_first() {
    let queue = MessageQueue::new();
    queue.send('a');
    queue.send('b');
    queue.send('c');

    assert_eq!(queue.receive(), 'c');
    assert_eq!(queue.receive(), 'b');
    assert_eq!(queue.receive(), 'a');
    assert!(queue.is_empty());
}

#[test]
fn test_older_values_stay_queued() {
    let queue = MessageQueue::new();
    queue.send(1);
    queue.send(2);

    assert_eq!(queue.receive(), 2);
    assert_eq!(queue.len(), 1);

    queue.send(3);
    assert_eq!(queue.receive(), 3);
    assert_eq!(queue.receive(), 1);
}

#[test]
fn test_every_sent_value_is_received_once() {
    let queue = MessageQueue::new();
    let sent: Vec<u32> = (0..100).map(|i| i % 7).collect();
    for value in &sent {
        queue.send(*value);
    }

    let mut received: Vec<u32> = (0..sent.len()).map(|_| queue.receive()).collect();
    assert!(queue.is_empty());

    let mut expected = sent.clone();
    expected.sort_unstable();
    received.sort_unstable();
    assert_eq!(received, expected);
}

#[test]
fn test_receive_blocks_until_send() {
    let queue = Arc::new(MessageQueue::new());

    let q = queue.clone();
    let handle = thread::spawn(move || q.receive());

    // no value yet, the receiver has to stay parked
    thread::sleep(Duration::from_millis(50));
    assert!(!handle.is_finished());

    queue.send(String::from("go"));
    assert_eq!(handle.join().expect("thread panicked"), "go");
}

#[test]
fn test_receive_timeout_on_empty_queue() {
    let queue: MessageQueue<u8> = MessageQueue::new();

    let start = Instant::now();
    assert_eq!(queue.receive_timeout(Duration::from_millis(50)), None);

    // allow some leeway
    assert!(start.elapsed() >= Duration::from_millis(45));
}

#[test]
fn test_receive_timeout_gets_late_value() {
    let queue = Arc::new(MessageQueue::new());

    let q = queue.clone();
    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        q.send(42u64);
    });

    assert_eq!(queue.receive_timeout(Duration::from_secs(5)), Some(42));
    sender.join().expect("thread panicked");
}

#[test]
fn test_concurrent_receivers_split_values() {
    let queue = Arc::new(MessageQueue::new());

    let receivers: Vec<_> = (0..4)
        .map(|_| {
            let q = queue.clone();
            thread::spawn(move || (0..25).map(|_| q.receive()).collect::<Vec<u32>>())
        })
        .collect();

    for value in 0..100 {
        queue.send(value);
    }

    let mut received: Vec<u32> = receivers
        .into_iter()
        .flat_map(|h| h.join().expect("thread panicked"))
        .collect();
    received.sort_unstable();

    assert_eq!(received, (0..100).collect::<Vec<_>>());
    assert!(queue.is_empty());
}

#[test]
fn test_receive_timeout_with_unbounded_timeout() {
    let queue = MessageQueue::new();
    queue.send(1u8);
    queue.send(2u8);

    assert_eq!(queue.receive_timeout(Duration::MAX), Some(2));
    assert_eq!(queue.receive_timeout(Duration::MAX), Some(1));
}
