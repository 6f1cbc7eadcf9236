//! Single-producer single-consumer command queue.
//!
//! The serial RX interrupt is restricted to enqueue-only operations and
//! the foreground duty loop is the sole consumer, so neither side needs
//! the global-interrupt disable/enable bracketing the original firmware
//! wrapped around its shared buffers.  A full queue drops the newest
//! command — the operator can simply resend.

use heapless::spsc::{Consumer, Producer, Queue};

use super::framer::SerialCommand;

/// Queue depth (usable capacity is one less, per the SPSC contract).
pub const QUEUE_DEPTH: usize = 8;

/// Owned queue storage; split once into the two endpoints.
pub type CommandQueue = Queue<SerialCommand, QUEUE_DEPTH>;

/// Interrupt-side endpoint.
pub type CommandProducer<'a> = Producer<'a, SerialCommand, QUEUE_DEPTH>;

/// Foreground-side endpoint.
pub type CommandConsumer<'a> = Consumer<'a, SerialCommand, QUEUE_DEPTH>;

/// Enqueue a framed command, dropping it when the queue is full.
/// Returns whether the command was accepted.
pub fn enqueue(producer: &mut CommandProducer<'_>, command: SerialCommand) -> bool {
    producer.enqueue(command).is_ok()
}

/// Drain all pending commands into a handler, in FIFO order.
pub fn drain(consumer: &mut CommandConsumer<'_>, mut handler: impl FnMut(SerialCommand)) {
    while let Some(command) = consumer.dequeue() {
        handler(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_cross_in_fifo_order() {
        let mut queue = CommandQueue::new();
        let (mut producer, mut consumer) = queue.split();

        assert!(enqueue(&mut producer, SerialCommand::Report));
        assert!(enqueue(
            &mut producer,
            SerialCommand::Reconfigure("1,60,D7,0".try_into().unwrap())
        ));

        let mut seen = Vec::new();
        drain(&mut consumer, |cmd| seen.push(cmd));
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], SerialCommand::Report);
    }

    #[test]
    fn full_queue_drops_newest() {
        let mut queue = CommandQueue::new();
        let (mut producer, mut consumer) = queue.split();

        let mut accepted = 0;
        for _ in 0..QUEUE_DEPTH + 2 {
            if enqueue(&mut producer, SerialCommand::Report) {
                accepted += 1;
            }
        }
        assert_eq!(accepted, QUEUE_DEPTH - 1, "SPSC holds depth-1 items");

        let mut drained = 0;
        drain(&mut consumer, |_| drained += 1);
        assert_eq!(drained, accepted);
    }
}
