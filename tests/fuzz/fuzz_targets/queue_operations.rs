#![no_main]

use std::collections::VecDeque;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ring_queue::RingBuffer;

#[derive(Debug, Arbitrary)]
enum Op {
    Push(u16),
    Pop,
    Clear,
}

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let Ok(queue) = RingBuffer::new(usize::from(input.capacity)) else {
        assert_eq!(input.capacity, 0);
        return;
    };
    let capacity = queue.capacity();
    let mut model = VecDeque::with_capacity(capacity);

    for op in input.ops {
        match op {
            Op::Push(value) => {
                if model.len() == capacity {
                    model.pop_front();
                }
                model.push_back(value);
                queue.push(value);
            }
            Op::Pop => assert_eq!(queue.pop(), model.pop_front()),
            Op::Clear => {
                model.clear();
                queue.clear();
            }
        }
        assert!(queue.snapshot().is_consistent());
        assert_eq!(queue.len(), model.len());
    }
});
