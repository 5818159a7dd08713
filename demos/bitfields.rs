use regpack::fmt::{hex_dump_from, oct};
use regpack::{BitArray8, BitmapAllocator8, ByteArray64, NumberSet8};

// Decode a UART line-status style register:
//
// +---------+-----------+--------+--------+
// | b7:4    | b3:2      | b1     | b0     |
// | rx fifo | baud sel  | tx rdy | rx rdy |
// +---------+-----------+--------+--------+
fn decode_status(raw: u8) {
    let status = BitArray8::from_raw(raw);
    println!("status   = {status}");
    println!("rx ready = {}", status.bit(0));
    println!("tx ready = {}", status.bit(1));
    println!("baud sel = {}", status.field(2..=3));
    println!("rx fifo  = {} bytes", status.field(4..=7));
}

fn main() {
    decode_status(0b1011_0101);

    // Track raised interrupt lines as a set of IRQ numbers.
    let mut pending = NumberSet8::new();
    pending.insert(2);
    pending.insert(5);
    pending.insert(7);
    println!("\npending IRQs: {pending}");
    while let Some(irq) = pending.pop_first() {
        println!("servicing IRQ {irq}");
    }

    // Hand out descriptor slots first-fit.
    let mut slots = BitmapAllocator8::new();
    let a = slots.allocate().unwrap();
    let b = slots.allocate().unwrap();
    println!("\nslots: {slots} (allocated {a} and {b})");
    slots.free(a);
    println!("slots: {slots} (freed {a})");

    // A small byte queue living in one u64.
    let mut queue = ByteArray64::from_slice(&[0o044, 0o100, 0o155]);
    println!("\nqueue: {queue}");
    while let Some(mode) = queue.pop_first() {
        println!("mode {}", oct(mode));
    }

    let frame = *b"regpack demo";
    println!("\n{}", hex_dump_from(&frame, 0x1000u16).show_ascii());
}
