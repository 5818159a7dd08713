use criterion::{Criterion, criterion_group, criterion_main};
use regpack::fmt::hex_dump_from;
use regpack::{BitmapAllocator64, ByteArray64, NumberSet64};
use std::fmt::Write;

fn gen_bytes(count: usize) -> Vec<u8> {
    // Deterministic but non-trivial pattern
    (0..count).map(|i| (i * 31 % 256) as u8).collect()
}

fn bench_number_set(c: &mut Criterion) {
    c.bench_function("number_set_fill_drain", |b| {
        b.iter(|| {
            let mut set = NumberSet64::new();
            for member in (0..64).step_by(3) {
                set.insert(member);
            }
            let mut total = 0;
            while let Some(member) = set.pop_first() {
                total += member;
            }
            total
        })
    });

    let set = NumberSet64::from_members((0..64).step_by(2));
    c.bench_function("number_set_iterate", |b| {
        b.iter(|| set.iter().sum::<usize>())
    });
}

fn bench_byte_array(c: &mut Criterion) {
    c.bench_function("byte_array_push_pop", |b| {
        b.iter(|| {
            let mut array = ByteArray64::new();
            for byte in 1..=7 {
                array.push(byte);
            }
            let mut total = 0u32;
            while let Some(byte) = array.pop_first() {
                total += u32::from(byte);
            }
            total
        })
    });
}

fn bench_allocator(c: &mut Criterion) {
    c.bench_function("allocator_exhaust_refill", |b| {
        b.iter(|| {
            let mut allocator = BitmapAllocator64::new();
            while allocator.allocate().is_some() {}
            for entry in 0..64 {
                allocator.free(entry);
            }
            allocator.free_entry_count()
        })
    });
}

fn bench_hex_dump(c: &mut Criterion) {
    for &count in &[16usize, 256, 4096] {
        let bytes = gen_bytes(count);
        c.bench_function(&format!("hex_dump_{}_bytes", count), |b| {
            let mut out = String::with_capacity(count * 5);
            b.iter(|| {
                out.clear();
                write!(&mut out, "{}", hex_dump_from(&bytes, 0x1000u64).show_ascii()).unwrap();
                out.len()
            })
        });
    }
}

criterion_group!(
    benches,
    bench_number_set,
    bench_byte_array,
    bench_allocator,
    bench_hex_dump
);
criterion_main!(benches);
