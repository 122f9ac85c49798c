use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use getrandom::fill;
use gophkeeper_vault::EnvelopeKey;

fn bench_encrypt_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("envelope");

    let key = EnvelopeKey::new(&[0x42; 32]).expect("key length is fixed");

    let sizes = [("256B", 256usize), ("4KB", 4 * 1024), ("64KB", 64 * 1024)];

    for (label, size) in sizes {
        let mut data = vec![0u8; size];
        fill(&mut data).expect("system RNG unavailable for benchmark data");

        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("encrypt", label), &data, |b, d| {
            b.iter(|| key.encrypt(d));
        });

        let sealed = key.encrypt(&data);

        group.bench_with_input(BenchmarkId::new("decrypt", label), &sealed, |b, s| {
            b.iter(|| key.decrypt(s).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encrypt_decrypt);
criterion_main!(benches);
