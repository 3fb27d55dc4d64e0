use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use synthon_core::CodonDesigner;
use synthon_core::config::SynthonConfig;
use synthon_core::optimizer::optimize;
use synthon_core::sequence::{SequenceRecord, read_fasta_from};
use synthon_core::table::{OptimizationTable, optimize_table, registry};
use synthon_core::translation::translate;

use criterion_config::configure_criterion;

const GFP_FASTA: &str = include_str!("../tests/data/gfp.fasta");
const BATCH_SIZE: usize = 256;

fn gfp_record() -> SequenceRecord {
    read_fasta_from(GFP_FASTA.as_bytes(), "CDS")
        .unwrap()
        .into_iter()
        .next()
        .unwrap()
}

fn gfp_table(dna: &str) -> OptimizationTable {
    optimize_table(registry::lookup(11).unwrap(), dna)
}

fn benchmark_translate(c: &mut Criterion) {
    let record = gfp_record();
    let table = registry::lookup(11).unwrap();

    let mut group = c.benchmark_group("translate");
    group.throughput(Throughput::Bytes(record.sequence.len() as u64));
    group.bench_function("gfp", |b| {
        b.iter(|| translate(black_box(&record.sequence), table).unwrap());
    });
    group.finish();
}

fn benchmark_optimize(c: &mut Criterion) {
    let record = gfp_record();
    let table = gfp_table(&record.sequence);
    let protein = translate(&record.sequence, &table).unwrap();

    let mut group = c.benchmark_group("optimize");
    group.throughput(Throughput::Elements(protein.len() as u64));
    group.bench_function("train_gfp", |b| {
        b.iter(|| gfp_table(black_box(&record.sequence)));
    });
    group.bench_function("gfp_seeded", |b| {
        b.iter(|| optimize(black_box(&protein), &table, Some(7)).unwrap());
    });
    group.finish();
}

fn benchmark_batch(c: &mut Criterion) {
    let record = gfp_record();
    let table = gfp_table(&record.sequence);
    let protein = translate(&record.sequence, &table).unwrap();
    let batch: Vec<SequenceRecord> = (0..BATCH_SIZE)
        .map(|i| SequenceRecord::new(format!("protein_{i}"), protein.clone()))
        .collect();

    let mut group = c.benchmark_group("optimize_records");
    group.throughput(Throughput::Elements(BATCH_SIZE as u64));
    for threads in [1usize, 2, 4, 8] {
        let designer = CodonDesigner::new(SynthonConfig {
            seed: Some(42),
            num_threads: Some(threads),
            ..Default::default()
        });
        group.bench_with_input(BenchmarkId::from_parameter(threads), &batch, |b, batch| {
            b.iter(|| designer.optimize_records(black_box(batch), &table).unwrap());
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = benchmark_translate, benchmark_optimize, benchmark_batch
}
criterion_main!(benches);
