use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tabular_pipeline::ingestion::{ingest_csv_from_str, CsvOptions};
use tabular_pipeline::pipeline::TabularPipeline;

const ORIGINS: [&str; 3] = ["Asia", "Europe", "USA"];

fn synthetic_cars(rows: usize) -> String {
    let mut out = String::from("Make,Origin,Cylinders,Weight,MPG_City\n");
    for i in 0..rows {
        let cylinders = if i % 17 == 0 { String::new() } else { (4 + (i % 3) * 2).to_string() };
        out.push_str(&format!(
            "make{},{},{},{},{}\n",
            i % 38,
            ORIGINS[i % 3],
            cylinders,
            2_000 + (i * 37) % 4_000,
            12 + i % 30
        ));
    }
    out
}

fn bench_pipeline(c: &mut Criterion) {
    let text = synthetic_cars(10_000);
    let options = CsvOptions::default();

    c.bench_function("ingest_csv_10k", |b| {
        b.iter(|| ingest_csv_from_str(black_box(&text), &options).unwrap())
    });

    let ds = ingest_csv_from_str(&text, &options).unwrap();
    let pipeline = TabularPipeline::default();
    c.bench_function("pipeline_run_10k", |b| {
        b.iter(|| pipeline.run(black_box(ds.clone())).unwrap())
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
