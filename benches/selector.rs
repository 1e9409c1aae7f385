use criterion::{Criterion, black_box, criterion_group, criterion_main};
use plant_proximity::{GeoPoint, parse_records, select};

/// Synthetic inventory laid out on a grid around (40, -75)
fn synthetic_inventory(rows: usize) -> String {
    let mut text =
        String::from("s_id,cname1,cname2,cname3,genus,species,cultivar,lon,lat,dbh,height\n");
    for i in 0..rows {
        let lat = 40.0 + (i % 100) as f64 * 0.0001;
        let lon = -75.0 + (i / 100) as f64 * 0.0001;
        text.push_str(&format!(
            "P{},Plant {},,,Genus{},species{},,{},{},,{}\n",
            i,
            i,
            i % 17,
            i % 53,
            lon,
            lat,
            i % 30
        ));
    }
    text
}

fn bench_refresh(c: &mut Criterion) {
    let inventory = synthetic_inventory(10_000);
    let records = parse_records(&inventory);
    let reference = GeoPoint::new(40.005, -74.995);

    c.bench_function("parse 10k rows", |b| {
        b.iter(|| parse_records(black_box(&inventory)))
    });

    c.bench_function("select 10k records", |b| {
        b.iter(|| select(black_box(&reference), black_box(&records), 100.0, 10))
    });
}

criterion_group!(benches, bench_refresh);
criterion_main!(benches);
