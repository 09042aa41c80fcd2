use auctionboard::rendering::{layout_grid, Card};
use auctionboard::search::filter_entries;
use auctionboard::{normalize_uuid, parse_auctions};
use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::HashMap;

fn sample_payload(n: usize) -> String {
    let items: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"item": {{"displayName": "Item {i}", "amount": {amount}}}, "price": {price}, "seller": "{i:032x}"}}"#,
                i = i,
                amount = i % 64 + 1,
                price = i * 1000
            )
        })
        .collect();
    format!("[{}]", items.join(","))
}

fn bench_filter(c: &mut Criterion) {
    let entries = parse_auctions(&sample_payload(2000)).expect("bad payload");

    c.bench_function("filter_entries_2000", |b| {
        b.iter(|| {
            let _ = filter_entries(&entries, "item 19");
        })
    });
}

fn bench_layout(c: &mut Criterion) {
    let entries = parse_auctions(&sample_payload(300)).expect("bad payload");
    let names = HashMap::new();
    let cards: Vec<Card> = entries.iter().map(|e| Card::from_entry(e, &names)).collect();

    c.bench_function("layout_grid_300", |b| {
        b.iter(|| {
            let _ = layout_grid(&cards, 3, 34);
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_uuid", |b| {
        b.iter(|| {
            let _ = normalize_uuid("069A79F444E94726A5BEFCA90E38AAF5");
        })
    });
}

criterion_group!(benches, bench_filter, bench_layout, bench_normalize);
criterion_main!(benches);
