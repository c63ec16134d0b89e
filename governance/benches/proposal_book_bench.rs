use criterion::{black_box, criterion_group, criterion_main, Criterion};

use votable_governance::ProposalBook;
use votable_types::{Price, TokenAmount};

fn filled_book(proposals: u128) -> ProposalBook {
    let mut book = ProposalBook::new();
    for raw in 1..=proposals {
        let price = Price::new(raw).unwrap_or(Price::ONE);
        book.add_weight(price, TokenAmount::new(raw * 7 % 1_000)).unwrap();
    }
    book
}

fn add_weight_bench(c: &mut Criterion) {
    let book = filled_book(1_000);
    let price = Price::new(500).unwrap_or(Price::ONE);

    c.bench_function("proposal_book_add_weight_1k", |b| {
        b.iter_batched(
            || book.clone(),
            |mut book| book.add_weight(black_box(price), TokenAmount::new(1)),
            criterion::BatchSize::SmallInput,
        )
    });
}

fn winner_bench(c: &mut Criterion) {
    let book = filled_book(10_000);

    c.bench_function("proposal_book_winner_10k", |b| {
        b.iter(|| black_box(&book).winner().map(|p| p.price))
    });
}

fn prices_list_bench(c: &mut Criterion) {
    let book = filled_book(1_000);

    c.bench_function("proposal_book_prices_list_1k", |b| {
        b.iter(|| black_box(&book).prices_list())
    });
}

criterion_group!(benches, add_weight_bench, winner_bench, prices_list_bench);
criterion_main!(benches);
