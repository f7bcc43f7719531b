//! Benchmarks for entry reconstruction and field extraction.
//!
//! Run with: cargo bench
//!
//! These benchmarks run on synthetic page texts shaped like bulletin pages.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Creates synthetic page texts with a masthead and `entries_per_page`
/// entries on each page; the last entry of every page spills over.
fn create_test_pages(page_count: usize, entries_per_page: usize) -> Vec<borme::PageText> {
    let mut pages = Vec::with_capacity(page_count);
    let mut id = 1;

    for page in 0..page_count {
        let mut text = format!(
            "BOLETÍN OFICIAL DEL REGISTRO MERCANTIL  Núm. 2  Pág. {}  \
             Verificable en https://www.boe.es  ",
            page + 1
        );
        if page > 0 {
            text.push_str("Datos registrales. T 10 , F 20, S 8.  ");
        }
        for _ in 0..entries_per_page {
            text.push_str(&format!(
                "{} - EMPRESA {} SL.  Constitución. Comienzo de operaciones: 1.12.23. \
                 Objeto social: Comercio al por menor. Domicilio: C/ MAYOR {} (MADRID). \
                 Capital: 3.000,00 Euros. Nombramientos. Adm. Unico: PEREZ JUAN.  ",
                id, id, id
            ));
            id += 1;
        }
        pages.push(borme::PageText::new(page as u32 + 1, text));
    }

    pages
}

/// Benchmark line reconstruction at various sizes.
fn bench_reconstruct(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");
    let reconstructor = borme::LineReconstructor::default();

    for page_count in [1, 10, 50].iter() {
        let pages = create_test_pages(*page_count, 12);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| reconstructor.reconstruct(black_box(&pages)));
        });
    }

    group.finish();
}

/// Benchmark field extraction on a single incorporation body.
fn bench_fields(c: &mut Criterion) {
    let parser = borme::FieldParser::new();
    let body = "ACME SOLUCIONES SL. Constitución. Comienzo de operaciones: 1.12.23. \
        Objeto social: Venta de software. Domicilio: C/ MAYOR 1 (ALBACETE). \
        Capital: 3.000,00 Euros. Nombramientos. Adm. Unico: PEREZ GARCIA JUAN. \
        Datos registrales. T 1234 , F 56, S 8, H AB 12345, I/A 1 (28.12.23).";

    c.bench_function("extract_incorporation_fields", |b| {
        b.iter(|| parser.extract(black_box(body)));
    });
}

/// Benchmark the full text-to-report pipeline.
fn bench_pipeline(c: &mut Criterion) {
    let pages = create_test_pages(20, 12);
    let builder = borme::Borme::new();

    c.bench_function("parse_pages_20", |b| {
        b.iter(|| builder.parse_pages(black_box(&pages)));
    });
}

criterion_group!(benches, bench_reconstruct, bench_fields, bench_pipeline);
criterion_main!(benches);
