//! Benchmarks for docsplice loading and section replacement.
//!
//! Run with: cargo bench
//!
//! Documents are generated with one heading every few paragraphs so that
//! replacement touches a realistic share of the body.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use docsplice::{Block, ContentMap, Document, DocxDocument, HeadingLevel, PageLayout};

const PARAGRAPHS_PER_SECTION: usize = 5;

/// Creates a document with `section_count` headed sections.
fn create_test_document(section_count: usize) -> Document {
    let mut doc = Document::new();
    for i in 0..section_count {
        doc.push(Block::heading(
            HeadingLevel::H2,
            format!("CHAPTER {} SECTION {}", i + 1, i),
        ));
        for p in 0..PARAGRAPHS_PER_SECTION {
            doc.add_paragraph(format!(
                "Paragraph {} of section {} with some test content for benchmarking purposes.",
                p, i
            ));
        }
    }
    doc
}

/// Content for every other section.
fn create_content_map(section_count: usize) -> ContentMap {
    (0..section_count)
        .step_by(2)
        .map(|i| (format!("SECTION {}", i), format!("Replacement text for section {}", i)))
        .collect()
}

fn create_test_docx(section_count: usize) -> Vec<u8> {
    let mut docx = DocxDocument::blank(&PageLayout::default());
    *docx.document_mut() = create_test_document(section_count);
    docx.to_bytes().unwrap()
}

/// Benchmark DOCX loading at various sizes.
fn bench_docx_loading(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_loading");

    for section_count in [10, 100, 500].iter() {
        let data = create_test_docx(*section_count);
        let size = data.len() as u64;

        group.throughput(Throughput::Bytes(size));
        group.bench_with_input(
            BenchmarkId::new("sections", section_count),
            &data,
            |b, data| {
                b.iter(|| {
                    let _ = DocxDocument::from_bytes(black_box(data.clone()));
                });
            },
        );
    }

    group.finish();
}

/// Benchmark the replacement pass on in-memory documents.
fn bench_section_replacement(c: &mut Criterion) {
    let mut group = c.benchmark_group("section_replacement");

    for section_count in [10, 100, 500].iter() {
        let document = create_test_document(*section_count);
        let content = create_content_map(*section_count);

        group.bench_with_input(
            BenchmarkId::new("sections", section_count),
            &document,
            |b, doc| {
                b.iter(|| {
                    let mut doc = doc.clone();
                    docsplice::replace_sections(black_box(&mut doc), &content)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark saving after replacement.
fn bench_docx_saving(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_saving");

    for section_count in [10, 100, 500].iter() {
        let mut docx = DocxDocument::from_bytes(create_test_docx(*section_count)).unwrap();
        docsplice::replace_sections(docx.document_mut(), &create_content_map(*section_count));

        group.bench_with_input(
            BenchmarkId::new("sections", section_count),
            &docx,
            |b, docx| {
                b.iter(|| {
                    let _ = black_box(docx).to_bytes();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_docx_loading,
    bench_section_replacement,
    bench_docx_saving,
);
criterion_main!(benches);
