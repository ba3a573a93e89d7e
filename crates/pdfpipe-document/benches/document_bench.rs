// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for page assembly in the pdfpipe-document crate.
// Copies pages out of a synthetic 200-page input, reversed and repeated, then
// serialises the output.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lopdf::{Document, Object, Stream, dictionary};

use pdfpipe_core::{PipeConfig, pipeline};
use pdfpipe_document::{PdfReader, PdfStore};

/// Build a PDF with `n` pages sharing one font resource.
fn synthetic_pdf(n: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let kids: Vec<Object> = (0..n)
        .map(|i| {
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                format!("BT /F1 12 Tf 10 10 Td (page {}) Tj ET", i + 1).into_bytes(),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            Object::Reference(page_id)
        })
        .collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => n as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut out = Vec::new();
    doc.save_to(&mut out).expect("synthetic PDF serialises");
    out
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_assemble(c: &mut Criterion) {
    let bytes = synthetic_pdf(200);
    let structure = ["1:200-1", "1", "1:1,1,1"];
    let rotation = ["1-100:90", "301-403:180"];

    c.bench_function("assemble 403 pages from 200-page input", |b| {
        b.iter(|| {
            let reader = PdfReader::from_bytes("bench.pdf", &bytes).expect("loads");
            let mut store = PdfStore::new(vec![reader], &PipeConfig::default());
            pipeline::run(&mut store, black_box(&structure), black_box(&rotation))
                .expect("pipeline runs");
            let out = store.output_mut().save_to_bytes().expect("serialises");
            black_box(out.len());
        });
    });
}

criterion_group!(benches, bench_assemble);
criterion_main!(benches);
