//! Benchmarks for thesis loading and rendering.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// Builds a synthetic thesis with the given number of body sections.
fn create_test_thesis(section_count: usize) -> String {
    let mut sections = Vec::with_capacity(section_count + 2);
    sections.push(serde_json::json!({
        "type": "abstract",
        "heading": "Abstract",
        "body": "Summary of findings [1] and methods [2]."
    }));

    for i in 0..section_count {
        sections.push(serde_json::json!({
            "type": "section",
            "number": i + 1,
            "heading": format!("Section {}", i + 1),
            "specific_style": { (format!(".s{}", i)): "margin: 0" },
            "content": [
                { "type": "paragraph", "text": format!("Paragraph text citing [{}] and [{}].", i % 20 + 1, i % 7 + 1) },
                { "type": "definition", "term": "Term", "def": "A definition [3]." },
                { "type": "list", "items": ["first [1]", "second", "third [2]"] },
                { "type": "image", "alt": "Figure", "caption": "Caption", "query": "chart" }
            ]
        }));
    }

    let entries: Vec<_> = (1..=20)
        .map(|id| serde_json::json!({ "id": id, "text": format!("Reference {}", id) }))
        .collect();
    sections.push(serde_json::json!({
        "type": "bibliography",
        "heading": "References",
        "entries": entries
    }));

    serde_json::json!({
        "config": { "theme": { "primary_color": "#123456" }, "styles": { "body": "margin: 0" } },
        "meta": { "title": "Benchmark Thesis", "author": "Bench", "date": "2024" },
        "content": sections
    })
    .to_string()
}

/// Benchmark citation linking on a long paragraph.
fn bench_citation_linking(c: &mut Criterion) {
    let text = "Claim [1], counter-claim [2] and synthesis [3]. ".repeat(50);

    c.bench_function("link_citations", |b| {
        b.iter(|| thesisdoc::render::link_citations(black_box(&text)));
    });
}

/// Benchmark parsing at various sizes.
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for section_count in [1, 10, 100].iter() {
        let json = create_test_thesis(*section_count);

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| thesisdoc::load::parse_str(black_box(&json)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark HTML rendering at various sizes.
fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let options = thesisdoc::RenderOptions::new();

    for section_count in [1, 10, 100].iter() {
        let doc = thesisdoc::load::parse_str(&create_test_thesis(*section_count)).unwrap();

        group.bench_function(format!("{}_sections", section_count), |b| {
            b.iter(|| thesisdoc::render::to_html(black_box(&doc), &options).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_citation_linking, bench_parsing, bench_rendering);
criterion_main!(benches);
