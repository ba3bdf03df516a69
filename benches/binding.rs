//! Benchmarks for the parse-bind-serialize pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use shareon::dom::HtmlDocument;
use shareon::{Network, ShareMetadata, bind_document};

/// A page with `containers` share bars, each holding every network once.
fn sample_page(containers: usize) -> String {
    let mut html = String::from("<!DOCTYPE html><html><head><title>Bench</title></head><body>");
    for i in 0..containers {
        html.push_str(&format!(
            r#"<div class="shareon" data-url="https://example.com/{i}" data-via="bench">"#
        ));
        for (n, network) in Network::ALL.iter().enumerate() {
            let tag = if n % 2 == 0 { "a" } else { "button" };
            html.push_str(&format!(r#"<{tag} class="btn {network}">{network}</{tag}>"#));
        }
        html.push_str("</div><p>Lorem ipsum dolor sit amet.</p>");
    }
    html.push_str("</body></html>");
    html
}

fn bench_build_urls(c: &mut Criterion) {
    let meta = ShareMetadata::encoded("https://example.com/a long/path?q=1", "A fairly long title");
    c.bench_function("build_all_networks", |b| {
        b.iter(|| {
            for network in Network::ALL {
                std::hint::black_box(network.build(&meta));
            }
        });
    });
}

fn bench_bind(c: &mut Criterion) {
    let html = sample_page(50);

    c.bench_function("parse_page", |b| {
        b.iter(|| HtmlDocument::parse(&html, "https://example.com/"));
    });

    c.bench_function("parse_and_bind", |b| {
        b.iter(|| {
            let mut doc = HtmlDocument::parse(&html, "https://example.com/");
            bind_document(&mut doc)
        });
    });

    c.bench_function("parse_bind_serialize", |b| {
        b.iter(|| {
            let mut doc = HtmlDocument::parse(&html, "https://example.com/");
            bind_document(&mut doc);
            doc.to_html()
        });
    });
}

criterion_group!(benches, bench_build_urls, bench_bind);
criterion_main!(benches);
