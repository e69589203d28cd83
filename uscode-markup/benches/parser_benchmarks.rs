use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uscode_markup::parse_codified_title;

fn section_xml(count: usize) -> Vec<u8> {
    let mut body = String::from(r#"<title identifier="/us/usc/t1"><num>1</num>"#);
    for i in 0..count {
        body.push_str(&format!(
            r#"<section identifier="/us/usc/t1/s{i}"><num>{i}</num><heading>Section {i}</heading><text>The rate shall be 5 percent for category {i}.</text></section>"#
        ));
    }
    body.push_str("</title>");
    body.into_bytes()
}

fn bench_parse_title(c: &mut Criterion) {
    let xml = section_xml(200);
    c.bench_function("parse_codified_title 200 sections", |b| {
        b.iter(|| parse_codified_title(black_box(&xml)).unwrap())
    });
}

criterion_group!(benches, bench_parse_title);
criterion_main!(benches);
