//! Benchmarks for fuzzy subject location.
//!
//! The locator runs a partial-ratio scan over every transcript line per
//! request; this tracks the cost of that scan on a realistic document.

#![allow(missing_docs)]

use credeq::models::SubjectAliases;
use credeq::services::SubjectLocator;
use credeq::text::{LineIndex, partial_ratio};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn synthetic_transcript() -> String {
    let subjects = [
        "CSC1024 Programming Principles 4 4.00 A",
        "MTH1114 Computer Mathematics 4 3.50 A+",
        "ENG1044 English for Computing 4 3.00 B+",
        "SEG2202 Software Engineering 3 3.67 A-",
        "NET2201 Computer Networks 4 2.33 C+",
        "DBS2101 Database Fundamentals 4 3.00 B",
        "WEB2202 Web Programming 3 3.33 B+",
        "STA1113 Probability and Statistics 4 2.67 B-",
    ];
    let mut text = String::from("Student Transcript\n");
    for semester in 1..=6 {
        text.push_str(&format!("Semester {semester}\n"));
        for line in subjects {
            text.push_str(line);
            text.push('\n');
        }
    }
    text
}

fn bench_partial_ratio(c: &mut Criterion) {
    c.bench_function("partial_ratio/alias_vs_line", |b| {
        b.iter(|| {
            partial_ratio(
                black_box("computer mathematics"),
                black_box("mth1114 computer mathematics 4 3.50 a+"),
            )
        });
    });
}

fn bench_locate(c: &mut Criterion) {
    let transcript = synthetic_transcript();
    let lines = LineIndex::new(&transcript);
    let aliases = SubjectAliases::resolve(
        "Computer Mathematics",
        &["Comp. Maths".to_string(), "Computer Mathematics".to_string()],
    );
    let locator = SubjectLocator::new();

    c.bench_function("locate/transcript_50_lines", |b| {
        b.iter(|| locator.locate(black_box(&lines), black_box(&aliases)));
    });
}

criterion_group!(benches, bench_partial_ratio, bench_locate);
criterion_main!(benches);
