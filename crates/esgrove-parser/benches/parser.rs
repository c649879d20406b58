use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use esgrove_parser::lexer::{Scanner, TokenKind};
use esgrove_parser::{ParseOptions, parse};

const SCRIPT: &str = r#"
function fib(n) {
    if (n < 2) return n;
    return fib(n - 1) + fib(n - 2);
}

var cache = {}, total = 0;
for (var i = 0; i < 100; i++) {
    cache["k" + i] = fib(i % 20);
    total += cache["k" + i] * 2 / (i + 1) | 0;
}

var re = /a+b*[c-z]/gi, s = `value: ${total} and ${re.source}`;
label: while (true) { break label; }
"#;

const MODULE: &str = r#"
import { readFile } from "fs";
import * as path from "path";

export class Store extends Map {
    #hits = 0;
    static #instances = new Set();

    constructor(entries = []) {
        super(entries);
        Store.#instances.add(this);
    }

    get hits() { return this.#hits; }

    async load(file, { encoding = "utf8", ...rest } = {}) {
        const text = await readFile(path.join(".", file), encoding);
        for (const [key, value] of Object.entries(JSON.parse(text))) {
            this.set(key, value ?? rest.fallback);
            this.#hits++;
        }
        return this;
    }

    *keysSorted() {
        yield* [...this.keys()].sort((a, b) => a < b ? -1 : 1);
    }
}

export default (x) => x?.value ?? null;
"#;

// ---------------------------------------------------------------------------
// Whole-program parsing
// ---------------------------------------------------------------------------

fn bench_parse_programs(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, source, options) in [
        ("script", SCRIPT, ParseOptions::script()),
        ("module", MODULE, ParseOptions::module()),
    ] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), source, |b, source| {
            b.iter(|| parse(black_box(source), options));
        });
    }
    group.finish();
}

fn bench_parse_with_locations(c: &mut Criterion) {
    let options = ParseOptions::module().with_locations(true);
    c.bench_function("parse_module_with_locations", |b| {
        b.iter(|| parse(black_box(MODULE), options));
    });
}

// ---------------------------------------------------------------------------
// Scanning alone
// ---------------------------------------------------------------------------

fn bench_scan(c: &mut Criterion) {
    // Regex and template bodies need the parser to rescan, so keep them out.
    let source = SCRIPT.lines().filter(|l| !l.contains('`')).collect::<Vec<_>>().join("\n");
    c.bench_function("scan_script", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(black_box(&source));
            let mut count = 0usize;
            while let Ok(token) = scanner.next_token() {
                if matches!(token.kind, TokenKind::Eof) {
                    break;
                }
                count += 1;
            }
            count
        });
    });
}

// ---------------------------------------------------------------------------
// Large inputs
// ---------------------------------------------------------------------------

fn bench_large_input(c: &mut Criterion) {
    let source = SCRIPT.repeat(200);
    let mut group = c.benchmark_group("large");
    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("script_x200", |b| {
        b.iter(|| parse(black_box(&source), ParseOptions::script()));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_parse_programs,
    bench_parse_with_locations,
    bench_scan,
    bench_large_input
);
criterion_main!(benches);
