use codspeed_criterion_compat::{
    Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use ziglet_tokenizer::{Tokenizer, highlight, zig, zon};

static SOURCE: &str = r#"
pub fn main() !void { const x: ?*align(4) const u8 = null; x.* += 1 <<| 2; }
pub fn main() !void { const x: ?*align(4) const u8 = null; x.* += 1 <<| 2; }
pub fn main() !void { const x: ?*align(4) const u8 = null; x.* += 1 <<| 2; }
pub fn main() !void { const x: ?*align(4) const u8 = null; x.* += 1 <<| 2; }
pub fn main() !void { const x: ?*align(4) const u8 = null; x.* += 1 <<| 2; }
pub fn main() !void { const x: ?*align(4) const u8 = null; x.* += 1 <<| 2; }
pub fn main() !void { const x: ?*align(4) const u8 = null; x.* += 1 <<| 2; }
pub fn main() !void { const x: ?*align(4) const u8 = null; x.* += 1 <<| 2; }
pub fn main() !void { const x: ?*align(4) const u8 = null; x.* += 1 <<| 2; }
pub fn main() !void { const x: ?*align(4) const u8 = null; x.* += 1 <<| 2; }
"#;

static LITERALS: &str = r#"
const a = "plain text with \n, \t, \x41 and \u{1F600} escapes"; // comment
const b = 'x'; const c = '\''; const d = 0x1p-4; const e = 1_000_000;
const f =
    \\multi-line
    \\string
;
const a = "plain text with \n, \t, \x41 and \u{1F600} escapes"; // comment
const b = 'x'; const c = '\''; const d = 0x1p-4; const e = 1_000_000;
const f =
    \\multi-line
    \\string
;
"#;

static ZON: &str = r#".{
    .name = .ziglet,
    .version = "0.1.0",
    .dependencies = .{
        .@"known-folders" = .{ .url = "https://example.com/kf.tar.gz", .hash = "1220abcd" },
    },
    .paths = .{ "build.zig", "build.zig.zon", "src", "LICENSE" },
}
"#;

static CANDIDATES: [(&str, &str); 2] =
    [("keywords_operators_and_punctuators", SOURCE), ("literals_and_comments", LITERALS)];

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for (name, source) in CANDIDATES {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| {
            b.iter(|| zig::Lexer::new(s).for_each(|token| {
                black_box(token);
            }))
        });
    }

    group.throughput(Throughput::Bytes(ZON.len() as u64));
    group.bench_function("zon", |b| {
        b.iter(|| zon::Lexer::new(ZON).for_each(|token| {
            black_box(token);
        }))
    });

    group.finish();
}

fn bench_layers(c: &mut Criterion) {
    let mut group = c.benchmark_group("layers");
    group.throughput(Throughput::Bytes(LITERALS.len() as u64));

    group.bench_function("highlight", |b| {
        b.iter(|| highlight::zig_tokens(LITERALS).for_each(|token| {
            black_box(token);
        }))
    });
    group.bench_function("trivia", |b| {
        b.iter(|| {
            Tokenizer::new(LITERALS, zig::Lexer::new(LITERALS)).for_each(|token| {
                black_box(token);
            })
        })
    });

    group.finish();
}

criterion_group!(benches, bench_lexer, bench_layers);
criterion_main!(benches);
