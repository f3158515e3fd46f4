use expect_test::{Expect, expect};
use ziglet_errors::Severity;
use ziglet_syntax::ast::AstNode as _;
use ziglet_syntax::ast::{zig as zig_ast, zon as zon_ast};
use ziglet_syntax::{TextRange, TextSize, zig, zon};
use ziglet_tree::{Kind, SyntaxNode};

use crate::{parse_zig, parse_zon};

fn check_zig(text: &str, expect: Expect) {
    let parse = parse_zig(text);
    expect.assert_eq(&parse.syntax().debug_tree());
}

fn check_zon(text: &str, expect: Expect) {
    let parse = parse_zon(text);
    expect.assert_eq(&parse.syntax().debug_tree());
}

fn messages(diagnostics: &[ziglet_errors::Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|diagnostic| diagnostic.message()).collect()
}

fn assert_well_formed<K: Kind>(root: SyntaxNode<'_, K>, text: &str) {
    assert_eq!(root.text(), text);
    assert_eq!(root.text_range(), TextRange::up_to(TextSize::of(text)));

    let mut end = TextSize::new(0);
    for token in root.tokens() {
        assert_eq!(token.text_range().start(), end, "gap before {token:?} in {text:?}");
        end = token.text_range().end();
    }

    for node in root.descendants() {
        assert_ne!(node.kind(), K::TOMBSTONE, "{text:?}");
        for child in node.children() {
            assert!(node.text_range().contains_range(child.text_range()), "{text:?}");
        }
    }
}

#[test]
fn zig_var_decl() {
    check_zig(
        "const a = 1;\n",
        expect![[r#"
            SOURCE_FILE@0..13
              VAR_DECL@0..12
                CONST_KW@0..5 "const"
                WHITESPACE@5..6 " "
                IDENT@6..8
                  IDENTIFIER@6..7 "a"
                  WHITESPACE@7..8 " "
                EQ@8..9 "="
                WHITESPACE@9..10 " "
                LITERAL@10..11
                  INTEGER@10..11 "1"
                SEMICOLON@11..12 ";"
              WHITESPACE@12..13 "\n"
              EOF@13..13 ""
        "#]],
    );
}

#[test]
fn zon_struct() {
    check_zon(
        ".{.a = 1}",
        expect![[r#"
            FILE@0..9
              STRUCT@0..9
                DOT@0..1 "."
                LEFT_BRACE@1..2 "{"
                ENTRY@2..8
                  DOT@2..3 "."
                  IDENT@3..5
                    IDENTIFIER@3..4 "a"
                    WHITESPACE@4..5 " "
                  EQ@5..6 "="
                  WHITESPACE@6..7 " "
                  NUMBER@7..8
                    INTEGER@7..8 "1"
                RIGHT_BRACE@8..9 "}"
              EOF@9..9 ""
        "#]],
    );
}

#[test]
fn zon_missing_value() {
    let text = ".{.a = }";
    check_zon(
        text,
        expect![[r#"
            FILE@0..8
              STRUCT@0..8
                DOT@0..1 "."
                LEFT_BRACE@1..2 "{"
                ENTRY@2..7
                  DOT@2..3 "."
                  IDENT@3..5
                    IDENTIFIER@3..4 "a"
                    WHITESPACE@4..5 " "
                  EQ@5..6 "="
                  WHITESPACE@6..7 " "
                  ERROR@7..7
                RIGHT_BRACE@7..8 "}"
              EOF@8..8 ""
        "#]],
    );

    let parse = parse_zon(text);
    assert_eq!(messages(parse.diagnostics()), ["expected a value"]);

    let Some(zon_ast::Value::Struct(strukt)) = parse.file().and_then(|file| file.value()) else {
        panic!("expected a struct");
    };
    let entries: Vec<_> = strukt.entries().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key().map(|key| key.value()).as_deref(), Some("a"));
    let Some(zon_ast::Value::Error(error)) = entries[0].value() else {
        panic!("the missing value is an ERROR node");
    };
    assert!(error.syntax().text_range().is_empty());
    assert_eq!(strukt.get("a"), entries[0].value());
}

#[test]
fn zon_duplicate_keys() {
    let parse = parse_zon(".{.a = 1, .b = 2, .a = 3}");

    let Some(zon_ast::Value::Struct(strukt)) = parse.file().and_then(|file| file.value()) else {
        panic!("expected a struct");
    };
    let mut keys: Vec<_> = strukt.keys().into_iter().collect();
    keys.sort();
    assert_eq!(keys, ["a", "b"]);

    let diagnostics = parse.diagnostics();
    assert_eq!(messages(diagnostics), ["duplicate field `a`"]);
    assert_eq!(diagnostics[0].severity(), Severity::Warning);
    assert_eq!(diagnostics[0].range(), TextRange::new(19.into(), 20.into()));
}

#[test]
fn zon_arrays_and_structs() {
    let kind = |text: &str| parse_zon(text).syntax().children().next().map(|node| node.kind());

    assert_eq!(kind(".{ 1, 2, 3 }"), Some(zon::SyntaxKind::ARRAY));
    assert_eq!(kind(".{ \"a\", .b, }"), Some(zon::SyntaxKind::ARRAY));
    assert_eq!(kind(".{}"), Some(zon::SyntaxKind::STRUCT));
    assert_eq!(kind(".{ .a = 1, 2 }"), Some(zon::SyntaxKind::STRUCT));
    assert_eq!(kind("-1.5"), Some(zon::SyntaxKind::NUMBER));
    assert_eq!(kind(".red"), Some(zon::SyntaxKind::ENUM_LITERAL));
    assert_eq!(kind("'x'"), Some(zon::SyntaxKind::CHAR));
    assert_eq!(kind("true"), Some(zon::SyntaxKind::IDENT));
}

#[test]
fn zon_trailing_tokens() {
    let text = ".{} 1 2";
    let parse = parse_zon(text);
    assert_well_formed(parse.syntax(), text);
    assert_eq!(messages(parse.diagnostics()), ["expected end of file after the value"]);

    let kinds: Vec<_> = parse.syntax().children().map(|node| node.kind()).collect();
    assert_eq!(kinds, [zon::SyntaxKind::STRUCT, zon::SyntaxKind::ERROR]);
}

#[test]
fn zon_manifest() {
    let text = r#".{
    .name = .ziglet,
    .version = "0.1.0",
    .dependencies = .{
        .@"known-folders" = .{
            .url = "https://example.com/kf.tar.gz",
            .hash = "1220abcd",
        },
    },
    .paths = .{ "build.zig", "src" },
    .description =
        \\A multi-line
        \\description
    ,
}
"#;
    let parse = parse_zon(text);
    assert_well_formed(parse.syntax(), text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());

    let Some(zon_ast::Value::Struct(manifest)) = parse.file().and_then(|file| file.value()) else {
        panic!("expected a struct");
    };

    let Some(zon_ast::Value::StringLiteral(version)) = manifest.get("version") else {
        panic!("expected a version string");
    };
    assert_eq!(version.content(), "0.1.0");

    let Some(zon_ast::Value::Struct(dependencies)) = manifest.get("dependencies") else {
        panic!("expected dependencies");
    };
    assert!(dependencies.keys().contains("known-folders"));

    let Some(zon_ast::Value::Array(paths)) = manifest.get("paths") else {
        panic!("expected an array of paths");
    };
    assert_eq!(paths.values().count(), 2);

    let Some(zon_ast::Value::StringLiteral(description)) = manifest.get("description") else {
        panic!("expected a description");
    };
    assert!(description.is_multiline());
    assert_eq!(description.content_ranges().len(), 2);
    assert_eq!(description.content(), "A multi-line\ndescription");
}

#[test]
fn zig_empty_and_trivia_only() {
    check_zig(
        "",
        expect![[r#"
            SOURCE_FILE@0..0
              EOF@0..0 ""
        "#]],
    );
    check_zig(
        "// nothing here\n",
        expect![[r#"
            SOURCE_FILE@0..16
              LINE_COMMENT@0..15 "// nothing here"
              WHITESPACE@15..16 "\n"
              EOF@16..16 ""
        "#]],
    );
}

#[test]
fn zig_missing_expression() {
    let text = "fn f() void {\n    const x = ;\n}\n";
    let parse = parse_zig(text);
    assert_well_formed(parse.syntax(), text);
    assert_eq!(messages(parse.diagnostics()), ["expected an expression, found `;`"]);

    let errors: Vec<_> = parse
        .syntax()
        .descendants()
        .filter(|node| node.kind() == zig::SyntaxKind::ERROR)
        .collect();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].text_range().is_empty());
}

#[test]
fn zig_bad_character() {
    let text = "const a = 1; $";
    let parse = parse_zig(text);
    assert_well_formed(parse.syntax(), text);
    assert_eq!(messages(parse.diagnostics()), ["unexpected character `$`"]);
    assert_eq!(parse.diagnostics()[0].range(), TextRange::new(13.into(), 14.into()));
}

#[test]
fn zig_binary_precedence() {
    let parse = parse_zig("const x = a or b and c + d * e;");
    assert!(parse.diagnostics().is_empty());

    fn binary(node: zig::SyntaxNode<'_>) -> zig_ast::BinaryExpr<'_> {
        zig_ast::BinaryExpr::cast(node).unwrap_or_else(|| panic!("not binary: {node:?}"))
    }

    fn op(expr: zig_ast::BinaryExpr<'_>) -> &str {
        expr.op().map(|op| op.text()).unwrap_or_default()
    }

    let decl = parse.source_file().and_then(|file| file.var_decls().next()).unwrap();
    let or = binary(decl.initializer().unwrap());
    assert_eq!(op(or), "or");

    let and = binary(or.rhs().unwrap());
    assert_eq!(op(and), "and");

    let add = binary(and.rhs().unwrap());
    assert_eq!(op(add), "+");

    let mul = binary(add.rhs().unwrap());
    assert_eq!(op(mul), "*");
    assert_eq!(mul.lhs().unwrap().text_trimmed(), "d");
}

#[test]
fn zig_chained_comparison() {
    let parse = parse_zig("const x = a == b == c;");
    assert_eq!(messages(parse.diagnostics()), ["comparison operators cannot be chained"]);
}

#[test]
fn zig_block_like_statements_need_no_semicolon() {
    let text = r#"
fn f() void {
    if (a) {} else {}
    while (i < 10) : (i += 1) {}
    for (items, 0..) |item, i| {}
    switch (x) {
        .a => {},
        else => unreachable,
    }
    blk: {}
    comptime {}
    x = 1;
}
"#;
    let parse = parse_zig(text);
    assert_well_formed(parse.syntax(), text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());

    let body = parse.source_file().and_then(|file| file.fn_decls().next()).and_then(|f| f.body());
    assert_eq!(body.map(|body| body.statements().count()), Some(7));
}

#[test]
fn zig_expression_statement_needs_semicolon() {
    let parse = parse_zig("fn f() void {\n    if (a) b()\n}\n");
    assert_eq!(messages(parse.diagnostics()), ["expected `;`, found `}`"]);
}

#[test]
fn zig_init_lists() {
    let parse = parse_zig("const p = Point{ .x = 1, .y = 2 };\nconst q = .{ 1, 2 };\n");
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());

    let lists: Vec<_> = parse.syntax().descendants().filter_map(zig_ast::InitList::cast).collect();
    assert_eq!(lists.len(), 2);

    assert!(!lists[0].is_anonymous());
    let names: Vec<_> = lists[0]
        .field_inits()
        .filter_map(|init| init.name().map(|name| name.value().into_owned()))
        .collect();
    assert_eq!(names, ["x", "y"]);

    assert!(lists[1].is_anonymous());
    assert_eq!(lists[1].field_inits().count(), 0);
}

#[test]
fn zig_types() {
    let text = "const T = ?*align(4) const [*c]u8;\nconst S = [:0]const u8;\nconst A = [4:0]u8;\n";
    let parse = parse_zig(text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());

    let kinds: Vec<_> = parse
        .source_file()
        .into_iter()
        .flat_map(|file| file.var_decls())
        .filter_map(|decl| decl.initializer().map(|init| init.kind()))
        .collect();
    assert_eq!(
        kinds,
        [zig::SyntaxKind::OPTIONAL_TYPE, zig::SyntaxKind::SLICE_TYPE, zig::SyntaxKind::ARRAY_TYPE]
    );
}

#[test]
fn zig_program() {
    let text = r#"//! Example module.
const std = @import("std");

/// A point.
pub const Point = struct {
    x: i32 = 0,
    y: i32,

    pub fn init(x: i32, y: i32) Point {
        return .{ .x = x, .y = y };
    }
};

const Color = enum(u8) { red, green, blue };

pub fn main() !void {
    var list = std.ArrayList(u8).init(std.heap.page_allocator);
    defer list.deinit();
    const items = [_]u8{ 1, 2, 3 };
    var sum: u32 = 0;
    for (items, 0..) |item, i| {
        sum += item * @as(u32, @intCast(i));
    }
    var i: usize = 0;
    while (i < 10) : (i += 1) {
        if (i % 2 == 0) continue;
    }
    const name: ?[]const u8 = null;
    const value = name orelse "none";
    _ = value;
    const c = switch (Color.red) {
        .red => 'r',
        .green, .blue => |tag| blk: {
            _ = tag;
            break :blk 'x';
        },
    };
    _ = c;
    const p: *const Point = &Point.init(1, 2);
    _ = p.*.x;
    try std.io.getStdOut().writer().print("{d}\n", .{sum});
}

test "point" {
    const p = Point.init(1, 2);
    try std.testing.expect(p.x == 1);
}
"#;
    let parse = parse_zig(text);
    assert_well_formed(parse.syntax(), text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());

    let file = parse.source_file().unwrap();
    assert_eq!(file.container_doc_comments().as_deref(), Some(" Example module."));

    let decls: Vec<_> = file
        .var_decls()
        .filter_map(|decl| decl.name().map(|name| name.value().into_owned()))
        .collect();
    assert_eq!(decls, ["std", "Point", "Color"]);

    let point = file.var_decls().nth(1).unwrap();
    assert!(point.is_pub());
    assert_eq!(point.doc_comments().as_deref(), Some(" A point."));

    let container = point.initializer().and_then(zig_ast::ContainerDecl::cast).unwrap();
    let fields: Vec<_> = container
        .fields()
        .filter_map(|field| field.name().map(|name| name.value().into_owned()))
        .collect();
    assert_eq!(fields, ["x", "y"]);

    let main = file.fn_decls().next().unwrap();
    assert_eq!(main.name().map(|name| name.text()), Some("main"));
    assert_eq!(main.return_type().map(|ty| ty.text_trimmed()), Some("void"));

    let test = file.test_decls().next().unwrap();
    assert_eq!(test.name().as_deref(), Some("point"));
}

#[test]
fn zig_labels_and_payloads() {
    let text = "fn f() void {\n    outer: while (it.next()) |item| {\n        break :outer;\n    }\n}\n";
    let parse = parse_zig(text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());

    let kinds: Vec<_> = parse.syntax().descendants().map(|node| node.kind()).collect();
    assert!(kinds.contains(&zig::SyntaxKind::LABEL));
    assert!(kinds.contains(&zig::SyntaxKind::PAYLOAD));
    assert!(kinds.contains(&zig::SyntaxKind::BREAK_EXPR));

    let label = parse.syntax().descendants().find_map(zig_ast::Label::cast).unwrap();
    assert_eq!(label.syntax().parent().map(|node| node.kind()), Some(zig::SyntaxKind::WHILE_EXPR));
    assert_eq!(label.name().map(|name| name.text()), Some("outer"));
}

#[test]
fn malformed_inputs_terminate_and_cover_the_text() {
    let nested = "(".repeat(64) + &"[".repeat(64) + &"{".repeat(64);
    let inputs = [
        "",
        " ",
        "\t\n",
        "$",
        "}",
        "}}}}",
        "{{{{",
        ")",
        "const",
        "const = ;",
        "fn (",
        "fn f(,,) void {",
        "pub",
        "pub extern \"c\"",
        "test",
        "\"unterminated",
        "'",
        "@\"unterminated",
        "\\\\ line\n\\\\ two",
        "a.b.c().?.*[0..1]",
        "const x = switch (y) { 1...3 => a, else => b };",
        "const x = if (a) b else c;",
        "struct { a: u8 = 1, }",
        "const E = error{ A, B, };",
        "asm volatile (\"nop\" ::: \"memory\"",
        ".{ .a = , }",
        ".{ ,, }",
        "-",
        "- -",
        ".{ .a = 1 .b = 2 }",
        "\u{feff}const x = 1;",
        "const s = \"\\u{zz}\";",
        &nested,
    ];

    for text in inputs {
        let zig = parse_zig(text);
        assert_well_formed(zig.syntax(), text);

        let zon = parse_zon(text);
        assert_well_formed(zon.syntax(), text);
    }
}

#[test]
fn zon_deep_nesting_is_cut_off() {
    let depth = 10_000;
    let text = format!("{}{}", ".{".repeat(depth), "}".repeat(depth));
    let parse = parse_zon(&text);

    assert_eq!(messages(parse.diagnostics()), ["nesting too deep"]);
    assert_well_formed(parse.syntax(), &text);
    let errors = parse.syntax().descendants().filter(|node| node.kind() == zon::SyntaxKind::ERROR);
    assert_eq!(errors.count(), 1);
}

#[test]
fn zig_deep_nesting_is_cut_off() {
    let depth = 10_000;

    let text = format!("const a = {}1{};\n", "(".repeat(depth), ")".repeat(depth));
    let parse = parse_zig(&text);
    assert_eq!(messages(parse.diagnostics()), ["nesting too deep"]);
    assert_well_formed(parse.syntax(), &text);

    let text = format!("fn f() void {{\n{}{}\n}}\n", "{".repeat(depth), "}".repeat(depth));
    let parse = parse_zig(&text);
    assert_eq!(messages(parse.diagnostics()), ["nesting too deep"]);
    assert_well_formed(parse.syntax(), &text);

    let text = format!("const a = {}b;\n", "!".repeat(depth));
    let parse = parse_zig(&text);
    assert_eq!(messages(parse.diagnostics()), ["nesting too deep"]);
    assert_well_formed(parse.syntax(), &text);
}

fn zig_string(parse: &crate::Parse<zig::SyntaxKind>) -> zig_ast::StringLiteral<'_> {
    parse
        .source_file()
        .and_then(|file| file.var_decls().next())
        .and_then(|decl| decl.initializer())
        .and_then(zig_ast::StringLiteral::cast)
        .unwrap()
}

#[test]
fn zig_string_literals() {
    let text = "const s =\n    \\\\a\n    \\\\b\n;\n";
    let parse = parse_zig(text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());
    let string = zig_string(&parse);
    assert!(string.is_multiline());
    let ranges = string.content_ranges();
    assert_eq!(ranges.iter().map(|&range| &text[range]).collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(string.content(), "a\nb");

    let text = "const s =\r\n    \\\\a\r\n    \\\\b\r\n;\r\n";
    let parse = parse_zig(text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());
    let string = zig_string(&parse);
    let ranges = string.content_ranges();
    assert_eq!(ranges.iter().map(|&range| &text[range]).collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(string.content(), "a\nb");

    let text = "const s = \"a\\tb\";\n";
    let parse = parse_zig(text);
    let string = zig_string(&parse);
    assert!(!string.is_multiline());
    assert_eq!(string.content_ranges(), [TextRange::new(11.into(), 15.into())]);
    assert_eq!(string.content(), "a\tb");

    let text = "const s = \"abc";
    let parse = parse_zig(text);
    assert_well_formed(parse.syntax(), text);
    let string = zig_string(&parse);
    assert_eq!(string.content_ranges(), [TextRange::new(11.into(), 14.into())]);
    assert_eq!(string.content(), "abc");
}

#[test]
fn multiline_strings_span_blank_and_comment_lines() {
    let text = "const s =\n    \\\\a\n\n    // note\n    \\\\b\n;\n";
    let parse = parse_zig(text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());
    assert_well_formed(parse.syntax(), text);
    let string = zig_string(&parse);
    let ranges = string.content_ranges();
    assert_eq!(ranges.iter().map(|&range| &text[range]).collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(string.content(), "a\nb");

    let text = ".{\n    .s =\n        \\\\a\n\n        // note\n        \\\\b\n    ,\n}\n";
    let parse = parse_zon(text);
    assert!(parse.diagnostics().is_empty(), "{:?}", parse.diagnostics());
    assert_well_formed(parse.syntax(), text);
    let Some(zon_ast::Value::Struct(strukt)) = parse.file().and_then(|file| file.value()) else {
        panic!("expected a struct");
    };
    let Some(zon_ast::Value::StringLiteral(string)) = strukt.get("s") else {
        panic!("expected a string");
    };
    let ranges = string.content_ranges();
    assert_eq!(ranges.iter().map(|&range| &text[range]).collect::<Vec<_>>(), ["a", "b"]);
    assert_eq!(string.content(), "a\nb");
}
