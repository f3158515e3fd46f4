use ziglet_syntax::zig::SyntaxKind::{self, *};
use ziglet_syntax::zig::SyntaxSet;

mod exprs;
pub(crate) mod items;
mod stmts;
mod types;

type Parser<'t> = crate::parser::Parser<'t, SyntaxKind>;
type CompletedMarker = crate::parser::CompletedMarker<SyntaxKind>;

/// Tokens a broken construct stops at instead of swallowing.
fn recovery() -> SyntaxSet {
    SyntaxSet::new([
        SEMICOLON,
        RIGHT_BRACE,
        RIGHT_PAREN,
        RIGHT_BRACKET,
        COMMA,
        CONST_KW,
        VAR_KW,
        PUB_KW,
        TEST_KW,
    ])
}

pub(crate) fn name(p: &mut Parser<'_>, recovery: &SyntaxSet) {
    match p.peek_kind() {
        IDENTIFIER => {
            let m = p.start();
            p.advance();
            m.complete(p, IDENT);
        }
        _ => p.err_recover("expected identifier", recovery),
    }
}

/// Parses `bra (item delim)* item? ket`. `parser` returns `false` when it
/// could not start an item.
pub(crate) fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    delim: SyntaxKind,
    unexpected_delim_message: &'static str,
    mut parser: impl FnMut(&mut Parser<'_>) -> bool,
) {
    p.expect(bra);

    while !p.at(ket) && !p.at_eof() {
        if p.at(delim) {
            p.err_and_bump(unexpected_delim_message);
            continue;
        }

        let start = p.pos();
        let parsed = parser(p);
        if p.pos() == start {
            break;
        }
        if !parsed {
            continue;
        }

        if !p.eat(delim) {
            if p.at(ket) || p.at_set(&recovery()) {
                break;
            }
            p.expect(delim);
        }
    }

    p.expect(ket);
}
