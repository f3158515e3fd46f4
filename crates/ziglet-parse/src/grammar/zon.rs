use ziglet_syntax::zon::SyntaxKind::{self, *};
use ziglet_syntax::zon::SyntaxSet;

use crate::parser::Parser;

pub(crate) fn file(p: &mut Parser<'_, SyntaxKind>) {
    let m = p.start();

    if p.at_eof() {
        p.error("expected a value");
    } else {
        value(p, &SyntaxSet::EMPTY);
    }

    if !p.at_eof() {
        let m = p.start();
        p.error("expected end of file after the value");
        while !p.at_eof() {
            p.advance();
        }
        m.complete(p, ERROR);
    }

    p.finish_eof();
    m.complete(p, FILE);
}

fn value(p: &mut Parser<'_, SyntaxKind>, recovery: &SyntaxSet) {
    if !p.enter() {
        return;
    }

    match p.peek_kind() {
        DOT if p.nth_at(1, LEFT_BRACE) => container(p),
        DOT if p.nth_at(1, IDENTIFIER) => {
            let m = p.start();
            p.advance();
            identifier(p);
            m.complete(p, ENUM_LITERAL);
        }
        STRING_LITERAL_SINGLE => {
            let m = p.start();
            p.advance();
            m.complete(p, STRING_LITERAL);
        }
        LINE_STRING => {
            let m = p.start();
            while p.eat(LINE_STRING) {}
            m.complete(p, STRING_LITERAL);
        }
        CHAR_LITERAL => {
            let m = p.start();
            p.advance();
            m.complete(p, CHAR);
        }
        INTEGER | FLOAT => {
            let m = p.start();
            p.advance();
            m.complete(p, NUMBER);
        }
        MINUS => {
            let m = p.start();
            p.advance();
            if !p.eat(INTEGER) && !p.eat(FLOAT) {
                p.error("expected a number after `-`");
            }
            m.complete(p, NUMBER);
        }
        IDENTIFIER => identifier(p),
        _ => p.err_recover("expected a value", recovery),
    }

    p.leave();
}

fn identifier(p: &mut Parser<'_, SyntaxKind>) {
    let m = p.start();
    p.advance();
    m.complete(p, IDENT);
}

/// `.{ ... }`, an array when every entry is positional, a struct otherwise.
fn container(p: &mut Parser<'_, SyntaxKind>) {
    let recovery = SyntaxSet::new([COMMA, RIGHT_BRACE]);
    let m = p.start();
    p.advance();
    p.advance();

    let mut positional = 0;
    let mut named = 0;
    while !p.at(RIGHT_BRACE) && !p.at_eof() {
        if p.at(COMMA) {
            p.err_and_bump("expected a value, found `,`");
            continue;
        }

        if entry(p, &recovery) {
            named += 1;
        } else {
            positional += 1;
        }

        if !p.eat(COMMA) {
            if p.at(RIGHT_BRACE) || p.at_eof() {
                break;
            }
            p.error("expected `,` between entries");
        }
    }

    p.expect(RIGHT_BRACE);
    m.complete(p, if positional > 0 && named == 0 { ARRAY } else { STRUCT });
}

/// Returns whether the entry is a `.name = value` field.
fn entry(p: &mut Parser<'_, SyntaxKind>, recovery: &SyntaxSet) -> bool {
    let m = p.start();
    let named = p.at(DOT) && p.nth_at(1, IDENTIFIER) && p.nth_at(2, EQ);
    if named {
        p.advance();
        identifier(p);
        p.advance();
    }
    value(p, recovery);
    m.complete(p, ENTRY);
    named
}
