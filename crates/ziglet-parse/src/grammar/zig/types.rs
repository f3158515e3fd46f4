use ziglet_syntax::zig::SyntaxKind::*;
use ziglet_syntax::zig::SyntaxSet;

use super::{CompletedMarker, Parser, delimited, exprs, items, name, recovery};
use crate::parser::Language;

/// A type expression: prefix type operators applied to an error union.
pub(super) fn type_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    if !p.enter() {
        return None;
    }

    let ty = match p.peek_kind() {
        QUESTION => {
            let m = p.start();
            p.advance();
            type_expr(p);
            Some(m.complete(p, OPTIONAL_TYPE))
        }
        ANYFRAME_KW if p.nth_at(1, ARROW) => {
            let m = p.start();
            p.advance();
            p.advance();
            type_expr(p);
            Some(m.complete(p, ANYFRAME_TYPE))
        }
        STAR | STAR2 => {
            let m = p.start();
            p.advance();
            pointer_modifiers(p);
            type_expr(p);
            Some(m.complete(p, PTR_TYPE))
        }
        LEFT_BRACKET => Some(bracket_type(p)),
        _ => error_union_expr(p),
    };

    p.leave();
    ty
}

/// `[*]T`, `[*c]T`, `[]T`, `[:s]T`, `[N]T` and their sentinel forms.
fn bracket_type(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    p.advance();

    let kind = match p.peek_kind() {
        STAR => {
            p.advance();
            if p.at(IDENTIFIER) && p.current_text() == "c" {
                p.advance();
            } else if p.eat(COLON) {
                exprs::expr(p);
            }
            PTR_TYPE
        }
        RIGHT_BRACKET => SLICE_TYPE,
        COLON => {
            p.advance();
            exprs::expr(p);
            SLICE_TYPE
        }
        _ => {
            exprs::expr(p);
            if p.eat(COLON) {
                exprs::expr(p);
            }
            ARRAY_TYPE
        }
    };

    p.expect(RIGHT_BRACKET);
    if kind != ARRAY_TYPE {
        pointer_modifiers(p);
    }
    type_expr(p);
    m.complete(p, kind)
}

fn pointer_modifiers(p: &mut Parser<'_>) {
    loop {
        match p.peek_kind() {
            CONST_KW | VOLATILE_KW | ALLOWZERO_KW => p.advance(),
            ALIGN_KW | ADDRSPACE_KW => items::clauses(p, false),
            _ => break,
        }
    }
}

fn error_union_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let lhs = suffix_expr(p)?;

    if !p.at(BANG) {
        return Some(lhs);
    }

    let m = lhs.precede(p);
    p.advance();
    type_expr(p);
    Some(m.complete(p, ERROR_UNION_EXPR))
}

fn suffix_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = primary_type_expr(p)?;

    loop {
        lhs = match p.peek_kind() {
            LEFT_BRACKET => {
                let m = lhs.precede(p);
                p.advance();
                exprs::expr(p);
                let kind = if p.eat(DOT2) {
                    if !p.at(RIGHT_BRACKET) && !p.at(COLON) {
                        exprs::expr(p);
                    }
                    if p.eat(COLON) {
                        exprs::expr(p);
                    }
                    SLICE_EXPR
                } else {
                    INDEX_EXPR
                };
                p.expect(RIGHT_BRACKET);
                m.complete(p, kind)
            }
            DOT if p.nth_at(1, IDENTIFIER) => {
                let m = lhs.precede(p);
                p.advance();
                name(p, &SyntaxSet::EMPTY);
                m.complete(p, FIELD_EXPR)
            }
            DOT if p.nth_at(1, QUESTION) => {
                let m = lhs.precede(p);
                p.advance();
                p.advance();
                m.complete(p, UNWRAP_EXPR)
            }
            DOT_STAR => {
                let m = lhs.precede(p);
                p.advance();
                m.complete(p, DEREF_EXPR)
            }
            LEFT_PAREN => {
                let m = lhs.precede(p);
                exprs::arg_list(p);
                m.complete(p, CALL_EXPR)
            }
            _ => break,
        };
    }

    Some(lhs)
}

fn primary_type_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let kind = match p.peek_kind() {
        BUILTIN => {
            let m = p.start();
            p.advance();
            if p.at(LEFT_PAREN) {
                exprs::arg_list(p);
            } else {
                p.error("expected builtin arguments");
            }
            return Some(m.complete(p, BUILTIN_CALL));
        }
        CHAR_LITERAL | INTEGER | FLOAT | UNREACHABLE_KW => LITERAL,
        STRING_LITERAL_SINGLE => STRING_LITERAL,
        STRING_LITERAL_MULTI => {
            let m = p.start();
            while p.eat(STRING_LITERAL_MULTI) {}
            return Some(m.complete(p, STRING_LITERAL));
        }
        ANYFRAME_KW => ANYFRAME_TYPE,
        IDENTIFIER => IDENT,
        EXTERN_KW | PACKED_KW | STRUCT_KW | ENUM_KW | UNION_KW | OPAQUE_KW => {
            return Some(container_decl(p));
        }
        DOT if p.nth_at(1, IDENTIFIER) => {
            let m = p.start();
            p.advance();
            name(p, &SyntaxSet::EMPTY);
            return Some(m.complete(p, ENUM_LITERAL));
        }
        DOT if p.nth_at(1, LEFT_BRACE) => {
            let m = p.start();
            return Some(exprs::init_list(p, m));
        }
        ERROR_KW if p.nth_at(1, LEFT_BRACE) => {
            let m = p.start();
            p.advance();
            delimited(p, LEFT_BRACE, RIGHT_BRACE, COMMA, "expected an error name, found `,`", |p| {
                name(p, &recovery());
                true
            });
            return Some(m.complete(p, ERROR_SET_DECL));
        }
        ERROR_KW if p.nth_at(1, DOT) => {
            let m = p.start();
            p.advance();
            p.advance();
            name(p, &recovery());
            return Some(m.complete(p, ERROR_VALUE));
        }
        FN_KW => {
            let m = p.start();
            items::fn_proto(p);
            return Some(m.complete(p, FN_TYPE));
        }
        LEFT_PAREN => {
            let m = p.start();
            p.advance();
            exprs::expr(p);
            p.expect(RIGHT_PAREN);
            return Some(m.complete(p, PAREN_EXPR));
        }
        IF_KW => return Some(exprs::if_expr(p)),
        SWITCH_KW => return Some(exprs::switch_expr(p)),
        COMPTIME_KW => {
            let m = p.start();
            p.advance();
            type_expr(p);
            return Some(m.complete(p, COMPTIME_EXPR));
        }
        _ => {
            let found = p.peek_kind().describe();
            p.err_recover(&format!("expected an expression, found {found}"), &recovery());
            return None;
        }
    };

    let m = p.start();
    p.advance();
    Some(m.complete(p, kind))
}

/// `extern`/`packed` `struct`, `enum`, `union` or `opaque` with its body.
fn container_decl(p: &mut Parser<'_>) -> CompletedMarker {
    let m = p.start();
    if !p.eat(EXTERN_KW) {
        p.eat(PACKED_KW);
    }

    match p.peek_kind() {
        STRUCT_KW | ENUM_KW => {
            p.advance();
            if p.eat(LEFT_PAREN) {
                exprs::expr(p);
                p.expect(RIGHT_PAREN);
            }
        }
        UNION_KW => {
            p.advance();
            if p.eat(LEFT_PAREN) {
                if p.eat(ENUM_KW) {
                    if p.eat(LEFT_PAREN) {
                        exprs::expr(p);
                        p.expect(RIGHT_PAREN);
                    }
                } else {
                    exprs::expr(p);
                }
                p.expect(RIGHT_PAREN);
            }
        }
        OPAQUE_KW => p.advance(),
        _ => p.error("expected `struct`, `enum`, `union` or `opaque`"),
    }

    if p.eat(LEFT_BRACE) {
        items::container_members(p, true);
        p.expect(RIGHT_BRACE);
    } else {
        p.error("expected a container body");
    }

    m.complete(p, CONTAINER_DECL)
}
