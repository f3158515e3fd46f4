use ziglet_syntax::zig::SyntaxKind::*;

use super::{Parser, exprs, items, recovery};
use crate::parser::Language;

pub(super) fn block(p: &mut Parser<'_>) {
    if !p.at(LEFT_BRACE) {
        let found = p.peek_kind().describe();
        p.err_recover(&format!("expected a block, found {found}"), &recovery());
        return;
    }

    let m = p.start();
    block_body(p);
    m.complete(p, BLOCK);
}

/// `{ statements }` without the wrapping node, so labeled blocks can put
/// their `LABEL` first.
pub(super) fn block_body(p: &mut Parser<'_>) {
    p.expect(LEFT_BRACE);

    while !p.at(RIGHT_BRACE) && !p.at_eof() {
        let start = p.pos();
        statement(p);
        if p.pos() == start {
            p.err_and_bump("expected a statement");
        }
    }

    p.expect(RIGHT_BRACE);
}

fn statement(p: &mut Parser<'_>) {
    match p.peek_kind() {
        COMPTIME_KW if matches!(p.nth_kind(1), CONST_KW | VAR_KW) => {
            let m = p.start();
            p.advance();
            items::var_decl_body(p);
            m.complete(p, VAR_DECL);
        }
        CONST_KW | VAR_KW => {
            let m = p.start();
            items::var_decl_body(p);
            m.complete(p, VAR_DECL);
        }
        DEFER_KW | ERRDEFER_KW => {
            let m = p.start();
            if p.eat(ERRDEFER_KW) {
                exprs::payload(p);
            } else {
                p.advance();
            }
            statement_body(p);
            m.complete(p, DEFER_STMT);
        }
        SUSPEND_KW => {
            let m = p.start();
            p.advance();
            statement_body(p);
            m.complete(p, SUSPEND_STMT);
        }
        RIGHT_PAREN | RIGHT_BRACKET | COMMA | SEMICOLON => {
            let found = p.peek_kind().describe();
            p.err_and_bump(&format!("unexpected {found}"));
        }
        _ => {
            let m = p.start();
            statement_body(p);
            m.complete(p, EXPR_STMT);
        }
    }
}

/// An assignment or expression followed by `;`, which block-like
/// expressions ending in `}` may omit.
fn statement_body(p: &mut Parser<'_>) {
    let Some(expr) = exprs::assign_expr(p) else {
        return;
    };

    let block_like = matches!(
        expr.kind(),
        BLOCK | IF_EXPR | WHILE_EXPR | FOR_EXPR | SWITCH_EXPR | COMPTIME_EXPR | NOSUSPEND_EXPR
    );
    if !(block_like && p.prev_kind() == Some(RIGHT_BRACE)) {
        p.expect(SEMICOLON);
    }
}
