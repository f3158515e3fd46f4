use salsa::{Accumulator as _, Database};
pub use ziglet_errors::Diagnostic;
pub use ziglet_inputs::{File, Language};
use ziglet_parse::Parse;
use ziglet_syntax::{zig, zon};

#[salsa::tracked(returns(ref), no_eq)]
pub fn parse_zig(db: &dyn Database, file: File) -> Parse<zig::SyntaxKind> {
    let _span = tracing::debug_span!("parse_zig", path = %file.path(db)).entered();

    let parse = ziglet_parse::parse_zig(file.text(db));
    for diagnostic in parse.diagnostics() {
        diagnostic.clone().accumulate(db);
    }
    parse
}

#[salsa::tracked(returns(ref), no_eq)]
pub fn parse_zon(db: &dyn Database, file: File) -> Parse<zon::SyntaxKind> {
    let _span = tracing::debug_span!("parse_zon", path = %file.path(db)).entered();

    let parse = ziglet_parse::parse_zon(file.text(db));
    for diagnostic in parse.diagnostics() {
        diagnostic.clone().accumulate(db);
    }
    parse
}

/// Parses `file` in its language; diagnostics are accumulated.
#[salsa::tracked]
pub fn check_file(db: &dyn Database, file: File) {
    match file.language(db) {
        Language::Zig => _ = parse_zig(db, file),
        Language::Zon => _ = parse_zon(db, file),
    }
}
