use camino::{Utf8Path, Utf8PathBuf};
pub use line_index::LineIndex;

/// Language of a source file, chosen by its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Language {
    Zig,
    Zon,
}

impl Language {
    pub fn from_path(path: &Utf8Path) -> Self {
        match path.extension() {
            Some("zon") => Self::Zon,
            _ => Self::Zig,
        }
    }
}

#[salsa::input(debug)]
pub struct File {
    #[returns(ref)]
    pub path: Utf8PathBuf,
    #[returns(deref)]
    pub text: String,
}

#[salsa::tracked]
impl File {
    #[salsa::tracked(returns(ref), no_eq)]
    pub fn line_index(self, db: &dyn salsa::Database) -> LineIndex {
        LineIndex::new(self.text(db))
    }
}

impl File {
    pub fn language(self, db: &dyn salsa::Database) -> Language {
        Language::from_path(self.path(db))
    }
}
