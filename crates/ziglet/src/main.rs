use std::io::IsTerminal as _;
use std::process::ExitCode;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand, ValueEnum};
use salsa::DatabaseImpl;
use tracing_subscriber::EnvFilter;
use ziglet_db::{Diagnostic, File, Language, check_file, parse_zig, parse_zon};
use ziglet_errors::{Renderer, Severity};
use ziglet_tokenizer::{highlight, zon};

#[derive(Parser)]
#[command(version, about = "Inspect Zig and Zon source files")]
struct Options {
    /// When to colorize diagnostics.
    #[arg(long, value_enum, default_value_t = Color::Auto, global = true)]
    color: Color,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report syntax errors and warnings.
    Check { path: Utf8PathBuf },
    /// Print the token stream, string literals split into escapes.
    Tokens { path: Utf8PathBuf },
    /// Print the syntax tree.
    Tree { path: Utf8PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum Color {
    Auto,
    Always,
    Never,
}

impl Color {
    fn renderer(self) -> Renderer {
        let styled = match self {
            Self::Auto => std::io::stderr().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        };
        if styled { Renderer::styled() } else { Renderer::plain() }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("ZIGLET_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let options = Options::parse();
    let db = DatabaseImpl::default();

    match options.command {
        Command::Check { path } => {
            let file = load(&db, path)?;
            let renderer = options.color.renderer();
            let diagnostics = check_file::accumulated::<Diagnostic>(&db, file);

            let path = file.path(&db).as_str();
            let text = file.text(&db);

            let mut failed = false;
            for diagnostic in diagnostics {
                failed |= diagnostic.severity() == Severity::Error;
                eprintln!("{}", diagnostic.render(&renderer, path, text));
            }

            Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
        Command::Tokens { path } => {
            let file = load(&db, path)?;
            let text = file.text(&db);

            match file.language(&db) {
                Language::Zig => {
                    for token in highlight::zig_tokens(text) {
                        println!("{:?}@{:?} {:?}", token.kind, token.range, &text[token.range]);
                    }
                }
                Language::Zon => {
                    for token in zon::Lexer::new(text) {
                        println!("{:?}@{:?} {:?}", token.kind, token.range, &text[token.range]);
                    }
                }
            }

            Ok(ExitCode::SUCCESS)
        }
        Command::Tree { path } => {
            let file = load(&db, path)?;

            let tree = match file.language(&db) {
                Language::Zig => parse_zig(&db, file).syntax().debug_tree(),
                Language::Zon => parse_zon(&db, file).syntax().debug_tree(),
            };
            print!("{tree}");

            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(db: &DatabaseImpl, path: Utf8PathBuf) -> anyhow::Result<File> {
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read `{path}`"))?;
    tracing::debug!(%path, len = text.len(), "loaded file");
    Ok(File::new(db, path, text))
}
