use amnnote_config::{Config, EditorSettings};
use amnnote_engine::{
    Cmd, MarkerView, Selection, TextValue, analyze, editing, encode, io, markup::snapshot::dump,
    parse,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "amnnote", version, about = "Inspect and format amnnote markup")]
struct Cli {
    /// Notes directory for relative note paths (defaults to the configured one)
    #[arg(long, global = true)]
    notes_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the analyzed blocks with their content and marker spans
    Analyze { file: PathBuf },

    /// Re-encode a note in canonical markup
    Normalize {
        file: PathBuf,
        /// Write the result back instead of printing it
        #[arg(long)]
        write: bool,
    },

    /// Show the text the editor displays for a cursor position
    Display {
        file: PathBuf,
        #[arg(long)]
        cursor: Option<usize>,
    },

    /// Apply a formatting command (bold, italic, h1..h5, h0, bullet, indent,
    /// outdent, ltr, rtl, nodir) to a selection
    Format {
        file: PathBuf,
        #[arg(long)]
        command: Cmd,
        /// Byte offset `A` or range `A..B`
        #[arg(long, value_parser = parse_selection)]
        selection: Selection,
        #[arg(long)]
        write: bool,
    },

    /// Type a newline at the cursor, continuing bullet lists
    Newline {
        file: PathBuf,
        #[arg(long)]
        cursor: usize,
    },
}

fn parse_selection(s: &str) -> Result<Selection, String> {
    let offset = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid offset `{v}`: {e}"))
    };
    match s.split_once("..") {
        Some((a, b)) => Ok(Selection::new(offset(a)?, offset(b)?)),
        None => Ok(Selection::caret(offset(s)?)),
    }
}

/// Inserts a newline at `cursor` the way the editor would and lets list
/// continuation react to it.
fn type_newline(text: &str, cursor: usize, settings: &EditorSettings) -> TextValue {
    let previous = TextValue::with_caret(text, cursor);
    let at = previous.selection.start;
    let mut typed = text.to_string();
    typed.insert(at, '\n');
    let current = TextValue::with_caret(typed, at + 1);

    if settings.auto_continue_lists {
        editing::continue_list(&previous, &current)
    } else {
        current
    }
}

/// Applies `command` to `selection`. A selection reaching past the note is
/// clamped to its end.
fn format_note(text: String, command: Cmd, selection: Selection) -> TextValue {
    if selection.end > text.len() {
        log::debug!(
            "clamping selection {}..{} to {} bytes",
            selection.start,
            selection.end,
            text.len()
        );
    }
    editing::apply(&TextValue::new(text, selection), command)
}

fn render_view(view: &MarkerView) -> String {
    let mut out = String::from(view.text());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    for style in view.styles() {
        out.push_str(&format!(
            "{}..{} {:?}\n",
            style.range.start, style.range.end, style.decoration
        ));
    }
    out
}

struct Session {
    notes_dir: Option<PathBuf>,
    editor: EditorSettings,
}

impl Session {
    fn load(notes_dir: Option<PathBuf>) -> Result<Self> {
        let config = Config::load().context("failed to load config")?;
        if config.is_none() {
            log::debug!("no config at {}", Config::config_path().display());
        }
        let editor = config
            .as_ref()
            .map(|c| c.editor.clone())
            .unwrap_or_default();
        let notes_dir = notes_dir.or_else(|| config.map(|c| c.notes_path));

        if let Some(dir) = &notes_dir {
            io::validate_notes_dir(dir)
                .with_context(|| format!("notes path '{}' is invalid", dir.display()))?;
        }
        Ok(Self { notes_dir, editor })
    }

    fn resolve(&self, file: &Path) -> PathBuf {
        match &self.notes_dir {
            Some(root) => io::resolve_note_path(file, root),
            None => file.to_path_buf(),
        }
    }

    fn read(&self, file: &Path) -> Result<(PathBuf, String)> {
        let path = self.resolve(file);
        let text = io::read_note(&path).with_context(|| format!("reading {}", path.display()))?;
        log::info!("read {} ({} bytes)", path.display(), text.len());
        Ok((path, text))
    }

    fn emit(&self, path: &Path, text: &str, write: bool) -> Result<()> {
        if write {
            io::write_note(path, text).with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        } else {
            print!("{text}");
        }
        Ok(())
    }
}

fn run(cli: Cli) -> Result<()> {
    let ctx = Session::load(cli.notes_dir)?;

    match cli.command {
        Command::Analyze { file } => {
            let (_, text) = ctx.read(&file)?;
            println!("{}", dump(&analyze(&text)));
        }
        Command::Normalize { file, write } => {
            let (path, text) = ctx.read(&file)?;
            ctx.emit(&path, &encode(&parse(&text)), write)?;
        }
        Command::Display { file, cursor } => {
            let (_, text) = ctx.read(&file)?;
            let cursor = cursor.filter(|_| ctx.editor.reveal_active_markers);
            print!("{}", render_view(&MarkerView::for_cursor(&text, cursor)));
        }
        Command::Format {
            file,
            command,
            selection,
            write,
        } => {
            let (path, text) = ctx.read(&file)?;
            let out = format_note(text, command, selection);
            log::info!(
                "selection now {}..{}",
                out.selection.start,
                out.selection.end
            );
            ctx.emit(&path, &out.text, write)?;
        }
        Command::Newline { file, cursor } => {
            let (_, text) = ctx.read(&file)?;
            let out = type_newline(&text, cursor, &ctx.editor);
            log::info!("cursor now {}", out.selection.start);
            print!("{}", out.text);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    run(Cli::parse())
}
