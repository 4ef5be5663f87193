use std::fs;
use std::io;

use anyhow::{Context, Result, bail};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};

use crate::app::{App, ViewOptions};
use crate::ui::highlight::{Highlighter, PlainHighlighter, SyntectHighlighter};
use crate::ui::render_ui::ui;
use crate::ui::theme::{Theme, parse_color};

mod app;
mod inline;
mod patch;
mod split;
mod ui;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Patch file to display; "-" reads the patch from stdin. When omitted,
    /// the patch is taken from `git diff`.
    patch_file: Option<String>,

    /// Arguments forwarded to `git diff` (e.g. "HEAD~1", "main..feature")
    #[arg(short, long, default_value = "")]
    git_args: String,

    /// Disable syntax highlighting
    #[arg(long)]
    plain: bool,

    /// Language id for syntax highlighting (default: from file extension)
    #[arg(short, long)]
    language: Option<String>,

    /// Syntect color theme
    #[arg(short, long, default_value = "base16-ocean.dark")]
    theme: String,

    /// Hide line numbers
    #[arg(long)]
    no_line_numbers: bool,

    /// Hide hunk headers
    #[arg(long)]
    no_hunk_headers: bool,

    /// Hide the file list sidebar
    #[arg(long)]
    no_file_list: bool,

    /// Background color for added lines (#rrggbb)
    #[arg(long)]
    added_bg: Option<String>,

    /// Background color for removed lines (#rrggbb)
    #[arg(long)]
    removed_bg: Option<String>,
}

fn build_theme(args: &Args) -> Result<Theme> {
    let mut theme = Theme::default();
    if let Some(color) = &args.added_bg {
        theme.added_bg = parse_color(color)?;
    }
    if let Some(color) = &args.removed_bg {
        theme.removed_bg = parse_color(color)?;
    }
    Ok(theme)
}

fn build_highlighter(args: &Args) -> Result<Box<dyn Highlighter>> {
    if args.plain {
        return Ok(Box::new(PlainHighlighter));
    }
    match SyntectHighlighter::new(&args.theme) {
        Some(highlighter) => Ok(Box::new(highlighter)),
        None => bail!(
            "unknown theme '{}', available: {}",
            args.theme,
            SyntectHighlighter::theme_names().join(", ")
        ),
    }
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('j') | KeyCode::Down => app.next_file(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_file(),
                KeyCode::Char('d') | KeyCode::PageDown => {
                    for _ in 0..10 {
                        app.scroll_down();
                    }
                }
                KeyCode::Char('u') | KeyCode::PageUp => {
                    for _ in 0..10 {
                        app.scroll_up();
                    }
                }
                KeyCode::Char('g') => app.scroll_to_top(),
                KeyCode::Char('G') => app.scroll_to_bottom(),
                KeyCode::Char('n') => app.toggle_line_numbers(),
                KeyCode::Char('h') => app.toggle_hunk_headers(),
                KeyCode::Char('f') => app.toggle_file_list(),
                KeyCode::Char('?') => app.toggle_shortcuts(),
                _ => {}
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut app = App::new(
        build_highlighter(&args)?,
        ViewOptions {
            show_line_numbers: !args.no_line_numbers,
            show_hunk_headers: !args.no_hunk_headers,
            show_file_list: !args.no_file_list,
            language: args.language.clone(),
            theme: build_theme(&args)?,
        },
    );

    // Read the patch before touching the terminal so errors print normally.
    match args.patch_file.as_deref() {
        Some("-") => {
            let text = io::read_to_string(io::stdin()).context("failed to read patch from stdin")?;
            app.set_patch(&text);
        }
        Some(path) => {
            let text =
                fs::read_to_string(path).with_context(|| format!("failed to read '{path}'"))?;
            app.set_patch(&text);
        }
        None => app.load_from_git(&args.git_args)?,
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}
