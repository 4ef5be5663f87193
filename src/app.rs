use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use ratatui::widgets::ListState;

use crate::patch::{self, ParsedFile};
use crate::ui::highlight::{HighlightSpan, Highlighter};
use crate::ui::theme::Theme;

/// View configuration passed through from the command line. None of these
/// affect parsing or diff computation.
pub struct ViewOptions {
    pub show_line_numbers: bool,
    pub show_hunk_headers: bool,
    pub show_file_list: bool,
    pub language: Option<String>,
    pub theme: Theme,
}

pub struct App {
    pub files: Vec<ParsedFile>,
    pub selected_file: usize,
    pub file_list_state: ListState,
    pub scroll_offset: usize,
    pub show_shortcuts: bool,
    pub show_line_numbers: bool,
    pub show_hunk_headers: bool,
    pub show_file_list: bool,
    pub theme: Theme,
    language_override: Option<String>,
    highlighter: Box<dyn Highlighter>,
}

impl App {
    pub fn new(highlighter: Box<dyn Highlighter>, options: ViewOptions) -> Self {
        let mut state = ListState::default();
        state.select(Some(0));

        Self {
            files: Vec::new(),
            selected_file: 0,
            file_list_state: state,
            scroll_offset: 0,
            show_shortcuts: true,
            show_line_numbers: options.show_line_numbers,
            show_hunk_headers: options.show_hunk_headers,
            show_file_list: options.show_file_list,
            theme: options.theme,
            language_override: options.language,
            highlighter,
        }
    }

    pub fn set_patch(&mut self, patch: &str) {
        self.files = patch::parse(patch);
        self.selected_file = 0;
        self.scroll_offset = 0;

        if !self.files.is_empty() {
            self.file_list_state.select(Some(0));
        }
    }

    pub fn load_from_git(&mut self, args: &str) -> Result<()> {
        let mut cmd = Command::new("git");
        cmd.arg("diff");

        if !args.is_empty() {
            for arg in args.split_whitespace() {
                cmd.arg(arg);
            }
        }

        let output = cmd.output().context("failed to run git diff")?;
        let diff_text = String::from_utf8_lossy(&output.stdout);
        self.set_patch(&diff_text);

        Ok(())
    }

    pub fn next_file(&mut self) {
        if !self.files.is_empty() {
            self.selected_file = (self.selected_file + 1) % self.files.len();
            self.file_list_state.select(Some(self.selected_file));
            self.scroll_offset = 0;
        }
    }

    pub fn previous_file(&mut self) {
        if !self.files.is_empty() {
            self.selected_file = if self.selected_file == 0 {
                self.files.len() - 1
            } else {
                self.selected_file - 1
            };
            self.file_list_state.select(Some(self.selected_file));
            self.scroll_offset = 0;
        }
    }

    /// Number of rows the split view will actually show for the selected
    /// file, accounting for hidden hunk headers.
    pub fn visible_row_count(&self) -> usize {
        let Some(file) = self.files.get(self.selected_file) else {
            return 0;
        };
        if self.show_hunk_headers {
            file.row_count()
        } else {
            file.rows
                .iter()
                .filter(|row| {
                    !matches!(&row.left, Some(l) if l.kind == crate::patch::LineKind::Hunk)
                })
                .count()
        }
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset + 1 < self.visible_row_count() {
            self.scroll_offset += 1;
        }
    }

    pub fn scroll_up(&mut self) {
        if self.scroll_offset > 0 {
            self.scroll_offset -= 1;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.visible_row_count().saturating_sub(1);
    }

    pub fn toggle_shortcuts(&mut self) {
        self.show_shortcuts = !self.show_shortcuts;
    }

    pub fn toggle_line_numbers(&mut self) {
        self.show_line_numbers = !self.show_line_numbers;
    }

    pub fn toggle_hunk_headers(&mut self) {
        self.show_hunk_headers = !self.show_hunk_headers;
        self.scroll_offset = self.scroll_offset.min(self.visible_row_count().saturating_sub(1));
    }

    pub fn toggle_file_list(&mut self) {
        self.show_file_list = !self.show_file_list;
    }

    /// Language id for the highlighter: the `--language` override when set,
    /// otherwise the file extension.
    pub fn language_for(&self, file: &ParsedFile) -> String {
        if let Some(language) = &self.language_override {
            return language.clone();
        }

        Path::new(&file.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("txt")
            .to_string()
    }

    pub fn highlight(&self, text: &str, language: &str) -> Vec<HighlightSpan> {
        self.highlighter.highlight(text, language)
    }
}
