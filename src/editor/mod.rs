//! Full-screen step editor.
//!
//! [`Editor`] is the state machine: it owns the steps, the cursor and the
//! status message, and reacts to key events. Drawing lives in `view`, the
//! terminal setup and event loop in `terminal`.

mod terminal;
mod view;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use std::path::{Path, PathBuf};

use crate::lab::{self, Step, new_step};
use crate::runtime::Runtime;

pub use terminal::run;
pub use view::{TAB_WIDTH, display_width, draw, expand_tabs};

pub const KEY_HELP: &str = "^N/^P:Step ^L:Clear ^S:Save ^Q:Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Ok,
    Warn,
    Error,
}

/// Transient status bar message, cleared by the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub kind: MessageKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CursorMemo {
    row: usize,
    col: usize,
    scroll: usize,
}

pub struct Editor<R: Runtime> {
    runtime: R,
    path: PathBuf,
    name: String,
    steps: Vec<Step>,
    memo: Vec<CursorMemo>,
    current: usize,
    row: usize,
    /// Cursor column in characters, not bytes.
    col: usize,
    scroll: usize,
    dirty: bool,
    message: Option<Message>,
    running: bool,
    quit_pending: bool,
}

impl<R: Runtime> Editor<R> {
    pub fn new(runtime: R, path: &Path, mut steps: Vec<Step>) -> Self {
        if steps.is_empty() {
            steps.push(new_step());
        }
        for step in steps.iter_mut().filter(|s| s.is_empty()) {
            *step = new_step();
        }

        Self {
            runtime,
            path: path.to_path_buf(),
            name: path.display().to_string(),
            memo: vec![CursorMemo::default(); steps.len()],
            steps,
            current: 0,
            row: 0,
            col: 0,
            scroll: 0,
            dirty: false,
            message: None,
            running: true,
            quit_pending: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    /// `(row, col)` of the cursor within the current step, col in characters.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    fn step(&self) -> &Step {
        &self.steps[self.current]
    }

    fn step_mut(&mut self) -> &mut Step {
        &mut self.steps[self.current]
    }

    fn line(&self) -> &str {
        &self.steps[self.current][self.row]
    }

    fn line_len(&self) -> usize {
        self.line().chars().count()
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
        self.quit_pending = false;
    }

    fn set_message(&mut self, text: impl Into<String>, kind: MessageKind) {
        self.message = Some(Message {
            text: text.into(),
            kind,
        });
    }

    /// Adjust the scroll offset so the cursor row is inside a window of
    /// `content_height` rows.
    pub fn scroll_to_cursor(&mut self, content_height: usize) {
        if content_height == 0 {
            return;
        }
        if self.row < self.scroll {
            self.scroll = self.row;
        } else if self.row >= self.scroll + content_height {
            self.scroll = self.row + 1 - content_height;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let is_quit = ctrl && key.code == KeyCode::Char('q');

        if !is_quit {
            self.message = None;
            self.quit_pending = false;
        }

        match key.code {
            KeyCode::Char('c') if ctrl => self.running = false,
            KeyCode::Char('q') if ctrl => self.request_quit(),
            KeyCode::Char('s') if ctrl => self.save(),
            KeyCode::Char('n') if ctrl => self.next_step(),
            KeyCode::Char('p') if ctrl => self.prev_step(),
            KeyCode::Char('a') if ctrl => self.col = 0,
            KeyCode::Char('e') if ctrl => self.col = self.line_len(),
            KeyCode::Char('l') if ctrl => self.clear_step(),

            KeyCode::PageDown => self.next_step(),
            KeyCode::PageUp => self.prev_step(),

            KeyCode::Left => self.col = self.col.saturating_sub(1),
            KeyCode::Right => {
                if self.col < self.line_len() {
                    self.col += 1;
                }
            }
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Home => self.col = 0,
            KeyCode::End => self.col = self.line_len(),

            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Tab => self.insert_char('\t'),
            KeyCode::Char(c) if !ctrl && !c.is_control() => self.insert_char(c),

            _ => {}
        }
    }

    fn request_quit(&mut self) {
        if !self.dirty || self.quit_pending {
            self.running = false;
        } else {
            self.quit_pending = true;
            self.set_message("Unsaved! ^Q again to discard", MessageKind::Warn);
        }
    }

    fn switch_step(&mut self, target: usize) {
        if target == self.current || target >= self.steps.len() {
            return;
        }
        self.memo[self.current] = CursorMemo {
            row: self.row,
            col: self.col,
            scroll: self.scroll,
        };
        self.current = target;

        let memo = self.memo[target];
        self.row = memo.row.min(self.step().len() - 1);
        self.col = memo.col.min(self.line_len());
        self.scroll = memo.scroll.min(self.row);
        debug!("Switched to step {}", target + 1);
    }

    fn next_step(&mut self) {
        if self.current + 1 < self.steps.len() {
            self.switch_step(self.current + 1);
        }
    }

    fn prev_step(&mut self) {
        if self.current > 0 {
            self.switch_step(self.current - 1);
        }
    }

    fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len());
        }
    }

    fn move_down(&mut self) {
        if self.row + 1 < self.step().len() {
            self.row += 1;
            self.col = self.col.min(self.line_len());
        }
    }

    fn insert_char(&mut self, c: char) {
        let (row, at) = (self.row, byte_index(self.line(), self.col));
        self.step_mut()[row].insert(at, c);
        self.col += 1;
        self.mark_dirty();
    }

    fn insert_newline(&mut self) {
        let (row, at) = (self.row, byte_index(self.line(), self.col));
        let rest = self.step_mut()[row].split_off(at);
        self.step_mut().insert(row + 1, rest);
        self.row += 1;
        self.col = 0;
        self.mark_dirty();
    }

    fn backspace(&mut self) {
        let row = self.row;
        if self.col > 0 {
            let at = byte_index(self.line(), self.col - 1);
            self.step_mut()[row].remove(at);
            self.col -= 1;
            self.mark_dirty();
        } else if row > 0 {
            let current = self.step_mut().remove(row);
            self.row -= 1;
            self.col = self.line_len();
            self.step_mut()[row - 1].push_str(&current);
            self.mark_dirty();
        }
    }

    fn delete(&mut self) {
        let row = self.row;
        if self.col < self.line_len() {
            let at = byte_index(self.line(), self.col);
            self.step_mut()[row].remove(at);
            self.mark_dirty();
        } else if row + 1 < self.step().len() {
            let next = self.step_mut().remove(row + 1);
            self.step_mut()[row].push_str(&next);
            self.mark_dirty();
        }
    }

    fn clear_step(&mut self) {
        *self.step_mut() = new_step();
        self.row = 0;
        self.col = 0;
        self.scroll = 0;
        self.mark_dirty();
        self.set_message("Step cleared", MessageKind::Ok);
    }

    fn save(&mut self) {
        match lab::save_file(&self.runtime, &self.path, &self.steps) {
            Ok(()) => {
                self.dirty = false;
                self.set_message("Saved", MessageKind::Ok);
            }
            Err(e) => {
                self.set_message(format!("Save error: {:#}", e), MessageKind::Error);
            }
        }
    }
}

/// Byte offset of the `col`-th character, or the end of the line.
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}
