//! Screen layout: tab bar, content rows, status bar.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{self, Write};

use super::{Editor, KEY_HELP, MessageKind};
use crate::runtime::Runtime;

/// Tab stops are every `TAB_WIDTH` columns.
pub const TAB_WIDTH: usize = 8;

/// Replace tabs with spaces up to the next tab stop.
pub fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut width = 0;
    for c in line.chars() {
        if c == '\t' {
            let n = TAB_WIDTH - width % TAB_WIDTH;
            out.extend(std::iter::repeat_n(' ', n));
            width += n;
        } else {
            out.push(c);
            width += 1;
        }
    }
    out
}

/// Screen column of the `col`-th character of `line`.
pub fn display_width(line: &str, col: usize) -> usize {
    let prefix: String = line.chars().take(col).collect();
    expand_tabs(&prefix).chars().count()
}

/// Draw the whole screen for a terminal of `width` x `height` cells.
pub fn draw<W: Write, R: Runtime>(
    out: &mut W,
    editor: &mut Editor<R>,
    width: u16,
    height: u16,
) -> io::Result<()> {
    let (width, height) = (width as usize, height as usize);
    if height < 3 || width == 0 {
        return Ok(());
    }
    let content_height = height - 2;
    editor.scroll_to_cursor(content_height);

    queue!(out, Hide, Clear(ClearType::All), MoveTo(0, 0))?;
    draw_tab_bar(out, editor, width)?;
    let (cursor_x, cursor_y) = draw_content(out, editor, width, content_height)?;
    draw_status_bar(out, editor, width, (height - 1) as u16)?;
    queue!(out, MoveTo(cursor_x, cursor_y), Show)?;

    out.flush()
}

fn draw_tab_bar<W: Write, R: Runtime>(out: &mut W, editor: &Editor<R>, width: usize) -> io::Result<()> {
    let mut used = 0;
    for i in 0..editor.steps().len() {
        if i == editor.current_step() {
            queue!(
                out,
                SetBackgroundColor(Color::Cyan),
                SetForegroundColor(Color::Black),
                SetAttribute(Attribute::Bold)
            )?;
        } else {
            queue!(
                out,
                SetBackgroundColor(Color::DarkGrey),
                SetForegroundColor(Color::White)
            )?;
        }
        let label = format!(" {} ", i + 1);
        used += label.len() + 1;
        queue!(
            out,
            Print(label),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print(" ")
        )?;
    }

    // File name right-aligned when it fits
    let name_len = editor.name().chars().count();
    if used + name_len < width {
        queue!(
            out,
            Print(format!("{:>w$}", editor.name(), w = width - used))
        )?;
    }
    Ok(())
}

/// Draws the visible lines and returns the screen position of the cursor.
fn draw_content<W: Write, R: Runtime>(
    out: &mut W,
    editor: &Editor<R>,
    width: usize,
    content_height: usize,
) -> io::Result<(u16, u16)> {
    let step = &editor.steps()[editor.current_step()];
    let (row, col) = editor.cursor();
    let mut cursor = (0u16, 1u16);

    for vrow in 0..content_height {
        let abs_row = editor.scroll() + vrow;
        let y = (vrow + 1) as u16;
        queue!(out, MoveTo(0, y))?;

        let Some(line) = step.get(abs_row) else {
            queue!(out, SetForegroundColor(Color::DarkGrey), Print("~"), ResetColor)?;
            continue;
        };

        // The first line of a step is the command
        let color = if abs_row == 0 { Color::Green } else { Color::White };
        let visible: String = expand_tabs(line).chars().take(width).collect();
        queue!(out, SetForegroundColor(color), Print(visible), ResetColor)?;

        if abs_row == row {
            let x = display_width(line, col).min(width - 1);
            cursor = (x as u16, y);
        }
    }
    Ok(cursor)
}

fn draw_status_bar<W: Write, R: Runtime>(
    out: &mut W,
    editor: &Editor<R>,
    width: usize,
    y: u16,
) -> io::Result<()> {
    let (bg, fg) = match editor.message().map(|m| m.kind) {
        Some(MessageKind::Error) => (Color::Red, Color::White),
        Some(MessageKind::Warn) => (Color::Yellow, Color::Black),
        _ => (Color::Green, Color::Black),
    };

    let text = status_text(editor);
    let shown: String = if text.chars().count() < width {
        format!("{:<width$}", text, width = width)
    } else {
        text.chars().take(width).collect()
    };

    queue!(
        out,
        MoveTo(0, y),
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(shown),
        ResetColor
    )
}

fn status_text<R: Runtime>(editor: &Editor<R>) -> String {
    let dirty = if editor.is_dirty() { '*' } else { ' ' };
    let detail = editor
        .message()
        .map(|m| m.text.as_str())
        .unwrap_or(KEY_HELP);
    format!(
        "{}Step {}/{} Ln {} | {}",
        dirty,
        editor.current_step() + 1,
        editor.steps().len(),
        editor.cursor().0 + 1,
        detail
    )
}
