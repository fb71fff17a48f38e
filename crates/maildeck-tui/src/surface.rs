//! Draw surface for widget repaints.
//!
//! Wraps a ratatui [`Buffer`] with the cursor-and-pen drawing model widgets
//! expect: move to a position, set a pen style, draw bounded text, clear to
//! the end of the line. Widgets must bracket styled draws by restoring the
//! pen to the normal style so sibling widgets are unaffected by whatever
//! drew before them.
//!
//! Keeping this as an in-memory buffer (rather than writing straight to the
//! terminal) is what makes repaint behavior assertable in tests.

use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;

/// An in-memory cell grid widgets repaint into.
#[derive(Debug, Clone)]
pub struct Surface {
    buf: Buffer,
    cursor: Position,
    pen: Style,
}

impl Surface {
    /// Creates a blank surface of the given size, cursor at the origin.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buf: Buffer::empty(Rect::new(0, 0, width, height)),
            cursor: Position::ORIGIN,
            pen: Style::default(),
        }
    }

    pub fn area(&self) -> Rect {
        self.buf.area
    }

    /// Moves the cursor. Out-of-bounds positions are clamped at draw time.
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor = Position::new(x, y);
    }

    /// Sets the pen style used by subsequent draw and clear calls.
    pub fn set_style(&mut self, style: Style) {
        self.pen = style;
    }

    /// Current pen style.
    pub fn style(&self) -> Style {
        self.pen
    }

    /// Draws `text` at the cursor with the pen style, clipped to `max_cols`
    /// display columns (unicode-width aware). The cursor advances past the
    /// drawn text; clearing the rest of the line is [`Self::clear_to_eol`]'s
    /// job.
    pub fn draw_status_line(&mut self, text: &str, max_cols: u16) {
        let Position { x, y } = self.cursor;
        if y >= self.buf.area.height || x >= self.buf.area.width {
            return;
        }
        let bound = max_cols.min(self.buf.area.width - x);
        let (end_x, _) = self
            .buf
            .set_stringn(x, y, text, bound as usize, self.pen);
        self.cursor = Position::new(end_x, y);
    }

    /// Clears from the cursor to the end of the row with pen-styled blanks.
    pub fn clear_to_eol(&mut self) {
        let Position { x, y } = self.cursor;
        if y >= self.buf.area.height {
            return;
        }
        for clear_x in x..self.buf.area.width {
            if let Some(cell) = self.buf.cell_mut(Position::new(clear_x, y)) {
                cell.set_symbol(" ");
                cell.set_style(self.pen);
            }
        }
    }

    /// Text content of one row, trailing blanks trimmed. Test helper.
    pub fn row_text(&self, y: u16) -> String {
        let mut row = String::new();
        for x in 0..self.buf.area.width {
            if let Some(cell) = self.buf.cell(Position::new(x, y)) {
                row.push_str(cell.symbol());
            }
        }
        row.trim_end().to_string()
    }

    /// Style of one cell. Test helper.
    pub fn cell_style(&self, x: u16, y: u16) -> Option<Style> {
        self.buf.cell(Position::new(x, y)).map(|cell| cell.style())
    }
}
