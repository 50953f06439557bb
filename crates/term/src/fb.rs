//! Framebuffer, style and layout types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn fg(fg: Rgb) -> Self {
        Self {
            fg,
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }

    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::fg(Rgb::new(220, 220, 220))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().into_cell(' ')
    }
}

/// Axis-aligned area in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self { x, y, w, h }
    }

    /// Same rect with `n` cells trimmed from every side.
    pub fn inset(self, n: u16) -> Self {
        Self {
            x: self.x.saturating_add(n),
            y: self.y.saturating_add(n),
            w: self.w.saturating_sub(n * 2),
            h: self.h.saturating_sub(n * 2),
        }
    }

    /// One-row strip starting `dy` rows down.
    pub fn row(self, dy: u16) -> Self {
        Self {
            y: self.y.saturating_add(dy),
            h: 1,
            ..self
        }
    }
}

/// Where a label sits inside its [`Rect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterCenter,
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, style.into_cell(ch));
    }

    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        for (i, ch) in s.chars().enumerate() {
            let cx = x.saturating_add(i as u16);
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
        }
    }

    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) {
        self.put_str(x, y, &value.to_string(), style);
    }

    pub fn fill_rect(&mut self, rect: Rect, ch: char, style: CellStyle) {
        for dy in 0..rect.h {
            for dx in 0..rect.w {
                self.put_char(rect.x.saturating_add(dx), rect.y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Draw a label inside `rect`. `\n` starts a new line; each line is
    /// aligned on its own and clipped to the rect.
    pub fn draw_text(&mut self, rect: Rect, text: &str, align: TextAlign, style: CellStyle) {
        let line_count = text.lines().count() as u16;
        let top = match align {
            TextAlign::CenterCenter => rect.y + rect.h.saturating_sub(line_count) / 2,
            _ => rect.y,
        };

        for (i, line) in text.lines().enumerate() {
            let dy = i as u16;
            if dy >= rect.h {
                break;
            }
            let len = (line.chars().count() as u16).min(rect.w);
            let x = match align {
                TextAlign::TopLeft => rect.x,
                TextAlign::TopCenter | TextAlign::CenterCenter => rect.x + (rect.w - len) / 2,
                TextAlign::TopRight => rect.x + rect.w - len,
            };
            for (j, ch) in line.chars().take(len as usize).enumerate() {
                self.put_char(x + j as u16, top + dy, ch, style);
            }
        }
    }

    /// Row `y` as a string, for tests and debugging.
    pub fn row_string(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_outside_are_ignored() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(1, 0, "abcdef", CellStyle::default());
        fb.put_char(5, 5, 'x', CellStyle::default());
        assert_eq!(fb.row_string(0), " ab");
        assert_eq!(fb.row_string(1), "   ");
    }

    #[test]
    fn text_alignments() {
        let mut fb = FrameBuffer::new(10, 3);
        let rect = Rect::new(0, 0, 10, 3);
        let style = CellStyle::default();
        fb.draw_text(rect, "ab", TextAlign::TopLeft, style);
        fb.draw_text(rect, "cd", TextAlign::TopRight, style);
        fb.draw_text(rect.row(2), "mid", TextAlign::TopCenter, style);
        assert_eq!(fb.row_string(0), "ab      cd");
        assert_eq!(fb.row_string(2), "   mid    ");
    }

    #[test]
    fn center_center_splits_lines() {
        let mut fb = FrameBuffer::new(8, 4);
        fb.draw_text(
            Rect::new(0, 0, 8, 4),
            "one\ntwo",
            TextAlign::CenterCenter,
            CellStyle::default(),
        );
        assert_eq!(fb.row_string(1), "  one   ");
        assert_eq!(fb.row_string(2), "  two   ");
    }

    #[test]
    fn long_text_clipped_to_rect() {
        let mut fb = FrameBuffer::new(6, 1);
        fb.draw_text(Rect::new(1, 0, 3, 1), "abcdef", TextAlign::TopRight, CellStyle::default());
        assert_eq!(fb.row_string(0), " abc  ");
    }

    #[test]
    fn inset_and_row() {
        let r = Rect::new(2, 3, 10, 6).inset(1);
        assert_eq!(r, Rect::new(3, 4, 8, 4));
        assert_eq!(r.row(2), Rect::new(3, 6, 8, 1));
    }
}
