//! Primitive drawing surface
//!
//! The scene only speaks in grid cells and a handful of primitives, so any
//! backend that can paint a rectangle, a circle or an icon can show a run.

use crate::game::{FoodKind, Position};

use super::icons::IconHandle;

/// Colour role of a drawn cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shade {
    Empty,
    Head,
    Body,
    Food { kind: FoodKind, verified: bool },
}

pub trait Surface {
    fn clear(&mut self);
    fn fill_rect(&mut self, pos: Position, shade: Shade);
    fn fill_circle(&mut self, pos: Position, shade: Shade);
    fn draw_image(&mut self, pos: Position, icon: &IconHandle, shade: Shade);
}

/// One character cell of a `CellCanvas`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub shade: Shade,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: '.',
        shade: Shade::Empty,
    };
}

/// Grid of glyphs the TUI renderer paints
#[derive(Debug, Clone)]
pub struct CellCanvas {
    size: usize,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::EMPTY; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells.get(y * self.size + x)
    }

    /// Rows of cells, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    fn put(&mut self, pos: Position, cell: Cell) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let (x, y) = (pos.x as usize, pos.y as usize);
        if x < self.size && y < self.size {
            self.cells[y * self.size + x] = cell;
        }
    }
}

impl Surface for CellCanvas {
    fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    fn fill_rect(&mut self, pos: Position, shade: Shade) {
        let glyph = match shade {
            Shade::Head => '■',
            _ => '□',
        };
        self.put(pos, Cell { glyph, shade });
    }

    fn fill_circle(&mut self, pos: Position, shade: Shade) {
        let glyph = match shade {
            Shade::Food {
                kind: FoodKind::Fraud,
                verified: true,
            } => '◉',
            _ => '●',
        };
        self.put(pos, Cell { glyph, shade });
    }

    fn draw_image(&mut self, pos: Position, icon: &IconHandle, shade: Shade) {
        self.put(
            pos,
            Cell {
                glyph: icon.glyph,
                shade,
            },
        );
    }
}

/// A captured draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCommand {
    Clear,
    Rect(Position, Shade),
    Circle(Position, Shade),
    Image(Position, char, Shade),
}

/// Surface that records every call, for tests
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, pos: Position, shade: Shade) {
        self.commands.push(DrawCommand::Rect(pos, shade));
    }

    fn fill_circle(&mut self, pos: Position, shade: Shade) {
        self.commands.push(DrawCommand::Circle(pos, shade));
    }

    fn draw_image(&mut self, pos: Position, icon: &IconHandle, shade: Shade) {
        self.commands
            .push(DrawCommand::Image(pos, icon.glyph, shade));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_draws_and_clears() {
        let mut canvas = CellCanvas::new(4);
        canvas.fill_rect(Position::new(1, 2), Shade::Head);
        canvas.fill_circle(
            Position::new(3, 0),
            Shade::Food {
                kind: FoodKind::Normal,
                verified: false,
            },
        );

        assert_eq!(canvas.cell(1, 2).map(|c| c.glyph), Some('■'));
        assert_eq!(canvas.cell(3, 0).map(|c| c.glyph), Some('●'));
        assert_eq!(canvas.rows().count(), 4);

        canvas.clear();
        assert_eq!(canvas.cell(1, 2), Some(&Cell::EMPTY));
    }

    #[test]
    fn test_canvas_ignores_out_of_range() {
        let mut canvas = CellCanvas::new(3);
        canvas.fill_rect(Position::new(-1, 0), Shade::Body);
        canvas.fill_rect(Position::new(3, 1), Shade::Body);

        assert!(canvas.rows().flatten().all(|cell| *cell == Cell::EMPTY));
        assert_eq!(canvas.cell(3, 0), None);
    }
}
