use crate::Position;

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
pub const CELL_SIZE: i32 = 20;
pub const GRID_WIDTH: i32 = SCREEN_WIDTH / CELL_SIZE;
pub const GRID_HEIGHT: i32 = SCREEN_HEIGHT / CELL_SIZE;

/// Rightmost and bottom-most cell origins, in pixels.
pub const MAX_X: i32 = SCREEN_WIDTH - CELL_SIZE;
pub const MAX_Y: i32 = SCREEN_HEIGHT - CELL_SIZE;

pub const CENTER: Position = (SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);

pub const BACKGROUND: Rgb = Rgb(0, 0, 0);
pub const ACCENT: Rgb = Rgb(93, 216, 228);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// The cell-sized square whose top-left corner is `pos`.
    pub fn cell(pos: Position) -> Self {
        Rect { x: pos.0, y: pos.1, width: CELL_SIZE, height: CELL_SIZE }
    }

    /// Grid cells (column, row) touched by this rect, clipped to the board.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let first_col = self.x.div_euclid(CELL_SIZE).max(0);
        let first_row = self.y.div_euclid(CELL_SIZE).max(0);
        let last_col = (self.x + self.width - 1).div_euclid(CELL_SIZE).min(GRID_WIDTH - 1);
        let last_row = (self.y + self.height - 1).div_euclid(CELL_SIZE).min(GRID_HEIGHT - 1);

        (first_row..=last_row).flat_map(move |row| (first_col..=last_col).map(move |col| (col, row)))
    }
}

pub fn in_bounds(pos: Position) -> bool {
    (0..SCREEN_WIDTH).contains(&pos.0) && (0..SCREEN_HEIGHT).contains(&pos.1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_32_by_24() {
        assert_eq!((GRID_WIDTH, GRID_HEIGHT), (32, 24));
        assert_eq!((MAX_X, MAX_Y), (620, 460));
    }

    #[test]
    fn cell_rect_covers_one_cell() {
        let cells: Vec<_> = Rect::cell((100, 60)).cells().collect();
        assert_eq!(cells, vec![(5, 3)]);
    }

    #[test]
    fn rects_outside_the_board_are_clipped() {
        assert_eq!(Rect::cell((640, 0)).cells().count(), 0);
        assert_eq!(Rect::cell((-20, 0)).cells().count(), 0);

        let whole = Rect { x: -5, y: -5, width: 1000, height: 1000 };
        assert_eq!(whole.cells().count(), (GRID_WIDTH * GRID_HEIGHT) as usize);
    }

    #[test]
    fn bounds() {
        assert!(in_bounds((0, 0)));
        assert!(in_bounds((MAX_X, MAX_Y)));
        assert!(!in_bounds((SCREEN_WIDTH, 0)));
        assert!(!in_bounds((0, -CELL_SIZE)));
    }
}
