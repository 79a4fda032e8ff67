use std::fmt;

use super::Player;
use crate::error::DimensionError;

/// Standard number of columns.
pub const WIDTH: usize = 7;
/// Standard number of rows.
pub const HEIGHT: usize = 6;
/// Largest width or height a grid may be built with.
pub const MAX_DIMENSION: usize = 12;
/// Pieces needed in a line to win.
pub const RUN_LENGTH: usize = 4;

/// Scan directions as (column step, row step): horizontal, vertical,
/// diagonal down-right, diagonal down-left. Row indices grow downward.
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// Width and height of a grid, fixed when the grid is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: usize,
    height: usize,
}

impl Dimensions {
    /// The classic 7 columns by 6 rows.
    pub const STANDARD: Dimensions = Dimensions {
        width: WIDTH,
        height: HEIGHT,
    };

    pub fn new(width: usize, height: usize) -> Result<Self, DimensionError> {
        let in_range = |n: usize| (1..=MAX_DIMENSION).contains(&n);
        if !in_range(width) || !in_range(height) {
            return Err(DimensionError::OutOfRange { width, height });
        }
        Ok(Dimensions { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn occupant(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(player) => Some(player),
        }
    }
}

/// A cell coordinate. Row 0 is the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub fn new(row: usize, column: usize) -> Self {
        Position { row, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dimensions: Dimensions,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(dimensions: Dimensions) -> Self {
        Grid {
            dimensions,
            cells: vec![Cell::Empty; dimensions.cell_count()],
        }
    }

    /// Create an empty 7x6 grid
    pub fn standard() -> Self {
        Self::new(Dimensions::STANDARD)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    /// Get the cell at a specific position.
    /// Row 0 is the top, row `height - 1` is the bottom.
    ///
    /// Panics if the position is outside the grid.
    pub fn get(&self, row: usize, column: usize) -> Cell {
        assert!(
            row < self.height() && column < self.width(),
            "position ({row}, {column}) outside {}x{} grid",
            self.width(),
            self.height()
        );
        self.cells[self.index(row, column)]
    }

    fn index(&self, row: usize, column: usize) -> usize {
        row * self.width() + column
    }

    /// Check if a column is full. Columns outside the grid count as full.
    pub fn is_column_full(&self, column: usize) -> bool {
        self.find_landing_row(column).is_none()
    }

    /// Lowest empty row in the column, scanning bottom to top.
    pub fn find_landing_row(&self, column: usize) -> Option<usize> {
        if column >= self.width() {
            return None;
        }
        (0..self.height())
            .rev()
            .find(|&row| self.get(row, column).is_empty())
    }

    /// Number of pieces stacked in a column.
    pub fn column_height(&self, column: usize) -> usize {
        match self.find_landing_row(column) {
            Some(row) => self.height() - 1 - row,
            None if column < self.width() => self.height(),
            None => 0,
        }
    }

    /// Drop a piece in a column, returns the row where it landed, or `None`
    /// when the column is full or off the grid.
    pub fn drop_piece(&mut self, column: usize, player: Player) -> Option<usize> {
        let row = self.find_landing_row(column)?;
        let index = self.index(row, column);
        self.cells[index] = player.to_cell();
        Some(row)
    }

    /// Check if the grid is completely full
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Whether `player` owns four cells in a line anywhere on the grid.
    pub fn has_four_in_a_row(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// First four-in-a-row owned by `player`, scanning every cell as a start
    /// point in every direction.
    pub fn winning_line(&self, player: Player) -> Option<[Position; RUN_LENGTH]> {
        let target = player.to_cell();
        for row in 0..self.height() {
            for column in 0..self.width() {
                for &(dx, dy) in &DIRECTIONS {
                    let Some(line) = self.run_from(row, column, dx, dy) else {
                        continue;
                    };
                    if line.iter().all(|p| self.get(p.row, p.column) == target) {
                        return Some(line);
                    }
                }
            }
        }
        None
    }

    /// The run of positions starting at (row, column) and stepping by
    /// (dx, dy), or `None` if any of them falls off the grid.
    fn run_from(
        &self,
        row: usize,
        column: usize,
        dx: isize,
        dy: isize,
    ) -> Option<[Position; RUN_LENGTH]> {
        let mut line = [Position::new(row, column); RUN_LENGTH];
        for (step, slot) in line.iter_mut().enumerate() {
            let step = step as isize;
            let r = row.checked_add_signed(dy * step)?;
            let c = column.checked_add_signed(dx * step)?;
            if r >= self.height() || c >= self.width() {
                return None;
            }
            *slot = Position::new(r, c);
        }
        Some(line)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::standard()
    }
}

/// One line per row, top first: `.` empty, `X` player one, `O` player two.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height() {
            let line: Vec<String> = (0..self.width())
                .map(|column| match self.get(row, column) {
                    Cell::Empty => ".".to_string(),
                    Cell::Occupied(player) => player.symbol().to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
