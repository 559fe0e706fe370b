/// Row/column address of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

/// Row-major grid of word slots. A filled cell is never cleared or rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Option<String>>,
}

impl Board {
    pub const DEFAULT_ROWS: usize = 4;
    pub const DEFAULT_COLS: usize = 4;

    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells[row * self.cols + col].as_deref()
    }

    pub fn has_space(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        !self.has_space()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// First empty cell scanning rows top to bottom, each left to right.
    pub fn first_empty(&self) -> Option<CellRef> {
        let idx = self.cells.iter().position(Option::is_none)?;
        Some(CellRef {
            row: idx / self.cols,
            col: idx % self.cols,
        })
    }

    /// Write `word` into the first empty cell. Returns None on a full board.
    pub fn place(&mut self, word: &str) -> Option<CellRef> {
        let cell = self.first_empty()?;
        self.cells[cell.row * self.cols + cell.col] = Some(word.to_string());
        Some(cell)
    }

    /// Rows of cells for display, empty cells as "".
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.cells
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(|c| c.clone().unwrap_or_default()).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ROWS, Self::DEFAULT_COLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_board_is_empty() {
        let board = Board::default();
        assert_eq!((board.rows(), board.cols()), (4, 4));
        assert!(board.has_space());
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.get(0, 0), None);
        assert_eq!(board.first_empty(), Some(CellRef { row: 0, col: 0 }));
    }

    #[test]
    fn fills_row_major() {
        let mut board = Board::default();
        let mut placed = Vec::new();
        for i in 0..16 {
            placed.push(board.place(&format!("W{i}")).unwrap());
        }
        let expected: Vec<CellRef> = (0..4)
            .flat_map(|row| (0..4).map(move |col| CellRef { row, col }))
            .collect();
        assert_eq!(placed, expected);
        assert_eq!(board.get(1, 0), Some("W4"));
        assert_eq!(board.get(3, 3), Some("W15"));
    }

    #[test]
    fn full_board_refuses_more() {
        let mut board = Board::new(1, 2);
        board.place("ONE");
        board.place("TWO");
        assert!(board.is_full());
        assert_eq!(board.place("THREE"), None);
        assert_eq!(board.to_rows(), vec![vec!["ONE".to_string(), "TWO".to_string()]]);
    }

    #[test]
    fn out_of_range_get_is_none() {
        let board = Board::default();
        assert_eq!(board.get(4, 0), None);
        assert_eq!(board.get(0, 4), None);
    }

    #[test]
    fn display_rows_show_empty_cells() {
        let mut board = Board::new(2, 2);
        board.place("CAB");
        assert_eq!(
            board.to_rows(),
            vec![
                vec!["CAB".to_string(), String::new()],
                vec![String::new(), String::new()],
            ]
        );
    }
}
