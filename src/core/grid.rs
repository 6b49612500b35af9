use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// A single grid-aligned cell, the atomic unit of position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighboring cell one step away in the given direction.
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset_by(dx, dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns true if turning from self to other would be a 180-degree turn.
    pub fn is_opposite(&self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Direction::Up, Direction::Down)
                | (Direction::Down, Direction::Up)
                | (Direction::Left, Direction::Right)
                | (Direction::Right, Direction::Left)
        )
    }

    /// Returns the delta (dx, dy) for moving in this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// The snake body, head at the front of the deque.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// A fresh single-cell snake at the given position.
    pub fn new(head: Cell) -> Self {
        let mut body = VecDeque::new();
        body.push_back(head);
        Self { body }
    }

    pub fn head(&self) -> Cell {
        // Non-empty by construction
        *self.body.front().expect("snake body is never empty")
    }

    pub fn tail(&self) -> Cell {
        *self.body.back().expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.iter().any(|&c| c == cell)
    }

    /// Check whether a cell coincides with any segment other than the head.
    pub fn collides_with_body(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&c| c == cell)
    }

    /// Move the snake forward to new_head, keeping the tail when growing.
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Append a segment on top of the current tail. The new segment
    /// overlaps the tail until the snake next moves.
    pub fn duplicate_tail(&mut self) {
        let tail = self.tail();
        self.body.push_back(tail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_step() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.step(Direction::Up), Cell::new(5, 4));
        assert_eq!(cell.step(Direction::Down), Cell::new(5, 6));
        assert_eq!(cell.step(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.step(Direction::Right), Cell::new(6, 5));
    }

    #[test]
    fn test_opposite_directions() {
        assert!(Direction::Up.is_opposite(Direction::Down));
        assert!(Direction::Left.is_opposite(Direction::Right));
        assert!(!Direction::Up.is_opposite(Direction::Left));
        assert!(!Direction::Right.is_opposite(Direction::Right));
    }

    #[test]
    fn test_snake_starts_as_single_cell() {
        let snake = Snake::new(Cell::new(10, 7));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(10, 7));
        assert_eq!(snake.tail(), Cell::new(10, 7));
    }

    #[test]
    fn test_advance_without_growing() {
        let mut snake = Snake::new(Cell::new(5, 5));
        snake.advance(Cell::new(6, 5), false);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert!(!snake.contains(Cell::new(5, 5)));
    }

    #[test]
    fn test_advance_with_growing() {
        let mut snake = Snake::new(Cell::new(5, 5));
        snake.advance(Cell::new(6, 5), true);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.tail(), Cell::new(5, 5));
    }

    #[test]
    fn test_duplicate_tail_overlaps_until_next_move() {
        let mut snake = Snake::new(Cell::new(5, 5));
        snake.advance(Cell::new(6, 5), true);
        snake.duplicate_tail();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Cell::new(5, 5));

        // The overlap resolves one move later
        snake.advance(Cell::new(7, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Cell::new(5, 5));
    }

    #[test]
    fn test_body_collision_excludes_head() {
        let mut snake = Snake::new(Cell::new(5, 5));
        snake.advance(Cell::new(6, 5), true);
        snake.advance(Cell::new(7, 5), true);

        assert!(!snake.collides_with_body(Cell::new(7, 5))); // head
        assert!(snake.collides_with_body(Cell::new(6, 5)));
        assert!(snake.collides_with_body(Cell::new(5, 5)));
        assert!(!snake.collides_with_body(Cell::new(8, 5)));
    }
}
