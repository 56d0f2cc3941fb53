use std::collections::VecDeque;

use super::direction::Direction;
use super::food::Food;
use super::outcome::RunOutcome;

/// Coordinate bound for a grid of `grid_size` cells per side
pub fn grid_side(grid_size: usize) -> i32 {
    i32::try_from(grid_size).unwrap_or(i32::MAX)
}

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction applied on the last movement tick
    pub direction: Direction,
}

impl Snake {
    /// Create a straight snake with its tail trailing behind the head
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head; the caller decides whether to drop the tail
    pub fn push_head(&mut self, head: Position) {
        self.body.insert(0, head);
    }

    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }

    /// Remove up to `cells` from the tail without going below `min_len`
    ///
    /// Returns the number of cells removed.
    pub fn shrink(&mut self, cells: usize, min_len: usize) -> usize {
        let removable = cells.min(self.body.len().saturating_sub(min_len));
        let keep = self.body.len() - removable;
        self.body.truncate(keep);
        removable
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete state of one run
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub foods: Vec<Food>,
    pub grid_size: usize,
    /// Direction queued by input, committed on the next movement tick
    pub pending_direction: Direction,
    pub score: u32,
    pub steps: u32,
    pub time_remaining: u32,
    pub paused: bool,
    pub movement_interval_ms: u64,
    /// Movement ticks are ignored before this instant
    pub stunned_until: u64,
    /// Input is negated before this instant
    pub reversed_until: u64,
    /// When each powered item in the trailing window was eaten
    pub powered_eats: VecDeque<u64>,
    /// Set exactly once, when the run ends
    pub outcome: Option<RunOutcome>,
}

impl GameState {
    /// Create a fresh run around a snake
    pub fn new(snake: Snake, grid_size: usize, time_remaining: u32, movement_interval_ms: u64) -> Self {
        Self {
            pending_direction: snake.direction,
            snake,
            foods: Vec::new(),
            grid_size,
            score: 0,
            steps: 0,
            time_remaining,
            paused: false,
            movement_interval_ms,
            stunned_until: 0,
            reversed_until: 0,
            powered_eats: VecDeque::new(),
            outcome: None,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.outcome.is_some()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let side = self.side();
        pos.x >= 0 && pos.x < side && pos.y >= 0 && pos.y < side
    }

    /// Grid side as a coordinate bound
    pub fn side(&self) -> i32 {
        grid_side(self.grid_size)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Neither snake nor food sits on the cell
    pub fn is_free(&self, pos: Position) -> bool {
        !self.is_occupied_by_snake(pos) && self.food_index_at(pos).is_none()
    }

    pub fn food_index_at(&self, pos: Position) -> Option<usize> {
        self.foods.iter().position(|food| food.position == pos)
    }

    /// Powered items still inside the trailing window
    pub fn danger_count(&self) -> usize {
        self.powered_eats.len()
    }

    /// Forget powered eats older than `window_ms` before `now`
    pub fn prune_powered(&mut self, now: u64, window_ms: u64) {
        while let Some(&oldest) = self.powered_eats.front() {
            if now.saturating_sub(oldest) > window_ms {
                self.powered_eats.pop_front();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::food::FoodKind;

    fn state_with(snake: Snake) -> GameState {
        GameState::new(snake, 20, 90, 140)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
    }

    #[test]
    fn test_bounds_on_huge_grid_do_not_wrap() {
        let state = GameState::new(
            Snake::new(Position::new(5, 5), Direction::Right, 3),
            4_294_967_316,
            90,
            140,
        );
        assert_eq!(state.side(), i32::MAX);
        assert!(state.is_in_bounds(Position::new(5, 5)));
        assert!(!state.is_in_bounds(Position::new(-1, 5)));
    }

    #[test]
    fn test_manhattan_distance() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.manhattan_distance(Position::new(5, 6)), 1);
        assert_eq!(pos.manhattan_distance(Position::new(6, 6)), 2);
        assert_eq!(pos.manhattan_distance(Position::new(2, 9)), 7);
        assert_eq!(pos.manhattan_distance(pos), 0);
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.body[2], Position::new(3, 5));
    }

    #[test]
    fn test_push_head_and_drop_tail() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.push_head(Position::new(6, 5));
        snake.drop_tail();
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert!(!snake.occupies(Position::new(3, 5)));

        snake.push_head(Position::new(7, 5));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_shrink_respects_minimum() {
        let mut snake = Snake::new(Position::new(9, 5), Direction::Right, 6);
        assert_eq!(snake.shrink(3, 2), 3);
        assert_eq!(snake.len(), 3);

        assert_eq!(snake.shrink(3, 2), 1);
        assert_eq!(snake.len(), 2);

        assert_eq!(snake.shrink(3, 2), 0);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(9, 5));
    }

    #[test]
    fn test_bounds_checking() {
        let state = state_with(Snake::new(Position::new(5, 5), Direction::Right, 3));

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(19, 19)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(20, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 20)));
    }

    #[test]
    fn test_free_cells() {
        let mut state = state_with(Snake::new(Position::new(5, 5), Direction::Right, 3));
        state
            .foods
            .push(Food::new(Position::new(8, 8), FoodKind::Normal, "Ethereum"));

        assert!(!state.is_free(Position::new(4, 5)));
        assert!(!state.is_free(Position::new(8, 8)));
        assert!(state.is_free(Position::new(9, 9)));
        assert_eq!(state.food_index_at(Position::new(8, 8)), Some(0));
    }

    #[test]
    fn test_prune_powered_window() {
        let mut state = state_with(Snake::new(Position::new(5, 5), Direction::Right, 3));
        state.powered_eats.extend([0, 5_000, 14_000]);

        state.prune_powered(15_000, 15_000);
        assert_eq!(state.danger_count(), 3);

        state.prune_powered(15_001, 15_000);
        assert_eq!(state.danger_count(), 2);

        state.prune_powered(40_000, 15_000);
        assert_eq!(state.danger_count(), 0);
    }
}
