//! Grid snake state machine: segment list, steering and movement cadence.

use std::collections::VecDeque;
use std::time::Duration;

use crate::game::{Direction, Position};

/// Outcome of one discrete move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Step {
    /// Head position after the move.
    pub head: Position,
    /// Cell released by the tail, `None` while the snake is growing.
    pub vacated: Option<Position>,
}

/// The snake on the grid, head first.
#[derive(Clone, Debug)]
pub struct Snake {
    segments: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
    pending_growth: u32,
    move_timer: Duration,
    move_interval: Duration,
}

impl Snake {
    /// Creates a snake whose body trails straight behind `head`.
    pub fn new(head: Position, direction: Direction, length: usize, move_interval: Duration) -> Self {
        let back = direction.opposite();
        let mut segments = VecDeque::with_capacity(length.max(1));
        let mut cell = head;
        segments.push_back(cell);
        for _ in 1..length {
            cell = cell.step(back);
            segments.push_back(cell);
        }

        Self {
            segments,
            direction,
            pending_direction: direction,
            pending_growth: 0,
            move_timer: Duration::ZERO,
            move_interval,
        }
    }

    /// Builds a snake from explicit segments (head first).
    #[cfg(test)]
    pub(crate) fn from_segments(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
        move_interval: Duration,
    ) -> Self {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        assert!(!segments.is_empty(), "a snake needs at least one segment");
        Self {
            segments,
            direction,
            pending_direction: direction,
            pending_growth: 0,
            move_timer: Duration::ZERO,
            move_interval,
        }
    }

    pub fn head(&self) -> Position {
        self.segments[0]
    }

    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn is_growing(&self) -> bool {
        self.pending_growth > 0
    }

    pub fn move_interval(&self) -> Duration {
        self.move_interval
    }

    pub fn set_move_interval(&mut self, interval: Duration) {
        self.move_interval = interval;
    }

    /// Queues a turn. Reversing onto the neck is ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.segments.len() > 1 && direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = direction;
    }

    /// Keeps the tail on the next move.
    pub fn grow(&mut self) {
        self.grow_by(1);
    }

    pub fn grow_by(&mut self, count: u32) {
        self.pending_growth += count;
    }

    /// Drops up to `count` tail segments, never below a single head.
    pub fn shrink(&mut self, count: usize) {
        let removable = count.min(self.segments.len() - 1);
        for _ in 0..removable {
            self.segments.pop_back();
        }
    }

    /// Accumulates `dt`; returns true once a move is due and resets the timer.
    pub fn advance_timer(&mut self, dt: Duration) -> bool {
        self.move_timer += dt;
        if self.move_timer >= self.move_interval {
            self.move_timer = Duration::ZERO;
            true
        } else {
            false
        }
    }

    /// Candidate result of the next move, without mutating the snake.
    pub fn peek_step(&self) -> Step {
        Step {
            head: self.head().step(self.pending_direction),
            vacated: (!self.is_growing()).then(|| self.tail()),
        }
    }

    /// Commits a move whose new head is `head`.
    ///
    /// Trailing segments shift into their predecessor's cell; the tail is
    /// released unless growth is pending.
    pub fn commit(&mut self, head: Position) -> Step {
        self.direction = self.pending_direction;
        self.segments.push_front(head);

        let vacated = if self.pending_growth > 0 {
            self.pending_growth -= 1;
            None
        } else {
            self.segments.pop_back()
        };

        Step { head, vacated }
    }

    /// Performs one move in the pending direction.
    pub fn step(&mut self) -> Step {
        let head = self.peek_step().head;
        self.commit(head)
    }

    /// Advances the cadence timer and moves when the interval elapses.
    pub fn tick(&mut self, dt: Duration) -> Option<Step> {
        self.advance_timer(dt).then(|| self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3, INTERVAL);
        let body: Vec<_> = snake.segments().copied().collect();
        assert_eq!(
            body,
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]
        );
    }

    #[test]
    fn test_single_segment_moves_without_trail() {
        let mut snake = Snake::new(Position::new(10, 10), Direction::Right, 1, INTERVAL);
        let step = snake.step();
        assert_eq!(step.head, Position::new(11, 10));
        assert_eq!(step.vacated, Some(Position::new(10, 10)));
        assert_eq!(snake.segments().copied().collect::<Vec<_>>(), vec![Position::new(11, 10)]);
    }

    #[test]
    fn test_two_segments_shift() {
        let mut snake = Snake::from_segments(
            [Position::new(10, 10), Position::new(9, 10)],
            Direction::Right,
            INTERVAL,
        );
        snake.step();
        assert_eq!(
            snake.segments().copied().collect::<Vec<_>>(),
            vec![Position::new(11, 10), Position::new(10, 10)]
        );
    }

    #[test]
    fn test_reversal_is_ignored() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3, INTERVAL);
        snake.set_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), Direction::Right);
        snake.step();
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn test_reversal_allowed_for_lone_head() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 1, INTERVAL);
        snake.set_direction(Direction::Left);
        snake.step();
        assert_eq!(snake.head(), Position::new(4, 5));
    }

    #[test]
    fn test_reversal_checks_current_not_pending() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3, INTERVAL);
        snake.set_direction(Direction::Up);
        // Still moving right until the next move commits the turn.
        snake.set_direction(Direction::Left);
        assert_eq!(snake.pending_direction(), Direction::Up);
    }

    #[test]
    fn test_growth_keeps_tail_once() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 2, INTERVAL);
        snake.grow();
        assert!(snake.is_growing());
        let step = snake.step();
        assert_eq!(step.vacated, None);
        assert_eq!(snake.len(), 3);
        assert!(!snake.is_growing());
        snake.step();
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_grow_by_spreads_over_moves() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 1, INTERVAL);
        snake.grow_by(3);
        for _ in 0..5 {
            snake.step();
        }
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_shrink_never_removes_head() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3, INTERVAL);
        snake.shrink(10);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Position::new(5, 5));
    }

    #[test]
    fn test_tick_waits_for_interval() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 1, INTERVAL);
        assert!(snake.tick(Duration::from_millis(60)).is_none());
        assert_eq!(snake.head(), Position::new(5, 5));
        let step = snake.tick(Duration::from_millis(60)).expect("move due");
        assert_eq!(step.head, Position::new(6, 5));
        assert!(snake.tick(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_peek_does_not_mutate() {
        let snake = Snake::new(Position::new(5, 5), Direction::Up, 2, INTERVAL);
        let step = snake.peek_step();
        assert_eq!(step.head, Position::new(5, 6));
        assert_eq!(step.vacated, Some(Position::new(5, 4)));
        assert_eq!(snake.head(), Position::new(5, 5));
    }
}
