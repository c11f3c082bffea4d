//! Frontier queue driving breadth-first growth

use std::collections::VecDeque;

use super::index::GridIndex;

/// FIFO of placed cells whose neighbours have not been tried yet
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    queue: VecDeque<GridIndex>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, index: GridIndex) {
        self.queue.push_back(index);
    }

    /// Take the oldest pending cell
    pub fn pop(&mut self) -> Option<GridIndex> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.push(GridIndex::new(1, 1));
        frontier.push(GridIndex::new(2, 1));
        frontier.push(GridIndex::new(3, 1));
        assert_eq!(frontier.len(), 3);
        assert_eq!(frontier.pop(), Some(GridIndex::new(1, 1)));
        assert_eq!(frontier.pop(), Some(GridIndex::new(2, 1)));
        frontier.clear();
        assert!(frontier.is_empty());
        assert_eq!(frontier.pop(), None);
    }
}
