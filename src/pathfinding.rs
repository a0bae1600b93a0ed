//! Pathfinding collaborator contract and the default A* implementation.
//!
//! The AI subsystem only depends on the [`Pathfinder`] trait; tests and
//! embedders can substitute their own search. The shipped implementation is
//! a plain 4-neighbor A* over a boolean obstruction grid.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Boolean obstruction grid over the map bounds.
///
/// Out-of-bounds cells count as blocked.
pub struct ObstructionGrid {
    pub width: i32,
    pub height: i32,
    blocked: Vec<bool>,
}

impl ObstructionGrid {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            blocked: vec![false; (width.max(0) * height.max(0)) as usize],
        }
    }

    pub fn block(&mut self, x: i32, y: i32) {
        if self.in_bounds(x, y) {
            self.blocked[(y * self.width + x) as usize] = true;
        }
    }

    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return true;
        }
        self.blocked[(y * self.width + x) as usize]
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }
}

/// Pathfinding collaborator contract.
///
/// Returns the path from start to goal excluding the start cell, or None if
/// the goal is unreachable.
pub trait Pathfinder {
    fn find_path(
        &self,
        start: (i32, i32),
        goal: (i32, i32),
        grid: &ObstructionGrid,
    ) -> Option<Vec<(i32, i32)>>;
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct Node {
    x: i32,
    y: i32,
}

#[derive(Clone, Copy, PartialEq, Eq)]
struct ScoredNode {
    node: Node,
    f_score: i32, // g_score + heuristic
}

// BinaryHeap is a max-heap, so we reverse the ordering for min-heap behavior
impl Ord for ScoredNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_score.cmp(&self.f_score)
    }
}

impl PartialOrd for ScoredNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Default A* search: 4-neighbor, Manhattan heuristic.
///
/// The goal cell is exempt from the blocked check so an entity can path onto
/// a melee target's cell; the final step then resolves as an attack.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPathfinder;

impl Pathfinder for AStarPathfinder {
    fn find_path(
        &self,
        start: (i32, i32),
        goal: (i32, i32),
        grid: &ObstructionGrid,
    ) -> Option<Vec<(i32, i32)>> {
        let start_node = Node {
            x: start.0,
            y: start.1,
        };
        let goal_node = Node {
            x: goal.0,
            y: goal.1,
        };

        if !grid.in_bounds(goal.0, goal.1) {
            return None;
        }

        let mut open_set = BinaryHeap::new();
        let mut came_from: HashMap<Node, Node> = HashMap::new();
        let mut g_score: HashMap<Node, i32> = HashMap::new();

        g_score.insert(start_node, 0);
        open_set.push(ScoredNode {
            node: start_node,
            f_score: heuristic(start, goal),
        });

        while let Some(current) = open_set.pop() {
            if current.node == goal_node {
                return Some(reconstruct_path(&came_from, current.node));
            }

            let current_g = *g_score.get(&current.node).unwrap_or(&i32::MAX);

            for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
                let nx = current.node.x + dx;
                let ny = current.node.y + dy;
                let neighbor = Node { x: nx, y: ny };

                // Blocked cells are impassable, except the goal itself.
                if grid.is_blocked(nx, ny) && (nx, ny) != goal {
                    continue;
                }

                let tentative_g = current_g + 1;
                let neighbor_g = *g_score.get(&neighbor).unwrap_or(&i32::MAX);

                if tentative_g < neighbor_g {
                    came_from.insert(neighbor, current.node);
                    g_score.insert(neighbor, tentative_g);
                    open_set.push(ScoredNode {
                        node: neighbor,
                        f_score: tentative_g + heuristic((nx, ny), goal),
                    });
                }
            }
        }

        None // No path found
    }
}

/// Manhattan distance heuristic
fn heuristic(from: (i32, i32), to: (i32, i32)) -> i32 {
    (from.0 - to.0).abs() + (from.1 - to.1).abs()
}

/// Reconstruct the path from the came_from map, dropping the start cell.
fn reconstruct_path(came_from: &HashMap<Node, Node>, mut current: Node) -> Vec<(i32, i32)> {
    let mut path = vec![(current.x, current.y)];

    while let Some(&prev) = came_from.get(&current) {
        path.push((prev.x, prev.y));
        current = prev;
    }

    path.reverse();
    if !path.is_empty() {
        path.remove(0);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid() -> ObstructionGrid {
        ObstructionGrid::new(8, 8)
    }

    #[test]
    fn straight_line_path() {
        let path = AStarPathfinder
            .find_path((1, 1), (4, 1), &open_grid())
            .unwrap();
        assert_eq!(path, vec![(2, 1), (3, 1), (4, 1)]);
    }

    #[test]
    fn routes_around_a_wall() {
        let mut grid = open_grid();
        for y in 0..7 {
            grid.block(3, y);
        }
        let path = AStarPathfinder.find_path((1, 1), (5, 1), &grid).unwrap();
        assert_eq!(path.last(), Some(&(5, 1)));
        assert!(path.iter().all(|&(x, y)| !grid.is_blocked(x, y)));
    }

    #[test]
    fn unreachable_goal_returns_none() {
        let mut grid = open_grid();
        for (dx, dy) in [(0, 1), (0, -1), (1, 0), (-1, 0)] {
            grid.block(5 + dx, 5 + dy);
        }
        // Fully walled in - the goal exemption only applies to the goal
        // cell itself, not its surroundings.
        assert!(AStarPathfinder.find_path((1, 1), (5, 5), &grid).is_none());
    }

    #[test]
    fn blocked_goal_is_still_reachable() {
        let mut grid = open_grid();
        grid.block(4, 4);
        let path = AStarPathfinder.find_path((2, 4), (4, 4), &grid).unwrap();
        assert_eq!(path.last(), Some(&(4, 4)));
    }

    #[test]
    fn start_equals_goal_yields_empty_path() {
        let path = AStarPathfinder
            .find_path((3, 3), (3, 3), &open_grid())
            .unwrap();
        assert!(path.is_empty());
    }
}
