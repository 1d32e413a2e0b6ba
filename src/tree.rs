//! Explicit game tree used by the iterative minimax search.
//!
//! Nodes live in a flat arena and refer to their children by index, so the
//! search can walk the tree with a plain stack of ids instead of recursion.
//! A tree is built for a single search and dropped afterwards.

use std::ops::Range;

use crate::state::{BoardState, Move, Outcome};

/// Index of a node in its [`StateTree`].
pub type NodeId = usize;

/// A node in the search tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    /// The game state at this node
    pub state: BoardState,
    /// Move leading here from the parent (`None` at the root)
    pub mv: Option<Move>,
    /// Best guaranteed score, once computed
    pub score: Option<Outcome>,
    /// Child nodes, one per legal move. `None` until expanded; an expanded
    /// node with no legal moves has `Some(vec![])`.
    pub children: Option<Vec<NodeId>>,
}

impl TreeNode {
    pub fn new(state: BoardState, mv: Option<Move>) -> Self {
        Self {
            state,
            mv,
            score: None,
            children: None,
        }
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    #[inline]
    pub fn is_scored(&self) -> bool {
        self.score.is_some()
    }
}

/// Arena of [`TreeNode`]s rooted at [`StateTree::ROOT`].
#[derive(Clone, Debug)]
pub struct StateTree {
    nodes: Vec<TreeNode>,
}

impl StateTree {
    pub const ROOT: NodeId = 0;

    /// Create a tree holding only an unexpanded root.
    pub fn new(root: BoardState) -> Self {
        Self {
            nodes: vec![TreeNode::new(root, None)],
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// Number of nodes created so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of `id` in move order; empty if it has not been expanded.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &TreeNode> + '_ {
        self.nodes[id]
            .children
            .iter()
            .flatten()
            .map(|&child| &self.nodes[child])
    }

    /// Create one child per legal move of `id`, in move order, and return
    /// their ids.
    pub fn expand(&mut self, id: NodeId) -> Range<NodeId> {
        let start = self.nodes.len();
        let successors: Vec<_> = self.nodes[id].state.successors().collect();
        self.nodes.extend(
            successors
                .into_iter()
                .map(|(mv, state)| TreeNode::new(state, Some(mv))),
        );
        let end = self.nodes.len();
        self.nodes[id].children = Some((start..end).collect());
        start..end
    }

    /// Record the score of `id`. A node is scored exactly once.
    pub fn set_score(&mut self, id: NodeId, score: Outcome) {
        let node = &mut self.nodes[id];
        debug_assert!(node.score.is_none(), "node {id} scored twice");
        node.score = Some(score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;

    #[test]
    fn test_new_tree() {
        let state = BoardState::new(Player::P1, 1).unwrap();
        let tree = StateTree::new(state.clone());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().state, state);
        assert_eq!(tree.root().score, None);
        assert!(!tree.root().is_expanded());
        assert_eq!(tree.children(StateTree::ROOT).count(), 0);
    }

    #[test]
    fn test_expand() {
        let mut tree = StateTree::new(BoardState::new(Player::P1, 2).unwrap());
        let ids = tree.expand(StateTree::ROOT);
        assert_eq!(ids, 1..8);
        assert!(tree.root().is_expanded());
        let moves: Vec<_> = tree.children(StateTree::ROOT).filter_map(|c| c.mv).collect();
        assert_eq!(moves, "ABCDEFG".chars().map(Move::Cell).collect::<Vec<_>>());
        assert!(tree.children(StateTree::ROOT).all(|c| c.state.current_player() == Player::P2));
    }

    #[test]
    fn test_expand_terminal_leaf() {
        let state = BoardState::new(Player::P1, 1)
            .unwrap()
            .make_move(Move::Cell('A'))
            .unwrap();
        let mut tree = StateTree::new(state);
        assert!(tree.expand(StateTree::ROOT).is_empty());
        assert_eq!(tree.root().children, Some(vec![]));
    }

    #[test]
    fn test_set_score() {
        let mut tree = StateTree::new(BoardState::new(Player::P1, 1).unwrap());
        tree.set_score(StateTree::ROOT, Outcome::Win);
        assert!(tree.root().is_scored());
        assert_eq!(tree.root().score, Some(Outcome::Win));
    }
}
