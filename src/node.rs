// src/node.rs

use crate::FractalTrieStats;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One level of the coordinate tree: a child slot per coordinate in
/// `[0, branch_factor)` plus the value slot for keys terminating here.
///
/// Values are distinguished from children by the separate `value` field, so
/// no coordinate is reserved as a sentinel.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Node<V> {
  // Empty until the first child is attached, then exactly branch_factor slots.
  pub(crate) children: Vec<Option<Node<V>>>,
  pub(crate) value: Option<V>,
}

impl<V> Default for Node<V> {
  fn default() -> Self {
    Self {
      children: Vec::new(),
      value: None,
    }
  }
}

impl<V> Node<V> {
  pub fn get(&self, path: &[usize]) -> Option<&V> {
    match path.split_first() {
      None => self.value.as_ref(),
      Some((&c, rest)) => match self.children.get(c) {
        Some(Some(child)) => child.get(rest),
        _ => None,
      },
    }
  }

  pub fn get_mut(&mut self, path: &[usize]) -> Option<&mut V> {
    match path.split_first() {
      None => self.value.as_mut(),
      Some((&c, rest)) => match self.children.get_mut(c) {
        Some(Some(child)) => child.get_mut(rest),
        _ => None,
      },
    }
  }

  pub fn insert(&mut self, path: &[usize], value: V, branch: usize) -> Option<V> {
    match path.split_first() {
      None => self.value.replace(value),
      Some((&c, rest)) => {
        if self.children.is_empty() {
          self.children.resize_with(branch, || None);
        }
        self.children[c]
          .get_or_insert_with(Node::default)
          .insert(rest, value, branch)
      }
    }
  }

  /// Clears only the value slot at the end of `path`. Structure created for
  /// the key stays behind (lazy delete); reclaiming it is `prune`'s job.
  pub fn remove(&mut self, path: &[usize]) -> Option<V> {
    match path.split_first() {
      None => self.value.take(),
      Some((&c, rest)) => match self.children.get_mut(c) {
        Some(Some(child)) => child.remove(rest),
        _ => None,
      },
    }
  }

  /// Drops every subtree holding no values. Returns true when this node
  /// itself holds nothing, so the parent can drop it too.
  pub fn prune(&mut self) -> bool {
    for slot in &mut self.children {
      if let Some(child) = slot {
        if child.prune() {
          *slot = None;
        }
      }
    }
    if self.children.iter().all(Option::is_none) {
      self.children = Vec::new();
    }
    self.children.is_empty() && self.value.is_none()
  }

  pub fn collect_stats(&self, depth: usize, stats: &mut FractalTrieStats) {
    stats.nodes += 1;
    if self.value.is_some() {
      stats.values += 1;
    }
    if depth > stats.max_depth {
      stats.max_depth = depth;
    }
    for child in self.children.iter().flatten() {
      child.collect_stats(depth + 1, stats);
    }
  }
}
