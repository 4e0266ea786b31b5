mod alphabet;
mod coords;
mod node;

pub use alphabet::{Alphabet, AlphabetError, Lowercase};

use node::Node;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const DEFAULT_BRANCH_FACTOR: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FractalTrieStats {
  pub nodes: usize,
  pub values: usize,
  pub max_depth: usize,
}

/// A trie keyed by strings over a fixed alphabet, where every symbol is
/// expanded into a pair of base-`branch_factor` coordinates before descending.
/// Each symbol therefore costs two tree levels instead of one wide fan-out.
///
/// Keys containing symbols outside the alphabet are rejected by every
/// operation, and a rejected key never modifies the trie.
///
/// Note: with the default branch factor of 4 only `4 * 4 = 16` distinct
/// coordinate pairs exist, so lowercase codes 16..=25 (`'q'`..`'z'`) alias
/// onto smaller ones (`'q'` collides with `'a'`). A branch factor whose
/// square covers the alphabet (6 for lowercase ASCII) makes the expansion
/// injective.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FractalTrie<V, A = Lowercase> {
  root: Node<V>,
  branch_factor: usize,
  len: usize,
  alphabet: A,
}

impl<V, A: Default> Default for FractalTrie<V, A> {
  fn default() -> Self {
    Self {
      root: Node::default(),
      branch_factor: DEFAULT_BRANCH_FACTOR,
      len: 0,
      alphabet: A::default(),
    }
  }
}

impl<V> FractalTrie<V> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Creates a trie over the lowercase alphabet with a custom branch factor.
  ///
  /// # Panics
  /// Panics if `branch_factor` is zero.
  pub fn with_branch_factor(branch_factor: usize) -> Self {
    Self::with_alphabet(branch_factor, Lowercase)
  }
}

impl<V, A: Alphabet> FractalTrie<V, A> {
  /// Creates a trie with a custom branch factor and symbol alphabet.
  ///
  /// # Panics
  /// Panics if `branch_factor` is zero.
  pub fn with_alphabet(branch_factor: usize, alphabet: A) -> Self {
    assert!(branch_factor > 0, "branch factor must be positive");
    Self {
      root: Node::default(),
      branch_factor,
      len: 0,
      alphabet,
    }
  }

  pub fn branch_factor(&self) -> usize {
    self.branch_factor
  }

  // The whole path is computed before the tree is touched, so a rejected
  // symbol anywhere in the key cannot leave partial structure behind.
  fn coord_path(&self, key: &str) -> Result<Vec<usize>, AlphabetError> {
    let mut path = Vec::with_capacity(key.len() * coords::LEVELS);
    for symbol in key.chars() {
      let code = self.alphabet.code(symbol)?;
      path.extend(coords::expand(code, self.branch_factor));
    }
    Ok(path)
  }

  /// Stores `value` under `key`, returning the value it replaced, if any.
  /// The empty key is legal and stores the value at the root.
  pub fn insert<K: AsRef<str>>(&mut self, key: K, value: V) -> Result<Option<V>, AlphabetError> {
    let path = self.coord_path(key.as_ref())?;
    let result = self.root.insert(&path, value, self.branch_factor);
    if result.is_none() {
      self.len += 1;
    }
    Ok(result)
  }

  pub fn get<K: AsRef<str>>(&self, key: K) -> Result<Option<&V>, AlphabetError> {
    let path = self.coord_path(key.as_ref())?;
    Ok(self.root.get(&path))
  }

  pub fn get_mut<K: AsRef<str>>(&mut self, key: K) -> Result<Option<&mut V>, AlphabetError> {
    let path = self.coord_path(key.as_ref())?;
    Ok(self.root.get_mut(&path))
  }

  /// Removes the value stored under `key` and returns it. `Ok(None)` means
  /// the key held no value. Only the value slot is cleared; intermediate
  /// nodes created for the key are deliberately left in place (lazy delete).
  pub fn remove<K: AsRef<str>>(&mut self, key: K) -> Result<Option<V>, AlphabetError> {
    let path = self.coord_path(key.as_ref())?;
    let result = self.root.remove(&path);
    if result.is_some() {
      self.len -= 1;
    }
    Ok(result)
  }

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn clear(&mut self) {
    self.root = Node::default();
    self.len = 0;
  }

  /// Opt-in compaction: drops the structure that lazy deletes leave behind.
  /// Lookups are unaffected; only `stats().nodes` shrinks. Never invoked
  /// implicitly by `remove`.
  pub fn prune(&mut self) {
    self.root.prune();
  }

  pub fn stats(&self) -> FractalTrieStats {
    let mut stats = FractalTrieStats::default();
    self.root.collect_stats(0, &mut stats);
    stats
  }

  /// Returns an iterator over all entries. Keys are reconstructed by
  /// recomposing each coordinate pair into a code, so aliased keys (see the
  /// type-level note) come back in their canonical spelling. Order follows
  /// coordinate order and is otherwise unspecified.
  pub fn iter(&self) -> FractalTrieIter<'_, V, A> {
    FractalTrieIter::new(&self.root, self.branch_factor, &self.alphabet)
  }
}

impl<V: PartialEq, A: Alphabet> PartialEq for FractalTrie<V, A> {
  // Compares the stored bindings, not the node layout, so a trie carrying
  // structural leftovers from lazy deletes still equals its pruned twin.
  fn eq(&self, other: &Self) -> bool {
    self.len == other.len
      && self
        .iter()
        .all(|(k, v)| matches!(other.get(&k), Ok(Some(w)) if *w == *v))
  }
}

impl<'a, V, A: Alphabet> IntoIterator for &'a FractalTrie<V, A> {
  type Item = (String, &'a V);
  type IntoIter = FractalTrieIter<'a, V, A>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

struct Frame<'a, V> {
  node: &'a Node<V>,
  // Key prefix of fully decoded symbols; a pending frame shares its parent's.
  key: String,
  // Set while one coordinate of a pair has been consumed.
  pending: Option<usize>,
  next_child: usize,
  visited: bool,
}

pub struct FractalTrieIter<'a, V, A> {
  stack: Vec<Frame<'a, V>>,
  branch_factor: usize,
  alphabet: &'a A,
}

impl<'a, V, A: Alphabet> FractalTrieIter<'a, V, A> {
  fn new(root: &'a Node<V>, branch_factor: usize, alphabet: &'a A) -> Self {
    Self {
      stack: vec![Frame {
        node: root,
        key: String::new(),
        pending: None,
        next_child: 0,
        visited: false,
      }],
      branch_factor,
      alphabet,
    }
  }
}

impl<'a, V, A: Alphabet> Iterator for FractalTrieIter<'a, V, A> {
  type Item = (String, &'a V);

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let frame = self.stack.last_mut()?;
      let node = frame.node;

      // Values only live at symbol boundaries, never mid-pair.
      if !frame.visited {
        frame.visited = true;
        if frame.pending.is_none() {
          if let Some(value) = node.value.as_ref() {
            return Some((frame.key.clone(), value));
          }
        }
      }

      let mut next = None;
      while frame.next_child < node.children.len() {
        let c = frame.next_child;
        frame.next_child += 1;
        if let Some(child) = node.children[c].as_ref() {
          next = Some((c, child));
          break;
        }
      }

      let Some((c, child)) = next else {
        self.stack.pop();
        continue;
      };

      let (key, pending) = match frame.pending {
        None => (frame.key.clone(), Some(c)),
        Some(c0) => {
          let code = coords::compose(c0, c, self.branch_factor);
          match self.alphabet.symbol(code) {
            Some(symbol) => {
              let mut key = frame.key.clone();
              key.push(symbol);
              (key, None)
            }
            // A pair no symbol decodes to cannot hold values inserted
            // through this API; skip the subtree.
            None => continue,
          }
        }
      };

      self.stack.push(Frame {
        node: child,
        key,
        pending,
        next_child: 0,
        visited: false,
      });
    }
  }
}
