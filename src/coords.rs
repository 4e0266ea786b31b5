// src/coords.rs

/// Number of base-`branch` digits each symbol code expands into.
pub const LEVELS: usize = 2;

/// Expands a symbol code into its fractal coordinate pair: two successive
/// base-`branch` digits, least-significant first. Codes at or above
/// `branch^2` are accepted; the modulo silently discards high-order digits,
/// so such codes alias onto smaller ones.
pub fn expand(code: usize, branch: usize) -> [usize; LEVELS] {
  [code % branch, (code / branch) % branch]
}

/// Recomposes a coordinate pair into the code the trie saw. Inverse of
/// `expand` only for codes below `branch^2`; aliased codes come back in
/// their canonical (smallest) form.
pub fn compose(c0: usize, c1: usize, branch: usize) -> usize {
  c0 + c1 * branch
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expand_is_least_significant_first() {
    // 'h' = 7 in base 4 is 13, digits reversed
    assert_eq!(expand(7, 4), [3, 1]);
    assert_eq!(expand(0, 4), [0, 0]);
    assert_eq!(expand(15, 4), [3, 3]);
  }

  #[test]
  fn expand_discards_high_order_digits() {
    // 16 = 100 in base 4; only the low two digits survive
    assert_eq!(expand(16, 4), [0, 0]);
    assert_eq!(expand(25, 4), expand(9, 4));
  }

  #[test]
  fn compose_inverts_expand_below_branch_squared() {
    for branch in 1..8 {
      for code in 0..branch * branch {
        let [c0, c1] = expand(code, branch);
        assert_eq!(compose(c0, c1, branch), code);
      }
    }
  }
}
