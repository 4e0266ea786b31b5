// src/alphabet.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A key symbol that falls outside the trie's declared alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("symbol {0:?} is outside the trie alphabet")]
pub struct AlphabetError(pub char);

/// Maps key symbols to small integer codes and back.
///
/// The trie never interprets characters itself; every symbol passes through
/// this capability before coordinate expansion. Implementations must keep
/// `code` and `symbol` mutually inverse over the declared alphabet.
pub trait Alphabet {
  /// Zero-based code for `symbol`. Symbols outside the alphabet are rejected
  /// rather than mapped best-effort.
  fn code(&self, symbol: char) -> Result<usize, AlphabetError>;

  /// Inverse of `code`. Returns `None` for codes no symbol maps to.
  fn symbol(&self, code: usize) -> Option<char>;
}

/// The default alphabet: ASCII lowercase letters, `'a'` = 0 through `'z'` = 25.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lowercase;

impl Alphabet for Lowercase {
  fn code(&self, symbol: char) -> Result<usize, AlphabetError> {
    if symbol.is_ascii_lowercase() {
      Ok(symbol as usize - 'a' as usize)
    } else {
      Err(AlphabetError(symbol))
    }
  }

  fn symbol(&self, code: usize) -> Option<char> {
    if code < 26 {
      Some((b'a' + code as u8) as char)
    } else {
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lowercase_codes_are_zero_based() {
    assert_eq!(Lowercase.code('a'), Ok(0));
    assert_eq!(Lowercase.code('b'), Ok(1));
    assert_eq!(Lowercase.code('z'), Ok(25));
  }

  #[test]
  fn lowercase_rejects_everything_else() {
    for symbol in ['A', 'Z', '0', '9', ' ', '-', '_', 'é', '字'] {
      assert_eq!(Lowercase.code(symbol), Err(AlphabetError(symbol)));
    }
  }

  #[test]
  fn lowercase_symbol_inverts_code() {
    for code in 0..26 {
      let symbol = Lowercase.symbol(code).unwrap();
      assert_eq!(Lowercase.code(symbol), Ok(code));
    }
    assert_eq!(Lowercase.symbol(26), None);
  }
}
