#![cfg(feature = "serde")]

use fractal_trie::FractalTrie;

#[test]
fn test_round_trip_preserves_config_and_contents() {
  // Non-default branch factor must survive the trip
  let mut original = FractalTrie::with_branch_factor(6);
  original.insert("hello", 42).unwrap();
  original.insert("he", 7).unwrap();
  original.insert("", 1).unwrap();

  let serialized = serde_json::to_string(&original).unwrap();
  let loaded: FractalTrie<i32> = serde_json::from_str(&serialized).unwrap();

  assert_eq!(loaded.branch_factor(), 6);
  assert_eq!(loaded.get("hello"), Ok(Some(&42)));
  assert_eq!(loaded.get("he"), Ok(Some(&7)));
  assert_eq!(loaded.get(""), Ok(Some(&1)));
  assert_eq!(original, loaded);
}

#[test]
fn test_round_trip_keeps_lazy_delete_structure() {
  let mut original = FractalTrie::with_branch_factor(4);
  original.insert("hello", 42).unwrap();
  original.remove("hello").unwrap();

  let serialized = serde_json::to_string(&original).unwrap();
  let loaded: FractalTrie<i32> = serde_json::from_str(&serialized).unwrap();

  // The empty path nodes are part of the state, not an artifact
  assert_eq!(loaded.stats(), original.stats());
  assert!(loaded.is_empty());
}

#[test]
fn test_malformed_payload() {
  let bad_json = r#"{ "root": "NotANode", "branch_factor": 4, "len": 0, "alphabet": null }"#;
  let res: Result<FractalTrie<i32>, _> = serde_json::from_str(bad_json);
  assert!(res.is_err());
}
