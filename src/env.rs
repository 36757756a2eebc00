use std::collections::HashMap;

use crate::value::Value;

/// Handle to a temp-arena entry. Ids are synthesized from a strictly
/// increasing counter and never reused within a session, so a stale handle
/// can never alias a newer value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TempId(u64);

/// The interpreter's binding store, with three scopes of distinct
/// lifetimes:
///
/// - *persistent* bindings created by assignment, alive until overwritten;
/// - a *temp* arena of intermediate values, keyed by synthetic integer ids
///   and drained unconditionally after every top-level evaluation;
/// - an ordered *side-return* list filled by multi-result functions and
///   merged into the persistent scope once the top-level expression has
///   resolved.
///
/// Nothing here is shared across threads; an embedding that evaluates
/// concurrently must give each in-flight evaluation its own `Environment`.
#[derive(Debug, Default)]
pub struct Environment {
  persistent: HashMap<String, Value>,
  temp: HashMap<u64, Value>,
  next_temp: u64,
  side_returns: Vec<(String, Value)>,
}

impl Environment {
  pub fn new() -> Self {
    Environment::default()
  }

  /// Looks up a persistent binding.
  pub fn resolve(&self, name: &str) -> Option<&Value> {
    self.persistent.get(name)
  }

  pub fn bind_persistent(&mut self, name: &str, value: Value) {
    self.persistent.insert(name.to_string(), value);
  }

  /// Stores an intermediate value in the temp arena.
  pub fn bind_temp(&mut self, value: Value) -> TempId {
    let id = TempId(self.next_temp);
    self.next_temp += 1;
    self.temp.insert(id.0, value);
    id
  }

  pub fn temp(&self, id: TempId) -> Option<&Value> {
    self.temp.get(&id.0)
  }

  /// Drops every temp binding. Called once per top-level line, on success
  /// and on error, so arena growth is bounded by a single evaluation.
  pub fn clear_temp(&mut self) {
    self.temp.clear();
  }

  pub fn temp_len(&self) -> usize {
    self.temp.len()
  }

  /// Appends a named extra result from a multi-return function.
  pub fn add_side_return(&mut self, name: &str, value: Value) {
    self.side_returns.push((name.to_string(), value));
  }

  /// Merges the side-return list into the persistent scope in insertion
  /// order and returns the names merged, for printing.
  pub fn flush_side_returns(&mut self) -> Vec<String> {
    let mut names = Vec::with_capacity(self.side_returns.len());
    for (name, value) in self.side_returns.drain(..) {
      self.persistent.insert(name.clone(), value);
      names.push(name);
    }
    names
  }

  /// Discards pending side-returns without merging (failure path).
  pub fn clear_side_returns(&mut self) {
    self.side_returns.clear();
  }

  /// Persistent bindings in arbitrary order, for the repl's `who` listing.
  pub fn bindings(&self) -> impl Iterator<Item = (&str, &Value)> {
    self.persistent.iter().map(|(k, v)| (k.as_str(), v))
  }
}
