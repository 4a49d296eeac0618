//! Variable bindings and the solution sets the solvers produce.
//!
//! An [`Assignment`] keeps its bindings in the order they were made, which for the DPLL
//! search is branching order. A [`Model`] is one satisfying result: either such bindings,
//! or the bare `true` reported when the formula collapsed to a tautology before any
//! variable had to be chosen. [`Solutions`] is the ordered list of models for a formula.

use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

/// Ordered map from variable name to truth value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Assignment(Vec<(String, bool)>);

impl Assignment {
    /// An assignment with no bindings.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Binds `name` to `value`, overwriting an existing binding in place.
    pub fn bind(&mut self, name: &str, value: bool) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    /// A copy of `self` with `name` bound to `value`.
    #[must_use]
    pub fn with(&self, name: &str, value: bool) -> Self {
        let mut next = self.clone();
        next.bind(name, value);
        next
    }

    /// The value bound to `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    /// Whether `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bindings in the order they were made.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Every total assignment over `variables` that agrees with `self`.
    ///
    /// Variables of `variables` that `self` leaves free are enumerated true-first in the
    /// order given. Bindings of `self` outside `variables` are kept.
    #[must_use]
    pub fn completions(&self, variables: &[String]) -> Vec<Self> {
        let free = variables
            .iter()
            .filter(|name| !self.contains(name))
            .collect_vec();

        let mut rows = vec![self.clone()];
        for name in free {
            rows = rows
                .into_iter()
                .flat_map(|row| [row.with(name, true), row.with(name, false)])
                .collect();
        }
        rows
    }
}

impl<S: AsRef<str>> FromIterator<(S, bool)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        let mut assignment = Self::new();
        for (name, value) in iter {
            assignment.bind(name.as_ref(), value);
        }
        assignment
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = self
            .iter()
            .map(|(name, value)| format!("{name} = {}", u8::from(value)))
            .join(", ");
        f.write_str(&text)
    }
}

/// One satisfying result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// The formula reduced to `true` with nothing left to bind.
    True,
    /// The formula is satisfied by these bindings, whatever the remaining variables are.
    Assignment(Assignment),
}

impl Model {
    /// The bindings, `None` for [`Model::True`].
    #[must_use]
    pub const fn bindings(&self) -> Option<&Assignment> {
        match self {
            Self::True => None,
            Self::Assignment(a) => Some(a),
        }
    }

    /// Number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings().map_or(0, Assignment::len)
    }

    /// True for [`Model::True`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The total assignments over `variables` this model stands for.
    #[must_use]
    pub fn completions(&self, variables: &[String]) -> Vec<Assignment> {
        match self {
            Self::True => Assignment::new().completions(variables),
            Self::Assignment(a) => a.completions(variables),
        }
    }
}

impl From<Assignment> for Model {
    fn from(assignment: Assignment) -> Self {
        if assignment.is_empty() {
            Self::True
        } else {
            Self::Assignment(assignment)
        }
    }
}

impl Display for Model {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("1"),
            Self::Assignment(a) => write!(f, "{a}"),
        }
    }
}

/// The ordered models found for one formula. Empty means unsatisfiable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solutions(Vec<Model>);

impl Solutions {
    /// An empty solution set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a model after the ones already found.
    pub fn push(&mut self, model: Model) {
        self.0.push(model);
    }

    /// Number of models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no models.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Models in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.0.iter()
    }

    /// The models as a slice.
    #[must_use]
    pub fn models(&self) -> &[Model] {
        &self.0
    }

    /// No model exists.
    #[must_use]
    pub fn is_contradiction(&self) -> bool {
        self.is_empty()
    }

    /// How many of the `2^num_vars` rows of the truth table the models cover.
    ///
    /// A model binding `k` variables covers `2^(num_vars - k)` rows. The models are assumed
    /// pairwise disjoint, which holds for both solvers. Saturates at `u128::MAX`.
    #[must_use]
    pub fn rows_covered(&self, num_vars: usize) -> u128 {
        self.iter()
            .map(|model| {
                let free = num_vars.saturating_sub(model.len());
                u32::try_from(free)
                    .ok()
                    .and_then(|free| 1u128.checked_shl(free))
                    .unwrap_or(u128::MAX)
            })
            .fold(0u128, u128::saturating_add)
    }

    /// The truth-table rows the models cover, as values in `variables` order.
    ///
    /// Independent of binding order, so two solvers can be compared row for row.
    #[must_use]
    pub fn truth_rows(&self, variables: &[String]) -> BTreeSet<Vec<bool>> {
        self.iter()
            .flat_map(|model| model.completions(variables))
            .map(|row| {
                variables
                    .iter()
                    .map(|name| row.get(name).unwrap_or(false))
                    .collect()
            })
            .collect()
    }

    /// Every row of the truth table over `num_vars` variables is a model.
    #[must_use]
    pub fn is_tautology(&self, num_vars: usize) -> bool {
        if self.0.iter().any(|m| matches!(m, Model::True)) {
            return true;
        }
        let total = u32::try_from(num_vars)
            .ok()
            .and_then(|n| 1u128.checked_shl(n));
        total.is_some_and(|total| !self.is_empty() && self.rows_covered(num_vars) == total)
    }
}

impl FromIterator<Model> for Solutions {
    fn from_iter<T: IntoIterator<Item = Model>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Solutions {
    type Item = Model;
    type IntoIter = std::vec::IntoIter<Model>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl Display for Solutions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("UNSAT");
        }
        for (idx, model) in self.iter().enumerate() {
            writeln!(f, "\t{}) {model}", idx + 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(ns: &[&str]) -> Vec<String> {
        ns.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn test_bind_and_get() {
        let mut a = Assignment::new();
        a.bind("x", true);
        a.bind("y", false);
        assert_eq!(a.get("x"), Some(true));
        assert_eq!(a.get("y"), Some(false));
        assert_eq!(a.get("z"), None);

        a.bind("x", false);
        assert_eq!(a.get("x"), Some(false));
        assert_eq!(a.len(), 2);
        assert_eq!(a.iter().map(|(n, _)| n).collect_vec(), vec!["x", "y"]);
    }

    #[test]
    fn test_with_leaves_original_untouched() {
        let a = Assignment::new();
        let b = a.with("p", true);
        assert!(a.is_empty());
        assert_eq!(b.get("p"), Some(true));
    }

    #[test]
    fn test_display() {
        let a: Assignment = [("a", true), ("b", false)].into_iter().collect();
        assert_eq!(a.to_string(), "a = 1, b = 0");
        assert_eq!(Model::True.to_string(), "1");
    }

    #[test]
    fn test_completions() {
        let a: Assignment = [("b", false)].into_iter().collect();
        let rows = a.completions(&names(&["a", "b"]));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("a"), Some(true));
        assert_eq!(rows[1].get("a"), Some(false));
        assert!(rows.iter().all(|r| r.get("b") == Some(false)));

        assert_eq!(Model::True.completions(&names(&["a", "b", "c"])).len(), 8);
        assert_eq!(Model::True.completions(&[]).len(), 1);
    }

    #[test]
    fn test_model_from_empty_assignment_is_true() {
        assert_eq!(Model::from(Assignment::new()), Model::True);
    }

    #[test]
    fn test_classification() {
        let empty = Solutions::new();
        assert!(empty.is_contradiction());
        assert!(!empty.is_tautology(0));
        assert!(!empty.is_tautology(2));

        let both: Solutions = [
            Model::Assignment([("a", true)].into_iter().collect()),
            Model::Assignment([("a", false)].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        assert!(both.is_tautology(1));
        assert_eq!(both.rows_covered(2), 4);
        assert!(both.is_tautology(2));

        let one_sided: Solutions = [
            Model::Assignment([("a", true)].into_iter().collect()),
            Model::Assignment([("a", false), ("b", true)].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        assert_eq!(one_sided.rows_covered(3), 6);
        assert!(!one_sided.is_tautology(3));

        let partial: Solutions = [
            Model::Assignment([("a", true), ("b", true)].into_iter().collect()),
            Model::Assignment([("a", false)].into_iter().collect()),
        ]
        .into_iter()
        .collect();
        assert_eq!(partial.rows_covered(2), 3);
        assert!(!partial.is_tautology(2));

        let bare: Solutions = [Model::True].into_iter().collect();
        assert!(bare.is_tautology(0));
        assert!(bare.is_tautology(3));
    }

    #[test]
    fn test_truth_rows_ignore_binding_order() {
        let vars = names(&["a", "b"]);
        let forward: Solutions = [Model::Assignment([("a", true), ("b", false)].into_iter().collect())]
            .into_iter()
            .collect();
        let backward: Solutions = [Model::Assignment([("b", false), ("a", true)].into_iter().collect())]
            .into_iter()
            .collect();
        assert_eq!(forward.truth_rows(&vars), backward.truth_rows(&vars));
        assert_eq!(
            Solutions::from_iter([Model::True]).truth_rows(&vars).len(),
            4
        );
    }

    #[test]
    fn test_solutions_display() {
        let s: Solutions = [Model::Assignment([("a", true)].into_iter().collect())]
            .into_iter()
            .collect();
        assert_eq!(s.to_string(), "\t1) a = 1\n");
        assert_eq!(Solutions::new().to_string(), "UNSAT");
    }
}
