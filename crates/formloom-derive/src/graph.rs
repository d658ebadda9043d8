//! Dependency graph over a field list -- scoped, topological evaluation
//! order for derived fields.

use std::collections::{HashMap, HashSet, VecDeque};

use formloom_core::field::FieldDefinition;

use crate::error::DeriveError;

/// Directed graph with fields as nodes and `derived_from` entries as edges
/// pointing from a dependency to the derived fields that consume it.
///
/// Only derived fields can be recomputed, so cycles are only possible among
/// derived fields; a dangling `derived_from` reference is not an edge at
/// all and is tolerated here (the evaluation loop leaves such fields
/// unset).
pub struct DependencyGraph<'a> {
    by_id: HashMap<&'a str, &'a FieldDefinition>,
    /// dependency id -> derived field ids that list it in `derived_from`.
    dependents: HashMap<&'a str, Vec<&'a str>>,
    /// Ids of derived fields, in field-list order.
    derived: Vec<&'a str>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds the graph for a field list.
    pub fn build(fields: &'a [FieldDefinition]) -> Self {
        let by_id: HashMap<&str, &FieldDefinition> =
            fields.iter().map(|f| (f.id.as_str(), f)).collect();

        let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut derived = Vec::new();
        for field in fields.iter().filter(|f| f.is_derived) {
            derived.push(field.id.as_str());
            for dep in &field.derived_from {
                // Only register edges whose source actually exists.
                if let Some((&canon, _)) = by_id.get_key_value(dep.as_str()) {
                    dependents.entry(canon).or_default().push(field.id.as_str());
                }
            }
        }

        Self {
            by_id,
            dependents,
            derived,
        }
    }

    /// Topological order of every derived field.
    ///
    /// Used for the initial pass over a fresh form instance.
    pub fn full_order(&self) -> Result<Vec<&'a str>, DeriveError> {
        let all: HashSet<&str> = self.derived.iter().copied().collect();
        self.order_subset(&all)
    }

    /// The derived fields that must be recomputed after `changed_id`
    /// changes -- the changed field itself when it is derived, plus
    /// everything downstream of it -- in topological order.
    ///
    /// An unknown id affects nothing.
    pub fn affected_by(&self, changed_id: &str) -> Result<Vec<&'a str>, DeriveError> {
        let Some(start) = self.canonical(changed_id) else {
            return Ok(Vec::new());
        };

        let mut affected: HashSet<&str> = HashSet::new();
        if self.derived.contains(&start) {
            affected.insert(start);
        }

        let mut queue = VecDeque::from([start]);
        while let Some(id) = queue.pop_front() {
            if let Some(children) = self.dependents.get(id) {
                for &child in children {
                    if affected.insert(child) {
                        queue.push_back(child);
                    }
                }
            }
        }

        self.order_subset(&affected)
    }

    /// Kahn's algorithm over the derived fields in `subset`.
    fn order_subset(&self, subset: &HashSet<&'a str>) -> Result<Vec<&'a str>, DeriveError> {
        let mut indegree: HashMap<&str, usize> = subset.iter().map(|&id| (id, 0)).collect();
        for &id in subset {
            let field = self.by_id[id];
            for dep in &field.derived_from {
                if subset.contains(dep.as_str()) {
                    *indegree.get_mut(id).expect("id is in subset") += 1;
                }
            }
        }

        // Seed with zero-indegree nodes in field-list order for a
        // deterministic result.
        let mut queue: VecDeque<&str> = self
            .derived
            .iter()
            .copied()
            .filter(|id| indegree.get(id) == Some(&0))
            .collect();

        let mut order = Vec::with_capacity(subset.len());
        while let Some(id) = queue.pop_front() {
            order.push(id);
            if let Some(children) = self.dependents.get(id) {
                for &child in children {
                    if let Some(deg) = indegree.get_mut(child) {
                        *deg -= 1;
                        if *deg == 0 {
                            queue.push_back(child);
                        }
                    }
                }
            }
        }

        if order.len() < subset.len() {
            return Err(DeriveError::CycleDetected);
        }
        Ok(order)
    }

    fn canonical(&self, id: &str) -> Option<&'a str> {
        self.by_id.get_key_value(id).map(|(&k, _)| k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formloom_core::enums::{DerivationKind, FieldType};
    use formloom_core::field::FieldBuilder;

    fn plain(id: &str) -> FieldDefinition {
        let mut f = FieldBuilder::new(id.to_uppercase(), FieldType::Text).build();
        f.id = id.into();
        f
    }

    fn derived(id: &str, from: &[&str]) -> FieldDefinition {
        let mut f = FieldBuilder::new(id.to_uppercase(), FieldType::Number)
            .derived(from.iter().map(|s| s.to_string()).collect(), "")
            .derivation_kind(DerivationKind::AgeFromDate)
            .build();
        f.id = id.into();
        f
    }

    #[test]
    fn affected_by_follows_chains_downstream() {
        // a -> d1 -> d2, plus an unrelated d3.
        let fields = vec![
            plain("a"),
            derived("d1", &["a"]),
            derived("d2", &["d1"]),
            derived("d3", &["x"]),
        ];
        let graph = DependencyGraph::build(&fields);

        let order = graph.affected_by("a").unwrap();
        assert_eq!(order, vec!["d1", "d2"]);
    }

    #[test]
    fn affected_by_includes_changed_derived_field() {
        let fields = vec![plain("a"), derived("d1", &["a"])];
        let graph = DependencyGraph::build(&fields);

        assert_eq!(graph.affected_by("d1").unwrap(), vec!["d1"]);
    }

    #[test]
    fn affected_by_unknown_id_is_empty() {
        let fields = vec![plain("a"), derived("d1", &["a"])];
        let graph = DependencyGraph::build(&fields);

        assert!(graph.affected_by("nope").unwrap().is_empty());
    }

    #[test]
    fn full_order_is_topological() {
        // d2 depends on d1 but appears first in the list.
        let fields = vec![plain("a"), derived("d2", &["d1"]), derived("d1", &["a"])];
        let graph = DependencyGraph::build(&fields);

        assert_eq!(graph.full_order().unwrap(), vec!["d1", "d2"]);
    }

    #[test]
    fn cycle_is_detected() {
        let fields = vec![derived("d1", &["d2"]), derived("d2", &["d1"])];
        let graph = DependencyGraph::build(&fields);

        assert!(matches!(graph.full_order(), Err(DeriveError::CycleDetected)));
    }

    #[test]
    fn cycle_off_the_changed_path_does_not_block() {
        // a -> d1 is healthy; d2 <-> d3 cycle is elsewhere.
        let fields = vec![
            plain("a"),
            derived("d1", &["a"]),
            derived("d2", &["d3"]),
            derived("d3", &["d2"]),
        ];
        let graph = DependencyGraph::build(&fields);

        assert_eq!(graph.affected_by("a").unwrap(), vec!["d1"]);
        assert!(matches!(graph.full_order(), Err(DeriveError::CycleDetected)));
    }

    #[test]
    fn dangling_dependency_is_not_an_edge() {
        let fields = vec![derived("d1", &["ghost"])];
        let graph = DependencyGraph::build(&fields);

        // d1 still orders fine; it just has nothing to read from.
        assert_eq!(graph.full_order().unwrap(), vec!["d1"]);
    }
}
