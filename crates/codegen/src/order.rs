//! # Dependency Ordering
//!
//! Orders tables so that every referenced table is created before the tables
//! that reference it. The sort is Kahn's algorithm with a ready set keyed by
//! declaration index, so among tables that are ready at the same time the
//! earliest declared always goes first. The result is fully determined by the
//! input.
//!
//! Self-references are not edges. Multi-table cycles cannot be created in one
//! pass and fail with [`DdlError::CyclicDependency`].

use crate::resolve::ResolvedTable;
use ddlforge_core::{DdlError, DdlResult};
use ddlforge_ir::same_name;
use std::collections::BTreeSet;

// ============================================================================
// DependencyGraph
// ============================================================================

/// Table dependency graph, nodes identified by declaration index
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    names: Vec<String>,
    /// `dependents[i]`: tables that reference table `i`
    dependents: Vec<Vec<usize>>,
    /// `dependencies[i]`: tables that table `i` references
    dependencies: Vec<Vec<usize>>,
}

impl DependencyGraph {
    /// Build the graph from resolved tables in declaration order.
    ///
    /// References to tables outside the list are ignored; the validator has
    /// already rejected them.
    pub fn from_tables(tables: &[ResolvedTable]) -> Self {
        let names: Vec<String> = tables.iter().map(|t| t.name.clone()).collect();
        let n = names.len();
        let mut dependents = vec![Vec::new(); n];
        let mut dependencies = vec![Vec::new(); n];

        for (i, table) in tables.iter().enumerate() {
            for dep in table.dependencies() {
                let Some(j) = names.iter().position(|name| same_name(name, dep)) else {
                    continue;
                };
                if j != i && !dependencies[i].contains(&j) {
                    dependencies[i].push(j);
                    dependents[j].push(i);
                }
            }
        }

        Self {
            names,
            dependents,
            dependencies,
        }
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Declaration indexes in creation order
    pub fn sorted(&self) -> DdlResult<Vec<usize>> {
        let n = self.len();
        let mut in_degree: Vec<usize> = self.dependencies.iter().map(Vec::len).collect();
        let mut ready: BTreeSet<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(node) = ready.pop_first() {
            order.push(node);
            for &dependent in &self.dependents[node] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        if order.len() < n {
            let remaining: Vec<usize> = (0..n).filter(|&i| in_degree[i] > 0).collect();
            let tables: Vec<String> = remaining
                .iter()
                .filter(|&&i| self.on_cycle(i, &remaining))
                .map(|&i| self.names[i].clone())
                .collect();
            return Err(DdlError::CyclicDependency { tables });
        }

        tracing::debug!(
            order = ?order.iter().map(|&i| self.names[i].as_str()).collect::<Vec<_>>(),
            "tables ordered",
        );
        Ok(order)
    }

    /// Whether `start` can reach itself through dependencies inside `within`
    fn on_cycle(&self, start: usize, within: &[usize]) -> bool {
        let mut seen = vec![false; self.len()];
        let mut stack: Vec<usize> = self.dependencies[start].clone();
        while let Some(node) = stack.pop() {
            if node == start {
                return true;
            }
            if seen[node] || !within.contains(&node) {
                continue;
            }
            seen[node] = true;
            stack.extend(self.dependencies[node].iter().copied());
        }
        false
    }
}

/// Sort resolved tables into creation order
pub fn dependency_order(tables: Vec<ResolvedTable>) -> DdlResult<Vec<ResolvedTable>> {
    let order = DependencyGraph::from_tables(&tables).sorted()?;
    let mut slots: Vec<Option<ResolvedTable>> = tables.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::ResolvedForeignKey;

    fn table(name: &str, references: &[&str]) -> ResolvedTable {
        ResolvedTable {
            name: name.to_string(),
            columns: Vec::new(),
            primary_key: None,
            unique_constraints: Vec::new(),
            foreign_keys: references
                .iter()
                .map(|target| ResolvedForeignKey {
                    name: format!("{}_{}_fkey", name, target),
                    columns: vec![format!("{}_ID", target)],
                    target_table: target.to_string(),
                    target_columns: vec!["ID".to_string()],
                    on_update: None,
                    on_delete: None,
                    self_reference: same_name(name, target),
                })
                .collect(),
            indexes: Vec::new(),
        }
    }

    fn names(tables: &[ResolvedTable]) -> Vec<&str> {
        tables.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_referenced_tables_come_first() {
        let ordered =
            dependency_order(vec![table("FILM", &["LANGUAGE"]), table("LANGUAGE", &[])]).unwrap();
        assert_eq!(names(&ordered), ["LANGUAGE", "FILM"]);
    }

    #[test]
    fn test_ties_follow_declaration_order() {
        let ordered = dependency_order(vec![
            table("FILM_ACTOR", &["ACTOR", "FILM"]),
            table("FILM", &["LANGUAGE"]),
            table("ACTOR", &[]),
            table("LANGUAGE", &[]),
        ])
        .unwrap();
        assert_eq!(names(&ordered), ["ACTOR", "LANGUAGE", "FILM", "FILM_ACTOR"]);
    }

    #[test]
    fn test_self_reference_is_not_a_cycle() {
        let ordered = dependency_order(vec![table("STAFF", &["STAFF", "STORE"]), table("STORE", &[])])
            .unwrap();
        assert_eq!(names(&ordered), ["STORE", "STAFF"]);
    }

    #[test]
    fn test_three_table_cycle_lists_all_participants() {
        let err = dependency_order(vec![
            table("A", &["B"]),
            table("B", &["C"]),
            table("C", &["A"]),
        ])
        .unwrap_err();
        match err {
            DdlError::CyclicDependency { tables } => assert_eq!(tables, ["A", "B", "C"]),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_tables_depending_on_a_cycle_are_not_listed() {
        let err = dependency_order(vec![
            table("REPORT", &["B"]),
            table("A", &["B"]),
            table("B", &["A"]),
            table("FREE", &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, DdlError::CyclicDependency { ref tables } if tables == &["A", "B"]));
    }

    #[test]
    fn test_case_insensitive_references() {
        let ordered =
            dependency_order(vec![table("film", &["LANGUAGE"]), table("Language", &[])]).unwrap();
        assert_eq!(names(&ordered), ["Language", "film"]);
    }

    #[test]
    fn test_graph_len() {
        let graph = DependencyGraph::from_tables(&[table("A", &[])]);
        assert_eq!(graph.len(), 1);
        assert!(!graph.is_empty());
        assert_eq!(graph.sorted().unwrap(), [0]);
    }
}
