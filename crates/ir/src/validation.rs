//! Reference validation for catalogs
//!
//! Runs after the whole catalog is built, so forward references between
//! tables are fine. Validation is fail-fast: the first broken rule aborts the
//! run. Rules run in registration order and walk tables in declaration order,
//! which keeps the reported error stable for a given input.
//!
//! The cycle check here looks at every foreign key regardless of dialect.
//! The orderer repeats it on the resolved tables of one dialect.

use crate::catalog::Catalog;
use crate::table::{ForeignKey, Table};
use ddlforge_core::{DdlError, DdlResult};
use std::collections::BTreeSet;

// ============================================================================
// ValidationRule Trait
// ============================================================================

/// Trait for validation rules
pub trait ValidationRule {
    /// Get the rule name
    fn name(&self) -> &'static str;

    /// Get the rule description
    fn description(&self) -> &'static str;

    /// Check the catalog, returning the first violation
    fn validate(&self, catalog: &Catalog) -> DdlResult<()>;
}

// ============================================================================
// Validator
// ============================================================================

/// Catalog validator that runs multiple validation rules
#[derive(Default)]
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Validator {
    /// Create a validator with no rules
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator with the built-in rules: local columns, references, cycles
    pub fn with_default_rules() -> Self {
        let mut validator = Self::new();
        validator.add_rule(Box::new(LocalColumnsRule));
        validator.add_rule(Box::new(ReferencesRule));
        validator.add_rule(Box::new(AcyclicRule));
        validator
    }

    /// Add a validation rule
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every rule, stopping at the first failure
    pub fn validate(&self, catalog: &Catalog) -> DdlResult<()> {
        for rule in &self.rules {
            tracing::debug!(
                rule = rule.name(),
                description = rule.description(),
                "running validation rule",
            );
            rule.validate(catalog)?;
        }
        Ok(())
    }
}

/// Validate a catalog with the default rules
pub fn validate_catalog(catalog: &Catalog) -> DdlResult<()> {
    Validator::with_default_rules().validate(catalog)
}

// ============================================================================
// Built-in Validation Rules
// ============================================================================

/// Rule: every column named by a key, constraint or index exists on its own table
pub struct LocalColumnsRule;

impl ValidationRule for LocalColumnsRule {
    fn name(&self) -> &'static str {
        "local_columns"
    }

    fn description(&self) -> &'static str {
        "Validates that keys, constraints and indexes only name columns of their own table"
    }

    fn validate(&self, catalog: &Catalog) -> DdlResult<()> {
        for table in catalog.tables() {
            require_columns(table, table.primary_key_columns(), "primary key")?;

            for unique in &table.unique_constraints {
                require_columns(table, &unique.columns, "unique constraint")?;
            }

            for index in &table.indexes {
                for column in index.columns() {
                    if !table.has_column(column) {
                        return Err(DdlError::unknown_column(&table.name, column, "index"));
                    }
                }
            }

            for fk in &table.foreign_keys {
                require_columns(table, &fk.columns, "foreign key")?;
            }
        }
        Ok(())
    }
}

fn require_columns(table: &Table, columns: &[String], context: &str) -> DdlResult<()> {
    match columns.iter().find(|c| !table.has_column(c)) {
        Some(missing) => Err(DdlError::unknown_column(&table.name, missing, context)),
        None => Ok(()),
    }
}

/// Rule: every foreign key resolves to an existing table and key
pub struct ReferencesRule;

impl ValidationRule for ReferencesRule {
    fn name(&self) -> &'static str {
        "references"
    }

    fn description(&self) -> &'static str {
        "Validates that foreign keys point at existing tables, columns and keys"
    }

    fn validate(&self, catalog: &Catalog) -> DdlResult<()> {
        for table in catalog.tables() {
            for fk in &table.foreign_keys {
                check_reference(catalog, table, fk)?;
            }
        }
        Ok(())
    }
}

fn check_reference(catalog: &Catalog, table: &Table, fk: &ForeignKey) -> DdlResult<()> {
    let target = catalog.table(&fk.target_table).ok_or_else(|| {
        DdlError::dangling(
            &table.name,
            fk.column_list(),
            format!("table '{}'", fk.target_table),
            "does not exist",
        )
    })?;

    let referenced: &[String] = if fk.target_columns.is_empty() {
        let pk = target.primary_key_columns();
        if pk.is_empty() {
            return Err(DdlError::dangling(
                &table.name,
                fk.column_list(),
                format!("table '{}'", target.name),
                "has no primary key to reference",
            ));
        }
        pk
    } else {
        if let Some(missing) = fk.target_columns.iter().find(|c| !target.has_column(c)) {
            return Err(DdlError::dangling(
                &table.name,
                fk.column_list(),
                format!("column '{}.{}'", target.name, missing),
                "does not exist",
            ));
        }
        &fk.target_columns
    };

    if referenced.len() != fk.columns.len() {
        return Err(DdlError::ForeignKeyArity {
            table: table.name.clone(),
            columns: fk.column_list(),
            target: target.name.clone(),
            expected: referenced.len(),
            found: fk.columns.len(),
        });
    }
    Ok(())
}

/// Rule: foreign keys between distinct tables form no cycle
pub struct AcyclicRule;

impl ValidationRule for AcyclicRule {
    fn name(&self) -> &'static str {
        "acyclic"
    }

    fn description(&self) -> &'static str {
        "Validates that tables can be created one after another"
    }

    fn validate(&self, catalog: &Catalog) -> DdlResult<()> {
        let tables = catalog.tables();
        let dependencies: Vec<Vec<usize>> = tables
            .iter()
            .map(|t| {
                t.dependencies()
                    .into_iter()
                    .filter_map(|d| catalog.position(d))
                    .collect()
            })
            .collect();

        let mut dependents = vec![Vec::new(); tables.len()];
        for (i, deps) in dependencies.iter().enumerate() {
            for &j in deps {
                dependents[j].push(i);
            }
        }

        let mut in_degree: Vec<usize> = dependencies.iter().map(Vec::len).collect();
        let mut ready: BTreeSet<usize> = (0..tables.len()).filter(|&i| in_degree[i] == 0).collect();
        while let Some(node) = ready.pop_first() {
            for &dependent in &dependents[node] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(dependent);
                }
            }
        }

        let remaining: Vec<usize> = (0..tables.len()).filter(|&i| in_degree[i] > 0).collect();
        if remaining.is_empty() {
            return Ok(());
        }
        let cycle: Vec<String> = remaining
            .iter()
            .filter(|&&i| reaches(&dependencies, i, &remaining))
            .map(|&i| tables[i].name.clone())
            .collect();
        Err(DdlError::CyclicDependency { tables: cycle })
    }
}

/// Whether `start` leads back to itself through tables in `within`
fn reaches(dependencies: &[Vec<usize>], start: usize, within: &[usize]) -> bool {
    let mut seen = vec![false; dependencies.len()];
    let mut stack = dependencies[start].clone();
    while let Some(node) = stack.pop() {
        if node == start {
            return true;
        }
        if seen[node] || !within.contains(&node) {
            continue;
        }
        seen[node] = true;
        stack.extend(dependencies[node].iter().copied());
    }
    false
}

// ============================================================================
// Tests
// ============================================================================
