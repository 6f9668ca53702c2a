//! # Dialect Resolution
//!
//! Flattens a [`Catalog`] into the concrete shape it takes under one dialect:
//! overrides merged, dialect-restricted columns and indexes dropped, types
//! chosen, defaults rendered, identity clauses picked, constraint names
//! derived. The emitter only formats what comes out of here.
//!
//! Derived names are unique within a table: an index identical to one
//! already kept is dropped, and any other clash gets a numeric suffix. Names
//! longer than the dialect allows are shortened with a stable hash.

use crate::dialect::{DialectProfile, MethodSyntax};
use ddlforge_core::{DdlError, DdlResult, Dialect};
use ddlforge_ir::{Catalog, Column, ForeignKey, Index, IndexPart, Table, same_name};
use heck::ToSnakeCase;

// ============================================================================
// Resolved types
// ============================================================================

/// A column as it will be emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    pub name: String,
    pub sql_type: String,
    pub not_null: bool,
    /// Rendered default expression
    pub default: Option<String>,
    /// `ON UPDATE CURRENT_TIMESTAMP` when the dialect supports it
    pub on_update: Option<&'static str>,
    /// Auto-increment or identity clause
    pub generation: Option<String>,
}

/// A foreign key as it will be emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    /// Referenced table, spelled as declared
    pub target_table: String,
    /// Referenced columns, the target's primary key when none were given
    pub target_columns: Vec<String>,
    pub on_update: Option<&'static str>,
    pub on_delete: Option<&'static str>,
    /// Points back at its own table
    pub self_reference: bool,
}

/// An index as it will be emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIndex {
    pub name: String,
    /// Quoted columns or raw expressions
    pub parts: Vec<String>,
    pub unique: bool,
    pub method: Option<(&'static str, MethodSyntax)>,
}

/// A named multi-column constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedConstraint {
    pub name: String,
    pub columns: Vec<String>,
}

/// A table under the active dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTable {
    pub name: String,
    pub columns: Vec<ResolvedColumn>,
    /// Table-level primary key; `None` when absent or declared inline
    pub primary_key: Option<NamedConstraint>,
    pub unique_constraints: Vec<NamedConstraint>,
    pub foreign_keys: Vec<ResolvedForeignKey>,
    pub indexes: Vec<ResolvedIndex>,
}

impl ResolvedTable {
    /// Names of the other tables this one references
    pub fn dependencies(&self) -> Vec<&str> {
        let mut deps: Vec<&str> = Vec::new();
        for fk in self.foreign_keys.iter().filter(|fk| !fk.self_reference) {
            if !deps.iter().any(|d| same_name(d, &fk.target_table)) {
                deps.push(&fk.target_table);
            }
        }
        deps
    }

    pub fn column(&self, name: &str) -> Option<&ResolvedColumn> {
        self.columns.iter().find(|c| same_name(&c.name, name))
    }
}

/// A whole catalog under the active dialect, tables in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCatalog {
    pub dialect: Dialect,
    pub tables: Vec<ResolvedTable>,
    pub warnings: Vec<String>,
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve every table of a validated catalog for `dialect`
pub fn resolve_catalog(catalog: &Catalog, dialect: Dialect) -> DdlResult<ResolvedCatalog> {
    let mut resolver = Resolver {
        catalog,
        profile: DialectProfile::for_dialect(dialect),
        warnings: Vec::new(),
    };

    let mut tables = Vec::with_capacity(catalog.len());
    for table in catalog.tables() {
        tables.push(resolver.table(table)?);
    }

    Ok(ResolvedCatalog {
        dialect,
        tables,
        warnings: resolver.warnings,
    })
}

struct Resolver<'a> {
    catalog: &'a Catalog,
    profile: &'static DialectProfile,
    warnings: Vec<String>,
}

impl Resolver<'_> {
    fn dialect(&self) -> Dialect {
        self.profile.dialect
    }

    fn warn(&mut self, message: String) {
        tracing::warn!(dialect = %self.dialect(), "{}", message);
        self.warnings.push(message);
    }

    /// Reserve a derived name on the current table and fit it to the dialect
    fn claim(&self, taken: &mut TakenNames, base: String, suffix: &str) -> String {
        self.profile.fit_identifier(&taken.claim(base), suffix)
    }

    fn table(&mut self, table: &Table) -> DdlResult<ResolvedTable> {
        let dialect = self.dialect();
        let present = |name: &String| table.column(name).is_some_and(|c| c.exists_in(dialect));

        for column in table.columns.iter().filter(|c| !c.exists_in(dialect)) {
            tracing::debug!(
                table = %table.name,
                column = %column.name,
                %dialect,
                "column omitted",
            );
        }

        let mut inline_pk = false;
        let mut columns = Vec::new();
        for column in table.columns.iter().filter(|c| c.exists_in(dialect)) {
            let (resolved, inlined) = self.column(table, column)?;
            inline_pk |= inlined;
            columns.push(resolved);
        }

        let mut taken = TakenNames::default();

        let primary_key = match &table.primary_key {
            Some(pk) if !inline_pk => Some(NamedConstraint {
                name: self.claim(&mut taken, constraint_name(&table.name, &[], "pkey"), "pkey"),
                columns: pk.columns.iter().map(|c| declared(table, c)).collect(),
            }),
            _ => None,
        };

        let mut unique_constraints: Vec<NamedConstraint> = Vec::new();
        for unique in &table.unique_constraints {
            if let Some(missing) = unique.columns.iter().find(|&c| !present(c)) {
                self.warn(format!(
                    "{}: skipping unique constraint on {} ({}), column '{}' does not exist under this dialect",
                    dialect,
                    table.name,
                    unique.columns.join(", "),
                    missing
                ));
                continue;
            }
            let columns: Vec<String> = unique.columns.iter().map(|c| declared(table, c)).collect();
            if unique_constraints.iter().any(|u| u.columns == columns) {
                tracing::debug!(table = %table.name, columns = ?columns, "duplicate unique constraint dropped");
                continue;
            }
            let name = self.claim(&mut taken, constraint_name(&table.name, &columns, "key"), "key");
            unique_constraints.push(NamedConstraint { name, columns });
        }

        let mut foreign_keys = Vec::new();
        for fk in &table.foreign_keys {
            if fk.columns.iter().all(|c| present(c)) {
                let mut resolved = self.foreign_key(table, fk)?;
                resolved.name = self.claim(&mut taken, resolved.name, "fkey");
                foreign_keys.push(resolved);
            } else {
                tracing::debug!(
                    table = %table.name,
                    columns = %fk.column_list(),
                    "foreign key over omitted column dropped",
                );
            }
        }

        let mut indexes: Vec<ResolvedIndex> = Vec::new();
        for index in &table.indexes {
            let Some(mut resolved) = self.index(table, index) else {
                continue;
            };
            if indexes.iter().any(|kept| {
                kept.parts == resolved.parts
                    && kept.unique == resolved.unique
                    && kept.method == resolved.method
            }) {
                tracing::debug!(table = %table.name, index = %resolved.name, "duplicate index dropped");
                continue;
            }
            resolved.name = self.claim(&mut taken, resolved.name, "idx");
            indexes.push(resolved);
        }

        Ok(ResolvedTable {
            name: table.name.clone(),
            columns,
            primary_key,
            unique_constraints,
            foreign_keys,
            indexes,
        })
    }

    /// Resolve one column; the flag reports an inline primary key
    fn column(&mut self, table: &Table, column: &Column) -> DdlResult<(ResolvedColumn, bool)> {
        let profile = self.profile;
        let settings = column.settings_for(profile.dialect);

        let mut sql_type = match &settings.type_name {
            Some(explicit) => explicit.clone(),
            None => profile
                .type_for(column.kind, settings.length)
                .ok_or_else(|| DdlError::UnresolvedType {
                    table: table.name.clone(),
                    column: column.name.clone(),
                    dialect: profile.dialect.to_string(),
                })?,
        };

        let mut generation = None;
        let mut inline_pk = false;
        if settings.is_auto_increment() {
            if let Some(keyword) = profile.auto_increment {
                if !profile.auto_increment_inline_pk {
                    generation = Some(keyword.to_string());
                } else if table
                    .primary_key
                    .as_ref()
                    .is_some_and(|pk| pk.is_sole(&column.name))
                {
                    sql_type = "INTEGER".to_string();
                    generation = Some(format!("PRIMARY KEY {}", keyword));
                    inline_pk = true;
                } else {
                    self.warn(format!(
                        "{}: auto_increment on '{}.{}' ignored, it requires a single-column primary key",
                        profile.dialect, table.name, column.name
                    ));
                }
            }
        }
        if generation.is_none() {
            if let Some(identity) = settings.identity {
                generation = profile.identity_clause(identity).map(str::to_string);
            }
        }

        let on_update = (settings.has_on_update_current_timestamp()
            && profile.on_update_current_timestamp)
            .then_some("ON UPDATE CURRENT_TIMESTAMP");

        let resolved = ResolvedColumn {
            name: column.name.clone(),
            sql_type,
            not_null: settings.is_not_null(),
            default: settings.default.as_deref().map(|d| profile.render_default(d)),
            on_update,
            generation,
        };
        Ok((resolved, inline_pk))
    }

    fn foreign_key(&mut self, table: &Table, fk: &ForeignKey) -> DdlResult<ResolvedForeignKey> {
        let dialect = self.dialect();
        let target = self.catalog.table(&fk.target_table).ok_or_else(|| {
            DdlError::dangling(
                &table.name,
                fk.column_list(),
                format!("table '{}'", fk.target_table),
                "does not exist",
            )
        })?;

        let referenced: &[String] = if fk.target_columns.is_empty() {
            target.primary_key_columns()
        } else {
            &fk.target_columns
        };

        let mut target_columns = Vec::with_capacity(referenced.len());
        for name in referenced {
            match target.column(name) {
                Some(column) if column.exists_in(dialect) => target_columns.push(column.name.clone()),
                Some(column) => {
                    return Err(DdlError::dangling(
                        &table.name,
                        fk.column_list(),
                        format!("column '{}.{}'", target.name, column.name),
                        format!("does not exist under {}", dialect),
                    ));
                }
                None => {
                    return Err(DdlError::dangling(
                        &table.name,
                        fk.column_list(),
                        format!("column '{}.{}'", target.name, name),
                        "does not exist",
                    ));
                }
            }
        }

        let columns: Vec<String> = fk.columns.iter().map(|c| declared(table, c)).collect();
        Ok(ResolvedForeignKey {
            name: constraint_name(&table.name, &columns, "fkey"),
            columns,
            target_table: target.name.clone(),
            target_columns,
            on_update: fk.on_update.map(|a| self.profile.action_sql(a)),
            on_delete: fk.on_delete.map(|a| self.profile.action_sql(a)),
            self_reference: fk.is_self_reference(&table.name),
        })
    }

    fn index(&mut self, table: &Table, index: &Index) -> Option<ResolvedIndex> {
        let dialect = self.dialect();
        let described = describe_index(table, index);

        if !index.applies_to(dialect) {
            self.warn(format!(
                "{}: skipping {} (restricted to {})",
                dialect,
                described,
                index
                    .dialects
                    .iter()
                    .map(|d| d.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
            return None;
        }

        if let Some(missing) = index
            .columns()
            .find(|c| !table.column(c).is_some_and(|col| col.exists_in(dialect)))
        {
            self.warn(format!(
                "{}: skipping {}, column '{}' does not exist under this dialect",
                dialect, described, missing
            ));
            return None;
        }

        let method = match &index.method {
            Some(requested) => match self.profile.index_method(requested) {
                Some(method) => Some(method),
                None => {
                    self.warn(format!(
                        "{}: skipping {}, index method '{}' is not supported",
                        dialect, described, requested
                    ));
                    return None;
                }
            },
            None => None,
        };

        let mut name_parts = Vec::with_capacity(index.parts.len());
        let mut parts = Vec::with_capacity(index.parts.len());
        for part in &index.parts {
            match part {
                IndexPart::Column(column) => {
                    let column = declared(table, column);
                    parts.push(self.profile.quote_ident(&column));
                    name_parts.push(column);
                }
                IndexPart::Expression(expr) => {
                    parts.push(expr.clone());
                    name_parts.push(expr.clone());
                }
            }
        }

        Some(ResolvedIndex {
            name: constraint_name(&table.name, &name_parts, "idx"),
            parts,
            unique: index.unique,
            method,
        })
    }
}

/// `<table>_<parts>_<suffix>` in snake case
pub fn constraint_name(table: &str, parts: &[String], suffix: &str) -> String {
    let mut name = table.to_snake_case();
    for part in parts {
        let part = part.to_snake_case();
        if !part.is_empty() {
            name.push('_');
            name.push_str(&part);
        }
    }
    name.push('_');
    name.push_str(suffix);
    name
}

/// Derived names already used on one table, before shortening
#[derive(Debug, Default)]
struct TakenNames(Vec<String>);

impl TakenNames {
    /// `base`, or `base` followed by the first free number
    fn claim(&mut self, base: String) -> String {
        let mut name = base.clone();
        let mut n = 1;
        while self.0.iter().any(|t| same_name(t, &name)) {
            name = format!("{}{}", base, n);
            n += 1;
        }
        self.0.push(name.clone());
        name
    }
}

/// The declared spelling of a column name
fn declared(table: &Table, name: &str) -> String {
    table
        .column(name)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| name.to_string())
}

fn describe_index(table: &Table, index: &Index) -> String {
    let parts: Vec<&str> = index
        .parts
        .iter()
        .map(|p| match p {
            IndexPart::Column(c) | IndexPart::Expression(c) => c.as_str(),
        })
        .collect();
    format!("index on {} ({})", table.name, parts.join(", "))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ddlforge_core::FieldKind;
    use ddlforge_ir::{TableDescriptor, build_catalog};
    use pretty_assertions::assert_eq;

    fn sakila() -> Catalog {
        build_catalog(&[
            TableDescriptor::new("FILM")
                .with_field("FILM_ID", FieldKind::Number, "primarykey auto_increment identity")
                .with_field("TITLE", FieldKind::String, "notnull len=255 index")
                .with_field("RELEASE_YEAR", FieldKind::Number, "postgres:type=year")
                .with_field(
                    "LANGUAGE_ID",
                    FieldKind::Number,
                    "notnull references={language onupdate=cascade ondelete=restrict index}",
                )
                .with_field(
                    "RENTAL_RATE",
                    FieldKind::Number,
                    "type=DECIMAL(4,2) sqlite:type=REAL notnull default=4.99",
                )
                .with_field(
                    "LAST_UPDATE",
                    FieldKind::Time,
                    "notnull default=CURRENT_TIMESTAMP onupdatecurrenttimestamp",
                )
                .with_field(
                    "FULLTEXT",
                    FieldKind::Any,
                    "dialect=postgres type=TSVECTOR index={. using=GIST}",
                ),
            TableDescriptor::new("LANGUAGE")
                .with_field("LANGUAGE_ID", FieldKind::Number, "primarykey auto_increment identity")
                .with_field("NAME", FieldKind::String, "notnull len=20"),
        ])
        .unwrap()
    }

    fn film(dialect: Dialect) -> (ResolvedTable, Vec<String>) {
        let resolved = resolve_catalog(&sakila(), dialect).unwrap();
        (resolved.tables[0].clone(), resolved.warnings)
    }

    #[test]
    fn test_postgres_resolution() {
        let (film, warnings) = film(Dialect::Postgres);
        assert!(warnings.is_empty(), "{warnings:?}");

        let id = film.column("FILM_ID").unwrap();
        assert_eq!(id.sql_type, "INT");
        assert_eq!(id.generation.as_deref(), Some("GENERATED BY DEFAULT AS IDENTITY"));
        assert_eq!(film.column("TITLE").unwrap().sql_type, "VARCHAR(255)");
        assert_eq!(film.column("RELEASE_YEAR").unwrap().sql_type, "year");
        assert_eq!(film.column("FULLTEXT").unwrap().sql_type, "TSVECTOR");
        assert_eq!(film.column("LAST_UPDATE").unwrap().on_update, None);
        assert_eq!(film.primary_key.as_ref().unwrap().name, "film_pkey");

        let fk = &film.foreign_keys[0];
        assert_eq!(fk.name, "film_language_id_fkey");
        assert_eq!(fk.target_table, "LANGUAGE");
        assert_eq!(fk.target_columns, ["LANGUAGE_ID"]);
        assert_eq!(fk.on_update, Some("CASCADE"));
        assert_eq!(fk.on_delete, Some("RESTRICT"));

        let names: Vec<&str> = film.indexes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["film_title_idx", "film_language_id_idx", "film_fulltext_idx"]);
        assert_eq!(film.indexes[2].method, Some(("GIST", MethodSyntax::Using)));
    }

    #[test]
    fn test_mysql_resolution() {
        let (film, warnings) = film(Dialect::MySql);
        assert!(film.column("FULLTEXT").is_none());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("FULLTEXT"), "{warnings:?}");

        let id = film.column("FILM_ID").unwrap();
        assert_eq!(id.generation.as_deref(), Some("AUTO_INCREMENT"));
        assert_eq!(film.column("RELEASE_YEAR").unwrap().sql_type, "INT");
        assert_eq!(
            film.column("LAST_UPDATE").unwrap().on_update,
            Some("ON UPDATE CURRENT_TIMESTAMP")
        );
        assert_eq!(film.indexes.len(), 2);
    }

    #[test]
    fn test_sqlite_inlines_autoincrement_primary_key() {
        let (film, _) = film(Dialect::Sqlite);
        let id = film.column("FILM_ID").unwrap();
        assert_eq!(id.sql_type, "INTEGER");
        assert_eq!(id.generation.as_deref(), Some("PRIMARY KEY AUTOINCREMENT"));
        assert!(film.primary_key.is_none());
        assert_eq!(film.column("RENTAL_RATE").unwrap().sql_type, "REAL");
    }

    #[test]
    fn test_sqlite_autoincrement_on_composite_key_warns() {
        let catalog = build_catalog(&[TableDescriptor::new("PAIR")
            .with_attributes("primarykey=a,b")
            .with_field("A", FieldKind::Number, "auto_increment")
            .with_field("B", FieldKind::Number, "")])
        .unwrap();
        let resolved = resolve_catalog(&catalog, Dialect::Sqlite).unwrap();
        let table = &resolved.tables[0];
        assert_eq!(table.column("A").unwrap().generation, None);
        assert_eq!(table.primary_key.as_ref().unwrap().columns, ["A", "B"]);
        assert_eq!(resolved.warnings.len(), 1);
    }

    #[test]
    fn test_sqlserver_resolution() {
        let (film, _) = film(Dialect::SqlServer);
        assert_eq!(film.column("FILM_ID").unwrap().generation.as_deref(), Some("IDENTITY"));
        assert_eq!(film.column("TITLE").unwrap().sql_type, "NVARCHAR(255)");
        assert_eq!(film.foreign_keys[0].on_delete, Some("NO ACTION"));
    }

    #[test]
    fn test_any_without_type_is_unresolved() {
        let catalog = build_catalog(&[
            TableDescriptor::new("T").with_field("BLOB", FieldKind::Any, "postgres:type=TSVECTOR")
        ])
        .unwrap();
        assert!(resolve_catalog(&catalog, Dialect::Postgres).is_ok());
        let err = resolve_catalog(&catalog, Dialect::MySql).unwrap_err();
        assert!(matches!(err, DdlError::UnresolvedType { ref dialect, .. } if dialect == "mysql"));
    }

    #[test]
    fn test_reference_to_omitted_column_is_dangling() {
        let catalog = build_catalog(&[
            TableDescriptor::new("PARENT")
                .with_field("ID", FieldKind::Number, "primarykey")
                .with_field("CODE", FieldKind::String, "dialect=postgres unique"),
            TableDescriptor::new("CHILD").with_field("CODE", FieldKind::String, "references=parent.code"),
        ])
        .unwrap();
        assert!(resolve_catalog(&catalog, Dialect::Postgres).is_ok());
        let err = resolve_catalog(&catalog, Dialect::Sqlite).unwrap_err();
        assert!(matches!(err, DdlError::DanglingReference { .. }));
    }

    #[test]
    fn test_unsupported_index_method_warns() {
        let catalog = build_catalog(&[
            TableDescriptor::new("T").with_field("C", FieldKind::String, "index={. using=GIN}")
        ])
        .unwrap();
        let resolved = resolve_catalog(&catalog, Dialect::MySql).unwrap();
        assert!(resolved.tables[0].indexes.is_empty());
        assert!(resolved.warnings[0].contains("GIN"));
    }

    #[test]
    fn test_expression_index_name() {
        let catalog = build_catalog(&[TableDescriptor::new("ACTOR")
            .with_attributes("index={lower(LAST_NAME),FIRST_NAME unique}")
            .with_field("LAST_NAME", FieldKind::String, "")
            .with_field("FIRST_NAME", FieldKind::String, "")])
        .unwrap();
        let resolved = resolve_catalog(&catalog, Dialect::Postgres).unwrap();
        let index = &resolved.tables[0].indexes[0];
        assert_eq!(index.name, "actor_lower_last_name_first_name_idx");
        assert_eq!(index.parts, ["lower(LAST_NAME)", "FIRST_NAME"]);
        assert!(index.unique);
    }

    #[test]
    fn test_identical_indexes_are_emitted_once() {
        let catalog = build_catalog(&[
            TableDescriptor::new("FILM")
                .with_field("FILM_ID", FieldKind::Number, "primarykey")
                .with_field("LANGUAGE_ID", FieldKind::Number, "index references={language index}"),
            TableDescriptor::new("LANGUAGE").with_field("LANGUAGE_ID", FieldKind::Number, "primarykey"),
        ])
        .unwrap();
        let resolved = resolve_catalog(&catalog, Dialect::Postgres).unwrap();
        let names: Vec<&str> = resolved.tables[0].indexes.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["film_language_id_idx"]);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_clashing_index_names_get_numbered() {
        let catalog = build_catalog(&[
            TableDescriptor::new("T").with_field("C", FieldKind::String, "index index={. unique}")
        ])
        .unwrap();
        let resolved = resolve_catalog(&catalog, Dialect::MySql).unwrap();
        let indexes = &resolved.tables[0].indexes;
        assert_eq!(indexes.len(), 2);
        assert_eq!((indexes[0].name.as_str(), indexes[0].unique), ("t_c_idx", false));
        assert_eq!((indexes[1].name.as_str(), indexes[1].unique), ("t_c_idx1", true));
    }

    #[test]
    fn test_long_names_fit_the_dialect() {
        let catalog = build_catalog(&[TableDescriptor::new("CUSTOMER_LOYALTY_PROGRAM_MEMBERSHIP")
            .with_field("ID", FieldKind::Number, "primarykey")
            .with_field("PREFERRED_COMMUNICATION_CHANNEL_IDENTIFIER", FieldKind::String, "index")])
        .unwrap();

        for (dialect, max) in [(Dialect::Postgres, 63), (Dialect::MySql, 64), (Dialect::SqlServer, 128)] {
            let resolved = resolve_catalog(&catalog, dialect).unwrap();
            let name = &resolved.tables[0].indexes[0].name;
            assert!(name.len() <= max, "{dialect}: {name}");
            assert!(name.ends_with("_idx"));
        }
        let sqlserver = resolve_catalog(&catalog, Dialect::SqlServer).unwrap();
        assert_eq!(
            sqlserver.tables[0].indexes[0].name,
            "customer_loyalty_program_membership_preferred_communication_channel_identifier_idx"
        );
    }

    #[test]
    fn test_unique_over_omitted_column_warns() {
        let catalog = build_catalog(&[TableDescriptor::new("T")
            .with_field("ID", FieldKind::Number, "primarykey")
            .with_field("CODE", FieldKind::String, "dialect=postgres unique")])
        .unwrap();
        let resolved = resolve_catalog(&catalog, Dialect::MySql).unwrap();
        assert!(resolved.tables[0].unique_constraints.is_empty());
        assert_eq!(resolved.warnings.len(), 1);
        assert!(resolved.warnings[0].contains("unique constraint"), "{:?}", resolved.warnings);

        let postgres = resolve_catalog(&catalog, Dialect::Postgres).unwrap();
        assert_eq!(postgres.tables[0].unique_constraints[0].name, "t_code_key");
        assert!(postgres.warnings.is_empty());
    }

    #[test]
    fn test_constraint_name() {
        assert_eq!(constraint_name("FILM_ACTOR", &[], "pkey"), "film_actor_pkey");
        assert_eq!(
            constraint_name("FilmActor", &["actorId".to_string()], "fkey"),
            "film_actor_actor_id_fkey"
        );
    }
}
