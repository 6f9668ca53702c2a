//! `CREATE TABLE` batch

use crate::context::GenerationContext;
use crate::dialect::MethodSyntax;
use crate::migrations::header;
use crate::resolve::{ResolvedColumn, ResolvedForeignKey, ResolvedIndex, ResolvedTable};
use crate::{BatchKind, GeneratedFile};

/// Render the schema batch
pub fn generate_schema(ctx: &GenerationContext) -> GeneratedFile {
    let mut out = header(ctx, "Schema");

    for table in ctx.tables() {
        out.push('\n');
        out.push_str(&create_table(ctx, table));

        if ctx.profile().alter_add_constraint {
            for fk in table.foreign_keys.iter().filter(|fk| fk.self_reference) {
                out.push_str(&format!(
                    "\nALTER TABLE {} ADD {};\n",
                    ctx.quote(&table.name),
                    foreign_key_clause(ctx, fk)
                ));
            }
        }

        if !table.indexes.is_empty() {
            out.push('\n');
            for index in &table.indexes {
                out.push_str(&create_index(ctx, table, index));
                out.push('\n');
            }
        }
    }

    GeneratedFile::new(ctx.migration_filename(BatchKind::Up), BatchKind::Up, out)
}

// ============================================================================
// CREATE TABLE
// ============================================================================

fn create_table(ctx: &GenerationContext, table: &ResolvedTable) -> String {
    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|column| column_definition(ctx, column))
        .collect();

    if let Some(pk) = &table.primary_key {
        lines.push(format!(
            "CONSTRAINT {} PRIMARY KEY ({})",
            ctx.quote(&pk.name),
            column_list(ctx, &pk.columns)
        ));
    }

    for unique in &table.unique_constraints {
        lines.push(format!(
            "CONSTRAINT {} UNIQUE ({})",
            ctx.quote(&unique.name),
            column_list(ctx, &unique.columns)
        ));
    }

    let inline_self_references = !ctx.profile().alter_add_constraint;
    for fk in &table.foreign_keys {
        if !fk.self_reference || inline_self_references {
            lines.push(foreign_key_clause(ctx, fk));
        }
    }

    format!(
        "CREATE TABLE {} (\n    {}\n);\n",
        ctx.quote(&table.name),
        lines.join(",\n    ")
    )
}

fn column_definition(ctx: &GenerationContext, column: &ResolvedColumn) -> String {
    let mut def = format!("{} {}", ctx.quote(&column.name), column.sql_type);
    if column.not_null {
        def.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default {
        def.push_str(" DEFAULT ");
        def.push_str(default);
    }
    if let Some(on_update) = column.on_update {
        def.push(' ');
        def.push_str(on_update);
    }
    if let Some(generation) = &column.generation {
        def.push(' ');
        def.push_str(generation);
    }
    def
}

fn foreign_key_clause(ctx: &GenerationContext, fk: &ResolvedForeignKey) -> String {
    let mut clause = format!(
        "CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({})",
        ctx.quote(&fk.name),
        column_list(ctx, &fk.columns),
        ctx.quote(&fk.target_table),
        column_list(ctx, &fk.target_columns)
    );
    if let Some(action) = fk.on_update {
        clause.push_str(" ON UPDATE ");
        clause.push_str(action);
    }
    if let Some(action) = fk.on_delete {
        clause.push_str(" ON DELETE ");
        clause.push_str(action);
    }
    clause
}

fn column_list(ctx: &GenerationContext, columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| ctx.quote(c))
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// CREATE INDEX
// ============================================================================

fn create_index(ctx: &GenerationContext, table: &ResolvedTable, index: &ResolvedIndex) -> String {
    let mut stmt = String::from("CREATE ");
    if index.unique {
        stmt.push_str("UNIQUE ");
    }
    if let Some((method, MethodSyntax::Prefix)) = index.method {
        stmt.push_str(method);
        stmt.push(' ');
    }
    stmt.push_str(&format!(
        "INDEX {} ON {}",
        ctx.quote(&index.name),
        ctx.quote(&table.name)
    ));
    if let Some((method, MethodSyntax::Using)) = index.method {
        stmt.push_str(" USING ");
        stmt.push_str(method);
    }
    stmt.push_str(&format!(" ({})", index.parts.join(", ")));
    if let Some((method, MethodSyntax::Suffix)) = index.method {
        stmt.push_str(" USING ");
        stmt.push_str(method);
    }
    stmt.push(';');
    stmt
}

// ============================================================================
// Tests
// ============================================================================
