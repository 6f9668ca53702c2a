//! Tag/attribute interpreter
//!
//! Converts [`TableDescriptor`]s into a [`Catalog`]. Each field's attribute
//! string is tokenized by [`crate::attribute`] and every token is mapped onto
//! typed column settings, keys, indexes and foreign keys. Unknown or
//! malformed tokens fail with [`DdlError::AttributeParse`] naming the table,
//! the field and the token.
//!
//! Table-level attributes (the descriptor's own attribute string) declare
//! composite keys, table indexes and composite foreign keys:
//!
//! ```text
//! primarykey=actor_id,film_id
//! unique=first_name,last_name
//! index={last_name,first_name unique}
//! foreignkey={film_id,actor_id references=film_actor onupdate=cascade index}
//! ```

use crate::attribute::{Attribute, TokenError, parse_attributes, split_list, split_tokens};
use crate::catalog::Catalog;
use crate::column::{Column, ColumnSettings, Identity};
use crate::descriptor::{FieldDescriptor, TableDescriptor};
use crate::table::{ForeignKey, Index, IndexPart, PrimaryKey, Table, UniqueConstraint};
use ddlforge_core::{DdlError, DdlResult, Dialect, FieldKind, ReferentialAction};

/// Field name reported for errors in table-level attributes
pub const TABLE_ATTRIBUTES: &str = "*";

// ============================================================================
// Entry points
// ============================================================================

/// Build a catalog from descriptors, in declaration order
pub fn interpret(descriptors: &[TableDescriptor]) -> DdlResult<Catalog> {
    let mut catalog = Catalog::new();
    for descriptor in descriptors {
        let table = interpret_table(descriptor)?;
        tracing::debug!(
            table = %table.name,
            columns = table.column_count(),
            indexes = table.indexes.len(),
            foreign_keys = table.foreign_keys.len(),
            "table interpreted",
        );
        catalog.add_table(table)?;
    }
    Ok(catalog)
}

/// Interpret a single table descriptor
pub fn interpret_table(descriptor: &TableDescriptor) -> DdlResult<Table> {
    let mut table = Table::new(&descriptor.name);
    let table_ctx = Context::new(&descriptor.name, TABLE_ATTRIBUTES);

    let mut declared_pk: Option<(PrimaryKey, String)> = None;
    let table_attributes =
        parse_attributes(&descriptor.attributes).map_err(|e| table_ctx.token_error(e))?;
    for attr in &table_attributes {
        apply_table_attribute(&table_ctx, &mut table, &mut declared_pk, attr)?;
    }

    let mut pk_fields: Vec<String> = Vec::new();
    for field in &descriptor.fields {
        let ctx = Context::new(&descriptor.name, &field.name);
        let interpreted = interpret_field(&ctx, field)?;

        if interpreted.primary_key {
            pk_fields.push(field.name.clone());
        }
        if interpreted.unique {
            table
                .unique_constraints
                .push(UniqueConstraint::new([field.name.clone()]));
        }
        table.indexes.extend(interpreted.indexes);
        table.foreign_keys.extend(interpreted.foreign_key);
        table.add_column(interpreted.column)?;
    }

    table.primary_key = match (declared_pk, pk_fields.is_empty()) {
        (Some((_, raw)), false) => {
            return Err(table_ctx.error(
                &raw,
                format!(
                    "primary key is declared on the table and on field(s) {}",
                    pk_fields.join(", ")
                ),
            ));
        }
        (Some((pk, _)), true) => Some(pk),
        (None, false) => Some(PrimaryKey::new(pk_fields)),
        (None, true) => None,
    };

    for name in table.primary_key_columns() {
        if let Some(column) = table.column(name) {
            if column.is_dialect_restricted() {
                let dialects: Vec<&str> = column.dialects.iter().map(|d| d.as_str()).collect();
                return Err(DdlError::attribute(
                    &table.name,
                    &column.name,
                    format!("dialect={}", dialects.join(",")),
                    "primary key columns cannot be restricted to specific dialects",
                ));
            }
        }
    }

    Ok(table)
}

// ============================================================================
// Error context
// ============================================================================

struct Context<'a> {
    table: &'a str,
    field: &'a str,
}

impl<'a> Context<'a> {
    fn new(table: &'a str, field: &'a str) -> Self {
        Self { table, field }
    }

    fn error(&self, token: &str, message: impl Into<String>) -> DdlError {
        DdlError::attribute(self.table, self.field, token, message)
    }

    fn token_error(&self, err: TokenError) -> DdlError {
        self.error(&err.token, err.message)
    }

    fn expect_flag(&self, attr: &Attribute) -> DdlResult<()> {
        if attr.is_flag() {
            Ok(())
        } else {
            Err(self.error(&attr.raw, format!("'{}' does not take a value", attr.key)))
        }
    }

    fn expect_value<'b>(&self, attr: &'b Attribute) -> DdlResult<&'b str> {
        attr.value
            .as_deref()
            .ok_or_else(|| self.error(&attr.raw, format!("'{}' requires a value", attr.key)))
    }
}

// ============================================================================
// Fields
// ============================================================================

struct InterpretedField {
    column: Column,
    primary_key: bool,
    unique: bool,
    indexes: Vec<Index>,
    foreign_key: Option<ForeignKey>,
}

fn interpret_field(ctx: &Context<'_>, field: &FieldDescriptor) -> DdlResult<InterpretedField> {
    let mut out = InterpretedField {
        column: Column::new(&field.name, field.kind),
        primary_key: false,
        unique: false,
        indexes: Vec::new(),
        foreign_key: None,
    };

    let attributes = parse_attributes(&field.attributes).map_err(|e| ctx.token_error(e))?;
    for attr in &attributes {
        match attr.dialect {
            Some(dialect) => apply_scoped_field_attribute(ctx, &mut out, dialect, attr)?,
            None => apply_field_attribute(ctx, &mut out, attr)?,
        }
    }
    Ok(out)
}

fn apply_field_attribute(
    ctx: &Context<'_>,
    out: &mut InterpretedField,
    attr: &Attribute,
) -> DdlResult<()> {
    match attr.key.as_str() {
        "primarykey" => {
            ctx.expect_flag(attr)?;
            out.primary_key = true;
        }
        "unique" => {
            ctx.expect_flag(attr)?;
            out.unique = true;
        }
        "dialect" => {
            let value = ctx.expect_value(attr)?;
            out.column.dialects = parse_dialect_list(ctx, attr, value)?;
        }
        "index" => {
            let index = parse_field_index(ctx, attr, &out.column.name)?;
            out.indexes.push(index);
        }
        "references" => {
            if out.foreign_key.is_some() {
                return Err(ctx.error(&attr.raw, "a field can only declare one reference"));
            }
            let reference = parse_field_reference(ctx, attr, &out.column.name)?;
            if reference.indexed {
                out.indexes
                    .push(Index::on_columns(reference.foreign_key.columns.clone()));
            }
            out.foreign_key = Some(reference.foreign_key);
        }
        _ => {
            let kind = out.column.kind;
            apply_setting(ctx, &mut out.column.settings, kind, attr)?;
        }
    }
    Ok(())
}

fn apply_scoped_field_attribute(
    ctx: &Context<'_>,
    out: &mut InterpretedField,
    dialect: Dialect,
    attr: &Attribute,
) -> DdlResult<()> {
    match attr.key.as_str() {
        "index" => {
            let mut index = parse_field_index(ctx, attr, &out.column.name)?;
            scope_index(ctx, attr, &mut index, dialect)?;
            out.indexes.push(index);
            Ok(())
        }
        "primarykey" | "references" | "unique" | "dialect" => Err(ctx.error(
            &attr.raw,
            format!("'{}' cannot be scoped to a single dialect", attr.key),
        )),
        _ => {
            let kind = out.column.kind;
            apply_setting(ctx, out.column.override_mut(dialect), kind, attr)
        }
    }
}

/// Settings shared by the generic and the dialect-scoped forms
fn apply_setting(
    ctx: &Context<'_>,
    settings: &mut ColumnSettings,
    kind: FieldKind,
    attr: &Attribute,
) -> DdlResult<()> {
    match attr.key.as_str() {
        "type" => {
            settings.type_name = Some(ctx.expect_value(attr)?.to_string());
        }
        "default" => {
            settings.default = Some(ctx.expect_value(attr)?.to_string());
        }
        "len" => {
            let value = ctx.expect_value(attr)?;
            if !kind.accepts_length() {
                return Err(ctx.error(
                    &attr.raw,
                    format!("len only applies to string fields, not {}", kind),
                ));
            }
            let length = value
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ctx.error(&attr.raw, "len must be a positive integer"))?;
            settings.length = Some(length);
        }
        "notnull" => {
            ctx.expect_flag(attr)?;
            settings.not_null = Some(true);
        }
        "auto_increment" | "autoincrement" => {
            ctx.expect_flag(attr)?;
            settings.auto_increment = Some(true);
        }
        "identity" => {
            ctx.expect_flag(attr)?;
            settings.identity = Some(Identity::ByDefault);
        }
        "alwaysidentity" => {
            ctx.expect_flag(attr)?;
            settings.identity = Some(Identity::Always);
        }
        "onupdatecurrenttimestamp" => {
            ctx.expect_flag(attr)?;
            settings.on_update_current_timestamp = Some(true);
        }
        other => {
            return Err(ctx.error(&attr.raw, format!("unknown attribute '{}'", other)));
        }
    }
    Ok(())
}

fn parse_field_index(ctx: &Context<'_>, attr: &Attribute, column: &str) -> DdlResult<Index> {
    match attr.unbraced_value() {
        None => Ok(Index::on_columns([column])),
        Some(body) => parse_index_body(ctx, attr, body, Some(column)),
    }
}

// ============================================================================
// Table-level attributes
// ============================================================================

fn apply_table_attribute(
    ctx: &Context<'_>,
    table: &mut Table,
    declared_pk: &mut Option<(PrimaryKey, String)>,
    attr: &Attribute,
) -> DdlResult<()> {
    if let Some(dialect) = attr.dialect {
        if attr.key != "index" {
            return Err(ctx.error(
                &attr.raw,
                format!("'{}' cannot be scoped to a single dialect", attr.key),
            ));
        }
        let body = attr.unbraced_value().unwrap_or_default();
        let mut index = parse_index_body(ctx, attr, body, None)?;
        scope_index(ctx, attr, &mut index, dialect)?;
        table.indexes.push(index);
        return Ok(());
    }

    match attr.key.as_str() {
        "primarykey" => {
            if declared_pk.is_some() {
                return Err(ctx.error(&attr.raw, "primary key is declared more than once"));
            }
            let columns = parse_column_list(ctx, attr)?;
            *declared_pk = Some((PrimaryKey::new(columns), attr.raw.clone()));
        }
        "unique" => {
            let columns = parse_column_list(ctx, attr)?;
            table.unique_constraints.push(UniqueConstraint::new(columns));
        }
        "index" => {
            ctx.expect_value(attr)?;
            let body = attr.unbraced_value().unwrap_or_default();
            let index = parse_index_body(ctx, attr, body, None)?;
            table.indexes.push(index);
        }
        "foreignkey" => {
            let reference = parse_table_foreign_key(ctx, attr)?;
            if reference.indexed {
                table
                    .indexes
                    .push(Index::on_columns(reference.foreign_key.columns.clone()));
            }
            table.foreign_keys.push(reference.foreign_key);
        }
        other => {
            return Err(ctx.error(&attr.raw, format!("unknown table attribute '{}'", other)));
        }
    }
    Ok(())
}

fn parse_column_list(ctx: &Context<'_>, attr: &Attribute) -> DdlResult<Vec<String>> {
    ctx.expect_value(attr)?;
    let columns = split_list(attr.unbraced_value().unwrap_or_default());
    if columns.is_empty() {
        return Err(ctx.error(&attr.raw, format!("'{}' needs at least one column", attr.key)));
    }
    Ok(columns)
}

// ============================================================================
// Indexes
// ============================================================================

/// Parse `<parts> [unique] [using=<method>] [dialect=<d,..>]`.
///
/// `.` stands for the field's own column and is only valid when
/// `this_column` is given.
fn parse_index_body(
    ctx: &Context<'_>,
    attr: &Attribute,
    body: &str,
    this_column: Option<&str>,
) -> DdlResult<Index> {
    let tokens = split_tokens(body).map_err(|e| ctx.token_error(e))?;
    let mut tokens = tokens.into_iter();
    let parts_raw = tokens
        .next()
        .ok_or_else(|| ctx.error(&attr.raw, "index needs at least one column"))?;

    let mut parts = Vec::new();
    for raw in split_list(&parts_raw) {
        if raw == "." {
            let column = this_column.ok_or_else(|| {
                ctx.error(&attr.raw, "'.' can only be used in a field's index attribute")
            })?;
            parts.push(IndexPart::Column(column.to_string()));
        } else {
            parts.push(IndexPart::parse(&raw));
        }
    }
    if parts.is_empty() {
        return Err(ctx.error(&attr.raw, "index needs at least one column"));
    }

    let mut index = Index {
        parts,
        unique: false,
        method: None,
        dialects: Vec::new(),
    };

    for token in tokens {
        let (key, value) = split_option(&token);
        match (key.as_str(), value) {
            ("unique", None) => index.unique = true,
            ("using", Some(method)) => index.method = Some(method.to_string()),
            ("dialect", Some(list)) => index.dialects = parse_dialect_list(ctx, attr, list)?,
            _ => {
                return Err(ctx.error(&attr.raw, format!("unknown index option '{}'", token)));
            }
        }
    }
    Ok(index)
}

/// Apply a `dialect:` prefix to an index, keeping any explicit list consistent
fn scope_index(
    ctx: &Context<'_>,
    attr: &Attribute,
    index: &mut Index,
    dialect: Dialect,
) -> DdlResult<()> {
    if !index.dialects.is_empty() && !index.dialects.contains(&dialect) {
        return Err(ctx.error(
            &attr.raw,
            format!("index is scoped to {} but its dialect list excludes it", dialect),
        ));
    }
    index.dialects = vec![dialect];
    Ok(())
}

// ============================================================================
// References
// ============================================================================

struct Reference {
    foreign_key: ForeignKey,
    indexed: bool,
}

/// `references=<table>[.<column>]` or
/// `references={<table>[.<column>] [onupdate=<a>] [ondelete=<a>] [index]}`
fn parse_field_reference(
    ctx: &Context<'_>,
    attr: &Attribute,
    column: &str,
) -> DdlResult<Reference> {
    ctx.expect_value(attr)?;
    let body = attr.unbraced_value().unwrap_or_default();
    let tokens = split_tokens(body).map_err(|e| ctx.token_error(e))?;
    let mut tokens = tokens.into_iter();
    let target = tokens
        .next()
        .ok_or_else(|| ctx.error(&attr.raw, "references needs a target table"))?;

    let mut reference = Reference {
        foreign_key: ForeignKey::new(column, ""),
        indexed: false,
    };
    set_target(ctx, attr, &mut reference.foreign_key, &target)?;
    for token in tokens {
        apply_reference_option(ctx, attr, &mut reference, &token)?;
    }
    Ok(reference)
}

/// `foreignkey={<c1,c2> references=<table>[.<c1,c2>] [onupdate=<a>] [ondelete=<a>] [index]}`
fn parse_table_foreign_key(ctx: &Context<'_>, attr: &Attribute) -> DdlResult<Reference> {
    ctx.expect_value(attr)?;
    let body = attr.unbraced_value().unwrap_or_default();
    let tokens = split_tokens(body).map_err(|e| ctx.token_error(e))?;
    let mut tokens = tokens.into_iter();

    let columns = tokens.next().map(|t| split_list(&t)).unwrap_or_default();
    if columns.is_empty() {
        return Err(ctx.error(&attr.raw, "foreignkey needs at least one column"));
    }

    let mut reference = Reference {
        foreign_key: ForeignKey {
            columns,
            target_table: String::new(),
            target_columns: Vec::new(),
            on_update: None,
            on_delete: None,
        },
        indexed: false,
    };

    for token in tokens {
        let (key, value) = split_option(&token);
        if key == "references" {
            let target = value.ok_or_else(|| {
                ctx.error(&attr.raw, "references requires a value inside foreignkey")
            })?;
            if !reference.foreign_key.target_table.is_empty() {
                return Err(ctx.error(&attr.raw, "foreignkey declares references twice"));
            }
            set_target(ctx, attr, &mut reference.foreign_key, target)?;
        } else {
            apply_reference_option(ctx, attr, &mut reference, &token)?;
        }
    }

    if reference.foreign_key.target_table.is_empty() {
        return Err(ctx.error(&attr.raw, "foreignkey needs references=<table>"));
    }
    Ok(reference)
}

fn set_target(
    ctx: &Context<'_>,
    attr: &Attribute,
    foreign_key: &mut ForeignKey,
    target: &str,
) -> DdlResult<()> {
    let (table, columns) = match target.split_once('.') {
        Some((table, columns)) => (table, split_list(columns)),
        None => (target, Vec::new()),
    };
    if table.is_empty() || target.ends_with('.') {
        return Err(ctx.error(&attr.raw, format!("malformed reference target '{}'", target)));
    }
    foreign_key.target_table = table.to_string();
    foreign_key.target_columns = columns;
    Ok(())
}

fn apply_reference_option(
    ctx: &Context<'_>,
    attr: &Attribute,
    reference: &mut Reference,
    token: &str,
) -> DdlResult<()> {
    let (key, value) = split_option(token);
    match (key.as_str(), value) {
        ("onupdate", Some(action)) => {
            reference.foreign_key.on_update = Some(parse_action(ctx, attr, action)?);
        }
        ("ondelete", Some(action)) => {
            reference.foreign_key.on_delete = Some(parse_action(ctx, attr, action)?);
        }
        ("index", None) => reference.indexed = true,
        _ => {
            return Err(ctx.error(&attr.raw, format!("unknown reference option '{}'", token)));
        }
    }
    Ok(())
}

fn parse_action(ctx: &Context<'_>, attr: &Attribute, value: &str) -> DdlResult<ReferentialAction> {
    ReferentialAction::parse(value)
        .ok_or_else(|| ctx.error(&attr.raw, format!("unknown referential action '{}'", value)))
}

// ============================================================================
// Helpers
// ============================================================================

fn split_option(token: &str) -> (String, Option<&str>) {
    match token.split_once('=') {
        Some((key, value)) => (key.to_ascii_lowercase(), Some(value)),
        None => (token.to_ascii_lowercase(), None),
    }
}

fn parse_dialect_list(ctx: &Context<'_>, attr: &Attribute, value: &str) -> DdlResult<Vec<Dialect>> {
    let mut dialects = Vec::new();
    for name in split_list(value) {
        let dialect = Dialect::parse(&name)
            .map_err(|_| ctx.error(&attr.raw, format!("unknown dialect '{}'", name)))?;
        if !dialects.contains(&dialect) {
            dialects.push(dialect);
        }
    }
    if dialects.is_empty() {
        return Err(ctx.error(&attr.raw, "dialect list is empty"));
    }
    Ok(dialects)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn film() -> TableDescriptor {
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
                "ORIGINAL_LANGUAGE_ID",
                FieldKind::Number,
                "references={language.language_id onupdate=cascade ondelete=restrict index}",
            )
            .with_field(
                "RENTAL_RATE",
                FieldKind::Number,
                "type=DECIMAL(4,2) sqlite:type=REAL notnull default=4.99",
            )
            .with_field(
                "FULLTEXT",
                FieldKind::Any,
                "dialect=postgres type=TSVECTOR index={. using=GIST}",
            )
    }

    fn interpret_err(descriptor: TableDescriptor) -> DdlError {
        interpret_table(&descriptor).unwrap_err()
    }

    #[test]
    fn test_columns_preserve_declaration_order() {
        let table = interpret_table(&film()).unwrap();
        assert_eq!(
            table.column_names(),
            [
                "FILM_ID",
                "TITLE",
                "RELEASE_YEAR",
                "LANGUAGE_ID",
                "ORIGINAL_LANGUAGE_ID",
                "RENTAL_RATE",
                "FULLTEXT"
            ]
        );
        assert_eq!(table.primary_key, Some(PrimaryKey::new(["FILM_ID"])));
    }

    #[test]
    fn test_column_settings() {
        let table = interpret_table(&film()).unwrap();

        let id = table.column("FILM_ID").unwrap();
        assert!(id.settings.is_auto_increment());
        assert_eq!(id.settings.identity, Some(Identity::ByDefault));

        let title = table.column("TITLE").unwrap();
        assert_eq!(title.settings.length, Some(255));
        assert!(title.settings.is_not_null());

        let rate = table.column("RENTAL_RATE").unwrap();
        assert_eq!(rate.settings.type_name.as_deref(), Some("DECIMAL(4,2)"));
        assert_eq!(rate.settings.default.as_deref(), Some("4.99"));
        assert_eq!(
            rate.settings_for(Dialect::Sqlite).type_name.as_deref(),
            Some("REAL")
        );

        let year = table.column("RELEASE_YEAR").unwrap();
        assert_eq!(year.settings.type_name, None);
        assert_eq!(
            year.settings_for(Dialect::Postgres).type_name.as_deref(),
            Some("year")
        );
    }

    #[test]
    fn test_references_and_indexes() {
        let table = interpret_table(&film()).unwrap();
        assert_eq!(table.foreign_keys.len(), 2);

        let language = &table.foreign_keys[0];
        assert_eq!(language.columns, ["LANGUAGE_ID"]);
        assert_eq!(language.target_table, "language");
        assert!(language.target_columns.is_empty());
        assert_eq!(language.on_update, Some(ReferentialAction::Cascade));
        assert_eq!(language.on_delete, Some(ReferentialAction::Restrict));

        let original = &table.foreign_keys[1];
        assert_eq!(original.target_columns, ["language_id"]);

        let indexed: Vec<Vec<&str>> = table
            .indexes
            .iter()
            .map(|i| i.columns().collect())
            .collect();
        assert_eq!(
            indexed,
            [
                vec!["TITLE"],
                vec!["LANGUAGE_ID"],
                vec!["ORIGINAL_LANGUAGE_ID"],
                vec!["FULLTEXT"]
            ]
        );
        assert_eq!(table.indexes[3].method.as_deref(), Some("GIST"));
    }

    #[test]
    fn test_dialect_restricted_field() {
        let table = interpret_table(&film()).unwrap();
        let fulltext = table.column("FULLTEXT").unwrap();
        assert_eq!(fulltext.dialects, [Dialect::Postgres]);
        assert_eq!(fulltext.settings.type_name.as_deref(), Some("TSVECTOR"));
    }

    #[test]
    fn test_dialect_group_sets_overrides() {
        let table = interpret_table(&TableDescriptor::new("t").with_field(
            "c",
            FieldKind::String,
            "len=50 mysql:{type=TINYTEXT notnull} sqlserver:index",
        ))
        .unwrap();
        let column = table.column("c").unwrap();
        let mysql = column.settings_for(Dialect::MySql);
        assert_eq!(mysql.type_name.as_deref(), Some("TINYTEXT"));
        assert!(mysql.is_not_null());
        assert_eq!(mysql.length, Some(50));
        assert!(!column.settings.is_not_null());
        assert_eq!(table.indexes[0].dialects, [Dialect::SqlServer]);
    }

    #[test]
    fn test_table_level_composite_keys() {
        let table = interpret_table(
            &TableDescriptor::new("FILM_ACTOR")
                .with_attributes(
                    "primarykey=actor_id,film_id index={film_id,actor_id unique} \
                     foreignkey={actor_id references=actor onupdate=cascade}",
                )
                .with_field("ACTOR_ID", FieldKind::Number, "notnull")
                .with_field("FILM_ID", FieldKind::Number, "notnull"),
        )
        .unwrap();

        assert_eq!(table.primary_key_columns(), ["actor_id", "film_id"]);
        assert!(table.indexes[0].unique);
        assert_eq!(table.foreign_keys[0].columns, ["actor_id"]);
        assert_eq!(table.foreign_keys[0].target_table, "actor");
    }

    #[test]
    fn test_composite_primary_key_from_fields() {
        let table = interpret_table(
            &TableDescriptor::new("t")
                .with_field("a", FieldKind::Number, "primarykey")
                .with_field("b", FieldKind::Number, "primarykey"),
        )
        .unwrap();
        assert_eq!(table.primary_key_columns(), ["a", "b"]);
    }

    #[test]
    fn test_unknown_attribute_names_table_field_and_token() {
        let err = interpret_err(
            TableDescriptor::new("FILM").with_field("TITLE", FieldKind::String, "notnull lenght=5"),
        );
        match err {
            DdlError::AttributeParse {
                table,
                field,
                token,
                message,
            } => {
                assert_eq!(table, "FILM");
                assert_eq!(field, "TITLE");
                assert_eq!(token, "lenght=5");
                assert!(message.contains("lenght"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let cases = [
            (FieldKind::String, "len=abc"),
            (FieldKind::String, "len=0"),
            (FieldKind::Number, "len=10"),
            (FieldKind::Number, "notnull=yes"),
            (FieldKind::Number, "references"),
            (FieldKind::Number, "references={film ondelete=explode}"),
            (FieldKind::Number, "references={film onupdate}"),
            (FieldKind::Number, "references=film."),
            (FieldKind::Number, "dialect=oracle"),
            (FieldKind::Number, "index={. using}"),
            (FieldKind::Number, "postgres:references=film"),
            (FieldKind::Number, "postgres:primarykey"),
            (FieldKind::Number, "references=a references=b"),
        ];
        for (kind, attributes) in cases {
            let err = interpret_err(TableDescriptor::new("t").with_field("c", kind, attributes));
            assert!(
                matches!(err, DdlError::AttributeParse { .. }),
                "{attributes} produced {err:?}"
            );
        }
    }

    #[test]
    fn test_dot_outside_field_is_rejected() {
        let err = interpret_err(TableDescriptor::new("t").with_attributes("index={.}"));
        assert!(matches!(err, DdlError::AttributeParse { ref field, .. } if field == "*"));
    }

    #[test]
    fn test_primary_key_declared_twice() {
        let err = interpret_err(
            TableDescriptor::new("t")
                .with_attributes("primarykey=a")
                .with_field("a", FieldKind::Number, "primarykey"),
        );
        assert!(matches!(err, DdlError::AttributeParse { .. }));
    }

    #[test]
    fn test_primary_key_column_cannot_be_dialect_restricted() {
        let err = interpret_err(
            TableDescriptor::new("t").with_field("a", FieldKind::Number, "primarykey dialect=mysql"),
        );
        assert!(matches!(err, DdlError::AttributeParse { ref field, .. } if field == "a"));
    }

    #[test]
    fn test_duplicate_column() {
        let err = interpret_err(
            TableDescriptor::new("t")
                .with_field("a", FieldKind::Number, "")
                .with_field("A", FieldKind::Number, ""),
        );
        assert!(matches!(err, DdlError::DuplicateColumn { .. }));
    }

    #[test]
    fn test_duplicate_table() {
        let err = interpret(&[TableDescriptor::new("film"), TableDescriptor::new("FILM")])
            .unwrap_err();
        assert!(matches!(err, DdlError::DuplicateTable(_)));
    }

    #[test]
    fn test_interpret_catalog_order() {
        let catalog = interpret(&[
            film(),
            TableDescriptor::new("LANGUAGE").with_field("LANGUAGE_ID", FieldKind::Number, "primarykey"),
        ])
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.tables()[0].name, "FILM");
    }
}
