//! Undo batch: drops every created table, dependents first

use crate::context::GenerationContext;
use crate::migrations::header;
use crate::{BatchKind, GeneratedFile};

/// Render the undo batch
pub fn generate_undo(ctx: &GenerationContext) -> GeneratedFile {
    let mut out = header(ctx, "Undo");
    if !ctx.tables().is_empty() {
        out.push('\n');
    }
    for table in ctx.tables().iter().rev() {
        out.push_str(&format!("DROP TABLE IF EXISTS {};\n", ctx.quote(&table.name)));
    }
    GeneratedFile::new(ctx.migration_filename(BatchKind::Undo), BatchKind::Undo, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeneratorConfig;
    use ddlforge_core::{Dialect, FieldKind};
    use ddlforge_ir::{Catalog, TableDescriptor, build_catalog};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_drops_in_reverse_creation_order() {
        let catalog = build_catalog(&[
            TableDescriptor::new("FILM")
                .with_field("FILM_ID", FieldKind::Number, "primarykey")
                .with_field("LANGUAGE_ID", FieldKind::Number, "references=language"),
            TableDescriptor::new("LANGUAGE").with_field("LANGUAGE_ID", FieldKind::Number, "primarykey"),
        ])
        .unwrap();
        let ctx = GenerationContext::from_catalog(
            &catalog,
            GeneratorConfig::new(Dialect::MySql).with_prefix("0001"),
        )
        .unwrap();

        let file = generate_undo(&ctx);
        assert_eq!(file.name, "0001_schema.undo.sql");
        assert_eq!(file.kind, BatchKind::Undo);
        assert_eq!(
            file.content,
            "-- Undo generated by ddlforge for MySQL\n\
             -- Tables: 2\n\
             \n\
             DROP TABLE IF EXISTS FILM;\n\
             DROP TABLE IF EXISTS LANGUAGE;\n"
        );
    }

    #[test]
    fn test_empty_catalog() {
        let ctx = GenerationContext::from_catalog(
            &Catalog::new(),
            GeneratorConfig::new(Dialect::Sqlite).with_prefix("0001"),
        )
        .unwrap();
        assert_eq!(generate_undo(&ctx).statement_count(), 0);
    }
}
