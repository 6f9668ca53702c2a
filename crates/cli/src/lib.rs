//! # ddlforge CLI
//!
//! Command-line interface for ddlforge.
//!
//! ## Commands
//!
//! - `generate` - Render migration batches from descriptor files
//! - `validate` - Interpret and validate descriptor files without emitting SQL
//! - `dialects` - List the supported dialects
//!
//! Inputs are a single descriptor file or a directory; directories are walked
//! recursively and every `*.json` file is loaded in path order, so the table
//! declaration order is stable across runs.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use ddlforge_codegen::{Generator, GeneratorConfig, MigrationSet, summarize};
use ddlforge_core::Dialect;
use ddlforge_ir::serialization::DESCRIPTOR_EXTENSION;
use ddlforge_ir::{TableDescriptor, build_catalog, load_descriptors};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "ddlforge")]
#[command(version, about = "Dialect-aware DDL migration generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate migration batches from descriptor files
    Generate {
        /// Descriptor file or directory of descriptor files
        #[arg(short, long)]
        input: PathBuf,

        /// Target dialect (sqlite, postgres, mysql, sqlserver)
        #[arg(short, long, env = "DDLFORGE_DIALECT", default_value = "postgres")]
        dialect: String,

        /// Write files here instead of printing them
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Filename prefix (defaults to a UTC timestamp)
        #[arg(short, long, env = "DDLFORGE_PREFIX")]
        prefix: Option<String>,

        /// Schema name used in file names
        #[arg(long, default_value = "schema")]
        schema_name: String,

        /// Skip the undo batch
        #[arg(long)]
        no_undo: bool,

        /// Print a summary after writing files
        #[arg(long)]
        summary: bool,
    },

    /// Interpret and validate descriptor files
    Validate {
        /// Descriptor file or directory of descriptor files
        #[arg(short, long)]
        input: PathBuf,
    },

    /// List supported dialects
    Dialects,
}

// ============================================================================
// Entry points
// ============================================================================

/// Run a parsed command line against the process stdout
pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(cli.command, &mut out)
}

/// Run a command, writing its primary output to `out`.
///
/// Warnings always go to stderr so that printed SQL stays clean.
pub fn execute(command: Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Generate {
            input,
            dialect,
            output_dir,
            prefix,
            schema_name,
            no_undo,
            summary,
        } => {
            let mut config = GeneratorConfig::for_dialect(&dialect)?.with_schema_name(schema_name);
            if let Some(prefix) = prefix {
                config = config.with_prefix(prefix);
            }
            if no_undo {
                config = config.without_undo();
            }

            let descriptors = collect_descriptors(&input)?;
            let generator = Generator::new(config);

            match output_dir {
                Some(dir) => {
                    let set = generator
                        .generate_and_write(&descriptors, &dir)
                        .with_context(|| format!("generating migrations into {}", dir.display()))?;
                    report_warnings(&set);
                    for file in &set.files {
                        writeln!(out, "{} {}", "wrote".green(), dir.join(&file.name).display())?;
                    }
                    if summary {
                        write!(out, "{}", summarize(&set))?;
                    }
                }
                None => {
                    let set = generator.generate(&descriptors)?;
                    report_warnings(&set);
                    print_files(&set, out)?;
                }
            }
            Ok(())
        }

        Command::Validate { input } => {
            let descriptors = collect_descriptors(&input)?;
            let catalog = build_catalog(&descriptors)?;
            writeln!(
                out,
                "{} {} table(s) in {}",
                "valid:".green().bold(),
                catalog.len(),
                input.display()
            )?;
            Ok(())
        }

        Command::Dialects => {
            for dialect in Dialect::all() {
                writeln!(out, "{:<10} {}", dialect.as_str(), dialect.display_name())?;
            }
            Ok(())
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Load descriptors from a file, or from every descriptor file under a directory
pub fn collect_descriptors(input: &Path) -> Result<Vec<TableDescriptor>> {
    if input.is_file() {
        return Ok(load_descriptors(input)?);
    }
    if !input.is_dir() {
        bail!("input '{}' does not exist", input.display());
    }

    let mut descriptors = Vec::new();
    let mut loaded = 0usize;
    for entry in WalkDir::new(input).sort_by_file_name() {
        let entry = entry.with_context(|| format!("walking {}", input.display()))?;
        let path = entry.path();
        if !entry.file_type().is_file()
            || path.extension().is_none_or(|ext| ext != DESCRIPTOR_EXTENSION)
        {
            continue;
        }
        tracing::debug!(path = %path.display(), "loading descriptors");
        descriptors.extend(load_descriptors(path)?);
        loaded += 1;
    }

    if loaded == 0 {
        bail!("no .{} descriptor files found in {}", DESCRIPTOR_EXTENSION, input.display());
    }
    Ok(descriptors)
}

fn report_warnings(set: &MigrationSet) {
    for warning in &set.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
}

/// `-- <filename>` followed by the file content, one block per file
fn print_files(set: &MigrationSet, out: &mut dyn Write) -> Result<()> {
    for (i, file) in set.files.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "-- {}", file.name)?;
        write!(out, "{}", file.content)?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ddlforge_core::{DdlError, FieldKind};
    use ddlforge_ir::save_descriptors;
    use tempfile::TempDir;

    fn language() -> TableDescriptor {
        TableDescriptor::new("LANGUAGE")
            .with_field("LANGUAGE_ID", FieldKind::Number, "primarykey identity")
            .with_field("NAME", FieldKind::String, "notnull len=20")
    }

    fn film() -> TableDescriptor {
        TableDescriptor::new("FILM")
            .with_field("FILM_ID", FieldKind::Number, "primarykey identity")
            .with_field("LANGUAGE_ID", FieldKind::Number, "notnull references=language")
    }

    fn run_to_string(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        execute(cli.command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_generate_to_stdout() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("sakila.json");
        save_descriptors(&[film(), language()], &input).unwrap();

        let out = run_to_string(&[
            "ddlforge",
            "generate",
            "--input",
            input.to_str().unwrap(),
            "--dialect",
            "postgres",
            "--prefix",
            "0001",
        ])
        .unwrap();

        assert!(out.starts_with("-- 0001_schema.sql\n-- Schema generated by ddlforge for PostgreSQL\n"));
        assert!(out.contains("\n-- 0001_schema.undo.sql\n"));
        assert!(out.find("CREATE TABLE LANGUAGE").unwrap() < out.find("CREATE TABLE FILM").unwrap());
    }

    #[test]
    fn test_generate_to_directory() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.json");
        save_descriptors(&[language()], &input).unwrap();
        let output = dir.path().join("out");

        run_to_string(&[
            "ddlforge",
            "generate",
            "-i",
            input.to_str().unwrap(),
            "-d",
            "mysql",
            "-o",
            output.to_str().unwrap(),
            "-p",
            "0007",
            "--schema-name",
            "sakila",
            "--no-undo",
        ])
        .unwrap();

        assert!(output.join("0007_sakila.sql").exists());
        assert!(!output.join("0007_sakila.undo.sql").exists());
    }

    #[test]
    fn test_directory_input_loads_in_path_order() {
        let dir = TempDir::new().unwrap();
        save_descriptors(&[language()], dir.path().join("b.json")).unwrap();
        save_descriptors(&[film()], dir.path().join("a.json")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let descriptors = collect_descriptors(dir.path()).unwrap();
        let names: Vec<&str> = descriptors.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["FILM", "LANGUAGE"]);
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(collect_descriptors(dir.path()).is_err());
        assert!(collect_descriptors(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_validate_reports_dangling_reference() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("film.json");
        save_descriptors(&[film()], &input).unwrap();

        let err = run_to_string(&["ddlforge", "validate", "--input", input.to_str().unwrap()])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DdlError>(),
            Some(DdlError::DanglingReference { .. })
        ));
    }

    #[test]
    fn test_validate_reports_cycle() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("cycle.json");
        let linked = |name: &str, target: &str| {
            TableDescriptor::new(name)
                .with_field("ID", FieldKind::Number, "primarykey")
                .with_field("NEXT_ID", FieldKind::Number, format!("references={}", target))
        };
        save_descriptors(&[linked("A", "b"), linked("B", "a")], &input).unwrap();

        let err = run_to_string(&["ddlforge", "validate", "-i", input.to_str().unwrap()])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DdlError>(),
            Some(DdlError::CyclicDependency { tables }) if tables == &["A", "B"]
        ));
    }

    #[test]
    fn test_validate_success() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("ok.json");
        save_descriptors(&[film(), language()], &input).unwrap();

        let out = run_to_string(&["ddlforge", "validate", "-i", input.to_str().unwrap()]).unwrap();
        assert!(out.contains("2 table(s)"));
    }

    #[test]
    fn test_unknown_dialect() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("ok.json");
        save_descriptors(&[language()], &input).unwrap();

        let err = run_to_string(&[
            "ddlforge",
            "generate",
            "-i",
            input.to_str().unwrap(),
            "-d",
            "oracle",
        ])
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DdlError>(),
            Some(DdlError::UnsupportedDialect(_))
        ));
    }

    #[test]
    fn test_sakila_demo() {
        let demo = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/sakila.json");
        let descriptors = collect_descriptors(&demo).unwrap();
        assert_eq!(descriptors.len(), 6);

        for dialect in Dialect::all() {
            let config = GeneratorConfig::new(*dialect).with_prefix("0001");
            let set = Generator::new(config).generate(&descriptors).unwrap();
            let order: Vec<&str> = set.files[0]
                .content
                .lines()
                .filter_map(|l| l.strip_prefix("CREATE TABLE "))
                .map(|l| l.trim_end_matches(" ("))
                .collect();
            assert_eq!(
                order,
                ["LANGUAGE", "FILM", "ACTOR", "FILM_ACTOR", "CATEGORY", "FILM_CATEGORY"],
                "{dialect}"
            );
            let expected_warnings = usize::from(*dialect != Dialect::Postgres);
            assert_eq!(set.warnings.len(), expected_warnings, "{:?}", set.warnings);
        }
    }

    #[test]
    fn test_dialects_listing() {
        let out = run_to_string(&["ddlforge", "dialects"]).unwrap();
        assert_eq!(out.lines().count(), 4);
        assert!(out.contains("sqlserver  SQL Server"));
    }
}
