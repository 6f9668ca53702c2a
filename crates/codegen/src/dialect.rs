//! # Dialect Profiles
//!
//! Everything that differs between SQL dialects lives in one static
//! [`DialectProfile`] per dialect. The resolver and the emitter never match on
//! [`Dialect`] directly; they ask the profile. Supporting another dialect
//! means adding a profile here and a variant to [`Dialect`].

use ddlforge_core::{Dialect, FieldKind, ReferentialAction};
use ddlforge_ir::Identity;
use sha2::{Digest, Sha256};

// ============================================================================
// Profile types
// ============================================================================

/// Where an index method keyword goes in `CREATE INDEX`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSyntax {
    /// `CREATE INDEX i ON t USING GIST (c)`
    Using,
    /// `CREATE INDEX i ON t (c) USING BTREE`
    Suffix,
    /// `CREATE FULLTEXT INDEX i ON t (c)`
    Prefix,
}

/// Default column types per field kind
#[derive(Debug)]
pub struct TypeTable {
    pub number: &'static str,
    pub string: &'static str,
    /// Sized string type name used when `len` is given; `None` ignores `len`
    pub sized_string: Option<&'static str>,
    pub time: &'static str,
    pub boolean: &'static str,
    pub json: &'static str,
    pub uuid: &'static str,
    pub binary: &'static str,
    pub array: &'static str,
}

/// Static description of one SQL dialect
#[derive(Debug)]
pub struct DialectProfile {
    pub dialect: Dialect,

    /// Opening and closing identifier quote
    pub quote: (char, char),

    pub types: TypeTable,

    /// Keyword emitted for `auto_increment`, if the dialect honours it
    pub auto_increment: Option<&'static str>,

    /// Whether `auto_increment` is only valid on a sole INTEGER primary key,
    /// which is then declared inline
    pub auto_increment_inline_pk: bool,

    /// Clauses emitted for `identity` / `alwaysidentity`, if honoured
    pub identity_by_default: Option<&'static str>,
    pub identity_always: Option<&'static str>,

    /// Boolean literal spelling
    pub true_literal: &'static str,
    pub false_literal: &'static str,

    /// Supported index methods (upper case) and their placement
    pub index_methods: &'static [(&'static str, MethodSyntax)],

    /// Whether `RESTRICT` is accepted as a referential action
    pub supports_restrict: bool,

    /// Whether `ALTER TABLE ... ADD CONSTRAINT` is available
    pub alter_add_constraint: bool,

    /// Whether `ON UPDATE CURRENT_TIMESTAMP` is available on columns
    pub on_update_current_timestamp: bool,

    /// Longest identifier the dialect accepts, in bytes
    pub max_identifier_len: Option<usize>,
}

// ============================================================================
// Profiles
// ============================================================================

static SQLITE: DialectProfile = DialectProfile {
    dialect: Dialect::Sqlite,
    quote: ('"', '"'),
    types: TypeTable {
        number: "INT",
        string: "TEXT",
        sized_string: None,
        time: "DATETIME",
        boolean: "BOOLEAN",
        json: "JSON",
        uuid: "UUID",
        binary: "BLOB",
        array: "JSON",
    },
    auto_increment: Some("AUTOINCREMENT"),
    auto_increment_inline_pk: true,
    identity_by_default: None,
    identity_always: None,
    true_literal: "TRUE",
    false_literal: "FALSE",
    index_methods: &[],
    supports_restrict: true,
    alter_add_constraint: false,
    on_update_current_timestamp: false,
    max_identifier_len: None,
};

static POSTGRES: DialectProfile = DialectProfile {
    dialect: Dialect::Postgres,
    quote: ('"', '"'),
    types: TypeTable {
        number: "INT",
        string: "TEXT",
        sized_string: Some("VARCHAR"),
        time: "TIMESTAMPTZ",
        boolean: "BOOLEAN",
        json: "JSONB",
        uuid: "UUID",
        binary: "BYTEA",
        array: "TEXT[]",
    },
    auto_increment: None,
    auto_increment_inline_pk: false,
    identity_by_default: Some("GENERATED BY DEFAULT AS IDENTITY"),
    identity_always: Some("GENERATED ALWAYS AS IDENTITY"),
    true_literal: "TRUE",
    false_literal: "FALSE",
    index_methods: &[
        ("BTREE", MethodSyntax::Using),
        ("HASH", MethodSyntax::Using),
        ("GIST", MethodSyntax::Using),
        ("SPGIST", MethodSyntax::Using),
        ("GIN", MethodSyntax::Using),
        ("BRIN", MethodSyntax::Using),
    ],
    supports_restrict: true,
    alter_add_constraint: true,
    on_update_current_timestamp: false,
    max_identifier_len: Some(63),
};

static MYSQL: DialectProfile = DialectProfile {
    dialect: Dialect::MySql,
    quote: ('`', '`'),
    types: TypeTable {
        number: "INT",
        string: "VARCHAR(255)",
        sized_string: Some("VARCHAR"),
        time: "DATETIME",
        boolean: "BOOLEAN",
        json: "JSON",
        uuid: "BINARY(16)",
        binary: "MEDIUMBLOB",
        array: "JSON",
    },
    auto_increment: Some("AUTO_INCREMENT"),
    auto_increment_inline_pk: false,
    identity_by_default: None,
    identity_always: None,
    true_literal: "TRUE",
    false_literal: "FALSE",
    index_methods: &[
        ("BTREE", MethodSyntax::Suffix),
        ("HASH", MethodSyntax::Suffix),
        ("FULLTEXT", MethodSyntax::Prefix),
        ("SPATIAL", MethodSyntax::Prefix),
    ],
    supports_restrict: true,
    alter_add_constraint: true,
    on_update_current_timestamp: true,
    max_identifier_len: Some(64),
};

static SQLSERVER: DialectProfile = DialectProfile {
    dialect: Dialect::SqlServer,
    quote: ('[', ']'),
    types: TypeTable {
        number: "INT",
        string: "NVARCHAR(255)",
        sized_string: Some("NVARCHAR"),
        time: "DATETIMEOFFSET",
        boolean: "BIT",
        json: "NVARCHAR(MAX)",
        uuid: "UNIQUEIDENTIFIER",
        binary: "VARBINARY(MAX)",
        array: "NVARCHAR(MAX)",
    },
    auto_increment: None,
    auto_increment_inline_pk: false,
    identity_by_default: Some("IDENTITY"),
    identity_always: Some("IDENTITY"),
    true_literal: "1",
    false_literal: "0",
    index_methods: &[
        ("CLUSTERED", MethodSyntax::Prefix),
        ("NONCLUSTERED", MethodSyntax::Prefix),
    ],
    supports_restrict: false,
    alter_add_constraint: true,
    on_update_current_timestamp: false,
    max_identifier_len: Some(128),
};

/// Words that are always quoted when used as identifiers
const RESERVED_WORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "ANY", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK", "COLUMN",
    "CONSTRAINT", "CREATE", "CROSS", "CURRENT_DATE", "CURRENT_TIME", "CURRENT_TIMESTAMP",
    "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXISTS", "FALSE", "FOR",
    "FOREIGN", "FROM", "FULL", "GRANT", "GROUP", "HAVING", "IN", "INDEX", "INNER", "INSERT",
    "INTO", "IS", "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR",
    "ORDER", "OUTER", "PRIMARY", "REFERENCES", "RIGHT", "SELECT", "SET", "TABLE", "THEN", "TO",
    "TRUE", "UNION", "UNIQUE", "UPDATE", "USER", "USING", "VALUES", "WHEN", "WHERE", "WITH",
];

// ============================================================================
// Lookups
// ============================================================================

impl DialectProfile {
    /// The profile for a dialect
    pub fn for_dialect(dialect: Dialect) -> &'static DialectProfile {
        match dialect {
            Dialect::Sqlite => &SQLITE,
            Dialect::Postgres => &POSTGRES,
            Dialect::MySql => &MYSQL,
            Dialect::SqlServer => &SQLSERVER,
        }
    }

    /// Default column type for a field kind, `None` for [`FieldKind::Any`]
    pub fn type_for(&self, kind: FieldKind, length: Option<u32>) -> Option<String> {
        let types = &self.types;
        let name = match kind {
            FieldKind::Number => types.number,
            FieldKind::String | FieldKind::Enum => {
                return Some(match (types.sized_string, length) {
                    (Some(sized), Some(n)) => format!("{}({})", sized, n),
                    _ => types.string.to_string(),
                });
            }
            FieldKind::Time => types.time,
            FieldKind::Boolean => types.boolean,
            FieldKind::Json => types.json,
            FieldKind::Uuid => types.uuid,
            FieldKind::Binary => types.binary,
            FieldKind::Array => types.array,
            FieldKind::Any => return None,
        };
        Some(name.to_string())
    }

    /// Generation clause for an identity flag, if honoured
    pub fn identity_clause(&self, identity: Identity) -> Option<&'static str> {
        match identity {
            Identity::ByDefault => self.identity_by_default,
            Identity::Always => self.identity_always,
        }
    }

    /// Look up an index method, case-insensitively
    pub fn index_method(&self, method: &str) -> Option<(&'static str, MethodSyntax)> {
        self.index_methods
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(method))
            .copied()
    }

    /// SQL spelling of a referential action
    pub fn action_sql(&self, action: ReferentialAction) -> &'static str {
        match action {
            ReferentialAction::Restrict if !self.supports_restrict => {
                ReferentialAction::NoAction.to_sql()
            }
            other => other.to_sql(),
        }
    }

    // ========================================================================
    // Rendering helpers
    // ========================================================================

    /// Shorten a derived constraint or index name to the identifier limit.
    ///
    /// Over-long names keep as much of their head as fits, followed by the
    /// first eight hex digits of the SHA-256 of the full name and the kind
    /// suffix. Names within the limit are returned unchanged.
    pub fn fit_identifier(&self, name: &str, suffix: &str) -> String {
        let Some(max) = self.max_identifier_len else {
            return name.to_string();
        };
        if name.len() <= max {
            return name.to_string();
        }

        let digest = Sha256::digest(name.as_bytes());
        let hash: String = digest[..4].iter().map(|b| format!("{:02x}", b)).collect();
        let tail = format!("_{}_{}", hash, suffix);
        let budget = max.saturating_sub(tail.len());

        let cut = name
            .char_indices()
            .map(|(i, c)| i + c.len_utf8())
            .take_while(|&end| end <= budget)
            .last()
            .unwrap_or(0);
        let mut fitted = name[..cut].trim_end_matches('_').to_string();
        fitted.push_str(&tail);
        fitted
    }

    /// Quote an identifier when it is not a plain identifier or is reserved
    pub fn quote_ident(&self, name: &str) -> String {
        if is_plain_identifier(name) && !is_reserved(name) {
            return name.to_string();
        }
        let (open, close) = self.quote;
        let mut quoted = String::with_capacity(name.len() + 2);
        quoted.push(open);
        for c in name.chars() {
            if c == close {
                quoted.push(close);
            }
            quoted.push(c);
        }
        quoted.push(close);
        quoted
    }

    /// Render a default value expression
    ///
    /// Literals and the `CURRENT_*` keywords stay verbatim, booleans use the
    /// dialect's spelling, anything else is parenthesized.
    pub fn render_default(&self, raw: &str) -> String {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("true") {
            return self.true_literal.to_string();
        }
        if value.eq_ignore_ascii_case("false") {
            return self.false_literal.to_string();
        }
        let keyword = ["NULL", "CURRENT_TIMESTAMP", "CURRENT_DATE", "CURRENT_TIME"]
            .iter()
            .any(|k| k.eq_ignore_ascii_case(value));
        if keyword || is_number_literal(value) || is_string_literal(value) {
            return value.to_string();
        }
        if is_parenthesized(value) {
            value.to_string()
        } else {
            format!("({})", value)
        }
    }
}

fn is_plain_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_reserved(name: &str) -> bool {
    RESERVED_WORDS.iter().any(|w| w.eq_ignore_ascii_case(name))
}

fn is_number_literal(value: &str) -> bool {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    !digits.is_empty()
        && digits.chars().any(|c| c.is_ascii_digit())
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1
}

fn is_string_literal(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'')
}

/// True when the whole value is wrapped by one matching pair of parentheses
fn is_parenthesized(value: &str) -> bool {
    if !(value.starts_with('(') && value.ends_with(')')) {
        return false;
    }
    let mut depth = 0i32;
    for (i, c) in value.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 && i != value.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

// ============================================================================
// Tests
// ============================================================================
