//! Identifier checks for table and column names.
//!
//! Values are always bound as parameters, but table and column names have to
//! be spliced into the statement text. Names are accepted only when every
//! dot-separated part is a plain SQL identifier, so nothing a caller passes
//! as a name can change the shape of the statement.

use super::ShapeError;

/// Check a single identifier part: `[A-Za-z_][A-Za-z0-9_$]*`.
fn is_plain_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Validate a table name, optionally schema-qualified (`schema.table`).
pub fn table_name(name: &str) -> Result<&str, ShapeError> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() <= 2 && parts.iter().all(|p| is_plain_identifier(p)) {
        Ok(name)
    } else {
        Err(ShapeError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// Validate a column name used in a predicate, assignment or aggregate.
///
/// Accepts `column`, `table.column` and `schema.table.column`.
pub fn column_name(name: &str) -> Result<&str, ShapeError> {
    let parts: Vec<&str> = name.split('.').collect();
    if parts.len() <= 3 && parts.iter().all(|p| is_plain_identifier(p)) {
        Ok(name)
    } else {
        Err(ShapeError::InvalidIdentifier {
            name: name.to_string(),
        })
    }
}

/// Validate an entry of a select list.
///
/// Same as [`column_name`], plus the wildcard forms `*` and `table.*`.
pub fn select_column(name: &str) -> Result<&str, ShapeError> {
    if name == "*" {
        return Ok(name);
    }
    if let Some(prefix) = name.strip_suffix(".*") {
        return table_name(prefix).map(|_| name).map_err(|_| ShapeError::InvalidIdentifier {
            name: name.to_string(),
        });
    }
    column_name(name)
}

/// Validate every name in `names` with `check` and join them with `", "`.
pub fn join_checked<'a>(
    names: &[&'a str],
    check: fn(&'a str) -> Result<&'a str, ShapeError>,
) -> Result<String, ShapeError> {
    let checked = names
        .iter()
        .map(|n| check(*n))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(checked.join(", "))
}
