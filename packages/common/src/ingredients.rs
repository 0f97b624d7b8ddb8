//! Parsing of ingredient catalog files for bulk import.

use std::collections::HashSet;

use serde::Deserialize;

/// A single catalog entry, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRecord {
    pub name: String,
    pub measurement_unit: String,
}

/// Result of parsing a catalog file.
#[derive(Debug, Default)]
pub struct ParsedCatalog {
    pub records: Vec<IngredientRecord>,
    /// Entries dropped for a blank field or a case-insensitive duplicate.
    pub skipped: usize,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    measurement_unit: Option<String>,
}

/// Parse a JSON array of `{"name": ..., "measurement_unit": ...}` objects.
pub fn parse_json(input: &str) -> Result<ParsedCatalog, serde_json::Error> {
    let raw: Vec<RawEntry> = serde_json::from_str(input)?;

    let mut seen = HashSet::new();
    let mut catalog = ParsedCatalog::default();

    for entry in raw {
        let name = entry.name.as_deref().unwrap_or("").trim().to_string();
        let unit = entry
            .measurement_unit
            .as_deref()
            .unwrap_or("")
            .trim()
            .to_string();

        if name.is_empty() || unit.is_empty() {
            catalog.skipped += 1;
            continue;
        }
        if !seen.insert((name.to_lowercase(), unit.to_lowercase())) {
            catalog.skipped += 1;
            continue;
        }

        catalog.records.push(IngredientRecord {
            name,
            measurement_unit: unit,
        });
    }

    Ok(catalog)
}
