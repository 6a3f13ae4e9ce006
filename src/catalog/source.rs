use std::fs;
use std::path::{Path, PathBuf};

use rust_embed::Embed;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::catalog::{Catalog, Diagnostic, RawEntry, SkipReason};

pub const BUNDLED_CATALOG: &str = "golems.toml";

#[derive(Embed)]
#[folder = "assets/catalog/"]
struct CatalogAssets;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML in catalog {origin}: {source}")]
    Toml {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid JSON in catalog {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog {origin} has no `entries` list")]
    Shape { origin: String },
    #[error("bundled catalog {0} is missing")]
    MissingBundled(String),
}

/// A built catalog together with the records that were skipped on the way.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadedCatalog {
    fn from_decoded(decoded: Vec<(usize, Result<RawEntry, String>)>) -> Self {
        let mut diagnostics = Vec::new();
        let mut raws = Vec::with_capacity(decoded.len());
        for (position, result) in decoded {
            match result {
                Ok(raw) => raws.push((position, raw)),
                Err(msg) => diagnostics.push(Diagnostic {
                    position,
                    reason: SkipReason::Malformed(msg),
                }),
            }
        }
        for diag in &diagnostics {
            tracing::warn!(position = diag.position, "skipping catalog entry: {diag}");
        }
        let (catalog, mut build_diagnostics) = Catalog::from_positioned(raws);
        diagnostics.append(&mut build_diagnostics);
        diagnostics.sort_by_key(|d| d.position);
        Self {
            catalog,
            diagnostics,
        }
    }
}

pub fn load_bundled() -> Result<LoadedCatalog, CatalogError> {
    let file = CatalogAssets::get(BUNDLED_CATALOG)
        .ok_or_else(|| CatalogError::MissingBundled(BUNDLED_CATALOG.to_string()))?;
    let content = String::from_utf8_lossy(file.data.as_ref());
    parse_toml(&content, &format!("<bundled {BUNDLED_CATALOG}>"))
}

/// Load a catalog file. `.json` files are read as JSON, everything else as TOML.
pub fn load_file(path: &Path) -> Result<LoadedCatalog, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let origin = path.display().to_string();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_json(&content, &origin)
    } else {
        parse_toml(&content, &origin)
    }
}

/// Parse `[[entries]]` tables. Each table is decoded on its own so a bad
/// record only costs that record.
pub fn parse_toml(content: &str, origin: &str) -> Result<LoadedCatalog, CatalogError> {
    let table: toml::Table = toml::from_str(content).map_err(|source| CatalogError::Toml {
        origin: origin.to_string(),
        source,
    })?;
    let values = match table.get("entries") {
        Some(toml::Value::Array(values)) => values.clone(),
        None => Vec::new(),
        Some(_) => {
            return Err(CatalogError::Shape {
                origin: origin.to_string(),
            });
        }
    };
    let decoded = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| (i, decode(from_toml_value(value))))
        .collect();
    Ok(LoadedCatalog::from_decoded(decoded))
}

/// Parse either `{"entries": [...]}` or a bare top-level array.
pub fn parse_json(content: &str, origin: &str) -> Result<LoadedCatalog, CatalogError> {
    let root: serde_json::Value =
        serde_json::from_str(content).map_err(|source| CatalogError::Json {
            origin: origin.to_string(),
            source,
        })?;
    let values = match root {
        serde_json::Value::Array(values) => values,
        serde_json::Value::Object(mut map) => match map.remove("entries") {
            Some(serde_json::Value::Array(values)) => values,
            None => Vec::new(),
            Some(_) => {
                return Err(CatalogError::Shape {
                    origin: origin.to_string(),
                });
            }
        },
        _ => {
            return Err(CatalogError::Shape {
                origin: origin.to_string(),
            });
        }
    };
    let decoded = values
        .into_iter()
        .enumerate()
        .map(|(i, value)| (i, decode(from_json_value(value))))
        .collect();
    Ok(LoadedCatalog::from_decoded(decoded))
}

fn from_toml_value<T: DeserializeOwned>(value: toml::Value) -> Result<T, toml::de::Error> {
    value.try_into()
}

fn from_json_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(value)
}

fn decode<E: std::fmt::Display>(result: Result<RawEntry, E>) -> Result<RawEntry, String> {
    result.map_err(|e| e.to_string().trim().to_string())
}
