//! # CLI Command Implementations
//!
//! Each command returns its rendered output; `execute` prints it.

use crate::api::{self, MseRequest};
use crate::config::ServerConfig;
use serde::{Serialize, de::DeserializeOwned};
use std::path::{Path, PathBuf};
use tally_core::{
    AverageMethod, CartItem, ItemId, TallyError, User, average_with, count_weighted,
    mean_squared_error,
    primitives::{MAX_INPUT_FILE_SIZE, check_cart, check_sequence_length},
    remove_by_id,
};

// =============================================================================
// INPUT HELPERS
// =============================================================================

/// Validate an input path: it must resolve to an existing regular file no
/// larger than [`MAX_INPUT_FILE_SIZE`].
fn validate_file_path(path: &Path) -> Result<PathBuf, TallyError> {
    let canonical = path.canonicalize().map_err(|e| {
        TallyError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(TallyError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| TallyError::Io(format!("Cannot read file metadata: {}", e)))?;
    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(TallyError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_INPUT_FILE_SIZE
        )));
    }

    Ok(canonical)
}

/// Validate an output path: its parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, TallyError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        TallyError::Io(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(TallyError::Io(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| TallyError::Io("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Read and deserialize a JSON input file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, TallyError> {
    let canonical = validate_file_path(path)?;
    let text = std::fs::read_to_string(&canonical)
        .map_err(|e| TallyError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
    tracing::debug!(path = %canonical.display(), bytes = text.len(), "input file read");

    serde_json::from_str(&text).map_err(|e| {
        TallyError::Serialization(format!("Invalid JSON in '{}': {}", path.display(), e))
    })
}

/// Parse a comma-separated list of numbers. Blank entries are skipped.
pub fn parse_values(text: &str) -> Result<Vec<f64>, TallyError> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| TallyError::InvalidArgument(format!("'{}' is not a number", s)))
        })
        .collect()
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, TallyError> {
    serde_json::to_string_pretty(value).map_err(|e| TallyError::Serialization(e.to_string()))
}

fn read_cart(path: &Path) -> Result<Vec<CartItem>, TallyError> {
    let items: Vec<CartItem> = read_json_file(path)?;
    check_cart(&items)?;
    Ok(items)
}

// =============================================================================
// AVERAGE COMMAND
// =============================================================================

/// Mean of inline `values` or of the JSON array in `file`.
pub fn cmd_average(
    values: Option<&str>,
    file: Option<&Path>,
    method: AverageMethod,
    json_mode: bool,
) -> Result<String, TallyError> {
    let numbers = match (values, file) {
        (Some(text), _) => parse_values(text)?,
        (None, Some(path)) => read_json_file::<Vec<f64>>(path)?,
        (None, None) => {
            return Err(TallyError::InvalidArgument(
                "provide --values or --file".to_string(),
            ));
        }
    };
    check_sequence_length(numbers.len(), "values")?;

    let mean = average_with(method, &numbers)?;
    tracing::debug!(count = numbers.len(), method = %method, "average computed");

    if json_mode {
        return to_pretty_json(&serde_json::json!({
            "count": numbers.len(),
            "method": method,
            "average": mean,
        }));
    }
    Ok(format!("Average ({} values, {}): {}", numbers.len(), method, mean))
}

// =============================================================================
// COUNT COMMAND
// =============================================================================

/// Weighted count of the cart in `file`.
pub fn cmd_count(file: &Path, json_mode: bool) -> Result<String, TallyError> {
    let items = read_cart(file)?;
    let total = count_weighted(&items);

    if json_mode {
        return to_pretty_json(&serde_json::json!({
            "items": items.len(),
            "total": total,
        }));
    }
    Ok(format!("Total quantity ({} items): {}", items.len(), total))
}

// =============================================================================
// REMOVE COMMAND
// =============================================================================

/// Remove items carrying `id` from the cart in `file`.
///
/// The input file is never modified. The remaining cart goes to `output`
/// if given, otherwise it is returned as JSON.
pub fn cmd_remove(
    file: &Path,
    id: u64,
    output: Option<&Path>,
    json_mode: bool,
) -> Result<String, TallyError> {
    let items = read_cart(file)?;
    let remaining = remove_by_id(&items, &ItemId(id));
    let removed = items.len() - remaining.len();
    if removed == 0 {
        tracing::info!(id, "no cart item carries this id");
    }

    let rendered = to_pretty_json(&remaining)?;

    let Some(output) = output else {
        return Ok(rendered);
    };

    let target = validate_output_path(output)?;
    std::fs::write(&target, &rendered)
        .map_err(|e| TallyError::Io(format!("Cannot write '{}': {}", output.display(), e)))?;
    tracing::info!(path = %target.display(), removed, "cart written");

    if json_mode {
        return to_pretty_json(&serde_json::json!({
            "removed": removed,
            "remaining": remaining.len(),
            "output": target.to_string_lossy(),
        }));
    }
    Ok(format!(
        "Removed {} item(s), {} remaining, written to {}",
        removed,
        remaining.len(),
        target.display()
    ))
}

// =============================================================================
// MSE COMMAND
// =============================================================================

/// Mean squared error of inline sequences or of a paired JSON file.
pub fn cmd_mse(
    actual: Option<&str>,
    predicted: Option<&str>,
    file: Option<&Path>,
    json_mode: bool,
) -> Result<String, TallyError> {
    let request = match (actual, predicted, file) {
        (Some(a), Some(p), _) => MseRequest {
            actual: parse_values(a)?,
            predicted: parse_values(p)?,
        },
        (None, None, Some(path)) => read_json_file::<MseRequest>(path)?,
        _ => {
            return Err(TallyError::InvalidArgument(
                "provide --actual with --predicted, or --file".to_string(),
            ));
        }
    };
    request.validate()?;

    let mse = mean_squared_error(&request.actual, &request.predicted)?;

    if json_mode {
        return to_pretty_json(&serde_json::json!({
            "pairs": request.actual.len(),
            "mse": mse,
        }));
    }
    Ok(format!("MSE ({} pairs): {}", request.actual.len(), mse))
}

// =============================================================================
// USER COMMAND
// =============================================================================

/// Build a trimmed user record. Blank or overlong names are rejected.
pub fn cmd_user(first: &str, last: &str, json_mode: bool) -> Result<String, TallyError> {
    let user = User::validated(first, last)?;

    if json_mode {
        return to_pretty_json(&user);
    }
    Ok(format!(
        "User: {}\n  first_name: {}\n  last_name:  {}",
        user.full_name(),
        user.first_name,
        user.last_name
    ))
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Print the startup banner.
fn print_banner(config: &ServerConfig) {
    println!("Tally Aggregation Server v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Configuration:");
    println!("  Host:       {}", config.host);
    println!("  Port:       {}", config.port);
    println!("  Rate limit: {} req/s", config.rate_limit);
    println!(
        "  Auth:       {}",
        if config.api_key().is_some() { "bearer key" } else { "disabled" }
    );
    println!();
    println!("Endpoints:");
    println!("  GET  /health      - Health check");
    println!("  POST /average     - Mean of values");
    println!("  POST /mse         - Mean squared error");
    println!("  POST /cart/count  - Weighted count");
    println!("  POST /cart/remove - Remove items by id");
    println!("  POST /user        - Normalised user record");
    println!();
    println!("Press Ctrl+C to stop");
    println!();
}

/// Start the HTTP server.
pub async fn cmd_server(config: ServerConfig, quiet: bool) -> Result<(), TallyError> {
    if !quiet {
        print_banner(&config);
    }
    api::run_server(config).await
}

// =============================================================================
// TESTS
// =============================================================================
