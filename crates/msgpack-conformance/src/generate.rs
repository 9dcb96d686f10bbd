//! Verify-then-write fixture generation.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::GeneratorConfig;
use crate::corpus::Case;
use crate::error::ConformanceError;
use crate::harness::{Harness, Report};

/// Verifies `cases` and, when every case passes, writes them to
/// `config.output` in `config.format`.
///
/// Nothing is written when verification fails.
pub fn generate(config: &GeneratorConfig, cases: &[Case]) -> Result<Report, ConformanceError> {
    let report = Harness::new()
        .fail_fast(config.fail_fast)
        .verify_corpus(cases);
    if !report.is_success() {
        return Err(ConformanceError::Verification(report));
    }

    let header = match &config.header {
        Some(path) => read(path)?,
        None => String::new(),
    };
    let text = config.format.render(&header, cases)?;

    let output = config.output.as_path();
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
    }
    fs::write(output, &text).map_err(|source| io_error(output, source))?;
    debug!(bytes = text.len(), "fixture written");
    info!(
        path = %output.display(),
        format = ?config.format,
        cases = cases.len(),
        "wrote fixtures"
    );
    Ok(report)
}

fn read(path: &Path) -> Result<String, ConformanceError> {
    fs::read_to_string(path).map_err(|source| io_error(path, source))
}

fn io_error(path: &Path, source: std::io::Error) -> ConformanceError {
    ConformanceError::Io {
        path: path.to_path_buf(),
        source,
    }
}
