//! The `fmt` command: print files in normalised form.
//!
//! Files with syntax errors are never formatted; their diagnostics are
//! reported instead. With `--check` nothing is printed except the names of
//! files whose formatting would change.

use luna_diagnostic::Diagnostic;
use luna_ir::StringInterner;
use luna_parse::ParseConfig;
use thiserror::Error;

use super::{display_path, read_input, report};
use crate::options::Options;

#[derive(Clone, Debug, Error)]
#[error("source has {} syntax error(s) and was not formatted", .diagnostics.len())]
pub struct FormatError {
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse and re-print `source`.
pub fn format_source(source: &str, config: &ParseConfig) -> Result<String, FormatError> {
    let interner = StringInterner::new();
    let result = luna_parse::parse(source, config, &interner);
    if result.has_errors() {
        return Err(FormatError {
            diagnostics: result.diagnostics(),
        });
    }
    Ok(luna_fmt::format_chunk(&result.chunk, &interner))
}

/// Format every path in `options` (stdin when there are none). Returns
/// `false` if any file failed to parse or, under `--check`, is not
/// formatted.
pub fn run_format(options: &Options) -> bool {
    let stdin = ["-".to_owned()];
    let paths = if options.paths.is_empty() {
        &stdin[..]
    } else {
        &options.paths[..]
    };
    let mut ok = true;
    for path in paths {
        let content = read_input(path);
        match format_source(&content, &options.config) {
            Ok(formatted) if options.check => {
                if formatted != content {
                    println!("would reformat: {}", display_path(path));
                    ok = false;
                }
            }
            Ok(formatted) => print!("{formatted}"),
            Err(error) => {
                tracing::debug!(path, %error, "skipping file");
                report(path, &content, error.diagnostics, options);
                ok = false;
            }
        }
    }
    ok
}
