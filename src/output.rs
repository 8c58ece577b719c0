//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.
//!
//! ```text
//! photo.jpg → photo-small.jpg
//!     Format: jpg
//!     Size: 720x162 → 360x81
//! ```

use crate::imaging::{Dimensions, ImageKind};
use crate::resizer::ResizeOutcome;
use std::path::Path;

fn size(dims: Dimensions) -> String {
    format!("{}x{}", dims.width, dims.height)
}

pub fn format_resize_output(
    input: &Path,
    output: &Path,
    kind: ImageKind,
    outcome: &ResizeOutcome,
) -> Vec<String> {
    vec![
        format!("{} → {}", input.display(), output.display()),
        format!("    Format: {kind}"),
        format!("    Size: {} → {}", size(outcome.source), size(outcome.target)),
    ]
}

pub fn print_resize_output(input: &Path, output: &Path, kind: ImageKind, outcome: &ResizeOutcome) {
    for line in format_resize_output(input, output, kind, outcome) {
        println!("{}", line);
    }
}

pub fn format_info_output(input: &Path, kind: Option<ImageKind>, dims: Dimensions) -> Vec<String> {
    let format = kind.map_or_else(|| "unsupported".to_string(), |k| k.to_string());
    vec![
        input.display().to_string(),
        format!("    Format: {format}"),
        format!("    Size: {}", size(dims)),
    ]
}

pub fn print_info_output(input: &Path, kind: Option<ImageKind>, dims: Dimensions) {
    for line in format_info_output(input, kind, dims) {
        println!("{}", line);
    }
}
