//! I/O helpers for consistent file/stdin/stdout handling

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read an export from a file path or stdin if path is None
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => {
            fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

/// Write text to a file path or stdout if path is None
pub fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(p) => fs::write(p, text).with_context(|| format!("Failed to write {}", p.display())),
        None => io::stdout()
            .write_all(text.as_bytes())
            .context("Failed to write to stdout"),
    }
}
