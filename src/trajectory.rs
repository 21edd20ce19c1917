//! Plain-text trajectory files: one value per line, `#` starts a comment.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result, bail};

/// Parses whitespace-separated values, ignoring `#` comments.
pub fn parse_trajectory(text: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("");
        for token in content.split_whitespace() {
            let x: f64 = token
                .parse()
                .with_context(|| format!("line {}: invalid number {token:?}", lineno + 1))?;
            if !x.is_finite() {
                bail!("line {}: non-finite value {token:?}", lineno + 1);
            }
            values.push(x);
        }
    }
    Ok(values)
}

/// Reads a trajectory file.
pub fn read_trajectory(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read trajectory: {}", path.display()))?;
    parse_trajectory(&text).with_context(|| format!("failed to parse trajectory: {}", path.display()))
}

/// Writes a trajectory, one value per line at full precision.
pub fn write_trajectory(path: &Path, traj: &[f64]) -> Result<()> {
    let mut out = String::with_capacity(traj.len() * 24);
    for x in traj {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{x:e}");
    }
    std::fs::write(path, out)
        .with_context(|| format!("failed to write trajectory: {}", path.display()))
}
