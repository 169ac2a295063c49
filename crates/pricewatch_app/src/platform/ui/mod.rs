//! Terminal presentation: the status banner, refresh prompt and typed commands.
pub mod input;
pub mod render;

use std::io::{self, Write};

/// Write lines to stdout as one block.
pub fn present(lines: &[String]) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
    let _ = out.flush();
}
