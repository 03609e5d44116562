use std::io::Write;

use anyhow::{Context, Result};
use wanderlands_rendering::{RenderingBackend, Scene};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Writes text frames to a terminal or any other byte sink.
#[derive(Debug)]
pub(crate) struct TerminalBackend<W> {
    out: W,
    ansi: bool,
    clear: bool,
}

impl<W> TerminalBackend<W>
where
    W: Write,
{
    /// Creates a backend. `ansi` colors glyphs, `clear` redraws in place.
    pub(crate) fn new(out: W, ansi: bool, clear: bool) -> Self {
        Self { out, ansi, clear }
    }
}

impl<W> RenderingBackend for TerminalBackend<W>
where
    W: Write,
{
    fn present(&mut self, scene: &Scene) -> Result<()> {
        if self.clear {
            self.out
                .write_all(CLEAR_SCREEN.as_bytes())
                .context("failed to clear terminal")?;
        }
        writeln!(self.out, "{}", scene.render_text(self.ansi)).context("failed to write frame")?;
        self.out.flush().context("failed to flush frame")
    }
}
