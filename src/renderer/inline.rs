//! Line renderers.
//!
//! The InlineRenderer repaints the frame in place: it moves the cursor
//! back over the previously painted lines and rewrites only the lines
//! that changed. This keeps terminal I/O small and updates flicker-free.
//!
//! The AppendRenderer never moves the cursor - each frame is appended to
//! the scrollback, console.log style, which suits teaching/demo output.

use std::io;

use crate::pipeline::view_derived::{ViewLine, ViewResult};
use super::ansi;
use super::output::OutputBuffer;

/// Write one styled line (without line movement).
fn write_line(output: &mut OutputBuffer, line: &ViewLine) {
    let styled = !line.attrs.is_empty() || !line.fg.is_terminal_default();
    ansi::sgr_attrs(output, line.attrs);
    ansi::sgr_fg(output, line.fg);
    output.push_str(&line.text);
    if styled {
        ansi::sgr_reset(output);
    }
}

// =============================================================================
// Inline Renderer
// =============================================================================

/// Differential line renderer for inline mode.
///
/// Keeps the previous frame's lines to enable diff-based rendering.
/// Only lines that changed since the last frame are rewritten.
pub struct InlineRenderer {
    output: OutputBuffer,
    previous: Option<Vec<ViewLine>>,
    last_height: u16,
    cursor_hidden: bool,
}

impl InlineRenderer {
    /// Create a new inline renderer.
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            previous: None,
            last_height: 0,
            cursor_hidden: false,
        }
    }

    /// Hide the cursor for the duration of the session.
    pub fn begin(&mut self) -> io::Result<()> {
        ansi::cursor_hide(&mut self.output);
        self.cursor_hidden = true;
        self.output.flush_stdout()
    }

    /// Show the cursor again.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.cursor_hidden {
            ansi::cursor_show(&mut self.output);
            self.cursor_hidden = false;
            self.output.flush_stdout()?;
        }
        Ok(())
    }

    /// Render a frame, rewriting only changed lines.
    ///
    /// Returns true if any lines changed.
    pub fn render(&mut self, result: &ViewResult) -> io::Result<bool> {
        let has_changes = self.paint(result);
        self.output.flush_stdout()?;
        Ok(has_changes)
    }

    /// Invalidate the previous frame.
    ///
    /// The next render rewrites every line.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Check if there is a previous frame to diff against.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Fill the output buffer with the next frame (no flush).
    fn paint(&mut self, result: &ViewResult) -> bool {
        let new_lines = &result.lines;
        let old_height = self.last_height as usize;

        // Move back to the top of the previously painted frame
        ansi::cursor_up(&mut self.output, self.last_height);

        let mut has_changes = false;
        let rows = new_lines.len().max(old_height);

        for i in 0..rows {
            self.output.push('\r');
            match new_lines.get(i) {
                Some(line) => {
                    let changed = match &self.previous {
                        Some(previous) => previous.get(i) != Some(line),
                        None => true,
                    };
                    if changed {
                        has_changes = true;
                        ansi::clear_line(&mut self.output);
                        write_line(&mut self.output, line);
                    }
                }
                None => {
                    // Frame shrank - blank the leftover row
                    has_changes = true;
                    ansi::clear_line(&mut self.output);
                }
            }
            // A real newline: scrolls when painting past the bottom,
            // plain movement otherwise
            self.output.push('\n');
        }

        // Park the cursor directly under the new frame
        if rows > new_lines.len() {
            ansi::cursor_up(&mut self.output, (rows - new_lines.len()) as u16);
        }

        self.previous = Some(new_lines.clone());
        self.last_height = new_lines.len() as u16;

        has_changes
    }
}

impl Default for InlineRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InlineRenderer {
    fn drop(&mut self) {
        // Restore the cursor (best effort)
        let _ = self.finish();
    }
}

// =============================================================================
// Append Renderer
// =============================================================================

/// Appending renderer - each frame lands below the previous one.
pub struct AppendRenderer {
    output: OutputBuffer,
}

impl AppendRenderer {
    /// Create a new append renderer.
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
        }
    }

    /// Append a frame to the scrollback.
    ///
    /// Empty frames write nothing. Returns true if anything was written.
    pub fn render(&mut self, result: &ViewResult) -> io::Result<bool> {
        if result.lines.is_empty() {
            return Ok(false);
        }

        for line in &result.lines {
            write_line(&mut self.output, line);
            self.output.push('\n');
        }
        // Blank separator between frames
        self.output.push('\n');

        self.output.flush_stdout()?;
        Ok(true)
    }
}

impl Default for AppendRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Attr, Rgba};

    fn frame(texts: &[&str]) -> ViewResult {
        ViewResult {
            lines: texts.iter().map(|text| ViewLine::plain(*text)).collect(),
            terminal_width: 80,
        }
    }

    #[test]
    fn test_first_paint_writes_everything() {
        let mut renderer = InlineRenderer::new();
        assert!(!renderer.has_previous());

        let changed = renderer.paint(&frame(&["Count: 0", "  double: 0"]));
        assert!(changed);
        assert!(renderer.has_previous());

        let painted = renderer.output.as_str();
        assert!(painted.contains("Count: 0"));
        assert!(painted.contains("  double: 0"));
        // No previous frame - no cursor-up prefix
        assert!(!painted.starts_with("\x1b["));
    }

    #[test]
    fn test_unchanged_frame_rewrites_nothing() {
        let mut renderer = InlineRenderer::new();
        renderer.paint(&frame(&["Count: 0"]));
        renderer.output.clear();

        let changed = renderer.paint(&frame(&["Count: 0"]));
        assert!(!changed);
        assert!(!renderer.output.as_str().contains("Count: 0"));
    }

    #[test]
    fn test_changed_line_is_rewritten() {
        let mut renderer = InlineRenderer::new();
        renderer.paint(&frame(&["Count: 0", "  double: 0"]));
        renderer.output.clear();

        let changed = renderer.paint(&frame(&["Count: 1", "  double: 2"]));
        assert!(changed);

        let painted = renderer.output.as_str();
        // Moves up over the old frame, then rewrites
        assert!(painted.starts_with("\x1b[2A"));
        assert!(painted.contains("Count: 1"));
    }

    #[test]
    fn test_partial_change_skips_stable_lines() {
        let mut renderer = InlineRenderer::new();
        renderer.paint(&frame(&["Count: 0", "help"]));
        renderer.output.clear();

        renderer.paint(&frame(&["Count: 1", "help"]));

        let painted = renderer.output.as_str();
        assert!(painted.contains("Count: 1"));
        assert!(!painted.contains("help"));
    }

    #[test]
    fn test_shrinking_frame_blanks_leftover_rows() {
        let mut renderer = InlineRenderer::new();
        renderer.paint(&frame(&["a", "b", "c"]));
        renderer.output.clear();

        let changed = renderer.paint(&frame(&["a"]));
        assert!(changed);

        // Two leftover rows cleared, cursor parked back under the frame
        let painted = renderer.output.as_str();
        assert!(painted.ends_with("\x1b[2A"));
    }

    #[test]
    fn test_invalidate_forces_full_rewrite() {
        let mut renderer = InlineRenderer::new();
        renderer.paint(&frame(&["Count: 0"]));
        renderer.output.clear();

        renderer.invalidate();
        let changed = renderer.paint(&frame(&["Count: 0"]));
        assert!(changed);
        assert!(renderer.output.as_str().contains("Count: 0"));
    }

    #[test]
    fn test_styled_line_wraps_in_sgr() {
        let mut renderer = InlineRenderer::new();
        renderer.paint(&ViewResult {
            lines: vec![ViewLine {
                text: "Count: 0".to_string(),
                attrs: Attr::BOLD,
                fg: Rgba::TERMINAL_DEFAULT,
            }],
            terminal_width: 80,
        });

        let painted = renderer.output.as_str();
        assert!(painted.contains("\x1b[1mCount: 0\x1b[0m"));
    }

    #[test]
    fn test_append_renderer_skips_empty_frames() {
        let mut renderer = AppendRenderer::new();
        let written = renderer.render(&frame(&[])).unwrap();
        assert!(!written);
    }
}
