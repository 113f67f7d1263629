use std::io::Write;

use emu8_core::FrameBuffer;

use crate::{DisplayError, Renderer};

/// Moves the cursor to the top left so each frame overwrites the last
const CURSOR_HOME: &str = "\x1B[H";

/// Draws frames as text, one `*` per lit pixel, for terminals without a window.
pub struct TextDisplay<W: Write> {
    out: W,
}

impl<W: Write> TextDisplay<W> {
    pub fn new(mut out: W) -> Result<Self, DisplayError> {
        // clear once; later frames only overwrite
        write!(out, "\x1B[2J")?;
        Ok(TextDisplay { out })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// 32 lines of 64 characters
pub fn frame_to_text(frame: &FrameBuffer) -> String {
    let mut text = String::with_capacity((frame.width() + 1) * frame.height());
    for row in frame.rows() {
        text.extend(row.iter().map(|&lit| if lit { '*' } else { ' ' }));
        text.push('\n');
    }
    text
}

impl<W: Write> Renderer for TextDisplay<W> {
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError> {
        write!(self.out, "{}{}", CURSOR_HOME, frame_to_text(frame))?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_text() {
        let mut frame = FrameBuffer::new();
        frame.set(0, 0, true);
        frame.set(63, 31, true);
        let text = frame_to_text(&frame);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 32);
        assert!(lines.iter().all(|line| line.len() == 64));
        assert!(lines[0].starts_with("* "));
        assert!(lines[31].ends_with(" *"));
    }

    #[test]
    fn test_render_writes_home_then_frame() {
        let mut display = TextDisplay::new(Vec::new()).unwrap();
        display.render(&FrameBuffer::new()).unwrap();
        let out = String::from_utf8(display.into_inner()).unwrap();
        assert!(out.starts_with("\x1B[2J\x1B[H"));
        assert_eq!(out.matches('\n').count(), 32);
    }
}
