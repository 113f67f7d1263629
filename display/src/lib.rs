pub use audio::{Beeper, Mute, Sound};
pub use display::Display;
pub use error::DisplayError;
pub use text::TextDisplay;

use emu8_core::FrameBuffer;

mod audio;
mod display;
mod error;
mod text;

/// Something that can show a Chip-8 FrameBuffer.
///
/// The interpreter never reads anything back, so a renderer only needs to
/// take frames.
pub trait Renderer {
    fn render(&mut self, frame: &FrameBuffer) -> Result<(), DisplayError>;
}
