//! LilyPond rendering: score text in, MIDI bytes out.
//!
//! The engine runs in a scratch directory that is removed when the handle
//! drops, including on error paths. LilyPond derives the output name from
//! the input name, so the files are fixed as `music.ly` / `music.midi`.

use crate::error::RefrainError;
use std::fs;
use std::process::Command;

/// Turns formatted score text into a timed-note byte stream.
pub trait Renderer {
    fn render(&mut self, score: &str) -> Result<Vec<u8>, RefrainError>;
}

/// Renders through the external `lilypond` executable.
pub struct LilypondRenderer;

impl Renderer for LilypondRenderer {
    fn render(&mut self, score: &str) -> Result<Vec<u8>, RefrainError> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join("music.ly"), score)?;

        let output = Command::new("lilypond")
            .arg("music.ly")
            .current_dir(dir.path())
            .output()?;
        if !output.status.success() {
            return Err(RefrainError::RenderFailed {
                message: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(fs::read(dir.path().join("music.midi"))?)
    }
}
