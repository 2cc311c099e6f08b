//! Playback: MIDI bytes piped to an external player's stdin.

use crate::error::RefrainError;
use std::io::Write;
use std::process::{Command, Stdio};

/// Consumes a rendered MIDI byte stream. No output is captured.
pub trait Player {
    fn play(&mut self, data: &[u8]) -> Result<(), RefrainError>;
}

/// Plays through the external `timidity` executable reading stdin.
pub struct TimidityPlayer;

impl Player for TimidityPlayer {
    fn play(&mut self, data: &[u8]) -> Result<(), RefrainError> {
        let mut child = Command::new("timidity")
            .arg("-")
            .stdin(Stdio::piped())
            .spawn()?;

        // Dropping the handle closes the pipe so the player sees EOF. The
        // child is always waited on, even when the write fails first.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(data),
            None => Ok(()),
        };
        let status = child.wait()?;
        written?;

        if status.success() {
            Ok(())
        } else {
            Err(RefrainError::PlayerFailed {
                message: format!("exit status {}", status),
            })
        }
    }
}
