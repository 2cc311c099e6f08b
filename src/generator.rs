//! # Generator
//!
//! Owns one parameter set plus the renderer and player collaborators, and
//! memoizes the two expensive products: the formatted score text and the
//! rendered MIDI bytes.
//!
//! Each cache is an explicit `Option` slot populated on first access behind
//! an `is_none` check and invalidated only by [`Generator::feed`]. Repeated
//! accessor calls return the cached value without touching the renderer
//! again. Single-threaded use is assumed throughout.

use crate::error::RefrainError;
use crate::params::ParameterSet;
use crate::player::Player;
use crate::render::Renderer;
use crate::score;

pub struct Generator<R: Renderer, P: Player> {
    renderer: R,
    player: P,
    params: Option<ParameterSet>,
    formatted: Option<String>,
    generated: Option<Vec<u8>>,
}

impl<R: Renderer, P: Player> Generator<R, P> {
    pub fn new(renderer: R, player: P) -> Self {
        Generator {
            renderer,
            player,
            params: None,
            formatted: None,
            generated: None,
        }
    }

    /// Load a phrase file, replacing any previous parameters and clearing
    /// both memoized results.
    pub fn feed(&mut self, source: &str) -> Result<(), RefrainError> {
        self.params = Some(ParameterSet::parse(source)?);
        self.formatted = None;
        self.generated = None;
        Ok(())
    }

    /// The formatted LilyPond score, computed on first access.
    pub fn formatted(&mut self) -> Result<&str, RefrainError> {
        if self.formatted.is_none() {
            let params = self.params.as_ref().ok_or(RefrainError::NoParameters)?;
            self.formatted = Some(score::format_score(params)?);
        }
        Ok(self.formatted.as_deref().unwrap_or_default())
    }

    /// The rendered MIDI byte stream, computed on first access.
    pub fn generated(&mut self) -> Result<&[u8], RefrainError> {
        self.ensure_generated()?;
        Ok(self.generated.as_deref().unwrap_or_default())
    }

    /// Force generation and hand the bytes to the player.
    pub fn play(&mut self) -> Result<(), RefrainError> {
        self.ensure_generated()?;
        let data = self.generated.as_deref().unwrap_or_default();
        self.player.play(data)
    }

    fn ensure_generated(&mut self) -> Result<(), RefrainError> {
        if self.generated.is_some() {
            return Ok(());
        }
        let text = self.formatted()?.to_owned();
        self.generated = Some(self.renderer.render(&text)?);
        Ok(())
    }
}
