pub mod error;
pub mod fraction;
pub mod generator;
pub mod params;
pub mod pitch;
pub mod player;
pub mod render;
pub mod score;
pub mod sync;

pub use error::RefrainError;
pub use generator::Generator;
pub use params::ParameterSet;
pub use player::{Player, TimidityPlayer};
pub use render::{LilypondRenderer, Renderer};
pub use score::format_score;

/// Turn a phrase file into a formatted LilyPond score.
/// This is the main entry point for the library.
pub fn generate_score(source: &str) -> Result<String, RefrainError> {
    let params = ParameterSet::parse(source)?;
    format_score(&params)
}
