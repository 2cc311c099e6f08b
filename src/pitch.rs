//! # Pitch/Accidental Mapper
//!
//! This module turns melodic scale degrees into concrete LilyPond pitch
//! tokens under a moving harmonic context.
//!
//! ## Scale model
//! A fixed table of pitch names spans two diatonic octaves upward from c',
//! bracketed by two fixed alterations: `gis'` sits at the front of the
//! table and `fis'` at the back (a harmonic context may address it as
//! offset -1, which wraps to the back of the table).
//!
//! Each harmonic-context value selects an offset triple into that table,
//! one offset per mod-3 residue class of the melodic degree. Degrees past
//! the third chord tone shift up a seven-step octave class.
//!
//! ## Harmonic cursor
//! Which context is active depends on how much duration the melody has
//! consumed so far: a beat cursor accumulates each step's weight and walks
//! the (expanded) segment-duration sequence, wrapping modulo its length.
//! The cursor is created fresh for each generation pass and threaded
//! through the steps strictly in order; step `i+1`'s context depends on the
//! exact cumulative duration of every step before it.

use crate::error::RefrainError;
use crate::fraction;

/// Two diatonic octaves with the two fixed alterations at the edges.
const PITCH_TABLE: [&str; 16] = [
    "gis'", "c'", "d'", "e'", "f'", "g'", "a'", "b'", "c''", "d''", "e''", "f''", "g''", "a''",
    "b''", "fis'",
];

/// Offset triple into [`PITCH_TABLE`] for one harmonic-context value.
///
/// - `0` is the tonic-major context.
/// - `-1` is the leading-tone/diminished context (its first offset wraps to
///   the back of the table).
/// - Any other value needs the key-context marker `xdd`: degrees below 2
///   that differ from the marker shift up an octave class first, then the
///   plain third-stacked progression applies. A degree equal to the marker
///   instead substitutes a reordered, octave-shifted triple (diminished
///   seventh spelling; pending musical review, do not "fix").
fn degree_offsets(n: i64, key_marker: Option<i64>) -> Result<[i64; 3], RefrainError> {
    if n == 0 {
        return Ok([3, 0, 7]);
    }
    if n == -1 {
        return Ok([-1, 6, 8]);
    }
    let marker = key_marker.ok_or(RefrainError::MissingParameter("xdd"))?;
    let n = if n != marker && n < 2 { n + 7 } else { n };
    if n == marker {
        Ok([n + 4, n + 7, n + 9])
    } else {
        Ok([n, n + 2, n + 4])
    }
}

/// Look up a pitch name, letting -1 (and only small negative offsets)
/// address the table from the back.
fn pitch_name(offset: i64) -> Result<&'static str, RefrainError> {
    let len = PITCH_TABLE.len() as i64;
    let index = if offset < 0 { len + offset } else { offset };
    if (0..len).contains(&index) {
        Ok(PITCH_TABLE[index as usize])
    } else {
        Err(RefrainError::DegreeOutOfRange(offset))
    }
}

/// Beat position within the harmonic progression.
///
/// `beat` is the duration consumed inside the current segment; `segment`
/// indexes the expanded segment-duration sequence. Both only ever move
/// forward within a pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HarmonicCursor {
    beat: f64,
    segment: usize,
}

impl HarmonicCursor {
    pub fn new() -> Self {
        HarmonicCursor {
            beat: 0.0,
            segment: 0,
        }
    }

    /// Index of the active segment.
    pub fn segment(&self) -> usize {
        self.segment
    }

    /// Consume `weight` beats, advancing past as many harmonic segments as
    /// that duration covers (zero, one, or several). Leaves `beat` strictly
    /// below the weight of the segment it lands in.
    pub fn advance(&mut self, weight: f64, segment_durs: &[f64]) {
        self.beat += weight;
        while self.beat >= segment_durs[self.segment] {
            self.beat -= segment_durs[self.segment];
            self.segment = (self.segment + 1) % segment_durs.len();
        }
    }
}

impl Default for HarmonicCursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Map one melodic step to its note token, advancing the cursor.
///
/// `step` is the zero-based sequential step index (selects the `med`
/// weight), `degree` the 1-based scale degree. The harmonic context is read
/// before the cursor moves. Returns `None` for a zero-duration step, which
/// emits nothing rather than a zero-denominator fraction.
pub fn note_token(
    cursor: &mut HarmonicCursor,
    step: usize,
    degree: i64,
    med: &[f64],
    harmony: &[i64],
    segment_durs: &[f64],
    key_marker: Option<i64>,
) -> Result<Option<String>, RefrainError> {
    let m = degree - 1;
    let context = harmony[cursor.segment() % harmony.len()];
    let offsets = degree_offsets(context, key_marker)?;
    let offset = offsets[m.rem_euclid(3) as usize] + 7 * m.div_euclid(3);
    let pitch = pitch_name(offset)?;

    let weight = med[step % med.len()];
    cursor.advance(weight, segment_durs);

    if weight == 0.0 {
        return Ok(None);
    }
    Ok(Some(format!("{}{}", pitch, fraction::duration_token(weight))))
}

/// Render the whole melodic line: the degree sequence repeated `reps`
/// times, each token paired with its running step index, space-joined.
pub fn render_melody(
    mel: &[i64],
    med: &[f64],
    harmony: &[i64],
    segment_durs: &[f64],
    key_marker: Option<i64>,
    reps: usize,
) -> Result<String, RefrainError> {
    let mut cursor = HarmonicCursor::new();
    let mut tokens = Vec::with_capacity(mel.len() * reps);
    for (step, &degree) in mel.iter().cycle().take(mel.len() * reps).enumerate() {
        if let Some(token) = note_token(
            &mut cursor,
            step,
            degree,
            med,
            harmony,
            segment_durs,
            key_marker,
        )? {
            tokens.push(token);
        }
    }
    Ok(tokens.join(" "))
}
