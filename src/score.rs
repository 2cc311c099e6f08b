//! # Score Assembler
//!
//! Combines the chord line, the rendered melody and the tonic/tempo header
//! into the final LilyPond document. The skeleton is fixed; only the tempo,
//! the transposition, the chord line and the note body are substituted. The
//! body repeats via `\repeat unfold 16`, so one synchronized pass of the
//! phrase is all that is ever written out.

use crate::error::RefrainError;
use crate::fraction;
use crate::params::ParameterSet;
use crate::pitch;
use crate::sync;

/// Chord table indexed by `acc` selectors: root letter plus LilyPond chord
/// quality suffix. One diatonic run of triads, twice, bracketed by the two
/// fixed diminished entries.
const CHORD_TABLE: [(&str, &str); 16] = [
    ("e", ""),
    ("c", ""),
    ("d", ":m"),
    ("e", ":m"),
    ("f", ""),
    ("g", ""),
    ("a", ":m"),
    ("b", ":dim"),
    ("c", ""),
    ("d", ":m"),
    ("e", ":m"),
    ("f", ""),
    ("g", ""),
    ("a", ":m"),
    ("b", ":dim"),
    ("fis", ":dim"),
];

/// Transliterate a tonic spelling into LilyPond note-name form:
/// `x` (double sharp) becomes `isis`, `#` becomes `is`, `b` becomes `es`,
/// all lowercased. `"F#"` reads as `"fis"`, `"Bb"` as `"bes"`.
pub fn transliterate_tonic(ton: &str) -> String {
    ton.replace('x', "##")
        .replace('#', "is")
        .replace('b', "es")
        .to_lowercase()
}

/// Render the chord accompaniment line: the selector sequence repeated four
/// times, each selector paired with its segment duration from the
/// unexpanded `dur` cycle.
fn chord_line(acc: &[i64], dur: &[f64]) -> Result<String, RefrainError> {
    let mut tokens = Vec::with_capacity(acc.len() * 4);
    for (i, &selector) in acc.iter().cycle().take(acc.len() * 4).enumerate() {
        // Like the pitch table, -1 addresses the back of the table (the
        // leading-tone context of the harmonic sequence).
        let len = CHORD_TABLE.len() as i64;
        let index = if selector < 0 { len + selector } else { selector };
        let (root, quality) = usize::try_from(index)
            .ok()
            .and_then(|s| CHORD_TABLE.get(s).copied())
            .ok_or(RefrainError::ChordOutOfRange(selector))?;
        let duration = fraction::duration_token(dur[i % dur.len()]);
        tokens.push(format!("{}{}{}", root, duration, quality));
    }
    Ok(tokens.join(" "))
}

/// Assemble the complete LilyPond document for one parameter set.
pub fn format_score(params: &ParameterSet) -> Result<String, RefrainError> {
    let harmony = params.harmony();
    let segment_durs = params.expanded_dur();
    let chords = match &params.acc {
        Some(acc) => chord_line(acc, &params.dur)?,
        None => String::new(),
    };
    let reps = sync::melody_repetitions(params.med.len(), segment_durs.len(), harmony.len());
    let body = pitch::render_melody(
        &params.mel,
        &params.med,
        harmony,
        &segment_durs,
        params.xdd,
        reps,
    )?;
    let ton = transliterate_tonic(&params.ton);

    let mut score = String::new();
    score.push_str("\\version \"2.19\"\n");
    score.push_str(&format!("bpm = \\tempo 4 = {}\n", params.bpm));
    score.push_str("\\score { <<\n");
    score.push_str("    \\chords {\n");
    score.push_str("        \\bpm\n");
    score.push_str(&format!("        \\transposition {}\n", ton));
    score.push_str("        \\repeat unfold 16 {\n");
    score.push_str(&chords);
    score.push('\n');
    score.push_str("        }\n");
    score.push_str("    }\n");
    score.push_str("    \\new Staff {\n");
    score.push_str("        \\bpm\n");
    score.push_str(&format!("        \\transposition {}\n", ton));
    score.push_str("        \\repeat unfold 16 {\n");
    score.push_str(&body);
    score.push('\n');
    score.push_str("    } } >>\n");
    score.push_str("    \\midi {}\n");
    score.push_str("}\n");
    Ok(score)
}
