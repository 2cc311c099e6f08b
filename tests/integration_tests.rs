//! Integration tests for refrain
//!
//! Tests the full text pipeline from phrase file to formatted LilyPond
//! score. Rendering and playback need the external tools and are covered
//! by the generator's mock-based unit tests instead.

use refrain::{generate_score, RefrainError};

/// Extract the note body: the lines between the Staff's repeat block
/// opening and the closing footer.
fn body_of(score: &str) -> &str {
    let staff = score.find("\\new Staff {").unwrap();
    let open = score[staff..].find("\\repeat unfold 16 {\n").unwrap();
    let start = staff + open + "\\repeat unfold 16 {\n".len();
    let end = score[start..].find("\n    } }").unwrap();
    &score[start..start + end]
}

#[test]
fn test_single_pair_quarter_note() {
    let source = "\
mel 1 1
med 1
deg 0
dur 4
ton C
bpm 120
";
    let score = generate_score(source).unwrap();
    assert!(score.contains("bpm = \\tempo 4 = 120"));
    assert!(score.contains("\\transposition c"));

    // One distinct note: degree 1 in the tonic context is e', one beat
    // approximated as the quarter-note fraction 4*1/1. The synchronizer
    // doubles the two melody tokens into four steps.
    let tokens: Vec<&str> = body_of(&score).split(' ').collect();
    assert_eq!(tokens.len(), 4);
    assert!(tokens.iter().all(|t| *t == "e'4*1/1"));
}

#[test]
fn test_defaults_applied() {
    let score = generate_score("mel 1\nmed 1\ndeg 0\ndur 4\n").unwrap();
    assert!(score.contains("bpm = \\tempo 4 = 120"));
    assert!(score.contains("\\transposition c"));
}

#[test]
fn test_chord_progression_with_accidental_line() {
    let source = "\
mel 1 2 3
med 1
deg 0
dur 1
acc 1 4
xdd 5
ton F#
bpm 90
";
    let score = generate_score(source).unwrap();
    assert!(score.contains("bpm = \\tempo 4 = 90"));
    assert!(score.contains("\\transposition fis"));

    // The chord line follows acc (not deg), repeated four times, with
    // durations from the unexpanded dur cycle.
    assert!(score.contains("c4*1/1 f4*1/1 c4*1/1 f4*1/1 c4*1/1 f4*1/1 c4*1/1 f4*1/1"));

    // acc replaces deg as the harmonic progression: one-beat segments flip
    // the context on every step, and the three-token melody runs
    // 2 * lcm(1, 2, 2) = 4 times.
    let expected = "c''4*1/1 a'4*1/1 g''4*1/1 f'4*1/1 e''4*1/1 c''4*1/1";
    assert_eq!(body_of(&score), format!("{} {}", expected, expected));
}

#[test]
fn test_fractional_durations() {
    let source = "mel 1\nmed 1.5 0.5\ndeg 0\ndur 4\n";
    let score = generate_score(source).unwrap();
    assert_eq!(
        body_of(&score),
        "e'4*3/2 e'4*1/2 e'4*3/2 e'4*1/2"
    );
}

#[test]
fn test_harmonic_cursor_spans_steps() {
    // Two one-beat segments alternating tonic and diminished contexts:
    // half-beat steps hold each context for two notes.
    let source = "mel 1\nmed 0.5\ndeg 0 5\ndur 1\nxdd 5\n";
    let score = generate_score(source).unwrap();
    assert_eq!(
        body_of(&score),
        "e'4*1/2 e'4*1/2 d''4*1/2 d''4*1/2"
    );
}

#[test]
fn test_missing_required_parameter() {
    let err = generate_score("mel 1\nmed 1\ndeg 0\n").unwrap_err();
    assert!(matches!(err, RefrainError::MissingParameter("dur")));
}

#[test]
fn test_diminished_degree_without_marker() {
    let err = generate_score("mel 1\nmed 1\ndeg 3\ndur 4\n").unwrap_err();
    assert!(matches!(err, RefrainError::MissingParameter("xdd")));
}
