//! # Phrase File Parameters
//!
//! This module parses the line-oriented phrase file into a typed
//! [`ParameterSet`].
//!
//! ## File format
//! - One parameter per line: the first whitespace token is the key, the
//!   remaining tokens are the value sequence.
//! - Lines whose first token starts with `#`, and lines with fewer than two
//!   tokens, are ignored.
//! - A repeated key overwrites the earlier value.
//!
//! ## Keys
//! | key | type | required | meaning |
//! |-----|------|----------|---------|
//! | `mel` | integers | yes | melodic scale degrees, 1-based |
//! | `med` | floats   | yes | per-step duration weights, cyclic |
//! | `deg` | integers | yes | harmonic progression, cyclic |
//! | `dur` | floats   | yes | harmonic segment duration weights |
//! | `acc` | integers | no  | chord selectors; replaces `deg` when present |
//! | `xdd` | digits   | no  | key-context marker (digit tokens concatenated) |
//! | `ton` | letters  | no  | tonic, default `C` |
//! | `bpm` | integer  | no  | tempo, default `120` |
//!
//! All numeric conversion and non-emptiness checks happen here, eagerly, so
//! the generation pass never sees a malformed set.

use crate::error::RefrainError;
use std::collections::HashMap;

/// Typed view of one phrase file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    /// Melodic scale degrees (1-based within the active harmonic context).
    pub mel: Vec<i64>,
    /// Per-step duration weights, indexed by step position modulo length.
    pub med: Vec<f64>,
    /// Harmonic progression degrees, cyclic.
    pub deg: Vec<i64>,
    /// Duration weight of each harmonic segment; expanded against the
    /// harmony length before melody rendering.
    pub dur: Vec<f64>,
    /// Chord selectors. When present this sequence replaces `deg` as the
    /// active harmonic progression and drives the chord line.
    pub acc: Option<Vec<i64>>,
    /// Key-context marker selecting diminished-degree handling.
    pub xdd: Option<i64>,
    /// Tonic spelling as written in the file (transliterated later).
    pub ton: String,
    /// Tempo in quarter notes per minute.
    pub bpm: u32,
}

impl ParameterSet {
    /// Parse and validate a phrase file.
    pub fn parse(source: &str) -> Result<Self, RefrainError> {
        let mut raw: HashMap<&str, Vec<&str>> = HashMap::new();
        for line in source.lines() {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.len() < 2 || tokens[0].starts_with('#') {
                continue;
            }
            raw.insert(tokens[0], tokens[1..].to_vec());
        }

        let mel = integers("mel", required(&raw, "mel")?)?;
        let med = floats("med", required(&raw, "med")?)?;
        let deg = integers("deg", required(&raw, "deg")?)?;
        let dur = floats("dur", required(&raw, "dur")?)?;
        let acc = match raw.get("acc") {
            Some(tokens) => Some(integers("acc", tokens)?),
            None => None,
        };
        let xdd = match raw.get("xdd") {
            Some(tokens) => Some(joined_integer("xdd", tokens)?),
            None => None,
        };
        let ton = match raw.get("ton") {
            Some(tokens) => tokens.concat(),
            None => "C".to_string(),
        };
        let bpm = match raw.get("bpm") {
            Some(tokens) => {
                let joined = tokens.concat();
                joined.parse().map_err(|_| RefrainError::InvalidParameter {
                    key: "bpm",
                    value: joined.clone(),
                    message: "expected a positive integer".to_string(),
                })?
            }
            None => 120,
        };

        Ok(ParameterSet {
            mel,
            med,
            deg,
            dur,
            acc,
            xdd,
            ton,
            bpm,
        })
    }

    /// The active harmonic progression: `acc` when given, else `deg`.
    pub fn harmony(&self) -> &[i64] {
        match &self.acc {
            Some(acc) => acc,
            None => &self.deg,
        }
    }

    /// `dur` logically repeated once per harmony element, the form the
    /// melody renderer's beat cursor walks over.
    pub fn expanded_dur(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.dur.len() * self.harmony().len());
        for _ in 0..self.harmony().len() {
            out.extend_from_slice(&self.dur);
        }
        out
    }
}

fn required<'a>(
    raw: &'a HashMap<&str, Vec<&'a str>>,
    key: &'static str,
) -> Result<&'a [&'a str], RefrainError> {
    match raw.get(key) {
        Some(tokens) => Ok(tokens),
        None => Err(RefrainError::MissingParameter(key)),
    }
}

fn integers(key: &'static str, tokens: &[&str]) -> Result<Vec<i64>, RefrainError> {
    if tokens.is_empty() {
        return Err(RefrainError::EmptyParameter(key));
    }
    tokens
        .iter()
        .map(|t| {
            t.parse().map_err(|_| RefrainError::InvalidParameter {
                key,
                value: t.to_string(),
                message: "expected an integer".to_string(),
            })
        })
        .collect()
}

fn floats(key: &'static str, tokens: &[&str]) -> Result<Vec<f64>, RefrainError> {
    if tokens.is_empty() {
        return Err(RefrainError::EmptyParameter(key));
    }
    tokens
        .iter()
        .map(|t| {
            t.parse().map_err(|_| RefrainError::InvalidParameter {
                key,
                value: t.to_string(),
                message: "expected a number".to_string(),
            })
        })
        .collect()
}

/// Tokens concatenated into one integer, so `bpm 1 2 0` reads as 120.
fn joined_integer(key: &'static str, tokens: &[&str]) -> Result<i64, RefrainError> {
    let joined = tokens.concat();
    joined.parse().map_err(|_| RefrainError::InvalidParameter {
        key,
        value: joined.clone(),
        message: "expected an integer".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let source = "mel 1 2 3\nmed 1 0.5\ndeg 0\ndur 4\n";
        let params = ParameterSet::parse(source).unwrap();
        assert_eq!(params.mel, vec![1, 2, 3]);
        assert_eq!(params.med, vec![1.0, 0.5]);
        assert_eq!(params.deg, vec![0]);
        assert_eq!(params.dur, vec![4.0]);
        assert_eq!(params.acc, None);
        assert_eq!(params.xdd, None);
        assert_eq!(params.ton, "C");
        assert_eq!(params.bpm, 120);
    }

    #[test]
    fn test_parse_full() {
        let source = "\
mel 1 2
med 1
deg 0 5
dur 2
acc 1 4
xdd 5
ton F#
bpm 90
";
        let params = ParameterSet::parse(source).unwrap();
        assert_eq!(params.acc, Some(vec![1, 4]));
        assert_eq!(params.xdd, Some(5));
        assert_eq!(params.ton, "F#");
        assert_eq!(params.bpm, 90);
    }

    #[test]
    fn test_comments_and_short_lines_ignored() {
        let source = "# a comment line\nmel 1\nstray\nmed 1\ndeg 0\ndur 4\n";
        let params = ParameterSet::parse(source).unwrap();
        assert_eq!(params.mel, vec![1]);
    }

    #[test]
    fn test_later_key_overwrites() {
        let source = "mel 1\nmel 2 3\nmed 1\ndeg 0\ndur 4\n";
        let params = ParameterSet::parse(source).unwrap();
        assert_eq!(params.mel, vec![2, 3]);
    }

    #[test]
    fn test_missing_required_key() {
        let err = ParameterSet::parse("mel 1\nmed 1\ndeg 0\n").unwrap_err();
        assert!(matches!(err, RefrainError::MissingParameter("dur")));
    }

    #[test]
    fn test_malformed_number() {
        let err = ParameterSet::parse("mel 1\nmed x\ndeg 0\ndur 4\n").unwrap_err();
        assert!(matches!(err, RefrainError::InvalidParameter { key: "med", .. }));
    }

    #[test]
    fn test_multi_token_values_joined() {
        let source = "mel 1\nmed 1\ndeg 0\ndur 4\nbpm 1 2 0\nxdd 1 2\n";
        let params = ParameterSet::parse(source).unwrap();
        assert_eq!(params.bpm, 120);
        assert_eq!(params.xdd, Some(12));
    }

    #[test]
    fn test_harmony_prefers_acc() {
        let source = "mel 1\nmed 1\ndeg 0 1\ndur 4\nacc 2 3 4\n";
        let params = ParameterSet::parse(source).unwrap();
        assert_eq!(params.harmony().to_vec(), vec![2, 3, 4]);
        // dur repeats once per harmony element, not per deg element.
        assert_eq!(params.expanded_dur(), vec![4.0, 4.0, 4.0]);
    }
}
