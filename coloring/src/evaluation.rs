//! Grading results returned by the evaluation collaborator.

use serde::{Deserialize, Serialize};

/// Highest score a drawing can receive.
pub const MAX_SCORE: u8 = 100;
/// Scores at or above this value are highlighted as a pass.
pub const PASS_SCORE: u8 = 80;

const RECEIVED_MESSAGE: &str = "Your artwork was received!";
const ERROR_MESSAGE: &str = "AI evaluation error";

/// Verdict on a submitted drawing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Score in `0..=MAX_SCORE`.
    pub score: u8,
    /// Encouraging message for the player.
    pub message: String,
    /// Whether the drawing satisfied the level.
    pub correct: bool,
}

impl Evaluation {
    /// Evaluation used when the collaborator could not grade the drawing.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            score: 0,
            message: ERROR_MESSAGE.to_owned(),
            correct: false,
        }
    }

    /// Parses the collaborator's JSON reply.
    ///
    /// Missing or null fields take neutral defaults; the score is rounded and
    /// clamped into range.
    pub fn from_reply(reply: &str) -> Result<Self, serde_json::Error> {
        let raw: RawEvaluation = serde_json::from_str(reply)?;
        let score = raw.score.unwrap_or(0.0);
        let score = if score.is_finite() {
            score.round().clamp(0.0, f64::from(MAX_SCORE)) as u8
        } else {
            0
        };
        Ok(Self {
            score,
            message: raw
                .message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| RECEIVED_MESSAGE.to_owned()),
            correct: raw.is_correct.unwrap_or(false),
        })
    }

    /// Medal awarded for the score.
    #[must_use]
    pub const fn medal(&self) -> Medal {
        match self.score {
            90..=u8::MAX => Medal::Trophy,
            70..=89 => Medal::Palette,
            _ => Medal::Sparkle,
        }
    }

    /// Reports whether the score earns the pass highlight.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.score >= PASS_SCORE
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEvaluation {
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    is_correct: Option<bool>,
}

/// Badge shown next to a score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Medal {
    /// Score of 90 or more.
    Trophy,
    /// Score of 70 to 89.
    Palette,
    /// Anything lower.
    Sparkle,
}

impl Medal {
    /// Glyph rendered for the medal.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Trophy => "🏆",
            Self::Palette => "🎨",
            Self::Sparkle => "✨",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_fields_are_read() {
        let evaluation =
            Evaluation::from_reply(r#"{"score": 87.6, "message": "Lovely!", "isCorrect": true}"#)
                .expect("valid reply");
        assert_eq!(
            evaluation,
            Evaluation {
                score: 88,
                message: "Lovely!".into(),
                correct: true,
            }
        );
        assert_eq!(evaluation.medal(), Medal::Palette);
        assert!(evaluation.passed());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let evaluation = Evaluation::from_reply("{}").expect("valid reply");
        assert_eq!(evaluation.score, 0);
        assert_eq!(evaluation.message, RECEIVED_MESSAGE);
        assert!(!evaluation.correct);
        assert_eq!(evaluation.medal(), Medal::Sparkle);
    }

    #[test]
    fn scores_are_clamped() {
        let high = Evaluation::from_reply(r#"{"score": 250}"#).expect("valid reply");
        let low = Evaluation::from_reply(r#"{"score": -4}"#).expect("valid reply");
        assert_eq!(high.score, 100);
        assert_eq!(high.medal(), Medal::Trophy);
        assert_eq!(low.score, 0);
    }

    #[test]
    fn malformed_reply_is_an_error() {
        assert!(Evaluation::from_reply("not json").is_err());
    }
}
