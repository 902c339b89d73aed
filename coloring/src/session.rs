//! Coloring session: level selection, painting, and grading.
//!
//! Both collaborator calls degrade instead of failing: a missing image
//! becomes a blank canvas and a failed grading becomes a zero score.

use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    evaluation::Evaluation,
    fill::{flood_fill, FillOutcome},
    levels::Level,
    palette::DEFAULT_SWATCH,
    raster::{Raster, RasterError, Rgb},
};

/// Edge length of the square canvas used when no line art is available.
pub const FALLBACK_CANVAS_SIZE: u16 = 600;

/// Line art produced by the image collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Drawing to color.
    pub raster: Raster,
    /// Subject of the drawing.
    pub topic: String,
}

/// Failures reported by a [`ChallengeService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The collaborator could not be reached or refused the request.
    #[error("challenge service unavailable: {0}")]
    Unavailable(String),
    /// The collaborator answered without image data.
    #[error("the reply carried no image data")]
    NoImage,
    /// The collaborator's image could not be decoded.
    #[error("the reply image is unusable")]
    Image(#[from] RasterError),
    /// The collaborator's grading reply was not valid JSON.
    #[error("the grading reply is malformed")]
    MalformedReply(#[from] serde_json::Error),
}

/// External collaborator that draws line art and grades colored drawings.
pub trait ChallengeService {
    /// Produces line art for the level.
    fn generate(&mut self, level: Level) -> Result<GeneratedImage, ServiceError>;

    /// Grades a colored drawing of the topic at the level.
    fn evaluate(
        &mut self,
        drawing: &Raster,
        level: Level,
        topic: &str,
    ) -> Result<Evaluation, ServiceError>;
}

/// Drawing in progress for one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    /// Level being played.
    pub level: Level,
    /// Subject of the drawing.
    pub topic: String,
    /// Canvas as painted so far.
    pub canvas: Raster,
    original: Raster,
}

/// Screen the session is showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Level picker.
    Menu,
    /// Painting a challenge.
    Playing(Challenge),
    /// Showing the grade of a submitted challenge.
    Feedback(Challenge, Evaluation),
}

/// Actions attempted on a screen that does not offer them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No challenge is being painted.
    #[error("no drawing is in progress")]
    NotPlaying,
    /// No grade is being shown.
    #[error("no feedback is being shown")]
    NoFeedback,
}

/// One player's run through the level ladder.
#[derive(Debug)]
pub struct Session<S> {
    service: S,
    screen: Screen,
    color: Rgb,
}

impl<S: ChallengeService> Session<S> {
    /// Starts on the menu with the default color selected.
    pub fn new(service: S) -> Self {
        Self {
            service,
            screen: Screen::Menu,
            color: DEFAULT_SWATCH.color,
        }
    }

    /// Screen currently shown.
    #[must_use]
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Color used by the next fill.
    #[must_use]
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Borrows the collaborator.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Challenge being painted or graded, if any.
    #[must_use]
    pub fn challenge(&self) -> Option<&Challenge> {
        match &self.screen {
            Screen::Menu => None,
            Screen::Playing(challenge) | Screen::Feedback(challenge, _) => Some(challenge),
        }
    }

    /// Loads the level's line art and starts painting it.
    pub fn play(&mut self, level: Level) {
        let (canvas, topic) = match self.service.generate(level) {
            Ok(image) => (image.raster, image.topic),
            Err(error) => {
                warn!(level = level.number(), %error, "line art unavailable, using a blank canvas");
                (
                    Raster::blank(FALLBACK_CANVAS_SIZE, FALLBACK_CANVAS_SIZE),
                    level.topic().to_owned(),
                )
            }
        };
        debug!(level = level.number(), %topic, "challenge loaded");
        self.screen = Screen::Playing(Challenge {
            level,
            topic,
            original: canvas.clone(),
            canvas,
        });
    }

    /// Chooses the color for subsequent fills.
    pub fn select_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Fills the region under the pointer with the selected color.
    pub fn fill(&mut self, x: u32, y: u32) -> Result<FillOutcome, SessionError> {
        let color = self.color;
        let challenge = self.playing_mut()?;
        Ok(flood_fill(&mut challenge.canvas, x, y, color))
    }

    /// Restores the untouched line art.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        let challenge = self.playing_mut()?;
        challenge.canvas = challenge.original.clone();
        Ok(())
    }

    /// Sends the drawing for grading and shows the result.
    pub fn submit(&mut self) -> Result<Evaluation, SessionError> {
        let challenge = match std::mem::replace(&mut self.screen, Screen::Menu) {
            Screen::Playing(challenge) => challenge,
            other => {
                self.screen = other;
                return Err(SessionError::NotPlaying);
            }
        };
        let evaluation = self
            .service
            .evaluate(&challenge.canvas, challenge.level, &challenge.topic)
            .unwrap_or_else(|error| {
                warn!(level = challenge.level.number(), %error, "grading failed, scoring zero");
                Evaluation::fallback()
            });
        debug!(level = challenge.level.number(), score = evaluation.score, "drawing graded");
        self.screen = Screen::Feedback(challenge, evaluation.clone());
        Ok(evaluation)
    }

    /// Dismisses the grade and keeps painting the same drawing.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        let screen = std::mem::replace(&mut self.screen, Screen::Menu);
        match screen {
            Screen::Feedback(challenge, _) => {
                self.screen = Screen::Playing(challenge);
                Ok(())
            }
            other => {
                self.screen = other;
                Err(SessionError::NoFeedback)
            }
        }
    }

    /// Advances to the next level, or back to the menu after the last one.
    ///
    /// Returns the level now being played, if any.
    pub fn next_level(&mut self) -> Result<Option<Level>, SessionError> {
        let Screen::Feedback(challenge, _) = &self.screen else {
            return Err(SessionError::NoFeedback);
        };
        match challenge.level.next() {
            Some(level) => {
                self.play(level);
                Ok(Some(level))
            }
            None => {
                self.screen = Screen::Menu;
                Ok(None)
            }
        }
    }

    /// Returns to the level picker.
    pub fn menu(&mut self) {
        self.screen = Screen::Menu;
    }

    fn playing_mut(&mut self) -> Result<&mut Challenge, SessionError> {
        match &mut self.screen {
            Screen::Playing(challenge) => Ok(challenge),
            _ => Err(SessionError::NotPlaying),
        }
    }
}
