//! Level ladder of the coloring game.

use std::fmt;

/// Number of playable levels.
pub const MAX_LEVEL: u8 = 10;

const TOPICS: [&str; MAX_LEVEL as usize] = [
    "Cute Cat",
    "Simple Flower",
    "Apple and Fruit",
    "Rocket Ship",
    "Magical Turtle",
    "Ancient Tree",
    "Underwater Coral Reef",
    "Majestic Dragon",
    "Cyberpunk Cityscape",
    "Intricate Mandala Forest",
];

/// Validated level number in `1..=MAX_LEVEL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(u8);

impl Level {
    /// First level of the ladder.
    pub const FIRST: Self = Self(1);

    /// Wraps a level number, refusing values outside the ladder.
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if number >= 1 && number <= MAX_LEVEL {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Level number, starting at one.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    /// Subject drawn at this level.
    #[must_use]
    pub fn topic(self) -> &'static str {
        TOPICS[usize::from(self.0 - 1)]
    }

    /// Difficulty tier of the level.
    #[must_use]
    pub const fn tier(self) -> Tier {
        match self.0 {
            0..=3 => Tier::Bold,
            4..=7 => Tier::Detailed,
            _ => Tier::Intricate,
        }
    }

    /// Following level, or `None` after the last one.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }

    /// Every level in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=MAX_LEVEL).map(Self)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level {}: {}", self.0, self.topic())
    }
}

/// Difficulty band shared by several levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Large open areas with thick outlines.
    Bold,
    /// Coloring-book detail with medium lines.
    Detailed,
    /// Many tiny sections with thin lines.
    Intricate,
}

impl Tier {
    /// Line-art style requested from the image collaborator.
    #[must_use]
    pub const fn line_art(self) -> &'static str {
        match self {
            Self::Bold => "very simple, large open areas, bold thick outlines",
            Self::Detailed => "detailed coloring book style, medium thickness lines",
            Self::Intricate => {
                "extremely intricate, thin lines, many tiny sections, professional art"
            }
        }
    }

    /// How strictly the evaluation collaborator grades the tier.
    #[must_use]
    pub const fn grading(self) -> &'static str {
        match self {
            Self::Bold => "Be very generous. Just check if any color is applied.",
            Self::Detailed => "Check if colors suit the topic and stay mostly inside the lines.",
            Self::Intricate => {
                "Be very strict. Evaluate artistic harmony, small detail coverage, and neatness."
            }
        }
    }

    /// Encouragement shown to the player above the canvas.
    #[must_use]
    pub const fn hint(self) -> &'static str {
        match self {
            Self::Bold => "Fill the big areas boldly!",
            Self::Detailed => "Think about color harmony and fill every part carefully.",
            Self::Intricate => "Top difficulty! Work your magic down to the finest details.",
        }
    }
}

/// Prompt asking the image collaborator for line art of the level.
#[must_use]
pub fn line_art_prompt(level: Level) -> String {
    format!(
        "Black and white line art for coloring: A {}. {}. Only pure black lines on pure white \
         background, no grayscale, no shading, no background textures.",
        level.topic(),
        level.tier().line_art()
    )
}

/// Prompt asking the evaluation collaborator to grade a drawing of the level.
#[must_use]
pub fn evaluation_prompt(level: Level, topic: &str) -> String {
    format!(
        "Grade a coloring game drawing. This is level {} out of {MAX_LEVEL}. \
         The topic is \"{topic}\". {} Return a score (0-100), a warm encouraging \
         feedback message and a boolean isCorrect.",
        level.number(),
        level.tier().grading()
    )
}
