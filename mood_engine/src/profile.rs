//! The assessment summary that drives every visual layer.
//!
//! A [`MoodProfile`] is produced once by the external scoring step and never
//! changes afterwards. Range checks happen here, at construction, so layers
//! can read the scores without re-validating them.

use std::{
    collections::BTreeSet,
    fmt, fs, io,
    path::{Path, PathBuf},
};

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::color::Paint;

pub const DEFAULT_LABEL: &str = "Mood Stone";

/// Compound stress patterns the assessment can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternTag {
    EconomicPsychologicalSpiral,
    TripleStressAmplification,
    PrivilegeGuiltComplex,
    SurvivalModeActivation,
    HeroicFunctioning,
}

impl PatternTag {
    pub const ALL: [PatternTag; 5] = [
        PatternTag::EconomicPsychologicalSpiral,
        PatternTag::TripleStressAmplification,
        PatternTag::PrivilegeGuiltComplex,
        PatternTag::SurvivalModeActivation,
        PatternTag::HeroicFunctioning,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternTag::EconomicPsychologicalSpiral => "economic_psychological_spiral",
            PatternTag::TripleStressAmplification => "triple_stress_amplification",
            PatternTag::PrivilegeGuiltComplex => "privilege_guilt_complex",
            PatternTag::SurvivalModeActivation => "survival_mode_activation",
            PatternTag::HeroicFunctioning => "heroic_functioning",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        PatternTag::ALL
            .into_iter()
            .find(|candidate| candidate.as_str() == tag)
    }
}

impl fmt::Display for PatternTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("{field} must lie in [0, 100], got {value}")]
    ScoreOutOfRange { field: &'static str, value: f32 },
    #[error("mood profile palette is empty")]
    EmptyPalette,
    #[error("failed to parse mood profile: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read mood profile from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Immutable stress summary plus the palette and pattern tags to render.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct MoodProfile {
    label: String,
    stress_level: f32,
    economic_pressure: f32,
    life_events_impact: f32,
    palette: Vec<Paint>,
    patterns: BTreeSet<PatternTag>,
}

/// On-disk shape of a profile, as emitted by the assessment.
#[derive(Debug, Deserialize)]
struct ProfileDocument {
    #[serde(default = "default_label", alias = "name")]
    label: String,
    stress_level: f32,
    economic_pressure: f32,
    #[serde(alias = "life_events")]
    life_events_impact: f32,
    #[serde(alias = "colors")]
    palette: Vec<Paint>,
    #[serde(default, alias = "patterns")]
    pattern_tags: Vec<String>,
}

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

impl MoodProfile {
    pub fn new<I, S>(
        label: impl Into<String>,
        stress_level: f32,
        economic_pressure: f32,
        life_events_impact: f32,
        palette: Vec<Paint>,
        pattern_tags: I,
    ) -> Result<Self, ProfileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        check_score("stress_level", stress_level)?;
        check_score("economic_pressure", economic_pressure)?;
        check_score("life_events_impact", life_events_impact)?;
        if palette.is_empty() {
            return Err(ProfileError::EmptyPalette);
        }

        let mut patterns = BTreeSet::new();
        for tag in pattern_tags {
            let tag = tag.as_ref();
            match PatternTag::from_tag(tag) {
                Some(known) => {
                    patterns.insert(known);
                }
                None => debug!(
                    target: "mood_stone::profile",
                    tag,
                    "profile.unknown_pattern=ignored"
                ),
            }
        }

        Ok(Self {
            label: label.into(),
            stress_level,
            economic_pressure,
            life_events_impact,
            palette,
            patterns,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let document: ProfileDocument = serde_json::from_str(json)?;
        Self::new(
            document.label,
            document.stress_level,
            document.economic_pressure,
            document.life_events_impact,
            document.palette,
            document.pattern_tags,
        )
    }

    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        let contents = fs::read_to_string(path).map_err(|source| ProfileError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Build a profile using an archetype's name and palette.
    pub fn for_archetype<I, S>(
        archetype: MoodArchetype,
        stress_level: f32,
        economic_pressure: f32,
        life_events_impact: f32,
        pattern_tags: I,
    ) -> Result<Self, ProfileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(
            archetype.display_name(),
            stress_level,
            economic_pressure,
            life_events_impact,
            archetype.palette(),
            pattern_tags,
        )
    }

    /// The sample "Economic Survivor" reading used for demos.
    pub fn demo() -> Self {
        Self {
            label: MoodArchetype::EconomicSurvivor.display_name().to_string(),
            stress_level: 75.0,
            economic_pressure: 85.0,
            life_events_impact: 45.0,
            palette: MoodArchetype::EconomicSurvivor.palette(),
            patterns: [
                PatternTag::EconomicPsychologicalSpiral,
                PatternTag::SurvivalModeActivation,
            ]
            .into_iter()
            .collect(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn stress_level(&self) -> f32 {
        self.stress_level
    }

    pub fn economic_pressure(&self) -> f32 {
        self.economic_pressure
    }

    pub fn life_events_impact(&self) -> f32 {
        self.life_events_impact
    }

    /// Stress level normalized to `[0, 1]`.
    pub fn stress_ratio(&self) -> f32 {
        self.stress_level / 100.0
    }

    /// Economic pressure normalized to `[0, 1]`.
    pub fn pressure_ratio(&self) -> f32 {
        self.economic_pressure / 100.0
    }

    pub fn palette(&self) -> &[Paint] {
        &self.palette
    }

    pub fn patterns(&self) -> &BTreeSet<PatternTag> {
        &self.patterns
    }

    pub fn has_pattern(&self, tag: PatternTag) -> bool {
        self.patterns.contains(&tag)
    }
}

fn check_score(field: &'static str, value: f32) -> Result<(), ProfileError> {
    if (0.0..=100.0).contains(&value) {
        Ok(())
    } else {
        Err(ProfileError::ScoreOutOfRange { field, value })
    }
}

/// Named result categories with their signature palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoodArchetype {
    EconomicSurvivor,
    StormNavigator,
    PrivilegedAnxious,
    BalancedNavigator,
    AdaptiveResponder,
}

impl MoodArchetype {
    pub const ALL: [MoodArchetype; 5] = [
        MoodArchetype::EconomicSurvivor,
        MoodArchetype::StormNavigator,
        MoodArchetype::PrivilegedAnxious,
        MoodArchetype::BalancedNavigator,
        MoodArchetype::AdaptiveResponder,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            MoodArchetype::EconomicSurvivor => "The Economic Survivor",
            MoodArchetype::StormNavigator => "The Storm Navigator",
            MoodArchetype::PrivilegedAnxious => "The Privileged Anxious",
            MoodArchetype::BalancedNavigator => "The Balanced Navigator",
            MoodArchetype::AdaptiveResponder => "The Adaptive Responder",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MoodArchetype::EconomicSurvivor => {
                "Managing high stress under significant economic pressure"
            }
            MoodArchetype::StormNavigator => {
                "Processing multiple life changes with heightened stress"
            }
            MoodArchetype::PrivilegedAnxious => {
                "Experiencing psychological distress despite economic security"
            }
            MoodArchetype::BalancedNavigator => "Managing life stressors with relative stability",
            MoodArchetype::AdaptiveResponder => "Experiencing moderate stress with active coping",
        }
    }

    fn palette_hex(self) -> [&'static str; 5] {
        match self {
            MoodArchetype::EconomicSurvivor => {
                ["#8B0000", "#B22222", "#CD5C5C", "#F08080", "#FFB6C1"]
            }
            MoodArchetype::StormNavigator => ["#4B0082", "#6A5ACD", "#9370DB", "#DDA0DD", "#E6E6FA"],
            MoodArchetype::PrivilegedAnxious => {
                ["#2F4F4F", "#708090", "#778899", "#B0C4DE", "#F0F8FF"]
            }
            MoodArchetype::BalancedNavigator => {
                ["#27AE60", "#16A085", "#95A5A6", "#BDC3C7", "#ECF0F1"]
            }
            MoodArchetype::AdaptiveResponder => {
                ["#E67E22", "#F39C12", "#F1C40F", "#FFFACD", "#FFFFF0"]
            }
        }
    }

    pub fn palette(self) -> Vec<Paint> {
        self.palette_hex().iter().map(|hex| Paint::parse(hex)).collect()
    }
}
