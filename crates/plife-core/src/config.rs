//! Configuration System
//!
//! Run parameters loaded from a TOML file. Every section falls back to its
//! defaults, so a file only needs to name the values it changes.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::systems::boundary::Bounds;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "particle_life.toml";

/// Immutable configuration for one run.
///
/// Inserted into the world as a resource at initialization and only ever read
/// afterwards.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Population size
    #[serde(default)]
    pub population: PopulationConfig,
    /// Friction and the ranges coefficients are sampled from
    #[serde(default)]
    pub forces: ForceConfig,
    /// Domain rectangle
    #[serde(default)]
    pub bounds: Bounds,
    /// Integration and update ordering
    #[serde(default)]
    pub stepping: SteppingConfig,
    /// One entry per particle type; the index is the type id
    #[serde(default = "default_types")]
    pub types: Vec<TypeTemplateConfig>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            forces: ForceConfig::default(),
            bounds: Bounds::default(),
            stepping: SteppingConfig::default(),
            types: default_types(),
        }
    }
}

/// Population settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Particles spawned at initialization
    pub initial_particle_amount: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_particle_amount: 400,
        }
    }
}

/// Force settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Net force at or below this magnitude stops a particle dead
    pub friction: f32,
    pub min_effect_radius: f32,
    pub max_effect_radius: f32,
    pub min_pull: f32,
    pub max_pull: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            friction: 0.05,
            min_effect_radius: 1.0,
            max_effect_radius: 5.0,
            min_pull: -1.0,
            max_pull: 1.0,
        }
    }
}

/// How particles within one tick observe each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// Every particle reads the frozen pre-tick population
    #[default]
    Synchronous,
    /// Particles update in place in id order; later particles see the
    /// wrapped positions of earlier ones
    Sequential,
}

/// Stepping settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteppingConfig {
    /// Seconds of motion integrated per tick; zero freezes positions
    pub time_step: f32,
    pub update_mode: UpdateMode,
}

impl Default for SteppingConfig {
    fn default() -> Self {
        Self {
            time_step: 0.02,
            update_mode: UpdateMode::Synchronous,
        }
    }
}

/// One particle type as authored in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeTemplateConfig {
    pub name: String,
    /// Pull used when the matrix-derived magnitude degenerates
    #[serde(default)]
    pub default_pull: f32,
    /// Display color for renderers, RGB in 0..1
    #[serde(default = "default_color")]
    pub color: [f32; 3],
}

impl TypeTemplateConfig {
    pub fn new(name: impl Into<String>, default_pull: f32) -> Self {
        Self {
            name: name.into(),
            default_pull,
            color: default_color(),
        }
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }
}

fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_types() -> Vec<TypeTemplateConfig> {
    vec![
        TypeTemplateConfig::new("red", 0.4).with_color([1.0, 0.3, 0.3]),
        TypeTemplateConfig::new("green", -0.2).with_color([0.3, 1.0, 0.3]),
        TypeTemplateConfig::new("blue", 0.1).with_color([0.3, 0.4, 1.0]),
        TypeTemplateConfig::new("yellow", -0.5).with_color([1.0, 0.9, 0.2]),
        TypeTemplateConfig::new("violet", 0.7).with_color([0.8, 0.3, 1.0]),
    ]
}

impl SimulationConfig {
    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Serializes this configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of particle types
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    /// Rejects configurations that would make sampling or wrapping meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let forces = &self.forces;
        let bounds = &self.bounds;

        if self.types.is_empty() {
            return Err(ConfigError::Invalid("at least one particle type is required".into()));
        }
        check_range("effect radius", forces.min_effect_radius, forces.max_effect_radius)?;
        if forces.min_effect_radius < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_effect_radius must be non-negative, got {}",
                forces.min_effect_radius
            )));
        }
        check_range("pull", forces.min_pull, forces.max_pull)?;
        check_range("x bounds", bounds.min_x, bounds.max_x)?;
        check_range("y bounds", bounds.min_y, bounds.max_y)?;

        if !(forces.friction >= 0.0 && forces.friction.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "friction must be a non-negative number, got {}",
                forces.friction
            )));
        }
        if !(self.stepping.time_step >= 0.0 && self.stepping.time_step.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "time_step must be a non-negative number, got {}",
                self.stepping.time_step
            )));
        }
        for template in &self.types {
            if !template.default_pull.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "type '{}' has a non-finite default_pull",
                    template.name
                )));
            }
        }
        Ok(())
    }
}

fn check_range(what: &str, min: f32, max: f32) -> Result<(), ConfigError> {
    if !(min.is_finite() && max.is_finite()) {
        return Err(ConfigError::Invalid(format!("{} range must be finite", what)));
    }
    if min > max {
        return Err(ConfigError::Invalid(format!(
            "{} range is inverted: min {} > max {}",
            what, min, max
        )));
    }
    Ok(())
}

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Generates a commented default configuration file.
pub fn default_config_toml() -> String {
    r#"# Particle Life Configuration

[population]
initial_particle_amount = 400

[forces]
friction = 0.05
min_effect_radius = 1.0
max_effect_radius = 5.0
min_pull = -1.0
max_pull = 1.0

[bounds]
min_x = -20.0
min_y = -12.0
max_x = 20.0
max_y = 12.0

[stepping]
time_step = 0.02
update_mode = "synchronous"   # or "sequential"

[[types]]
name = "red"
default_pull = 0.4
color = [1.0, 0.3, 0.3]

[[types]]
name = "green"
default_pull = -0.2
color = [0.3, 1.0, 0.3]

[[types]]
name = "blue"
default_pull = 0.1
color = [0.3, 0.4, 1.0]

[[types]]
name = "yellow"
default_pull = -0.5
color = [1.0, 0.9, 0.2]

[[types]]
name = "violet"
default_pull = 0.7
color = [0.8, 0.3, 1.0]
"#
    .to_string()
}
