//! Configuration system for the scheduling core.
//!
//! This module defines the configuration structures used to parameterize the
//! core. It provides:
//! 1. **Defaults:** Baseline structure sizes and limits.
//! 2. **Structures:** Hierarchical config for general, pipeline, and branch predictor settings.
//! 3. **Validation:** Rejection of sizes that cannot form a working core.
//!
//! Configuration is supplied as JSON (the CLI's `--config`), or use
//! `Config::default()`. Every field may be omitted.

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::common::tag::TagSpace;
use crate::core::units::bru::counter::COUNTER_MAX;

/// Default configuration constants for the core.
mod defaults {
    /// Hang-detection limit for a simulation run.
    pub const MAX_CYCLES: u64 = 10_000;

    /// Reservation station entry count.
    pub const RS_ENTRIES: usize = 4;

    /// Reorder buffer slot count. One slot is always kept free.
    pub const ROB_ENTRIES: usize = 32;

    /// Tag width in bits (256 tags).
    pub const TAG_BITS: u32 = 8;

    /// Predictor starting state (strongly not-taken).
    pub const PREDICTOR_STATE: u8 = 0;
}

/// Root configuration structure for the core.
///
/// # Examples
///
/// ```
/// use tomasulo_core::config::Config;
///
/// let json = r#"{
///     "general": { "trace": true },
///     "pipeline": { "rob_entries": 16, "tag_bits": 5 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert!(config.general.trace);
/// assert_eq!(config.pipeline.rs_entries, 4);
/// assert_eq!(config.pipeline.rob_entries, 16);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Structure sizes and tag width
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Branch predictor configuration
    #[serde(default)]
    pub branch_predictor: BranchPredictorConfig,
}

impl Config {
    /// Checks that the configured sizes form a working core.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found: an empty reservation station,
    /// a reorder buffer with fewer than 2 slots, a tag width outside `1..=16`,
    /// more in-flight instructions than half the tag domain, or a predictor
    /// state above 3.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.pipeline;
        if p.rs_entries == 0 {
            return Err(ConfigError::EmptyReservationStation);
        }
        if p.rob_entries < 2 {
            return Err(ConfigError::ReorderBufferTooSmall(p.rob_entries));
        }
        let space = p.tag_space()?;
        let in_flight = p.rob_entries - 1;
        if in_flight > space.window() as usize {
            return Err(ConfigError::TagWindow {
                in_flight,
                window: space.window(),
                bits: space.bits(),
            });
        }
        if self.branch_predictor.initial_state > COUNTER_MAX {
            return Err(ConfigError::PredictorState(
                self.branch_predictor.initial_state,
            ));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Dump the reservation station and CDB after every step
    #[serde(default)]
    pub trace: bool,

    /// Steps to run before declaring the program hung
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,
}

impl GeneralConfig {
    /// Returns the default hang-detection limit.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            trace: false,
            max_cycles: defaults::MAX_CYCLES,
        }
    }
}

/// Structure sizes and tag width.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Reservation station entries
    #[serde(default = "PipelineConfig::default_rs_entries")]
    pub rs_entries: usize,

    /// Reorder buffer slots (usable capacity is one less)
    #[serde(default = "PipelineConfig::default_rob_entries")]
    pub rob_entries: usize,

    /// Tag width in bits, at most 16
    #[serde(default = "PipelineConfig::default_tag_bits")]
    pub tag_bits: u32,
}

impl PipelineConfig {
    const fn default_rs_entries() -> usize {
        defaults::RS_ENTRIES
    }

    const fn default_rob_entries() -> usize {
        defaults::ROB_ENTRIES
    }

    const fn default_tag_bits() -> u32 {
        defaults::TAG_BITS
    }

    /// The tag domain described by `tag_bits`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TagBits`] unless `1 <= tag_bits <= 16`.
    pub fn tag_space(&self) -> Result<TagSpace, ConfigError> {
        TagSpace::new(self.tag_bits)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rs_entries: defaults::RS_ENTRIES,
            rob_entries: defaults::ROB_ENTRIES,
            tag_bits: defaults::TAG_BITS,
        }
    }
}

/// Branch predictor configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BranchPredictorConfig {
    /// Starting state of the 2-bit counter (0..=3)
    #[serde(default = "BranchPredictorConfig::default_initial_state")]
    pub initial_state: u8,
}

impl BranchPredictorConfig {
    const fn default_initial_state() -> u8 {
        defaults::PREDICTOR_STATE
    }
}

impl Default for BranchPredictorConfig {
    fn default() -> Self {
        Self {
            initial_state: defaults::PREDICTOR_STATE,
        }
    }
}
