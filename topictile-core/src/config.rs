//! Segmentation configuration

use crate::error::{Result, TilingError};
use serde::{Deserialize, Serialize};

/// Default configuration constants
pub mod defaults {
    /// Groups on each side of a gap compared by the similarity provider
    pub const COMPARISON_WINDOW: usize = 1;

    /// Half-width of the moving-average smoothing window
    pub const SMOOTHING_WINDOW: usize = 1;

    /// Number of smoothing passes
    pub const SMOOTHING_PASSES: usize = 2;

    /// Normalised depth a gap must exceed to become a boundary
    pub const THRESHOLD: f64 = 0.6;

    /// Target segment count for the EVEN baseline
    pub const EVEN_SEGMENTS: usize = 5;
}

/// How depth scores are normalised before thresholding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthNormalization {
    /// Divide by the largest depth score of the meeting
    #[default]
    Max,
    /// Standard score against the meeting's depth distribution
    ZScore,
}

/// Upper bound on the number of boundaries kept per meeting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SegmentCap {
    /// Keep every selected boundary
    #[default]
    Disabled,
    /// At most `max_boundaries` boundaries
    Fixed {
        /// Boundary limit
        max_boundaries: usize,
    },
    /// At most `group_count / groups_per_segment - 1` boundaries
    AverageLength {
        /// Expected segment length in utterance groups
        groups_per_segment: usize,
    },
}

impl SegmentCap {
    /// Boundary limit for a meeting of `group_count` groups, if any
    pub fn limit(&self, group_count: usize) -> Option<usize> {
        match *self {
            SegmentCap::Disabled => None,
            SegmentCap::Fixed { max_boundaries } => Some(max_boundaries),
            SegmentCap::AverageLength { groups_per_segment } => {
                Some((group_count / groups_per_segment.max(1)).saturating_sub(1))
            }
        }
    }
}

/// Hyperparameters of the TextTiling boundary scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingParams {
    /// Groups on each side of a gap fed to the similarity provider
    pub comparison_window: usize,
    /// Half-width of the moving average (0 disables smoothing)
    pub smoothing_window: usize,
    /// Number of smoothing passes (0 disables smoothing)
    pub smoothing_passes: usize,
    /// Normalised depth threshold
    pub threshold: f64,
    /// Depth normalisation
    pub normalization: DepthNormalization,
    /// Boundary cap
    pub cap: SegmentCap,
}

impl Default for TilingParams {
    fn default() -> Self {
        Self {
            comparison_window: defaults::COMPARISON_WINDOW,
            smoothing_window: defaults::SMOOTHING_WINDOW,
            smoothing_passes: defaults::SMOOTHING_PASSES,
            threshold: defaults::THRESHOLD,
            normalization: DepthNormalization::default(),
            cap: SegmentCap::default(),
        }
    }
}

impl TilingParams {
    /// Validate the hyperparameters
    pub fn validate(&self) -> Result<()> {
        if self.comparison_window == 0 {
            return Err(TilingError::InvalidConfig(
                "comparison_window must be greater than 0".into(),
            ));
        }
        if !self.threshold.is_finite() {
            return Err(TilingError::InvalidConfig(
                "threshold must be a finite number".into(),
            ));
        }
        if let SegmentCap::AverageLength {
            groups_per_segment: 0,
        } = self.cap
        {
            return Err(TilingError::InvalidConfig(
                "groups_per_segment must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Spacing rule of the EVEN baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvenSpacing {
    /// Split every meeting into this many equal segments
    SegmentCount(usize),
    /// Start a new segment every this many groups
    Interval(usize),
}

impl Default for EvenSpacing {
    fn default() -> Self {
        EvenSpacing::SegmentCount(defaults::EVEN_SEGMENTS)
    }
}

/// Full configuration object for a segmentation run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// TextTiling hyperparameters
    pub tiling: TilingParams,
    /// EVEN baseline spacing
    pub even: EvenSpacing,
}

impl SegmentationConfig {
    /// Create a configuration builder
    pub fn builder() -> SegmentationConfigBuilder {
        SegmentationConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.tiling.validate()?;
        match self.even {
            EvenSpacing::SegmentCount(0) => Err(TilingError::InvalidConfig(
                "even segment count must be greater than 0".into(),
            )),
            EvenSpacing::Interval(0) => Err(TilingError::InvalidConfig(
                "even interval must be greater than 0".into(),
            )),
            _ => Ok(()),
        }
    }
}

/// Fluent builder for [`SegmentationConfig`]
#[derive(Debug, Default)]
pub struct SegmentationConfigBuilder {
    config: SegmentationConfig,
}

impl SegmentationConfigBuilder {
    /// Create a builder starting from the defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the depth threshold
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.tiling.threshold = threshold;
        self
    }

    /// Set the comparison window
    pub fn comparison_window(mut self, groups: usize) -> Self {
        self.config.tiling.comparison_window = groups;
        self
    }

    /// Set the smoothing window and number of passes
    pub fn smoothing(mut self, window: usize, passes: usize) -> Self {
        self.config.tiling.smoothing_window = window;
        self.config.tiling.smoothing_passes = passes;
        self
    }

    /// Set the depth normalisation
    pub fn normalization(mut self, normalization: DepthNormalization) -> Self {
        self.config.tiling.normalization = normalization;
        self
    }

    /// Set the boundary cap
    pub fn cap(mut self, cap: SegmentCap) -> Self {
        self.config.tiling.cap = cap;
        self
    }

    /// Set the EVEN baseline spacing
    pub fn even(mut self, spacing: EvenSpacing) -> Self {
        self.config.even = spacing;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<SegmentationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
