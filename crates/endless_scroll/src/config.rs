//! Infinite scroll configuration
//!
//! Configuration can be built in code with the builder-style setters or
//! loaded from TOML. A file may hold the settings at the top level or under
//! an `[infinite_scroll]` table:
//!
//! ```toml
//! [infinite_scroll]
//! indicator_margin = 40.0
//! trigger_offset = 500.0
//! defer_callback_while_scrolling = false
//!
//! [infinite_scroll.defer_policy]
//! kind = "after_delay"
//! delay_ms = 100
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use endless_animation::{AnimationSpec, Easing};
use serde::{Deserialize, Serialize};

use crate::error::{EndlessError, Result};
use crate::indicator::{IndicatorStyle, DEFAULT_INDICATOR_MARGIN};

/// Table name used when the config lives inside a larger file
pub const CONFIG_TABLE: &str = "infinite_scroll";

/// How long a deferred load callback waits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeferPolicy {
    /// Wait a fixed delay, and never fire while the user is still scrolling
    AfterDelay { delay_ms: u64 },
    /// Wait until scrolling comes to rest
    ScrollSettled,
}

impl DeferPolicy {
    pub fn delay(&self) -> Option<Duration> {
        match self {
            DeferPolicy::AfterDelay { delay_ms } => Some(Duration::from_millis(*delay_ms)),
            DeferPolicy::ScrollSettled => None,
        }
    }
}

impl Default for DeferPolicy {
    fn default() -> Self {
        DeferPolicy::AfterDelay { delay_ms: 100 }
    }
}

/// Configuration for infinite scroll behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfiniteScrollConfig {
    /// Vertical margin above and below the indicator (default: 11)
    pub indicator_margin: f32,
    /// Distance before the real end of content at which loading starts (default: 0)
    pub trigger_offset: f32,
    /// Hold the load callback until scrolling settles (default: true)
    pub defer_callback_while_scrolling: bool,
    /// How a deferred callback waits
    pub defer_policy: DeferPolicy,
    /// Suppress the indicator and the trigger entirely
    pub hidden: bool,
    /// Style of the default spinner
    pub indicator_style: IndicatorStyle,
    /// Inset transition; a zero duration applies changes without animation
    pub inset_animation: AnimationSpec,
}

impl Default for InfiniteScrollConfig {
    fn default() -> Self {
        Self {
            indicator_margin: DEFAULT_INDICATOR_MARGIN,
            trigger_offset: 0.0,
            defer_callback_while_scrolling: true,
            defer_policy: DeferPolicy::default(),
            hidden: false,
            indicator_style: IndicatorStyle::default(),
            inset_animation: AnimationSpec::default(),
        }
    }
}

impl InfiniteScrollConfig {
    /// Set the indicator margin
    pub fn indicator_margin(mut self, margin: f32) -> Self {
        self.indicator_margin = margin;
        self
    }

    /// Set the trigger offset; negative values are treated as their magnitude
    pub fn trigger_offset(mut self, offset: f32) -> Self {
        self.trigger_offset = offset.abs();
        self
    }

    /// Call the load handler while the user is still scrolling
    pub fn call_while_scrolling(mut self) -> Self {
        self.defer_callback_while_scrolling = false;
        self
    }

    /// Set how deferred callbacks wait
    pub fn defer_policy(mut self, policy: DeferPolicy) -> Self {
        self.defer_callback_while_scrolling = true;
        self.defer_policy = policy;
        self
    }

    /// Set whether the indicator is hidden
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Set the default spinner style
    pub fn indicator_style(mut self, style: IndicatorStyle) -> Self {
        self.indicator_style = style;
        self
    }

    /// Set the inset transition
    pub fn inset_animation(mut self, spec: AnimationSpec) -> Self {
        self.inset_animation = spec;
        self
    }

    /// Apply inset changes without animation
    pub fn without_animation(self) -> Self {
        self.inset_animation(AnimationSpec::instant())
    }

    /// Whether inset changes are animated
    pub fn is_animated(&self) -> bool {
        self.inset_animation.duration > 0.0
    }

    /// Parse from TOML text, accepting a bare table or an `[infinite_scroll]` table
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let mut table: toml::Table = toml::from_str(input)?;
        let value = match table.remove(CONFIG_TABLE) {
            Some(section) => section,
            None => toml::Value::Table(table),
        };

        let config: Self = value.try_into()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded infinite scroll config");
        Ok(config)
    }

    /// Serialize under an `[infinite_scroll]` table
    pub fn to_toml(&self) -> Result<String> {
        let mut root = toml::Table::new();
        root.insert(CONFIG_TABLE.to_string(), toml::Value::try_from(self)?);
        Ok(toml::to_string_pretty(&root)?)
    }

    /// Reject values the scroll machinery can't use
    pub fn validate(&self) -> Result<()> {
        if !self.indicator_margin.is_finite() || self.indicator_margin < 0.0 {
            return Err(EndlessError::InvalidConfig(format!(
                "indicator_margin must be a non-negative number, got {}",
                self.indicator_margin
            )));
        }
        if !self.trigger_offset.is_finite() {
            return Err(EndlessError::InvalidConfig(format!(
                "trigger_offset must be finite, got {}",
                self.trigger_offset
            )));
        }
        if !self.inset_animation.duration.is_finite() || self.inset_animation.duration < 0.0 {
            return Err(EndlessError::InvalidConfig(format!(
                "inset_animation.duration must be a non-negative number of seconds, got {}",
                self.inset_animation.duration
            )));
        }
        if let Easing::CubicBezier(x1, _, x2, _) = self.inset_animation.easing {
            if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
                return Err(EndlessError::InvalidConfig(
                    "cubic bezier x control points must lie in [0, 1]".to_string(),
                ));
            }
        }
        Ok(())
    }
}
