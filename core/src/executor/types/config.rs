use serde::{Deserialize, Serialize};

use super::result::ExecutionMode;

/// Executor configuration (`[executor]` in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutorConfig {
    #[serde(default)]
    pub mode: ModeKind,

    /// Upper bound on items in flight in parallel mode. Values below 1 act as 1.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    #[serde(default)]
    pub pacing: PacingConfig,

    /// Tool consulted for every placed task; `None` disables the call.
    #[serde(default = "default_tool")]
    pub tool: Option<String>,

    /// Hits requested from the note lookup per task.
    #[serde(default = "default_notes_limit")]
    pub notes_limit: usize,

    /// Characters of each hit shown in the log.
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,

    /// ASCII-only markers (no emoji)
    #[serde(default)]
    pub ascii: bool,

    /// Enable visual progress bar
    #[serde(default)]
    pub progress_bar: bool,
}

fn default_max_workers() -> usize {
    3
}

fn default_tool() -> Option<String> {
    Some("web_search".to_string())
}

fn default_notes_limit() -> usize {
    2
}

fn default_snippet_chars() -> usize {
    600
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            mode: ModeKind::default(),
            max_workers: default_max_workers(),
            pacing: PacingConfig::default(),
            tool: default_tool(),
            notes_limit: default_notes_limit(),
            snippet_chars: default_snippet_chars(),
            ascii: false,
            progress_bar: false,
        }
    }
}

impl ExecutorConfig {
    pub fn execution_mode(&self) -> ExecutionMode {
        match self.mode {
            ModeKind::Sequential => ExecutionMode::Sequential,
            ModeKind::Parallel => ExecutionMode::Parallel {
                max_workers: self.max_workers.max(1),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeKind {
    #[default]
    Sequential,
    Parallel,
}

/// Demo pacing for simulated work.
///
/// A task of `d` minutes runs `max(1, d / minutes_per_tick)` ticks of
/// `tick_ms` each. `tick_ms = 0` keeps the progress lines but only yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacingConfig {
    #[serde(default = "default_minutes_per_tick")]
    pub minutes_per_tick: u32,

    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_minutes_per_tick() -> u32 {
    20
}

fn default_tick_ms() -> u64 {
    200
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            minutes_per_tick: default_minutes_per_tick(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl PacingConfig {
    /// No sleeping; used by `--fast` and tests.
    pub fn instant() -> Self {
        Self {
            tick_ms: 0,
            ..Self::default()
        }
    }

    pub fn ticks_for(&self, duration_minutes: u32) -> u32 {
        (duration_minutes / self.minutes_per_tick.max(1)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_scale_with_duration() {
        let pacing = PacingConfig::default();
        assert_eq!(pacing.ticks_for(5), 1);
        assert_eq!(pacing.ticks_for(60), 3);
        assert_eq!(pacing.ticks_for(90), 4);
    }

    #[test]
    fn zero_workers_are_clamped() {
        let cfg = ExecutorConfig {
            mode: ModeKind::Parallel,
            max_workers: 0,
            ..ExecutorConfig::default()
        };
        assert_eq!(
            cfg.execution_mode(),
            ExecutionMode::Parallel { max_workers: 1 }
        );
    }

    #[test]
    fn parses_from_toml_with_defaults() {
        let cfg: ExecutorConfig = toml::from_str("mode = \"parallel\"\n[pacing]\ntick_ms = 0").unwrap();
        assert_eq!(cfg.mode, ModeKind::Parallel);
        assert_eq!(cfg.max_workers, 3);
        assert_eq!(cfg.pacing.tick_ms, 0);
        assert_eq!(cfg.pacing.minutes_per_tick, 20);
        assert_eq!(cfg.tool.as_deref(), Some("web_search"));
    }
}
