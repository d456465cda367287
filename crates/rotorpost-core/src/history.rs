//! # Force History
//!
//! Iteration-by-iteration rotor force output (`r01forceHist.txt`).
//!
//! Each data line starts with the iteration (or time stamp) followed by CT;
//! any further columns are ignored. Blank lines and `#` comments are skipped.

use crate::PostError;
use crate::primitives::DEFAULT_TRAILING_FRACTION;
use serde::Serialize;

/// One sample of a force history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistorySample {
    pub iteration: f64,
    pub ct: f64,
}

/// A parsed force history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceHistory {
    samples: Vec<HistorySample>,
}

/// Convergence summary of a force history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistorySummary {
    pub samples: usize,
    pub first_iteration: f64,
    pub last_iteration: f64,
    pub final_ct: f64,
    /// Number of trailing samples used for the statistics below.
    pub window: usize,
    pub trailing_mean_ct: f64,
    /// Peak-to-peak CT over the trailing window.
    pub trailing_variation: f64,
}

impl ForceHistory {
    /// Parse a force-history file from text.
    pub fn parse(text: &str) -> Result<Self, PostError> {
        let mut samples = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut fields = trimmed.split_whitespace();
            let mut next_number = |what: &str| -> Result<f64, PostError> {
                let token = fields
                    .next()
                    .ok_or_else(|| PostError::parse(idx + 1, format!("missing {}", what)))?;
                token
                    .parse()
                    .map_err(|_| PostError::parse(idx + 1, format!("invalid {} '{}'", what, token)))
            };

            let iteration = next_number("iteration")?;
            let ct = next_number("CT")?;
            samples.push(HistorySample { iteration, ct });
        }

        if samples.is_empty() {
            return Err(PostError::InvalidTable(
                "force history has no data lines".to_string(),
            ));
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    /// Summarize with the default trailing window.
    pub fn summary(&self) -> HistorySummary {
        self.summary_with_window(trailing_window(self.samples.len(), DEFAULT_TRAILING_FRACTION))
    }

    /// Summarize using the trailing `fraction` of samples (at least one).
    pub fn summarize(&self, fraction: f64) -> Result<HistorySummary, PostError> {
        if fraction.is_nan() || fraction <= 0.0 || fraction > 1.0 {
            return Err(PostError::InvalidParameter(format!(
                "trailing fraction must be in (0, 1], got {}",
                fraction
            )));
        }
        Ok(self.summary_with_window(trailing_window(self.samples.len(), fraction)))
    }

    fn summary_with_window(&self, window: usize) -> HistorySummary {
        let n = self.samples.len();
        let tail = &self.samples[n - window..];

        let mean = tail.iter().map(|s| s.ct).sum::<f64>() / window as f64;
        let (lo, hi) = tail
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
                (lo.min(s.ct), hi.max(s.ct))
            });

        HistorySummary {
            samples: n,
            first_iteration: self.samples[0].iteration,
            last_iteration: self.samples[n - 1].iteration,
            final_ct: self.samples[n - 1].ct,
            window,
            trailing_mean_ct: mean,
            trailing_variation: hi - lo,
        }
    }
}

fn trailing_window(samples: usize, fraction: f64) -> usize {
    ((samples as f64 * fraction).ceil() as usize).clamp(1, samples.max(1))
}
