use crate::ratio::RatioOutcome;
use crate::status::Status;

/// Alerting thresholds plus polarity. Supplied once per run, never mutated.
///
/// No ordering between warning and critical is validated; critical is
/// always evaluated first regardless of how the two compare numerically.
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub warning: f64,
    pub critical: f64,
    /// Inverted polarity: low ratios are unhealthy instead of high ones.
    pub invert: bool,
}

/// Map a ratio outcome to a check status and a human-readable reason.
///
/// Comparison is strict: a ratio exactly equal to a threshold does not
/// trigger that level.
pub fn classify(outcome: &RatioOutcome, thresholds: &Thresholds) -> (Status, String) {
    match outcome {
        RatioOutcome::ZeroDivisorOk => {
            (Status::Ok, "divisor is zero, failing safe".to_string())
        }
        RatioOutcome::ZeroDivisorCritical => (
            Status::Critical,
            "divisor is zero, raising alert".to_string(),
        ),
        RatioOutcome::Ratio(value) => classify_ratio(*value, thresholds),
    }
}

fn classify_ratio(value: f64, thresholds: &Thresholds) -> (Status, String) {
    if thresholds.invert {
        if value < thresholds.critical {
            (
                Status::Critical,
                format!(
                    "ratio {value:.2} below critical threshold {}",
                    thresholds.critical
                ),
            )
        } else if value < thresholds.warning {
            (
                Status::Warning,
                format!(
                    "ratio {value:.2} below warning threshold {}",
                    thresholds.warning
                ),
            )
        } else {
            (Status::Ok, format!("ratio {value:.2} within thresholds"))
        }
    } else if value > thresholds.critical {
        (
            Status::Critical,
            format!(
                "ratio {value:.2} above critical threshold {}",
                thresholds.critical
            ),
        )
    } else if value > thresholds.warning {
        (
            Status::Warning,
            format!(
                "ratio {value:.2} above warning threshold {}",
                thresholds.warning
            ),
        )
    } else {
        (Status::Ok, format!("ratio {value:.2} within thresholds"))
    }
}
