use chrono::{DateTime, Utc};
use esratio_core::classify::{classify, Thresholds};
use esratio_core::executor::{execute, QueryError, QueryExecutor};
use esratio_core::kibana;
use esratio_core::measurement::{MeasurementRequest, MeasurementResult, MeasurementSpec};
use esratio_core::ratio::{evaluate, RatioOutcome};
use esratio_core::status::Status;
use esratio_core::window::WindowSpec;

/// Everything one check run needs, assembled from the CLI surface.
///
/// The two sides are built as independent immutable requests from this
/// shared configuration; nothing is mutated between the evaluations.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub dividend: MeasurementSpec,
    pub divisor: MeasurementSpec,
    pub window: WindowSpec,
    pub thresholds: Thresholds,
    pub zero_divisor_ok: bool,
    pub kibana_url: String,
}

/// Final report of a check run: the single status line and its exit status.
#[derive(Debug)]
pub struct CheckReport {
    pub status: Status,
    pub message: String,
}

/// Run the check: execute dividend then divisor strictly in sequence,
/// combine the results, classify, and compose the status line.
///
/// A missing index on either side degrades instead of aborting: under
/// normal polarity the check reports OK with "no results found"; under
/// inverted polarity classification proceeds with the last computed ratio
/// (zero when none was computed).
///
/// # Errors
///
/// Any query failure other than [`QueryError::NotFound`] is fatal and
/// propagates to the caller.
pub async fn run_check(
    executor: &dyn QueryExecutor,
    config: &CheckConfig,
    now: DateTime<Utc>,
) -> Result<CheckReport, QueryError> {
    let window = config.window.resolve(now);
    let dividend_request = config.dividend.build(window);
    let divisor_request = config.divisor.build(window);

    let dividend = execute_side(executor, &dividend_request, "dividend").await?;
    let divisor = execute_side(executor, &divisor_request, "divisor").await?;

    let (status, reason, ratio) = match (dividend, divisor) {
        (Some(dividend), Some(divisor)) => {
            let outcome = evaluate(&dividend, &divisor, config.zero_divisor_ok);
            let (status, reason) = classify(&outcome, &config.thresholds);
            let ratio = match outcome {
                RatioOutcome::Ratio(value) => Some(value),
                _ => None,
            };
            (status, reason, ratio)
        }
        _ if config.thresholds.invert => {
            // Inverted polarity never takes the "no results" shortcut: the
            // missing side still classifies against the initial zero ratio.
            tracing::warn!("Missing index under inverted polarity; classifying ratio 0.00");
            let (status, reason) = classify(&RatioOutcome::Ratio(0.0), &config.thresholds);
            (status, reason, Some(0.0))
        }
        _ => (Status::Ok, "no results found".to_string(), None),
    };

    let mut message = reason;
    if matches!(status, Status::Warning | Status::Critical) {
        let link = kibana::build_link(
            &config.kibana_url,
            &dividend_request.index,
            &dividend_request.query,
            &dividend_request.timestamp_field,
            &window,
        );
        if !link.is_empty() {
            message.push(' ');
            message.push_str(&link);
        }
    }
    if let Some(value) = ratio {
        message.push_str(&format!(
            " | ratio={value};{};{};0;",
            config.thresholds.warning, config.thresholds.critical
        ));
    }

    Ok(CheckReport { status, message })
}

async fn execute_side(
    executor: &dyn QueryExecutor,
    request: &MeasurementRequest,
    side: &str,
) -> Result<Option<MeasurementResult>, QueryError> {
    match execute(executor, request).await {
        Ok(result) => {
            tracing::debug!(
                side,
                index = %request.index,
                value = result.value,
                "Measurement complete"
            );
            Ok(Some(result))
        }
        Err(err) if err.is_not_found() => {
            tracing::warn!(side, index = %request.index, "Index not found for the queried window");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
