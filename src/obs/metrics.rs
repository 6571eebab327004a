// self
use crate::obs::AcquisitionOutcome;

/// Records an acquisition outcome via the global metrics recorder (when enabled).
pub fn record_acquisition_outcome(outcome: AcquisitionOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("silent_bearer_acquisition_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
