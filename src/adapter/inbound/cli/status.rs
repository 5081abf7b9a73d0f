//! Handler for the `status` command.

use tracing::debug;

use super::{output, render};
use crate::application::{RegionId, ViewOutcome};
use crate::error::{Error, Result};
use crate::infrastructure::bootstrap::Services;

/// Execute `status`: one provider status poll, rendered once.
///
/// The live poller keeps its previous rows when a poll fails. A one-shot
/// run has no previous rows, so the failure is reported instead.
pub async fn execute(services: &Services) -> Result<()> {
    let selection = services.provider(None);
    debug!(provider = %selection.key, source = %selection.source, "Active provider");
    let poller = services.status_poller().with_active(selection.key);

    let pb = output::spinner("Checking providers");
    let outcome = poller.poll_once().await;
    output::spinner_clear(&pb);

    if outcome == ViewOutcome::Skipped {
        output::error("Provider status unavailable (run with -v for details)");
        return Err(Error::ViewFailed {
            region: RegionId::ProviderStatus.as_str(),
        });
    }
    render::finish_view(&services.page, RegionId::ProviderStatus, outcome)
}
