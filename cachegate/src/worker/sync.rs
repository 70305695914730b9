//! Background sync hook.

use tracing::debug;

/// Tag of the sync registration this worker responds to.
pub const SYNC_TAG: &str = "wisdom-sync";

/// Replay actions queued while offline.
///
/// Nothing is queued yet, so this resolves immediately.
pub async fn replay_offline_actions() {
    debug!(tag = SYNC_TAG, "No offline actions to replay");
}
