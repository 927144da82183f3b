//! Notifier that writes notifications to the tracing log.

use tracing::{info, warn};

use crate::board::ports::{Notification, Notifier};

/// Logs every notification; used by shells without a toast area.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::StatusUpdated { task_id, status } => {
                info!(%task_id, %status, "task status updated");
            }
            Notification::StatusUpdateFailed { task_id, reason } => {
                warn!(%task_id, %reason, "task status update failed, change reverted");
            }
            Notification::TaskUpdated { task_id } => info!(%task_id, "task updated"),
            Notification::TaskUpdateFailed { task_id, reason } => {
                warn!(%task_id, %reason, "task update failed, edit reverted");
            }
            Notification::FetchFailed { reason } => warn!(%reason, "could not load tasks"),
            Notification::TaskCreated => info!("task created"),
            Notification::TaskDeleted { task_id } => info!(%task_id, "task deleted"),
            Notification::RequestFailed { reason } => warn!(%reason, "task request failed"),
            Notification::SessionExpired => warn!("session expired, sign in again"),
        }
    }
}
