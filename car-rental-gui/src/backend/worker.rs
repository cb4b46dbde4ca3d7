use std::sync::mpsc;

use crate::state::{AppMessage, BackgroundOperation, next_operation_id};

/// Spawn a background operation with the standard boilerplate:
/// allocates an operation ID, clones the message sender, and spawns a
/// thread that runs the provided closure and delivers its message.
///
/// The closure receives the operation ID. When `repaint` is set the UI is
/// woken after the message is sent. Returns the operation record for the
/// caller to track.
pub fn spawn_background_op<F>(
    tx: &mpsc::Sender<AppMessage>,
    repaint: Option<egui::Context>,
    description: String,
    work: F,
) -> BackgroundOperation
where
    F: FnOnce(u64) -> AppMessage + Send + 'static,
{
    let op_id = next_operation_id();
    let tx = tx.clone();

    log::debug!("Starting operation {}: {}", op_id, description);
    std::thread::spawn(move || {
        let message = work(op_id);
        // A closed channel means the window is gone; nothing left to update.
        if tx.send(message).is_ok()
            && let Some(ctx) = repaint
        {
            ctx.request_repaint();
        }
    });

    BackgroundOperation::new(op_id, description)
}
