use super::*;

/// Drains everything background work has reported since the last frame.
pub(super) fn handle_events(
    app: &mut App,
    runtime: &Runtime,
    store: &Arc<IssueStore>,
    event_rx: &Receiver<AppEvent>,
    event_tx: &Sender<AppEvent>,
) {
    while let Ok(event) = event_rx.try_recv() {
        let work = app.handle_event(event);
        main_actions::dispatch(work, runtime, store, event_tx);
    }
}
