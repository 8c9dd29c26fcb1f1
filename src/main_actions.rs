use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{info, warn};

use super::*;
use crate::app::PendingWork;
use crate::store::{FETCH_BUDGET, IssueKey};

/// Starts each work item on the runtime or a helper thread; results come back as events.
pub(super) fn dispatch(
    work: Vec<PendingWork>,
    runtime: &Runtime,
    store: &Arc<IssueStore>,
    event_tx: &Sender<AppEvent>,
) {
    for item in work {
        match item {
            PendingWork::FetchIssues {
                request_id,
                source_keys,
                force,
            } => start_issue_fetch(runtime, store, request_id, source_keys, force, event_tx),
            PendingWork::FetchComments { request_id, key } => {
                start_comment_fetch(runtime, store, request_id, key, event_tx)
            }
            PendingWork::OpenBrowser(url) => {
                let event_tx = event_tx.clone();
                thread::spawn(move || {
                    let result = open_url(&url)
                        .map(|()| format!("Opened {}", url))
                        .map_err(|error| {
                            warn!(%url, %error, "failed to open browser");
                            format!("Failed to open browser: {}", error)
                        });
                    let _ = event_tx.send(AppEvent::ExternalActionFinished(result));
                });
            }
            PendingWork::CopyToClipboard(text) => {
                let event_tx = event_tx.clone();
                thread::spawn(move || {
                    let result = copy_to_clipboard(&text)
                        .map(|()| "Copied issue description".to_string())
                        .map_err(|error| {
                            warn!(%error, "failed to copy to clipboard");
                            format!("Failed to copy: {}", error)
                        });
                    let _ = event_tx.send(AppEvent::ExternalActionFinished(result));
                });
            }
        }
    }
}

fn start_issue_fetch(
    runtime: &Runtime,
    store: &Arc<IssueStore>,
    request_id: u64,
    source_keys: Vec<String>,
    force: bool,
    event_tx: &Sender<AppEvent>,
) {
    let store = Arc::clone(store);
    let event_tx = event_tx.clone();
    runtime.spawn(async move {
        if force {
            for source_key in &source_keys {
                store.invalidate(source_key);
            }
        }
        info!(request_id, force, "refreshing issues");
        let result = store.get_issues(&source_keys).await.map_err(|error| {
            warn!(request_id, %error, "issue fetch failed");
            error.to_string()
        });
        let _ = event_tx.send(AppEvent::IssuesFetched { request_id, result });
    });
}

fn start_comment_fetch(
    runtime: &Runtime,
    store: &Arc<IssueStore>,
    request_id: u64,
    key: IssueKey,
    event_tx: &Sender<AppEvent>,
) {
    let source = store.source();
    let event_tx = event_tx.clone();
    runtime.spawn(async move {
        let fetch = source.fetch_comments(&key.source_key, key.id);
        let result = match tokio::time::timeout(FETCH_BUDGET, fetch).await {
            Ok(Ok(comments)) => Ok(comments),
            Ok(Err(error)) => Err(error_chain(&error)),
            Err(_) => Err(format!("timed out after {}s", FETCH_BUDGET.as_secs())),
        };
        if let Err(message) = &result {
            warn!(source = %key.source_key, issue = key.id, %message, "comment fetch failed");
        }
        let _ = event_tx.send(AppEvent::CommentsFetched {
            request_id,
            key,
            result,
        });
    });
}

/// Renders as "context: cause: root cause".
fn error_chain(error: &anyhow::Error) -> String {
    format!("{:#}", error)
}

fn open_url(url: &str) -> Result<()> {
    if cfg!(target_os = "macos") {
        return run_silent_command(Command::new("open").arg(url));
    }

    if cfg!(target_os = "windows") {
        return run_silent_command(Command::new("cmd").args(["/C", "start", url]));
    }

    run_silent_command(Command::new("xdg-open").arg(url))
}

fn run_silent_command(command: &mut Command) -> Result<()> {
    let status = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if status.success() {
        return Ok(());
    }
    anyhow::bail!("command exited with status {}", status)
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut command = if cfg!(target_os = "macos") {
        Command::new("pbcopy")
    } else if cfg!(target_os = "windows") {
        Command::new("clip")
    } else {
        let mut command = Command::new("xclip");
        command.args(["-selection", "clipboard"]);
        command
    };

    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        return Ok(());
    }
    anyhow::bail!("clipboard command exited with status {}", status)
}

#[cfg(test)]
mod tests {
    use super::error_chain;
    use anyhow::{Context, anyhow};

    #[test]
    fn error_chain_keeps_the_root_cause() {
        let error = Err::<(), _>(anyhow!("503 Service Unavailable"))
            .context("Azure/AKS#12: comment request failed")
            .unwrap_err();
        assert_eq!(
            error_chain(&error),
            "Azure/AKS#12: comment request failed: 503 Service Unavailable"
        );
    }
}
