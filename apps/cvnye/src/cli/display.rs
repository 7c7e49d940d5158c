//! Terminal formatting for the review screen and the progress line.

use std::io::Write;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::render::render_document;
use crate::workflow::ReviewView;

const RULE: &str = "────────────────────────────────────────────────────────────";

/// Suggestions, keywords, then the plain-text preview in the selected template.
pub fn format_review(view: &ReviewView<'_>) -> String {
    let mut out = String::new();

    out.push_str("Suggestions\n");
    if view.analysis.suggestions.is_empty() {
        out.push_str("  (none)\n");
    }
    for (i, suggestion) in view.analysis.suggestions.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, suggestion));
    }

    out.push_str("\nKeywords\n  ");
    if view.analysis.keywords.is_empty() {
        out.push_str("(none)");
    } else {
        out.push_str(&view.analysis.keywords.join(", "));
    }
    out.push('\n');

    out.push_str(&format!("\nPreview ({} template)\n{RULE}\n", view.template));
    out.push_str(&render_document(view.record, view.template).plain_text());
    out.push_str(RULE);
    out.push('\n');
    out
}

/// Prints progress to stderr until 100% is seen or the task is aborted.
pub fn spawn_progress_printer(mut rx: watch::Receiver<u8>) -> JoinHandle<()> {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let pct = *rx.borrow_and_update();
            if pct == 0 {
                continue;
            }
            eprint!("\rProcessing... {pct:>3}%");
            let _ = std::io::stderr().flush();
            if pct >= 100 {
                eprintln!();
                break;
            }
        }
    })
}
