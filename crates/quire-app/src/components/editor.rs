//! The editor page: widget, highlighted preview and action buttons.

use dioxus::prelude::*;
use quire_editor_browser::{
    BrowserPlatform, EditorConfig, EditorSession, ExportFormat, LocalStore, QuillWidget,
    SessionPlatform, annotate_blocks, format,
};

/// Id of the element the widget mounts into.
const EDITOR_ID: &str = "quire-editor";

type Session = EditorSession<LocalStore>;

/// Single-document editor.
///
/// The session hydrates from local storage when the page is created. The
/// widget is mounted once the container exists and reports every edit back
/// into the session; saving and downloads only happen on button presses.
#[component]
pub fn EditorPage() -> Element {
    let mut session = use_signal(|| {
        let mut session: Session = EditorSession::new(LocalStore::new(), EditorConfig::default());
        session.mount();
        session
    });
    let mut widget = use_signal(|| None::<QuillWidget>);
    let preview = use_memo(move || session.read().preview_html());

    // Mount the widget once; peek so this effect never re-runs on edits.
    use_effect(move || {
        if widget.peek().is_some() {
            return;
        }
        let (toolbar, initial) = {
            let session = session.peek();
            (
                session.config().toolbar.clone(),
                session.content().to_string(),
            )
        };

        let on_change = move |html: String| {
            let html = match widget.peek().as_ref() {
                Some(w) => {
                    if let Err(e) = annotate_blocks(&w.root(), format::global()) {
                        tracing::warn!("block annotation failed: {e}");
                    }
                    w.html()
                }
                None => html,
            };
            session.write().on_edit(html);
        };

        match QuillWidget::mount(EDITOR_ID, &toolbar, &initial, on_change) {
            Ok(w) => {
                if let Err(e) = annotate_blocks(&w.root(), format::global()) {
                    tracing::warn!("block annotation failed: {e}");
                }
                widget.set(Some(w));
            }
            Err(e) => tracing::error!("editor widget failed to mount: {e}"),
        }
    });

    let on_save = move |_| {
        let platform = BrowserPlatform::new();
        if let Err(e) = session.write().save_and_acknowledge(&platform) {
            tracing::error!("save failed: {e}");
            platform.acknowledge(&format!("Could not save: {e}"));
        }
    };

    let download = move |format: ExportFormat| {
        if let Err(e) = session.read().download(format, &BrowserPlatform::new()) {
            tracing::error!(?format, "download failed: {e}");
        }
    };

    let preview_html = preview.read().clone();

    rsx! {
        div { class: "container",
            div { class: "text-editor",
                h1 { class: "title", "Text Editor" }
                div { id: EDITOR_ID, class: "editor" }
                div { class: "preview", dangerous_inner_html: preview_html }
                div { class: "actions",
                    button { class: "btn btn-save", onclick: on_save, "Save Content" }
                    button {
                        class: "btn btn-word",
                        onclick: move |_| download(ExportFormat::Word),
                        "Download as Word"
                    }
                    button {
                        class: "btn btn-pdf",
                        onclick: move |_| download(ExportFormat::Pdf),
                        "Download as PDF"
                    }
                }
            }
        }
    }
}
