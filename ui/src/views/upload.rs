use dioxus::prelude::*;
use tracing::{info, warn};

use crate::core::ingest::{parse_dataset_chunked, IngestOptions, UploadError, UploadGeneration};
use crate::core::schema::{DatasetKind, CORE_COLUMNS};
use crate::core::store::DatasetStore;

/// Mode picker, file input and the format help panel.
///
/// `on_loaded` fires once a non-empty dataset has been published to the store.
#[component]
pub fn UploadPage(on_loaded: EventHandler<()>) -> Element {
    let mut store = use_context::<Signal<DatasetStore>>();
    let mut mode = use_signal(|| store.peek().kind());
    let mut file_name = use_signal(|| Option::<String>::None);
    let mut error = use_signal(|| Option::<String>::None);
    let mut generation = use_signal(UploadGeneration::default);

    let on_file = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        let Some(name) = engine.files().into_iter().next() else {
            return;
        };

        error.set(None);
        file_name.set(Some(name.clone()));
        let ticket = generation.with_mut(|g| g.begin());
        let kind = mode();
        info!(file = %name, kind = kind.as_str(), "upload started");

        let read = engine.read_file(&name).await.ok_or(UploadError::Unreadable);
        let Some(read) = generation.peek().keep_if_current(ticket, read) else {
            return;
        };
        let bytes = match read {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(file = %name, "selected file could not be read");
                error.set(Some(err.to_string()));
                return;
            }
        };

        let parsed = parse_dataset_chunked(&bytes, kind, IngestOptions::default(), || {
            generation.peek().is_current(ticket)
        })
        .await;
        let Some(result) = parsed.transpose() else {
            return;
        };

        match store.with_mut(|s| s.accept(result)) {
            Ok(()) => on_loaded.call(()),
            Err(err) => {
                warn!(file = %name, error = ?err, "upload rejected");
                error.set(Some(err.to_string()));
            }
        }
    };

    let on_remove = move |_: MouseEvent| {
        generation.with_mut(|g| g.invalidate());
        file_name.set(None);
        error.set(None);
    };

    rsx! {
        section { class: "page page-upload",
            div { class: "upload",
                div { class: "upload__card",
                    h1 { class: "upload__title", "Upload CSV" }
                    p { class: "upload__subtitle", "Upload your supplier comparison file" }

                    div { class: "upload__mode",
                        label { r#for: "csv-type", "CSV Type" }
                        select {
                            id: "csv-type",
                            value: "{mode().as_str()}",
                            onchange: move |evt| mode.set(DatasetKind::from_value(&evt.value())),
                            option { value: DatasetKind::Flat.as_str(), {DatasetKind::Flat.label()} }
                            option { value: DatasetKind::Tree.as_str(), {DatasetKind::Tree.label()} }
                        }
                    }

                    // Separate branches remount the input, which clears its selection.
                    if let Some(name) = file_name() {
                        label { class: "upload__box",
                            input {
                                r#type: "file",
                                accept: ".csv",
                                class: "upload__input",
                                onchange: on_file,
                            }
                            span { class: "upload__box-text", "Change file" }
                            span { class: "upload__box-helper", "Only .csv files are supported" }
                        }
                        div { class: "upload__file",
                            span { class: "upload__file-name", "{name}" }
                            button {
                                r#type: "button",
                                class: "upload__remove",
                                onclick: on_remove,
                                "Remove"
                            }
                        }
                    } else {
                        label { class: "upload__box",
                            input {
                                r#type: "file",
                                accept: ".csv",
                                class: "upload__input",
                                onchange: on_file,
                            }
                            span { class: "upload__box-text", "Click to upload CSV" }
                            span { class: "upload__box-helper", "Only .csv files are supported" }
                        }
                    }

                    if let Some(message) = error() {
                        div { class: "upload__error", role: "alert", "{message}" }
                    }
                }

                aside { class: "upload__help",
                    h2 { "What this application does" }
                    p {
                        "The CSV is used to compare supplier pricing for materials or a category tree. "
                        "Once uploaded, the data is shown in a table."
                    }
                    h3 { "Supplier Comparison CSV" }
                    h4 { "Required columns" }
                    ul {
                        for column in CORE_COLUMNS {
                            li { key: "{column}", "{column}" }
                        }
                        li { "Supplier 1 (Rate) … Supplier 5 (Rate)" }
                    }
                    h4 { "Tips" }
                    ul {
                        li { "Headers must match exactly" }
                        li { "Rates should be numeric" }
                    }
                    h3 { "Category Tree CSV" }
                    ul {
                        li { "Include Category, Sub Category 1 and Sub Category 2 columns for the hierarchy." }
                        li { "Item Code, Description, Quantity and Rate describe each item." }
                        li { "Keep rates numeric so the weighted averages add up." }
                    }
                }
            }
        }
    }
}
