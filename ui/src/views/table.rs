use dioxus::prelude::*;

use crate::core::schema::DatasetKind;
use crate::core::store::DatasetStore;
use crate::tables::{ComparisonTable, TreeTable};

#[component]
pub fn TablePage(on_back: EventHandler<()>) -> Element {
    let mut store = use_context::<Signal<DatasetStore>>();

    let go_back = move |_: MouseEvent| {
        on_back.call(());
        store.with_mut(|s| s.clear());
    };

    let dataset = store.read();
    if dataset.is_empty() {
        return rsx! {
            section { class: "page page-table page-table--empty",
                div { class: "empty-state",
                    h2 { "No CSV Data Found" }
                    p { "Upload a CSV file to see it here." }
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        onclick: go_back,
                        "Go Back to Upload"
                    }
                }
            }
        };
    }

    let kind = dataset.kind();
    let row_count = dataset.rows().len();

    rsx! {
        section { class: "page page-table",
            div { class: "page-table__header",
                div {
                    h1 { class: "page-table__title", {kind.label()} }
                    p { class: "page-table__meta", "{row_count} rows" }
                }
                button {
                    r#type: "button",
                    class: "button button--ghost",
                    onclick: go_back,
                    "Go Back"
                }
            }
            div { class: "page-table__body",
                {match kind {
                    DatasetKind::Flat => rsx! { ComparisonTable {} },
                    DatasetKind::Tree => rsx! { TreeTable {} },
                }}
            }
        }
    }
}
