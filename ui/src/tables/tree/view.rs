use dioxus::prelude::*;

use crate::core::format::{format_quantity, format_rate};
use crate::core::store::DatasetStore;
use crate::core::tree::NodeLevel;

use super::state::TreeViewState;

#[component]
pub fn TreeTable() -> Element {
    let store = use_context::<Signal<DatasetStore>>();
    let mut view = use_signal(TreeViewState::new);

    let state = view.read();
    let dataset = store.read();
    let rows = state.visible_rows(dataset.forest());

    rsx! {
        section { class: "tree",
            div { class: "tree__scroll",
                table { class: "tree-table",
                    thead {
                        tr {
                            th { class: "tree-table__head", "Category / Item" }
                            th { class: "tree-table__head tree-table__head--numeric", "Est. Rate" }
                            th { class: "tree-table__head tree-table__head--numeric", "Qty" }
                        }
                    }
                    tbody {
                        { rows.iter().map(|row| {
                            let id = row.node.id.clone();
                            let glyph = row.toggle_glyph();
                            let label_class = if row.node.level == NodeLevel::Item {
                                "tree-table__label"
                            } else {
                                "tree-table__label tree-table__label--group"
                            };
                            rsx! {
                                tr { key: "{row.key}", class: "tree-table__row",
                                    td {
                                        class: label_class,
                                        style: "padding-left: {row.indent_px()}px;",
                                        if row.has_children {
                                            span {
                                                class: "tree-table__toggle",
                                                role: "button",
                                                onclick: move |_| view.with_mut(|v| v.toggle(&id)),
                                                "{glyph}"
                                            }
                                        }
                                        "{row.node.label}"
                                    }
                                    td { class: "tree-table__cell tree-table__cell--numeric",
                                        {format_rate(row.node.est_rate)}
                                    }
                                    td { class: "tree-table__cell tree-table__cell--numeric",
                                        {format_quantity(row.node.total_qty)}
                                    }
                                }
                            }
                        })}
                    }
                }
            }
        }
    }
}
