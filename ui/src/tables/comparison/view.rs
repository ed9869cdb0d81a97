use dioxus::prelude::*;

use crate::core::format::format_cell;
use crate::core::heatmap::{cell_heat, rate_delta};
use crate::core::schema::FlatRow;
use crate::core::sticky::sticky_offset;
use crate::core::store::DatasetStore;

use super::state::{ColumnGroup, ComparisonViewState};

/// One rendered body cell.
struct BodyCell {
    text: String,
    delta: Option<String>,
    style: String,
    pinned: bool,
}

fn body_cells(state: &ComparisonViewState, row: &FlatRow, frozen: Option<usize>) -> Vec<BodyCell> {
    let suppliers = state.supplier_headers();
    state
        .visible_headers()
        .into_iter()
        .enumerate()
        .map(|(col_index, header)| {
            let sticky = sticky_offset(col_index, frozen);
            let mut style = sticky.cell_style();
            if let Some(color) = cell_heat(row, header, suppliers) {
                style.push_str(&format!(" background-color: {color};"));
            }
            BodyCell {
                text: format_cell(row.get(header)),
                delta: rate_delta(row, header, suppliers).map(|d| d.to_string()),
                style,
                pinned: sticky.is_pinned(),
            }
        })
        .collect()
}

#[component]
pub fn ComparisonTable() -> Element {
    let store = use_context::<Signal<DatasetStore>>();
    let mut view = use_signal(|| ComparisonViewState::new(store.peek().headers()));

    let state = view.read();
    let dataset = store.read();
    let frozen = state.frozen_index();
    let rows = state.sorted_rows(dataset.flat_rows());
    let visible = state.visible_headers();

    rsx! {
        section { class: "comparison",
            div { class: "comparison__toolbar",
                div { class: "column-menu",
                    if state.dropdown_open() {
                        div {
                            class: "column-menu__backdrop",
                            onmousedown: move |_| view.with_mut(|v| v.close_dropdown()),
                        }
                    }
                    button {
                        r#type: "button",
                        class: "button button--ghost column-menu__trigger",
                        onclick: move |_| view.with_mut(|v| v.toggle_dropdown()),
                        "Columns ({state.visible_count()}) ▼"
                    }
                    if state.dropdown_open() {
                        div { class: "column-menu__panel",
                            { ColumnGroup::ALL.into_iter().map(|group| render_group(view, &state, group)) }
                        }
                    }
                }

                div { class: "comparison__freeze",
                    label { r#for: "freeze-select", "Freeze columns up to:" }
                    select {
                        id: "freeze-select",
                        value: state.freeze_until().unwrap_or_default(),
                        onchange: move |evt| view.with_mut(|v| v.set_freeze_until(&evt.value())),
                        option { value: "", "None" }
                        { state.headers().iter().map(|header| rsx! {
                            option { key: "{header}", value: "{header}", "{header}" }
                        })}
                    }
                }
            }

            div { class: "comparison__scroll",
                table { class: "comparison-table",
                    thead {
                        tr {
                            { visible.iter().enumerate().map(|(col_index, header)| {
                                let key = header.to_string();
                                let sticky = sticky_offset(col_index, frozen);
                                let marker = state.sort_marker(header);
                                rsx! {
                                    th {
                                        key: "{header}",
                                        class: if sticky.is_pinned() { "comparison-table__head comparison-table__head--pinned" } else { "comparison-table__head" },
                                        style: sticky.header_style(),
                                        onclick: move |_| view.with_mut(|v| v.toggle_sort(&key)),
                                        "{header} "
                                        span { class: "comparison-table__sort", "{marker}" }
                                    }
                                }
                            })}
                        }
                    }
                    tbody {
                        { rows.iter().enumerate().map(|(index, row)| {
                            let cells = body_cells(&state, row, frozen);
                            rsx! {
                                tr {
                                    key: "{index}",
                                    class: if index % 2 == 0 { "comparison-table__row" } else { "comparison-table__row comparison-table__row--odd" },
                                    { cells.into_iter().map(|cell| rsx! {
                                        td {
                                            class: if cell.pinned { "comparison-table__cell comparison-table__cell--pinned" } else { "comparison-table__cell" },
                                            style: "{cell.style}",
                                            "{cell.text}"
                                            if let Some(delta) = cell.delta {
                                                div { class: "comparison-table__delta", "{delta}" }
                                            }
                                        }
                                    })}
                                }
                            }
                        })}
                    }
                }
            }
        }
    }
}

fn render_group(
    mut view: Signal<ComparisonViewState>,
    state: &ComparisonViewState,
    group: ColumnGroup,
) -> Element {
    let columns: Vec<String> = state
        .group_columns(group)
        .into_iter()
        .map(str::to_string)
        .collect();
    let action = state.group_action_label(group);

    rsx! {
        div { key: "{group.label()}", class: "column-menu__group",
            div { class: "column-menu__group-header",
                span { class: "column-menu__group-title", "{group.label()}" }
                button {
                    r#type: "button",
                    class: "button button--accent column-menu__group-action",
                    onclick: move |_| view.with_mut(|v| v.apply_group_action(group)),
                    "{action}"
                }
            }
            { columns.into_iter().map(|column| {
                let checked = state.is_visible(&column);
                let key = column.clone();
                rsx! {
                    label { key: "{column}", class: "column-menu__option",
                        input {
                            r#type: "checkbox",
                            checked,
                            onchange: move |_| view.with_mut(|v| v.toggle_column(&key)),
                        }
                        "{column}"
                    }
                }
            })}
        }
    }
}
