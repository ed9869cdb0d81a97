use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::store::DatasetStore;
use ui::views::{TablePage, UploadPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Upload {},
    #[route("/table")]
    Table {},
}

fn nav_upload(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Upload {},
        "{label}"
    })
}
fn nav_table(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Table {},
        "{label}"
    })
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    register_nav(NavBuilder {
        upload: nav_upload,
        table: nav_table,
    });

    // One store for the whole session; pages read and write it through context.
    use_context_provider(|| Signal::new(DatasetStore::new()));

    rsx! {
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        Router::<Route> {}
    }
}

#[component]
fn Upload() -> Element {
    let nav = navigator();
    rsx! {
        UploadPage {
            on_loaded: move |_| {
                nav.push(Route::Table {});
            },
        }
    }
}

#[component]
fn Table() -> Element {
    let nav = navigator();
    rsx! {
        TablePage {
            on_back: move |_| {
                nav.push(Route::Upload {});
            },
        }
    }
}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
