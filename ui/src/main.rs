#![allow(non_snake_case)]

mod catalog;
mod components;
mod config;
mod mint_status;
mod state;

use std::sync::{Arc, Mutex};

use dioxus::prelude::*;
use dotenv::dotenv;

use catalog::Catalog;
use state::{SharedMintClient, WalletState};

const STYLE: &str = include_str!("../assets/style.css");
const CATALOG_JSON: &str = include_str!("../assets/nfts.json");

#[derive(Routable, Clone, PartialEq)]
enum Route {
    #[layout(Layout)]
    #[redirect("/", || Route::SelectMint {})]
    #[redirect("/:.._rest", |_rest: Vec<String>| Route::SelectMint {})]
    #[route("/select-mint")]
    SelectMint {},
    #[route("/random-mint")]
    RandomMint {},
}

fn main() {
    dotenv().ok();
    env_logger::init();

    let config = match config::AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };
    let catalog = match Catalog::parse(CATALOG_JSON) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::error!("catalog error: {e}");
            std::process::exit(1);
        }
    };

    log::info!(
        "candy machine {} on {}",
        config.candy_machine,
        config.rpc_url
    );

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .with_context(catalog)
        .launch(App);
}

#[component]
fn App() -> Element {
    // Provide shared state to all components
    use_context_provider(|| Signal::new(WalletState::default()));
    use_context_provider::<SharedMintClient>(|| Arc::new(Mutex::new(None)));

    rsx! {
        document::Style { {STYLE} }
        Router::<Route> {}
    }
}

// ---------------------------------------------------------------------------
// Layout: top bar + content
// ---------------------------------------------------------------------------

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app-container",
            components::layout::TopBar {}
            div { class: "main-content",
                Outlet::<Route> {}
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Route components: thin wrappers around the page components
// ---------------------------------------------------------------------------

#[component]
fn SelectMint() -> Element {
    rsx! { components::select_mint::SelectMintPage {} }
}

#[component]
fn RandomMint() -> Element {
    rsx! { components::random_mint::RandomMintPage {} }
}
