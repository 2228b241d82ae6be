use clap::Parser;
use wasm_bindgen::prelude::*;

mod contact;
mod game;
mod settings;
mod storage;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).unwrap_or_else(|err| {
        gloo::console::warn!(format!("ignoring url arguments: {err}"));
        Args::parse_from([""])
    });
    if let Some(log_level) = args.verbose.log_level() {
        if let Err(err) = console_log::init_with_level(log_level) {
            gloo::console::error!(format!("error initializing logger: {err}"));
        }
    }
    log::debug!("args: {:?}", args);

    match document().get_element_by_id("game") {
        Some(root) => {
            yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
        }
        None => log::error!("could not find id=\"game\" element"),
    }

    if let Some(root) = document().get_element_by_id("contact") {
        yew::Renderer::<contact::ContactForm>::with_root(root).render();
    }

    log::debug!("App started");
}
