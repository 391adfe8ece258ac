//! Car Catalog Frontend Entry Point

use car_catalog_ui::{app::App, logger};
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
    mount_to_body(App);
}
