use leptos::*;
use movie_catalog_client::App;

fn main() {
    console_error_panic_hook::set_once();
    // only fails when a logger is already installed
    let _ = console_log::init_with_level(log::Level::Debug);
    log::info!("Starting movie catalog client");
    mount_to_body(|cx| view! { cx, <App/> })
}
