mod app_core;
mod clipboard;
mod yew_app;

fn main() {
    console_error_panic_hook::set_once();
    yew_app::run();
}
