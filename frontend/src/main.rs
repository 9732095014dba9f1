use log::{error, info};
use site_frontend::{config, dom, init_page};

fn start() {
    if let Err(e) = init_page() {
        error!("Failed to initialize page scripts: {}", e);
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    if console_log::init_with_level(config::log_level()).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    info!("Starting page scripts");

    let document = match dom::document() {
        Ok(document) => document,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    if document.ready_state() == "loading" {
        if let Err(e) = dom::listen(&document, "DOMContentLoaded", |_| start()) {
            error!("Failed to wait for DOMContentLoaded: {}", e);
        }
    } else {
        start();
    }
}
