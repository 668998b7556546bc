use receipt_ledger_frontend::components::{App, AppProps};
use receipt_ledger_frontend::config::load_config;

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    let config = load_config();
    log::info!("expense view starting against '{}'", config.list_url());
    yew::Renderer::<App>::with_props(AppProps { config }).render();
}
