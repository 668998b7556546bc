use serde::{Deserialize, Serialize};

/// `<meta name="expense-view-config" content='{..}'>` on the host page.
pub const CONFIG_META_NAME: &str = "expense-view-config";

/// Which optional parts of the page exist.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Panels {
    pub upload_form: bool,
    pub expense_list: bool,
    pub chart: bool,
    pub receipt_detail: bool,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            upload_form: true,
            expense_list: true,
            chart: true,
            receipt_detail: false,
        }
    }
}

impl Panels {
    /// The list is fetched on page load only if something will show it.
    pub fn wants_initial_load(&self) -> bool {
        self.expense_list || self.chart
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewConfig {
    pub api_base_url: String,
    pub upload_path: String,
    pub list_path: String,
    pub notification_timeout_ms: u32,
    pub currency_symbol: String,
    pub panels: Panels,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            upload_path: "/upload_receipt".to_string(),
            list_path: "/get_expenses".to_string(),
            notification_timeout_ms: 5000,
            currency_symbol: "$".to_string(),
            panels: Panels::default(),
        }
    }
}

impl ViewConfig {
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(config) => Some(config),
            Err(err) => {
                log::warn!("ignoring unreadable page config: {}", err);
                None
            }
        }
    }

    pub fn upload_url(&self) -> String {
        join_url(&self.api_base_url, &self.upload_path)
    }

    pub fn list_url(&self) -> String {
        join_url(&self.api_base_url, &self.list_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub fn load_config() -> ViewConfig {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            let selector = format!("meta[name=\"{}\"]", CONFIG_META_NAME);
            if let Ok(Some(meta)) = document.query_selector(&selector) {
                if let Some(raw) = meta.get_attribute("content") {
                    if let Some(config) = ViewConfig::from_json(&raw) {
                        return config;
                    }
                }
            }
        }
    }
    ViewConfig::default()
}
