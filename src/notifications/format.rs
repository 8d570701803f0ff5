//! Message formatting for new-project announcements
//!
//! Output uses Telegram's HTML parse mode. Every upstream value is escaped
//! before it is embedded; only the headline carries markup.

use crate::ranking::Project;

/// Placeholder for absent fields
pub const PLACEHOLDER: &str = "N/A";

/// Detail page prefix used when none is configured
pub const DEFAULT_DETAIL_URL_BASE: &str = "https://movepump.com/token";

/// Format one project as a multi-line HTML message
///
/// Progress is shown with 2 decimals and the price with 8 decimals in SUI;
/// absent numbers format as zero, absent text as `N/A`.
pub fn format_project_message(project: &Project, detail_url_base: &str) -> String {
    let detail_url = format!(
        "{}/{}",
        detail_url_base.trim_end_matches('/'),
        text_or_placeholder(&project.coin_type)
    );

    [
        "🚀 <b>MovePump New Project</b> 🚀".to_string(),
        format!("📛 Name: {}", escape(&project.token_name)),
        format!("🏷️ Symbol: {}", text_or_placeholder(&project.token_symbol)),
        format!("📈 Buy Progress: {:.2}%", project.progress()),
        format!(
            "💰 Current Price: {:.8} SUI",
            project.current_price_sui.unwrap_or(0.0)
        ),
        format!("🌐 Website: {}", text_or_placeholder(&project.link_website)),
        format!("🔗 Twitter: {}", text_or_placeholder(&project.link_twitter)),
        format!("📣 Telegram: {}", text_or_placeholder(&project.link_telegram)),
        format!("📜 Contract: {}", text_or_placeholder(&project.created_address)),
        format!("📅 Created: {}", text_or_placeholder(&project.created_at)),
        format!("🔗 Details: {}", detail_url),
    ]
    .join("\n")
}

fn text_or_placeholder(value: &Option<String>) -> String {
    match value {
        Some(text) => escape(text),
        None => PLACEHOLDER.to_string(),
    }
}

fn escape(text: &str) -> String {
    htmlescape::encode_minimal(text)
}
