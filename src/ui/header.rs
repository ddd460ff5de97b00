use crate::utils::constants::APP_NAME;

const TAGLINE: &str = "Track newly deployed tokens on Ethereum & Binance Smart Chain";
const LIVE_MARKER: &str = "● Live";

pub fn render_header() -> String {
    format!("🔍 {}    {}\n{}", APP_NAME, LIVE_MARKER, TAGLINE)
}
