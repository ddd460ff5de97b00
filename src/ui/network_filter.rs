use crate::core::query_state::NetworkFilter;

/// Filter buttons with the active one marked
pub fn render_network_filter(selected: NetworkFilter) -> String {
    let buttons: Vec<String> = NetworkFilter::OPTIONS
        .iter()
        .map(|option| {
            if *option == selected {
                format!("[● {}]", option.label())
            } else {
                format!("[  {}]", option.label())
            }
        })
        .collect();
    format!("Filter by Network: {}", buttons.join(" "))
}
