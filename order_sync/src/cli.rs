use std::env;

const HELP: &str = include_str!("./cli-help.txt");

/// Settings that are safe to echo back. Credentials other than the client id are left out.
const PUBLIC_SETTINGS: [&str; 9] = [
    "RUST_LOG",
    "AMAZON_OAUTH_CLIENT_ID",
    "OSYNC_MARKETPLACE_ID",
    "OSYNC_CREATED_AFTER",
    "OSYNC_PAGE_SIZE",
    "OSYNC_DATABASE_URL",
    "OSYNC_MAX_DB_CONNECTIONS",
    "OSYNC_TOKEN_ENDPOINT",
    "OSYNC_ORDERS_ENDPOINT",
];

/// `order_sync` has no options. Any argument prints the help text and the current settings, and the caller should exit.
///
/// Returns `true` if the help was printed.
pub fn handle_command_line_args() -> bool {
    if env::args().len() <= 1 {
        return false;
    }
    println!("\n{HELP}\n");
    println!("{}", settings_report(|name| env::var(name).ok()));
    true
}

fn settings_report<F>(lookup: F) -> String
where F: Fn(&str) -> Option<String> {
    let lines = PUBLIC_SETTINGS
        .iter()
        .map(|name| format!("  {name:<30} {}", lookup(name).unwrap_or_else(|| "(not set)".to_string())))
        .collect::<Vec<_>>();
    format!("Current settings (secrets are not shown):\n{}", lines.join("\n"))
}
