use std::{env, env::VarError};

/// There's no real CLI for the server, so just do quick 'n dirty
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        // We don't expect any CLI args, so always print the help
        display_readme();
        display_envs();
    }
    has_cli_args
}

fn display_readme() {
    const README: &str = include_str!("./cli-help.txt");
    println!("\n{README}\n");
}

fn display_envs() {
    // Secrets (WALLET_JWT_SECRET, RAZORPAY_KEY_SECRET) are deliberately left off this list
    const DISPLAY_ENVS: [&str; 10] = [
        "RUST_LOG",
        "WALLET_HOST",
        "WALLET_PORT",
        "WALLET_DATABASE_URL",
        "WALLET_DB_MAX_CONNECTIONS",
        "WALLET_TOKEN_LIFETIME_HOURS",
        "WALLET_VERIFY_ORDER_AMOUNT",
        "WALLET_RUN_MIGRATIONS",
        "RAZORPAY_KEY_ID",
        "RAZORPAY_API_URL",
    ];

    println!("Current environment values (EXCLUDING variables that contain secrets):");
    DISPLAY_ENVS.iter().for_each(|&name| {
        let val = match env::var(name) {
            Ok(s) => s,
            Err(VarError::NotPresent) => "Not set".into(),
            Err(VarError::NotUnicode(s)) => format!("Invalid value: {}", s.to_string_lossy()),
        };
        println!("  {name:<35} {val:<15}");
    })
}
