use clap::Parser;
use std::error::Error;

mod commands;

use builder_hub::{ContentCatalog, HubSession, MockAuth, Notifier, Severity};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Builder Hub - community board terminal client", long_about = None)]
pub struct Args {
    /// Logging level for all subsystems {off, error, warn, info, debug, trace}
    ///  -- You may also specify `<subsystem>=<level>,<subsystem2>=<level>,...` to set the log level for individual subsystems
    #[arg(long = "loglevel", default_value = format!("info,{}=trace", env!("CARGO_PKG_NAME")))]
    pub log_level: String,
}

/// Prints toasts to the terminal the way the web client flashed them.
struct ToastNotifier;

fn format_toast(severity: Severity, message: &str) -> String {
    match severity {
        Severity::Success => format!("ok: {message}"),
        Severity::Error => format!("error: {message}"),
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        println!("{}", format_toast(severity, message));
    }

    fn request_login_prompt(&self) {
        println!("sign in first: `login <email> <password>` or `signup <name> <email> <password> <confirm>`");
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::Builder::new().parse_filters(&args.log_level).init();

    let store = builder_hub::new_store()?;
    let mut session = HubSession::new(ContentCatalog::builtin(), store, Arc::new(MockAuth), Arc::new(ToastNotifier));

    println!("Builder Hub — type `help` for commands, `quit` to exit.");
    commands::print_snapshot(&session);

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }
        match commands::dispatch(&mut session, line.trim()) {
            commands::Control::Continue => {}
            commands::Control::Quit => break,
        }
    }

    println!("Goodbye!");
    Ok(())
}
