//! Local mock session commands.

use chrono::Utc;
use clap::Subcommand;

use flowstate_core::session::SignUp;
use flowstate_core::{FileSessionStorage, SessionStore};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Show the current session and unlocked features
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Sign up / sign in (any email, password of 6+ characters)
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign out and return to guest mode
    Logout,
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let now = Utc::now();
    let mut store = SessionStore::load_or_create_guest(FileSessionStorage::default_location()?, now)?;

    match action {
        SessionAction::Status { json } => {
            if json {
                let out = serde_json::json!({
                    "session": store.session(),
                    "capabilities": store.capabilities(),
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                let session = store.session();
                println!("Session: {}", session.id);
                match &session.email {
                    Some(email) if !session.is_guest => println!("Signed in as {email}"),
                    _ => println!("Guest mode"),
                }
                let caps = store.capabilities();
                println!("Adaptive recommendations: {}", unlocked(caps.adaptive_recommendations));
                println!("Burnout details: {}", unlocked(caps.burnout_details));
                println!("Weekly analytics: {}", unlocked(caps.weekly_analytics));
                println!("Focus sessions: {}", unlocked(caps.focus_sessions));
            }
        }
        SessionAction::Signup {
            email,
            password,
            confirm_password,
        } => {
            let form = SignUp {
                email,
                confirm_password: confirm_password.unwrap_or_else(|| password.clone()),
                password,
            };
            let session = store.sign_up(&form, now)?;
            println!("Signed in: {}", session.id);
        }
        SessionAction::Logout => {
            let session = store.logout(now)?;
            println!("Signed out. Guest session: {}", session.id);
        }
    }
    Ok(())
}

fn unlocked(enabled: bool) -> &'static str {
    if enabled {
        "unlocked"
    } else {
        "locked"
    }
}
