//!
//! foodbridge CLI binary
//! ---------------------
//! Command-line front end for the Food Bridge client SDK. Signs in against a
//! Food Bridge backend, keeps the credential in a file-backed token store so
//! it survives across invocations, and renders the role-scoped dashboard.

use std::collections::HashMap;
use std::env;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use foodbridge_client::api::{ApiClient, RegistrationForm};
use foodbridge_client::cli;
use foodbridge_client::config::ClientConfig;
use foodbridge_client::dashboard;
use foodbridge_client::error::ClientError;
use foodbridge_client::identity::{AccountType, FileTokenStore, SessionStore};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} login --email <e> --password <p>\n  {program} register --email <e> --password <p> --type <Business|Individual|Charity> [--profile key=value ...]\n  {program} me\n  {program} dashboard [--type <t>]\n  {program} user-types\n  {program} categories --type <t>\n  {program} logout\n  {program} status\n\nFlags:\n  --email <e>         Account email\n  --password <p>      Account password\n  --type <t>          Account type (Business, Individual or Charity)\n  --profile k=v       Extra registration profile field (repeatable)\n  -h, --help          Show this help\n\nEnvironment:\n  FOODBRIDGE_API_URL     Backend base URL (default: http://localhost:3001/api)\n  FOODBRIDGE_STATE_DIR   Token store directory (default: .foodbridge)\n  FOODBRIDGE_OUTPUT      Set to 'json' for JSON output\n  RUST_LOG               Log filter (default: warn)\n\nExamples:\n  {program} login --email test@example.com --password 'TestPass123!'\n  {program} dashboard --type Charity\n  FOODBRIDGE_OUTPUT=json {program} dashboard"
    );
}

struct Args {
    command: String,
    email: Option<String>,
    password: Option<String>,
    account_type: Option<String>,
    profile: HashMap<String, String>,
}

fn parse_args(program: &str) -> Option<Args> {
    let mut args = env::args().skip(1);
    let mut parsed = Args {
        command: String::new(),
        email: None,
        password: None,
        account_type: None,
        profile: HashMap::new(),
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage(program);
                std::process::exit(0);
            }
            "--email" => parsed.email = args.next(),
            "--password" => parsed.password = args.next(),
            "--type" => parsed.account_type = args.next(),
            "--profile" => {
                if let Some(pair) = args.next() {
                    if let Some((k, v)) = pair.split_once('=') {
                        parsed.profile.insert(k.trim().to_string(), v.to_string());
                    } else {
                        eprintln!("ignoring malformed --profile '{}', expected key=value", pair);
                    }
                }
            }
            other if parsed.command.is_empty() && !other.starts_with('-') => {
                parsed.command = other.to_string();
            }
            other => {
                eprintln!("unknown argument: {}", other);
                print_usage(program);
                return None;
            }
        }
    }
    if parsed.command.is_empty() {
        print_usage(program);
        return None;
    }
    Some(parsed)
}

fn required(value: Option<String>, flag: &str, program: &str) -> Option<String> {
    if value.is_none() {
        eprintln!("missing required flag: {}", flag);
        print_usage(program);
    }
    value
}

#[tokio::main]
async fn main() {
    // Init logging; quiet by default so table output stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).init();

    let program = env::args().next().unwrap_or_else(|| "foodbridge-cli".to_string());
    let Some(args) = parse_args(&program) else {
        std::process::exit(2);
    };

    if let Err(err) = run(args, &program).await {
        // Application messages are presentable verbatim; transport failures
        // get a generic retry prompt.
        match &err {
            ClientError::Application { .. } => eprintln!("error: {}", err.message()),
            ClientError::Authorization { .. } => {
                eprintln!("session expired ({}); sign in again with 'login'", err.message())
            }
            ClientError::Transport { .. } => {
                eprintln!("network error: {}; check the connection and retry", err.message())
            }
        }
        std::process::exit(1);
    }
}

async fn run(args: Args, program: &str) -> Result<(), ClientError> {
    let config = ClientConfig::from_env();
    let api = ApiClient::new(&config)?;
    let store = Arc::new(FileTokenStore::new(&config.state_dir));
    let session = SessionStore::new(api.clone(), store);
    info!(target: "foodbridge", "backend={} state_dir={}", api.base_url(), config.state_dir.display());

    match args.command.as_str() {
        "login" => {
            let (Some(email), Some(password)) = (
                required(args.email, "--email", program),
                required(args.password, "--password", program),
            ) else {
                std::process::exit(2);
            };
            let user = session.login(&email, &password).await?;
            session.remember_account_type(user.account_type);
            cli::print_user(&user);
        }
        "register" => {
            let (Some(email), Some(password), Some(tag)) = (
                required(args.email, "--email", program),
                required(args.password, "--password", program),
                required(args.account_type, "--type", program),
            ) else {
                std::process::exit(2);
            };
            let form = RegistrationForm {
                email,
                password,
                account_type: AccountType::parse(&tag),
                profile: args.profile,
            };
            let user = session.register(&form).await?;
            session.remember_account_type(user.account_type);
            cli::print_user(&user);
        }
        "me" => {
            let user = session.current_user().await?;
            cli::print_user(&user);
        }
        "dashboard" => {
            let view = if let Some(tag) = args.account_type {
                let account_type = AccountType::parse(&tag);
                session.remember_account_type(account_type);
                dashboard::resolve(account_type)
            } else if session.is_authenticated() {
                let user = session.current_user().await?;
                session.remember_account_type(user.account_type);
                dashboard::resolve_for_user(&user)
            } else {
                dashboard::resolve(session.preferred_account_type().unwrap_or_default())
            };
            cli::print_dashboard(&view);
        }
        "user-types" => {
            let entries = api.user_types().await?;
            cli::print_user_types(&entries);
        }
        "categories" => {
            let Some(tag) = required(args.account_type, "--type", program) else {
                std::process::exit(2);
            };
            let categories = api.categories(AccountType::parse(&tag)).await?;
            cli::print_categories(&categories);
        }
        "logout" => {
            session.logout();
            println!("signed out");
        }
        "status" => {
            println!("backend: {}", api.base_url());
            println!("signed in: {}", session.is_authenticated());
            if let Some(t) = session.preferred_account_type() {
                println!("last dashboard: {}", t);
            }
        }
        other => {
            eprintln!("unknown command: {}", other);
            print_usage(program);
            std::process::exit(2);
        }
    }
    Ok(())
}
