use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_DATA_DIR: &str = "user_data";
const DEFAULT_DB_URL: &str = "sqlite://skill_path.sqlite3";

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidAddr { raw: String },
    InvalidStore { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidAddr { raw } => write!(f, "invalid --addr value: {raw}"),
            ArgsError::InvalidStore { raw } => {
                write!(f, "invalid --store value: {raw} (expected json or sqlite)")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

/// Where per-user documents live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    Json { dir: PathBuf },
    Sqlite { url: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeArgs {
    pub addr: SocketAddr,
    pub store: StoreKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Serve(ServeArgs),
    Help,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- serve [--addr <host:port>] [--store <json|sqlite>] [--data-dir <dir>] [--db <sqlite_url>]"
    );
    eprintln!();
    eprintln!("Defaults for serve:");
    eprintln!("  --addr {DEFAULT_ADDR}");
    eprintln!("  --store json");
    eprintln!("  --data-dir {DEFAULT_DATA_DIR}");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  LEARN_ADDR, LEARN_STORE, LEARN_DATA_DIR, LEARN_DB_URL");
    eprintln!("  LEARN_AI_PROVIDER, LEARN_AI_API_KEY (or GEMINI_API_KEY), LEARN_AI_BASE_URL, LEARN_AI_MODEL");
    eprintln!("  RUST_LOG (default: info)");
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

/// Parse the command line (without the program name), reading defaults
/// through `env`.
pub fn parse(
    argv: Vec<String>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Command, ArgsError> {
    let mut iter = argv.into_iter().peekable();

    // `serve` is the default when no subcommand is given.
    match iter.peek().map(String::as_str) {
        None => {}
        Some("--help" | "-h") => return Ok(Command::Help),
        Some("serve") => {
            iter.next();
        }
        Some(first) if first.starts_with("--") => {}
        Some(first) => return Err(ArgsError::UnknownCommand(first.to_string())),
    }

    parse_serve(&mut iter, &env)
}

fn parse_serve(
    args: &mut impl Iterator<Item = String>,
    env: &impl Fn(&str) -> Option<String>,
) -> Result<Command, ArgsError> {
    let mut addr = env("LEARN_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let mut store = env("LEARN_STORE").unwrap_or_else(|| "json".to_string());
    let mut data_dir = env("LEARN_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
    let mut db_url = env("LEARN_DB_URL").unwrap_or_else(|| DEFAULT_DB_URL.to_string());

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--addr" => addr = require_value(args, "--addr")?,
            "--store" => store = require_value(args, "--store")?,
            "--data-dir" => data_dir = require_value(args, "--data-dir")?,
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                db_url = value;
            }
            "--help" | "-h" => return Ok(Command::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    let addr: SocketAddr = addr
        .trim()
        .parse()
        .map_err(|_| ArgsError::InvalidAddr { raw: addr.clone() })?;
    let store = match store.trim().to_ascii_lowercase().as_str() {
        "json" => StoreKind::Json {
            dir: PathBuf::from(data_dir),
        },
        "sqlite" => StoreKind::Sqlite {
            url: normalize_sqlite_url(&db_url),
        },
        _ => return Err(ArgsError::InvalidStore { raw: store }),
    };

    Ok(Command::Serve(ServeArgs { addr, store }))
}

/// Turn a bare path or `sqlite:` path into an absolute `sqlite://` URL.
pub fn normalize_sqlite_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return trimmed.to_string();
    }

    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file (and parent dirs) so `SQLite` can open it.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_to_json_store_on_port_5000() {
        let Command::Serve(serve) = parse(Vec::new(), no_env).unwrap() else {
            panic!("expected serve");
        };
        assert_eq!(serve.addr, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(
            serve.store,
            StoreKind::Json {
                dir: PathBuf::from("user_data")
            }
        );
    }

    #[test]
    fn flags_override_environment() {
        let env: HashMap<&str, &str> = [("LEARN_ADDR", "0.0.0.0:9000"), ("LEARN_STORE", "sqlite")]
            .into_iter()
            .collect();
        let lookup = |key: &str| env.get(key).map(|v| (*v).to_string());

        let Command::Serve(serve) =
            parse(args(&["serve", "--addr", "127.0.0.1:8080", "--db", "sqlite::memory:"]), lookup)
                .unwrap()
        else {
            panic!("expected serve");
        };
        assert_eq!(serve.addr.port(), 8080);
        assert_eq!(
            serve.store,
            StoreKind::Sqlite {
                url: "sqlite::memory:".into()
            }
        );
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(matches!(
            parse(args(&["--store", "redis"]), no_env),
            Err(ArgsError::InvalidStore { .. })
        ));
        assert!(matches!(
            parse(args(&["--addr", "nowhere"]), no_env),
            Err(ArgsError::InvalidAddr { .. })
        ));
        assert!(matches!(
            parse(args(&["--addr"]), no_env),
            Err(ArgsError::MissingValue { flag: "--addr" })
        ));
        assert!(matches!(
            parse(args(&["seed"]), no_env),
            Err(ArgsError::UnknownCommand(_))
        ));
        assert_eq!(parse(args(&["-h"]), no_env).unwrap(), Command::Help);
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/app.sqlite3");
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/app.sqlite3"), "{url}");
        assert_eq!(normalize_sqlite_url("sqlite://x.db"), "sqlite://x.db");
    }
}
