//! Append-only invocation history in the working directory.
//!
//! Arguments are re-quoted so a history line can be pasted back into a
//! shell; help, version, and the history flag itself are left out.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Utc;

const HISTORY_FILE: &str = ".fakeform_history";
const IGNORED_ARGS: &[&str] = &["-V", "--version", "-h", "--help", "--history"];

pub fn append_invocation<I>(args: I) -> std::io::Result<()>
where
    I: IntoIterator<Item = String>,
{
    append_to(Path::new(HISTORY_FILE), args)
}

fn append_to<I>(path: &Path, args: I) -> std::io::Result<()>
where
    I: IntoIterator<Item = String>,
{
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file)?;
    writeln!(file, "# fakeform invocation on {}", Utc::now().to_rfc3339())?;
    writeln!(file, "{}", history_line(args))?;
    Ok(())
}

fn history_line<I>(args: I) -> String
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .filter(|arg| !IGNORED_ARGS.contains(&arg.as_str()))
        .map(|arg| quote_argument(&arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_argument(original: &str) -> String {
    let mut needs_quotes = original.is_empty() || original.starts_with('#');
    let mut escaped = String::with_capacity(original.len());
    for ch in original.chars() {
        if ch.is_whitespace() {
            needs_quotes = true;
        }
        if ch == '\\' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    if needs_quotes {
        format!("\"{escaped}\"")
    } else {
        escaped
    }
}
