use anyhow::Result;
use shelflog_core::Session;
use shelflog_models::User;
use std::path::PathBuf;

use super::open_store;
use crate::output::{Output, OutputFormat};

pub fn run_login(
    email: String,
    name: Option<String>,
    data_dir: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut session = Session::load(store);

    let name = name.unwrap_or_else(|| {
        email
            .split('@')
            .next()
            .unwrap_or(email.as_str())
            .to_string()
    });
    session.login(User {
        email: email.clone(),
        name,
    })?;
    output.success(format!("Signed in as {}", email));
    Ok(())
}

pub fn run_logout(data_dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = open_store(data_dir)?;
    let mut session = Session::load(store);

    if !session.is_authenticated() {
        output.warning("No user is signed in");
        return Ok(());
    }
    session.logout()?;
    output.success("Signed out");
    Ok(())
}

pub fn run_whoami(data_dir: Option<PathBuf>, output: &Output) -> Result<()> {
    let store = open_store(data_dir)?;
    let session = Session::load(store);

    match session.current_user() {
        Some(user) => match output.format() {
            OutputFormat::Human => {
                output.info(format!("{} <{}>", user.name, user.email));
            }
            _ => output.print_json(&serde_json::to_value(user)?),
        },
        None => output.warning("No user is signed in"),
    }
    Ok(())
}
