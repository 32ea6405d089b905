//! `cdesk`: administrator shell for a running Contact Desk server.

use anyhow::Context;
use cdesk::features::contacts::client::{ContactApi, HttpContactApi};
use cdesk::features::contacts::domain::{Contact, ContactDraft};
use cdesk_logger::{LevelFilter, Logger};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};

#[derive(Debug, Parser)]
#[command(name = "cdesk", version, about = "Manage submitted contact messages")]
struct Cli {
    /// Base URL of the Contact Desk server.
    #[arg(long, env = "CDESK_URL", default_value = "http://127.0.0.1:4583", global = true)]
    url: String,

    /// Show debug logs on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every contact.
    List,
    /// Submit a new contact.
    Add(Fields),
    /// Replace the fields of an existing contact.
    Edit {
        id: i64,
        #[command(flatten)]
        fields: Fields,
    },
    /// Delete a contact.
    Remove { id: i64 },
}

#[derive(Debug, Args)]
struct Fields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    message: String,
}

impl From<Fields> for ContactDraft {
    fn from(fields: Fields) -> Self {
        Self { name: fields.name, email: fields.email, message: fields.message }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let _logger =
        Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).stderr(true).init()?;

    let api = HttpContactApi::new(&cli.url)?;
    tracing::debug!(endpoint = api.endpoint(), "Using contact endpoint");

    let mut out = io::stdout().lock();
    match cli.command {
        Command::List => {
            for contact in api.list().await? {
                print_contact(&mut out, &contact)?;
            }
        }
        Command::Add(fields) => {
            let contact = api.create(&fields.into()).await?;
            print_contact(&mut out, &contact)?;
        }
        Command::Edit { id, fields } => {
            let contact = Contact::new(id, fields.into());
            let updated = api.update(&contact).await?;
            print_contact(&mut out, &updated)?;
        }
        Command::Remove { id } => {
            let message = api.delete(id).await?;
            writeln!(out, "{}", serde_json::json!({ "id": id, "message": message }))?;
        }
    }

    Ok(())
}

fn print_contact(out: &mut impl Write, contact: &Contact) -> anyhow::Result<()> {
    let line = serde_json::to_string(contact).context("Encoding contact")?;
    writeln!(out, "{line}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_edit_with_fields() {
        let cli = Cli::try_parse_from([
            "cdesk", "edit", "3", "--name", "Ann", "--email", "a@x.com", "--message", "hi",
        ])
        .expect("valid arguments");

        let Command::Edit { id, fields } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, 3);
        assert_eq!(ContactDraft::from(fields).email, "a@x.com");
    }

    #[test]
    fn add_requires_every_field() {
        assert!(Cli::try_parse_from(["cdesk", "add", "--name", "Ann"]).is_err());
    }

    #[test]
    fn contacts_print_as_json_lines() {
        let mut out = Vec::new();
        let contact = Contact {
            id: 1,
            name: "Ann".to_owned(),
            email: "a@x.com".to_owned(),
            message: "hi".to_owned(),
        };
        print_contact(&mut out, &contact).expect("write");
        assert_eq!(
            String::from_utf8(out).expect("utf8"),
            "{\"id\":1,\"name\":\"Ann\",\"email\":\"a@x.com\",\"message\":\"hi\"}\n"
        );
    }
}
