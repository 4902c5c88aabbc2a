//! Command-line front end for the phonebook.
//!
//! # Responsibility
//! - Map subcommands onto application shell actions.
//! - Print the rendered list and footer after each command.

use clap::{Args, Parser, Subcommand};
use log::info;
use phonebook_core::db::open_db;
use phonebook_core::{
    init_logging, AppShell, CloseOutcome, ContactField, ContactId, ContactRepository,
    PhonebookConfig, RecordStore, SqliteContactRepository,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "phonebook", version, about = "Local contact book")]
struct Options {
    /// SQLite database file
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// Storage namespace for this phonebook
    #[arg(long, value_name = "NS")]
    namespace: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long, value_name = "DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every contact
    List,
    /// Create a contact; all four values are required
    Add(AddArgs),
    /// Edit a contact; an empty --name deletes it
    Edit(EditArgs),
    /// Delete a contact
    Delete {
        /// Contact id
        id: ContactId,
    },
}

#[derive(Args, Debug)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    surname: String,
    #[arg(long)]
    phone: String,
    #[arg(long = "type")]
    kind: String,
}

#[derive(Args, Debug)]
struct EditArgs {
    /// Contact id
    id: ContactId,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    surname: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long = "type")]
    kind: Option<String>,
}

fn main() -> ExitCode {
    let opts = Options::parse();
    match run(opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(opts: Options) -> Result<(), Box<dyn Error>> {
    let config = PhonebookConfig::from_parts(
        opts.namespace.as_deref(),
        opts.db.as_deref(),
        opts.log_level.as_deref(),
        opts.log_dir.as_deref(),
    )?;

    if let Some(log_dir) = config.log_dir.as_ref().and_then(|dir| dir.to_str()) {
        init_logging(config.log_level, log_dir)?;
    }

    let conn = open_db(&config.db_path)?;
    let repo = SqliteContactRepository::try_new(&conn, config.namespace.as_str())?;
    let mut shell = AppShell::new(RecordStore::new(repo));
    shell.start()?;
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&opts.command)
    );

    match opts.command {
        Command::List => {}
        Command::Add(args) => {
            shell.set_form_input(ContactField::Name, args.name);
            shell.set_form_input(ContactField::SurName, args.surname);
            shell.set_form_input(ContactField::PhoneNumber, args.phone);
            shell.set_form_input(ContactField::Type, args.kind);
            match shell.create()? {
                Some(contact) => {
                    if let Some(id) = contact.id {
                        println!("created {id}");
                    }
                }
                None => println!("nothing created: every field needs a value"),
            }
        }
        Command::Edit(args) => edit(&mut shell, args)?,
        Command::Delete { id } => {
            if shell.destroy(id)? {
                println!("deleted {id}");
            } else {
                println!("no contact with id {id}");
            }
        }
    }

    print_list(&shell);
    Ok(())
}

fn edit<R: ContactRepository>(
    shell: &mut AppShell<R>,
    args: EditArgs,
) -> Result<(), Box<dyn Error>> {
    if !shell.edit(args.id) {
        println!("no contact with id {}", args.id);
        return Ok(());
    }

    let updates = [
        (ContactField::Name, args.name),
        (ContactField::SurName, args.surname),
        (ContactField::PhoneNumber, args.phone),
        (ContactField::Type, args.kind),
    ];
    for (field, value) in updates {
        if let Some(value) = value {
            shell.set_view_input(args.id, field, value);
        }
    }

    match shell.close(args.id)? {
        CloseOutcome::Saved => println!("saved {}", args.id),
        CloseOutcome::Deleted => println!("deleted {} (empty name)", args.id),
        CloseOutcome::NotEditing => {}
    }
    Ok(())
}

fn print_list<R: ContactRepository>(shell: &AppShell<R>) {
    let summary = shell.summary();
    if !summary.main_visible {
        println!("(no contacts)");
        return;
    }
    for view in shell.views() {
        println!("{}  {}", view.contact_id(), view.rendered());
    }
    if let Some(footer) = &summary.footer_text {
        println!("{footer}");
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::List => "list",
        Command::Add(_) => "add",
        Command::Edit(_) => "edit",
        Command::Delete { .. } => "delete",
    }
}
