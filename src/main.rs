use clap::{Arg, ArgMatches, Command};
use log::error;
use std::error::Error;
use std::path::PathBuf;
use std::process;

use thankyou_cards::auth::CredentialStore;
use thankyou_cards::storage::CatalogSource;
use thankyou_cards::session::{card_summary, render_card, CardForm, Submission};
use thankyou_cards::utils::io::prompt_password;
use thankyou_cards::utils::logging::initialize_logging;
use thankyou_cards::{AppConfig, Session};

const CARD_FIELDS: [(&str, &str); 6] = [
    ("to", "Name of the person being thanked"),
    ("from", "Name to sign the card with"),
    ("item", "The gift or favor you are thankful for"),
    ("message-type", "Message template to use (default: tons)"),
    ("sender", "Your email address"),
    ("recipient", "The recipient's email address"),
];

fn card_id_arg() -> Arg {
    Arg::new("id")
        .help("Id of the card")
        .required(true)
        .value_parser(clap::value_parser!(u64))
}

fn card_field_args(required: bool) -> Vec<Arg> {
    CARD_FIELDS
        .iter()
        .map(|(name, help)| {
            Arg::new(*name)
                .long(*name)
                .help(*help)
                .value_name("VALUE")
                .required(required && *name != "message-type")
        })
        .collect()
}

fn build_cli() -> Command {
    Command::new("thankyou")
        .about("Write, preview and send simple thank-you cards")
        .subcommand_required(true)
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .env("THANKYOU_DATA_DIR")
                .help("Directory holding users.json, messages.json and user_data/")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .arg(
            Arg::new("user")
                .long("user")
                .short('u')
                .env("THANKYOU_USER")
                .help("Account to sign in as")
                .global(true),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .env("THANKYOU_PASSWORD")
                .hide_env_values(true)
                .help("Password (prompted for when omitted)")
                .global(true),
        )
        .subcommand(Command::new("welcome").about("Show the welcome text and message types"))
        .subcommand(
            Command::new("signup")
                .about("Create a new account")
                .arg(Arg::new("username").help("The new username").required(true)),
        )
        .subcommand(Command::new("list").about("List your cards, drafts first"))
        .subcommand(Command::new("sample").about("Preview the sample card"))
        .subcommand(
            Command::new("new")
                .about("Create a new card")
                .args(card_field_args(true)),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit a draft card; omitted fields keep their values")
                .arg(card_id_arg())
                .args(card_field_args(false)),
        )
        .subcommand(
            Command::new("preview")
                .about("Preview a draft card")
                .arg(card_id_arg()),
        )
        .subcommand(
            Command::new("send")
                .about("Mark a draft card as sent")
                .arg(card_id_arg()),
        )
}

fn main() {
    let matches = build_cli().get_matches();

    // Global flags land in the subcommand's matches when given after it
    let Some((command, sub)) = matches.subcommand() else {
        eprintln!("No command given. See --help.");
        process::exit(2);
    };

    let config = AppConfig::resolve(sub.get_one::<PathBuf>("data-dir").map(PathBuf::as_path));
    if let Err(e) = config.ensure_layout() {
        eprintln!("Error preparing data directory: {}", e);
        process::exit(1);
    }

    if let Err(e) = initialize_logging(&config.log_file) {
        eprintln!("Warning: logging unavailable: {}", e);
    }

    if let Err(e) = run(&config, command, sub) {
        error!("Command {} failed: {}", command, e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(config: &AppConfig, command: &str, sub: &ArgMatches) -> Result<(), Box<dyn Error>> {
    match command {
        "welcome" => {
            let catalog = config.catalog_source();
            println!("{}", Session::welcome(&catalog)?);
            println!("\nSign in with --user to manage your cards.");
            println!(
                "Message types: {}",
                catalog.load_catalog()?.message_types().join(", ")
            );
        }
        "signup" => {
            let username = required_string(sub, "username")?;
            let password = read_password(sub)?;
            let mut credentials = config.open_credentials()?;
            let mut session = Session::sign_up(
                &mut credentials,
                &username,
                &password,
                Box::new(config.user_repository()),
                &config.catalog_source(),
            )?;
            print_flash(&mut session);
        }
        "list" => {
            let mut session = sign_in(config, sub)?;
            print_flash(&mut session);
            println!("Signed in as {}", session.username());

            let cards = session.card_list();
            if cards.is_empty() {
                println!("No cards yet. Create one with `thankyou new`.");
            }
            for card in cards {
                println!("{:>4}  {}", card.id, card_summary(card));
            }
        }
        "sample" => {
            let session = sign_in(config, sub)?;
            println!("{}", session.sample_preview()?);
        }
        "new" => {
            let mut session = sign_in(config, sub)?;
            let form = form_from_args(sub, CardForm::default());
            submit(&mut session, form, None)?;
        }
        "edit" => {
            let mut session = sign_in(config, sub)?;
            let id = *sub.get_one::<u64>("id").ok_or("missing card id")?;
            let form = form_from_args(sub, session.edit_form(id)?);
            submit(&mut session, form, Some(id))?;
        }
        "preview" => {
            let session = sign_in(config, sub)?;
            let id = *sub.get_one::<u64>("id").ok_or("missing card id")?;
            println!("{}", session.preview(id)?);
        }
        "send" => {
            let mut session = sign_in(config, sub)?;
            let id = *sub.get_one::<u64>("id").ok_or("missing card id")?;
            session.send_card(id)?;
            print_flash(&mut session);
        }
        _ => return Err("unknown command".into()),
    }

    Ok(())
}

fn sign_in(config: &AppConfig, matches: &ArgMatches) -> Result<Session, Box<dyn Error>> {
    let username = required_string(matches, "user")?;
    let password = read_password(matches)?;
    let credentials: CredentialStore = config.open_credentials()?;

    let session = Session::sign_in(
        &credentials,
        &username,
        &password,
        Box::new(config.user_repository()),
        &config.catalog_source(),
    )?;
    Ok(session)
}

fn read_password(matches: &ArgMatches) -> Result<String, Box<dyn Error>> {
    match matches.get_one::<String>("password") {
        Some(password) => Ok(password.clone()),
        None => Ok(prompt_password("Password: ")?),
    }
}

fn required_string(matches: &ArgMatches, name: &str) -> Result<String, Box<dyn Error>> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| format!("--{} is required", name).into())
}

// Flags override the starting values field by field
fn form_from_args(sub: &ArgMatches, mut form: CardForm) -> CardForm {
    let overrides: [(&str, &mut String); 6] = [
        ("to", &mut form.to),
        ("from", &mut form.from),
        ("item", &mut form.item),
        ("message-type", &mut form.message_type),
        ("sender", &mut form.sender),
        ("recipient", &mut form.recipient),
    ];
    for (name, field) in overrides {
        if let Some(value) = sub.get_one::<String>(name) {
            *field = value.clone();
        }
    }
    form
}

fn submit(session: &mut Session, form: CardForm, card_id: Option<u64>) -> Result<(), Box<dyn Error>> {
    match session.submit_card(form, card_id)? {
        Submission::Saved(id) => {
            print_flash(session);
            println!("\n{}", session.preview(id)?);
            Ok(())
        }
        Submission::Rejected { error, preview } => {
            println!("Attempted card:");
            match session.manager().personalize_message(&preview) {
                Ok(message) => println!("{}\n", render_card(&preview, &message)),
                Err(_) => println!("{}\n", card_summary(&preview)),
            }
            Err(error.into())
        }
    }
}

fn print_flash(session: &mut Session) {
    if let Some(message) = session.take_flash() {
        println!("{}", message);
    }
}
