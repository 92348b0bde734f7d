//! Connector configuration form driver.
//!
//! Runs the form's load and save handlers against files, so stored connector
//! configurations can be inspected and re-encoded outside the host.
//!
//! ```text
//! connector-config load stored.xml        stored XML → editable document (plaintext)
//! connector-config save edited.xml        editable document → <config> with persisted copy
//! connector-config test-save [stored.xml] load, then save into <config/>
//! connector-config check-settings         validate settings, print them as JSON
//! ```

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use connector_config::codec::{Base64Codec, PasswordCodec};
use connector_config::config::load_settings_or_default;
use connector_config::lifecycle::{FormSession, HostContext};
use connector_config::model::{ConfigurationModel, InMemoryModel};
use connector_config::observability::init_logging;
use connector_config::transform::ConfigTransformer;
use connector_config::xml::Element;

#[derive(Parser)]
#[command(name = "connector-config")]
#[command(about = "Load and save connector configuration documents", long_about = None)]
struct Cli {
    /// Settings file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// User opening the form.
    #[arg(short, long)]
    user: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a stored configuration into its editable form
    Load { file: PathBuf },
    /// Encode an edited configuration into its persisted form
    Save { file: PathBuf },
    /// Load (template when no file is given) and immediately save
    TestSave { file: Option<PathBuf> },
    /// Validate the settings file
    CheckSettings,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = load_settings_or_default(cli.settings.as_deref())?;

    if let Err(e) = init_logging(&settings.observability) {
        eprintln!("Logging not initialized: {}", e);
    }

    let codec: Arc<dyn PasswordCodec> = Arc::new(Base64Codec);
    let model = Arc::new(InMemoryModel::new());

    match cli.command {
        Commands::Load { file } => {
            let xml = fs::read_to_string(&file)?;
            let mut context = HostContext::embedded(xml);
            context.user = cli.user;

            let mut session = FormSession::open(settings, codec, model.clone())?;
            let outcome = session.on_init(&context)?;
            if outcome.load.used_template() {
                tracing::warn!(file = %file.display(), "No configuration found in file, showing template");
            }
            print_document(model.as_ref());
            session.close();
        }
        Commands::Save { file } => {
            let edited = Element::parse(&fs::read_to_string(&file)?)?;
            model.put_data(edited);

            let transformer = ConfigTransformer::from_config(&settings.transform)?;
            let mut destination = Element::new("config");
            transformer.save(model.as_ref(), codec.as_ref(), &mut destination)?;
            println!("{}", destination);
        }
        Commands::TestSave { file } => {
            let mut context = match file {
                Some(file) => HostContext::embedded(fs::read_to_string(&file)?),
                None => HostContext::preview(),
            };
            context.user = cli.user;

            let mut session = FormSession::open(settings, codec, model)?;
            session.on_init(&context)?;
            println!("{}", session.test_save()?);
            session.close();
        }
        Commands::CheckSettings => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}

fn print_document(model: &dyn ConfigurationModel) {
    match model.get_data() {
        Some(document) => println!("{}", document),
        None => eprintln!("Model holds no document"),
    }
}
