use clap::Parser;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, error};

use resepku::about::{self, AboutDraft, AboutEditor, AboutError, ImageUpload};
use resepku::cli::{AboutCommands, Cli, Commands, ResepCommands};
use resepku::config::Config;
use resepku::gateway::{ApiClient, LoginNotice};
use resepku::models::{Layout, LoginRequest};
use resepku::storage::FileStore;
use resepku::{auth, render, resep, share};

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "resepku=info");
    }

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let file_appender = tracing_appender::rolling::never(".", "resepku.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env())
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.validate()?;

    let store = Arc::new(FileStore::open(&config.credential_path)?);
    let client = ApiClient::from_config(&config, store.clone())?
        .on_unauthorized(LoginNotice::default());

    let succeeded = match &cli.command {
        Commands::Login { email, password } => {
            let credentials = LoginRequest {
                email: email.clone(),
                password: password.clone(),
            };
            match auth::login(&client, &credentials).await {
                Ok(_) => {
                    println!("Signed in as {}", email);
                    true
                }
                Err(e) => {
                    error!("Login failed: {}", e.user_message());
                    false
                }
            }
        }

        Commands::Logout => match auth::logout(store.as_ref()) {
            Ok(true) => {
                println!("Signed out");
                true
            }
            Ok(false) => {
                println!("No session was stored");
                true
            }
            Err(e) => {
                error!("Logout failed: {}", e);
                false
            }
        },

        Commands::Status => {
            let status = auth::session_status(&store);
            match (status.logged_in, status.since) {
                (true, Some(since)) => println!("Signed in since {}", since.format("%Y-%m-%d %H:%M:%S UTC")),
                (true, None) => println!("Signed in"),
                (false, _) => println!("Not signed in"),
            }
            true
        }

        Commands::About { subcommand } => match subcommand {
            AboutCommands::List => match about::list(&client).await {
                Ok(records) => {
                    println!("Found {} sections:", records.len());
                    for record in &records {
                        println!("{}", render::render_about_row(record));
                    }
                    true
                }
                Err(e) => report_about_error("Failed to load sections", &e),
            },

            AboutCommands::Show { id } => match about::load_draft(&client, Some(*id)).await {
                Ok(draft) => {
                    print!("{}", render::render_about(&draft, &config.image_base_url));
                    true
                }
                Err(e) => report_about_error("Failed to load section", &e),
            },

            AboutCommands::Save { id, judul, deskripsi, layout, gambar } => {
                let layout = layout
                    .as_deref()
                    .map(Commands::parse_layout)
                    .transpose()?;

                let changes = AboutChanges {
                    judul: judul.clone(),
                    deskripsi: deskripsi.clone(),
                    layout,
                    gambar: gambar.clone(),
                };

                match save_about(&client, *id, changes).await {
                    Ok(draft) => {
                        info!("Saved about section {}", draft.save_path());
                        println!("Saved.");
                        print!("{}", render::render_about(&draft, &config.image_base_url));
                        true
                    }
                    Err(e) => report_about_error("Save failed", &e),
                }
            }
        },

        Commands::Resep { subcommand } => match subcommand {
            ResepCommands::Show { id } => match resep::fetch(&client, *id).await {
                Ok(Some(recipe)) => {
                    print!("{}", render::render_resep(&recipe, &config.image_base_url));
                    true
                }
                Ok(None) => {
                    error!("Recipe {} not found", id);
                    false
                }
                Err(e) => {
                    error!("Failed to load recipe {}: {}", id, e.user_message());
                    false
                }
            },

            ResepCommands::Share { id } => {
                let page_url = share::recipe_page_url(&config.site_url, *id);
                let links = share::ShareLinks::for_page(&page_url);
                for (label, url) in links.entries() {
                    println!("{:<10} {}", label, url);
                }
                true
            }
        },
    };

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}

/// Fields given on the command line for `about save`
struct AboutChanges {
    judul: Option<String>,
    deskripsi: Option<String>,
    layout: Option<Layout>,
    gambar: Option<PathBuf>,
}

/// Prefill the form like the edit view does, overlay the changes, submit.
async fn save_about(client: &ApiClient, id: Option<u64>, changes: AboutChanges) -> Result<AboutDraft, AboutError> {
    let mut draft = about::load_draft(client, id).await?;

    if let Some(judul) = changes.judul {
        draft.judul = judul;
    }
    if let Some(deskripsi) = changes.deskripsi {
        draft.deskripsi = deskripsi;
    }
    if let Some(layout) = changes.layout {
        draft.layout = layout;
    }
    if let Some(path) = changes.gambar {
        draft.new_image = Some(ImageUpload::from_path(path).await?);
    }

    AboutEditor::new(client).submit(&draft).await?;
    Ok(draft)
}

fn report_about_error(context: &str, err: &AboutError) -> bool {
    error!("{}: {}", context, err.user_message());
    if let AboutError::Gateway(gateway_error) = err {
        for (field, messages) in gateway_error.validation_errors() {
            for message in messages {
                error!("  {}: {}", field, message);
            }
        }
    }
    false
}
