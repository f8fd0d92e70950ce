use clap::{Parser, Subcommand};
use std::path::PathBuf;
use crate::models::Layout;

#[derive(Parser)]
#[command(name = "resepku")]
#[command(about = "Admin and guest client for the resep recipe site API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "RESEPKU_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the stored session token
    Logout,

    /// Show whether a session token is stored
    Status,

    /// Manage about page sections
    About {
        #[command(subcommand)]
        subcommand: AboutCommands,
    },

    /// View recipes as a guest
    Resep {
        #[command(subcommand)]
        subcommand: ResepCommands,
    },
}

#[derive(Subcommand)]
pub enum AboutCommands {
    /// List all sections
    List,

    /// Show one section
    Show {
        id: u64,
    },

    /// Create a section, or update one when --id is given
    Save {
        /// Section to update; omit to create a new one
        #[arg(long)]
        id: Option<u64>,

        /// Title
        #[arg(long)]
        judul: Option<String>,

        /// Description
        #[arg(long)]
        deskripsi: Option<String>,

        /// Image position (kiri, kanan)
        #[arg(long)]
        layout: Option<String>,

        /// Image file to upload
        #[arg(long)]
        gambar: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ResepCommands {
    /// Show a recipe
    Show {
        id: u64,
    },

    /// Print share links for a recipe
    Share {
        id: u64,
    },
}

impl Commands {
    pub fn parse_layout(layout: &str) -> Result<Layout, anyhow::Error> {
        layout.parse::<Layout>().map_err(|e| anyhow::anyhow!(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layout() {
        assert_eq!(Commands::parse_layout("kanan").unwrap(), Layout::Kanan);
        assert!(Commands::parse_layout("atas").is_err());
    }

    #[test]
    fn test_about_save_arguments() {
        let cli = Cli::try_parse_from([
            "resepku", "about", "save", "--id", "5", "--judul", "Tentang Kami", "--layout", "kanan",
        ])
        .unwrap();

        match cli.command {
            Commands::About {
                subcommand: AboutCommands::Save { id, judul, deskripsi, layout, gambar },
            } => {
                assert_eq!(id, Some(5));
                assert_eq!(judul.as_deref(), Some("Tentang Kami"));
                assert!(deskripsi.is_none());
                assert_eq!(layout.as_deref(), Some("kanan"));
                assert!(gambar.is_none());
            }
            _ => panic!("expected about save"),
        }
    }

    #[test]
    fn test_resep_share_arguments() {
        let cli = Cli::try_parse_from(["resepku", "resep", "share", "12"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Resep { subcommand: ResepCommands::Share { id: 12 } }
        ));
    }
}
