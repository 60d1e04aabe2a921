use std::path::PathBuf;
use std::sync::mpsc::channel;

use anyhow::{Context, Result};
use arboard::Clipboard;
use clap::Parser;
use snappress_core::{Settings, SnapPress};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// List available capture sources and exit
    #[arg(long)]
    list_sources: bool,

    /// Print the current settings and exit
    #[arg(long)]
    show_settings: bool,

    /// Print the WordPress media library URL and exit
    #[arg(long)]
    media_library: bool,

    /// Set the WordPress base URL and exit
    #[arg(long, value_name = "URL")]
    set_url: Option<String>,

    /// Set the WordPress user name and exit
    #[arg(long, value_name = "NAME")]
    set_username: Option<String>,

    /// Set the WordPress application password and exit
    #[arg(long, value_name = "PASSWORD")]
    set_password: Option<String>,

    /// Set the screenshot save directory and exit
    #[arg(long, value_name = "DIR")]
    set_save_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Settings edits short-circuit: load, apply, rewrite the whole record
    if args.set_url.is_some()
        || args.set_username.is_some()
        || args.set_password.is_some()
        || args.set_save_dir.is_some()
    {
        let mut settings = Settings::load();
        if let Some(url) = args.set_url {
            settings.wordpress_url = url;
        }
        if let Some(username) = args.set_username {
            settings.wordpress_username = username;
        }
        if let Some(password) = args.set_password {
            settings.wordpress_password = password;
        }
        if let Some(dir) = args.set_save_dir {
            settings.save_directory = Some(dir);
        }
        settings.save().context("Failed to save settings")?;
        println!("Settings saved");
        return Ok(());
    }

    if args.show_settings {
        let settings = Settings::load();
        println!("WordPress URL:  {}", or_unset(&settings.wordpress_url));
        println!("User name:      {}", or_unset(&settings.wordpress_username));
        println!(
            "Password:       {}",
            if settings.wordpress_password.is_empty() {
                "(unset)"
            } else {
                "(set)"
            }
        );
        println!(
            "Save directory: {}",
            settings.resolved_save_directory().display()
        );
        return Ok(());
    }

    if args.media_library {
        let settings = Settings::load();
        match settings.media_library_url() {
            Some(url) => println!("{}", url),
            None => anyhow::bail!("WordPress URL is not set. Configure it with --set-url first"),
        }
        return Ok(());
    }

    // Print each saved path as soon as the file lands, so a failed
    // upload still tells the user where their screenshot went
    let (saved_tx, saved_rx) = channel();
    let app = SnapPress::new().with_save_notifier(saved_tx);

    if args.list_sources {
        println!("Available capture sources:");
        for source in app
            .list_sources()
            .context("Failed to enumerate capture sources")?
        {
            println!("{}", source);
        }
        return Ok(());
    }

    let result = app.capture_and_publish().await;

    while let Ok(path) = saved_rx.try_recv() {
        println!("Saved {}", path.display());
    }

    match result.context("Capture workflow failed")? {
        Some(report) => {
            if let Some(warning) = &report.warning {
                eprintln!("Warning: {}", warning);
            }

            match Clipboard::new() {
                Ok(mut clipboard) => {
                    if let Err(e) = clipboard.set_text(report.media_url.clone()) {
                        eprintln!("Warning: Failed to copy to clipboard: {}", e);
                    } else {
                        println!("(Copied to clipboard)");
                    }
                }
                Err(e) => eprintln!("Warning: Could not access clipboard: {}", e),
            }

            println!("{}", report.media_url);
        }
        None => {
            println!("Selection cancelled");
        }
    }

    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() { "(unset)" } else { value }
}
