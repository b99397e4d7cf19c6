//! Command execution against a [`ClosetClient`].

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::{Report, Result, Section};

use super::args::{CliCommand, USAGE};
use super::version::version_line;
use crate::client::ClosetClient;
use crate::error::ClosetError;
use crate::models::{ImageUpload, NewWardrobeItem, Outfit, WardrobeItem, WeatherSnapshot};

/// Run one command. The persisted session is restored first.
pub async fn run_command(client: &ClosetClient, command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Help => print!("{}", USAGE),
        CliCommand::Version => println!("{}", version_line()),
        CliCommand::Login { username, password } => {
            let password = password_or_prompt(password)?;
            let session = client.login(&username, &password).await.map_err(report)?;
            println!("Signed in as {} (user {})", username, session.user_id);
        }
        CliCommand::Signup { username, password } => {
            let password = password_or_prompt(password)?;
            let session = client.signup(&username, &password).await.map_err(report)?;
            println!("Account created for {} (user {})", username, session.user_id);
        }
        CliCommand::Logout => {
            client.logout().await;
            println!("Signed out");
        }
        CliCommand::Whoami => match client.session().user_id() {
            Some(user_id) => println!("user {}", user_id),
            None => println!("Not signed in"),
        },
        CliCommand::Wardrobe { filter } => {
            let items = client.wardrobe().filtered(&filter).await.map_err(report)?;
            if items.is_empty() {
                println!("No items");
            }
            for item in &items {
                println!("{}", format_item(item));
            }
        }
        CliCommand::Add {
            category,
            style,
            weather,
            image,
        } => {
            let mut item = NewWardrobeItem::new(category, style, weather);
            if let Some(path) = image {
                let upload = ImageUpload::from_path(&path)
                    .wrap_err_with(|| format!("Failed to read image {}", path.display()))?;
                item = item.with_image(upload);
            }
            let created = client.wardrobe().add_item(&item).await.map_err(report)?;
            println!("Added {}", format_item(&created));
        }
        CliCommand::Delete { item_id } => {
            client.wardrobe().delete_item(&item_id).await.map_err(report)?;
            println!("Deleted {}", item_id);
        }
        CliCommand::Weather => {
            let weather = client.weather().fetch().await.map_err(report)?;
            println!("{}", format_weather(&weather));
        }
        CliCommand::Generate { occasion } => {
            let weather = client.weather().fetch().await.map_err(report)?;
            let outfit = client.outfits().generate(&occasion, &weather).await.map_err(report)?;
            println!("{}", format_outfit(&outfit));
        }
        CliCommand::Saved => {
            let outfits = client.outfits().fetch_saved().await.map_err(report)?;
            if outfits.is_empty() {
                println!("No saved outfits");
            }
            for outfit in &outfits {
                println!("{}", format_outfit(outfit));
            }
        }
        CliCommand::Save { outfit_id } => {
            let confirmation = client.outfits().save(&outfit_id).await.map_err(report)?;
            println!("{}", confirmation.message.as_deref().unwrap_or("Outfit saved"));
        }
        CliCommand::Feedback {
            outfit_id,
            reaction,
        } => {
            let receipt = client.feedback().submit(&outfit_id, reaction).await.map_err(report)?;
            println!(
                "{}",
                receipt.message.as_deref().unwrap_or("Feedback recorded")
            );
        }
    }
    Ok(())
}

/// Whether the command needs the persisted session restored first.
pub fn needs_session(command: &CliCommand) -> bool {
    !matches!(
        command,
        CliCommand::Help | CliCommand::Version | CliCommand::Login { .. } | CliCommand::Signup { .. }
    )
}

/// Turn a client error into a report carrying its recovery hint.
pub fn report(err: ClosetError) -> Report {
    tracing::debug!(code = err.error_code(), "Command failed");
    let hint = err.recovery_hint();
    Report::new(err).suggestion(hint)
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => {
            let password =
                rpassword::prompt_password("Password: ").wrap_err("Failed to read password")?;
            if password.is_empty() {
                return Err(eyre!("Password must not be empty"));
            }
            Ok(password)
        }
    }
}

pub fn format_item(item: &WardrobeItem) -> String {
    let mut line = format!(
        "{}  {} / {} / {}",
        item.id, item.category, item.style, item.weather
    );
    if let Some(part) = &item.outfit_part {
        line.push_str(&format!("  [{}]", part));
    }
    if let Some(url) = &item.image_url {
        line.push_str(&format!("  {}", url));
    }
    line
}

pub fn format_weather(weather: &WeatherSnapshot) -> String {
    let mut line = format!("{:.1}°C {}", weather.temperature, weather.condition);
    if let Some(city) = &weather.city {
        line = format!("{}: {}", city, line);
    }
    if let Some(description) = &weather.description {
        line.push_str(&format!(" ({})", description));
    }
    format!("{}, {} weather", line, weather.suitability())
}

pub fn format_outfit(outfit: &Outfit) -> String {
    let garment = |item: &Option<WardrobeItem>| match item {
        Some(item) => format!("{} ({})", item.category, item.id),
        None => "-".to_string(),
    };
    let mut text = format!(
        "Outfit {}: top {}, bottom {}",
        outfit.id,
        garment(&outfit.top_item),
        garment(&outfit.bottom_item)
    );
    if let Some(occasion) = &outfit.occasion {
        text.push_str(&format!(" for {}", occasion));
    }
    if let Some(explanation) = &outfit.explanation {
        text.push_str(&format!("\n  {}", explanation));
    }
    text
}
