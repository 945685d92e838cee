//! ashram-admin - Headless admin client for ashram guesthouse management
//!
//! A CLI shell over the dashboard pages: log in, browse and filter each
//! resource, change statuses, and export the donations overview.

use anyhow::{Context, Result, bail, ensure};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use ashram_admin::api::{AdminApi, HttpApi};
use ashram_admin::config::Config;
use ashram_admin::forms::parse_bulk_invites;
use ashram_admin::models::{AdminRole, AdminStatus, BookingStatus, ImageFile, RoomStatus};
use ashram_admin::notify::{Level, Notifications};
use ashram_admin::pages::{
    AdminsPage, BookingsPage, DonationsPage, RoomsPage, load_dashboard,
};
use ashram_admin::reports::format_rupees;
use ashram_admin::session::Session;
use ashram_admin::sync::StatusFilter;

#[derive(Parser)]
#[command(name = "ashram-admin")]
#[command(about = "Admin console for ashram guesthouse management")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new config file
    Init {
        /// Output path for config file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the dashboard overview numbers
    Stats,

    /// Manage rooms
    Rooms {
        #[command(subcommand)]
        command: RoomsCommand,
    },

    /// Manage bookings
    Bookings {
        #[command(subcommand)]
        command: BookingsCommand,
    },

    /// Manage admin users
    Admins {
        #[command(subcommand)]
        command: AdminsCommand,
    },

    /// Manage donation categories
    Donations {
        #[command(subcommand)]
        command: DonationsCommand,
    },
}

#[derive(Subcommand)]
enum RoomsCommand {
    /// List rooms, optionally filtered
    List {
        /// Substring match on name and description
        #[arg(short, long)]
        search: Option<String>,

        /// available, occupied, maintenance, or all
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Create a room
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        price: f64,

        #[arg(long, default_value_t = 0.0)]
        discount: f64,

        #[arg(long, default_value_t = 1)]
        beds: u32,

        #[arg(long, default_value_t = 1)]
        max_guests: u32,

        /// Repeat for each amenity
        #[arg(long = "amenity")]
        amenities: Vec<String>,

        #[arg(long, default_value = "available")]
        status: String,

        /// Repeat for each image file to upload (max 5)
        #[arg(long = "image")]
        images: Vec<PathBuf>,
    },

    /// Delete a room
    Delete { id: String },
}

#[derive(Subcommand)]
enum BookingsCommand {
    /// List bookings, optionally filtered
    List {
        /// Substring match on guest name, email, room, or booking id
        #[arg(short, long)]
        search: Option<String>,

        /// pending, confirmed, checked-in, checked-out, cancelled, or all
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Change a booking's status
    SetStatus { id: String, status: String },

    /// Print the receipt for a booking
    Receipt { id: String },
}

#[derive(Subcommand)]
enum AdminsCommand {
    /// List admin users, optionally filtered
    List {
        /// Substring match on name and email
        #[arg(short, long)]
        search: Option<String>,

        /// active, pending, inactive, or all
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Invite one admin
    Invite {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// admin or super-admin
        #[arg(long, default_value = "admin")]
        role: String,
    },

    /// Invite admins from a file with one email per line
    InviteBulk { file: PathBuf },

    /// Change an admin's status
    SetStatus { id: String, status: String },
}

#[derive(Subcommand)]
enum DonationsCommand {
    /// List donation categories, optionally filtered
    List {
        /// Substring match on title, english title, and description
        #[arg(short, long)]
        search: Option<String>,

        /// active, inactive, or all
        #[arg(long, default_value = "all")]
        status: String,
    },

    /// Create a donation category
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        english_title: String,

        #[arg(long)]
        description: String,

        /// Repeat for each suggested amount; defaults apply when omitted
        #[arg(long = "amount")]
        amounts: Vec<u64>,

        #[arg(long)]
        icon: Option<String>,

        #[arg(long)]
        color: Option<String>,
    },

    /// Flip a category between active and inactive
    Toggle { id: String },

    /// Delete a donation category
    Delete { id: String },

    /// Export the overview as CSV
    Export {
        #[arg(short, long)]
        search: Option<String>,

        #[arg(long, default_value = "all")]
        status: String,

        /// Output path
        #[arg(short, long, default_value = "donations-overview.csv")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ashram_admin=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let config = if let Some(path) = &cli.config {
        Config::load_from(path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Commands::Init { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from("config.toml"));
            let cfg = Config::default();
            cfg.save_to(&path)?;

            println!("Created config file: {}", path.display());
            println!();
            println!("Next steps:");
            println!("  1. Point api.base_url at your management API");
            println!("  2. Log in: ashram-admin login --email you@ashram.com --password ...");

            Ok(())
        }

        Commands::Login { email, password } => {
            let api = HttpApi::new(&config.api, None)?;
            match api.login(&email, &password).await {
                Ok(response) => {
                    let session = Session {
                        token: response.token,
                        admin_name: response.admin.name.clone(),
                    };
                    session.save()?;
                    println!("✅ Login successful!");
                    println!("Welcome back, {}!", response.admin.name);
                    Ok(())
                }
                Err(err) => bail!("Login failed: {err}"),
            }
        }

        Commands::Logout => {
            Session::clear()?;
            println!("Logged out.");
            Ok(())
        }

        Commands::Stats => {
            let api = authed_client(&config)?;
            let stats = load_dashboard(&api).await?;
            println!("Total Rooms:    {} ({} available)", stats.total_rooms, stats.available_rooms);
            println!("Total Bookings: {} ({} pending)", stats.total_bookings, stats.pending_bookings);
            println!("Admin Users:    {}", stats.total_admins);
            println!("Revenue:        {}", format_rupees(stats.revenue));
            Ok(())
        }

        Commands::Rooms { command } => rooms(&config, command).await,
        Commands::Bookings { command } => bookings(&config, command).await,
        Commands::Admins { command } => admins(&config, command).await,
        Commands::Donations { command } => donations(&config, command).await,
    }
}

async fn rooms(config: &Config, command: RoomsCommand) -> Result<()> {
    let api = authed_client(config)?;
    let mut page = RoomsPage::new();

    match command {
        RoomsCommand::List { search, status } => {
            page.load(&api).await;
            page.list.set_query(search.unwrap_or_default());
            page.list.set_status_filter(StatusFilter::from_value(&status));
            print_notices(&mut page.notices);

            let stats = page.stats;
            println!(
                "{} rooms · {} available · {} occupied · {} maintenance",
                stats.total_rooms,
                stats.available_rooms,
                stats.occupied_rooms,
                stats.maintenance_rooms
            );
            println!();

            if page.list.view().is_empty() {
                println!("No rooms found");
            }
            for room in page.list.view() {
                println!(
                    "{}  {} [{}] {} · {} beds · up to {} guests",
                    room.id,
                    room.name,
                    room.status,
                    format_rupees(room.price),
                    room.beds,
                    room.max_guests
                );
            }
            Ok(())
        }

        RoomsCommand::Add {
            name,
            description,
            price,
            discount,
            beds,
            max_guests,
            amenities,
            status,
            images,
        } => {
            let status: RoomStatus = status.parse().map_err(anyhow::Error::msg)?;
            let files = images
                .iter()
                .map(read_image)
                .collect::<Result<Vec<_>>>()?;

            page.open_add();
            if let Some(draft) = page.dialog.draft_mut() {
                draft.name = name;
                draft.description = description;
                draft.price = price;
                draft.discount = discount;
                draft.beds = beds;
                draft.max_guests = max_guests;
                draft.amenities = amenities;
                draft.status = status;
            }
            page.attach_images(files);

            let result = page.submit(&api).await;
            print_notices(&mut page.notices);
            ensure!(result.is_ok(), "room was not saved");
            Ok(())
        }

        RoomsCommand::Delete { id } => {
            let result = page.delete(&api, &id).await;
            print_notices(&mut page.notices);
            ensure!(result.is_ok(), "room was not deleted");
            Ok(())
        }
    }
}

async fn bookings(config: &Config, command: BookingsCommand) -> Result<()> {
    let api = authed_client(config)?;
    let mut page = BookingsPage::new();

    match command {
        BookingsCommand::List { search, status } => {
            page.reload(&api).await;
            page.list.set_query(search.unwrap_or_default());
            page.list.set_status_filter(StatusFilter::from_value(&status));
            print_notices(&mut page.notices);

            if page.list.view().is_empty() {
                println!("No bookings found");
            }
            for booking in page.list.view() {
                let room = booking
                    .room
                    .as_ref()
                    .map(|r| r.name.as_str())
                    .unwrap_or("Room");
                println!(
                    "{}  {} · {} · {} → {} · {} [{}]",
                    booking.id,
                    booking.guest_name,
                    room,
                    booking.check_in.format("%d %b %Y"),
                    booking.check_out.format("%d %b %Y"),
                    format_rupees(booking.total_price),
                    booking.status.label()
                );
            }
            Ok(())
        }

        BookingsCommand::SetStatus { id, status } => {
            let status: BookingStatus = status.parse().map_err(anyhow::Error::msg)?;
            let result = page.set_status(&api, &id, status).await;
            print_notices(&mut page.notices);
            ensure!(result.is_ok(), "booking status was not updated");
            Ok(())
        }

        BookingsCommand::Receipt { id } => {
            page.reload(&api).await;
            print_notices(&mut page.notices);
            let booking = page
                .list
                .records()
                .iter()
                .find(|b| b.id == id)
                .with_context(|| format!("Booking '{id}' not found"))?;
            println!("{}", page.receipt(booking));
            Ok(())
        }
    }
}

async fn admins(config: &Config, command: AdminsCommand) -> Result<()> {
    let api = authed_client(config)?;
    let mut page = AdminsPage::new();

    match command {
        AdminsCommand::List { search, status } => {
            page.reload(&api).await;
            page.list.set_query(search.unwrap_or_default());
            page.list.set_status_filter(StatusFilter::from_value(&status));
            print_notices(&mut page.notices);

            if page.list.view().is_empty() {
                println!("No admin users found");
            }
            for admin in page.list.view() {
                println!(
                    "{}  {} <{}> {} [{}]",
                    admin.id,
                    admin.name,
                    admin.email,
                    admin.role.as_str(),
                    admin.status.as_str()
                );
            }
            Ok(())
        }

        AdminsCommand::Invite { name, email, role } => {
            let role: AdminRole = role.parse().map_err(anyhow::Error::msg)?;
            page.open_invite();
            if let Some(draft) = page.dialog.draft_mut() {
                draft.name = name;
                draft.email = email;
                draft.role = role;
            }
            let result = page.submit_invite(&api).await;
            print_notices(&mut page.notices);
            ensure!(result.is_ok(), "admin was not invited");
            Ok(())
        }

        AdminsCommand::InviteBulk { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let invites = parse_bulk_invites(&text);
            if invites.is_empty() {
                bail!("No email addresses found in {}", file.display());
            }
            let count = invites.len();
            let result = page.invite(&api, invites).await;
            print_notices(&mut page.notices);
            ensure!(result.is_ok(), "admins were not invited");
            println!("Invited {count} admin(s)");
            Ok(())
        }

        AdminsCommand::SetStatus { id, status } => {
            let status: AdminStatus = status.parse().map_err(anyhow::Error::msg)?;
            let result = page.set_status(&api, &id, status).await;
            print_notices(&mut page.notices);
            ensure!(result.is_ok(), "admin status was not updated");
            Ok(())
        }
    }
}

async fn donations(config: &Config, command: DonationsCommand) -> Result<()> {
    let api = authed_client(config)?;
    let mut page = DonationsPage::new();

    match command {
        DonationsCommand::List { search, status } => {
            page.load(&api).await;
            page.list.set_query(search.unwrap_or_default());
            page.list.set_status_filter(StatusFilter::from_value(&status));
            print_notices(&mut page.notices);

            let stats = page.stats;
            println!(
                "{} categories · {} active · {} inactive",
                stats.total_donations, stats.active_donations, stats.inactive_donations
            );
            println!();

            if page.list.view().is_empty() {
                println!("No donation categories found");
            }
            for category in page.list.view() {
                let amounts = category
                    .suggested
                    .iter()
                    .map(|a| format_rupees(*a as f64))
                    .collect::<Vec<_>>()
                    .join(", ");
                let state = if category.is_active { "active" } else { "inactive" };
                println!(
                    "{}  {} ({}) [{}] {}",
                    category.id, category.title, category.english_title, state, amounts
                );
            }
            Ok(())
        }

        DonationsCommand::Add {
            title,
            english_title,
            description,
            amounts,
            icon,
            color,
        } => {
            page.open_add();
            if let Some(draft) = page.dialog.draft_mut() {
                draft.title = title;
                draft.english_title = english_title;
                draft.description = description;
                if !amounts.is_empty() {
                    draft.suggested.clear();
                    for amount in amounts {
                        draft.add_amount(amount).map_err(anyhow::Error::new)?;
                    }
                }
                if let Some(icon) = icon {
                    draft.icon = icon;
                }
                if let Some(color) = color {
                    draft.color = color;
                }
            }
            let result = page.submit(&api).await;
            print_notices(&mut page.notices);
            ensure!(result.is_ok(), "donation category was not saved");
            Ok(())
        }

        DonationsCommand::Toggle { id } => {
            let result = page.toggle_status(&api, &id).await;
            print_notices(&mut page.notices);
            ensure!(result.is_ok(), "donation status was not updated");
            Ok(())
        }

        DonationsCommand::Delete { id } => {
            let result = page.delete(&api, &id).await;
            print_notices(&mut page.notices);
            ensure!(result.is_ok(), "donation category was not deleted");
            Ok(())
        }

        DonationsCommand::Export {
            search,
            status,
            output,
        } => {
            page.reload(&api).await;
            page.list.set_query(search.unwrap_or_default());
            page.list.set_status_filter(StatusFilter::from_value(&status));
            print_notices(&mut page.notices);

            let csv = page.export_csv();
            let count = page.list.view().len();
            std::fs::write(&output, csv)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Exported {count} categories to {}", output.display());
            Ok(())
        }
    }
}

/// Build an authenticated client from the stored session.
fn authed_client(config: &Config) -> Result<HttpApi> {
    let session = Session::load()?
        .context("Not logged in. Run 'ashram-admin login' first.")?;
    Ok(HttpApi::new(&config.api, Some(session.credentials()))?)
}

fn print_notices(notices: &mut Notifications) {
    for notice in notices.drain() {
        match notice.level {
            Level::Success => println!("✅ {}", notice.message),
            Level::Warning => println!("⚠️  {}", notice.message),
            Level::Error => eprintln!("❌ {}", notice.message),
        }
    }
}

fn read_image(path: &PathBuf) -> Result<ImageFile> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();
    let content_type = match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
    .to_string();

    Ok(ImageFile {
        file_name,
        content_type,
        bytes,
    })
}
