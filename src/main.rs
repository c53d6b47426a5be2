//! Pavilion CLI entry point.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pavilion::{
    BookingClient, BookingRequest, Config, DayStamp, PavilionError, Resource, ValidationError,
};

/// Pavilion: booking client for the Banana Mahal function hall & guest house
#[derive(Parser, Debug)]
#[command(name = "pavilion")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether dates are available for a venue
    Check {
        /// Venue: "hall" or "guest-house"
        #[arg(short, long)]
        resource: String,
        /// Start date (yyyy-MM-dd)
        #[arg(short, long)]
        start: String,
        /// End date for guest house stays (yyyy-MM-dd)
        #[arg(short, long)]
        end: Option<String>,
    },
    /// List the days a calendar must disable for a venue
    Blocked {
        /// Venue: "hall" or "guest-house"
        #[arg(short, long)]
        resource: String,
        /// Days ahead to scan (defaults to the configured horizon)
        #[arg(short, long)]
        days: Option<i64>,
    },
    /// List the blocking reservations currently on the calendar
    List,
    /// Submit a booking request
    Book {
        /// Venue: "hall" or "guest-house"
        #[arg(short, long)]
        resource: String,
        /// Purpose of the booking (e.g. "Marriage", "Family Stay")
        #[arg(short = 't', long)]
        event_type: String,
        /// Start date (yyyy-MM-dd)
        #[arg(short, long)]
        start: String,
        /// End date for guest house stays (yyyy-MM-dd)
        #[arg(short, long)]
        end: Option<String>,
        /// Time slot for hall bookings (FULL_DAY, MORNING, AFTERNOON, EVENING, NIGHT)
        #[arg(long)]
        slot: Option<String>,
        /// Contact name
        #[arg(short, long)]
        name: String,
        /// 10-digit contact phone
        #[arg(short, long)]
        phone: String,
        /// Number of guests
        #[arg(short, long)]
        guests: i64,
        /// Optional free-text message
        #[arg(short, long, default_value = "")]
        message: String,
    },
}

/// Accept both wire names and CLI-friendly short forms.
fn parse_resource(s: &str) -> Result<Resource, PavilionError> {
    match s.to_ascii_lowercase().as_str() {
        "hall" | "function-hall" | "function hall" => Ok(Resource::FunctionHall),
        "guest-house" | "guesthouse" | "guest house" => Ok(Resource::GuestHouse),
        _ => Err(ValidationError::InvalidResource.into()),
    }
}

fn parse_day(s: &str) -> Result<DayStamp, PavilionError> {
    DayStamp::parse(s).ok_or_else(|| ValidationError::InvalidStartDate.into())
}

#[tokio::main]
async fn main() -> pavilion::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };

    let mut client = BookingClient::from_config(&config)?;
    client.refresh().await;

    match args.command {
        Command::Check {
            resource,
            start,
            end,
        } => {
            let resource = parse_resource(&resource)?;
            let start = parse_day(&start)?;
            let end = end.as_deref().map(parse_day).transpose()?;
            let conflict = client.conflict(resource, start, end);

            if args.json {
                let payload = serde_json::json!({
                    "resource": resource,
                    "start": start,
                    "end": end,
                    "available": conflict.is_none(),
                    "conflict": conflict,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                match conflict {
                    None => println!("{} is available", resource),
                    Some(r) => println!(
                        "{} is blocked by a {:?} reservation from {} to {}",
                        resource, r.status, r.start_day, r.end_day
                    ),
                }
            }
        }
        Command::Blocked { resource, days } => {
            let resource = parse_resource(&resource)?;
            let horizon = days.unwrap_or(config.booking.calendar_horizon_days);
            let blocked = client
                .ledger()
                .blocked_days(resource, DayStamp::today(), horizon);

            if args.json {
                println!("{}", serde_json::to_string_pretty(&blocked)?);
            } else if blocked.is_empty() {
                println!("No blocked days for {} in the next {} days", resource, horizon);
            } else {
                for day in blocked {
                    println!("{}", day);
                }
            }
        }
        Command::List => {
            let reservations = client.ledger().reservations();
            if args.json {
                println!("{}", serde_json::to_string_pretty(reservations)?);
            } else if reservations.is_empty() {
                println!("No blocking reservations");
            } else {
                for r in reservations {
                    println!(
                        "{}  {} -> {}  {:?}",
                        r.resource, r.start_day, r.end_day, r.status
                    );
                }
            }
        }
        Command::Book {
            resource,
            event_type,
            start,
            end,
            slot,
            name,
            phone,
            guests,
            message,
        } => {
            let resource = parse_resource(&resource)?;
            let request = BookingRequest {
                resource: resource.as_str().to_string(),
                event_type,
                start_date: start,
                end_date: end,
                slot,
                name,
                phone,
                guests,
                message,
            };

            let receipt = client.book(request).await?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            } else {
                println!(
                    "Booking request sent: {} on {}{}",
                    receipt.booking.resource,
                    receipt.booking.start_date,
                    if receipt.booking.end_date != receipt.booking.start_date {
                        format!(" to {}", receipt.booking.end_date)
                    } else {
                        String::new()
                    }
                );
                match receipt.notify_link {
                    Some(link) => println!("Notify the owner: {}", link),
                    None => println!("Owner notification link could not be built"),
                }
            }
        }
    }

    Ok(())
}
