use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticket_client::{
    config::Config,
    screens::{
        AttendeeScreen, AttendeeState, ConfirmationScreen, ConfirmationState, EventDetailScreen,
        EventDetailState, EventListScreen, EventListState, LoginScreen, LoginState,
        RegisterScreen, RegisterState, SeatSelectionScreen, SeatSelectionState,
    },
    seating::{build_grid, SeatCell, SeatOccupancy, SeatPosition, ToggleOutcome, VenueLayout},
    services::TicketApi,
    App,
};

#[derive(Debug, Parser)]
#[command(name = "ticket_client", version)]
#[command(about = "Console client for the event ticket backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct Credentials {
    /// Username used to log in
    #[arg(long, env = "TICKET_USERNAME")]
    username: String,

    /// Password used to log in
    #[arg(long, env = "TICKET_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check credentials against the backend
    Login(Credentials),

    /// Create a new account
    Register {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
    },

    /// List upcoming events
    Events(Credentials),

    /// Show one event
    Event {
        id: i64,
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Print the seat map of an event
    Seats {
        id: i64,
        #[command(flatten)]
        credentials: Credentials,
    },

    /// Buy seats: select, lock, assign names and confirm
    Buy {
        #[arg(long)]
        event: i64,
        /// Seat as ROW:COLUMN, repeat for several seats
        #[arg(long = "seat", required = true)]
        seats: Vec<SeatPosition>,
        /// Attendee name for each seat, in the same order
        #[arg(long = "name", required = true)]
        names: Vec<String>,
        #[command(flatten)]
        credentials: Credentials,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("failed to load configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    info!("Starting ticket client ({})", config.app.environment);
    let mut app = App::new(config)?;

    match cli.command {
        Command::Login(credentials) => {
            sign_in(&mut app, &credentials).await?;
            println!("logged in as {}", app.session.username().unwrap_or_default());
        }
        Command::Register {
            credentials,
            first_name,
            last_name,
            email,
        } => register(&mut app, credentials, first_name, last_name, email).await?,
        Command::Events(credentials) => {
            sign_in(&mut app, &credentials).await?;
            list_events(&app).await?;
        }
        Command::Event { id, credentials } => {
            sign_in(&mut app, &credentials).await?;
            show_event(&app, id).await?;
        }
        Command::Seats { id, credentials } => {
            sign_in(&mut app, &credentials).await?;
            show_seats(&app, id).await?;
        }
        Command::Buy {
            event,
            seats,
            names,
            credentials,
        } => {
            if seats.len() != names.len() {
                bail!("got {} seats but {} names", seats.len(), names.len());
            }
            sign_in(&mut app, &credentials).await?;
            buy(&app, event, &seats, &names).await?;
        }
    }
    Ok(())
}

async fn sign_in(app: &mut App, credentials: &Credentials) -> Result<()> {
    let mut screen = LoginScreen::new(app.api());
    screen.set_username(credentials.username.as_str());
    screen.set_password(credentials.password.as_str());

    match screen.submit().await {
        LoginState::Success(session) => {
            app.sign_in(session);
            Ok(())
        }
        LoginState::Failed(message) => bail!("login failed: {}", message),
        _ => {
            let problems: Vec<&str> = [screen.username_error(), screen.password_error()]
                .into_iter()
                .flatten()
                .collect();
            bail!("invalid credentials: {}", problems.join(", "))
        }
    }
}

async fn register(
    app: &mut App,
    credentials: Credentials,
    first_name: String,
    last_name: String,
    email: String,
) -> Result<()> {
    let mut screen = RegisterScreen::new(app.api());
    screen.set_username(credentials.username);
    screen.set_password(credentials.password.as_str());
    screen.set_confirm_password(credentials.password);
    screen.set_first_name(first_name);
    screen.set_last_name(last_name);
    screen.set_email(email);

    match screen.submit().await {
        RegisterState::Success(session) => {
            println!("registered {}", session.username);
            app.sign_in(session);
            Ok(())
        }
        RegisterState::Failed(message) => bail!("registration failed: {}", message),
        _ => {
            let problems: Vec<String> = screen
                .errors()
                .iter()
                .map(|(field, message)| format!("{}: {}", field, message))
                .collect();
            bail!("invalid registration: {}", problems.join("; "))
        }
    }
}

async fn list_events(app: &App) -> Result<()> {
    let mut screen = EventListScreen::new(app.api());
    match screen.load().await {
        EventListState::Ready(events) => {
            for event in events {
                let price = event
                    .ticket_price
                    .map(|p| format!("{:.2}", p))
                    .unwrap_or_else(|| "-".to_string());
                let date = event
                    .starts_at()
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                println!("{:>4}  {:<40} {:>16}  {}", event.id, event.title, date, price);
            }
            Ok(())
        }
        EventListState::Failed(message) => bail!("could not load events: {}", message),
        EventListState::Loading => bail!("events are still loading"),
    }
}

async fn show_event(app: &App, id: i64) -> Result<()> {
    let mut screen = EventDetailScreen::new(app.api());
    match screen.load(id).await {
        EventDetailState::Ready(event) => {
            println!("{}", event.title);
            if let Some(description) = &event.description {
                println!("{}", description);
            }
            if let Some(address) = &event.address {
                println!("at {}", address);
            }
            let layout = VenueLayout::from_dimensions(event.seat_rows, event.seat_columns);
            println!("hall: {} rows x {} columns", layout.rows, layout.columns);
            for presenter in event.presenters() {
                println!("  - {}", presenter.full_name());
            }
            Ok(())
        }
        EventDetailState::Failed(message) => bail!("could not load event {}: {}", id, message),
        EventDetailState::Loading => bail!("event {} is still loading", id),
    }
}

async fn show_seats(app: &App, id: i64) -> Result<()> {
    let api = app.api();
    let event = api.event_detail(id).await?;
    let occupancy = api.seat_occupancy(id).await?;
    let layout = VenueLayout::from_event(&event)?;
    print!("{}", render_grid(layout, &build_grid(layout, &occupancy)));
    println!(". free  X sold  L locked  * yours");
    Ok(())
}

fn render_grid(layout: VenueLayout, cells: &[SeatCell]) -> String {
    let mut out = String::new();
    if layout.columns == 0 {
        return out;
    }
    for row in cells.chunks(layout.columns as usize) {
        let line: String = row
            .iter()
            .map(|cell| match cell.state {
                SeatOccupancy::Free => '.',
                SeatOccupancy::Sold => 'X',
                SeatOccupancy::LockedByOther => 'L',
                SeatOccupancy::SelectedByMe => '*',
            })
            .collect();
        out.push_str(&line);
        out.push('\n');
    }
    out
}

async fn buy(app: &App, event_id: i64, seats: &[SeatPosition], names: &[String]) -> Result<()> {
    let mut selection = SeatSelectionScreen::new(app.api(), app.max_seats());
    if let SeatSelectionState::Failed(message) = selection.load(event_id).await {
        bail!("could not open event {}: {}", event_id, message);
    }

    for seat in seats {
        match selection.toggle(seat.row, seat.column) {
            Some(ToggleOutcome::Selected) => {}
            other => {
                selection.abandon().await;
                bail!("seat {} cannot be selected ({:?})", seat, other);
            }
        }
    }
    if let Err(e) = selection.submit().await {
        selection.abandon().await;
        bail!("seats were not reserved: {}", e);
    }
    println!("reserved {} seats", seats.len());

    let mut confirmation = ConfirmationScreen::new(app.api());

    let mut attendees = AttendeeScreen::new(app.api());
    if let AttendeeState::Failed(message) = attendees.load().await {
        confirmation.cancel().await;
        bail!("could not load reserved seats: {}", message);
    }
    for (seat, name) in seats.iter().zip(names) {
        attendees.set_name(seat.row, seat.column, name.as_str());
    }
    if let Err(e) = attendees.submit().await {
        if let AttendeeState::Ready(entries) = attendees.state() {
            for entry in entries.iter().filter(|e| e.error.is_some()) {
                warn!(
                    "Seat {}: {}",
                    entry.position,
                    entry.error.as_deref().unwrap_or_default()
                );
            }
        }
        confirmation.cancel().await;
        bail!("attendee names were rejected: {}", e);
    }

    match confirmation.load().await {
        ConfirmationState::Ready(summary) => {
            println!(
                "{}: {} seats x {:.2} = {:.2}",
                summary.event.title,
                summary.seats.len(),
                summary.unit_price,
                summary.total_price
            );
        }
        ConfirmationState::Failed(message) => {
            confirmation.cancel().await;
            bail!("could not build the purchase summary: {}", message);
        }
        _ => {}
    }

    match confirmation.confirm().await {
        Ok(sale) => {
            if let ConfirmationState::Completed(message) = confirmation.state() {
                println!("{}", message);
            }
            if let Some(id) = sale.id {
                println!("sale #{}", id);
            }
            Ok(())
        }
        Err(e) => {
            confirmation.cancel().await;
            bail!("purchase failed: {}", e)
        }
    }
}
