use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use inquire::Text;

use crate::clients::booking_client::HttpBookingClient;
use crate::config::ClientSettings;
use crate::handlers::responder::{PageResponder, TerminalResponder};
use crate::models::booking::{MutationIntent, TriggerData};
use crate::service::dialog::BookingDialog;
use crate::service::submitter::MutationSubmitter;

#[derive(Parser)]
#[command(about = "Extend, shorten or delete room bookings")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Widen a booking so it still covers its original dates
    Extend(RangeArgs),
    /// Narrow a booking within its original dates
    Shorten(RangeArgs),
    /// Delete a booking
    Delete(TargetArgs),
}

#[derive(Args)]
struct TargetArgs {
    #[arg(long)]
    event_id: String,
    #[arg(long)]
    section_id: Option<String>,
    /// Page the server should redirect back to (my_guests or rooms_master)
    #[arg(long)]
    source_page: Option<String>,
}

#[derive(Args)]
struct RangeArgs {
    #[command(flatten)]
    target: TargetArgs,
    #[arg(long)]
    original_start: String,
    #[arg(long)]
    original_end: String,
    /// New start date; prompted for when omitted
    #[arg(long)]
    start: Option<String>,
    /// New end date; prompted for when omitted
    #[arg(long)]
    end: Option<String>,
}

pub async fn cli(settings: ClientSettings) -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let transport = Arc::new(HttpBookingClient::new(
        settings.base_url.clone(),
        settings.timeout,
    )?);
    let responder = Arc::new(TerminalResponder::new(Some(settings.base_url.clone())));
    let submitter = MutationSubmitter::new(transport, responder, settings.url_prefix.clone());

    let dialog = run_command(&cli.command, &settings, &submitter).await?;
    for note in dialog.form().annotations() {
        println!("{}: {}", note.field, note.html);
    }
    Ok(())
}

/// Opens the dialog for `command`, applies the requested dates and submits.
///
/// Rejected dates and a missing CSRF token have already been reported
/// through the responder when this returns `Err`; nothing is sent then.
async fn run_command(
    command: &Commands,
    settings: &ClientSettings,
    submitter: &MutationSubmitter,
) -> Result<BookingDialog, Box<dyn std::error::Error>> {
    let mut dialog = match command {
        Commands::Extend(args) => {
            open_range_dialog(MutationIntent::Extend, args, settings, submitter).await?
        }
        Commands::Shorten(args) => {
            open_range_dialog(MutationIntent::Shorten, args, settings, submitter).await?
        }
        Commands::Delete(args) => {
            let trigger = TriggerData {
                event_id: args.event_id.clone(),
                section_id: args.section_id.clone(),
                ..TriggerData::default()
            };
            BookingDialog::open(
                MutationIntent::Delete,
                &trigger,
                settings.csrf_token.as_deref(),
                source_page(&args.source_page, settings),
            )?
        }
    };

    submitter.submit(&mut dialog).await?;
    Ok(dialog)
}

async fn open_range_dialog(
    intent: MutationIntent,
    args: &RangeArgs,
    settings: &ClientSettings,
    submitter: &MutationSubmitter,
) -> Result<BookingDialog, Box<dyn std::error::Error>> {
    let trigger = TriggerData {
        event_id: args.target.event_id.clone(),
        section_id: args.target.section_id.clone(),
        original_start: Some(args.original_start.clone()),
        original_end: Some(args.original_end.clone()),
    };
    let mut dialog = BookingDialog::open(
        intent,
        &trigger,
        settings.csrf_token.as_deref(),
        source_page(&args.target.source_page, settings),
    )?;
    let responder = submitter.responder();

    // A rejected flag reverts both dates, so nothing after it may be applied.
    if let Some(start) = &args.start {
        dialog.set_start(start, responder).await?;
    }
    if let Some(end) = &args.end {
        dialog.set_end(end, responder).await?;
    }

    if args.start.is_none() {
        prompt_until_valid(&mut dialog, DateField::Start, responder).await?;
    }
    if args.end.is_none() {
        prompt_until_valid(&mut dialog, DateField::End, responder).await?;
    }
    Ok(dialog)
}

#[derive(Clone, Copy)]
enum DateField {
    Start,
    End,
}

async fn prompt_until_valid(
    dialog: &mut BookingDialog,
    field: DateField,
    responder: &dyn PageResponder,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let current = dialog.candidate()?;
        let (label, default) = match field {
            DateField::Start => ("New start date (YYYY-MM-DD)", current.start),
            DateField::End => ("New end date (YYYY-MM-DD)", current.end),
        };
        let default = default.to_string();
        let value = Text::new(label).with_default(&default).prompt()?;
        let applied = match field {
            DateField::Start => dialog.set_start(&value, responder).await,
            DateField::End => dialog.set_end(&value, responder).await,
        };
        if applied.is_ok() {
            return Ok(());
        }
    }
}

fn source_page<'a>(arg: &'a Option<String>, settings: &'a ClientSettings) -> &'a str {
    arg.as_deref().unwrap_or(&settings.source_page)
}
