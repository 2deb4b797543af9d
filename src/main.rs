//! # slackdump CLI
//!
//! Command-line interface for the slackdump library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::warn;

use slackdump::cli::Args;
use slackdump::client::{CancelToken, SlackClient, validate_channel, validate_token};
use slackdump::core::{
    AuthorFilter, MessageFilter, PatternFilter, TimeRangeFilter, apply_filters, export,
    parse_datetime, render_preview,
};
use slackdump::error::ErrorKind;
use slackdump::format::OutputFormat;
use slackdump::{SlackdumpError, logging};

fn main() {
    let args = <Args as ClapParser>::parse();
    logging::init(args.verbosity());

    if let Err(e) = run(&args) {
        report(&e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), SlackdumpError> {
    let total_start = Instant::now();
    let format: OutputFormat = args.format.into();

    validate_token(&args.token)?;
    validate_channel(&args.channel)?;

    // Print header
    println!("💬 slackdump v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📺 Channel: {}", args.channel);
    if let Some(ref output) = args.output {
        println!("💾 Output:  {}", output);
        println!("📄 Format:  {}", format);
    }
    if let Some(limit) = args.limit {
        println!("🔢 Limit:   {}", limit);
    }

    // Filters are built before any network call so bad input fails fast
    let filters = build_filters(args)?;
    println!();

    let cancel = install_interrupt_handler();

    println!("🔧 Initializing Slack API connection...");
    let client =
        SlackClient::connect_cancellable(&args.token, args.client_config(), cancel.clone())?;

    println!("📡 Fetching messages from channel {}...", args.channel);
    let fetch_start = Instant::now();
    let messages = client.fetch(&args.channel, args.fetch_limit())?;
    cancel.check()?;
    println!(
        "   Fetched {} messages ({:.2}s)",
        messages.len(),
        fetch_start.elapsed().as_secs_f64()
    );

    if messages.is_empty() {
        println!("⚠️  No messages found in channel");
        return Ok(());
    }

    let fetched_count = messages.len();
    let messages = if filters.is_empty() {
        messages
    } else {
        let filtered = apply_filters(messages, &filters);
        println!("✅ Filtered {} → {} messages", fetched_count, filtered.len());
        filtered
    };
    cancel.check()?;

    match args.output {
        Some(ref output) => {
            let written = export(&messages, output, format)?;
            if written == 0 {
                println!("⚠️  No messages to export");
            } else {
                println!("📄 Exported {} messages to {}", written, output);
            }

            // Summary
            println!();
            println!("📊 Summary:");
            println!("   Fetched:   {} messages", fetched_count);
            if !filters.is_empty() {
                println!("   Filtered:  {} messages", messages.len());
            }
            println!("   Total time:  {:.2}s", total_start.elapsed().as_secs_f64());
        }
        None => print!("{}", render_preview(&messages, messages.len())),
    }

    // An interrupt during the write still fails the run
    cancel.check()
}

/// Routes Ctrl-C into a [`CancelToken`].
///
/// The first interrupt sets the token, which the client and the stage
/// boundaries in [`run`] observe. A second one exits at once.
fn install_interrupt_handler() -> CancelToken {
    let cancel = CancelToken::new();
    let handle = cancel.clone();
    let result = ctrlc::set_handler(move || {
        if handle.is_cancelled() {
            eprintln!("\n⚠️  {}", SlackdumpError::Cancelled);
            process::exit(1);
        }
        handle.cancel();
    });
    if let Err(e) = result {
        warn!("could not install Ctrl-C handler: {e}");
    }
    cancel
}

/// Builds the filter pipeline from the flags, printing each one.
fn build_filters(args: &Args) -> Result<Vec<Box<dyn MessageFilter>>, SlackdumpError> {
    let mut filters: Vec<Box<dyn MessageFilter>> = Vec::new();

    if args.start_time.is_some() || args.end_time.is_some() {
        let start = args.start_time.as_deref().map(parse_datetime).transpose()?;
        let end = args.end_time.as_deref().map(parse_datetime).transpose()?;
        filters.push(Box::new(TimeRangeFilter::new(start, end)?));
        println!(
            "🕒 Applied time filter: {} to {}",
            args.start_time.as_deref().unwrap_or("start"),
            args.end_time.as_deref().unwrap_or("end")
        );
    }

    if let Some(ref pattern) = args.regex {
        filters.push(Box::new(PatternFilter::new(pattern, args.case_sensitive)?));
        let case_info = if args.case_sensitive {
            "case-sensitive"
        } else {
            "case-insensitive"
        };
        println!("🔍 Applied regex filter: '{}' ({})", pattern, case_info);
    }

    if let Some(ref users) = args.users {
        filters.push(Box::new(AuthorFilter::new(users)?));
        println!("👥 Applied user filter: {}", users.join(", "));
    }

    Ok(filters)
}

/// Prints `err` with a hint matching its kind.
fn report(err: &SlackdumpError) {
    match err.kind() {
        ErrorKind::Cancelled => eprintln!("\n⚠️  {}", err),
        ErrorKind::Network => {
            eprintln!("❌ Network Error: {}", err);
            eprintln!(
                "💡 Try again in a few moments. If problem persists, check your internet connection."
            );
        }
        ErrorKind::Configuration => {
            eprintln!("❌ Error: {}", err);
            match err {
                SlackdumpError::InvalidToken { .. } | SlackdumpError::InvalidAuth => {
                    eprintln!("💡 Setup instructions:");
                    eprintln!("   1. Go to https://api.slack.com/apps");
                    eprintln!("   2. Create a new app or select existing app");
                    eprintln!("   3. Go to OAuth & Permissions");
                    eprintln!("   4. Add 'channels:history' scope");
                    eprintln!("   5. Install app to workspace");
                    eprintln!("   6. Copy 'Bot User OAuth Token' (starts with xoxb-)");
                }
                SlackdumpError::InvalidChannel { .. } | SlackdumpError::ChannelNotFound => {
                    eprintln!("💡 To find channel ID:");
                    eprintln!("   1. Right-click on channel name in Slack");
                    eprintln!("   2. Select 'Copy link'");
                    eprintln!("   3. Extract ID from URL (e.g., C1234567890)");
                }
                _ => {}
            }
        }
        ErrorKind::Api | ErrorKind::Io | ErrorKind::Permission => eprintln!("❌ Error: {}", err),
    }
}
