use std::{env, fs::OpenOptions, sync::Arc};

use clap::Parser;
use time::OffsetDateTime;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use pocket_ledger::{
    FetchParams, Locale, Localizer, TransactionApiClient, TransactionFetcher, TransactionFilter,
    category_emoji, group_transactions_by_year, local_offset,
};

const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Browse the transactions served by a pocket-ledger API from the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the transactions API. Falls back to the API_URL
    /// environment variable, then to http://localhost:3000.
    #[arg(long)]
    api_url: Option<String>,

    /// Which transaction types to show: all, income or expense.
    #[arg(long, default_value = "all")]
    filter: String,

    /// Only show transactions whose merchant contains this text.
    #[arg(long)]
    merchant: Option<String>,

    /// Display language: en or es.
    #[arg(long, default_value = "en")]
    locale: String,

    /// Canonical timezone for dates, e.g. Pacific/Auckland.
    #[arg(long, default_value = "Etc/UTC")]
    timezone: String,

    /// How many pages to load.
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let api_url = args
        .api_url
        .or_else(|| env::var("API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

    let filter: TransactionFilter = args.filter.parse().expect("Invalid --filter");
    let locale: Locale = args.locale.parse().expect("Invalid --locale");
    let offset = local_offset(&args.timezone).expect("Invalid --timezone");

    let localizer = Localizer::new(locale, offset);
    let client = Arc::new(TransactionApiClient::new(&api_url));

    tracing::info!("fetching transactions from {api_url}");
    let fetcher = TransactionFetcher::new(
        client,
        FetchParams {
            type_filter: filter.type_filter(),
            merchant: args.merchant,
        },
    );
    fetcher.wait_until_idle().await;

    for _ in 1..args.pages {
        if !fetcher.has_next_page() {
            break;
        }

        fetcher.load_more().await;
    }

    if let Some(error) = fetcher.error() {
        eprintln!("{}", localizer.something_went_wrong());
        eprintln!("{error}");
        std::process::exit(1);
    }

    print_transactions(&fetcher, &localizer);
}

fn print_transactions(fetcher: &TransactionFetcher, localizer: &Localizer) {
    let transactions = fetcher.transactions();

    if transactions.is_empty() {
        println!("{}", localizer.no_transactions());
        return;
    }

    let today = OffsetDateTime::now_utc().to_offset(localizer.offset()).date();

    for year_section in group_transactions_by_year(&transactions, localizer.offset()) {
        println!("{}", year_section.year);

        for day_section in year_section.days {
            println!("  {}", localizer.section_date_label(day_section.date, today));

            for transaction in day_section.transactions {
                println!(
                    "    {} {}  {}  {}",
                    category_emoji(&transaction.category),
                    transaction.merchant,
                    localizer.currency(transaction.amount),
                    localizer.date_time(transaction.date),
                );
            }
        }
    }

    println!();
    println!("{}", localizer.transaction_count(transactions.len()));
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}
