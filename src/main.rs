use clap::Parser;
use relationship_view::adapters::outbound::console::{StderrProgressReporter, StdoutPresenter};
use relationship_view::application::dto::FetchRequest;
use relationship_view::application::use_cases::FetchRelationshipUseCase;
use relationship_view::cli::Args;
use relationship_view::config::load_fixture;
use relationship_view::shared::error::ExitCode;
use relationship_view::shared::Result;
use std::io::IsTerminal;
use std::process;
use std::time::Duration;
use tokio::task::LocalSet;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            process::exit(code.as_i32());
        }
    };

    setup_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("relationship_view=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn run(args: Args) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    // Views are single-threaded; their loads run as local tasks
    LocalSet::new().block_on(&runtime, fetch(args))
}

async fn fetch(args: Args) -> Result<()> {
    let config = load_fixture(&args.fixture)?;
    let store = config.build_store()?;
    let record = store.find(&args.record)?;

    // Create adapters (Dependency Injection)
    let formatter = args.format.create_formatter(std::io::stdout().is_terminal());
    let use_case = FetchRelationshipUseCase::new(
        StderrProgressReporter::new(),
        formatter,
        StdoutPresenter::new(),
    );

    let request = FetchRequest::new(
        args.relationship,
        args.document,
        Duration::from_millis(args.wait_ms),
    );
    let response = use_case.execute(record, store.notifier(), request).await?;

    tracing::debug!(
        renderings = response.renderings,
        fetches = store.fetch_count(),
        "fetch_data.done"
    );
    Ok(())
}
