//! sysinformer - website diagnostics CLI

use std::error::Error;
use std::process;
use std::sync::Arc;
use sysinformer::{
    cli::{Cli, Commands, LatencyArgs, WebArgs},
    config::parser::load_config,
    error::{AppError, Result},
    logging::Logger,
    models::{Config, DiagnosticRequest},
    output::{OutputFormatterFactory, ReportSink},
    process::SystemCommandRunner,
    sampler, WebDiagnostics, PKG_NAME, VERSION,
};

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(99);
    }));

    let cli = Cli::parse_args();

    if cli.should_show_topic_help() {
        print!("{}", cli.display_help());
        return;
    }

    if let Err(message) = cli.validate() {
        eprintln!("{}", message);
        process::exit(1);
    }

    let Some(command) = cli.command.clone() else {
        println!("No command given. Use --help for help.");
        return;
    };

    if let Err(e) = run_application(cli, command).await {
        let use_color = colored::control::SHOULD_COLORIZE.should_colorize();
        eprintln!("Error: {}", e.format_for_console(use_color));

        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("Caused by: {}", cause);
            source = cause.source();
        }

        print_error_suggestions(&e);

        process::exit(e.exit_code());
    }
}

async fn run_application(cli: Cli, command: Commands) -> Result<()> {
    let mut config = load_config(cli.clone())?;
    let use_colors = cli.use_colors(config.enable_color);
    config.enable_color = use_colors;
    if !use_colors {
        colored::control::set_override(false);
    }

    let logger = Logger::with_config(PKG_NAME.to_string(), &config);
    let session_id = logger.start_session().await;
    let command_name = match &command {
        Commands::Web(_) => "web",
        Commands::Latency(_) => "latency",
    };
    logger.add_context_field("command".to_string(), command_name).await;
    logger
        .debug("Configuration loaded")
        .field("version", VERSION)
        .field("session_id", &session_id)
        .field("timeout_seconds", config.timeout_seconds)
        .field("ping_count", config.ping_count)
        .field("latency_samples", config.latency_samples)
        .field("color", use_colors)
        .log()
        .await;

    let mut sink = OutputFormatterFactory::create_console_sink(use_colors);

    match command {
        Commands::Web(args) => run_web(&args, &config, logger, &mut sink).await,
        Commands::Latency(args) => run_latency(&args, logger, &mut sink).await,
    }
}

async fn run_web(args: &WebArgs, config: &Config, logger: Logger, sink: &mut dyn ReportSink) -> Result<()> {
    let target = args
        .target()
        .ok_or_else(|| AppError::invalid_input("target must not be empty"))?;
    let request = DiagnosticRequest::from_config(target, args.checks(), config);

    let diagnostics = WebDiagnostics::new(logger.child("web"));
    diagnostics.run(&request, sink).await
}

async fn run_latency(args: &LatencyArgs, logger: Logger, sink: &mut dyn ReportSink) -> Result<()> {
    let hosts = args.hosts();
    let logger = logger.child("latency");
    logger
        .info("Sampling host latency")
        .field("hosts", &hosts)
        .field("timeout_ms", args.timeout().as_millis() as u64)
        .log()
        .await;

    let report = sampler::run(&hosts, args.timeout(), Arc::new(SystemCommandRunner)).await;

    logger.debug("Sampling finished").probe(&report).log().await;
    sink.report(&report)
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::InvalidInput(_) => {
            eprintln!();
            eprintln!("Target help:");
            eprintln!("  - Give a hostname, IP address or URL, e.g. 'example.com'");
            eprintln!("  - URLs without a scheme are treated as http://");
        }
        AppError::Resolution { .. } => {
            eprintln!();
            eprintln!("DNS resolution help:");
            eprintln!("  - Check the hostname for typos");
            eprintln!("  - Check your internet connection and resolver settings");
            eprintln!("  - Test resolution manually with 'nslookup' or 'dig'");
        }
        AppError::Config(_) => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check SYSINFORMER_* variables and your .env file");
            eprintln!("  - Run 'sysinformer --help-topic config' for accepted values");
        }
        _ => {}
    }
}
