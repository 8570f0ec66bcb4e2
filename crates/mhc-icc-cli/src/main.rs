use clap::Parser;
use mhc_icc_cli::{Args, Subcommands};

fn main() -> std::process::ExitCode {
    let Args {
        subcommand,
        globals,
    } = Args::parse();

    if !globals.quiet {
        let filter = match globals.verbose {
            0 => tracing::level_filters::LevelFilter::INFO,
            1 => tracing::level_filters::LevelFilter::DEBUG,
            2.. => tracing::level_filters::LevelFilter::TRACE,
        };
        let env_filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(filter.into())
            .from_env_lossy();
        tracing_subscriber::fmt()
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::ACTIVE)
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match subcommand {
        Subcommands::New(args) => mhc_icc_cli::new::handle_new(args),
        Subcommands::Info(args) => mhc_icc_cli::info::handle_info(args),
        Subcommands::Dump(args) => mhc_icc_cli::dump::handle_dump(args),
        Subcommands::Edit(args) => mhc_icc_cli::edit::handle_edit(args),
        Subcommands::Mhc2(args) => mhc_icc_cli::mhc2::handle_mhc2(args),
        Subcommands::Validate(args) => mhc_icc_cli::validate::handle_validate(args),
        Subcommands::Tags(args) => mhc_icc_cli::tags::handle_tags(args),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::ExitCode::FAILURE
    } else {
        std::process::ExitCode::SUCCESS
    }
}
