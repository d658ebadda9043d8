//! `floom` -- form schema builder CLI.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use context::RuntimeContext;

fn main() {
    let cli = Cli::parse();

    let ctx = RuntimeContext::from_global_args(&cli.global);

    // Set up logging based on verbosity.
    if ctx.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                "floom=debug,formloom_core=debug,formloom_derive=debug,\
                 formloom_store=debug,formloom_config=debug",
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let result = match cli.command {
        Some(Commands::Init(args)) => commands::init::run(&ctx, &args),
        Some(Commands::Add(args)) => commands::add::run(&ctx, &args),
        Some(Commands::List) => commands::list::run(&ctx),
        Some(Commands::Show(args)) => commands::show::run(&ctx, &args),
        Some(Commands::Edit(args)) => commands::edit::run(&ctx, &args),
        Some(Commands::Delete(args)) => commands::delete::run(&ctx, &args),
        Some(Commands::Move(args)) => commands::move_cmd::run(&ctx, &args),
        Some(Commands::Fill(args)) => commands::fill::run(&ctx, &args),
        Some(Commands::Save(args)) => commands::save::run(&ctx, &args),
        Some(Commands::Load(args)) => commands::load::run(&ctx, &args),
        Some(Commands::Clear) => commands::clear::run(&ctx),
        Some(Commands::Forms) => commands::forms::run(&ctx),
        Some(Commands::Drop(args)) => commands::drop_cmd::run(&ctx, &args),
        Some(Commands::Version) => commands::version::run(&ctx),
        None => {
            // No subcommand -- print help.
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    // Handle errors: print message and exit with code 1.
    if let Err(e) = result {
        if cli.global.json {
            let err_json = serde_json::json!({
                "error": format!("{:#}", e),
            });
            if let Ok(s) = serde_json::to_string_pretty(&err_json) {
                eprintln!("{}", s);
            }
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}
