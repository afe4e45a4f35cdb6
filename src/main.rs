use clap::Parser;
use miette::Result;
use whflow::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for readable diagnostics
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    whflow::logging::init(cli.global.verbose, cli.global.log_json);

    match cli.command {
        Commands::List(args) => args.run(&cli.global),
        Commands::Show(args) => args.run(&cli.global),
        Commands::Position(args) => args.run(&cli.global),
        Commands::Compare(args) => args.run(&cli.global),
        Commands::Sort(args) => args.run(&cli.global),
        Commands::Check(args) => args.run(&cli.global),
        Commands::Completions(args) => args.run(),
    }
}
