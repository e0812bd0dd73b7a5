use super::args::{Cli, Commands};
use super::handlers::{self, HandlerContext};
use crate::logging::{self, LogSink};
use anyhow::Result;
use is_terminal::IsTerminal;
use recview_runtime::ViewerConfig;

pub fn run(cli: Cli) -> Result<()> {
    // The viewer owns the terminal; log lines would tear the screen.
    let sink = match cli.command {
        Commands::View { .. } if std::io::stderr().is_terminal() => LogSink::Discard,
        _ => LogSink::Stderr,
    };
    logging::init(cli.log_level, sink);

    let config = ViewerConfig::load(cli.config.as_deref())?;
    let ctx = HandlerContext::new(cli.format);

    match cli.command {
        Commands::Tree {
            bundle,
            depth,
            full_type_names,
        } => handlers::tree::handle(&ctx, &config.render, &bundle, depth, full_type_names),

        Commands::Source { bundle, call } => {
            handlers::source::handle(&ctx, &config.render, &bundle, call)
        }

        Commands::Styles {
            font_size,
            font_name,
        } => handlers::styles::handle(&ctx, &config.font, font_size, font_name),

        Commands::View { bundle } => handlers::view::handle(&config, &bundle),
    }
}
