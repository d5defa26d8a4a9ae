use clap::Parser;
use inventory::cli::{completions, Cli, OutputFormat, Reporter, Session};
use inventory::core::{logging, Config};
use miette::{miette, IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, BufReader};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
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

    if let Some(shell) = cli.completions {
        completions::write(shell, &mut io::stdout());
        return Ok(());
    }

    let config = Config::load(cli.config.as_deref()).into_diagnostic()?;

    let fallback = if cli.verbose { "debug" } else { logging::DEFAULT_FILTER };
    logging::init(&logging::filter_directive(config.log.as_deref(), fallback));

    let format = match (cli.format, config.format.as_deref()) {
        (Some(format), _) => format,
        (None, Some(name)) => OutputFormat::from_name(name)
            .ok_or_else(|| miette!("invalid format '{}' in configuration", name))?,
        (None, None) => OutputFormat::default(),
    };
    let echo = config.echo() && !cli.no_echo;

    let stdout = io::stdout();
    let mut session = Session::new(Reporter::new(format), echo, stdout.lock(), io::stderr());

    match cli.file {
        Some(path) => {
            let file = File::open(&path)
                .map_err(|e| miette!("Failed to open file {}: {}", path.display(), e))?;
            session.run(BufReader::new(file))
        }
        None => session.run(io::stdin().lock()),
    }
    .into_diagnostic()
}
