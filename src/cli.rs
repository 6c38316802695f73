use std::{
    io::{self, IsTerminal},
    path::PathBuf,
};

mod session;
mod shell;
mod terminal;

use clap::ArgAction;
use enrollment::Config;
use shell::Shell;
use terminal::Palette;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, default_value = "enroll.toml")]
    config: PathBuf,

    /// Roster file used by `save` and `load` when no path is given
    #[arg(long)]
    roster_file: Option<PathBuf>,

    /// Don't print the command menu before each prompt
    #[arg(long)]
    no_menu: bool,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let mut config = load_config(&self.config);
        if let Some(roster_file) = self.roster_file {
            config.set_roster_file(roster_file);
        }
        if self.no_menu {
            config.show_menu = false;
        }

        let palette = Palette::new(io::stdout().is_terminal() && terminal::supports_color());
        let mut shell = Shell::new(config, palette, io::stdout().lock());
        shell.run(io::stdin().lock())
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // Logs go to stderr so they don't interleave with shell output.
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn load_config(path: &std::path::Path) -> Config {
    Config::load(path).unwrap_or_else(|e| {
        tracing::debug!("Failed to load config: {e}");
        Config::default()
    })
}
