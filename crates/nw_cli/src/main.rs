use clap::Parser;
use nw_connectors::logging::{init_logging, level_for};
use nw_connectors::{handle_command, ConnectorArgs, ConnectorCommands};
use nw_core::Result;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "nw", author, version, about = "Fetch news articles from MediaStack and NewsData", long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: ConnectorCommands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(level_for(cli.verbose));
    debug!(?cli, "Parsed command line");

    handle_command(ConnectorArgs { command: cli.command }).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_fetch_with_dates() {
        let cli = Cli::try_parse_from([
            "nw",
            "fetch",
            "mediastack",
            "rust,go",
            "--from",
            "2024-01-01",
            "--to",
            "2024-01-31",
            "--grouped",
        ])
        .unwrap();

        match cli.command {
            ConnectorCommands::Fetch {
                provider,
                keywords,
                from,
                to,
                grouped,
            } => {
                assert_eq!(provider, "mediastack");
                assert_eq!(keywords, "rust,go");
                assert_eq!(from.unwrap().to_string(), "2024-01-01");
                assert_eq!(to.unwrap().to_string(), "2024-01-31");
                assert!(grouped);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_bad_date() {
        let result = Cli::try_parse_from(["nw", "fetch", "newsdata", "rust", "--from", "01/02/2024"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_list_verbose() {
        let cli = Cli::try_parse_from(["nw", "-v", "list"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, ConnectorCommands::List));
    }
}
