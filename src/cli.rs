use clap::{Parser, Subcommand};

use crate::api::server::Frontends;

#[derive(Debug, Parser)]
#[command(name = "backend", about = "User registration over HTTP and WebSocket")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Serve both front ends (default)
    Serve,
    /// Serve only the HTTP API
    Http,
    /// Serve only the WebSocket endpoint
    Ws,
}

impl Cli {
    pub fn frontends(&self) -> Frontends {
        match self.command.unwrap_or(Command::Serve) {
            Command::Serve => Frontends::Both,
            Command::Http => Frontends::Http,
            Command::Ws => Frontends::Socket,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_serves_both() {
        let cli = Cli::parse_from(["backend"]);
        assert_eq!(cli.frontends(), Frontends::Both);
    }

    #[test]
    fn test_single_frontend() {
        assert_eq!(Cli::parse_from(["backend", "http"]).frontends(), Frontends::Http);
        assert_eq!(Cli::parse_from(["backend", "ws"]).frontends(), Frontends::Socket);
    }
}
