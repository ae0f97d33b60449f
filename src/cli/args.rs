use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Serve account statements and balance operations over HTTP
#[derive(Parser, Debug)]
#[command(name = "bank-ledger")]
#[command(about = "Serve account statements and balance operations over HTTP", long_about = None)]
pub struct CliArgs {
    /// Socket address the HTTP server listens on
    #[arg(
        long = "bind",
        value_name = "ADDR",
        default_value = "127.0.0.1:8080",
        help = "Address to listen on"
    )]
    pub bind: SocketAddr,

    /// CSV file with the accounts to register at start-up
    #[arg(
        long = "accounts",
        value_name = "PATH",
        help = "Seed CSV file (number,name,address,phone,balance); default: one demo account"
    )]
    pub accounts: Option<PathBuf>,

    /// Log output format
    #[arg(
        long = "log-format",
        value_name = "FORMAT",
        default_value = "text",
        help = "Log format: 'text' for human-readable or 'json' for structured logs"
    )]
    pub log_format: LogFormat,
}

/// Available log output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
