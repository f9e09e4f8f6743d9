//! Query command - send search queries to a running server

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::tcp::connection::{RESPONSE_EXISTS, RESPONSE_NOT_FOUND};
use clap::Args;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

/// Arguments for the query command
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Lines to search for (reads stdin when empty)
    pub terms: Vec<String>,

    /// Server host
    #[arg(long, default_value = "127.0.0.1", env = "LINEQUERY_HOST")]
    pub host: String,

    /// Server port
    #[arg(long, default_value = "44445", env = "LINEQUERY_PORT")]
    pub port: u16,

    /// Pre-shared key to prefix onto each query
    #[arg(long, env = "LINEQUERY_PSK")]
    pub psk: Option<String>,
}

/// One query/response pair
#[derive(Debug, Serialize)]
pub struct QueryOutput {
    pub query: String,
    pub response: String,
}

/// Execute the query command
pub async fn execute(args: QueryArgs, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let terms = if args.terms.is_empty() {
        read_stdin_terms().await?
    } else {
        args.terms
    };

    if terms.is_empty() {
        return Err("No queries given".into());
    }

    let stream = TcpStream::connect((args.host.as_str(), args.port)).await?;
    let (reader, mut writer) = stream.into_split();
    let mut responses = BufReader::new(reader).lines();

    // All queries go over the same connection; the server answers in
    // request order.
    for term in terms {
        let line = match &args.psk {
            Some(psk) => format!("{psk}{term}\n"),
            None => format!("{term}\n"),
        };
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;

        let response = responses
            .next_line()
            .await?
            .ok_or("Server closed the connection")?;

        print_result(&QueryOutput { query: term, response }, format)?;
    }

    Ok(())
}

async fn read_stdin_terms() -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut terms = Vec::new();
    while let Some(line) = lines.next_line().await? {
        terms.push(line);
    }
    Ok(terms)
}

fn print_result(out: &QueryOutput, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(out)?),
        OutputFormat::Human => {
            let styled = match out.response.as_str() {
                RESPONSE_EXISTS => colors::success(&out.response),
                RESPONSE_NOT_FOUND => colors::warning(&out.response),
                _ => colors::error(&out.response),
            };
            println!("{}: {}", colors::label(&out.query), styled);
        }
    }
    Ok(())
}
