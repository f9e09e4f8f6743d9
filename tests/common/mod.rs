// Test helper functions

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;

use linequery::core::config::Config;
use linequery::core::services::Services;
use linequery::tcp::Server;

/// Write a reference file with the given lines, one per line
#[allow(dead_code)] // Used in integration tests
pub fn write_reference_file(dir: &Path, lines: &[&str]) -> PathBuf {
    let path = dir.join("reference.txt");
    std::fs::write(&path, format!("{}\n", lines.join("\n"))).expect("Failed to write file");
    path
}

/// Config bound to an ephemeral port over the given reference file
#[allow(dead_code)] // Used in integration tests
pub fn test_config(file_path: PathBuf, reread_on_query: bool) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.search.file_path = file_path;
    config.search.reread_on_query = reread_on_query;
    config
}

/// Start a server for the given config and return its bound address
#[allow(dead_code)] // Used in integration tests
pub async fn start_server(config: Config) -> SocketAddr {
    let services = Arc::new(Services::new(config));

    // Mirror the server binary: preload, but tolerate a missing file
    let _ = services.search.load().await;

    let server = Server::bind(services).await.expect("Failed to bind");
    let addr = server.local_addr().expect("Failed to get local addr");
    tokio::spawn(server.run());
    addr
}

/// Persistent client connection speaking the line protocol
#[allow(dead_code)] // Used in integration tests
pub struct TestClient {
    reader: tokio::io::Lines<BufReader<OwnedReadHalf>>,
    writer: OwnedWriteHalf,
}

#[allow(dead_code)] // Used in integration tests
impl TestClient {
    pub async fn connect(addr: SocketAddr) -> Self {
        let stream = TcpStream::connect(addr)
            .await
            .expect("Failed to connect to test server");
        let (reader, writer) = stream.into_split();
        Self {
            reader: BufReader::new(reader).lines(),
            writer,
        }
    }

    /// Send one query line and read one response line
    pub async fn query(&mut self, line: &str) -> String {
        self.send_raw(format!("{line}\n").as_bytes()).await;
        self.read_response().await
    }

    /// Send raw bytes without framing
    pub async fn send_raw(&mut self, bytes: &[u8]) {
        self.writer
            .write_all(bytes)
            .await
            .expect("Failed to write to test server");
        self.writer.flush().await.expect("Failed to flush");
    }

    /// Read one response line
    pub async fn read_response(&mut self) -> String {
        self.reader
            .next_line()
            .await
            .expect("Failed to read from test server")
            .expect("Server closed the connection")
    }

    /// Half-close the write side, signalling EOF to the server
    pub async fn shutdown_write(&mut self) {
        self.writer.shutdown().await.expect("Failed to shutdown");
    }

    /// Read until the server closes the connection; returns the last
    /// line received, if any
    pub async fn read_until_close(&mut self) -> Option<String> {
        let mut last = None;
        while let Ok(Some(line)) = self.reader.next_line().await {
            last = Some(line);
        }
        last
    }
}

/// Connect, run one query, disconnect
#[allow(dead_code)] // Used in integration tests
pub async fn query_once(addr: SocketAddr, line: &str) -> String {
    let mut client = TestClient::connect(addr).await;
    client.query(line).await
}
