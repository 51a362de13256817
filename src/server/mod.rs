//! Minimal HTTP host for the rulebook: JSON API for the viewer page plus
//! static serving of the built frontend bundle.

use std::io;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub mod api;
pub mod routes;
pub mod static_files;

pub async fn run_server(bind_addr: &str, data_dir: PathBuf) -> io::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    println!("rulebook server listening on http://{bind_addr}");

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let data_dir = data_dir.clone();
                tokio::spawn(async move {
                    if let Err(err) = handle_connection(stream, &data_dir).await {
                        eprintln!("request error: {err}");
                    }
                });
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }
}

async fn handle_connection(mut stream: TcpStream, data_dir: &Path) -> io::Result<()> {
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer).await?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let request_line = request.lines().next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let response = routes::route_request(method, path, data_dir)
        .await
        .to_http_string();
    stream.write_all(response.as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}
