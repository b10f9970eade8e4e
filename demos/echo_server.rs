//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Echo Server Example
//!
//! A small server that:
//! - Accepts connections on port 2323
//! - Asks each client for its window size, terminal type and environment
//! - Echoes back any text received
//!
//! ## Usage
//!
//! Run the server:
//! ```bash
//! cargo run --example echo_server
//! ```
//!
//! Connect with a telnet client:
//! ```bash
//! telnet localhost 2323
//! ```

use iacstream_socket::TelnetSocket;
use iacstream_telnetcodec::{Negotiation, TelnetArgument, TelnetEvent, TelnetOption};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let listener = TcpListener::bind("127.0.0.1:2323").await?;
    println!("Listening on 127.0.0.1:2323, press Ctrl+C to stop");

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = accepted?;
                info!(%peer, "Client connected");
                tokio::spawn(async move {
                    if let Err(e) = serve(stream).await {
                        warn!(%peer, error = %e, "Connection failed");
                    }
                    info!(%peer, "Client disconnected");
                });
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\nShutting down");
                return Ok(());
            }
        }
    }
}

async fn serve(stream: TcpStream) -> iacstream_socket::Result<()> {
    let mut socket = TelnetSocket::new(stream);
    socket.negotiate(Negotiation::Do, TelnetOption::NAWS).await?;
    socket.negotiate(Negotiation::Do, TelnetOption::TTYPE).await?;
    socket.negotiate(Negotiation::Do, TelnetOption::NewEnvironment).await?;
    socket.write("Welcome to the echo server.\r\n").await?;

    while let Some(event) = socket.next().await? {
        match event {
            TelnetEvent::Data(data) => socket.write(data).await?,
            TelnetEvent::Command(command) => match (command.code().negotiation(), command.option(), command.payload()) {
                (Some(Negotiation::Will), Some(TelnetOption::TTYPE), _) => socket.request_terminal_type().await?,
                (Some(Negotiation::Will), Some(TelnetOption::NewEnvironment), _) => {
                    socket.request_default_environment().await?;
                }
                (_, _, Some(TelnetArgument::WindowSize(size))) => info!(%size, "Window size"),
                (_, _, Some(TelnetArgument::TerminalType(term))) => info!(%term, "Terminal type"),
                (_, _, Some(TelnetArgument::Environment(env))) => info!(%env, "Environment"),
                _ => info!(%command, "Command"),
            },
            TelnetEvent::DecodeError { command, error } => warn!(%command, %error, "Bad command from client"),
        }
    }
    Ok(())
}
