//! A one-shot RCON server speaking just enough of the
//! Source protocol for Factorio-style exchanges.

#![allow(dead_code)]

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const SERVERDATA_RESPONSE_VALUE: i32 = 0;
const SERVERDATA_AUTH_RESPONSE: i32 = 2;
const SERVERDATA_EXECCOMMAND: i32 = 2;
const SERVERDATA_AUTH: i32 = 3;

/// What the server saw once the client went away.
#[derive(Debug)]
pub struct Session {
    pub authenticated: bool,
    pub commands: Vec<String>,
    /// The client closed the socket, as opposed to the
    /// server giving up waiting.
    pub closed_by_client: bool,
}

pub struct FakeServer {
    pub port: u16,
    handle: JoinHandle<Session>,
}

impl FakeServer {
    /// Accepts one connection, authenticates it against
    /// `password` and answers every command with `reply`.
    pub fn spawn(password: &'static str, reply: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            stream
                .set_read_timeout(Some(Duration::from_secs(5)))
                .unwrap();
            serve(stream, password, reply)
        });

        FakeServer { port, handle }
    }

    pub fn finish(self) -> Session {
        self.handle.join().unwrap()
    }
}

/// A local port with nothing listening on it.
pub fn unused_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn serve(mut stream: TcpStream, password: &str, reply: &str) -> Session {
    let mut session = Session {
        authenticated: false,
        commands: Vec::new(),
        closed_by_client: false,
    };

    loop {
        let (id, kind, body) = match read_packet(&mut stream) {
            Ok(packet) => packet,
            Err(err) => {
                session.closed_by_client = err.kind() == io::ErrorKind::UnexpectedEof;
                return session;
            }
        };

        match kind {
            SERVERDATA_AUTH => {
                session.authenticated = body == password;
                let id = if session.authenticated { id } else { -1 };
                write_packet(&mut stream, id, SERVERDATA_AUTH_RESPONSE, "").unwrap();
            }
            SERVERDATA_EXECCOMMAND if session.authenticated => {
                session.commands.push(body);
                write_packet(&mut stream, id, SERVERDATA_RESPONSE_VALUE, reply).unwrap();
            }
            _ => {}
        }
    }
}

fn read_packet(stream: &mut TcpStream) -> io::Result<(i32, i32, String)> {
    let size = read_i32(stream)?;
    let id = read_i32(stream)?;
    let kind = read_i32(stream)?;

    let mut body = vec![0; (size - 8) as usize];
    stream.read_exact(&mut body)?;
    body.truncate(body.len().saturating_sub(2));

    Ok((id, kind, String::from_utf8_lossy(&body).into_owned()))
}

fn read_i32(stream: &mut TcpStream) -> io::Result<i32> {
    let mut buffer = [0; 4];
    stream.read_exact(&mut buffer)?;
    Ok(i32::from_le_bytes(buffer))
}

fn write_packet(stream: &mut TcpStream, id: i32, kind: i32, body: &str) -> io::Result<()> {
    let size = 10 + body.len() as i32;

    let mut buffer = Vec::with_capacity(size as usize + 4);
    buffer.extend_from_slice(&size.to_le_bytes());
    buffer.extend_from_slice(&id.to_le_bytes());
    buffer.extend_from_slice(&kind.to_le_bytes());
    buffer.extend_from_slice(body.as_bytes());
    buffer.extend_from_slice(&[0, 0]);

    stream.write_all(&buffer)
}
