//! WHOIS query execution over TCP port 43.
//!
//! The protocol has no length framing: the client writes one line, the
//! server writes its answer and closes. End of stream is end of message.
//! Both forms below bound connect + write + read by a single `timeout`, and
//! the socket lives only as long as the call, so it is closed on every exit
//! path.

use std::{
  io::{self, ErrorKind, Read, Write},
  net::{IpAddr, SocketAddr, TcpStream, ToSocketAddrs},
  sync::mpsc::{self, RecvTimeoutError},
  thread,
  time::{Duration, Instant},
};

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::{Error, Result};

/// The well-known WHOIS port.
pub const WHOIS_PORT: u16 = 43;

const READ_CHUNK: usize = 4096;

/// Raw reply text, lossily decoded as UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResult {
  pub query_text: String,
}

impl QueryResult {
  fn from_bytes(body: &[u8]) -> Self {
    Self {
      query_text: String::from_utf8_lossy(body).into_owned(),
    }
  }
}

fn request(line: &str) -> String {
  format!("{}\r\n", line.trim_end_matches(['\r', '\n']))
}

const fn is_timeout(kind: ErrorKind) -> bool {
  matches!(kind, ErrorKind::TimedOut | ErrorKind::WouldBlock)
}

fn io_failure(server: &str, timeout: Duration, e: io::Error) -> Error {
  if is_timeout(e.kind()) {
    Error::timeout(server, timeout)
  } else {
    Error::connection(server, e)
  }
}

/// Budget left before `deadline`, `None` once it is spent.
fn remaining(deadline: Instant) -> Option<Duration> {
  deadline
    .checked_duration_since(Instant::now())
    .filter(|left| !left.is_zero())
}

/// Time left for the next step. `Ok(None)` means unbounded: the timeout is
/// too large to be represented as an `Instant`.
fn budget(
  deadline: Option<Instant>,
  server: &str,
  timeout: Duration,
) -> Result<Option<Duration>> {
  deadline.map_or(Ok(None), |deadline| {
    remaining(deadline)
      .map(Some)
      .ok_or_else(|| Error::timeout(server, timeout))
  })
}

/// Sends `line` to `server` on port 43 and blocks until the reply is
/// complete.
///
/// # Errors
///
/// - [`Error::Timeout`] if the exchange outlives `timeout`.
/// - [`Error::Connection`] if `server` does not resolve, refuses or resets
///   the connection, or any other I/O error occurs.
pub fn query(line: &str, server: &str, timeout: Duration) -> Result<QueryResult> {
  query_on(line, server, WHOIS_PORT, timeout)
}

/// [`query`] against an explicit port.
///
/// # Errors
///
/// Same as [`query`].
pub fn query_on(
  line: &str,
  server: &str,
  port: u16,
  timeout: Duration,
) -> Result<QueryResult> {
  let deadline = Instant::now().checked_add(timeout);
  log::debug!("querying {server}:{port} for '{line}'");

  let mut stream = connect(server, port, deadline, timeout)?;

  stream
    .set_write_timeout(budget(deadline, server, timeout)?)
    .and_then(|()| stream.write_all(request(line).as_bytes()))
    .map_err(|e| io_failure(server, timeout, e))?;

  let mut body = Vec::new();
  let mut chunk = [0_u8; READ_CHUNK];
  loop {
    stream
      .set_read_timeout(budget(deadline, server, timeout)?)
      .map_err(|e| io_failure(server, timeout, e))?;

    match stream.read(&mut chunk) {
      Ok(0) => break,
      Ok(n) => body.extend_from_slice(&chunk[..n]),
      Err(e) if e.kind() == ErrorKind::Interrupted => {}
      Err(e) => return Err(io_failure(server, timeout, e)),
    }
  }

  log::debug!("{server} answered with {} bytes", body.len());
  Ok(QueryResult::from_bytes(&body))
}

/// Tries each resolved address in turn with whatever budget is left.
fn connect(
  server: &str,
  port: u16,
  deadline: Option<Instant>,
  timeout: Duration,
) -> Result<TcpStream> {
  let addrs = resolve_server(server, port, deadline, timeout)?;

  let mut last_error = None;
  for addr in addrs {
    let attempt = match budget(deadline, server, timeout)? {
      Some(left) => TcpStream::connect_timeout(&addr, left),
      None => TcpStream::connect(addr),
    };
    match attempt {
      Ok(stream) => return Ok(stream),
      Err(e) if is_timeout(e.kind()) => return Err(Error::timeout(server, timeout)),
      Err(e) => {
        log::debug!("connect to {addr} failed: {e}");
        last_error = Some(e);
      }
    }
  }

  Err(Error::connection(
    server,
    last_error.unwrap_or_else(|| {
      io::Error::new(ErrorKind::NotFound, "host resolved to no addresses")
    }),
  ))
}

/// Resolves the server host within the remaining budget.
///
/// `getaddrinfo` cannot be cancelled, so a bounded lookup runs on a helper
/// thread; on expiry the caller gets `Timeout` and the thread is left to
/// finish on its own.
fn resolve_server(
  server: &str,
  port: u16,
  deadline: Option<Instant>,
  timeout: Duration,
) -> Result<Vec<SocketAddr>> {
  if let Ok(ip) = server.parse::<IpAddr>() {
    return Ok(vec![SocketAddr::new(ip, port)]);
  }

  let host = server.to_string();
  let lookup = move || {
    (host.as_str(), port)
      .to_socket_addrs()
      .map(|addrs| addrs.collect::<Vec<_>>())
  };
  match budget(deadline, server, timeout)? {
    Some(left) => within(left, server, timeout, lookup),
    None => lookup().map_err(|e| Error::connection(server, e)),
  }
}

/// Runs blocking `work` on a helper thread and waits at most `left` for it.
fn within<T, F>(left: Duration, server: &str, timeout: Duration, work: F) -> Result<T>
where
  T: Send + 'static,
  F: FnOnce() -> io::Result<T> + Send + 'static,
{
  let (tx, rx) = mpsc::sync_channel(1);
  thread::Builder::new()
    .name("whois-resolve".to_string())
    .spawn(move || {
      // The receiver is gone if the caller already timed out.
      let _ = tx.send(work());
    })
    .map_err(|e| Error::connection(server, e))?;

  match rx.recv_timeout(left) {
    Ok(result) => result.map_err(|e| Error::connection(server, e)),
    Err(RecvTimeoutError::Timeout) => {
      log::warn!("resolving {server} outlived the {timeout:?} budget");
      Err(Error::timeout(server, timeout))
    }
    Err(RecvTimeoutError::Disconnected) => Err(Error::connection(
      server,
      io::Error::other("resolver thread exited without an answer"),
    )),
  }
}

/// Sends `line` to `server` on port 43, suspending at name resolution,
/// connect and every read.
///
/// # Errors
///
/// Same as [`query`].
pub async fn query_async(
  line: &str,
  server: &str,
  timeout: Duration,
) -> Result<QueryResult> {
  query_async_on(line, server, WHOIS_PORT, timeout).await
}

/// [`query_async`] against an explicit port.
///
/// # Errors
///
/// Same as [`query`].
pub async fn query_async_on(
  line: &str,
  server: &str,
  port: u16,
  timeout: Duration,
) -> Result<QueryResult> {
  log::debug!("querying {server}:{port} for '{line}'");

  // Dropping this future on expiry drops the stream with it.
  let exchange = async {
    let mut stream = tokio::net::TcpStream::connect((server, port)).await?;
    stream.write_all(request(line).as_bytes()).await?;
    let mut body = Vec::new();
    stream.read_to_end(&mut body).await?;
    Ok::<_, io::Error>(body)
  };

  match tokio::time::timeout(timeout, exchange).await {
    Err(_) => Err(Error::timeout(server, timeout)),
    Ok(Err(e)) => Err(io_failure(server, timeout, e)),
    Ok(Ok(body)) => {
      log::debug!("{server} answered with {} bytes", body.len());
      Ok(QueryResult::from_bytes(&body))
    }
  }
}
