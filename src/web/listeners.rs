use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use tracing::{info, warn};

/// Binds the listening socket. A host of `"*"` binds the wildcard address,
/// preferring an IPv6 dual-stack socket and falling back to IPv4-only when
/// IPv6 is unsupported; anything else is bound directly.
pub async fn create_listener(
    host: &str,
    port: u16,
) -> std::io::Result<(String, tokio::net::TcpListener)> {
    if host == "*" {
        match bind_wildcard(Domain::IPV6, format!("[::]:{}", port)) {
            Ok(bound) => return Ok(bound),
            Err(e) => warn!("Failed to bind IPv6 dual-stack listener: {}. Attempting IPv4 only.", e),
        }
        return bind_wildcard(Domain::IPV4, format!("0.0.0.0:{}", port));
    }

    let addr = format!("{}:{}", host, port);
    info!("Attempting to bind server to {}...", addr);

    let tokio_listener = tokio::net::TcpListener::bind(&addr).await?;

    Ok((addr, tokio_listener))
}

fn bind_wildcard(
    domain: Domain,
    str_addr: String,
) -> std::io::Result<(String, tokio::net::TcpListener)> {
    let addr: SocketAddr = str_addr
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    info!("Attempting to bind server to {}...", str_addr);

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    if domain == Domain::IPV6 {
        // Dual-stack may be refused on some systems; single-stack still works
        if let Err(e) = socket.set_only_v6(false) {
            warn!("Failed to set dual-stack mode for IPv6 socket: {}. Continuing anyway.", e);
        }
    }

    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(1024)?;

    // Make it non-blocking for tokio
    socket.set_nonblocking(true)?;

    let std_listener: std::net::TcpListener = socket.into();
    let tokio_listener = tokio::net::TcpListener::from_std(std_listener)?;

    Ok((str_addr, tokio_listener))
}
