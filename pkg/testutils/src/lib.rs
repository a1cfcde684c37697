//! Shared fixtures for tests.
use axum::Router;
use std::error::Error;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// PKCS#8 encoded RSA private key.
pub const PRIVATE_KEY_PEM: &str = include_str!("../testdata/private.pem");

/// SPKI encoded public counterpart of [`PRIVATE_KEY_PEM`].
pub const PUBLIC_KEY_PEM: &str = include_str!("../testdata/public.pem");

/// PKCS#1 encoded public counterpart of [`PRIVATE_KEY_PEM`].
pub const PUBLIC_KEY_PKCS1_PEM: &str = include_str!("../testdata/public_pkcs1.pem");

/// A second, unrelated key pair.
pub const OTHER_PRIVATE_KEY_PEM: &str = include_str!("../testdata/other_private.pem");

/// SPKI encoded public counterpart of [`OTHER_PRIVATE_KEY_PEM`].
pub const OTHER_PUBLIC_KEY_PEM: &str = include_str!("../testdata/other_public.pem");

/// Path of the directory holding the PEM fixtures, for file based loaders.
pub fn testdata_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata")
}

/// Serves a router on an ephemeral localhost port.
///
/// Returns the base URL (`http://127.0.0.1:<port>`). The server runs until
/// the test runtime shuts down.
pub async fn serve(router: Router) -> Result<String, Box<dyn Error>> {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("failed to run test server");
    });

    Ok(format!("http://{addr}"))
}
