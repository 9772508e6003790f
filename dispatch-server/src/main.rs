use anyhow::Result;
use drone_dispatch_server::bootstrap;

#[tokio::main]
async fn main() -> Result<()> {
    // Bootstrap the application (config, logging, dispatch core, router)
    let app = bootstrap::setup().await?;

    match app.tls_config {
        Some(tls_config) => {
            tracing::info!("HTTPS server listening on https://{}", app.bind_address);
            axum_server::bind_rustls(app.socket_addr, tls_config)
                .serve(app.router.into_make_service())
                .await?;
        }
        None => {
            tracing::info!("HTTP server listening on http://{}", app.bind_address);
            let listener = tokio::net::TcpListener::bind(app.socket_addr).await?;
            axum::serve(listener, app.router).await?;
        }
    }

    app.fanout_handle.abort();
    Ok(())
}
