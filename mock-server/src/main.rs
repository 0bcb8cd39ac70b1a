use tokio::net::TcpListener;

/// Serves the mock NGP contacts API on `127.0.0.1:$PORT` (default 3000).
#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    println!("mock NGP contacts API on http://{addr}/v2/contacts/findOrCreate");
    mock_server::run(listener).await
}
