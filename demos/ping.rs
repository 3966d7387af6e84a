use axum::{routing::post, Json, Router};
use rpcproxy::{client_interface, Dispatcher, HttpTransport, Response, RouteRegistry};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

client_interface! {
    #[route("/ping")]
    pub trait PingService for PingServiceClient {
        #[route("/hello")]
        async fn hello(&self, name: String) -> Response<String>;

        async fn shout(&self, name: String) -> String {
            format!("HELLO, {}!", name.to_uppercase())
        }
    }
}

async fn hello(Json(name): Json<String>) -> Json<Value> {
    Json(json!({"code": 0, "message": "ok", "data": format!("Hello, {name}!")}))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .compact()
        .init();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new().route("/ping/hello", post(hello));
    tokio::spawn(async move { axum::serve(listener, app).await });

    let registry = Arc::new(RouteRegistry::new());
    registry.register::<dyn PingService>(&format!("http://{addr}"))?;
    let dispatcher = Dispatcher::new(registry, Arc::new(HttpTransport::new()?));
    let client: PingServiceClient = dispatcher.proxy();

    let resp = client.hello("world".into()).await;
    info!(code = resp.code, message = %resp.message, data = ?resp.data, "remote");
    info!(reply = %client.shout("world".into()).await, "local");

    // Nothing listens here any more.
    dispatcher.registry().register::<dyn PingService>("http://127.0.0.1:9")?;
    let resp = client.hello("world".into()).await;
    info!(code = resp.code, message = %resp.message, "after re-registration");
    Ok(())
}
