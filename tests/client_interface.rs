use futures::future::BoxFuture;
use rpcproxy::{
    client_interface, ClientInterface, Dispatcher, Proxy, Response, ResponseStatus,
    RouteRegistry, Transport, TransportError,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing_test::traced_test;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Foo {
    x: i64,
}

client_interface! {
    /// Test service.
    #[route("/ping")]
    pub trait PingService for PingServiceClient {
        /// Says hello.
        #[route("/hello")]
        async fn hello(&self, name: String) -> Response;

        #[route("/foo")]
        async fn foo(&self, id: u32) -> Response<Foo>;

        /// Computed locally.
        async fn shout(&self, name: String) -> String {
            name.to_uppercase()
        }

        async fn answer(&self) -> u32 {
            42
        }
    }
}

client_interface! {
    #[route("")]
    trait Unregistered for UnregisteredClient {
        #[route("/x")]
        async fn x(&self, arg: ()) -> Response<u8>;
    }
}

client_interface! {
    #[route("/echo")]
    /// Docs after the interface route.
    pub trait EchoService for EchoServiceClient {
        #[route("/say")]
        /// Docs after the method route.
        async fn say(&self, words: String) -> Response<String>;

        async fn local(&self, x: u32) -> u32 {
            x + 1
        }
    }
}

#[derive(Default)]
struct Recorder {
    replies: Mutex<Vec<Result<String, TransportError>>>,
    requests: Mutex<Vec<(String, String)>>,
}

impl Recorder {
    fn replying(reply: Result<String, TransportError>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(vec![reply]),
            ..Default::default()
        })
    }

    fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for Recorder {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<String, TransportError>> {
        self.requests.lock().unwrap().push((url.to_owned(), body));
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop()
            .unwrap_or_else(|| Err(TransportError::Connection("no reply queued".into())));
        Box::pin(async move { reply })
    }
}

fn ping_client(transport: Arc<Recorder>) -> PingServiceClient {
    let registry = Arc::new(RouteRegistry::new());
    registry
        .register::<dyn PingService>("http://svc:8080")
        .unwrap();
    Dispatcher::new(registry, transport).proxy()
}

#[test]
fn route_table_holds_routed_methods_only() {
    let route = <dyn PingService as ClientInterface>::ROUTE;
    assert_eq!(route.name, "PingService");
    assert_eq!(route.path, "/ping");
    let names: Vec<_> = route.methods.iter().map(|m| (m.name, m.path)).collect();
    assert_eq!(names, [("hello", "/hello"), ("foo", "/foo")]);
    assert!(route.method("shout").is_none());
}

#[tokio::test]
async fn hello_world() {
    let transport = Recorder::replying(Ok(r#"{"code":0,"message":"ok"}"#.into()));
    let client = ping_client(transport.clone());

    let resp = client.hello("world".into()).await;
    assert_eq!(resp.code, 0);
    assert_eq!(resp.message, "ok");
    assert_eq!(resp.data, None);
    assert_eq!(
        transport.requests(),
        [("http://svc:8080/ping/hello".to_owned(), r#""world""#.to_owned())]
    );
}

#[tokio::test]
async fn payload_is_decoded_into_declared_type() {
    let transport = Recorder::replying(Ok(r#"{"code":0,"message":"ok","data":{"x":1}}"#.into()));
    let client = ping_client(transport.clone());

    let resp = client.foo(7).await;
    assert_eq!(resp, Response::success(Foo { x: 1 }));
    assert_eq!(transport.requests()[0].0, "http://svc:8080/ping/foo");
    assert_eq!(transport.requests()[0].1, "7");
}

#[tokio::test]
async fn local_methods_stay_local() {
    let transport = Arc::new(Recorder::default());
    let client = ping_client(transport.clone());

    assert_eq!(client.shout("quiet".into()).await, "QUIET");
    assert_eq!(client.answer().await, 42);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn works_behind_a_trait_object() {
    let transport = Recorder::replying(Ok(r#"{"code":0,"message":"ok"}"#.into()));
    let client: Arc<dyn PingService> = Arc::new(ping_client(transport));

    assert!(client.hello("dyn".into()).await.is_success());
    assert_eq!(client.shout("dyn".into()).await, "DYN");
}

#[tokio::test]
#[traced_test]
async fn connection_refused_becomes_internal_error() {
    let transport = Recorder::replying(Err(TransportError::Connection(
        "connection refused".into(),
    )));
    let client = ping_client(transport);

    let resp = client.hello("world".into()).await;
    assert_eq!(resp, Response::from_status(ResponseStatus::InternalServerError));
    assert!(logs_contain("server accessor request url"));
    assert!(logs_contain("server accessor request error"));
    assert!(logs_contain("connection refused"));
}

#[tokio::test]
async fn unregistered_interface_becomes_internal_error() {
    let transport = Arc::new(Recorder::default());
    let dispatcher = Dispatcher::new(Arc::new(RouteRegistry::new()), transport.clone());
    let client: UnregisteredClient = dispatcher.proxy();

    let resp = client.x(()).await;
    assert_eq!(resp.code, 500);
    assert_eq!(resp.message, "Internal Server Error");
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn reregistration_redirects_existing_proxies() {
    let transport = Arc::new(Recorder {
        replies: Mutex::new(vec![
            Ok(r#"{"code":0}"#.into()),
            Ok(r#"{"code":0}"#.into()),
        ]),
        ..Default::default()
    });
    let registry = Arc::new(RouteRegistry::new());
    registry.register::<dyn PingService>("http://old").unwrap();
    let dispatcher = Dispatcher::new(registry.clone(), transport.clone());
    let client = PingServiceClient::from_dispatcher(dispatcher);

    client.hello("a".into()).await;
    registry.register::<dyn PingService>("http://new").unwrap();
    client.hello("b".into()).await;

    let urls: Vec<_> = transport.requests().into_iter().map(|(url, _)| url).collect();
    assert_eq!(urls, ["http://old/ping/hello", "http://new/ping/hello"]);
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let transport = Arc::new(Recorder {
        replies: Mutex::new(
            (0..16)
                .map(|_| Ok(r#"{"code":0,"message":"ok"}"#.to_owned()))
                .collect(),
        ),
        ..Default::default()
    });
    let client = Arc::new(ping_client(transport.clone()));

    let calls = (0..16).map(|i| {
        let client = client.clone();
        tokio::spawn(async move { client.hello(format!("caller-{i}")).await })
    });
    for call in futures::future::join_all(calls).await {
        assert!(call.unwrap().is_success());
    }
    assert_eq!(transport.requests().len(), 16);
}

#[tokio::test]
async fn docs_may_follow_route_attributes() {
    let transport = Recorder::replying(Ok(r#"{"code":0,"message":"ok","data":"hi"}"#.into()));
    let registry = Arc::new(RouteRegistry::new());
    registry.register::<dyn EchoService>("http://echo").unwrap();
    let client: EchoServiceClient = Dispatcher::new(registry, transport.clone()).proxy();

    assert_eq!(client.say("hi".into()).await, Response::success("hi".to_owned()));
    assert_eq!(client.local(1).await, 2);
    assert_eq!(transport.requests()[0].0, "http://echo/echo/say");
    assert_eq!(
        <dyn EchoService as ClientInterface>::ROUTE.method("say").map(|m| m.path),
        Some("/say")
    );
}
