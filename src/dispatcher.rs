use crate::{
    error::{Error, Result},
    net::Transport,
    registry::RouteRegistry,
    route::MethodRoute,
    types::{decode, encode, Envelope, ResponseStatus},
    ClientInterface, Proxy,
};
use serde::Serialize;
use std::{future::Future, sync::Arc};
use tracing::{error, info, info_span, warn, Instrument};

/// Turns calls on a client adapter into POSTs against the registered server.
///
/// Every adapter built by [`proxy`](Dispatcher::proxy) holds a clone; clones
/// share the same [`RouteRegistry`] and [`Transport`].
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<RouteRegistry>,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(registry: Arc<RouteRegistry>, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.registry
    }

    /// Builds the adapter `P`, backed by this dispatcher.
    pub fn proxy<P: Proxy>(&self) -> P {
        let route = &<P::Interface as ClientInterface>::ROUTE;
        if self.registry.resolve::<P::Interface>().is_none() {
            warn!(client = route.name, "building proxy for unregistered client");
        }
        P::from_dispatcher(self.clone())
    }

    /// Entry point for hand-written adapters.
    ///
    /// Methods without an entry in `I`'s route table go to `passthrough`
    /// untouched and never reach the network; routed methods go through
    /// [`dispatch`](Dispatcher::dispatch).
    ///
    /// Both branches share one signature, so the argument must be
    /// `Serialize` and the result an [`Envelope`] even for local methods.
    /// Local methods returning anything else (a plain `u32`, say) should call
    /// the local implementation directly instead of going through here.
    pub async fn intercept<I, Req, R, F, Fut>(&self, method: &str, arg: Req, passthrough: F) -> R
    where
        I: ClientInterface + ?Sized,
        Req: Serialize + Sync,
        R: Envelope,
        F: FnOnce(Req) -> Fut,
        Fut: Future<Output = R>,
    {
        match I::ROUTE.method(method) {
            Some(route) => self.dispatch::<I, Req, R>(route, &arg).await,
            None => passthrough(arg).await,
        }
    }

    /// Performs one routed call.
    ///
    /// Never fails: routing, serialization and transport errors are logged and
    /// replaced with an internal server error envelope.
    pub async fn dispatch<I, Req, R>(&self, method: &MethodRoute, arg: &Req) -> R
    where
        I: ClientInterface + ?Sized,
        Req: Serialize + ?Sized + Sync,
        R: Envelope,
    {
        let span = info_span!("intercept", client = I::ROUTE.name, method = method.name);
        async move {
            match self.try_dispatch::<I, Req, R>(method, arg).await {
                Ok(resp) => resp,
                Err(err) => {
                    error!(error = %err, details = ?err, "server accessor request error");
                    R::from_status(ResponseStatus::InternalServerError)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn try_dispatch<I, Req, R>(&self, method: &MethodRoute, arg: &Req) -> Result<R>
    where
        I: ClientInterface + ?Sized,
        Req: Serialize + ?Sized + Sync,
        R: Envelope,
    {
        let route = &I::ROUTE;
        let base = self
            .registry
            .resolve::<I>()
            .ok_or(Error::Routing {
                interface: route.name,
            })?;
        let url = route.url(&base, method);
        info!(url = %url, "server accessor request url");

        let body = encode(arg)?;
        let json = self.transport.post_json(&url, body).await?;
        Ok(decode(&json)?)
    }
}
