use crate::{
    config::ClientConfig,
    error::{Error, Result},
    ClientInterface,
};
use dashmap::DashMap;
use std::{any::TypeId, sync::Arc};
use tracing::info;
use url::Url;

/// Maps each client interface to the base url of the server that serves it.
///
/// Create one at startup, register every client interface, then share it
/// (behind an [`Arc`]) with every [`Dispatcher`](crate::Dispatcher). Lookups
/// and registrations may run concurrently from any number of tasks.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    servers: DashMap<TypeId, Server>,
}

#[derive(Debug, Clone)]
struct Server {
    interface: &'static str,
    url: Arc<str>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the server for `I`, replacing any earlier url.
    ///
    /// Fails with [`Error::InvalidArgument`] if `server_url` is blank, padded
    /// with whitespace, or not an absolute url; the registry is left untouched
    /// in that case. The url is
    /// stored exactly as given.
    pub fn register<I>(&self, server_url: &str) -> Result<()>
    where
        I: ClientInterface + ?Sized,
    {
        validate_server_url(server_url)?;
        let interface = I::ROUTE.name;
        info!(client = interface, url = server_url, "add client to route registry");
        self.servers.insert(
            TypeId::of::<I>(),
            Server {
                interface,
                url: Arc::from(server_url),
            },
        );
        Ok(())
    }

    /// Registers `I` with the server configured under its interface name.
    pub fn register_configured<I>(&self, config: &ClientConfig) -> Result<()>
    where
        I: ClientInterface + ?Sized,
    {
        let url = config.server(I::ROUTE.name).ok_or_else(|| {
            Error::InvalidArgument(format!("no server configured for client `{}`", I::ROUTE.name))
        })?;
        self.register::<I>(url)
    }

    pub fn resolve<I>(&self) -> Option<Arc<str>>
    where
        I: ClientInterface + ?Sized,
    {
        self.servers
            .get(&TypeId::of::<I>())
            .map(|server| server.url.clone())
    }

    pub fn unregister<I>(&self) -> Option<Arc<str>>
    where
        I: ClientInterface + ?Sized,
    {
        self.servers.remove(&TypeId::of::<I>()).map(|(_, server)| {
            info!(client = server.interface, "remove client from route registry");
            server.url
        })
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

fn validate_server_url(server_url: &str) -> Result<()> {
    if server_url.trim().is_empty() {
        return Err(Error::InvalidArgument("server url can't be blank".to_owned()));
    }
    if server_url.trim() != server_url {
        return Err(Error::InvalidArgument(format!(
            "server url {server_url:?} has surrounding whitespace"
        )));
    }
    let parsed = Url::parse(server_url)
        .map_err(|e| Error::InvalidArgument(format!("server url `{server_url}`: {e}")))?;
    if parsed.cannot_be_a_base() {
        return Err(Error::InvalidArgument(format!(
            "server url `{server_url}` is not a base url"
        )));
    }
    Ok(())
}
