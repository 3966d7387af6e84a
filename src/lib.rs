//! Typed HTTP clients for JSON services.
//!
//! Declare a client interface with [`client_interface!`], register the base
//! url of its server in a [`RouteRegistry`], and build the adapter through a
//! [`Dispatcher`]. Each routed method call becomes one POST of the JSON
//! argument to `base url + interface route + method route`, and the JSON reply
//! is decoded into the method's [`Response`] envelope. Failures never escape a
//! routed call; they come back as an internal server error envelope.

pub mod config;
pub mod dispatcher;
pub mod error;
mod macros;
pub mod net;
pub mod registry;
pub mod route;
pub mod types;

pub use config::{ClientConfig, TransportConfig};
pub use dispatcher::Dispatcher;
pub use error::{Error, Result, SerializationError, TransportError};
pub use futures::future::BoxFuture;
pub use net::{HttpTransport, Transport};
pub use registry::RouteRegistry;
pub use route::{InterfaceRoute, MethodRoute};
pub use types::{Envelope, Response, ResponseStatus};

/// Routing metadata of a client interface.
///
/// Implemented for `dyn Trait` by [`client_interface!`]; the trait object type
/// is also the key under which the interface's server is registered.
pub trait ClientInterface: 'static {
    const ROUTE: InterfaceRoute;
}

/// An adapter that implements a client interface on top of a [`Dispatcher`].
pub trait Proxy: Sized {
    type Interface: ClientInterface + ?Sized;

    fn from_dispatcher(dispatcher: Dispatcher) -> Self;
}
