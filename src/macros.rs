/// Declares a client interface together with its HTTP adapter.
///
/// ```ignore
/// client_interface! {
///     /// Greets people remotely.
///     #[route("/ping")]
///     pub trait PingService for PingServiceClient {
///         #[route("/hello")]
///         async fn hello(&self, name: String) -> Response<String>;
///
///         async fn shout(&self, name: String) -> String {
///             name.to_uppercase()
///         }
///     }
/// }
/// ```
///
/// Doc comments may sit on either side of `#[route(..)]`. Methods marked
/// `#[route(..)]` take exactly one argument, have no body and return an
/// [`Envelope`](crate::Envelope); the adapter sends them to
/// `registered url + interface route + method route`. Methods with a body are
/// local: the body is the trait's default implementation and the adapter
/// leaves it alone.
///
/// Expands to the trait (methods return [`BoxFuture`](crate::BoxFuture)),
/// `impl ClientInterface for dyn Trait`, and the adapter struct implementing
/// both the trait and [`Proxy`](crate::Proxy).
#[macro_export]
macro_rules! client_interface {
    (@parse $head:tt [$($routed:tt)*] [$($local:tt)*]
        $(#[doc = $doc:literal])*
        #[route($path:literal)]
        $(#[doc = $doc_after:literal])*
        async fn $name:ident(&self, $arg:ident : $arg_ty:ty) -> $ret:ty;
        $($rest:tt)*
    ) => {
        $crate::client_interface! {
            @parse $head
            [$($routed)* {
                [$(#[doc = $doc])* $(#[doc = $doc_after])*] $name $arg [$arg_ty] [$ret] $path
            }]
            [$($local)*]
            $($rest)*
        }
    };
    (@parse $head:tt $routed:tt $local:tt
        $(#[doc = $doc:literal])*
        #[route($path:literal)]
        $(#[doc = $doc_after:literal])*
        async fn $name:ident $($rest:tt)*
    ) => {
        compile_error!(concat!(
            "routed method `",
            stringify!($name),
            "` must take `&self` plus exactly one argument, return an envelope and have no body"
        ));
    };
    (@parse $head:tt [$($routed:tt)*] [$($local:tt)*]
        $(#[doc = $doc:literal])*
        async fn $name:ident(&$self:ident $(, $arg:ident : $arg_ty:ty)*) -> $ret:ty $body:block
        $($rest:tt)*
    ) => {
        $crate::client_interface! {
            @parse $head
            [$($routed)*]
            [$($local)* { [$(#[doc = $doc])*] $name $self [$($arg : $arg_ty),*] [$ret] $body }]
            $($rest)*
        }
    };
    (@parse
        [[$(#[doc = $doc:literal])*] $vis:vis $iface:ident $client:ident $type_path:literal]
        [$({
            [$(#[doc = $rdoc:literal])*] $rname:ident $rarg:ident [$rarg_ty:ty] [$rret:ty] $rpath:literal
        })*]
        [$({
            [$(#[doc = $ldoc:literal])*] $lname:ident $lself:ident [$($larg:ident : $larg_ty:ty),*] [$lret:ty] $lbody:block
        })*]
    ) => {
        $(#[doc = $doc])*
        $vis trait $iface: Send + Sync {
            $(
                $(#[doc = $rdoc])*
                fn $rname(&self, $rarg: $rarg_ty) -> $crate::BoxFuture<'_, $rret>;
            )*
            $(
                $(#[doc = $ldoc])*
                fn $lname(&$lself $(, $larg: $larg_ty)*) -> $crate::BoxFuture<'_, $lret> {
                    Box::pin(async move { $lbody })
                }
            )*
        }

        impl $crate::ClientInterface for dyn $iface {
            const ROUTE: $crate::InterfaceRoute = $crate::InterfaceRoute {
                name: stringify!($iface),
                path: $type_path,
                methods: &[$($crate::MethodRoute {
                    name: stringify!($rname),
                    path: $rpath,
                }),*],
            };
        }

        #[doc = concat!("HTTP adapter for [`", stringify!($iface), "`].")]
        #[derive(Clone)]
        $vis struct $client {
            dispatcher: $crate::Dispatcher,
        }

        impl $client {
            pub fn new(dispatcher: $crate::Dispatcher) -> Self {
                Self { dispatcher }
            }
        }

        impl $crate::Proxy for $client {
            type Interface = dyn $iface;

            fn from_dispatcher(dispatcher: $crate::Dispatcher) -> Self {
                Self::new(dispatcher)
            }
        }

        impl $iface for $client {
            $(
                fn $rname(&self, $rarg: $rarg_ty) -> $crate::BoxFuture<'_, $rret> {
                    const METHOD: $crate::MethodRoute = $crate::MethodRoute {
                        name: stringify!($rname),
                        path: $rpath,
                    };
                    Box::pin(async move {
                        self.dispatcher
                            .dispatch::<dyn $iface, _, $rret>(&METHOD, &$rarg)
                            .await
                    })
                }
            )*
        }
    };
    (
        $(#[doc = $doc:literal])*
        #[route($type_path:literal)]
        $(#[doc = $doc_after:literal])*
        $vis:vis trait $iface:ident for $client:ident {
            $($body:tt)*
        }
    ) => {
        $crate::client_interface! {
            @parse [[$(#[doc = $doc])* $(#[doc = $doc_after])*] $vis $iface $client $type_path] [] []
            $($body)*
        }
    };
}
