/// Method-level routing metadata: the path fragment appended after the
/// interface path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodRoute {
    pub name: &'static str,
    pub path: &'static str,
}

/// Type-level routing metadata plus the route table of every remote method
/// the interface declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceRoute {
    pub name: &'static str,
    pub path: &'static str,
    pub methods: &'static [MethodRoute],
}

impl InterfaceRoute {
    /// Returns `None` for methods that are not remote.
    pub fn method(&self, name: &str) -> Option<&'static MethodRoute> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// `base + interface path + method path`, concatenated as-is.
    pub fn url(&self, base: &str, method: &MethodRoute) -> String {
        let mut url = String::with_capacity(base.len() + self.path.len() + method.path.len());
        url.push_str(base);
        url.push_str(self.path);
        url.push_str(method.path);
        url
    }
}
