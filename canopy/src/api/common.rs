//! Common request plumbing shared by the endpoint modules

/// Query-string builder with optional and repeated parameters.
#[derive(Debug, Clone, Default)]
pub struct ApiQueryParams {
    params: Vec<(String, String)>,
}

impl ApiQueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<K: Into<String>, V: ToString>(mut self, key: K, value: V) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn add_optional<K: Into<String>, V: ToString>(mut self, key: K, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.params.push((key.into(), v.to_string()));
        }
        self
    }

    /// Repeated `key[]=value` parameters, the dashboard's array convention.
    pub fn add_each<K: AsRef<str>, V: ToString>(mut self, key: K, values: &[V]) -> Self {
        for v in values {
            self.params
                .push((format!("{}[]", key.as_ref()), v.to_string()));
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            format!(
                "?{}",
                self.params
                    .iter()
                    .map(|(k, v)| {
                        format!("{}={}", urlencoding::encode(k), urlencoding::encode(v))
                    })
                    .collect::<Vec<_>>()
                    .join("&")
            )
        }
    }
}
