//! Lookup of the emitter handling each request property

use super::ParamEmitter;
use std::collections::HashMap;

/// Operation key matching every operation of a service
pub const ANY_OPERATION: &str = "*";

/// Maps (service, operation, property) to the emitter handling that property
#[derive(Debug, Clone, Default)]
pub struct EmitterRegistry {
    entries: HashMap<(String, String, String), ParamEmitter>,
}

impl EmitterRegistry {
    /// Registry without overrides; every property uses [`ParamEmitter::Default`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the S3 overrides
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("S3", ANY_OPERATION, "UseAccelerateEndpoint", ParamEmitter::Accelerate);
        registry.register("S3", ANY_OPERATION, "UseDualstackEndpoint", ParamEmitter::Dualstack);
        registry.register("S3", "GetPreSignedURL", "Verb", ParamEmitter::HttpVerb);
        registry.register("S3", "GetPreSignedURL", "Protocol", ParamEmitter::Protocol);
        for operation in ["PutObject", "CopyObject", "InitiateMultipartUpload", "Upload"] {
            registry.register("S3", operation, "StorageClass", ParamEmitter::S3StorageClass);
        }
        registry
    }

    /// Add or replace an override; `operation` may be [`ANY_OPERATION`]
    pub fn register(
        &mut self,
        service: &str,
        operation: &str,
        property: &str,
        emitter: ParamEmitter,
    ) -> &mut Self {
        self.entries.insert(
            (service.to_string(), operation.to_string(), property.to_string()),
            emitter,
        );
        self
    }

    /// Exact operation match first, then the service-wide entry
    pub fn resolve(&self, service: &str, operation: &str, property: &str) -> ParamEmitter {
        self.lookup(service, operation, property)
            .or_else(|| self.lookup(service, ANY_OPERATION, property))
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn lookup(&self, service: &str, operation: &str, property: &str) -> Option<ParamEmitter> {
        self.entries
            .get(&(service.to_string(), operation.to_string(), property.to_string()))
            .copied()
    }
}
