//! Generation-time view of the SDK types behind a service

use pscmdlet_generator_common::ServiceModel;

/// Type information emitters may consult while generating code
pub trait TypeAnalyzer {
    fn service_id(&self) -> &str;

    /// Member names of an SDK enum or constant class
    fn enum_members(&self, type_name: &str) -> Option<&[String]>;

    fn is_enum(&self, type_name: &str) -> bool {
        self.enum_members(type_name).is_some()
    }
}

impl TypeAnalyzer for ServiceModel {
    fn service_id(&self) -> &str {
        &self.service_id
    }

    fn enum_members(&self, type_name: &str) -> Option<&[String]> {
        self.find_enum(type_name).map(|e| e.members.as_slice())
    }
}
