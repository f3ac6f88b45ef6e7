//! Import helpers
//!
//! Most resources import by writing the user-supplied id into a single
//! state attribute and letting the subsequent refresh fill in the rest.

use crate::resource::{ImportResourceStateRequest, ImportResourceStateResponse, ImportedResource};
use crate::types::{AttributePath, Diagnostic, DynamicValue};

/// Seed imported state with the import id at `path`.
pub fn import_state_passthrough_id(
    path: &AttributePath,
    request: &ImportResourceStateRequest,
    response: &mut ImportResourceStateResponse,
) {
    let mut state = DynamicValue::empty_object();

    if let Err(e) = state.set_string(path, request.id.clone()) {
        response.diagnostics.add(
            Diagnostic::error(
                "Failed to set import id",
                format!("Could not set \"{}\" to \"{}\": {}", path, request.id, e),
            )
            .with_attribute(path.clone()),
        );
        return;
    }

    response.imported_resources.push(ImportedResource {
        type_name: request.type_name.clone(),
        state,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Diagnostics;

    #[test]
    fn passthrough_seeds_state_with_id() {
        let request = ImportResourceStateRequest {
            type_name: "canopy_network".to_string(),
            id: "N_1234".to_string(),
        };
        let mut response = ImportResourceStateResponse {
            imported_resources: vec![],
            diagnostics: Diagnostics::new(),
        };

        import_state_passthrough_id(&AttributePath::new("network_id"), &request, &mut response);

        assert!(!response.diagnostics.has_errors());
        assert_eq!(response.imported_resources.len(), 1);
        assert_eq!(
            response.imported_resources[0]
                .state
                .get_string(&AttributePath::new("network_id"))
                .unwrap(),
            "N_1234"
        );
    }
}
