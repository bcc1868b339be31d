//! Descriptor rendering — assemble and serialize.

use slsgen_core::GeneratorConfig;

use crate::descriptor::ServerlessDescriptor;
use crate::error::RenderError;

/// Render the full descriptor document for a validated configuration.
///
/// Pure text transformation: no I/O, deterministic for identical inputs.
pub fn render(config: &GeneratorConfig) -> Result<String, RenderError> {
    let descriptor = ServerlessDescriptor::from_config(config);
    render_descriptor(&descriptor)
}

/// Serialize an already-assembled descriptor.
pub fn render_descriptor(descriptor: &ServerlessDescriptor) -> Result<String, RenderError> {
    serde_yaml::to_string(descriptor).map_err(RenderError::from)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use slsgen_core::{AppId, DatabaseConfig, Runtime};
    use std::path::PathBuf;

    fn config(runtime: &str) -> GeneratorConfig {
        GeneratorConfig {
            app_id: AppId::from("Demo"),
            runtime: Runtime::from(runtime),
            database: DatabaseConfig {
                host: "h".into(),
                port: "5432".into(),
                name: "db".into(),
                username: "u".into(),
                password: "pw".into(),
            },
            output_path: PathBuf::from("out.yaml"),
        }
    }

    #[test]
    fn output_is_valid_yaml() {
        for runtime in ["python3.6", "nodejs10.x", "go1.x"] {
            let yaml = render(&config(runtime)).expect("render");
            serde_yaml::from_str::<serde_yaml::Value>(&yaml)
                .unwrap_or_else(|e| panic!("invalid YAML for {runtime}: {e}\n{yaml}"));
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let a = render(&config("nodejs10.x")).unwrap();
        let b = render(&config("nodejs10.x")).unwrap();
        assert_eq!(a, b, "identical configs must yield byte-identical output");
    }

    #[test]
    fn output_round_trips_through_the_model() {
        let yaml = render(&config("python3.6")).unwrap();
        let parsed: ServerlessDescriptor = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(parsed, ServerlessDescriptor::from_config(&config("python3.6")));
    }

    #[test]
    fn service_line_carries_app_id() {
        let yaml = render(&config("nodejs10.x")).unwrap();
        assert!(yaml.contains("service: Demo"), "missing service line:\n{yaml}");
    }

    #[test]
    fn no_crlf_in_rendered_output() {
        let yaml = render(&config("nodejs10.x")).unwrap();
        assert!(!yaml.contains('\r'), "rendered output contains CR char");
    }
}
