// ── Candidate template renderer ──
//
// Renders the staged candidate text against the device's full attribute
// set, freshly per device per call. Strict undefined behavior: a
// placeholder with no matching attribute is a `Template` error, not an
// empty substitution.

use minijinja::{Environment, UndefinedBehavior};

use crate::error::CoreError;
use crate::model::DeviceRecord;

/// Render `device`'s staged candidate. Never mutates the record.
pub fn render_candidate(device: &DeviceRecord) -> Result<String, CoreError> {
    let source = device.candidate().ok_or_else(|| CoreError::NoCandidate {
        device: device.name.clone(),
    })?;

    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);

    let template = env
        .template_from_str(source)
        .map_err(|err| CoreError::Template {
            device: device.name.clone(),
            reason: err.to_string(),
        })?;

    template
        .render(device.template_vars())
        .map_err(|err| CoreError::Template {
            device: device.name.clone(),
            reason: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn device() -> DeviceRecord {
        DeviceRecord::new("edge1", "ios").with_attribute("ip_address", "10.0.0.1")
    }

    #[test]
    fn substitutes_device_attributes() {
        let mut device = device();
        device.set_candidate("interface Loopback0\n ip address {{ ip_address }} 255.255.255.255\n");

        let rendered = render_candidate(&device).expect("render");
        assert!(rendered.contains("10.0.0.1"));
        assert_eq!(device.candidate().map(|c| c.contains("{{")), Some(true));
    }

    #[test]
    fn unknown_placeholder_is_a_template_error() {
        let mut device = device();
        device.set_candidate("hostname {{ missing_attribute }}");

        let err = render_candidate(&device).expect_err("should fail");
        assert!(matches!(err, CoreError::Template { ref device, .. } if device == "edge1"));
    }

    #[test]
    fn invalid_syntax_is_a_template_error() {
        let mut device = device();
        device.set_candidate("hostname {% if %}");

        assert!(matches!(
            render_candidate(&device),
            Err(CoreError::Template { .. })
        ));
    }

    #[test]
    fn missing_candidate_is_distinguished() {
        let device = device();
        assert!(matches!(
            render_candidate(&device),
            Err(CoreError::NoCandidate { .. })
        ));
    }
}
