//! Platform detection helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Desktop => "desktop",
        }
    }
}

/// Read an attribute from a server-rendered element, if both exist.
#[cfg(target_arch = "wasm32")]
pub fn element_attribute(element_id: &str, attribute: &str) -> Option<String> {
    web_sys::window()?
        .document()?
        .get_element_by_id(element_id)?
        .get_attribute(attribute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_builds_report_desktop() {
        if cfg!(not(target_arch = "wasm32")) {
            assert_eq!(Platform::current(), Platform::Desktop);
            assert_eq!(Platform::current().as_str(), "desktop");
        }
    }
}
