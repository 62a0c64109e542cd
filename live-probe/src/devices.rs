//! Best-effort local device checks.
//!
//! These never influence the probe outcome; every failure is reported as
//! [`Capability::Unavailable`] with a readable reason.

use std::fmt;

/// Result of a device check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    /// The capability looks usable.
    Available {
        /// What was found (device names, paths).
        detail: Vec<String>,
    },
    /// The capability is not usable.
    Unavailable {
        /// Why.
        reason: String,
    },
}

impl Capability {
    /// Create an unavailable capability.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable { reason: reason.into() }
    }

    /// Whether the capability is available.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available { detail } => write!(f, "available ({})", detail.join(", ")),
            Self::Unavailable { reason } => write!(f, "not available: {}", reason),
        }
    }
}

/// Look up the default audio input and output devices.
#[cfg(feature = "desktop-audio")]
pub fn check_audio_devices() -> Capability {
    use cpal::traits::{DeviceTrait, HostTrait};

    let host = cpal::default_host();
    let Some(input) = host.default_input_device() else {
        return Capability::unavailable("no default input device");
    };
    let Some(output) = host.default_output_device() else {
        return Capability::unavailable("no default output device");
    };

    let input_name = input.name().unwrap_or_else(|_| "Unknown Device".to_string());
    let output_name = output.name().unwrap_or_else(|_| "Unknown Device".to_string());
    tracing::debug!(host = ?host.id(), %input_name, %output_name, "Audio devices found");

    Capability::Available {
        detail: vec![format!("input: {}", input_name), format!("output: {}", output_name)],
    }
}

/// Look up the default audio input and output devices.
#[cfg(not(feature = "desktop-audio"))]
pub fn check_audio_devices() -> Capability {
    Capability::unavailable("built without desktop-audio support")
}

/// Look for an openable camera.
#[cfg(target_os = "linux")]
pub fn check_video_devices() -> Capability {
    check_video_nodes(std::path::Path::new("/dev"))
}

/// Look for an openable camera.
#[cfg(not(target_os = "linux"))]
pub fn check_video_devices() -> Capability {
    Capability::unavailable("camera detection is only supported on Linux")
}

/// Scan `dir` for V4L2 capture nodes (`video*`) that can be opened for reading.
pub fn check_video_nodes(dir: &std::path::Path) -> Capability {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => return Capability::unavailable(format!("cannot read {}: {}", dir.display(), e)),
    };

    let mut nodes: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("video"))
        })
        .collect();
    nodes.sort();

    if nodes.is_empty() {
        return Capability::unavailable("no video devices found");
    }

    let mut last_error = None;
    let mut openable = Vec::new();
    for node in nodes {
        match std::fs::File::open(&node) {
            Ok(_) => openable.push(node.display().to_string()),
            Err(e) => {
                tracing::debug!(node = %node.display(), error = %e, "Video node not openable");
                last_error = Some(format!("{}: {}", node.display(), e));
            }
        }
    }

    if openable.is_empty() {
        Capability::unavailable(last_error.unwrap_or_else(|| "no openable video device".to_string()))
    } else {
        Capability::Available { detail: openable }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_display() {
        let available = Capability::Available { detail: vec!["/dev/video0".to_string()] };
        assert!(available.is_available());
        assert_eq!(available.to_string(), "available (/dev/video0)");

        let missing = Capability::unavailable("no video devices found");
        assert!(!missing.is_available());
        assert_eq!(missing.to_string(), "not available: no video devices found");
    }

    #[test]
    fn test_video_nodes_missing_dir() {
        let capability = check_video_nodes(std::path::Path::new("/nonexistent/dev/dir"));
        assert!(!capability.is_available());
    }

    #[test]
    fn test_video_nodes_found() {
        let dir = std::env::temp_dir().join(format!("live-probe-dev-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("video0"), b"").unwrap();
        std::fs::write(dir.join("null"), b"").unwrap();

        let capability = check_video_nodes(&dir);
        std::fs::remove_dir_all(&dir).unwrap();

        match capability {
            Capability::Available { detail } => {
                assert_eq!(detail.len(), 1);
                assert!(detail[0].ends_with("video0"));
            }
            other => panic!("expected available, got {other:?}"),
        }
    }

    #[test]
    fn test_video_nodes_empty_dir() {
        let dir = std::env::temp_dir().join(format!("live-probe-dev-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let capability = check_video_nodes(&dir);
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(capability, Capability::unavailable("no video devices found"));
    }

    #[cfg(not(feature = "desktop-audio"))]
    #[test]
    fn test_audio_without_feature() {
        assert!(!check_audio_devices().is_available());
    }
}
