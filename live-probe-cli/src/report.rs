//! Human-readable report text.
//!
//! Everything here returns a `String` so the launcher decides where it goes.

use live_probe::{
    ApiStatus, Capability, Credential, FailureCategory, ModelAvailability, ProbeResult,
};
use std::fmt::Write;

const RULE: &str = "==================================================";
const API_KEY_URL: &str = "https://aistudio.google.com/app/apikey";

pub fn banner() -> String {
    format!("🚀 Gemini Live API Verification Tool\n{RULE}\n")
}

pub fn rule() -> String {
    format!("\n{RULE}\n")
}

pub fn credential_line(credential: &Credential, model: &str) -> String {
    format!(
        "🔍 Testing API key: {} (from {})\n📡 Model: {}\n\n🔄 Attempting to connect to Gemini Live API...\n",
        credential.masked(),
        credential.source(),
        model
    )
}

pub fn missing_credential(env_vars: &[String]) -> String {
    let primary = env_vars.first().map(String::as_str).unwrap_or("GOOGLE_API_KEY");
    let mut out = String::from("❌ No API key found!\n\nPlease set your API key using one of these methods:\n");
    let _ = writeln!(out, "1. Set environment variable ({}):", env_vars.join(" or "));
    let _ = writeln!(out, "   Windows: set {primary}=your-api-key-here");
    let _ = writeln!(out, "   Linux/Mac: export {primary}=your-api-key-here");
    let _ = writeln!(out, "\n2. Or create a .env file with:");
    let _ = writeln!(out, "   {primary}=your-api-key-here");
    let _ = writeln!(out, "\n3. Or pass it directly: live-probe live --api-key your-api-key-here");
    out
}

/// Troubleshooting hints for a failure category.
pub fn guidance(category: FailureCategory) -> &'static [&'static str] {
    match category {
        FailureCategory::MissingCredential => &[],
        FailureCategory::InvalidKey => &[
            "💡 Your API key appears to be invalid.",
            "   Get a new key at: https://aistudio.google.com/app/apikey",
        ],
        FailureCategory::PermissionDenied => &[
            "💡 Your API key doesn't have permission to use Gemini Live.",
            "   Please check:",
            "   • Your API key is valid",
            "   • Gemini API is enabled in your Google Cloud project",
            "   • You have access to the v1beta API",
        ],
        FailureCategory::ModelNotFound => &[
            "💡 The Gemini Live API model might not be available.",
            "   This may require:",
            "   • Waitlist access",
            "   • Specific API permissions",
            "   • Regional availability",
            "   Try another model with --model.",
        ],
        FailureCategory::NoResponse => &[
            "⚠️ Connected but no response received.",
            "   The session opened, so the key works; the model sent no text.",
        ],
        FailureCategory::TimedOut => &[
            "⚠️ No response before the deadline.",
            "   Check your network, or raise the limit with --timeout.",
        ],
        FailureCategory::Unknown => &[
            "💡 Check your internet connection and try again.",
            "   Re-run with -v for connection details.",
        ],
    }
}

pub fn probe_result(result: &ProbeResult) -> String {
    let mut out = String::new();

    if let Some(text) = result.response_text() {
        let _ = writeln!(out, "✅ Successfully connected to Gemini Live API!");
        let _ = writeln!(out, "\n🤖 Gemini Response: {}", text.trim());
        let _ = writeln!(out, "\n✅ API Key Verification Complete! ({:.1}s)", result.elapsed.as_secs_f64());
        let _ = writeln!(out, "\n📊 Your API key has access to:");
        let _ = writeln!(out, "   • {}", result.model);
        let _ = writeln!(out, "   • Text generation");
        let _ = writeln!(out, "   • Real-time streaming");
        return out;
    }

    if let Some(error) = result.error() {
        let _ = writeln!(out, "\n❌ Error: {}", error);
    }
    if let Some(category) = result.failure_category() {
        let hints = guidance(category);
        if !hints.is_empty() {
            out.push('\n');
            for line in hints {
                let _ = writeln!(out, "{line}");
            }
        }
    }
    out
}

pub fn devices(audio: &Capability, video: &Capability) -> String {
    let mut out = String::new();
    match audio {
        Capability::Available { detail } => {
            let _ = writeln!(out, "\n🎤 Audio Devices:");
            for line in detail {
                let _ = writeln!(out, "   • {line}");
            }
        }
        Capability::Unavailable { reason } => {
            let _ = writeln!(out, "\n⚠️ Audio not available: {reason}");
        }
    }
    match video {
        Capability::Available { detail } => {
            let _ = writeln!(out, "\n📹 Camera: Available ({})", detail.join(", "));
        }
        Capability::Unavailable { reason } => {
            let _ = writeln!(out, "\n📹 Camera: Not available ({reason})");
        }
    }
    out
}

pub fn next_steps() -> String {
    let mut out = String::from("📚 Next Steps:\n");
    let _ = writeln!(out, "\n1. Audio/video streaming needs a Live model that supports AUDIO output.");
    let _ = writeln!(out, "\n2. Check which models your key can use:");
    let _ = writeln!(out, "   live-probe models -m gemini-2.0-flash -m gemini-2.0-flash-live-001");
    let _ = writeln!(out, "\n⚠️ Important: Use headphones to prevent echo!");
    out
}

/// Closing note for failures the key's owner has to fix.
pub fn fix_key_first(category: FailureCategory) -> Option<String> {
    category
        .is_credential_problem()
        .then(|| "❌ Please fix the API key issue before running the full demo\n".to_string())
}

fn status_label(status: &ApiStatus) -> String {
    match status {
        ApiStatus::ApiKeyInvalid => "API key invalid".to_string(),
        ApiStatus::Unauthenticated => "unauthenticated".to_string(),
        ApiStatus::PermissionDenied => "permission denied".to_string(),
        ApiStatus::NotFound => "not found".to_string(),
        ApiStatus::ResourceExhausted => "quota exhausted".to_string(),
        ApiStatus::Other(name) => name.to_lowercase(),
    }
}

pub fn models(results: &[ModelAvailability]) -> String {
    let mut out = String::from("\n🔍 Model availability:\n");
    for result in results {
        if result.available {
            let _ = writeln!(out, "   • {}: ✓ Available", result.model);
            continue;
        }
        let reason = match (&result.status, &result.detail) {
            (Some(status), Some(detail)) => format!("{} - {}", status_label(status), detail),
            (Some(status), None) => status_label(status),
            (None, Some(detail)) => detail.clone(),
            (None, None) => "not available".to_string(),
        };
        let _ = writeln!(out, "   • {}: ✗ {}", result.model, reason);
    }

    if results.iter().any(|r| r.status == Some(ApiStatus::ApiKeyInvalid)) {
        let _ = writeln!(out, "\n💡 Your API key appears to be invalid. Get a new one at: {API_KEY_URL}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use live_probe::ProbeOutcome;
    use std::time::Duration;

    fn failed(category: FailureCategory, error: &str) -> ProbeResult {
        ProbeResult {
            model: "models/gemini-2.0-flash-live-001".to_string(),
            elapsed: Duration::from_millis(250),
            outcome: ProbeOutcome::Failed { category, error: error.to_string() },
        }
    }

    #[test]
    fn test_success_report() {
        let result = ProbeResult {
            model: "models/gemini-2.0-flash-live-001".to_string(),
            elapsed: Duration::from_millis(1500),
            outcome: ProbeOutcome::Connected { response_text: "Connection successful!\n".to_string() },
        };
        let text = probe_result(&result);
        assert!(text.contains("🤖 Gemini Response: Connection successful!\n"));
        assert!(text.contains("(1.5s)"));
        assert!(text.contains("models/gemini-2.0-flash-live-001"));
    }

    #[test]
    fn test_failure_report_includes_guidance() {
        let text = probe_result(&failed(FailureCategory::InvalidKey, "Server error: API_KEY_INVALID"));
        assert!(text.contains("❌ Error: Server error: API_KEY_INVALID"));
        assert!(text.contains("appears to be invalid"));

        let text = probe_result(&failed(FailureCategory::PermissionDenied, "HTTP 403"));
        assert!(text.contains("doesn't have permission"));

        let text = probe_result(&failed(FailureCategory::ModelNotFound, "HTTP 404"));
        assert!(text.contains("Waitlist access"));
    }

    #[test]
    fn test_every_failure_but_missing_credential_has_guidance() {
        for category in [
            FailureCategory::InvalidKey,
            FailureCategory::PermissionDenied,
            FailureCategory::ModelNotFound,
            FailureCategory::NoResponse,
            FailureCategory::TimedOut,
            FailureCategory::Unknown,
        ] {
            assert!(!guidance(category).is_empty(), "{category} has no guidance");
        }
        assert!(guidance(FailureCategory::MissingCredential).is_empty());
    }

    #[test]
    fn test_fix_key_note_only_for_key_problems() {
        assert!(fix_key_first(FailureCategory::InvalidKey).is_some());
        assert!(fix_key_first(FailureCategory::ModelNotFound).is_some());
        assert!(fix_key_first(FailureCategory::NoResponse).is_none());
        assert!(fix_key_first(FailureCategory::TimedOut).is_none());
        assert!(fix_key_first(FailureCategory::Unknown).is_none());
    }

    #[test]
    fn test_missing_credential_names_variables() {
        let text = missing_credential(&["GEMINI_API_KEY".to_string()]);
        assert!(text.contains("export GEMINI_API_KEY=your-api-key-here"));
    }

    #[test]
    fn test_masked_credential_line() {
        let credential = Credential::new("AIzaSyA1234567890abcdwxyz", "GOOGLE_API_KEY");
        let text = credential_line(&credential, "models/x");
        assert!(text.contains("AIzaSyA123...wxyz"));
        assert!(!text.contains("1234567890abcd"));
    }

    #[test]
    fn test_devices_report() {
        let audio = Capability::unavailable("built without desktop-audio support");
        let video = Capability::Available { detail: vec!["/dev/video0".to_string()] };
        let text = devices(&audio, &video);
        assert!(text.contains("Audio not available: built without desktop-audio support"));
        assert!(text.contains("Camera: Available (/dev/video0)"));
    }

    #[test]
    fn test_models_report() {
        let results = vec![
            ModelAvailability {
                model: "gemini-2.0-flash".to_string(),
                available: true,
                status: None,
                detail: None,
            },
            ModelAvailability {
                model: "gemini-pro".to_string(),
                available: false,
                status: Some(ApiStatus::ApiKeyInvalid),
                detail: Some("API key not valid.".to_string()),
            },
        ];
        let text = models(&results);
        assert!(text.contains("gemini-2.0-flash: ✓ Available"));
        assert!(text.contains("gemini-pro: ✗ API key invalid - API key not valid."));
        assert!(text.contains(API_KEY_URL));
    }
}
