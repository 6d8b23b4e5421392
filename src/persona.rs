//! The agent's fixed persona: name, greeting, and capability summary.

/// Display name used by renderers.
pub const AGENT_NAME: &str = "Jonny";

/// Greeting message seeded into the timeline when the engine starts.
pub const GREETING: &str = "Hey! I'm Jonny, your personal AI agent. I'm here 24/7 to help you with anything you need. Try saying 'Hey Jonny' or just type your command!";

/// Capability labels for sidebar-style listings.
pub const CAPABILITIES: &[&str] = &[
    "File Handling",
    "WhatsApp",
    "Email",
    "Web Browser",
    "File Manager",
    "Automation",
];

/// One-line hint about voice control, keyed on the capability probe.
#[must_use]
pub fn voice_hint(supported: bool) -> &'static str {
    if supported {
        "Click the mic and say \"Hey Jonny\" followed by your command"
    } else {
        "Voice control not supported in this environment"
    }
}
