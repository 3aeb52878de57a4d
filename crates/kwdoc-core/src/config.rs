use serde::{Deserialize, Serialize};

/// Settings the core reads from the run configuration. Unknown keys are
/// ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keyword names highlighted in addition to the standard libraries and the
    /// documented library's own keywords.
    pub custom_keywords: Vec<String>,
    /// Keyword namespaces to load, e.g. `robot.libraries.BuiltIn` or `Collections`.
    pub standard_libraries: Vec<String>,
}

const DEFAULT_CUSTOM_KEYWORDS: &[&str] = &[
    "Open Application",
    "Close Application",
    "Kill Application",
    "Connect to Application",
    "Get Process ID",
    "Wait for Process Exit",
];

const DEFAULT_STANDARD_LIBRARIES: &[&str] = &[
    "robot.libraries.BuiltIn",
    "robot.libraries.Collections",
    "robot.libraries.DateTime",
    "robot.libraries.Dialogs",
    "robot.libraries.OperatingSystem",
    "robot.libraries.Process",
    "robot.libraries.Screenshot",
    "robot.libraries.String",
    "robot.libraries.Telnet",
    "robot.libraries.XML",
];

impl Default for Config {
    fn default() -> Self {
        Self {
            custom_keywords: DEFAULT_CUSTOM_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            standard_libraries: DEFAULT_STANDARD_LIBRARIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
