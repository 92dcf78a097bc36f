use console::style;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for a `--config` path that does not exist
pub fn config_file_not_found(path: &str) -> CliError {
    CliError::new("Configuration file not found")
        .with_context(format!("The specified configuration file does not exist.\n\nPath: {}", path))
        .with_suggestion("Check the file path and try again")
        .with_suggestion("Or omit --config to use ./chargenav.toml and environment variables")
        .with_help("Run: chargenav config")
}

/// Create error for an unknown station id
pub fn station_not_found(id: &str, source: &str) -> CliError {
    CliError::new(format!("Station {} not found", id))
        .with_context(format!(
            "No station with this id is in the station list.\n\nSource: {}",
            source
        ))
        .with_suggestion("List nearby stations and their ids: chargenav nearby")
        .with_suggestion("Or point at another list: --stations <URL or FILE>")
        .with_help("Run: chargenav route --help")
}

/// Create error for an invalid vehicle profile
pub fn invalid_profile(reason: &str) -> CliError {
    CliError::new("Invalid vehicle profile")
        .with_context(format!(
            "The configured vehicle profile is not usable.\n\nReason: {}",
            reason
        ))
        .with_suggestion("Battery capacity and consumption must be positive")
        .with_suggestion("Charge must be between 0 and 100, price must not be negative")
        .with_suggestion("Inspect the effective values: chargenav config")
        .with_help("Run: chargenav --help")
}

/// Create error for an invalid trip distance
pub fn invalid_distance(distance_km: f64) -> CliError {
    CliError::new("Invalid distance")
        .with_context(format!(
            "Distance must be a finite, non-negative number of kilometers.\n\nGot: {}",
            distance_km
        ))
        .with_help("Run: chargenav estimate --help")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let message = format!("{:#}", error);

    // Try to provide context based on error message
    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("Connection refused") || message.contains("error sending request") {
        CliError::new("Cannot reach the service")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check your network connection")
            .with_suggestion("Or use another endpoint: --router-url / --stations")
    } else if message.contains("Invalid configuration value") {
        CliError::new("Invalid configuration")
            .with_context(format!("Error: {}", message))
            .with_suggestion(format!(
                "Check ./{} for syntax errors",
                crate::config_loader::DEFAULT_CONFIG_FILE
            ))
            .with_help("Run: chargenav config")
    } else {
        CliError::new(message)
    }
}
