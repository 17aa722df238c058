//! # Status Line Model
//!
//! Encapsulates all state related to the status line display,
//! providing a clean interface for status bar rendering.

/// Timing of the most recent simulation exchange
#[derive(Debug, Clone, Default)]
pub struct HttpStatus {
    /// HTTP status code of the last response, if one arrived
    pub status_code: Option<u16>,
    /// Round trip in milliseconds
    pub duration_ms: Option<u64>,
}

/// Status line model containing all status bar display state
#[derive(Debug, Clone)]
pub struct StatusLine {
    /// Temporary status message to display
    status_message: Option<String>,

    /// Last response status and round trip time
    http_status: HttpStatus,

    /// Profile name and the server it points at
    profile_name: String,
    server_url: String,
}

impl StatusLine {
    /// Create a new StatusLine with default values
    pub fn new() -> Self {
        Self {
            status_message: None,
            http_status: HttpStatus::default(),
            profile_name: "default".to_string(),
            server_url: String::new(),
        }
    }

    // === Status Message Methods ===

    /// Set a temporary status message
    pub fn set_status_message<S: Into<String>>(&mut self, message: S) {
        self.status_message = Some(message.into());
    }

    /// Clear the status message
    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }

    /// Get the current status message
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    // === HTTP Status Methods ===

    pub fn set_http_status(&mut self, status_code: Option<u16>, duration_ms: u64) {
        self.http_status = HttpStatus {
            status_code,
            duration_ms: Some(duration_ms),
        };
    }

    pub fn http_status(&self) -> &HttpStatus {
        &self.http_status
    }

    // === Profile Methods ===

    pub fn set_profile(&mut self, name: String, server_url: String) {
        self.profile_name = name;
        self.server_url = server_url;
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}
