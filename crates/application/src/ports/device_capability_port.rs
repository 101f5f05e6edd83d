//! Input device capability port

#[cfg(test)]
use mockall::automock;

/// Port for querying the user's input device
///
/// Mirrors the `(hover: hover)` media query: a device whose primary pointer
/// can hover gets hover tooltips, a touch device does not.
#[cfg_attr(test, automock)]
pub trait DeviceCapabilityPort: Send + Sync {
    /// Whether the primary pointer can hover over elements
    fn supports_hover(&self) -> bool;
}
