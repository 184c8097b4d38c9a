//! Decorative-extras seam.
//!
//! Hosts can hang extra visuals off a render unit (particle haloes, labels,
//! ambient dust) by implementing [`DecorExtras`]. Attachment is strictly
//! best-effort: the factory logs a failed attach and hands back the unit
//! anyway, so a broken decoration can never cost the scene its geometry.

use std::fmt;

use crate::factory::RenderUnit;

/// Error type for decorative attachment.
#[derive(Debug)]
pub enum ExtrasError {
    /// The implementation does not decorate this shape.
    Unsupported(String),
    /// Attachment was attempted and failed.
    Attach(String),
}

impl fmt::Display for ExtrasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtrasError::Unsupported(what) => write!(f, "Extras unsupported for: {}", what),
            ExtrasError::Attach(msg) => write!(f, "Extras attach failed: {}", msg),
        }
    }
}

impl std::error::Error for ExtrasError {}

impl From<String> for ExtrasError {
    fn from(msg: String) -> Self {
        ExtrasError::Attach(msg)
    }
}

impl From<&str> for ExtrasError {
    fn from(msg: &str) -> Self {
        ExtrasError::Attach(msg.to_string())
    }
}

/// Optional decoration attached to finished render units.
///
/// Implementations read whatever they need from the unit (position, seed,
/// geometry) and build their visuals on the host side. Returning `Err` marks
/// the unit undecorated; the factory logs and moves on.
pub trait DecorExtras {
    fn attach(&mut self, unit: &RenderUnit) -> Result<(), ExtrasError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_display() {
        let err = ExtrasError::Unsupported("torus-knot".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("unsupported"));
        assert!(msg.contains("torus-knot"));
    }

    #[test]
    fn test_attach_display() {
        let err = ExtrasError::Attach("halo budget exceeded".to_string());
        let msg = format!("{}", err);
        assert!(msg.contains("attach failed"));
        assert!(msg.contains("halo budget exceeded"));
    }

    #[test]
    fn test_from_string() {
        let err: ExtrasError = "no GPU".to_string().into();
        match err {
            ExtrasError::Attach(msg) => assert_eq!(msg, "no GPU"),
            _ => panic!("Expected Attach variant"),
        }
    }

    #[test]
    fn test_from_str() {
        let err: ExtrasError = "no GPU".into();
        match err {
            ExtrasError::Attach(msg) => assert_eq!(msg, "no GPU"),
            _ => panic!("Expected Attach variant"),
        }
    }
}
