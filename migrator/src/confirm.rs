//! Operator confirmation before destructive schema changes

pub trait Confirmation {
    fn confirm(&self, question: &str) -> bool;
}

/// Unattended runs (`--no-interaction`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmation for AssumeYes {
    fn confirm(&self, _question: &str) -> bool {
        true
    }
}
