use crate::models::profile::Role;

/// Derives the role granted at signup from the email domain.
///
/// `@gators.com` addresses are academy staff (admin), `@trainer.com`
/// addresses are trainers, and everything else — including a missing
/// email — signs up as a trainee. The match is case-insensitive and is
/// evaluated exactly once, at account creation; logging in later does not
/// re-derive it.
pub fn derive_role(email: &str) -> Role {
    let lower = email.trim().to_lowercase();
    if lower.ends_with("@gators.com") {
        Role::Admin
    } else if lower.ends_with("@trainer.com") {
        Role::Trainer
    } else {
        Role::Trainee
    }
}
