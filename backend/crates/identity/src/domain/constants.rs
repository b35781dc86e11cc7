//! Domain Constants

/// Role aliases known to the platform
pub mod role {
    pub const MODERATOR: &str = "Moderator";
    pub const COMPANY: &str = "Company";
    pub const CANDIDATE: &str = "Candidate";

    /// All roles, in seeding order
    pub const ALL: &[&str] = &[MODERATOR, COMPANY, CANDIDATE];
}
