//! Remote API port
//!
//! Defines the interface to the SkillSwap backend. Services call these
//! methods before touching local state, so a failed call never leaves the
//! directory or session half-updated.

use crate::domain::result::Result;
use crate::domain::{
    Availability, AuthResponse, LoginRequest, NewSkill, ProfileUpdate, RegisterRequest, Skill,
    SkillKind, User,
};

/// SkillSwap backend
///
/// `token` is the bearer token returned by register/login.
pub trait RemoteApi: Send + Sync {
    /// POST /auth/register
    fn register(&self, request: &RegisterRequest) -> Result<AuthResponse>;

    /// POST /auth/login
    fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    /// GET /auth/me
    fn current_user(&self, token: &str) -> Result<User>;

    /// GET /users (public members only)
    fn public_users(&self, token: &str) -> Result<Vec<User>>;

    /// PUT /users/profile
    fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User>;

    /// PUT /users/availability
    fn update_availability(&self, token: &str, availability: &[Availability]) -> Result<User>;

    /// PUT /users/toggle-public
    fn toggle_public(&self, token: &str) -> Result<User>;

    /// POST /skills/{offered|wanted}; the server assigns the id
    fn add_skill(&self, token: &str, kind: SkillKind, skill: &NewSkill) -> Result<Skill>;

    /// DELETE /skills/{offered|wanted}/{id}
    fn remove_skill(&self, token: &str, kind: SkillKind, skill_id: &str) -> Result<()>;
}
