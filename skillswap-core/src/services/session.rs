//! Session service - authentication and the logged-in member's own profile
//!
//! The session partition only remembers `{ userId, token }`. The profile
//! itself is read from the directory, so there is exactly one copy of every
//! user record. Every change that the server owns is sent first and applied
//! locally only from the server's answer.

use std::sync::Arc;

use crate::domain::availability::{with_availability, without_availability};
use crate::domain::result::{Error, Result};
use crate::domain::{
    Availability, Day, LoginRequest, NewSkill, ProfileUpdate, RegisterRequest, Session, Skill,
    SkillKind, TimeSlot, User,
};
use crate::ports::{PartitionStore, RemoteApi, AUTH_PARTITION};
use crate::services::directory::DirectoryService;
use crate::store::PersistedSnapshot;

pub struct SessionService {
    session: PersistedSnapshot<Session>,
    directory: Arc<DirectoryService>,
    api: Arc<dyn RemoteApi>,
}

/// Id and token of the logged-in member
struct Credentials {
    user_id: String,
    token: String,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn PartitionStore>,
        directory: Arc<DirectoryService>,
        api: Arc<dyn RemoteApi>,
    ) -> Result<Self> {
        Ok(Self {
            session: PersistedSnapshot::load(store, AUTH_PARTITION)?,
            directory,
            api,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn register(&self, request: &RegisterRequest) -> Result<User> {
        request.validate().map_err(Error::validation)?;
        let auth = self.api.register(request)?;
        self.start_session(auth.user, auth.token)
    }

    pub fn login(&self, email: &str, password: &str) -> Result<User> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(Error::validation("email and password are required"));
        }
        let auth = self.api.login(&LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        })?;
        self.start_session(auth.user, auth.token)
    }

    fn start_session(&self, user: User, token: String) -> Result<User> {
        self.directory.upsert_user(user.clone())?;
        self.session.set(Session {
            user_id: Some(user.id.clone()),
            token: Some(token),
        })?;
        Ok(user)
    }

    /// Forget the session locally; the server keeps no session state
    pub fn logout(&self) -> Result<()> {
        self.session.reset()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.snapshot().is_authenticated()
    }

    pub fn token(&self) -> Option<String> {
        self.session.snapshot().token.clone()
    }

    pub fn current_user_id(&self) -> Option<String> {
        self.session.snapshot().user_id.clone()
    }

    /// The logged-in member's record, as held by the directory
    pub fn current_user(&self) -> Option<User> {
        let session = self.session.snapshot();
        session
            .user_id
            .as_deref()
            .and_then(|id| self.directory.get_user_by_id(id))
    }

    fn credentials(&self) -> Result<Credentials> {
        let session = self.session.snapshot();
        match (&session.user_id, &session.token) {
            (Some(user_id), Some(token)) => Ok(Credentials {
                user_id: user_id.clone(),
                token: token.clone(),
            }),
            _ => Err(Error::NotAuthenticated),
        }
    }

    /// Local copy of the member, fetched from the server if the directory lost it
    fn own_record(&self, creds: &Credentials) -> Result<User> {
        match self.directory.get_user_by_id(&creds.user_id) {
            Some(user) => Ok(user),
            None => self.apply_server_user(self.api.current_user(&creds.token)?),
        }
    }

    fn apply_server_user(&self, user: User) -> Result<User> {
        self.directory.upsert_user(user.clone())?;
        Ok(user)
    }

    /// Re-read the member's record from the server
    pub fn refresh_current_user(&self) -> Result<User> {
        let creds = self.credentials()?;
        let user = self.api.current_user(&creds.token)?;
        self.apply_server_user(user)
    }

    // =========================================================================
    // Profile
    // =========================================================================

    pub fn update_profile(&self, update: &ProfileUpdate) -> Result<User> {
        let creds = self.credentials()?;
        if update.is_empty() {
            return Err(Error::validation("nothing to update"));
        }
        if matches!(&update.name, Some(name) if name.trim().is_empty()) {
            return Err(Error::validation("name cannot be empty"));
        }
        let user = self.api.update_profile(&creds.token, update)?;
        self.apply_server_user(user)
    }

    pub fn toggle_public_profile(&self) -> Result<User> {
        let creds = self.credentials()?;
        let user = self.api.toggle_public(&creds.token)?;
        self.apply_server_user(user)
    }

    // =========================================================================
    // Skills
    // =========================================================================

    /// Create a skill on the server and append the server's record locally
    pub fn add_skill(&self, kind: SkillKind, skill: &NewSkill) -> Result<Skill> {
        let creds = self.credentials()?;
        skill.validate().map_err(Error::validation)?;

        let created = self.api.add_skill(&creds.token, kind, skill)?;
        let user = self.own_record(&creds)?;
        // A record fetched just now may already contain the new skill
        if user.skills(kind).iter().all(|s| s.id != created.id) {
            self.directory
                .upsert_user(user.with_skill(kind, created.clone()))?;
        }
        Ok(created)
    }

    pub fn remove_skill(&self, kind: SkillKind, skill_id: &str) -> Result<()> {
        let creds = self.credentials()?;
        self.api.remove_skill(&creds.token, kind, skill_id)?;
        let user = self.own_record(&creds)?;
        self.directory
            .upsert_user(user.without_skill(kind, skill_id))
    }

    pub fn add_skill_offered(&self, skill: &NewSkill) -> Result<Skill> {
        self.add_skill(SkillKind::Offered, skill)
    }

    pub fn add_skill_wanted(&self, skill: &NewSkill) -> Result<Skill> {
        self.add_skill(SkillKind::Wanted, skill)
    }

    pub fn remove_skill_offered(&self, skill_id: &str) -> Result<()> {
        self.remove_skill(SkillKind::Offered, skill_id)
    }

    pub fn remove_skill_wanted(&self, skill_id: &str) -> Result<()> {
        self.remove_skill(SkillKind::Wanted, skill_id)
    }

    // =========================================================================
    // Availability
    // =========================================================================

    /// Replace the whole availability list
    pub fn update_availability(&self, availability: &[Availability]) -> Result<User> {
        let creds = self.credentials()?;
        let user = self.api.update_availability(&creds.token, availability)?;
        self.apply_server_user(user)
    }

    /// Add a (day, slot) pair. Returns false, without calling the server,
    /// when the pair is already listed.
    pub fn add_availability(&self, day: Day, time_slot: TimeSlot) -> Result<bool> {
        let creds = self.credentials()?;
        let user = self.own_record(&creds)?;
        let (next, added) = with_availability(&user.availability, day, time_slot);
        if !added {
            return Ok(false);
        }
        self.update_availability(&next)?;
        Ok(true)
    }

    /// Remove an entry by id. Returns false when no entry has that id.
    pub fn remove_availability(&self, id: &str) -> Result<bool> {
        let creds = self.credentials()?;
        let user = self.own_record(&creds)?;
        if !user.availability.iter().any(|a| a.id == id) {
            return Ok(false);
        }
        let next = without_availability(&user.availability, id);
        self.update_availability(&next)?;
        Ok(true)
    }
}
