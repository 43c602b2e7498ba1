//! In-process stand-in for the SkillSwap backend, used by service unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::{
    Availability, AuthResponse, LoginRequest, NewSkill, ProfileUpdate, RegisterRequest, Skill,
    SkillKind, User,
};
use crate::ports::RemoteApi;

/// Failure to inject into the next call
#[derive(Debug, Clone)]
pub enum Failure {
    Transport,
    Status(u16),
}

#[derive(Default)]
struct FakeState {
    users: Vec<User>,
    passwords: HashMap<String, String>,
    tokens: HashMap<String, String>,
    next_id: u32,
    public_users: Option<Vec<User>>,
    fail_next: Option<Failure>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
    calls: AtomicUsize,
}

impl FakeApi {
    /// Number of calls that reached the "network"
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_next(&self, failure: Failure) {
        self.state.lock().unwrap().fail_next = Some(failure);
    }

    /// Fix the response of `public_users` instead of deriving it
    pub fn set_public_users(&self, users: Vec<User>) {
        self.state.lock().unwrap().public_users = Some(users);
    }

    /// Server-side copy of a user
    pub fn server_user(&self, id: &str) -> Option<User> {
        self.state.lock().unwrap().users.iter().find(|u| u.id == id).cloned()
    }

    fn enter(&self) -> Result<std::sync::MutexGuard<'_, FakeState>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        match state.fail_next.take() {
            Some(Failure::Transport) => Err(Error::Transport("connection refused".to_string())),
            Some(Failure::Status(status)) => Err(Error::Remote {
                status,
                message: "server error".to_string(),
            }),
            None => Ok(state),
        }
    }

    fn with_user<T>(&self, token: &str, f: impl FnOnce(&mut User, &mut u32) -> Result<T>) -> Result<T> {
        let mut state = self.enter()?;
        let user_id = state
            .tokens
            .get(token)
            .cloned()
            .ok_or_else(|| Error::unauthorized("Token has expired"))?;
        let FakeState { users, next_id, .. } = &mut *state;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| Error::not_found("User not found"))?;
        f(user, next_id)
    }
}

impl RemoteApi for FakeApi {
    fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let mut state = self.enter()?;
        if state.users.iter().any(|u| u.email == request.email) {
            return Err(Error::validation("Email already in use"));
        }
        state.next_id += 1;
        let mut user = User::new(format!("user-{}", state.next_id), &request.email, &request.name);
        user.location = request.location.clone();
        user.profile_photo = request.profile_photo.clone();
        let token = format!("token-{}", user.id);

        state.passwords.insert(request.email.clone(), request.password.clone());
        state.tokens.insert(token.clone(), user.id.clone());
        state.users.push(user.clone());
        Ok(AuthResponse { user, token })
    }

    fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let state = self.enter()?;
        if state.passwords.get(&request.email) != Some(&request.password) {
            return Err(Error::unauthorized("Invalid email or password"));
        }
        let user = state
            .users
            .iter()
            .find(|u| u.email == request.email)
            .cloned()
            .ok_or_else(|| Error::unauthorized("Invalid email or password"))?;
        let token = format!("token-{}", user.id);
        Ok(AuthResponse { user, token })
    }

    fn current_user(&self, token: &str) -> Result<User> {
        self.with_user(token, |user, _| Ok(user.clone()))
    }

    fn public_users(&self, token: &str) -> Result<Vec<User>> {
        let state = self.enter()?;
        if !state.tokens.contains_key(token) {
            return Err(Error::unauthorized("Token has expired"));
        }
        Ok(match &state.public_users {
            Some(users) => users.clone(),
            None => state.users.iter().filter(|u| u.is_public).cloned().collect(),
        })
    }

    fn update_profile(&self, token: &str, update: &ProfileUpdate) -> Result<User> {
        self.with_user(token, |user, _| {
            if let Some(name) = &update.name {
                user.name = name.clone();
            }
            if let Some(location) = &update.location {
                user.location = Some(location.clone());
            }
            if let Some(photo) = &update.profile_photo {
                user.profile_photo = Some(photo.clone());
            }
            if let Some(public) = update.is_public {
                user.is_public = public;
            }
            Ok(user.clone())
        })
    }

    fn update_availability(&self, token: &str, availability: &[Availability]) -> Result<User> {
        self.with_user(token, |user, _| {
            user.availability = availability.to_vec();
            Ok(user.clone())
        })
    }

    fn toggle_public(&self, token: &str) -> Result<User> {
        self.with_user(token, |user, _| {
            user.is_public = !user.is_public;
            Ok(user.clone())
        })
    }

    fn add_skill(&self, token: &str, kind: SkillKind, skill: &NewSkill) -> Result<Skill> {
        self.with_user(token, |user, next_id| {
            *next_id += 1;
            let created = Skill {
                id: format!("skill-{}", next_id),
                name: skill.name.clone(),
                description: skill.description.clone(),
                category: skill.category.clone(),
                level: skill.level.clone(),
            };
            *user = user.with_skill(kind, created.clone());
            Ok(created)
        })
    }

    fn remove_skill(&self, token: &str, kind: SkillKind, skill_id: &str) -> Result<()> {
        self.with_user(token, |user, _| {
            if !user.skills(kind).iter().any(|s| s.id == skill_id) {
                return Err(Error::not_found("Skill not found"));
            }
            *user = user.without_skill(kind, skill_id);
            Ok(())
        })
    }
}
