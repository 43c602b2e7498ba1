//! Core domain entities
//!
//! All business entities are defined here. These are pure data structures
//! with validation and lifecycle rules - no I/O or external dependencies.

pub mod availability;
mod feedback;
pub mod result;
mod session;
mod skill;
pub mod swap;
mod user;

pub use availability::{Availability, Day, TimeSlot};
pub use feedback::{validate_rating, Feedback, RatingSummary, MAX_RATING, MIN_RATING};
pub use session::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, Session};
pub use skill::{NewSkill, Skill, SkillKind};
pub use swap::{RequestDirection, SwapAction, SwapRequest, SwapStatus, Transition};
pub use user::User;
