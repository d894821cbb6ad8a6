//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DomainState` - Business/data state (profile, forms, repositories)
//! - `Wizard` / `LoadPlan` - inquiry form and relay load state machines
//! - `ModalStack` - Modal overlay management

pub mod contact;
pub mod domain;
pub mod inquiry;
pub mod loader;
pub mod modal;
pub mod profile;
pub mod record;
pub mod repo;
pub mod ui;

// Re-export commonly used types
pub use contact::{ContactField, ContactForm, ContactPhase};
pub use domain::DomainState;
pub use inquiry::{Field, FieldKind, StepDef, StepState, Wizard};
pub use loader::{LoadAttempt, LoadError, LoadPlan, LoadStep};
pub use modal::{Modal, ModalStack};
pub use profile::{Profile, Project, Section};
pub use record::{InquiryLog, InquiryRecord};
pub use repo::{Repo, ReposState};
pub use ui::{AppMode, StatusKind, StatusLine};
