//! Interfaces the engine consumes from the host platform
//!
//! Surfaces, objectives and surface-side teams are host handles: cloning one
//! yields another handle to the same host object, and every mutation goes
//! through `&self`. The engine runs on the host's single update thread, so
//! none of these traits require `Send` or `Sync`.

use shared::{DisplaySlot, Text, ViewerId};

/// Stable identity of a surface, used to key per-surface engine state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u64);

/// An online viewer as resolved by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub viewer: ViewerId,
    /// Name shown to other viewers, used as the team entry
    pub name: String,
}

/// A host display object: one objective per name plus a set of named teams
pub trait Surface: Clone {
    type Objective: Objective;
    type Team: SurfaceTeam;

    fn id(&self) -> SurfaceId;

    fn get_or_create_objective(&self, name: &str) -> Self::Objective;

    /// Hides whatever objective currently occupies `slot`
    fn clear_slot(&self, slot: DisplaySlot);

    fn team(&self, name: &str) -> Option<Self::Team>;

    /// Registers a new team; callers check [`Surface::team`] first
    fn register_team(&self, name: &str) -> Self::Team;

    fn teams(&self) -> Vec<Self::Team>;

    /// Every entry holding a score in any objective
    fn entries(&self) -> Vec<String>;

    fn reset_score(&self, entry: &str);

    fn reset_all_scores(&self) {
        for entry in self.entries() {
            self.reset_score(&entry);
        }
    }
}

/// The titled, scored component driving the visible body of a surface
pub trait Objective {
    fn set_title(&self, title: &Text);

    fn set_display_slot(&self, slot: DisplaySlot);

    /// Creates the score entry for `entry` if needed and sets its value
    fn set_score(&self, entry: &str, value: i32);
}

/// A team as registered on one surface
pub trait SurfaceTeam {
    fn name(&self) -> String;

    fn add_entry(&self, entry: &str);

    fn remove_entry(&self, entry: &str);

    fn has_entry(&self, entry: &str) -> bool;

    fn entries(&self) -> Vec<String>;

    fn set_prefix(&self, prefix: &Text);

    fn set_suffix(&self, suffix: &Text);

    fn unregister(&self);
}

/// Creates surfaces
pub trait SurfaceProvider {
    type Surface: Surface;

    /// A fresh surface, or `None` while the host cannot provide one yet
    fn new_surface(&self) -> Option<Self::Surface>;

    /// The surface viewers fall back to when they leave a scoreboard
    fn default_surface(&self) -> Self::Surface;
}

/// Read access to connected viewers plus surface assignment
pub trait SessionRegistry: SurfaceProvider {
    fn resolve_online(&self, viewer: ViewerId) -> Option<Session>;

    fn current_surface_of(&self, session: &Session) -> Self::Surface;

    fn assign_surface(&self, session: &Session, surface: &Self::Surface);
}

/// A host offering both surfaces and sessions
pub trait Platform: SessionRegistry {}

impl<T: SessionRegistry> Platform for T {}
