//! The public surface shared by the global and personal engines

use crate::board::{Board, Readiness};
use crate::error::{BoardError, Result};
use crate::platform::Platform;
use crate::team::{Team, TeamId, TeamMut};
use shared::{TeamColor, Text, ViewerId};

/// Operations every scoreboard engine offers
///
/// Implementors only expose their [`Board`]; everything here is provided.
/// How surfaces are found is decided by the kind of board the engine holds.
pub trait ScoreboardEngine {
    type Platform: Platform;

    fn board(&self) -> &Board<Self::Platform>;

    fn board_mut(&mut self) -> &mut Board<Self::Platform>;

    /// Attaches a viewer; subscribing twice is harmless
    ///
    /// Engines draw the board for the viewer as part of subscribing.
    fn subscribe(&mut self, viewer: ViewerId) -> Readiness {
        self.board_mut().subscribe(viewer)
    }

    /// Detaches a viewer, resets it to the default surface and removes it
    /// from every team
    fn unsubscribe(&mut self, viewer: ViewerId) {
        self.board_mut().unsubscribe(viewer);
    }

    fn is_subscribed(&self, viewer: ViewerId) -> bool {
        self.board().is_subscribed(viewer)
    }

    fn subscribers(&self) -> &[ViewerId] {
        self.board().subscribers()
    }

    fn teams(&self) -> &[Team] {
        self.board().teams()
    }

    fn team(&self, id: TeamId) -> Option<&Team> {
        self.board().team(id)
    }

    fn team_mut(&mut self, id: TeamId) -> Option<TeamMut<'_, Self::Platform>> {
        self.board_mut().team_mut(id)
    }

    /// Case-insensitive lookup by name
    fn find_team(&self, name: &str) -> Option<&Team> {
        self.board().find_team(name)
    }

    /// Creates a white team
    fn create_team(&mut self, name: &str, display: Text) -> Result<TeamId> {
        self.create_team_with_color(name, display, TeamColor::default())
    }

    fn create_team_with_color(&mut self, name: &str, display: Text, color: TeamColor) -> Result<TeamId> {
        self.board_mut().create_team(name, display, color)
    }

    /// Destroys a team; returns false if it belongs to another engine
    fn remove_team(&mut self, id: TeamId) -> bool {
        self.board_mut().remove_team(id)
    }

    /// Resets every subscriber to the default surface and destroys all teams
    fn destroy(mut self)
    where
        Self: Sized,
    {
        self.board_mut().destroy();
    }
}

/// Outcome of rendering every viewer of a personal engine
#[derive(Debug, Default)]
pub struct RenderReport {
    pub rendered: Vec<ViewerId>,
    /// Subscribers skipped because they are not online
    pub offline: Vec<ViewerId>,
    pub failures: Vec<(ViewerId, BoardError)>,
}

impl RenderReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
