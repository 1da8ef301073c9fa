//! Logical teams and their projection onto surfaces
//!
//! A [`Team`] is plain data owned by its board. Anything that has to touch
//! surfaces goes through a [`TeamMut`] handle, which borrows the owning board
//! so it can reach every surface the board currently serves.
//!
//! Projection is additive: refreshing makes sure the surface-side team exists
//! and holds every member, but never removes stray entries. Removal is always
//! explicit, because surfaces of viewers that went away cannot be found by
//! walking the current membership.

use crate::board::{Board, BoardId};
use crate::error::{BoardError, Result};
use crate::platform::{Platform, SessionRegistry, Surface, SurfaceTeam};
use log::{debug, info};
use shared::{TeamColor, Text, ViewerId, MAX_TEAM_NAME_LENGTH};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

/// Identifies a team and the board that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamId {
    pub(crate) board: BoardId,
    pub(crate) key: u64,
}

impl TeamId {
    pub fn board(&self) -> BoardId {
        self.board
    }
}

/// Rejects names the client would refuse
pub fn validate_name(name: &str) -> Result<()> {
    let length = name.chars().count();
    if length > MAX_TEAM_NAME_LENGTH {
        return Err(BoardError::InvalidName {
            name: name.to_string(),
            length,
            max: MAX_TEAM_NAME_LENGTH,
        });
    }
    Ok(())
}

/// A named group of viewers with a display label and color
#[derive(Debug, Clone)]
pub struct Team {
    id: TeamId,
    name: String,
    display: Text,
    color: TeamColor,
    members: BTreeSet<ViewerId>,
    /// Display names members were last projected under
    known_names: HashMap<ViewerId, String>,
}

impl Team {
    pub(crate) fn new(id: TeamId, name: &str, display: Text, color: TeamColor) -> Result<Self> {
        validate_name(name)?;

        Ok(Self {
            id,
            name: name.to_string(),
            display,
            color,
            members: BTreeSet::new(),
            known_names: HashMap::new(),
        })
    }

    /// Stable id, valid only on the owning board
    pub fn id(&self) -> TeamId {
        self.id
    }

    /// Name the team is registered under on every surface
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Label shown for the team
    pub fn display(&self) -> &Text {
        &self.display
    }

    pub fn color(&self) -> TeamColor {
        self.color
    }

    /// Members in id order
    pub fn members(&self) -> impl Iterator<Item = ViewerId> + '_ {
        self.members.iter().copied()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Whether `viewer` belongs to the team
    pub fn is_member(&self, viewer: ViewerId) -> bool {
        self.members.contains(&viewer)
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Entries the members should appear under right now
    ///
    /// Online members use their display name, everyone else their raw id.
    fn resolve_entries<P: Platform>(&mut self, platform: &P) -> Vec<String> {
        let mut entries = Vec::with_capacity(self.members.len());

        for viewer in &self.members {
            match platform.resolve_online(*viewer) {
                Some(session) => {
                    self.known_names.insert(*viewer, session.name.clone());
                    entries.push(session.name);
                }
                None => entries.push(viewer.to_string()),
            }
        }

        entries
    }

    /// Creates the surface-side team if missing and adds any missing member
    pub(crate) fn refresh_on<P: Platform>(&mut self, platform: &P, surface: &P::Surface) {
        let entries = self.resolve_entries(platform);
        let team = surface
            .team(&self.name)
            .unwrap_or_else(|| surface.register_team(&self.name));

        for entry in entries {
            if !team.has_entry(&entry) {
                team.add_entry(&entry);
            }
        }
    }

    /// Every key the viewer may have been projected under
    fn stale_entries(&self, viewer: ViewerId) -> Vec<String> {
        let mut entries = vec![viewer.to_string()];
        if let Some(name) = self.known_names.get(&viewer) {
            entries.push(name.clone());
        }
        entries
    }

    fn unregister_on<S: Surface>(&self, surface: &S) {
        if let Some(team) = surface.team(&self.name) {
            team.unregister();
        }
    }
}

/// Mutable access to one team of a board
pub struct TeamMut<'a, P: Platform> {
    board: &'a mut Board<P>,
    index: usize,
}

impl<'a, P: Platform> TeamMut<'a, P> {
    pub(crate) fn new(board: &'a mut Board<P>, index: usize) -> Self {
        Self { board, index }
    }

    /// The team this handle points at
    pub fn team(&self) -> &Team {
        &self.board.teams[self.index]
    }

    fn team_mut(&mut self) -> &mut Team {
        &mut self.board.teams[self.index]
    }

    /// Adds a member and re-projects the team; no-op for existing members
    pub fn add_member(&mut self, viewer: ViewerId) {
        if !self.team_mut().members.insert(viewer) {
            return;
        }

        debug!("Added {} to team {}", viewer, self.team().name);
        self.refresh();
    }

    /// Removes a member and clears its entries from every served surface
    pub fn remove_member(&mut self, viewer: ViewerId) {
        if !self.team_mut().members.remove(&viewer) {
            return;
        }

        debug!("Removed {} from team {}", viewer, self.team().name);
        self.refresh();

        let stale = self.team().stale_entries(viewer);
        for surface in self.board.served_surfaces() {
            if let Some(team) = surface.team(&self.team().name) {
                for entry in &stale {
                    team.remove_entry(entry);
                }
            }
        }
        self.team_mut().known_names.remove(&viewer);
    }

    /// Projects the team onto every surface the board serves
    pub fn refresh(&mut self) {
        let platform = Rc::clone(&self.board.platform);
        let surfaces = self.board.served_surfaces();
        let team = self.team_mut();

        for surface in &surfaces {
            team.refresh_on(platform.as_ref(), surface);
        }
    }

    /// Projects the team onto one surface
    pub fn refresh_on(&mut self, surface: &P::Surface) {
        let platform = Rc::clone(&self.board.platform);
        self.team_mut().refresh_on(platform.as_ref(), surface);
    }

    /// Unregisters the team from every served surface and drops all members
    ///
    /// The team stays on its board; use the board's `remove_team` to drop it.
    pub fn destroy(&mut self) {
        for surface in self.board.served_surfaces() {
            self.team().unregister_on(&surface);
        }

        let team = self.team_mut();
        team.members.clear();
        team.known_names.clear();
        info!("Destroyed team {}", team.name);
    }

    /// Renames the team
    ///
    /// Surface-side registrations keep the old name: destroy and refresh a
    /// live team to move it over.
    pub fn rename(&mut self, name: &str) -> Result<()> {
        let id = self.team().id;
        self.board.check_name(name, Some(id))?;

        self.team_mut().name = name.to_string();
        Ok(())
    }

    pub fn set_display(&mut self, display: Text) {
        self.team_mut().display = display;
    }

    pub fn set_color(&mut self, color: TeamColor) {
        self.team_mut().color = color;
    }
}
