//! In-memory host platform
//!
//! Behaves like the host display API closely enough to drive both engines
//! without a game server: surfaces hold objectives, scores and teams, adding
//! an entry to one team takes it out of every other team on that surface, and
//! handles to unregistered teams silently ignore further calls. Structural
//! calls are journaled per surface so callers can check what a render did.

use crate::platform::{Objective, Session, SessionRegistry, Surface, SurfaceId, SurfaceProvider, SurfaceTeam};
use shared::{DisplaySlot, Text, ViewerId};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::rc::Rc;

/// A structural change recorded by a [`MemorySurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    RegisterTeam(String),
    UnregisterTeam(String),
    ClearSlot(DisplaySlot),
    ResetScore(String),
}

#[derive(Debug, Default)]
struct ObjectiveState {
    title: Text,
    slot: Option<DisplaySlot>,
    scores: BTreeMap<String, i32>,
}

#[derive(Debug, Default)]
struct TeamState {
    entries: BTreeSet<String>,
    prefix: Text,
    suffix: Text,
}

#[derive(Debug, Default)]
struct SurfaceState {
    objectives: BTreeMap<String, ObjectiveState>,
    teams: BTreeMap<String, TeamState>,
    journal: Vec<SurfaceCall>,
}

/// One rendered row of an objective, top row first when listed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub score: i32,
    pub entry: String,
    pub team: Option<String>,
    pub prefix: Text,
    pub suffix: Text,
}

#[derive(Debug, Clone)]
pub struct MemorySurface {
    id: SurfaceId,
    state: Rc<RefCell<SurfaceState>>,
}

impl PartialEq for MemorySurface {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MemorySurface {}

impl MemorySurface {
    fn new(id: u64) -> Self {
        Self {
            id: SurfaceId(id),
            state: Rc::new(RefCell::new(SurfaceState::default())),
        }
    }

    pub fn title(&self, objective: &str) -> Option<Text> {
        let state = self.state.borrow();
        state.objectives.get(objective).map(|o| o.title.clone())
    }

    pub fn display_slot(&self, objective: &str) -> Option<DisplaySlot> {
        let state = self.state.borrow();
        state.objectives.get(objective).and_then(|o| o.slot)
    }

    pub fn score(&self, objective: &str, entry: &str) -> Option<i32> {
        let state = self.state.borrow();
        state
            .objectives
            .get(objective)
            .and_then(|o| o.scores.get(entry).copied())
    }

    pub fn team_names(&self) -> Vec<String> {
        self.state.borrow().teams.keys().cloned().collect()
    }

    pub fn team_entries(&self, name: &str) -> Option<Vec<String>> {
        let state = self.state.borrow();
        state
            .teams
            .get(name)
            .map(|t| t.entries.iter().cloned().collect())
    }

    pub fn team_prefix(&self, name: &str) -> Option<Text> {
        self.state.borrow().teams.get(name).map(|t| t.prefix.clone())
    }

    pub fn team_suffix(&self, name: &str) -> Option<Text> {
        self.state.borrow().teams.get(name).map(|t| t.suffix.clone())
    }

    pub fn journal(&self) -> Vec<SurfaceCall> {
        self.state.borrow().journal.clone()
    }

    pub fn clear_journal(&self) {
        self.state.borrow_mut().journal.clear();
    }

    /// Rows of `objective`, highest score first
    pub fn rows(&self, objective: &str) -> Vec<SidebarRow> {
        let state = self.state.borrow();
        let Some(objective) = state.objectives.get(objective) else {
            return Vec::new();
        };

        let mut rows: Vec<SidebarRow> = objective
            .scores
            .iter()
            .map(|(entry, score)| {
                let team = state
                    .teams
                    .iter()
                    .find(|(_, team)| team.entries.contains(entry));

                SidebarRow {
                    score: *score,
                    entry: entry.clone(),
                    team: team.map(|(name, _)| name.clone()),
                    prefix: team.map(|(_, t)| t.prefix.clone()).unwrap_or_default(),
                    suffix: team.map(|(_, t)| t.suffix.clone()).unwrap_or_default(),
                }
            })
            .collect();

        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows
    }

    fn record(&self, call: SurfaceCall) {
        self.state.borrow_mut().journal.push(call);
    }
}

impl Surface for MemorySurface {
    type Objective = MemoryObjective;
    type Team = MemoryTeam;

    fn id(&self) -> SurfaceId {
        self.id
    }

    fn get_or_create_objective(&self, name: &str) -> MemoryObjective {
        self.state
            .borrow_mut()
            .objectives
            .entry(name.to_string())
            .or_default();

        MemoryObjective {
            surface: self.clone(),
            name: name.to_string(),
        }
    }

    fn clear_slot(&self, slot: DisplaySlot) {
        for objective in self.state.borrow_mut().objectives.values_mut() {
            if objective.slot == Some(slot) {
                objective.slot = None;
            }
        }
        self.record(SurfaceCall::ClearSlot(slot));
    }

    fn team(&self, name: &str) -> Option<MemoryTeam> {
        if !self.state.borrow().teams.contains_key(name) {
            return None;
        }

        Some(MemoryTeam {
            surface: self.clone(),
            name: name.to_string(),
        })
    }

    fn register_team(&self, name: &str) -> MemoryTeam {
        self.state
            .borrow_mut()
            .teams
            .insert(name.to_string(), TeamState::default());
        self.record(SurfaceCall::RegisterTeam(name.to_string()));

        MemoryTeam {
            surface: self.clone(),
            name: name.to_string(),
        }
    }

    fn teams(&self) -> Vec<MemoryTeam> {
        self.team_names()
            .into_iter()
            .map(|name| MemoryTeam {
                surface: self.clone(),
                name,
            })
            .collect()
    }

    fn entries(&self) -> Vec<String> {
        let state = self.state.borrow();
        let entries: BTreeSet<&String> = state
            .objectives
            .values()
            .flat_map(|o| o.scores.keys())
            .collect();

        entries.into_iter().cloned().collect()
    }

    fn reset_score(&self, entry: &str) {
        for objective in self.state.borrow_mut().objectives.values_mut() {
            objective.scores.remove(entry);
        }
        self.record(SurfaceCall::ResetScore(entry.to_string()));
    }
}

pub struct MemoryObjective {
    surface: MemorySurface,
    name: String,
}

impl MemoryObjective {
    fn with<F: FnOnce(&mut ObjectiveState)>(&self, f: F) {
        let mut state = self.surface.state.borrow_mut();
        if let Some(objective) = state.objectives.get_mut(&self.name) {
            f(objective);
        }
    }
}

impl Objective for MemoryObjective {
    fn set_title(&self, title: &Text) {
        self.with(|o| o.title = title.clone());
    }

    fn set_display_slot(&self, slot: DisplaySlot) {
        let mut state = self.surface.state.borrow_mut();

        // a slot shows one objective at a time
        for (name, objective) in state.objectives.iter_mut() {
            if *name == self.name {
                objective.slot = Some(slot);
            } else if objective.slot == Some(slot) {
                objective.slot = None;
            }
        }
    }

    fn set_score(&self, entry: &str, value: i32) {
        self.with(|o| {
            o.scores.insert(entry.to_string(), value);
        });
    }
}

pub struct MemoryTeam {
    surface: MemorySurface,
    name: String,
}

impl MemoryTeam {
    fn with<R, F: FnOnce(&mut TeamState) -> R>(&self, f: F) -> Option<R> {
        let mut state = self.surface.state.borrow_mut();
        state.teams.get_mut(&self.name).map(f)
    }
}

impl SurfaceTeam for MemoryTeam {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn add_entry(&self, entry: &str) {
        let mut state = self.surface.state.borrow_mut();
        if !state.teams.contains_key(&self.name) {
            return;
        }

        // an entry belongs to at most one team per surface
        for (name, team) in state.teams.iter_mut() {
            if *name == self.name {
                team.entries.insert(entry.to_string());
            } else {
                team.entries.remove(entry);
            }
        }
    }

    fn remove_entry(&self, entry: &str) {
        self.with(|t| t.entries.remove(entry));
    }

    fn has_entry(&self, entry: &str) -> bool {
        self.with(|t| t.entries.contains(entry)).unwrap_or(false)
    }

    fn entries(&self) -> Vec<String> {
        self.with(|t| t.entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn set_prefix(&self, prefix: &Text) {
        self.with(|t| t.prefix = prefix.clone());
    }

    fn set_suffix(&self, suffix: &Text) {
        self.with(|t| t.suffix = suffix.clone());
    }

    fn unregister(&self) {
        let removed = self.surface.state.borrow_mut().teams.remove(&self.name);
        if removed.is_some() {
            self.surface
                .record(SurfaceCall::UnregisterTeam(self.name.clone()));
        }
    }
}

#[derive(Debug)]
struct SessionState {
    name: String,
    online: bool,
    surface: MemorySurface,
}

/// Host stand-in owning every surface and session
#[derive(Debug)]
pub struct MemoryPlatform {
    next_surface_id: Cell<u64>,
    provisioning: Cell<bool>,
    default_surface: MemorySurface,
    sessions: RefCell<HashMap<ViewerId, SessionState>>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self {
            next_surface_id: Cell::new(1),
            provisioning: Cell::new(true),
            default_surface: MemorySurface::new(0),
            sessions: RefCell::new(HashMap::new()),
        }
    }

    /// Toggles whether [`SurfaceProvider::new_surface`] can hand out surfaces
    pub fn set_provisioning(&self, available: bool) {
        self.provisioning.set(available);
    }

    /// Connects a new online viewer showing the default surface
    pub fn connect(&self, name: &str) -> ViewerId {
        let viewer = ViewerId::new();
        self.sessions.borrow_mut().insert(
            viewer,
            SessionState {
                name: name.to_string(),
                online: true,
                surface: self.default_surface.clone(),
            },
        );
        viewer
    }

    pub fn set_online(&self, viewer: ViewerId, online: bool) {
        if let Some(session) = self.sessions.borrow_mut().get_mut(&viewer) {
            session.online = online;
        }
    }

    /// The surface last assigned to `viewer`, online or not
    pub fn surface_of(&self, viewer: ViewerId) -> Option<MemorySurface> {
        self.sessions
            .borrow()
            .get(&viewer)
            .map(|s| s.surface.clone())
    }

    pub fn name_of(&self, viewer: ViewerId) -> Option<String> {
        self.sessions.borrow().get(&viewer).map(|s| s.name.clone())
    }

    /// Number of surfaces handed out so far
    pub fn surfaces_created(&self) -> u64 {
        self.next_surface_id.get() - 1
    }
}

impl Default for MemoryPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceProvider for MemoryPlatform {
    type Surface = MemorySurface;

    fn new_surface(&self) -> Option<MemorySurface> {
        if !self.provisioning.get() {
            return None;
        }

        let id = self.next_surface_id.get();
        self.next_surface_id.set(id + 1);
        Some(MemorySurface::new(id))
    }

    fn default_surface(&self) -> MemorySurface {
        self.default_surface.clone()
    }
}

impl SessionRegistry for MemoryPlatform {
    fn resolve_online(&self, viewer: ViewerId) -> Option<Session> {
        let sessions = self.sessions.borrow();
        let session = sessions.get(&viewer).filter(|s| s.online)?;

        Some(Session {
            viewer,
            name: session.name.clone(),
        })
    }

    fn current_surface_of(&self, session: &Session) -> MemorySurface {
        self.surface_of(session.viewer)
            .unwrap_or_else(|| self.default_surface.clone())
    }

    fn assign_surface(&self, session: &Session, surface: &MemorySurface) {
        if let Some(state) = self.sessions.borrow_mut().get_mut(&session.viewer) {
            state.surface = surface.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_scores_and_title() {
        let platform = MemoryPlatform::new();
        let surface = platform.new_surface().unwrap();

        let objective = surface.get_or_create_objective("sidebar");
        objective.set_title(&Text::plain("Lobby"));
        objective.set_display_slot(DisplaySlot::Sidebar);
        objective.set_score("a", 2);
        objective.set_score("b", 1);

        assert_eq!(surface.title("sidebar"), Some(Text::plain("Lobby")));
        assert_eq!(surface.display_slot("sidebar"), Some(DisplaySlot::Sidebar));
        assert_eq!(surface.score("sidebar", "a"), Some(2));
        assert_eq!(surface.entries(), vec!["a".to_string(), "b".to_string()]);

        surface.reset_all_scores();
        assert!(surface.entries().is_empty());
    }

    #[test]
    fn test_clear_slot_hides_objective() {
        let platform = MemoryPlatform::new();
        let surface = platform.new_surface().unwrap();

        let objective = surface.get_or_create_objective("sidebar");
        objective.set_display_slot(DisplaySlot::Sidebar);
        surface.clear_slot(DisplaySlot::Sidebar);

        assert_eq!(surface.display_slot("sidebar"), None);
        assert_eq!(
            surface.journal(),
            vec![SurfaceCall::ClearSlot(DisplaySlot::Sidebar)]
        );
    }

    #[test]
    fn test_entry_moves_between_teams() {
        let platform = MemoryPlatform::new();
        let surface = platform.new_surface().unwrap();

        let red = surface.register_team("red");
        let blue = surface.register_team("blue");
        red.add_entry("Steve");
        blue.add_entry("Steve");

        assert!(!red.has_entry("Steve"));
        assert!(blue.has_entry("Steve"));
    }

    #[test]
    fn test_unregistered_team_ignores_calls() {
        let platform = MemoryPlatform::new();
        let surface = platform.new_surface().unwrap();

        let team = surface.register_team("red");
        team.unregister();
        team.add_entry("Steve");
        team.unregister();

        assert!(surface.team("red").is_none());
        assert!(!team.has_entry("Steve"));
        assert_eq!(
            surface.journal(),
            vec![
                SurfaceCall::RegisterTeam("red".to_string()),
                SurfaceCall::UnregisterTeam("red".to_string()),
            ]
        );
    }

    #[test]
    fn test_rows_sorted_by_score() {
        let platform = MemoryPlatform::new();
        let surface = platform.new_surface().unwrap();

        let objective = surface.get_or_create_objective("sidebar");
        objective.set_score("low", 1);
        objective.set_score("high", 5);
        let team = surface.register_team("line5");
        team.add_entry("high");
        team.set_prefix(&Text::plain("Top"));

        let rows = surface.rows("sidebar");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].entry, "high");
        assert_eq!(rows[0].team.as_deref(), Some("line5"));
        assert_eq!(rows[0].prefix, Text::plain("Top"));
        assert_eq!(rows[1].team, None);
    }

    #[test]
    fn test_provisioning_switch() {
        let platform = MemoryPlatform::new();
        platform.set_provisioning(false);
        assert!(platform.new_surface().is_none());

        platform.set_provisioning(true);
        let first = platform.new_surface().unwrap();
        let second = platform.new_surface().unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(platform.surfaces_created(), 2);
    }

    #[test]
    fn test_sessions_resolve_only_online() {
        let platform = MemoryPlatform::new();
        let steve = platform.connect("Steve");

        let session = platform.resolve_online(steve).unwrap();
        assert_eq!(session.name, "Steve");
        assert_eq!(platform.current_surface_of(&session), platform.default_surface());

        let surface = platform.new_surface().unwrap();
        platform.assign_surface(&session, &surface);
        assert_eq!(platform.surface_of(steve), Some(surface));

        platform.set_online(steve, false);
        assert!(platform.resolve_online(steve).is_none());
        assert!(platform.resolve_online(ViewerId::new()).is_none());
    }
}
