//! Shared scoreboard state and the line reconciliation algorithm
//!
//! A [`Board`] owns the teams, the subscribed viewers and, per surface, the
//! lines it rendered last. Both engines wrap one: the global engine with a
//! single lazily created surface, the personal engine with one surface per
//! viewer. Which of the two a board is decides how surfaces are found; the
//! rest of the logic is the same.
//!
//! ## Rendering
//!
//! The body of a scoreboard is drawn with one surface-side team per row,
//! named `<prefix><score>`. Each row team holds a single invisible entry whose
//! score fixes the vertical position, and the visible text lives in the team
//! prefix and suffix. Re-rendering the same lines touches nothing structural;
//! rendering a different number of lines tears the body down first so no
//! orphaned rows survive.

use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::platform::{Objective, Platform, SessionRegistry, Surface, SurfaceId, SurfaceProvider, SurfaceTeam};
use crate::team::{validate_name, Team, TeamId, TeamMut};
use log::{debug, info, warn};
use shared::text::char_length;
use shared::{TeamColor, Text, TextSerializer, ViewerId, LINE_SPLIT_LENGTH, MAX_LINE_LENGTH};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BOARD_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a board, used to tell which board a team belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardId(u64);

/// Whether an engine could reach a surface for the requested operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    /// The host could not provide a surface yet; nothing was changed
    NotReady,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

pub(crate) enum Surfaces<S> {
    Shared(Option<S>),
    PerViewer(HashMap<ViewerId, S>),
}

/// Lines last written to a surface
struct RenderedLines {
    lines: Vec<Text>,
    /// False if the render stopped part-way
    complete: bool,
}

/// Entry key of the row at `score`
///
/// The score's hex digits as color codes followed by a reset: unique per
/// row, invisible on the client and never a valid viewer name.
pub fn line_entry_key(score: usize) -> String {
    let mut key = String::new();
    for digit in format!("{:x}", score).chars() {
        key.push('\u{a7}');
        key.push(digit);
    }
    key.push('\u{a7}');
    key.push('r');
    key
}

/// Teams, subscribers and render state shared by both engines
///
/// Engines own exactly one board and forward their public API to it.
pub struct Board<P: Platform> {
    id: BoardId,
    pub(crate) platform: Rc<P>,
    config: BoardConfig,
    serializer: Box<dyn TextSerializer>,
    pub(crate) teams: Vec<Team>,
    next_team_key: u64,
    subscribers: Vec<ViewerId>,
    previous: HashMap<SurfaceId, RenderedLines>,
    surfaces: Surfaces<P::Surface>,
}

impl<P: Platform> Board<P> {
    fn new(platform: Rc<P>, config: BoardConfig, surfaces: Surfaces<P::Surface>) -> Self {
        Self {
            id: BoardId(NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed)),
            platform,
            serializer: config.text_format.serializer(),
            config,
            teams: Vec::new(),
            next_team_key: 1,
            subscribers: Vec::new(),
            previous: HashMap::new(),
            surfaces,
        }
    }

    /// A board whose viewers all share one surface
    pub(crate) fn shared(platform: Rc<P>, config: BoardConfig) -> Self {
        Self::new(platform, config, Surfaces::Shared(None))
    }

    /// A board giving every viewer its own surface
    pub(crate) fn per_viewer(platform: Rc<P>, config: BoardConfig) -> Self {
        Self::new(platform, config, Surfaces::PerViewer(HashMap::new()))
    }

    /// Identity stamped on every team this board creates
    pub fn id(&self) -> BoardId {
        self.id
    }

    /// Configuration the board was created with
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The host this board draws on
    pub fn platform(&self) -> &Rc<P> {
        &self.platform
    }

    /// Subscribed viewers in subscription order
    pub fn subscribers(&self) -> &[ViewerId] {
        &self.subscribers
    }

    /// Whether `viewer` currently holds a surface from this board
    pub fn is_subscribed(&self, viewer: ViewerId) -> bool {
        self.subscribers.contains(&viewer)
    }

    /// All teams in creation order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Looks a team up by id; `None` once it was removed
    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|team| team.id() == id)
    }

    /// Mutable handle to a team, able to reach the board's surfaces
    pub fn team_mut(&mut self, id: TeamId) -> Option<TeamMut<'_, P>> {
        let index = self.teams.iter().position(|team| team.id() == id)?;
        Some(TeamMut::new(self, index))
    }

    /// Case-insensitive lookup by name
    pub fn find_team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|team| team.matches(name))
    }

    pub(crate) fn create_team(&mut self, name: &str, display: Text, color: TeamColor) -> Result<TeamId> {
        let id = TeamId {
            board: self.id,
            key: self.next_team_key,
        };
        self.check_name(name, None)?;
        let team = Team::new(id, name, display, color)?;

        self.next_team_key += 1;
        self.teams.push(team);
        info!("Created team {}", name);

        if let Some(mut team) = self.team_mut(id) {
            team.refresh();
        }
        Ok(id)
    }

    /// Checks that `name` may be used by a team other than `except`
    ///
    /// Names must fit the client limit, must not collide with this board's
    /// line teams and must be unique ignoring case.
    pub(crate) fn check_name(&self, name: &str, except: Option<TeamId>) -> Result<()> {
        validate_name(name)?;

        if self.config.is_line_team(name) {
            return Err(BoardError::ReservedName {
                name: name.to_string(),
                prefix: self.config.line_team_prefix.clone(),
            });
        }

        let taken = self
            .teams
            .iter()
            .any(|team| Some(team.id()) != except && team.matches(name));
        if taken {
            return Err(BoardError::DuplicateName(name.to_string()));
        }
        Ok(())
    }

    /// Destroys and drops a team; returns false if this board does not own it
    pub(crate) fn remove_team(&mut self, id: TeamId) -> bool {
        if id.board != self.id {
            debug!("Ignoring removal of a team owned by another board");
            return false;
        }

        let Some(index) = self.teams.iter().position(|team| team.id() == id) else {
            return false;
        };

        TeamMut::new(self, index).destroy();
        self.teams.remove(index);
        true
    }

    /// Every surface this board currently draws on
    pub(crate) fn served_surfaces(&self) -> Vec<P::Surface> {
        match &self.surfaces {
            Surfaces::Shared(surface) => surface.iter().cloned().collect(),
            Surfaces::PerViewer(surfaces) => self
                .subscribers
                .iter()
                .filter_map(|viewer| surfaces.get(viewer))
                .cloned()
                .collect(),
        }
    }

    pub(crate) fn surface_of(&self, viewer: ViewerId) -> Option<&P::Surface> {
        match &self.surfaces {
            Surfaces::Shared(surface) => surface.as_ref().filter(|_| self.is_subscribed(viewer)),
            Surfaces::PerViewer(surfaces) => surfaces.get(&viewer),
        }
    }

    pub(crate) fn current_shared_surface(&self) -> Option<&P::Surface> {
        match &self.surfaces {
            Surfaces::Shared(surface) => surface.as_ref(),
            Surfaces::PerViewer(_) => None,
        }
    }

    /// The shared surface, created on first use
    ///
    /// Creating it attaches it to every online subscriber and projects all
    /// teams onto it. Returns `None` while the host cannot provide surfaces,
    /// and always for per-viewer boards.
    pub(crate) fn shared_surface(&mut self) -> Option<P::Surface> {
        match &self.surfaces {
            Surfaces::Shared(Some(surface)) => return Some(surface.clone()),
            Surfaces::Shared(None) => {}
            Surfaces::PerViewer(_) => return None,
        }

        let surface = self.platform.new_surface()?;
        self.surfaces = Surfaces::Shared(Some(surface.clone()));
        info!("Created shared surface {:?}", surface.id());

        for viewer in &self.subscribers {
            if let Some(session) = self.platform.resolve_online(*viewer) {
                self.platform.assign_surface(&session, &surface);
            }
        }
        self.refresh_teams_on(&surface);

        Some(surface)
    }

    pub(crate) fn subscribe(&mut self, viewer: ViewerId) -> Readiness {
        let surface = match self.surfaces {
            Surfaces::Shared(_) => match self.shared_surface() {
                Some(surface) => surface,
                None => {
                    warn!("No surface available yet, cannot subscribe {}", viewer);
                    return Readiness::NotReady;
                }
            },
            Surfaces::PerViewer(_) => {
                if self.is_subscribed(viewer) {
                    return Readiness::Ready;
                }

                let Some(surface) = self.platform.new_surface() else {
                    warn!("No surface available yet, cannot subscribe {}", viewer);
                    return Readiness::NotReady;
                };
                if let Surfaces::PerViewer(surfaces) = &mut self.surfaces {
                    surfaces.insert(viewer, surface.clone());
                }
                self.refresh_teams_on(&surface);
                surface
            }
        };

        if !self.is_subscribed(viewer) {
            self.subscribers.push(viewer);
            info!("Subscribed {} to surface {:?}", viewer, surface.id());
        }

        if let Some(session) = self.platform.resolve_online(viewer) {
            self.platform.assign_surface(&session, &surface);
        }

        Readiness::Ready
    }

    /// Detaches a viewer, puts it back on the default surface and strips it
    /// from every team
    pub(crate) fn unsubscribe(&mut self, viewer: ViewerId) {
        self.subscribers.retain(|v| *v != viewer);

        match self.platform.resolve_online(viewer) {
            Some(session) => {
                let current = self.platform.current_surface_of(&session);
                debug!("Resetting {} from surface {:?}", viewer, current.id());
                let default = self.platform.default_surface();
                self.platform.assign_surface(&session, &default);
            }
            None => debug!("{} is offline, leaving its surface assignment", viewer),
        }

        let members: Vec<usize> = (0..self.teams.len())
            .filter(|index| self.teams[*index].is_member(viewer))
            .collect();
        for index in members {
            TeamMut::new(self, index).remove_member(viewer);
        }

        if let Surfaces::PerViewer(surfaces) = &mut self.surfaces {
            if let Some(surface) = surfaces.remove(&viewer) {
                self.previous.remove(&surface.id());
            }
        }

        info!("Unsubscribed {}", viewer);
    }

    /// Resets every subscriber to the default surface and drops all state
    pub(crate) fn destroy(&mut self) {
        let default = self.platform.default_surface();
        for viewer in &self.subscribers {
            if let Some(session) = self.platform.resolve_online(*viewer) {
                self.platform.assign_surface(&session, &default);
            }
        }

        for index in 0..self.teams.len() {
            TeamMut::new(self, index).destroy();
        }

        self.subscribers.clear();
        self.teams.clear();
        self.previous.clear();
        self.surfaces = match self.surfaces {
            Surfaces::Shared(_) => Surfaces::Shared(None),
            Surfaces::PerViewer(_) => Surfaces::PerViewer(HashMap::new()),
        };
        info!("Destroyed board {:?}", self.id);
    }

    /// Reconciles `surface` with `title` and `lines` (top line first)
    ///
    /// Lines before a failing one stay applied; the failure is reported and
    /// the next render rebuilds instead of treating the lines as unchanged.
    pub(crate) fn render(&mut self, surface: &P::Surface, title: &Text, lines: &[Text]) -> Result<()> {
        let objective = surface.get_or_create_objective(&self.config.objective_name);
        objective.set_title(title);

        let surface_id = surface.id();
        if let Some(previous) = self.previous.get(&surface_id) {
            if previous.complete && previous.lines == lines {
                debug!("Surface {:?} unchanged, refreshing teams only", surface_id);
                self.refresh_teams_on(surface);
                return Ok(());
            }

            if previous.lines.len() != lines.len() {
                debug!(
                    "Surface {:?} goes from {} to {} lines, rebuilding",
                    surface_id,
                    previous.lines.len(),
                    lines.len()
                );
                self.tear_down(surface);
            }
        }

        self.previous.insert(
            surface_id,
            RenderedLines {
                lines: lines.to_vec(),
                complete: false,
            },
        );
        objective.set_display_slot(self.config.display_slot);

        for (index, line) in lines.iter().rev().enumerate() {
            let score = index + 1;
            let (prefix, suffix) = self.split_line(line)?;

            let name = self.config.line_team_name(score);
            let key = line_entry_key(score);

            let team = match surface.team(&name) {
                Some(team) => {
                    for entry in team.entries() {
                        team.remove_entry(&entry);
                    }
                    team.add_entry(&key);
                    team
                }
                None => {
                    let team = surface.register_team(&name);
                    team.add_entry(&key);
                    objective.set_score(&key, score as i32);
                    team
                }
            };

            team.set_prefix(&prefix);
            team.set_suffix(&suffix);
        }

        if let Some(rendered) = self.previous.get_mut(&surface_id) {
            rendered.complete = true;
        }
        self.refresh_teams_on(surface);
        Ok(())
    }

    /// Prefix and suffix for one row
    ///
    /// Lines that fit the split length are used as they are; longer ones are
    /// cut in serialized form.
    pub(crate) fn split_line(&self, line: &Text) -> Result<(Text, Text)> {
        let serialized = self.serializer.serialize(line);
        let length = char_length(&serialized);

        if length > MAX_LINE_LENGTH {
            return Err(BoardError::LineTooLong {
                line: serialized,
                length,
                max: MAX_LINE_LENGTH,
            });
        }

        if length <= LINE_SPLIT_LENGTH {
            return Ok((line.clone(), Text::empty()));
        }

        let (prefix, suffix) = self.serializer.split(&serialized, LINE_SPLIT_LENGTH);
        Ok((Text::plain(prefix), Text::plain(suffix)))
    }

    fn tear_down(&self, surface: &P::Surface) {
        surface.clear_slot(self.config.display_slot);
        surface.reset_all_scores();

        for team in surface.teams() {
            if self.config.is_line_team(&team.name()) {
                team.unregister();
            }
        }
    }

    fn refresh_teams_on(&mut self, surface: &P::Surface) {
        let platform = Rc::clone(&self.platform);
        for team in self.teams.iter_mut() {
            team.refresh_on(platform.as_ref(), surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextFormat;
    use crate::memory::{MemoryPlatform, MemorySurface, SurfaceCall};
    use pretty_assertions::assert_eq;

    fn lines(texts: &[&str]) -> Vec<Text> {
        texts.iter().map(|t| Text::plain(*t)).collect()
    }

    fn shared_board() -> (Board<MemoryPlatform>, Rc<MemoryPlatform>, MemorySurface) {
        let platform = Rc::new(MemoryPlatform::new());
        let mut board = Board::shared(Rc::clone(&platform), BoardConfig::default());
        let surface = board.shared_surface().unwrap();
        (board, platform, surface)
    }

    fn line_teams(surface: &MemorySurface) -> Vec<String> {
        let config = BoardConfig::default();
        surface
            .team_names()
            .into_iter()
            .filter(|name| config.is_line_team(name))
            .collect()
    }

    #[test]
    fn test_line_entry_keys_are_unique() {
        assert_eq!(line_entry_key(1), "\u{a7}1\u{a7}r");
        assert_eq!(line_entry_key(26), "\u{a7}1\u{a7}a\u{a7}r");

        let keys: std::collections::HashSet<String> = (1..=300).map(line_entry_key).collect();
        assert_eq!(keys.len(), 300);
    }

    #[test]
    fn test_render_scenario() {
        let (mut board, _platform, surface) = shared_board();

        board
            .render(&surface, &Text::plain("Lobby"), &lines(&["Players: 3", "Rank: Gold"]))
            .unwrap();

        assert_eq!(surface.title("sidebar"), Some(Text::plain("Lobby")));
        assert_eq!(surface.display_slot("sidebar"), Some(shared::DisplaySlot::Sidebar));

        let rows = surface.rows("sidebar");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].score, 2);
        assert_eq!(rows[0].team.as_deref(), Some("line2"));
        assert_eq!(rows[0].prefix, Text::plain("Players: 3"));
        assert_eq!(rows[1].score, 1);
        assert_eq!(rows[1].team.as_deref(), Some("line1"));
        assert_eq!(rows[1].prefix, Text::plain("Rank: Gold"));
        assert_eq!(rows[1].suffix, Text::empty());
    }

    #[test]
    fn test_identical_render_is_structurally_silent() {
        let (mut board, _platform, surface) = shared_board();
        let body = lines(&["a", "b", "c"]);

        board.render(&surface, &Text::plain("T"), &body).unwrap();
        surface.clear_journal();
        board.render(&surface, &Text::plain("T"), &body).unwrap();

        assert_eq!(surface.journal(), Vec::new());
        assert_eq!(line_teams(&surface).len(), 3);
    }

    #[test]
    fn test_title_updates_even_when_lines_unchanged() {
        let (mut board, _platform, surface) = shared_board();
        let body = lines(&["a"]);

        board.render(&surface, &Text::plain("Before"), &body).unwrap();
        board.render(&surface, &Text::plain("After"), &body).unwrap();

        assert_eq!(surface.title("sidebar"), Some(Text::plain("After")));
    }

    #[test]
    fn test_same_count_updates_in_place() {
        let (mut board, _platform, surface) = shared_board();

        board.render(&surface, &Text::plain("T"), &lines(&["a", "b"])).unwrap();
        surface.clear_journal();
        board.render(&surface, &Text::plain("T"), &lines(&["a", "z"])).unwrap();

        assert_eq!(surface.journal(), Vec::new());
        assert_eq!(surface.team_prefix("line1"), Some(Text::plain("z")));
        assert_eq!(surface.team_prefix("line2"), Some(Text::plain("a")));
    }

    #[test]
    fn test_shrink_leaves_no_orphans() {
        let (mut board, _platform, surface) = shared_board();

        board
            .render(&surface, &Text::plain("T"), &lines(&["a", "b", "c", "d"]))
            .unwrap();
        board.render(&surface, &Text::plain("T"), &lines(&["x", "y"])).unwrap();

        assert_eq!(line_teams(&surface), vec!["line1".to_string(), "line2".to_string()]);
        let scores: Vec<i32> = surface.rows("sidebar").iter().map(|row| row.score).collect();
        assert_eq!(scores, vec![2, 1]);
        assert_eq!(surface.display_slot("sidebar"), Some(shared::DisplaySlot::Sidebar));
    }

    #[test]
    fn test_grow_adds_rows() {
        let (mut board, _platform, surface) = shared_board();

        board.render(&surface, &Text::plain("T"), &lines(&["a"])).unwrap();
        board
            .render(&surface, &Text::plain("T"), &lines(&["a", "b", "c"]))
            .unwrap();

        assert_eq!(line_teams(&surface).len(), 3);
        let scores: Vec<i32> = surface.rows("sidebar").iter().map(|row| row.score).collect();
        assert_eq!(scores, vec![3, 2, 1]);
        assert_eq!(surface.team_prefix("line3"), Some(Text::plain("a")));
    }

    #[test]
    fn test_teardown_spares_user_teams() {
        let (mut board, _platform, surface) = shared_board();
        board
            .create_team("discipline", Text::plain("D"), TeamColor::Gray)
            .unwrap();
        board
            .create_team("lineup", Text::plain("L"), TeamColor::Gray)
            .unwrap();

        board.render(&surface, &Text::plain("T"), &lines(&["a", "b"])).unwrap();
        board.render(&surface, &Text::plain("T"), &lines(&["a"])).unwrap();

        assert!(surface.team("discipline").is_some());
        assert!(surface.team("lineup").is_some());
        assert!(surface.team("line2").is_none());
    }

    #[test]
    fn test_split_boundaries() {
        let (board, _platform, _surface) = shared_board();

        let (prefix, suffix) = board.split_line(&Text::plain("a".repeat(64))).unwrap();
        assert_eq!(prefix, Text::plain("a".repeat(64)));
        assert_eq!(suffix, Text::empty());

        let (prefix, suffix) = board.split_line(&Text::plain("a".repeat(65))).unwrap();
        assert_eq!(prefix, Text::plain("a".repeat(64)));
        assert_eq!(suffix, Text::plain("a"));

        let (_, suffix) = board.split_line(&Text::plain("a".repeat(128))).unwrap();
        assert_eq!(suffix, Text::plain("a".repeat(64)));

        assert_eq!(
            board.split_line(&Text::plain("a".repeat(129))),
            Err(BoardError::LineTooLong {
                line: "a".repeat(129),
                length: 129,
                max: 128,
            })
        );
    }

    #[test]
    fn test_split_measures_serialized_form() {
        let (board, _platform, _surface) = shared_board();

        // 60 visible chars, 76 once wrapped in markup tags
        let line = Text::colored("b".repeat(60), TeamColor::Red);
        let (prefix, suffix) = board.split_line(&line).unwrap();

        assert_eq!(prefix, Text::plain(format!("<red>{}", "b".repeat(59))));
        assert_eq!(suffix, Text::plain("b</red>"));
    }

    #[test]
    fn test_short_styled_line_kept_as_is() {
        let (board, _platform, _surface) = shared_board();
        let line = Text::colored("Gold", TeamColor::Gold).bold();

        let (prefix, suffix) = board.split_line(&line).unwrap();

        assert_eq!(prefix, line);
        assert_eq!(suffix, Text::empty());
    }

    #[test]
    fn test_failed_render_applies_earlier_lines() {
        let (mut board, _platform, surface) = shared_board();
        let body = vec![Text::plain("x".repeat(200)), Text::plain("fine")];

        let result = board.render(&surface, &Text::plain("T"), &body);

        assert!(matches!(result, Err(BoardError::LineTooLong { length: 200, .. })));
        // rendering runs bottom-up, so the last line made it
        assert_eq!(surface.team_prefix("line1"), Some(Text::plain("fine")));
        assert!(surface.team("line2").is_none());
    }

    #[test]
    fn test_failed_render_is_not_cached_as_done() {
        let (mut board, _platform, surface) = shared_board();
        let body = vec![Text::plain("x".repeat(200))];

        assert!(board.render(&surface, &Text::plain("T"), &body).is_err());
        assert!(board.render(&surface, &Text::plain("T"), &body).is_err());

        board.render(&surface, &Text::plain("T"), &lines(&["ok"])).unwrap();
        assert_eq!(surface.team_prefix("line1"), Some(Text::plain("ok")));
    }

    #[test]
    fn test_render_refreshes_logical_teams() {
        let (mut board, platform, surface) = shared_board();
        let steve = platform.connect("Steve");
        let id = board.create_team("red", Text::plain("Red"), TeamColor::Red).unwrap();
        board.team_mut(id).unwrap().add_member(steve);

        // someone wiped the team off the surface
        surface.team("red").unwrap().unregister();
        board.render(&surface, &Text::plain("T"), &lines(&["a"])).unwrap();

        assert_eq!(surface.team_entries("red"), Some(vec!["Steve".to_string()]));
    }

    #[test]
    fn test_legacy_format_carries_color_into_suffix() {
        let platform = Rc::new(MemoryPlatform::new());
        let config = BoardConfig {
            text_format: TextFormat::Legacy,
            ..BoardConfig::default()
        };
        let board: Board<MemoryPlatform> = Board::shared(platform, config);
        let line = Text::colored("c".repeat(70), TeamColor::Aqua);

        let (prefix, suffix) = board.split_line(&line).unwrap();

        assert_eq!(prefix, Text::plain(format!("&b{}", "c".repeat(62))));
        assert_eq!(suffix, Text::plain(format!("&b{}", "c".repeat(8))));
    }

    #[test]
    fn test_create_team_validation() {
        let (mut board, _platform, _surface) = shared_board();

        board.create_team("Red", Text::plain("Red"), TeamColor::Red).unwrap();

        assert_eq!(
            board.create_team("RED", Text::plain("Red"), TeamColor::Red),
            Err(BoardError::DuplicateName("RED".to_string()))
        );
        assert!(matches!(
            board.create_team("seventeen_chars__", Text::empty(), TeamColor::Red),
            Err(BoardError::InvalidName { length: 17, .. })
        ));
        assert_eq!(board.teams().len(), 1);
        assert_eq!(board.find_team("red").map(|t| t.name()), Some("Red"));
        assert!(board.find_team("blue").is_none());
    }

    #[test]
    fn test_create_team_rejects_line_team_names() {
        let (mut board, _platform, surface) = shared_board();

        for name in ["line1", "line42"] {
            assert!(matches!(
                board.create_team(name, Text::empty(), TeamColor::Gray),
                Err(BoardError::ReservedName { .. })
            ));
        }
        board.create_team("line", Text::empty(), TeamColor::Gray).unwrap();
        board.create_team("line1a", Text::empty(), TeamColor::Gray).unwrap();

        assert_eq!(board.teams().len(), 2);
        assert!(surface.team("line1").is_none());
    }

    #[test]
    fn test_create_team_registers_on_surface() {
        let (mut board, _platform, surface) = shared_board();
        board.create_team("red", Text::plain("Red"), TeamColor::Red).unwrap();

        assert_eq!(
            surface.journal(),
            vec![SurfaceCall::RegisterTeam("red".to_string())]
        );
    }

    #[test]
    fn test_remove_team_from_other_board_is_ignored() {
        let (mut board, platform, surface) = shared_board();
        let mut other: Board<MemoryPlatform> = Board::shared(platform, BoardConfig::default());
        let foreign = other.create_team("red", Text::plain("Red"), TeamColor::Red).unwrap();
        board.create_team("red", Text::plain("Red"), TeamColor::Red).unwrap();

        assert!(!board.remove_team(foreign));
        assert_eq!(board.teams().len(), 1);
        assert!(surface.team("red").is_some());
    }

    #[test]
    fn test_remove_team() {
        let (mut board, _platform, surface) = shared_board();
        let id = board.create_team("red", Text::plain("Red"), TeamColor::Red).unwrap();

        assert!(board.remove_team(id));
        assert!(!board.remove_team(id));
        assert!(board.teams().is_empty());
        assert!(surface.team("red").is_none());
    }
}
