//! A scoreboard drawn separately for every subscriber

use crate::board::{Board, Readiness};
use crate::config::BoardConfig;
use crate::engine::{RenderReport, ScoreboardEngine};
use crate::platform::{Platform, Session, SessionRegistry};
use log::{debug, warn};
use shared::{Text, ViewerId};
use std::rc::Rc;

pub type SessionTitleSupplier = Box<dyn Fn(&Session) -> Text>;
pub type SessionLinesSupplier = Box<dyn Fn(&Session) -> Vec<Text>>;

/// One surface per subscriber, with title and lines computed per viewer
///
/// Teams are shared across all viewers: every team is projected onto every
/// subscriber's surface.
pub struct PersonalScoreboard<P: Platform> {
    board: Board<P>,
    title: SessionTitleSupplier,
    lines: SessionLinesSupplier,
}

impl<P: Platform> PersonalScoreboard<P> {
    pub fn new(
        platform: Rc<P>,
        title: impl Fn(&Session) -> Text + 'static,
        lines: impl Fn(&Session) -> Vec<Text> + 'static,
    ) -> Self {
        Self::with_config(platform, BoardConfig::default(), title, lines)
    }

    pub fn with_config(
        platform: Rc<P>,
        config: BoardConfig,
        title: impl Fn(&Session) -> Text + 'static,
        lines: impl Fn(&Session) -> Vec<Text> + 'static,
    ) -> Self {
        Self {
            board: Board::per_viewer(platform, config),
            title: Box::new(title),
            lines: Box::new(lines),
        }
    }

    /// Renders every online subscriber
    ///
    /// Viewers are processed in subscription order. A failing viewer is
    /// recorded and does not stop the others.
    pub fn render(&mut self) -> RenderReport {
        let mut report = RenderReport::default();
        for viewer in self.board.subscribers().to_vec() {
            self.render_into(viewer, &mut report);
        }
        report
    }

    /// Renders a single subscriber
    pub fn render_viewer(&mut self, viewer: ViewerId) -> RenderReport {
        let mut report = RenderReport::default();
        if self.board.is_subscribed(viewer) {
            self.render_into(viewer, &mut report);
        }
        report
    }

    fn render_into(&mut self, viewer: ViewerId, report: &mut RenderReport) {
        let Some(session) = self.board.platform().resolve_online(viewer) else {
            debug!("{} is offline, skipping render", viewer);
            report.offline.push(viewer);
            return;
        };
        let Some(surface) = self.board.surface_of(viewer).cloned() else {
            return;
        };

        let title = (self.title)(&session);
        let lines = (self.lines)(&session);
        match self.board.render(&surface, &title, &lines) {
            Ok(()) => report.rendered.push(viewer),
            Err(e) => {
                warn!("Failed to render scoreboard for {}: {}", session.name, e);
                report.failures.push((viewer, e));
            }
        }
    }

    /// The surface owned for `viewer`, if subscribed
    pub fn surface_of(&self, viewer: ViewerId) -> Option<&P::Surface> {
        self.board.surface_of(viewer)
    }

    pub fn set_title(&mut self, title: impl Fn(&Session) -> Text + 'static) {
        self.title = Box::new(title);
    }

    pub fn set_lines(&mut self, lines: impl Fn(&Session) -> Vec<Text> + 'static) {
        self.lines = Box::new(lines);
    }
}

impl<P: Platform> ScoreboardEngine for PersonalScoreboard<P> {
    type Platform = P;

    /// Gives the viewer its own surface and draws it immediately
    fn subscribe(&mut self, viewer: ViewerId) -> Readiness {
        let readiness = self.board.subscribe(viewer);
        if readiness.is_ready() {
            self.render_viewer(viewer);
        }
        readiness
    }

    fn board(&self) -> &Board<P> {
        &self.board
    }

    fn board_mut(&mut self) -> &mut Board<P> {
        &mut self.board
    }
}
