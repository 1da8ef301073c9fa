//! A scoreboard every subscriber sees the same way

use crate::board::{Board, Readiness};
use crate::config::BoardConfig;
use crate::engine::ScoreboardEngine;
use crate::error::Result;
use crate::platform::Platform;
use log::warn;
use shared::{Text, ViewerId};
use std::rc::Rc;

pub type TitleSupplier = Box<dyn Fn() -> Text>;
pub type LinesSupplier = Box<dyn Fn() -> Vec<Text>>;

/// One shared surface for all subscribers, created on first use
///
/// While the host cannot provide a surface, [`GlobalScoreboard::render`] and
/// [`ScoreboardEngine::subscribe`] change nothing and report
/// [`Readiness::NotReady`], so callers may start using the engine before the
/// host has finished starting up.
pub struct GlobalScoreboard<P: Platform> {
    board: Board<P>,
    title: TitleSupplier,
    lines: LinesSupplier,
}

impl<P: Platform> GlobalScoreboard<P> {
    pub fn new(
        platform: Rc<P>,
        title: impl Fn() -> Text + 'static,
        lines: impl Fn() -> Vec<Text> + 'static,
    ) -> Self {
        Self::with_config(platform, BoardConfig::default(), title, lines)
    }

    pub fn with_config(
        platform: Rc<P>,
        config: BoardConfig,
        title: impl Fn() -> Text + 'static,
        lines: impl Fn() -> Vec<Text> + 'static,
    ) -> Self {
        Self {
            board: Board::shared(platform, config),
            title: Box::new(title),
            lines: Box::new(lines),
        }
    }

    /// Pulls fresh title and lines and reconciles the shared surface
    pub fn render(&mut self) -> Result<Readiness> {
        let Some(surface) = self.board.shared_surface() else {
            warn!("No surface available yet, skipping render");
            return Ok(Readiness::NotReady);
        };

        let title = (self.title)();
        let lines = (self.lines)();
        self.board.render(&surface, &title, &lines)?;

        Ok(Readiness::Ready)
    }

    /// The shared surface, if it was created yet
    pub fn surface(&self) -> Option<&P::Surface> {
        self.board.current_shared_surface()
    }

    pub fn set_title(&mut self, title: impl Fn() -> Text + 'static) {
        self.title = Box::new(title);
    }

    pub fn set_lines(&mut self, lines: impl Fn() -> Vec<Text> + 'static) {
        self.lines = Box::new(lines);
    }
}

impl<P: Platform> ScoreboardEngine for GlobalScoreboard<P> {
    type Platform = P;

    /// Attaches the shared surface and brings it up to date right away
    fn subscribe(&mut self, viewer: ViewerId) -> Readiness {
        let readiness = self.board.subscribe(viewer);
        if readiness.is_ready() {
            if let Err(e) = self.render() {
                warn!("Failed to render scoreboard after subscribing {}: {}", viewer, e);
            }
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
