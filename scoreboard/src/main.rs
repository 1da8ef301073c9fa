use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use rand::rngs::ThreadRng;
use rand::Rng;
use scoreboard::{
    BoardConfig, GlobalScoreboard, MemoryPlatform, PersonalScoreboard, Readiness, ScoreboardEngine,
    SessionRegistry, TeamId,
};
use shared::{TeamColor, Text, ViewerId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;
use tokio::time::{interval, Duration, MissedTickBehavior};

const VIEWER_NAMES: [&str; 8] = [
    "Steve", "Alex", "Notch", "Jeb", "Dinnerbone", "Grumm", "Kai", "Noor",
];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Everyone sees the same board
    Global,
    /// Every viewer sees their own stats
    Personal,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which engine to drive
    #[arg(short, long, value_enum, default_value = "global")]
    mode: Mode,

    /// Number of simulated viewers
    #[arg(short, long, default_value = "4")]
    viewers: usize,

    /// Ticks per second
    #[arg(short, long, default_value = "2")]
    tick_rate: u32,

    /// Stop after this many ticks (runs until Ctrl+C otherwise)
    #[arg(short = 'n', long)]
    ticks: Option<u64>,

    /// Log the first viewer's sidebar every this many ticks
    #[arg(long, default_value = "5")]
    log_every: u64,

    /// JSON file with engine configuration
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default)]
struct Stats {
    kills: u32,
    deaths: u32,
    coins: u32,
}

type StatsTable = Rc<RefCell<HashMap<ViewerId, Stats>>>;

enum Demo {
    Global(GlobalScoreboard<MemoryPlatform>),
    Personal(PersonalScoreboard<MemoryPlatform>),
}

impl Demo {
    fn new(mode: Mode, platform: &Rc<MemoryPlatform>, config: BoardConfig, viewers: &[ViewerId], stats: &StatsTable) -> Self {
        match mode {
            Mode::Global => {
                let host = Rc::clone(platform);
                let stats = Rc::clone(stats);
                let viewers = viewers.to_vec();

                Demo::Global(GlobalScoreboard::with_config(
                    Rc::clone(platform),
                    config,
                    || Text::colored("Arena", TeamColor::Gold).bold(),
                    move || {
                        let online = viewers
                            .iter()
                            .filter(|viewer| host.resolve_online(**viewer).is_some())
                            .count();
                        let table = stats.borrow();
                        let leader = table
                            .iter()
                            .max_by_key(|(_, s)| s.kills)
                            .and_then(|(viewer, s)| host.name_of(*viewer).map(|name| (name, s.kills)));

                        let mut lines = vec![Text::plain(format!("Online: {}", online)), Text::empty()];
                        if let Some((name, kills)) = leader {
                            lines.push(Text::plain("Leader: ").append(Text::colored(name, TeamColor::Yellow)));
                            lines.push(Text::plain(format!("Kills: {}", kills)));
                        }
                        lines
                    },
                ))
            }
            Mode::Personal => {
                let stats = Rc::clone(stats);

                Demo::Personal(PersonalScoreboard::with_config(
                    Rc::clone(platform),
                    config,
                    |session| Text::colored(session.name.clone(), TeamColor::Aqua).bold(),
                    move |session| {
                        let own = stats.borrow().get(&session.viewer).copied().unwrap_or_default();
                        vec![
                            Text::colored(format!("Kills: {}", own.kills), TeamColor::Green),
                            Text::colored(format!("Deaths: {}", own.deaths), TeamColor::Red),
                            Text::empty(),
                            Text::plain("Coins: ").append(Text::colored(own.coins.to_string(), TeamColor::Gold)),
                        ]
                    },
                ))
            }
        }
    }

    fn engine_mut(&mut self) -> &mut dyn ScoreboardEngine<Platform = MemoryPlatform> {
        match self {
            Demo::Global(board) => board,
            Demo::Personal(board) => board,
        }
    }

    fn render(&mut self) {
        match self {
            Demo::Global(board) => match board.render() {
                Ok(Readiness::Ready) => {}
                Ok(Readiness::NotReady) => warn!("Host not ready, render skipped"),
                Err(e) => warn!("Render failed: {}", e),
            },
            Demo::Personal(board) => {
                let report = board.render();
                if !report.offline.is_empty() {
                    debug!("Skipped {} offline viewer(s)", report.offline.len());
                }
                for (viewer, e) in &report.failures {
                    warn!("Render failed for {}: {}", viewer, e);
                }
            }
        }
    }

    fn destroy(self) {
        match self {
            Demo::Global(board) => board.destroy(),
            Demo::Personal(board) => board.destroy(),
        }
    }
}

fn viewer_name(index: usize) -> String {
    let name = VIEWER_NAMES[index % VIEWER_NAMES.len()];
    match index / VIEWER_NAMES.len() {
        0 => name.to_string(),
        round => format!("{}{}", name, round),
    }
}

/// Random events for one tick
fn simulate(rng: &mut ThreadRng, stats: &StatsTable, viewers: &[ViewerId]) {
    let mut table = stats.borrow_mut();
    for viewer in viewers {
        let entry = table.entry(*viewer).or_default();
        if rng.gen_bool(0.2) {
            entry.kills += 1;
        }
        if rng.gen_bool(0.1) {
            entry.deaths += 1;
        }
        entry.coins += rng.gen_range(0..5);
    }
}

fn log_sidebar(platform: &MemoryPlatform, viewer: ViewerId, objective: &str) {
    let Some(surface) = platform.surface_of(viewer) else {
        return;
    };

    let name = platform.name_of(viewer).unwrap_or_else(|| viewer.to_string());
    let title = surface.title(objective).map(|t| t.to_plain()).unwrap_or_default();
    info!("Sidebar of {}: {}", name, title);
    for row in surface.rows(objective) {
        info!("{:>3} | {}{}", row.score, row.prefix.to_plain(), row.suffix.to_plain());
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => BoardConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => BoardConfig::default(),
    };
    let objective = config.objective_name.clone();

    info!("Starting {:?} scoreboard demo with {} viewers", args.mode, args.viewers);

    let platform = Rc::new(MemoryPlatform::new());
    let stats: StatsTable = Rc::default();
    let viewers: Vec<ViewerId> = (0..args.viewers)
        .map(|index| platform.connect(&viewer_name(index)))
        .collect();

    let mut demo = Demo::new(args.mode, &platform, config, &viewers, &stats);
    let engine = demo.engine_mut();
    let red: TeamId =
        engine.create_team_with_color("red", Text::colored("Red", TeamColor::Red), TeamColor::Red)?;
    let blue: TeamId =
        engine.create_team_with_color("blue", Text::colored("Blue", TeamColor::Blue), TeamColor::Blue)?;

    for (index, viewer) in viewers.iter().enumerate() {
        if !engine.subscribe(*viewer).is_ready() {
            warn!("Could not subscribe {}", viewer);
        }

        let team = if index % 2 == 0 { red } else { blue };
        if let Some(mut team) = engine.team_mut(team) {
            team.add_member(*viewer);
        }
    }

    let mut ticker = interval(Duration::from_secs_f32(1.0 / args.tick_rate.max(1) as f32));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut rng = rand::thread_rng();
    let flaky = viewers.last().copied();
    let watched = viewers.first().copied();
    let mut tick: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down gracefully...");
                break;
            }
        }
        tick += 1;

        simulate(&mut rng, &stats, &viewers);

        // one viewer drops out and comes back every ten ticks
        if let Some(viewer) = flaky.filter(|_| tick % 10 == 0) {
            let online = (tick / 10) % 2 == 0;
            platform.set_online(viewer, online);
            info!("{} is now {}", viewer, if online { "online" } else { "offline" });
        }

        demo.render();

        if let Some(viewer) = watched.filter(|_| tick % args.log_every.max(1) == 0) {
            log_sidebar(&platform, viewer, &objective);
        }

        if args.ticks.is_some_and(|limit| tick >= limit) {
            break;
        }
    }

    demo.destroy();
    info!("Scoreboard destroyed after {} ticks", tick);

    Ok(())
}
