//! Fixed-cadence driver thread
//!
//! The loop thread owns the `GameController` outright. Inbound calls are
//! queued as [`Command`]s and drained in arrival order at the top of each
//! iteration, so a tick always sees one consistent intent pair. After every
//! iteration that changed something, the new state is published to a
//! [`SnapshotWatch`] (last value wins).
//!
//! Each iteration runs at most one tick and then sleeps for whatever is left
//! of the period. An overrun skips the sleep; there is no catch-up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::controller::GameController;
use crate::settings::Settings;
use crate::sim::GameState;

/// Input events from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    StopMoveLeft,
    MoveRight,
    StopMoveRight,
    Jump,
    TogglePause,
    Restart,
}

impl Command {
    pub fn apply(self, controller: &mut GameController) {
        match self {
            Command::MoveLeft => controller.move_left(),
            Command::StopMoveLeft => controller.stop_move_left(),
            Command::MoveRight => controller.move_right(),
            Command::StopMoveRight => controller.stop_move_right(),
            Command::Jump => controller.jump(),
            Command::TogglePause => controller.toggle_pause(),
            Command::Restart => controller.restart_game(),
        }
    }
}

struct Published {
    version: u64,
    state: Arc<GameState>,
}

/// Latest published game state, shared between the loop and its readers
#[derive(Clone)]
pub struct SnapshotWatch {
    shared: Arc<(Mutex<Published>, Condvar)>,
}

impl SnapshotWatch {
    pub fn new(initial: Arc<GameState>) -> Self {
        Self {
            shared: Arc::new((
                Mutex::new(Published {
                    version: 0,
                    state: initial,
                }),
                Condvar::new(),
            )),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Published> {
        self.shared.0.lock().unwrap_or_else(|e| {
            log::error!("Snapshot lock poisoned: {e:?}");
            e.into_inner()
        })
    }

    /// Replace the published state and wake any waiting readers
    pub fn publish(&self, state: Arc<GameState>) {
        let mut published = self.lock();
        published.version += 1;
        published.state = state;
        drop(published);
        self.shared.1.notify_all();
    }

    pub fn latest(&self) -> Arc<GameState> {
        Arc::clone(&self.lock().state)
    }

    /// Latest state with its version (0 = initial state, +1 per publish)
    pub fn latest_versioned(&self) -> (u64, Arc<GameState>) {
        let published = self.lock();
        (published.version, Arc::clone(&published.state))
    }

    /// Block until a version newer than `seen` is published or `timeout` passes
    ///
    /// Intermediate versions may be skipped; only the newest is returned.
    pub fn wait_newer(&self, seen: u64, timeout: Duration) -> Option<(u64, Arc<GameState>)> {
        let guard = self.lock();
        let (published, _) = self
            .shared
            .1
            .wait_timeout_while(guard, timeout, |p| p.version <= seen)
            .unwrap_or_else(|e| {
                log::error!("Snapshot lock poisoned while waiting: {e:?}");
                e.into_inner()
            });
        (published.version > seen).then(|| (published.version, Arc::clone(&published.state)))
    }
}

/// Cloneable input and snapshot handle for a running loop
///
/// Every call returns immediately. Calls made after the loop stopped are
/// dropped.
#[derive(Clone)]
pub struct GameLoopHandle {
    commands: Sender<Command>,
    snapshots: SnapshotWatch,
}

impl GameLoopHandle {
    pub fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            log::trace!("Game loop stopped, dropping {:?}", command);
        }
    }

    pub fn move_left(&self) {
        self.send(Command::MoveLeft);
    }

    pub fn stop_move_left(&self) {
        self.send(Command::StopMoveLeft);
    }

    pub fn move_right(&self) {
        self.send(Command::MoveRight);
    }

    pub fn stop_move_right(&self) {
        self.send(Command::StopMoveRight);
    }

    pub fn jump(&self) {
        self.send(Command::Jump);
    }

    pub fn toggle_pause(&self) {
        self.send(Command::TogglePause);
    }

    pub fn restart_game(&self) {
        self.send(Command::Restart);
    }

    pub fn snapshots(&self) -> &SnapshotWatch {
        &self.snapshots
    }

    pub fn latest(&self) -> Arc<GameState> {
        self.snapshots.latest()
    }
}

/// A running game loop thread
pub struct GameLoop {
    handle: GameLoopHandle,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<GameController>>,
}

impl GameLoop {
    /// Start ticking `controller` on a dedicated thread
    pub fn spawn(controller: GameController, settings: &Settings) -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let snapshots = SnapshotWatch::new(controller.snapshot());
        let running = Arc::new(AtomicBool::new(true));
        let period = settings.tick_period();

        let thread = {
            let snapshots = snapshots.clone();
            let running = Arc::clone(&running);
            thread::Builder::new()
                .name("game-loop".into())
                .spawn(move || run_loop(controller, rx, snapshots, running, period))?
        };

        log::info!(
            "Game loop started ({} ticks/s, period {:?})",
            settings.target_fps,
            period
        );

        Ok(Self {
            handle: GameLoopHandle {
                commands: tx,
                snapshots,
            },
            running,
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> GameLoopHandle {
        self.handle.clone()
    }

    pub fn snapshots(&self) -> &SnapshotWatch {
        &self.handle.snapshots
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
            && self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop between ticks and hand back the controller
    ///
    /// Returns `None` if the loop thread panicked.
    pub fn stop(mut self) -> Option<GameController> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Option<GameController> {
        self.running.store(false, Ordering::Release);
        let thread = self.thread.take()?;
        match thread.join() {
            Ok(controller) => {
                log::info!("Game loop stopped after {} ticks", controller.tick_count());
                Some(controller)
            }
            Err(e) => {
                log::error!("Game loop thread panicked: {e:?}");
                None
            }
        }
    }
}

impl Drop for GameLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_loop(
    mut controller: GameController,
    commands: Receiver<Command>,
    snapshots: SnapshotWatch,
    running: Arc<AtomicBool>,
    period: Duration,
) -> GameController {
    while running.load(Ordering::Acquire) {
        let start = Instant::now();
        let mut changed = false;

        loop {
            match commands.try_recv() {
                Ok(command) => {
                    command.apply(&mut controller);
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        if controller.state().is_active() {
            controller.tick();
            changed = true;
        }

        if changed {
            snapshots.publish(controller.snapshot());
        }

        let elapsed = start.elapsed();
        log::trace!("Loop iteration took {:?}", elapsed);
        match period.checked_sub(elapsed) {
            Some(remaining) if !remaining.is_zero() => thread::sleep(remaining),
            _ => log::warn!("Tick overran its period: {:?} > {:?}", elapsed, period),
        }
    }
    controller
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_apply() {
        let mut controller = GameController::level_one();
        Command::MoveLeft.apply(&mut controller);
        Command::MoveRight.apply(&mut controller);
        assert_eq!(controller.intents(), (true, true));
        Command::StopMoveLeft.apply(&mut controller);
        Command::StopMoveRight.apply(&mut controller);
        assert_eq!(controller.intents(), (false, false));
        Command::TogglePause.apply(&mut controller);
        assert!(controller.state().is_paused);
        Command::Restart.apply(&mut controller);
        assert!(!controller.state().is_paused);
    }

    #[test]
    fn test_snapshot_watch_versions() {
        let controller = GameController::level_one();
        let watch = SnapshotWatch::new(controller.snapshot());
        assert_eq!(watch.latest_versioned().0, 0);
        assert!(watch.wait_newer(0, Duration::from_millis(5)).is_none());

        watch.publish(controller.snapshot());
        watch.publish(controller.snapshot());
        let (version, _) = watch.wait_newer(0, Duration::from_millis(5)).unwrap();
        assert_eq!(version, 2);
    }
}
