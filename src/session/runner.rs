//! Event loop driving a [`GameSession`].
//!
//! The runner is the imperative shell around the session: it owns the
//! timer, executes effects against the gateway, and feeds every outcome
//! back into the session as an event. Events from the input stream, the
//! timer and the gateway are applied strictly one at a time.

use super::event::{Effect, Event, Input};
use super::machine::GameSession;
use super::snapshot::SessionSnapshot;
use crate::config::GameConfig;
use crate::gateway::RemoteGateway;
use crate::timer::{Tick, Timer};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::watch;
use tracing::{debug, trace};

pub struct SessionRunner {
    session: GameSession,
    gateway: Arc<dyn RemoteGateway>,
    timer: Timer,
    ticks: UnboundedReceiver<Tick>,
    completions: UnboundedReceiver<Event>,
    completion_sink: UnboundedSender<Event>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl SessionRunner {
    pub fn new(config: &GameConfig, gateway: Arc<dyn RemoteGateway>) -> Self {
        let session = GameSession::new(config);
        let (tick_sink, ticks) = mpsc::unbounded_channel();
        let (completion_sink, completions) = mpsc::unbounded_channel();
        let (snapshots, _) = watch::channel(session.snapshot());

        Self {
            session,
            gateway,
            timer: Timer::new(config.tick_interval(), tick_sink),
            ticks,
            completions,
            completion_sink,
            snapshots,
        }
    }

    /// Receive a snapshot after every processed event.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Load the first maze, then process events until `inputs` closes.
    ///
    /// Returns the session as it stood at teardown. The timer is stopped
    /// before returning.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<Input>) -> GameSession {
        let effects = self.session.request_maze();
        self.execute(effects);
        self.publish();

        loop {
            let event = tokio::select! {
                input = inputs.recv() => match input {
                    Some(input) => Event::Input(input),
                    None => break,
                },
                Some(tick) = self.ticks.recv() => {
                    if !self.timer.accepts(tick) {
                        trace!(epoch = tick.epoch, "dropping stale tick");
                        continue;
                    }
                    Event::Tick
                }
                Some(event) = self.completions.recv() => event,
            };

            let effects = self.session.handle(event);
            self.execute(effects);
            self.publish();
        }

        debug!("input stream closed, tearing down session");
        let effects = self.session.teardown();
        self.execute(effects);
        self.publish();
        self.session
    }

    fn execute(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartTimer => self.timer.start(),
                Effect::StopTimer => self.timer.stop(),
                Effect::GenerateMaze {
                    request,
                    width,
                    height,
                } => {
                    let gateway = Arc::clone(&self.gateway);
                    self.spawn_call(async move {
                        let result = gateway.generate_maze(width, height).await;
                        Event::MazeGenerated { request, result }
                    });
                }
                Effect::FetchLastScore { request } => {
                    let gateway = Arc::clone(&self.gateway);
                    self.spawn_call(async move {
                        let result = gateway.fetch_last_score().await;
                        Event::LastScoreFetched { request, result }
                    });
                }
                Effect::SaveScore {
                    request,
                    moves,
                    elapsed,
                } => {
                    let gateway = Arc::clone(&self.gateway);
                    self.spawn_call(async move {
                        let result = gateway.save_score(moves, elapsed).await;
                        Event::ScoreSaved { request, result }
                    });
                }
            }
        }
    }

    /// Run a gateway call in the background and post its outcome.
    fn spawn_call<F>(&self, call: F)
    where
        F: Future<Output = Event> + Send + 'static,
    {
        let sink = self.completion_sink.clone();
        tokio::spawn(async move {
            let event = call.await;
            if sink.send(event).is_err() {
                debug!("session gone before gateway call completed");
            }
        });
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.session.snapshot());
    }
}
