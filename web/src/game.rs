use crate::settings::Settings;
use crate::storage::LocalBestStore;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::{Interval, Timeout};
use mnemo_core as game;
use game::BoardGenerator;
use yew::prelude::*;

const TICK_MS: u32 = 1_000;

/// How a card should be drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
enum ViewCardState {
    FaceDown,
    FaceUp(game::Symbol),
    Matched(game::Symbol),
}

impl From<&game::Card> for ViewCardState {
    fn from(card: &game::Card) -> Self {
        match card.state() {
            game::CardState::Hidden => Self::FaceDown,
            game::CardState::Flipped => Self::FaceUp(card.glyph()),
            game::CardState::Matched => Self::Matched(card.glyph()),
        }
    }
}

/// Message shown once a session is won.
#[derive(Clone, Debug, PartialEq)]
struct WinNotice {
    moves: u32,
    elapsed: String,
    update: game::BestUpdate,
}

impl WinNotice {
    fn text(&self) -> String {
        let mut text = format!("You won in {} moves ({})", self.moves, self.elapsed);
        match self.update {
            game::BestUpdate::New => text.push_str(", first record!"),
            game::BestUpdate::Improved { previous } => {
                text.push_str(&format!(", new best (was {previous})!"))
            }
            game::BestUpdate::Kept { .. } => {}
        }
        text
    }
}

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::SelectOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::SelectOutcome| outcome.has_update())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CardClicked(game::Position),
    Resolve(game::PendingResolution),
    UpdateTime,
    Start,
    Restart,
    SelectDifficulty(game::Difficulty),
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    position: game::Position,
    state: ViewCardState,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::Position>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    use ViewCardState::*;

    let CardProps {
        position,
        state,
        locked,
        callback,
    } = props.clone();

    let mut class = classes!(
        "card",
        match state {
            FaceDown => classes!(),
            FaceUp(_) => classes!("flipped"),
            Matched(_) => classes!("flipped", "matched"),
        }
    );
    if locked {
        class.push("locked");
    }

    let glyph = match state {
        FaceDown => "",
        FaceUp(glyph) | Matched(glyph) => glyph,
    };

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", position);
        callback.emit(position);
    });

    html! {
        <button {class} {onclick} disabled={matches!(state, Matched(_))}>{glyph}</button>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    #[prop_or_default]
    seed: Option<u64>,

    /// Delay before a matched pair is locked in, in milliseconds
    #[arg(long, default_value_t = 300)]
    #[prop_or(300)]
    match_delay: u32,

    /// Delay before a mismatched pair is turned back, in milliseconds
    #[arg(long, default_value_t = 900)]
    #[prop_or(900)]
    mismatch_delay: u32,
}

#[derive(Debug)]
pub(crate) struct GameView {
    settings: Settings,
    timing: game::Timing,
    game: Option<game::PlaySession>,
    best: game::BestResults,
    win: Option<WinNotice>,
    forced_seed: Option<u64>,
    tick_interval: Option<Interval>,
    pending_resolution: Option<Timeout>,
}

impl GameView {
    fn next_seed(&self) -> u64 {
        self.forced_seed.unwrap_or_else(js_random_seed)
    }

    fn new_board(&self) -> game::Board {
        let seed = self.next_seed();
        log::debug!("seed: {}", seed);
        game::RandomBoardGenerator::new(seed).generate(self.settings.difficulty)
    }

    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MS, move || link.send_message(Msg::UpdateTime))
    }

    /// Schedules the one-second tick while the session clock runs, drops it otherwise.
    fn sync_timer(&mut self, ctx: &Context<Self>) {
        let running = self
            .game
            .as_ref()
            .is_some_and(|session| session.timer().is_running());
        self.tick_interval = running.then(|| Self::create_timer(ctx));
    }

    fn schedule_resolution(
        &mut self,
        ctx: &Context<Self>,
        resolution: game::PendingResolution,
    ) {
        let link = ctx.link().clone();
        let delay = resolution.delay_ms(&self.timing);
        log::trace!("resolving {:?} in {}ms", resolution.verdict(), delay);
        // replacing the handle drops (cancels) any earlier timeout
        self.pending_resolution = Some(Timeout::new(delay, move || {
            link.send_message(Msg::Resolve(resolution))
        }));
    }

    fn start(&mut self, ctx: &Context<Self>) -> bool {
        if self.game.is_some() {
            log::debug!("start ignored, session already running");
            return false;
        }

        let session = game::PlaySession::new(self.new_board(), self.settings.difficulty);
        self.game = Some(session);
        self.sync_timer(ctx);
        self.win = None;
        self.refresh_best();
        true
    }

    fn restart(&mut self, ctx: &Context<Self>) -> bool {
        self.pending_resolution = None;
        self.tick_interval = None;

        let board = self.new_board();
        let difficulty = self.settings.difficulty;
        match self.game.as_mut() {
            Some(session) => session.reset(board, difficulty),
            None => self.game = Some(game::PlaySession::new(board, difficulty)),
        }
        self.sync_timer(ctx);
        self.win = None;
        self.refresh_best();
        true
    }

    fn select(&mut self, ctx: &Context<Self>, position: game::Position) -> bool {
        let Some(session) = self.game.as_mut() else {
            return false;
        };

        match session.select(position) {
            Ok(game::SelectOutcome::Pending(resolution)) => {
                self.schedule_resolution(ctx, resolution);
                true
            }
            outcome => {
                if let Err(err) = &outcome {
                    log::debug!("click on {} ignored: {}", position, err);
                }
                outcome.has_update()
            }
        }
    }

    fn resolve(&mut self, resolution: game::PendingResolution) -> bool {
        self.pending_resolution = None;
        let Some(session) = self.game.as_mut() else {
            return false;
        };

        let outcome = session.resolve(resolution);
        if outcome.is_won() {
            self.tick_interval = None;

            let mut store = LocalBestStore;
            if let Some(update) = session.submit_best(&mut store) {
                self.win = Some(WinNotice {
                    moves: session.moves(),
                    elapsed: session.timer().display(),
                    update,
                });
            }
            self.refresh_best();
        }
        outcome.has_update()
    }

    fn refresh_best(&mut self) {
        self.best = game::BestResults::load(&LocalBestStore);
    }

    fn view_stats(&self) -> Html {
        let difficulty = self.settings.difficulty;
        let stats = self.game.as_ref().map(|session| session.stats());
        let (moves, matches, total, elapsed) = match &stats {
            Some(stats) => (
                stats.moves,
                stats.matches,
                stats.total_pairs,
                stats.elapsed.clone(),
            ),
            None => (0, 0, difficulty.pair_count(), game::format_clock(0)),
        };

        html! {
            <dl class="stats">
                <dt>{"Moves"}</dt><dd id="moves">{moves}</dd>
                <dt>{"Matches"}</dt><dd id="matches">{format!("{matches} / {total}")}</dd>
                <dt>{"Time"}</dt><dd id="time">{elapsed}</dd>
                {
                    for game::Difficulty::ALL.into_iter().map(|tier| html! {
                        <>
                            <dt>{format!("Best {}", tier.key())}</dt>
                            <dd id={format!("best-{}", tier.key())}>{self.best.label(tier)}</dd>
                        </>
                    })
                }
            </dl>
        }
    }

    fn view_board(&self, ctx: &Context<Self>) -> Html {
        let Some(session) = self.game.as_ref() else {
            return html! { <p class="board-idle">{"Press start to deal the cards"}</p> };
        };

        let columns = session.difficulty().columns();
        let style = format!("grid-template-columns: repeat({columns}, 1fr)");
        let callback = ctx.link().callback(Msg::CardClicked);

        html! {
            <div class="board" {style}>
                {
                    for session.board().iter().map(|card| {
                        let position = card.position();
                        let state = ViewCardState::from(card);
                        let locked = !session.can_select(position);
                        let callback = callback.clone();
                        html! {
                            <CardView {position} {state} {locked} {callback}/>
                        }
                    })
                }
            </div>
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let mut view = Self {
            settings: LocalOrDefault::local_or_default(),
            timing: game::Timing::new(props.match_delay, props.mismatch_delay),
            game: None,
            best: Default::default(),
            win: None,
            forced_seed: props.seed,
            tick_interval: None,
            pending_resolution: None,
        };
        view.refresh_best();
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CardClicked(position) => self.select(ctx, position),
            Resolve(resolution) => self.resolve(resolution),
            UpdateTime => self
                .game
                .as_mut()
                .map_or(false, |session| session.tick()),
            Start => self.start(ctx),
            Restart => self.restart(ctx),
            SelectDifficulty(difficulty) => {
                if self.settings.difficulty == difficulty {
                    return false;
                }
                log::debug!("difficulty: {:?}", difficulty);
                self.settings.difficulty = difficulty;
                self.settings.local_save();
                if self.game.is_some() {
                    self.restart(ctx);
                }
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let cb_start = ctx.link().callback(|_: MouseEvent| Start);
        let cb_restart = ctx.link().callback(|_: MouseEvent| Restart);
        let current = self.settings.difficulty;

        html! {
            <div class="mnemo">
                <nav>
                    {
                        for game::Difficulty::ALL.into_iter().map(|tier| {
                            let onclick = ctx.link().callback(move |_: MouseEvent| SelectDifficulty(tier));
                            let class = classes!("tier", (tier == current).then_some("active"));
                            html! { <button {class} {onclick}>{tier.label()}</button> }
                        })
                    }
                    <button class="start" onclick={cb_start} disabled={self.game.is_some()}>{"Start"}</button>
                    <button class="restart" onclick={cb_restart}>{"Restart"}</button>
                </nav>
                {self.view_stats()}
                {self.view_board(ctx)}
                {
                    for self.win.iter().map(|notice| html! {
                        <p class="win">{notice.text()}</p>
                    })
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_view_state_follows_engine_state() {
        let board = game::Board::from_glyphs(&["🍎", "🍌", "🍎", "🍌"]).unwrap();
        let mut session = game::PlaySession::new(board, game::Difficulty::Easy);

        assert_eq!(
            ViewCardState::from(session.card(0).unwrap()),
            ViewCardState::FaceDown
        );

        session.select(0).unwrap();
        assert_eq!(
            ViewCardState::from(session.card(0).unwrap()),
            ViewCardState::FaceUp("🍎")
        );

        let Ok(game::SelectOutcome::Pending(resolution)) = session.select(2) else {
            panic!("expected pending resolution");
        };
        session.resolve(resolution);
        assert_eq!(
            ViewCardState::from(session.card(2).unwrap()),
            ViewCardState::Matched("🍎")
        );
    }

    #[test]
    fn ignored_clicks_are_not_updates() {
        let board = game::Board::from_glyphs(&["🍎", "🍎"]).unwrap();
        let mut session = game::PlaySession::new(board, game::Difficulty::Easy);

        assert!(!session.select(5).has_update());
        assert!(session.select(0).has_update());
        assert!(!session.select(0).has_update());
    }

    #[test]
    fn win_notice_mentions_records() {
        let notice = WinNotice {
            moves: 9,
            elapsed: "00:42".into(),
            update: game::BestUpdate::Improved { previous: 12 },
        };
        assert_eq!(notice.text(), "You won in 9 moves (00:42), new best (was 12)!");

        let kept = WinNotice {
            update: game::BestUpdate::Kept { best: 7 },
            ..notice
        };
        assert_eq!(kept.text(), "You won in 9 moves (00:42)");
    }

    #[test]
    fn props_parse_from_url_fragment() {
        use clap::Parser;

        #[derive(Parser)]
        struct Fragment {
            #[command(flatten)]
            game: GameProps,
        }

        let parsed = Fragment::try_parse_from("#--seed=42&--mismatch-delay=1200".split(['#', '&']))
            .unwrap();
        assert_eq!(parsed.game.seed, Some(42));
        assert_eq!(parsed.game.match_delay, 300);
        assert_eq!(parsed.game.mismatch_delay, 1200);
    }
}
