use crate::directory::{lock, DirectoryError, NewSession, SessionDirectory};
use crate::highscores::{HighScore, HighScoreStore};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Mutex;
use thiserror::Error;
use tiny_http::Method;
use tracing::{debug, info};
use turbodeck_core::{
    preview_hand, Boss, Card, EvalError, Event, EventBus, GameSession, HandResult, RngState,
    ScoreTables, ScoringContext, SessionError, SessionState, ShopState,
};
use turbodeck_data::{parse_card, CardParseError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Card(#[from] CardParseError),
    #[error("unknown boss: {0}")]
    UnknownBoss(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("no route for {0}")]
    NotFound(String),
    #[error("encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Directory(_) | ApiError::NotFound(_) => 404,
            ApiError::Encode(_) => 500,
            _ => 400,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct NewGameRequest {
    #[serde(default)]
    pub boss: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub session_id: String,
    #[serde(default)]
    pub selected_cards: Vec<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ShopRequest {
    pub session_id: String,
    #[serde(default)]
    pub index: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SaveScoreRequest {
    pub name: String,
    pub score: i64,
}

/// Preview cards arrive either as card objects or as literals like `"AH"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum CardInput {
    Literal(String),
    Card(Card),
}

impl CardInput {
    fn into_card(self) -> Result<Card, CardParseError> {
        match self {
            CardInput::Literal(text) => parse_card(&text),
            CardInput::Card(card) => Ok(card),
        }
    }
}

#[derive(Serialize)]
struct Reply<T: Serialize> {
    success: bool,
    #[serde(flatten)]
    body: T,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    events: Vec<Event>,
}

#[derive(Serialize)]
struct GameStateBody {
    game_state: SessionState,
}

#[derive(Serialize)]
struct PlayBody {
    hand_name: &'static str,
    hand_result: HandResult,
    final_score: i64,
    turbo_applied: Vec<String>,
    round_complete: bool,
    money_awarded: i64,
    game_state: SessionState,
}

#[derive(Serialize)]
struct ShopBody {
    shop: ShopState,
    money: i64,
    active_turbo_modifiers: Vec<String>,
    game_state: SessionState,
}

#[derive(Serialize)]
struct PreviewBody {
    preview: Option<HandResult>,
}

#[derive(Serialize)]
struct DeckBody {
    count: usize,
    cards: Vec<Card>,
}

#[derive(Serialize)]
struct HighScoresBody {
    highscores: Vec<HighScore>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

/// Request dispatch over the session directory and the high-score store.
/// Transport agnostic apart from the method type.
#[derive(Debug)]
pub struct App {
    directory: SessionDirectory,
    tables: ScoreTables,
    scores: Mutex<HighScoreStore>,
}

impl App {
    pub fn new(directory: SessionDirectory, scores: HighScoreStore) -> Self {
        let tables = ScoreTables::from_config(directory.config());
        Self {
            directory,
            tables,
            scores: Mutex::new(scores),
        }
    }

    pub fn directory(&self) -> &SessionDirectory {
        &self.directory
    }

    pub fn handle(&self, method: &Method, url: &str, body: &str) -> ApiReply {
        let path = url.split('?').next().unwrap_or(url);
        match self.route(method, path, body) {
            Ok(body) => {
                info!(%method, path, status = 200, "request");
                ApiReply { status: 200, body }
            }
            Err(err) => {
                let status = err.status();
                info!(%method, path, status, error = %err, "request failed");
                ApiReply {
                    status,
                    body: json!({ "success": false, "error": err.to_string() }),
                }
            }
        }
    }

    fn route(&self, method: &Method, path: &str, body: &str) -> Result<Value, ApiError> {
        match (method, path) {
            (&Method::Post, "/api/new_game") => self.new_game(body),
            (&Method::Post, "/api/draw_cards") => self.draw_cards(body),
            (&Method::Post, "/api/play_hand") => self.play_hand(body),
            (&Method::Post, "/api/shop/reroll") => self.reroll(body),
            (&Method::Post, "/api/shop/buy") => self.buy(body),
            (&Method::Post, "/api/shop/buy_turbo") => self.buy_turbo(body),
            (&Method::Post, "/api/shop/next_round") => self.next_round(body),
            (&Method::Post, "/api/preview_hand") => self.preview(body),
            (&Method::Post, "/api/save_score") => self.save_score(body),
            (&Method::Get, "/api/highscores") => self.highscores(),
            (&Method::Get, _) => {
                if let Some(id) = path.strip_prefix("/api/game_state/") {
                    return self.game_state(id);
                }
                if let Some(id) = path.strip_prefix("/api/shop/") {
                    return self.shop(id);
                }
                if let Some(id) = path.strip_prefix("/api/remaining_deck/") {
                    return self.remaining_deck(id);
                }
                Err(ApiError::NotFound(path.to_string()))
            }
            _ => Err(ApiError::NotFound(path.to_string())),
        }
    }

    fn new_game(&self, body: &str) -> Result<Value, ApiError> {
        let req: NewGameRequest = parse_optional_body(body)?;
        let boss = req
            .boss
            .as_deref()
            .map(|id| Boss::from_id(id).ok_or_else(|| ApiError::UnknownBoss(id.to_string())))
            .transpose()?;
        let mut bus = EventBus::default();
        let (id, shared) = self.directory.create(
            NewSession {
                boss,
                seed: req.seed,
            },
            &mut bus,
        )?;
        let events = drain_events(&id, &mut bus);
        let game_state = lock(&shared).snapshot();
        reply(GameStateBody { game_state }, events)
    }

    fn game_state(&self, id: &str) -> Result<Value, ApiError> {
        let ((), game_state, events) = self.with_session(id, |_, _| Ok(()))?;
        reply(GameStateBody { game_state }, events)
    }

    fn draw_cards(&self, body: &str) -> Result<Value, ApiError> {
        let req: ActionRequest = parse_body(body)?;
        let ((), game_state, events) = self.with_session(&req.session_id, |session, bus| {
            Ok(session.draw(&req.selected_cards, bus)?)
        })?;
        reply(GameStateBody { game_state }, events)
    }

    fn play_hand(&self, body: &str) -> Result<Value, ApiError> {
        let req: ActionRequest = parse_body(body)?;
        let (outcome, game_state, events) = self.with_session(&req.session_id, |session, bus| {
            Ok(session.play(&req.selected_cards, bus)?)
        })?;
        reply(
            PlayBody {
                hand_name: outcome.hand_result.hand_type.display_name(),
                hand_result: outcome.hand_result,
                final_score: outcome.final_score,
                turbo_applied: outcome.turbo_applied,
                round_complete: outcome.round_complete,
                money_awarded: outcome.money_awarded,
                game_state,
            },
            events,
        )
    }

    fn shop(&self, id: &str) -> Result<Value, ApiError> {
        self.shop_action(id, |_, _| Ok(()))
    }

    fn reroll(&self, body: &str) -> Result<Value, ApiError> {
        let req: ShopRequest = parse_body(body)?;
        self.shop_action(&req.session_id, |session, bus| {
            Ok(session.reroll_shop(bus)?)
        })
    }

    fn buy(&self, body: &str) -> Result<Value, ApiError> {
        let req: ShopRequest = parse_body(body)?;
        let index = required_index(&req)?;
        self.shop_action(&req.session_id, |session, bus| {
            Ok(session.buy_card(index, bus)?)
        })
    }

    fn buy_turbo(&self, body: &str) -> Result<Value, ApiError> {
        let req: ShopRequest = parse_body(body)?;
        let index = required_index(&req)?;
        self.shop_action(&req.session_id, |session, bus| {
            Ok(session.buy_turbo(index, bus)?)
        })
    }

    fn next_round(&self, body: &str) -> Result<Value, ApiError> {
        let req: ShopRequest = parse_body(body)?;
        let ((), game_state, events) = self.with_session(&req.session_id, |session, bus| {
            Ok(session.next_round(bus)?)
        })?;
        reply(GameStateBody { game_state }, events)
    }

    fn preview(&self, body: &str) -> Result<Value, ApiError> {
        let inputs: Vec<CardInput> = parse_body(body)?;
        let cards = inputs
            .into_iter()
            .map(CardInput::into_card)
            .collect::<Result<Vec<_>, _>>()?;
        let ctx = ScoringContext::new(&self.tables, &self.directory.content().effects);
        let preview = preview_hand(&cards, &ctx, &mut RngState::from_entropy())?;
        reply(PreviewBody { preview }, Vec::new())
    }

    fn remaining_deck(&self, id: &str) -> Result<Value, ApiError> {
        let (cards, _, events) = self.with_session(id, |session, _| Ok(session.remaining_deck()))?;
        reply(
            DeckBody {
                count: cards.len(),
                cards,
            },
            events,
        )
    }

    fn save_score(&self, body: &str) -> Result<Value, ApiError> {
        let req: SaveScoreRequest = parse_body(body)?;
        let name = req.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("name is required".to_string()));
        }
        let highscores = lock(&self.scores).record(name, req.score).to_vec();
        info!(name, score = req.score, "score saved");
        reply(HighScoresBody { highscores }, Vec::new())
    }

    fn highscores(&self) -> Result<Value, ApiError> {
        let highscores = lock(&self.scores).scores().to_vec();
        reply(HighScoresBody { highscores }, Vec::new())
    }

    /// Run `action` under the session's lock, then snapshot it and collect
    /// the events it produced.
    fn with_session<T>(
        &self,
        id: &str,
        action: impl FnOnce(&mut GameSession, &mut EventBus) -> Result<T, ApiError>,
    ) -> Result<(T, SessionState, Vec<Event>), ApiError> {
        let shared = self.directory.get(id)?;
        let mut session = lock(&shared);
        let mut bus = EventBus::default();
        let value = action(&mut *session, &mut bus)?;
        let events = drain_events(id, &mut bus);
        Ok((value, session.snapshot(), events))
    }

    fn shop_action(
        &self,
        id: &str,
        action: impl FnOnce(&mut GameSession, &mut EventBus) -> Result<(), ApiError>,
    ) -> Result<Value, ApiError> {
        let (shop, game_state, events) = self.with_session(id, |session, bus| {
            action(session, bus)?;
            Ok(session.shop()?.clone())
        })?;
        reply(
            ShopBody {
                shop,
                money: game_state.money,
                active_turbo_modifiers: game_state.active_turbo_modifiers.clone(),
                game_state,
            },
            events,
        )
    }
}

fn reply<T: Serialize>(body: T, events: Vec<Event>) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(Reply {
        success: true,
        body,
        events,
    })?)
}

fn drain_events(id: &str, bus: &mut EventBus) -> Vec<Event> {
    let events: Vec<Event> = bus.drain().collect();
    for event in &events {
        debug!(session = id, ?event, "game event");
    }
    events
}

fn required_index(req: &ShopRequest) -> Result<usize, ApiError> {
    req.index
        .ok_or_else(|| ApiError::BadRequest("index is required".to_string()))
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|err| ApiError::BadRequest(err.to_string()))
}

fn parse_optional_body<T: DeserializeOwned + Default>(body: &str) -> Result<T, ApiError> {
    if body.trim().is_empty() {
        return Ok(T::default());
    }
    parse_body(body)
}
